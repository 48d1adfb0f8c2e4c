// src/model/mod.rs
// Language-model backend. Only the Llama / Ollama HTTP API is supported.

mod llama;

pub use llama::{build_prompt, LlamaClient};
