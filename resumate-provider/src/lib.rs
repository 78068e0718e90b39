//! # Resumate Providers
//!
//! Chat backend implementations:
//! - [`OpenAiProvider`]: hosted OpenAI-compatible chat-completions API
//! - [`OllamaProvider`]: local Ollama-style model server
//!
//! [`ChatClient`] picks one of them from a [`ClientConfig`](resumate_core::ClientConfig)
//! on every call.

pub mod client;
pub mod ollama;
pub mod openai;

#[cfg(test)]
mod mock_server;

// Re-exports
pub use client::ChatClient;
pub use ollama::{OllamaBuilder, OllamaProvider};
pub use openai::{OpenAiBuilder, OpenAiProvider};
