//! # Ollama Generation
//!
//! A [`GenerationClient`] turns a prompt into a completion. [`OllamaClient`]
//! implements it against a local Ollama server's non-streaming
//! `/api/generate` endpoint.

pub mod client;
pub mod config;
pub mod error;

pub use client::{GenerationClient, NO_RESPONSE, OllamaClient};
pub use config::OllamaConfig;
pub use error::{GenerationError, Result};
