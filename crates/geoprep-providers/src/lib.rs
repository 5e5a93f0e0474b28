//! geoprep-providers: Language-model provider integrations.
//!
//! Implements the `LlmProvider` trait for Google Gemini and Ollama, plus an
//! offline mock used by tests and demos.

pub mod config;
pub mod error;
pub mod gemini;
pub mod mock;
pub mod ollama;

pub use config::{create_provider, load_config, GeoprepConfig, ProviderConfig};
pub use error::ProviderError;
