// src/llm/mod.rs
// Generative-text collaborator boundary.
//
// One method, one generic failure type. The production implementation is
// the Gemini client; tests substitute canned generators.

pub mod gemini;

use async_trait::async_trait;

pub use gemini::GeminiClient;

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct GeneratorError {
    message: String,
}

impl GeneratorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for GeneratorError {
    fn from(e: reqwest::Error) -> Self {
        Self::new(format!("request failed: {e}"))
    }
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Complete `prompt` with a single model call, no retries.
    async fn generate(&self, prompt: &str) -> Result<String, GeneratorError>;
}
