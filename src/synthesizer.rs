// src/synthesizer.rs
// Persona synthesis: one structured-prompt call against the staged corpus.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::llm::{GeneratorError, TextGenerator};
use crate::prompt::build_persona_prompt;
use crate::store::StoreError;

/// The synthesized persona. Opaque: nothing downstream parses it, the
/// model's adherence to the requested field layout is advisory only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaDocument(String);

impl PersonaDocument {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("generative model call failed: {0}")]
    Generator(#[from] GeneratorError),
    #[error("staged corpus unavailable: {0}")]
    Store(#[from] StoreError),
}

pub struct PersonaSynthesizer {
    generator: Arc<dyn TextGenerator>,
}

impl PersonaSynthesizer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Submit the whole staged corpus in one model call and return the
    /// response unmodified. No retry, no chunking: if the corpus exceeds
    /// the model's input limit the failure surfaces verbatim.
    pub async fn synthesize(&self, corpus_text: &str) -> Result<PersonaDocument, SynthesisError> {
        let prompt = build_persona_prompt(corpus_text);
        debug!(prompt_chars = prompt.len(), "requesting persona synthesis");
        let text = self.generator.generate(&prompt).await?;
        Ok(PersonaDocument(text))
    }
}
