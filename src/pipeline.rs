// src/pipeline.rs
// Linear pipeline: fetch -> stage -> synthesize, one shot per invocation.
//
// No stage is retried and no stage proceeds past a failure. The staged
// file is the only state shared between stages, which is what lets the
// synthesis stage re-run on its own against a previous staging.

use std::path::PathBuf;

use thiserror::Error;
use tracing::{error, info};

use crate::fetcher::{ContentFetcher, FetchError};
use crate::handle::AccountHandle;
use crate::store::{CorpusStore, SaveOutcome, StoreError, StoredCorpusRef};
use crate::synthesizer::{PersonaSynthesizer, SynthesisError};

/// Which stage a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Staging,
    Synthesizing,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Stage::Fetching => "fetch",
            Stage::Staging => "staging",
            Stage::Synthesizing => "synthesis",
        })
    }
}

/// A stage-tagged pipeline failure. The variant identifies the stage, the
/// payload carries the cause.
#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("staging failed: {0}")]
    Staging(StoreError),
    #[error("synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),
}

impl StageError {
    pub fn stage(&self) -> Stage {
        match self {
            StageError::Fetch(_) => Stage::Fetching,
            StageError::Staging(_) => Stage::Staging,
            StageError::Synthesis(_) => Stage::Synthesizing,
        }
    }
}

/// Terminal outcome of one pipeline run.
#[derive(Debug)]
pub enum PipelineOutcome {
    /// Persona synthesized and written to `persona_path`.
    Done { persona_path: PathBuf },
    /// The account had no eligible posts and no comments. Nothing staged.
    NoContent,
    Failed(StageError),
}

pub struct Pipeline {
    fetcher: ContentFetcher,
    store: CorpusStore,
    synthesizer: PersonaSynthesizer,
    post_limit: usize,
    comment_limit: usize,
}

impl Pipeline {
    pub fn new(
        fetcher: ContentFetcher,
        store: CorpusStore,
        synthesizer: PersonaSynthesizer,
        post_limit: usize,
        comment_limit: usize,
    ) -> Self {
        Self {
            fetcher,
            store,
            synthesizer,
            post_limit,
            comment_limit,
        }
    }

    /// Run the full pipeline for `handle`.
    pub async fn run(&self, handle: &AccountHandle) -> PipelineOutcome {
        info!(user = %handle, "fetching newest posts and comments");
        let corpus = match self
            .fetcher
            .fetch(handle, self.post_limit, self.comment_limit)
            .await
        {
            Ok(corpus) => corpus,
            Err(e) => {
                error!(user = %handle, error = %e, "fetch stage failed");
                return PipelineOutcome::Failed(e.into());
            }
        };

        // Nothing eligible: terminate before any file is written.
        if corpus.is_empty() {
            info!(user = %handle, "no content found");
            return PipelineOutcome::NoContent;
        }

        info!(
            user = %handle,
            posts = corpus.post_count(),
            comments = corpus.comment_count(),
            "staging corpus"
        );
        // The emptiness check above owns the NoContent decision: only a
        // non-empty corpus reaches save, so both outcomes just carry the
        // file reference here. The empty-text check before synthesis is
        // the remaining guard for staged-but-empty files.
        let reference = match self.store.save(handle, &corpus) {
            Ok(SaveOutcome::Staged(reference)) | Ok(SaveOutcome::NoContent(reference)) => {
                reference
            }
            Err(e) => {
                error!(user = %handle, error = %e, "staging stage failed");
                return PipelineOutcome::Failed(StageError::Staging(e));
            }
        };

        self.synthesize_staged(handle, &reference).await
    }

    /// Re-run only the synthesis stage against an already-staged corpus.
    /// Fails in the synthesis stage when no staged file exists.
    pub async fn run_synthesis_only(&self, handle: &AccountHandle) -> PipelineOutcome {
        info!(user = %handle, "re-running synthesis against staged corpus");
        let reference = self.store.stage_ref(handle);
        self.synthesize_staged(handle, &reference).await
    }

    async fn synthesize_staged(
        &self,
        handle: &AccountHandle,
        reference: &StoredCorpusRef,
    ) -> PipelineOutcome {
        let corpus_text = match self.store.load(reference) {
            Ok(text) => text,
            Err(e) => {
                error!(user = %handle, error = %e, "synthesis stage failed to load corpus");
                return PipelineOutcome::Failed(StageError::Synthesis(e.into()));
            }
        };

        // A staged-but-empty corpus is a no-content account, not a prompt
        // worth sending to the model.
        if corpus_text.trim().is_empty() {
            info!(user = %handle, "staged corpus is empty");
            return PipelineOutcome::NoContent;
        }

        info!(user = %handle, corpus_chars = corpus_text.len(), "synthesizing persona");
        let document = match self.synthesizer.synthesize(&corpus_text).await {
            Ok(document) => document,
            Err(e) => {
                error!(user = %handle, error = %e, "synthesis stage failed");
                return PipelineOutcome::Failed(StageError::Synthesis(e));
            }
        };

        let persona_path = match self.store.write_persona(handle, document.as_str()) {
            Ok(path) => path,
            Err(e) => {
                error!(user = %handle, error = %e, "failed to write persona document");
                return PipelineOutcome::Failed(StageError::Synthesis(e.into()));
            }
        };

        info!(user = %handle, path = %persona_path.display(), "pipeline done");
        PipelineOutcome::Done { persona_path }
    }
}
