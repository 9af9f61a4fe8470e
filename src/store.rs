// src/store.rs
// Durable staging of the raw corpus and the final persona document.
//
// One flat text file per handle for each artifact:
//   <output_dir>/<handle>_raw.txt      staged corpus
//   <output_dir>/<handle>_persona.txt  synthesized persona
// File presence is the only state tracking; each run overwrites in place.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::corpus::{ContentItem, Corpus};
use crate::handle::AccountHandle;

const RAW_SUFFIX: &str = "_raw.txt";
const PERSONA_SUFFIX: &str = "_persona.txt";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("staged corpus not found at {}", .0.display())]
    NotFound(PathBuf),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reference to a staged corpus file, as returned by `save`.
#[derive(Debug, Clone)]
pub struct StoredCorpusRef {
    path: PathBuf,
}

impl StoredCorpusRef {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Result of staging a corpus. Both-empty input still writes the (empty)
/// file but is reported distinctly so the orchestrator never treats it as
/// a success.
#[derive(Debug)]
pub enum SaveOutcome {
    Staged(StoredCorpusRef),
    NoContent(StoredCorpusRef),
}

pub struct CorpusStore {
    output_dir: PathBuf,
}

impl CorpusStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn raw_path(&self, handle: &AccountHandle) -> PathBuf {
        self.output_dir.join(format!("{handle}{RAW_SUFFIX}"))
    }

    pub fn persona_path(&self, handle: &AccountHandle) -> PathBuf {
        self.output_dir.join(format!("{handle}{PERSONA_SUFFIX}"))
    }

    /// Reference to the staged file for `handle`, whether or not it exists.
    /// Used to re-run synthesis without fetching.
    pub fn stage_ref(&self, handle: &AccountHandle) -> StoredCorpusRef {
        StoredCorpusRef {
            path: self.raw_path(handle),
        }
    }

    /// Write the staged corpus for `handle`, overwriting any prior file.
    /// Creates the output directory if absent.
    pub fn save(
        &self,
        handle: &AccountHandle,
        corpus: &Corpus,
    ) -> Result<SaveOutcome, StoreError> {
        fs::create_dir_all(&self.output_dir)?;

        let path = self.raw_path(handle);
        fs::write(&path, render_corpus(corpus))?;
        info!(path = %path.display(), "corpus staged");

        let reference = StoredCorpusRef { path };
        if corpus.is_empty() {
            Ok(SaveOutcome::NoContent(reference))
        } else {
            Ok(SaveOutcome::Staged(reference))
        }
    }

    /// Read a staged corpus back as a single string.
    pub fn load(&self, reference: &StoredCorpusRef) -> Result<String, StoreError> {
        if !reference.path.exists() {
            return Err(StoreError::NotFound(reference.path.clone()));
        }
        Ok(fs::read_to_string(&reference.path)?)
    }

    /// Write the final persona document for `handle`.
    pub fn write_persona(
        &self,
        handle: &AccountHandle,
        document: &str,
    ) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.persona_path(handle);
        fs::write(&path, document)?;
        info!(path = %path.display(), "persona written");
        Ok(path)
    }
}

/// Serialization contract for the staged corpus: a `--- POSTS ---` block
/// iff any posts, then a `--- COMMENTS ---` block iff any comments, items
/// separated by a single blank line.
fn render_corpus(corpus: &Corpus) -> String {
    let posts: Vec<String> = corpus
        .posts()
        .filter_map(|item| match item {
            ContentItem::Post { title, body } => Some(format!("Title: {title}\nBody: {body}\n")),
            ContentItem::Comment { .. } => None,
        })
        .collect();

    let comments: Vec<String> = corpus
        .comments()
        .filter_map(|item| match item {
            ContentItem::Comment { body } => Some(format!("Comment: {body}\n")),
            ContentItem::Post { .. } => None,
        })
        .collect();

    let mut out = String::new();
    if !posts.is_empty() {
        out.push_str("--- POSTS ---\n\n");
        out.push_str(&posts.join("\n"));
    }
    if !comments.is_empty() {
        if !posts.is_empty() {
            out.push_str("\n\n");
        }
        out.push_str("--- COMMENTS ---\n\n");
        out.push_str(&comments.join("\n"));
    }
    out
}
