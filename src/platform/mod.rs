//! Social platform collaborator boundary.
//!
//! The pipeline only ever asks for the newest N items of one kind for one
//! user; authentication, pagination, and rate-limit bookkeeping live behind
//! this trait. `reddit` provides the production client; tests substitute
//! in-memory fakes.

pub mod reddit;

use async_trait::async_trait;

use crate::handle::AccountHandle;

pub use reddit::RedditClient;

/// A submission as returned by the platform: title plus self-text body.
/// Link-only submissions arrive with an empty body.
#[derive(Debug, Clone)]
pub struct RawSubmission {
    pub title: String,
    pub body: String,
}

/// A comment as returned by the platform.
#[derive(Debug, Clone)]
pub struct RawComment {
    pub body: String,
}

/// Single generic failure type for the platform boundary. Network, auth,
/// rate-limit, and unknown-user errors all collapse into this.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct PlatformError {
    message: String,
}

impl PlatformError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for PlatformError {
    fn from(e: reqwest::Error) -> Self {
        Self::new(format!("request failed: {e}"))
    }
}

#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Newest submissions for `handle`, newest first, at most `limit`.
    async fn newest_submissions(
        &self,
        handle: &AccountHandle,
        limit: usize,
    ) -> Result<Vec<RawSubmission>, PlatformError>;

    /// Newest comments for `handle`, newest first, at most `limit`.
    async fn newest_comments(
        &self,
        handle: &AccountHandle,
        limit: usize,
    ) -> Result<Vec<RawComment>, PlatformError>;
}
