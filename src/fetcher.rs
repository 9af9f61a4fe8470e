// src/fetcher.rs
// Bounded, paced collection of a user's newest posts and comments.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::corpus::{ContentItem, Corpus};
use crate::handle::AccountHandle;
use crate::platform::{PlatformClient, PlatformError};

/// Delay applied after each retrieved item, to stay inside the platform's
/// rate-limit policy. Configurable so tests can run with zero waits.
#[derive(Debug, Clone)]
pub struct Pacing {
    pub per_post: Duration,
    pub per_comment: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            per_post: Duration::from_secs(2),
            per_comment: Duration::from_secs(1),
        }
    }
}

impl Pacing {
    pub fn none() -> Self {
        Self {
            per_post: Duration::ZERO,
            per_comment: Duration::ZERO,
        }
    }
}

#[derive(Debug, Error)]
#[error("content fetch failed: {0}")]
pub struct FetchError(#[from] pub PlatformError);

pub struct ContentFetcher {
    client: Arc<dyn PlatformClient>,
    pacing: Pacing,
}

impl ContentFetcher {
    pub fn new(client: Arc<dyn PlatformClient>, pacing: Pacing) -> Self {
        Self { client, pacing }
    }

    /// Collect the newest `post_limit` posts and `comment_limit` comments
    /// for `handle`, posts first.
    ///
    /// Posts with an empty body (link-only submissions) are dropped as a
    /// content-quality filter. All comments are kept. Any platform error
    /// aborts the whole fetch; partial results are discarded rather than
    /// staged as an unlabeled truncated corpus.
    pub async fn fetch(
        &self,
        handle: &AccountHandle,
        post_limit: usize,
        comment_limit: usize,
    ) -> Result<Corpus, FetchError> {
        let mut corpus = Corpus::new();

        let submissions = self.client.newest_submissions(handle, post_limit).await?;
        for submission in submissions {
            if submission.body.is_empty() {
                debug!(user = %handle, title = %submission.title, "skipping link-only submission");
            } else {
                corpus.push(ContentItem::Post {
                    title: submission.title,
                    body: submission.body,
                });
            }
            tokio::time::sleep(self.pacing.per_post).await;
        }

        let comments = self.client.newest_comments(handle, comment_limit).await?;
        for comment in comments {
            corpus.push(ContentItem::Comment { body: comment.body });
            tokio::time::sleep(self.pacing.per_comment).await;
        }

        debug!(
            user = %handle,
            posts = corpus.post_count(),
            comments = corpus.comment_count(),
            "fetch complete"
        );
        Ok(corpus)
    }
}
