//! Reddit client over the public JSON listing endpoints.
//!
//! Reads `/user/<name>/submitted.json` and `/user/<name>/comments.json`
//! sorted by new. No OAuth: the public listings only need a descriptive
//! User-Agent, which Reddit requires to avoid throttling generic clients.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use super::{PlatformClient, PlatformError, RawComment, RawSubmission};
use crate::handle::AccountHandle;

const REDDIT_BASE_URL: &str = "https://www.reddit.com";
const REQUEST_TIMEOUT_SECS: u64 = 30;

pub struct RedditClient {
    client: Client,
    base_url: String,
}

impl RedditClient {
    pub fn new(user_agent: &str) -> Result<Self, PlatformError> {
        Self::with_base_url(user_agent, REDDIT_BASE_URL)
    }

    pub fn with_base_url(user_agent: &str, base_url: &str) -> Result<Self, PlatformError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(PlatformError::from)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn listing(
        &self,
        handle: &AccountHandle,
        kind: &str,
        limit: usize,
    ) -> Result<Vec<ListingItem>, PlatformError> {
        let url = format!(
            "{}/user/{}/{}.json?sort=new&limit={}",
            self.base_url,
            handle.as_str(),
            kind,
            limit
        );

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(PlatformError::new(format!(
                "reddit returned {} for {}",
                response.status(),
                url
            )));
        }

        let listing: Listing = response
            .json()
            .await
            .map_err(|e| PlatformError::new(format!("malformed listing response: {e}")))?;

        Ok(listing
            .data
            .children
            .into_iter()
            .map(|child| child.data)
            .collect())
    }
}

#[async_trait::async_trait]
impl PlatformClient for RedditClient {
    async fn newest_submissions(
        &self,
        handle: &AccountHandle,
        limit: usize,
    ) -> Result<Vec<RawSubmission>, PlatformError> {
        let items = self.listing(handle, "submitted", limit).await?;
        Ok(items
            .into_iter()
            .map(|item| RawSubmission {
                title: item.title,
                body: item.selftext,
            })
            .collect())
    }

    async fn newest_comments(
        &self,
        handle: &AccountHandle,
        limit: usize,
    ) -> Result<Vec<RawComment>, PlatformError> {
        let items = self.listing(handle, "comments", limit).await?;
        Ok(items.into_iter().map(|item| RawComment { body: item.body }).collect())
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Deserialize)]
struct ListingData {
    children: Vec<ListingChild>,
}

#[derive(Deserialize)]
struct ListingChild {
    data: ListingItem,
}

/// One listing entry. Submissions populate `title`/`selftext`, comments
/// populate `body`; the unused fields default to empty.
#[derive(Deserialize)]
struct ListingItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    selftext: String,
    #[serde(default)]
    body: String,
}
