// src/handle.rs
// Account handle extraction and validation.

use thiserror::Error;
use url::Url;

/// Input validation errors, raised before any collaborator is contacted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HandleError {
    #[error("not a valid URL: {0}")]
    MalformedUrl(String),
    #[error("profile URL must contain a /user/ segment")]
    MissingUserSegment,
    #[error("profile URL has no username after /user/")]
    EmptyHandle,
    #[error("handle must not contain path separators")]
    PathSeparator,
}

/// A validated account handle: non-empty, no path separators.
///
/// The only way to obtain one is through validation, so downstream code
/// (file naming in particular) can rely on the invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountHandle(String);

impl AccountHandle {
    /// Extract the handle from a profile URL.
    ///
    /// Requires a `/user/` path segment and takes the next component.
    /// `https://www.reddit.com/user/alice/` -> `alice`.
    pub fn from_profile_url(raw: &str) -> Result<Self, HandleError> {
        let url = Url::parse(raw.trim()).map_err(|e| HandleError::MalformedUrl(e.to_string()))?;

        let mut segments = url
            .path_segments()
            .ok_or(HandleError::MissingUserSegment)?;

        if !segments.any(|segment| segment == "user") {
            return Err(HandleError::MissingUserSegment);
        }

        match segments.next() {
            Some(name) if !name.is_empty() => Self::new(name),
            _ => Err(HandleError::EmptyHandle),
        }
    }

    /// Validate a bare handle string.
    pub fn new(name: impl Into<String>) -> Result<Self, HandleError> {
        let name = name.into();
        if name.is_empty() {
            return Err(HandleError::EmptyHandle);
        }
        if name.contains('/') || name.contains('\\') {
            return Err(HandleError::PathSeparator);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
