// src/config.rs
// Explicit, injectable configuration. Nothing here is ambient global
// state: main resolves one Config and hands the pieces to the fetcher,
// store, and synthesizer at construction time.
//
// Resolution order: CLI args > env vars (clap env fallbacks) >
// ~/.personagen/config.toml > defaults.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::fetcher::Pacing;
use crate::llm::gemini::DEFAULT_GEMINI_MODEL;

pub const DEFAULT_OUTPUT_DIR: &str = "outputs";
pub const DEFAULT_POST_LIMIT: usize = 10;
pub const DEFAULT_COMMENT_LIMIT: usize = 20;
pub const DEFAULT_USER_AGENT: &str = "personagen/0.1 (persona research tool)";

/// Fully resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub reddit_user_agent: String,
    pub output_dir: PathBuf,
    pub post_limit: usize,
    pub comment_limit: usize,
    pub pacing: Pacing,
}

/// Values supplied on the command line, including clap's env-var fallbacks.
#[derive(Debug)]
pub struct CliConfig {
    pub gemini_api_key: Option<String>,
    pub gemini_model: Option<String>,
    pub reddit_user_agent: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub post_limit: usize,
    pub comment_limit: usize,
    pub post_delay_ms: Option<u64>,
    pub comment_delay_ms: Option<u64>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: None,
            reddit_user_agent: None,
            output_dir: None,
            post_limit: DEFAULT_POST_LIMIT,
            comment_limit: DEFAULT_COMMENT_LIMIT,
            post_delay_ms: None,
            comment_delay_ms: None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "GEMINI_API_KEY required (set via --gemini-api-key, the env var, or ~/.personagen/config.toml)"
    )]
    MissingGeminiApiKey,
}

impl Config {
    /// Resolve the runtime configuration: CLI args win over the config
    /// file, which wins over defaults. Env vars arrive through clap's env
    /// fallbacks, so they land on the CLI side of the chain.
    pub fn resolve(cli: CliConfig, file: FileConfig) -> Result<Self, ConfigError> {
        let default_pacing = Pacing::default();
        Ok(Self {
            gemini_api_key: cli
                .gemini_api_key
                .or(file.gemini_api_key)
                .ok_or(ConfigError::MissingGeminiApiKey)?,
            gemini_model: cli
                .gemini_model
                .or(file.gemini_model)
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            reddit_user_agent: cli
                .reddit_user_agent
                .or(file.reddit_user_agent)
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            output_dir: cli
                .output_dir
                .or(file.output_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            post_limit: cli.post_limit,
            comment_limit: cli.comment_limit,
            pacing: Pacing {
                per_post: cli
                    .post_delay_ms
                    .map(Duration::from_millis)
                    .unwrap_or(default_pacing.per_post),
                per_comment: cli
                    .comment_delay_ms
                    .map(Duration::from_millis)
                    .unwrap_or(default_pacing.per_comment),
            },
        })
    }
}

/// Optional values from ~/.personagen/config.toml.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub gemini_api_key: Option<String>,
    pub gemini_model: Option<String>,
    pub reddit_user_agent: Option<String>,
    pub output_dir: Option<PathBuf>,
}

impl FileConfig {
    /// Load the config file if present; a missing or unparsable file
    /// degrades to defaults with a warning rather than aborting.
    pub fn load() -> Self {
        Self::load_from(config_path())
    }

    fn load_from(path: PathBuf) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Path of the user config file.
pub fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(".personagen")
        .join("config.toml")
}
