// src/main.rs

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use personagen::config::{CliConfig, Config, DEFAULT_COMMENT_LIMIT, DEFAULT_POST_LIMIT, FileConfig};
use personagen::fetcher::ContentFetcher;
use personagen::handle::AccountHandle;
use personagen::llm::GeminiClient;
use personagen::pipeline::{Pipeline, PipelineOutcome};
use personagen::platform::RedditClient;
use personagen::store::CorpusStore;
use personagen::synthesizer::PersonaSynthesizer;

#[derive(Parser)]
#[command(name = "personagen")]
#[command(about = "Generate a persona profile from a Reddit user's public activity")]
struct Args {
    /// Reddit profile URL (https://www.reddit.com/user/<name>/)
    url: String,

    /// How many of the newest posts to collect
    #[arg(long, default_value_t = DEFAULT_POST_LIMIT)]
    posts: usize,

    /// How many of the newest comments to collect
    #[arg(long, default_value_t = DEFAULT_COMMENT_LIMIT)]
    comments: usize,

    /// Directory for the staged corpus and persona files
    #[arg(long, env = "PERSONAGEN_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY")]
    gemini_api_key: Option<String>,

    /// Gemini model name
    #[arg(long, env = "GEMINI_MODEL")]
    gemini_model: Option<String>,

    /// User-Agent sent to Reddit
    #[arg(long, env = "REDDIT_USER_AGENT")]
    user_agent: Option<String>,

    /// Pacing delay after each collected post, in milliseconds
    #[arg(long, env = "PERSONAGEN_POST_DELAY_MS")]
    post_delay_ms: Option<u64>,

    /// Pacing delay after each collected comment, in milliseconds
    #[arg(long, env = "PERSONAGEN_COMMENT_DELAY_MS")]
    comment_delay_ms: Option<u64>,

    /// Skip fetching and re-run synthesis against the staged corpus
    #[arg(long)]
    synthesize_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env from ~/.personagen/.env, falling back to the current dir
    let env_path = dirs::home_dir()
        .map(|h| h.join(".personagen").join(".env"))
        .filter(|p| p.exists());
    if let Some(path) = env_path {
        let _ = dotenvy::from_path(&path);
    } else {
        let _ = dotenvy::dotenv();
    }

    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let file_config = FileConfig::load();

    // Input validation happens before any collaborator is constructed.
    let handle = match AccountHandle::from_profile_url(&args.url) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };

    let config = Config::resolve(
        CliConfig {
            gemini_api_key: args.gemini_api_key,
            gemini_model: args.gemini_model,
            reddit_user_agent: args.user_agent,
            output_dir: args.output_dir,
            post_limit: args.posts,
            comment_limit: args.comments,
            post_delay_ms: args.post_delay_ms,
            comment_delay_ms: args.comment_delay_ms,
        },
        file_config,
    )?;

    let platform = Arc::new(RedditClient::new(&config.reddit_user_agent)?);
    let generator = Arc::new(GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
    ));

    let pipeline = Pipeline::new(
        ContentFetcher::new(platform, config.pacing.clone()),
        CorpusStore::new(config.output_dir.clone()),
        PersonaSynthesizer::new(generator),
        config.post_limit,
        config.comment_limit,
    );

    info!(user = %handle, model = %config.gemini_model, "starting persona pipeline");

    let outcome = if args.synthesize_only {
        pipeline.run_synthesis_only(&handle).await
    } else {
        pipeline.run(&handle).await
    };

    match outcome {
        PipelineOutcome::Done { persona_path } => {
            println!("Persona written to {}", persona_path.display());
            Ok(())
        }
        PipelineOutcome::NoContent => {
            println!("No public activity found for u/{handle}");
            Ok(())
        }
        PipelineOutcome::Failed(error) => {
            eprintln!("Error in {} stage: {error}", error.stage());
            std::process::exit(1);
        }
    }
}
