// tests/pipeline_test.rs
// End-to-end pipeline runs against in-memory fake collaborators.

use std::fs;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use tempfile::TempDir;

use personagen::fetcher::{ContentFetcher, Pacing};
use personagen::handle::AccountHandle;
use personagen::llm::{GeneratorError, TextGenerator};
use personagen::pipeline::{Pipeline, PipelineOutcome, Stage, StageError};
use personagen::platform::{PlatformClient, PlatformError, RawComment, RawSubmission};
use personagen::store::CorpusStore;
use personagen::synthesizer::PersonaSynthesizer;

// ============================================================================
// Fake collaborators
// ============================================================================

#[derive(Default)]
struct FakePlatform {
    submissions: Vec<RawSubmission>,
    comments: Vec<RawComment>,
    fail_submissions: bool,
    fail_comments: bool,
}

#[async_trait::async_trait]
impl PlatformClient for FakePlatform {
    async fn newest_submissions(
        &self,
        _handle: &AccountHandle,
        limit: usize,
    ) -> Result<Vec<RawSubmission>, PlatformError> {
        if self.fail_submissions {
            return Err(PlatformError::new("platform unavailable"));
        }
        Ok(self.submissions.iter().take(limit).cloned().collect())
    }

    async fn newest_comments(
        &self,
        _handle: &AccountHandle,
        limit: usize,
    ) -> Result<Vec<RawComment>, PlatformError> {
        if self.fail_comments {
            return Err(PlatformError::new("platform unavailable"));
        }
        Ok(self.comments.iter().take(limit).cloned().collect())
    }
}

struct FakeGenerator {
    response: Result<String, String>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    fn ok(response: &str) -> Self {
        Self {
            response: Ok(response.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(vec![]),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(vec![]),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GeneratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.response.clone().map_err(GeneratorError::new)
    }
}

// ============================================================================
// Harness
// ============================================================================

struct Harness {
    pipeline: Pipeline,
    generator: Arc<FakeGenerator>,
    output_dir: std::path::PathBuf,
    _tmp: TempDir,
}

fn harness(platform: FakePlatform, generator: FakeGenerator) -> Harness {
    let tmp = TempDir::new().unwrap();
    let output_dir = tmp.path().join("outputs");
    let generator = Arc::new(generator);

    let pipeline = Pipeline::new(
        ContentFetcher::new(Arc::new(platform), Pacing::none()),
        CorpusStore::new(&output_dir),
        PersonaSynthesizer::new(generator.clone()),
        10,
        20,
    );

    Harness {
        pipeline,
        generator,
        output_dir,
        _tmp: tmp,
    }
}

fn alice_platform() -> FakePlatform {
    FakePlatform {
        submissions: vec![RawSubmission {
            title: "Hi".into(),
            body: "first post".into(),
        }],
        comments: vec![RawComment {
            body: "nice!".into(),
        }],
        ..Default::default()
    }
}

fn handle(name: &str) -> AccountHandle {
    AccountHandle::new(name).unwrap()
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn test_full_run_stages_exact_corpus_and_writes_persona() {
    let h = harness(alice_platform(), FakeGenerator::ok("a vivid persona"));

    let outcome = h.pipeline.run(&handle("alice")).await;

    let persona_path = match outcome {
        PipelineOutcome::Done { persona_path } => persona_path,
        other => panic!("expected Done, got {other:?}"),
    };

    let staged = fs::read_to_string(h.output_dir.join("alice_raw.txt")).unwrap();
    assert_eq!(
        staged,
        "--- POSTS ---\n\nTitle: Hi\nBody: first post\n\n\n--- COMMENTS ---\n\nComment: nice!\n"
    );

    assert_eq!(persona_path, h.output_dir.join("alice_persona.txt"));
    assert_eq!(fs::read_to_string(&persona_path).unwrap(), "a vivid persona");
    assert_eq!(h.generator.call_count(), 1);
}

#[tokio::test]
async fn test_prompt_carries_staged_corpus_verbatim() {
    let h = harness(alice_platform(), FakeGenerator::ok("persona"));

    h.pipeline.run(&handle("alice")).await;

    let prompts = h.generator.prompts.lock().unwrap();
    assert!(prompts[0].contains("Title: Hi\nBody: first post\n"));
    assert!(prompts[0].contains("Comment: nice!\n"));
}

#[tokio::test]
async fn test_empty_account_is_no_content_and_writes_nothing() {
    let h = harness(FakePlatform::default(), FakeGenerator::ok("unused"));

    let outcome = h.pipeline.run(&handle("bob")).await;

    assert!(matches!(outcome, PipelineOutcome::NoContent));
    assert!(!h.output_dir.join("bob_raw.txt").exists());
    assert!(!h.output_dir.exists());
    assert_eq!(h.generator.call_count(), 0);
}

#[tokio::test]
async fn test_only_link_posts_and_no_comments_is_no_content() {
    let platform = FakePlatform {
        submissions: vec![RawSubmission {
            title: "Link only".into(),
            body: "".into(),
        }],
        ..Default::default()
    };
    let h = harness(platform, FakeGenerator::ok("unused"));

    let outcome = h.pipeline.run(&handle("bob")).await;
    assert!(matches!(outcome, PipelineOutcome::NoContent));
    assert!(!h.output_dir.join("bob_raw.txt").exists());
}

#[tokio::test]
async fn test_fetch_failure_discards_partial_results() {
    let platform = FakePlatform {
        submissions: vec![RawSubmission {
            title: "Hi".into(),
            body: "first post".into(),
        }],
        fail_comments: true,
        ..Default::default()
    };
    let h = harness(platform, FakeGenerator::ok("unused"));

    let outcome = h.pipeline.run(&handle("alice")).await;

    match outcome {
        PipelineOutcome::Failed(error) => assert_eq!(error.stage(), Stage::Fetching),
        other => panic!("expected fetch failure, got {other:?}"),
    }
    assert!(!h.output_dir.join("alice_raw.txt").exists());
    assert_eq!(h.generator.call_count(), 0);
}

#[tokio::test]
async fn test_staging_failure_skips_synthesis() {
    let tmp = TempDir::new().unwrap();
    // The output dir path is occupied by a regular file, so save must fail.
    let blocked = tmp.path().join("outputs");
    fs::write(&blocked, "in the way").unwrap();

    let generator = Arc::new(FakeGenerator::ok("unused"));
    let pipeline = Pipeline::new(
        ContentFetcher::new(Arc::new(alice_platform()), Pacing::none()),
        CorpusStore::new(&blocked),
        PersonaSynthesizer::new(generator.clone()),
        10,
        20,
    );

    let outcome = pipeline.run(&handle("alice")).await;

    match outcome {
        PipelineOutcome::Failed(error) => assert_eq!(error.stage(), Stage::Staging),
        other => panic!("expected staging failure, got {other:?}"),
    }
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn test_synthesis_failure_leaves_staged_corpus_intact() {
    let h = harness(alice_platform(), FakeGenerator::failing("quota exceeded"));

    let outcome = h.pipeline.run(&handle("alice")).await;

    match outcome {
        PipelineOutcome::Failed(error) => {
            assert_eq!(error.stage(), Stage::Synthesizing);
            assert!(matches!(error, StageError::Synthesis(_)));
        }
        other => panic!("expected synthesis failure, got {other:?}"),
    }

    // Staged file survives for a synthesis-only retry.
    assert!(h.output_dir.join("alice_raw.txt").exists());
    assert!(!h.output_dir.join("alice_persona.txt").exists());
}

#[tokio::test]
async fn test_synthesis_only_fails_without_staged_file() {
    let h = harness(FakePlatform::default(), FakeGenerator::ok("unused"));

    let outcome = h.pipeline.run_synthesis_only(&handle("ghost")).await;

    match outcome {
        PipelineOutcome::Failed(error) => assert_eq!(error.stage(), Stage::Synthesizing),
        other => panic!("expected synthesis failure, got {other:?}"),
    }
    assert_eq!(h.generator.call_count(), 0);
}

#[tokio::test]
async fn test_synthesis_only_reuses_staged_file() {
    let h = harness(alice_platform(), FakeGenerator::ok("persona v1"));
    h.pipeline.run(&handle("alice")).await;

    // Second run without fetching: same staged file, new persona call.
    let outcome = h.pipeline.run_synthesis_only(&handle("alice")).await;
    assert!(matches!(outcome, PipelineOutcome::Done { .. }));
    assert_eq!(h.generator.call_count(), 2);
}

#[tokio::test]
async fn test_synthesis_only_on_empty_staged_file_is_no_content() {
    let h = harness(FakePlatform::default(), FakeGenerator::ok("unused"));

    fs::create_dir_all(&h.output_dir).unwrap();
    fs::write(h.output_dir.join("alice_raw.txt"), "").unwrap();

    let outcome = h.pipeline.run_synthesis_only(&handle("alice")).await;

    assert!(matches!(outcome, PipelineOutcome::NoContent));
    assert_eq!(h.generator.call_count(), 0);
}
