//! Integration tests for the batch pipeline, driven by a mock synthesizer
//! so no network traffic is involved.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use artigo_tts::artifact::ArtifactStore;
use artigo_tts::config::PipelineConfig;
use artigo_tts::error::{ArtigoTtsError, Result};
use artigo_tts::pipeline::generate_article_audio;
use artigo_tts::report::{OutcomeStatus, RunSummary};
use artigo_tts::segment::segment_articles;
use artigo_tts::tts::SpeechSynthesizer;
use artigo_tts::ArticleAudioPipeline;

/// Test double for the speech provider. Fails on texts containing "falha",
/// panics on texts containing "panico", and can stagger completions so
/// later articles finish first.
#[derive(Default)]
struct MockSynthesizer {
    calls: AtomicUsize,
    reverse_completion: bool,
}

impl MockSynthesizer {
    fn reversed() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            reverse_completion: true,
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let seq = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.reverse_completion {
            // earlier submissions sleep longer, so completion order is the
            // reverse of submission order
            let delay = 80u64.saturating_sub(20 * seq as u64);
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        if text.contains("falha") {
            return Err(ArtigoTtsError::Synthesis(
                "provider rejected the input".to_string(),
            ));
        }
        if text.contains("panico") {
            panic!("mock synthesizer exploded");
        }
        Ok(format!("audio:{}", text).into_bytes())
    }
}

fn test_config(output_dir: std::path::PathBuf) -> PipelineConfig {
    PipelineConfig {
        openai_api_key: "sk-test".to_string(),
        article_limit: 10,
        max_concurrent_requests: 3,
        output_dir,
        ..PipelineConfig::default()
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const FOUR_ARTICLES: &str =
    "Art. 1. Primeira regra.\nArt. 2. Segunda regra.\nArt. 3. Terceira regra.\nArt. 4. Quarta regra.";

#[tokio::test]
async fn second_run_reports_exists_and_makes_no_remote_calls() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path().join("audio"));
    let store = ArtifactStore::new(config.output_dir.clone());
    let articles = segment_articles(FOUR_ARTICLES);

    let first = Arc::new(MockSynthesizer::default());
    let outcomes = generate_article_audio(&articles, first.clone(), &store, &config)
        .await
        .unwrap();
    assert!(outcomes
        .iter()
        .all(|o| o.status == OutcomeStatus::Generated));
    assert_eq!(first.call_count(), articles.len());

    let second = Arc::new(MockSynthesizer::default());
    let outcomes = generate_article_audio(&articles, second.clone(), &store, &config)
        .await
        .unwrap();
    assert!(outcomes.iter().all(|o| o.status == OutcomeStatus::Exists));
    assert!(outcomes.iter().all(|o| o.success()));
    assert_eq!(second.call_count(), 0);
}

#[tokio::test]
async fn missing_credential_skips_articles_without_artifacts() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig {
        openai_api_key: String::new(),
        ..test_config(dir.path().join("audio"))
    };
    let store = ArtifactStore::new(config.output_dir.clone());
    store.ensure_root().unwrap();
    // artifact from an earlier run
    store.write("artigo_2.mp3", b"old audio").await.unwrap();

    let articles = segment_articles(FOUR_ARTICLES);
    let mock = Arc::new(MockSynthesizer::default());
    let outcomes = generate_article_audio(&articles, mock.clone(), &store, &config)
        .await
        .unwrap();

    assert_eq!(outcomes[1].status, OutcomeStatus::Exists);
    for (i, outcome) in outcomes.iter().enumerate() {
        if i != 1 {
            assert_eq!(outcome.status, OutcomeStatus::SkippedNoCredential);
            assert!(!outcome.success());
            assert!(outcome.error.is_some());
        }
    }
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn outcomes_keep_document_order_under_concurrency() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path().join("audio"));
    let store = ArtifactStore::new(config.output_dir.clone());
    let articles = segment_articles(FOUR_ARTICLES);

    let mock = Arc::new(MockSynthesizer::reversed());
    let outcomes = generate_article_audio(&articles, mock, &store, &config)
        .await
        .unwrap();

    assert_eq!(outcomes.len(), articles.len());
    for (article, outcome) in articles.iter().zip(&outcomes) {
        assert_eq!(article.number, outcome.article_number);
    }
}

#[tokio::test]
async fn limit_cuts_processing_after_the_first_articles() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig {
        article_limit: 2,
        ..test_config(dir.path().join("audio"))
    };
    let store = ArtifactStore::new(config.output_dir.clone());
    let articles = segment_articles(FOUR_ARTICLES);

    let mock = Arc::new(MockSynthesizer::default());
    let outcomes = generate_article_audio(&articles, mock.clone(), &store, &config)
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].article_number, "1");
    assert_eq!(outcomes[1].article_number, "2");
    assert_eq!(mock.call_count(), 2);
    assert!(!store.contains("artigo_3.mp3"));
}

#[tokio::test]
async fn one_failing_article_does_not_disturb_the_others() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path().join("audio"));
    let store = ArtifactStore::new(config.output_dir.clone());
    let articles =
        segment_articles("Art. 1. Boa.\nArt. 2. Aqui falha tudo.\nArt. 3. Boa tambem.");

    let mock = Arc::new(MockSynthesizer::default());
    let outcomes = generate_article_audio(&articles, mock, &store, &config)
        .await
        .unwrap();

    assert_eq!(outcomes[0].status, OutcomeStatus::Generated);
    assert_eq!(outcomes[1].status, OutcomeStatus::Failed);
    assert!(outcomes[1].error.as_deref().unwrap().contains("rejected"));
    assert_eq!(outcomes[2].status, OutcomeStatus::Generated);
    assert!(store.contains("artigo_1.mp3"));
    assert!(store.contains("artigo_3.mp3"));
}

#[tokio::test]
async fn panicking_task_is_reported_as_failed_for_that_article_only() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path().join("audio"));
    let store = ArtifactStore::new(config.output_dir.clone());
    let articles =
        segment_articles("Art. 1. Boa.\nArt. 2. Provoca panico aqui.\nArt. 3. Boa.");

    let mock = Arc::new(MockSynthesizer::default());
    let outcomes = generate_article_audio(&articles, mock, &store, &config)
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0].status, OutcomeStatus::Generated);
    assert_eq!(outcomes[1].status, OutcomeStatus::Failed);
    assert!(outcomes[1].error.is_some());
    assert_eq!(outcomes[2].status, OutcomeStatus::Generated);
}

#[tokio::test]
async fn unwritable_artifact_is_a_failure_even_though_synthesis_succeeded() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path().join("audio"));
    let store = ArtifactStore::new(config.output_dir.clone());
    store.ensure_root().unwrap();
    // a directory squatting on the artifact path makes the write fail
    std::fs::create_dir(store.path_for("artigo_1.mp3")).unwrap();

    let articles = segment_articles("Art. 1. Unica regra.");
    let mock = Arc::new(MockSynthesizer::default());
    let outcomes = generate_article_audio(&articles, mock, &store, &config)
        .await
        .unwrap();

    assert_eq!(outcomes[0].status, OutcomeStatus::Failed);
    assert!(!outcomes[0].success());
    assert!(outcomes[0]
        .error
        .as_deref()
        .unwrap()
        .contains("failed to save artifact"));
}

#[tokio::test]
async fn summary_invariants_hold_for_a_mixed_run() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path().join("audio"));
    let store = ArtifactStore::new(config.output_dir.clone());
    store.ensure_root().unwrap();
    store.write("artigo_1.mp3", b"old audio").await.unwrap();

    let articles = segment_articles(
        "Art. 1. Ja existe.\nArt. 2. Nova.\nArt. 3. Aqui falha tudo.\nArt. 4. Nova tambem.",
    );
    let mock = Arc::new(MockSynthesizer::default());
    let outcomes = generate_article_audio(&articles, mock, &store, &config)
        .await
        .unwrap();

    let summary = RunSummary::from_outcomes(&outcomes);
    assert_eq!(summary.total, 4);
    assert_eq!(summary.existing, 1);
    assert_eq!(summary.generated, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.success, summary.generated + summary.existing);
    assert_eq!(
        summary.total,
        summary.success + summary.skipped + summary.failed
    );
}

#[tokio::test]
async fn blank_document_produces_an_empty_report() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path().join("audio"));
    let report = ArticleAudioPipeline::new(config)
        .process("   \n ")
        .await
        .unwrap();
    assert!(report.outcomes.is_empty());
    assert_eq!(report.summary, RunSummary::default());
}

#[tokio::test]
async fn pipeline_process_with_runs_end_to_end() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path().join("audio"));
    let pipeline = ArticleAudioPipeline::new(config);

    let mock = Arc::new(MockSynthesizer::default());
    let report = pipeline
        .process_with(FOUR_ARTICLES, mock)
        .await
        .unwrap();

    assert_eq!(report.summary.total, 4);
    assert_eq!(report.summary.generated, 4);
    assert_eq!(report.summary.success, 4);
    assert_eq!(report.outcomes[0].artifact_file.as_deref(), Some("artigo_1.mp3"));
}
