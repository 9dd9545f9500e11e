//! Batch orchestration of per-article audio generation.
//!
//! One task per article, bounded by a semaphore sized to the configured
//! concurrency. An artifact already present in the store is reported as
//! `Exists` without calling the remote service, which is what makes a rerun
//! over a partially completed document cheap: only the missing articles are
//! generated.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;

use crate::artifact::{resolve_artifact_names, ArtifactStore};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::report::ArticleOutcome;
use crate::segment::Article;
use crate::tts::SpeechSynthesizer;

/// Generate audio for the first `config.article_limit` articles.
///
/// Returns one outcome per processed article, index-aligned with the input:
/// `outcomes[i]` always describes `articles[i]`, whatever order the tasks
/// completed in. Articles beyond the limit are not represented at all.
///
/// The only fatal error is a failed store setup, raised before any task is
/// spawned. Everything that goes wrong inside a task is absorbed into that
/// article's outcome.
pub async fn generate_article_audio(
    articles: &[Article],
    synthesizer: Arc<dyn SpeechSynthesizer>,
    store: &ArtifactStore,
    config: &PipelineConfig,
) -> Result<Vec<ArticleOutcome>> {
    store.ensure_root()?;

    let selected = &articles[..articles.len().min(config.article_limit)];
    if selected.is_empty() {
        return Ok(Vec::new());
    }

    let artifact_names = resolve_artifact_names(selected, config.audio_format);
    let has_credential = config.has_credential();

    log::info!(
        "processing {} of {} articles (concurrency {})",
        selected.len(),
        articles.len(),
        config.max_concurrent_requests
    );

    let semaphore = Arc::new(Semaphore::new(config.max_concurrent_requests.max(1)));

    let mut tasks = Vec::with_capacity(selected.len());
    for (article, artifact_name) in selected.iter().zip(artifact_names) {
        let article = article.clone();
        let synthesizer = synthesizer.clone();
        let store = store.clone();
        let semaphore = semaphore.clone();

        tasks.push(tokio::spawn(async move {
            let _permit = semaphore.acquire().await.unwrap();
            process_article(&article, &artifact_name, synthesizer.as_ref(), &store, has_credential)
                .await
        }));
    }

    // join_all yields results in submission order, so outcome i belongs to
    // article i. A panicked task becomes a Failed outcome for its article
    // and leaves the others untouched.
    let mut outcomes = Vec::with_capacity(selected.len());
    for (i, joined) in join_all(tasks).await.into_iter().enumerate() {
        match joined {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => {
                log::error!("task for article {} failed: {}", selected[i].number, e);
                outcomes.push(ArticleOutcome::failed(
                    &selected[i].number,
                    format!("unexpected task failure: {}", e),
                ));
            }
        }
    }

    Ok(outcomes)
}

/// Decide and execute what to do for one article.
async fn process_article(
    article: &Article,
    artifact_name: &str,
    synthesizer: &dyn SpeechSynthesizer,
    store: &ArtifactStore,
    has_credential: bool,
) -> ArticleOutcome {
    if store.contains(artifact_name) {
        log::info!("article {}: artifact {} already exists", article.number, artifact_name);
        return ArticleOutcome::exists(&article.number, artifact_name);
    }

    if !has_credential {
        return ArticleOutcome::skipped_no_credential(&article.number);
    }

    match synthesizer.synthesize(&article.text).await {
        Ok(bytes) => match store.write(artifact_name, &bytes).await {
            Ok(path) => {
                log::info!("article {}: saved {}", article.number, path.display());
                ArticleOutcome::generated(&article.number, artifact_name)
            }
            // generated but unsaved is a failure, never a partial success
            Err(e) => {
                log::error!("article {}: {}", article.number, e);
                ArticleOutcome::failed(&article.number, e.to_string())
            }
        },
        Err(e) => {
            log::error!("article {}: synthesis failed: {}", article.number, e);
            ArticleOutcome::failed(&article.number, e.to_string())
        }
    }
}
