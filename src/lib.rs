//! # artigo-tts
//!
//! This library turns long-form legal text into per-article audio:
//! 1. Segmentation of the document into numbered articles ("Art. 1", "Art. 2", ...).
//! 2. Speech generation for each article through the OpenAI API, with a
//!    configurable concurrency bound and per-request timeout.
//! 3. Deterministic artifact naming, so articles whose audio already exists
//!    are detected and skipped — reruns resume where the last run stopped.
//! 4. One immutable outcome record per article plus aggregated run counts,
//!    ready for any presentation layer to render.
//!
//! Document ingestion (PDF extraction and the like) and the user interface
//! are up to the caller; the library consumes a plain text blob.

pub mod artifact;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod segment;
pub mod tts;

use std::path::Path;
use std::sync::Arc;

use crate::artifact::ArtifactStore;
use crate::error::Result;
use crate::tts::{OpenAiTts, SpeechSynthesizer};

pub use crate::artifact::document_audio_dir;
pub use crate::config::{AudioFormat, PipelineConfig, TtsModel, TtsVoice};
pub use crate::error::ArtigoTtsError;
pub use crate::report::{ArticleOutcome, OutcomeStatus, RunReport, RunSummary};
pub use crate::segment::{segment_articles, Article};

/// End-to-end pipeline from document text to audio artifacts.
pub struct ArticleAudioPipeline {
    config: PipelineConfig,
}

impl ArticleAudioPipeline {
    /// Create a pipeline with the given configuration.
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Segment `text` and generate audio for the leading articles.
    ///
    /// An empty or blank document produces an empty report. A failure to
    /// set up the output directory is the only fatal error; everything
    /// that happens to an individual article is recorded in its outcome.
    pub async fn process(&self, text: &str) -> Result<RunReport> {
        log::info!("starting article audio generation");

        let articles = segment::segment_articles(text);
        if articles.is_empty() {
            log::warn!("no text to process, returning empty report");
            return Ok(RunReport::new(Vec::new()));
        }
        log::info!("segmented document into {} articles", articles.len());

        let store = ArtifactStore::new(self.config.output_dir.clone());
        let synthesizer: Arc<dyn SpeechSynthesizer> =
            Arc::new(OpenAiTts::new(&self.config)?);

        let outcomes =
            pipeline::generate_article_audio(&articles, synthesizer, &store, &self.config)
                .await?;

        let report = RunReport::new(outcomes);
        log::info!(
            "run finished: {} total, {} generated, {} existing, {} skipped, {} failed",
            report.summary.total,
            report.summary.generated,
            report.summary.existing,
            report.summary.skipped,
            report.summary.failed
        );
        Ok(report)
    }

    /// Run the pipeline with an explicit synthesizer, for callers that
    /// bring their own provider.
    pub async fn process_with(
        &self,
        text: &str,
        synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> Result<RunReport> {
        let articles = segment::segment_articles(text);
        if articles.is_empty() {
            return Ok(RunReport::new(Vec::new()));
        }
        let store = ArtifactStore::new(self.config.output_dir.clone());
        let outcomes =
            pipeline::generate_article_audio(&articles, synthesizer, &store, &self.config)
                .await?;
        Ok(RunReport::new(outcomes))
    }
}

/// Convenience entry point: process `text` with the default voice, format
/// and model, writing artifacts under `<output_base>/<document_name>_audio`.
pub async fn generate_document_audio(
    text: &str,
    api_key: &str,
    output_base: &Path,
    document_name: &str,
    article_limit: usize,
) -> Result<RunReport> {
    let config = PipelineConfig {
        openai_api_key: api_key.to_string(),
        article_limit,
        output_dir: document_audio_dir(output_base, document_name),
        ..PipelineConfig::default()
    };

    ArticleAudioPipeline::new(config).process(text).await
}
