//! Per-article outcomes and run statistics.

use serde::{Deserialize, Serialize};

/// What happened to one article during a run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// An artifact already existed at the article's name; nothing was
    /// generated and the remote service was not called.
    Exists,
    /// Audio was generated and saved.
    Generated,
    /// Generation or persistence failed.
    Failed,
    /// No credential was configured and no artifact existed, so the
    /// article was skipped without calling the remote service.
    SkippedNoCredential,
}

/// Result record for one article in one run.
///
/// Created by the orchestrator, one per processed article, and never
/// modified afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleOutcome {
    /// Label of the article this outcome belongs to
    pub article_number: String,
    /// What happened
    pub status: OutcomeStatus,
    /// Artifact file name when audio is available
    pub artifact_file: Option<String>,
    /// Human-readable failure detail when `success()` is false
    pub error: Option<String>,
}

impl ArticleOutcome {
    /// Audio bytes are available for this article (already present or
    /// freshly generated).
    pub fn success(&self) -> bool {
        matches!(self.status, OutcomeStatus::Exists | OutcomeStatus::Generated)
    }

    /// Outcome for an artifact found already in the store.
    pub fn exists(article_number: &str, artifact_file: &str) -> Self {
        Self {
            article_number: article_number.to_string(),
            status: OutcomeStatus::Exists,
            artifact_file: Some(artifact_file.to_string()),
            error: None,
        }
    }

    /// Outcome for a freshly generated and saved artifact.
    pub fn generated(article_number: &str, artifact_file: &str) -> Self {
        Self {
            article_number: article_number.to_string(),
            status: OutcomeStatus::Generated,
            artifact_file: Some(artifact_file.to_string()),
            error: None,
        }
    }

    /// Outcome for a failed generation or save.
    pub fn failed(article_number: &str, error: String) -> Self {
        Self {
            article_number: article_number.to_string(),
            status: OutcomeStatus::Failed,
            artifact_file: None,
            error: Some(error),
        }
    }

    /// Outcome for an article skipped because no credential is configured.
    pub fn skipped_no_credential(article_number: &str) -> Self {
        Self {
            article_number: article_number.to_string(),
            status: OutcomeStatus::SkippedNoCredential,
            artifact_file: None,
            error: Some("no API credential configured".to_string()),
        }
    }
}

/// Aggregated counts over one run's outcomes.
///
/// Always derived from the outcome list, never tracked separately:
/// `success == generated + existing` and
/// `total == success + skipped + failed` hold by construction.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunSummary {
    /// Articles processed
    pub total: usize,
    /// Articles with audio available
    pub success: usize,
    /// Artifacts generated this run
    pub generated: usize,
    /// Artifacts found from earlier runs
    pub existing: usize,
    /// Articles skipped for lack of a credential
    pub skipped: usize,
    /// Articles that failed
    pub failed: usize,
}

impl RunSummary {
    /// Compute the summary of an outcome list.
    pub fn from_outcomes(outcomes: &[ArticleOutcome]) -> Self {
        let mut summary = Self {
            total: outcomes.len(),
            ..Self::default()
        };
        for outcome in outcomes {
            match outcome.status {
                OutcomeStatus::Exists => summary.existing += 1,
                OutcomeStatus::Generated => summary.generated += 1,
                OutcomeStatus::Failed => summary.failed += 1,
                OutcomeStatus::SkippedNoCredential => summary.skipped += 1,
            }
        }
        summary.success = summary.generated + summary.existing;
        summary
    }
}

/// Everything a presentation layer needs from one run: the ordered
/// outcomes and their summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Per-article outcomes, in document order
    pub outcomes: Vec<ArticleOutcome>,
    /// Counts derived from `outcomes`
    pub summary: RunSummary,
}

impl RunReport {
    /// Build a report from an outcome list, deriving the summary.
    pub fn new(outcomes: Vec<ArticleOutcome>) -> Self {
        let summary = RunSummary::from_outcomes(&outcomes);
        Self { outcomes, summary }
    }
}
