//! Artifact naming and storage.
//!
//! Artifact names are derived deterministically from article numbers, so a
//! second run over the same document finds the files written by the first
//! run and skips regeneration.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::AudioFormat;
use crate::error::{ArtigoTtsError, Result};
use crate::segment::Article;

lazy_static! {
    static ref NON_ALNUM: Regex = Regex::new(r"[^A-Za-z0-9]+").unwrap();
}

/// Replace every maximal run of non-alphanumeric characters with a single
/// underscore.
pub fn sanitize_label(label: &str) -> String {
    NON_ALNUM.replace_all(label, "_").into_owned()
}

/// Artifact file name for an article number: `artigo_<sanitized>.<ext>`.
pub fn artifact_file_name(number: &str, format: AudioFormat) -> String {
    format!("artigo_{}.{}", sanitize_label(number), format.extension())
}

/// Resolve one artifact name per article, in article order.
///
/// Distinct article numbers can sanitize to the same name. The first
/// article to claim a name keeps it; later claimants get the article
/// ordinal appended. Segmentation is deterministic, so the resolved names
/// are stable across runs and every task owns a unique file.
pub fn resolve_artifact_names(articles: &[Article], format: AudioFormat) -> Vec<String> {
    let mut taken = HashSet::new();
    articles
        .iter()
        .map(|article| {
            let mut name = artifact_file_name(&article.number, format);
            if !taken.insert(name.clone()) {
                name = format!(
                    "artigo_{}_{}.{}",
                    sanitize_label(&article.number),
                    article.ordinal,
                    format.extension()
                );
                taken.insert(name.clone());
            }
            name
        })
        .collect()
}

/// Output directory for a document: `<base>/<sanitized-name>_audio`.
pub fn document_audio_dir<P: AsRef<Path>>(base: P, document_name: &str) -> PathBuf {
    base.as_ref()
        .join(format!("{}_audio", sanitize_label(document_name)))
}

/// File store for generated audio artifacts.
///
/// A thin wrapper over one output directory. Each pipeline task writes to
/// its own resolved name, so concurrent use needs no locking.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Create a store rooted at `root`. The directory is not created until
    /// [`ArtifactStore::ensure_root`] is called.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root directory if it does not exist. Failure here is
    /// fatal to the run and must be surfaced before any task is scheduled.
    pub fn ensure_root(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root).map_err(|e| {
            ArtigoTtsError::Configuration(format!(
                "failed to create output directory {}: {}",
                self.root.display(),
                e
            ))
        })
    }

    /// Absolute path of an artifact name inside the store.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Whether an artifact with this name already exists.
    pub fn contains(&self, name: &str) -> bool {
        self.path_for(name).is_file()
    }

    /// Write audio bytes under `name`, returning the full path.
    pub async fn write(&self, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path_for(name);
        tokio::fs::write(&path, bytes).await.map_err(|e| {
            ArtigoTtsError::Persistence(format!(
                "failed to save artifact {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::segment_articles;

    #[test]
    fn sanitizes_runs_of_special_characters() {
        assert_eq!(sanitize_label("12"), "12");
        assert_eq!(sanitize_label("1º-A"), "1_A");
        assert_eq!(sanitize_label("  5 / 7  "), "_5_7_");
    }

    #[test]
    fn artifact_names_carry_prefix_and_extension() {
        assert_eq!(
            artifact_file_name("12", AudioFormat::Mp3),
            "artigo_12.mp3"
        );
        assert_eq!(
            artifact_file_name("Complete", AudioFormat::Wav),
            "artigo_Complete.wav"
        );
    }

    #[test]
    fn colliding_numbers_are_disambiguated_by_ordinal() {
        let articles =
            segment_articles("Art. 1. Um.\nArt. 2. Dois.\nArt. 1. Repetido.");
        let names = resolve_artifact_names(&articles, AudioFormat::Mp3);
        assert_eq!(
            names,
            vec!["artigo_1.mp3", "artigo_2.mp3", "artigo_1_2.mp3"]
        );
        // same document, same names on a second run
        assert_eq!(names, resolve_artifact_names(&articles, AudioFormat::Mp3));
    }

    #[test]
    fn document_dir_is_derived_from_the_document_name() {
        let dir = document_audio_dir("/tmp/out", "lei 8.112");
        assert_eq!(dir, PathBuf::from("/tmp/out/lei_8_112_audio"));
    }

    #[tokio::test]
    async fn store_round_trip_and_existence() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("audio"));
        store.ensure_root().unwrap();

        assert!(!store.contains("artigo_1.mp3"));
        let path = store.write("artigo_1.mp3", b"bytes").await.unwrap();
        assert!(path.is_file());
        assert!(store.contains("artigo_1.mp3"));
    }
}
