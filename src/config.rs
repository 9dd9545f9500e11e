//! Configuration types for the artigo-tts pipeline.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Speech model used with the OpenAI API.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TtsModel {
    /// The gpt-4o-mini-tts model
    Mini,
    /// Standard quality model
    Standard,
    /// High definition model
    HighDefinition,
}

impl Default for TtsModel {
    fn default() -> Self {
        Self::Mini
    }
}

impl TtsModel {
    /// String identifier of the model in the OpenAI API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mini => "gpt-4o-mini-tts",
            Self::Standard => "tts-1",
            Self::HighDefinition => "tts-1-hd",
        }
    }

    /// All supported models, for selection menus.
    pub fn all() -> &'static [TtsModel] {
        &[Self::Mini, Self::Standard, Self::HighDefinition]
    }
}

/// Voice used with the OpenAI API.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TtsVoice {
    /// Alloy voice
    Alloy,
    /// Ash voice
    Ash,
    /// Ballad voice
    Ballad,
    /// Coral voice
    Coral,
    /// Echo voice
    Echo,
    /// Fable voice
    Fable,
    /// Onyx voice
    Onyx,
    /// Nova voice
    Nova,
    /// Sage voice
    Sage,
    /// Shimmer voice
    Shimmer,
}

impl Default for TtsVoice {
    fn default() -> Self {
        Self::Coral
    }
}

impl TtsVoice {
    /// String identifier of the voice in the OpenAI API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alloy => "alloy",
            Self::Ash => "ash",
            Self::Ballad => "ballad",
            Self::Coral => "coral",
            Self::Echo => "echo",
            Self::Fable => "fable",
            Self::Onyx => "onyx",
            Self::Nova => "nova",
            Self::Sage => "sage",
            Self::Shimmer => "shimmer",
        }
    }

    /// All supported voices, for selection menus.
    pub fn all() -> &'static [TtsVoice] {
        &[
            Self::Alloy,
            Self::Ash,
            Self::Ballad,
            Self::Coral,
            Self::Echo,
            Self::Fable,
            Self::Onyx,
            Self::Nova,
            Self::Sage,
            Self::Shimmer,
        ]
    }
}

/// Audio output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AudioFormat {
    /// MP3 format
    Mp3,
    /// Opus format
    Opus,
    /// WAV format
    Wav,
    /// AAC format
    Aac,
    /// FLAC format
    Flac,
    /// Raw PCM samples
    Pcm,
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self::Mp3
    }
}

impl AudioFormat {
    /// String identifier of the format in the OpenAI API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Opus => "opus",
            Self::Wav => "wav",
            Self::Aac => "aac",
            Self::Flac => "flac",
            Self::Pcm => "pcm",
        }
    }

    /// File extension for artifacts in this format, without the dot.
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    /// All supported formats, for selection menus.
    pub fn all() -> &'static [AudioFormat] {
        &[
            Self::Mp3,
            Self::Opus,
            Self::Wav,
            Self::Aac,
            Self::Flac,
            Self::Pcm,
        ]
    }
}

/// Configuration of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// API key for OpenAI. An empty string means no credential is
    /// configured: articles without an existing artifact are skipped
    /// instead of generated.
    pub openai_api_key: String,
    /// Speech model
    pub tts_model: TtsModel,
    /// Voice
    pub tts_voice: TtsVoice,
    /// Audio output format
    pub audio_format: AudioFormat,
    /// Only the first `article_limit` articles of the document are
    /// processed. Callers are expected to set this.
    pub article_limit: usize,
    /// Maximum number of concurrent requests to the API
    pub max_concurrent_requests: usize,
    /// Timeout for a single synthesis request
    pub request_timeout: Duration,
    /// Directory where audio artifacts are written
    pub output_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            openai_api_key: String::new(),
            tts_model: TtsModel::default(),
            tts_voice: TtsVoice::default(),
            audio_format: AudioFormat::default(),
            article_limit: 10,
            max_concurrent_requests: 5,
            request_timeout: Duration::from_secs(30),
            output_dir: PathBuf::from("audio"),
        }
    }
}

impl PipelineConfig {
    /// Whether a usable API credential is configured.
    pub fn has_credential(&self) -> bool {
        !self.openai_api_key.trim().is_empty()
    }
}
