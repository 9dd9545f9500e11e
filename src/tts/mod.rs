//! Speech synthesis: provider contract and the OpenAI adapter.

pub mod openai;

use async_trait::async_trait;

use crate::error::Result;

pub use openai::OpenAiTts;

/// Maximum input length accepted by the speech endpoint, in characters.
/// Longer input is truncated before transmission.
pub const MAX_INPUT_CHARS: usize = 4096;

/// Contract of a speech provider: text in, audio bytes out.
///
/// Every failure mode surfaces as an `Err` value; implementations never
/// panic across this boundary.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize audio for `text`, applying the provider's input limit.
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;
}

/// Cut `text` to the first [`MAX_INPUT_CHARS`] characters, on a character
/// boundary. Returns the input unchanged when it is short enough.
pub fn clamp_input(text: &str) -> &str {
    match text.char_indices().nth(MAX_INPUT_CHARS) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
