//! Core transcription trait and the hosted-provider implementation.
//!
//! # Overview
//!
//! [`Transcriber`] is the interface the pipeline sequences first.  It is
//! object-safe and `Send + Sync` so it can be held behind an
//! `Arc<dyn Transcriber>`.
//!
//! [`ApiTranscriber`] is the production implementation: it uploads the audio
//! payload to the provider's `/v1/audio/transcriptions` endpoint as a
//! multipart form and normalises the recognised text.
//!
//! [`MockTranscriber`] (available under `#[cfg(test)]`) returns a
//! pre-configured response — useful for unit-testing the pipeline without
//! network access.

use async_trait::async_trait;
use thiserror::Error;

use crate::audio::AudioPayload;
use crate::provider::{ProviderClient, ProviderError};

// ---------------------------------------------------------------------------
// SttError
// ---------------------------------------------------------------------------

/// All errors that can arise from the transcription stage.
#[derive(Debug, Clone, Error)]
pub enum SttError {
    /// The provider recognised no speech — the text came back empty or
    /// whitespace-only.  The audio may be silent, corrupted, or contain no
    /// discernible speech.
    #[error("transcription produced no text — the audio may be silent, corrupted, or contain no speech")]
    EmptyTranscript,

    /// The provider call itself failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

// ---------------------------------------------------------------------------
// Transcriber trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface for audio transcription.
///
/// Implementations must be `Send + Sync` so they can be held behind an
/// `Arc<dyn Transcriber>` and called from any task.
///
/// # Contract
///
/// - On success the returned transcript is non-empty and trimmed of
///   surrounding whitespace.
/// - Empty or whitespace-only recognition results are reported as
///   `Err(SttError::EmptyTranscript)`, never as `Ok("")`.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe `audio` and return the recognised text.
    async fn transcribe(&self, audio: &AudioPayload) -> Result<String, SttError>;
}

// Compile-time assertion: Box<dyn Transcriber> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn Transcriber>) {}
};

// ---------------------------------------------------------------------------
// Transcript normalisation
// ---------------------------------------------------------------------------

/// Trim surrounding whitespace from raw recognised text and enforce the
/// non-empty contract.
///
/// Kept as a free function so the gate can be tested without any client.
pub fn normalize_transcript(raw: &str) -> Result<String, SttError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SttError::EmptyTranscript);
    }
    Ok(trimmed.to_string())
}

// ---------------------------------------------------------------------------
// ApiTranscriber
// ---------------------------------------------------------------------------

/// Production transcriber backed by the provider's
/// `/v1/audio/transcriptions` endpoint.
///
/// The audio is uploaded as a multipart `file` part carrying the payload's
/// filename hint and MIME type; decoding is pinned to temperature 0 so
/// repeated runs of the same audio transcribe identically.
pub struct ApiTranscriber {
    client: ProviderClient,
    model: String,
}

impl ApiTranscriber {
    /// Build a transcriber that sends audio to `model` via `client`.
    pub fn new(client: ProviderClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl Transcriber for ApiTranscriber {
    async fn transcribe(&self, audio: &AudioPayload) -> Result<String, SttError> {
        let part = reqwest::multipart::Part::bytes(audio.bytes().to_vec())
            .file_name(audio.filename().to_string())
            .mime_str(audio.mime_type())
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        let form = reqwest::multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "json")
            .text("temperature", "0")
            .part("file", part);

        let json = self
            .client
            .post_multipart("/v1/audio/transcriptions", form)
            .await?;

        let raw = json["text"].as_str().ok_or_else(|| {
            ProviderError::Parse("transcription response carried no `text` field".into())
        })?;

        normalize_transcript(raw)
    }
}

// ---------------------------------------------------------------------------
// MockTranscriber  (test-only)
// ---------------------------------------------------------------------------

/// A test double that returns a pre-configured response without any network
/// access.
///
/// # Example
///
/// ```rust
/// # use voice_to_image::audio::AudioPayload;
/// # use voice_to_image::stt::{MockTranscriber, Transcriber};
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let transcriber = MockTranscriber::ok("a red fox in a forest");
/// let audio = AudioPayload::new(vec![0u8; 16], "clip.wav");
/// let text = transcriber.transcribe(&audio).await.unwrap();
/// assert_eq!(text, "a red fox in a forest");
/// # }
/// ```
#[cfg(test)]
pub struct MockTranscriber {
    response: Result<String, SttError>,
}

#[cfg(test)]
impl MockTranscriber {
    /// Create a mock that always returns `Ok(text)`.
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            response: Ok(text.into()),
        }
    }

    /// Create a mock that always returns `Err(error)`.
    pub fn err(error: SttError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, _audio: &AudioPayload) -> Result<String, SttError> {
        self.response.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderConfig;
    use crate::provider::ProviderClient;

    fn make_client() -> ProviderClient {
        let config = ProviderConfig {
            api_key: Some("sk-test".into()),
            ..ProviderConfig::default()
        };
        ProviderClient::from_config_with_env(&config, |_| None).expect("client")
    }

    // --- normalize_transcript ---

    #[test]
    fn normalize_trims_surrounding_whitespace() {
        let text = normalize_transcript("  a red fox in a forest \n").unwrap();
        assert_eq!(text, "a red fox in a forest");
    }

    #[test]
    fn normalize_passes_clean_text_through() {
        let text = normalize_transcript("hello world").unwrap();
        assert_eq!(text, "hello world");
    }

    #[test]
    fn normalize_rejects_empty_text() {
        let err = normalize_transcript("").unwrap_err();
        assert!(matches!(err, SttError::EmptyTranscript));
    }

    #[test]
    fn normalize_rejects_whitespace_only_text() {
        let err = normalize_transcript(" \t\n  ").unwrap_err();
        assert!(matches!(err, SttError::EmptyTranscript));
    }

    #[test]
    fn empty_transcript_error_mentions_silent_audio() {
        let message = SttError::EmptyTranscript.to_string();
        assert!(message.contains("silent"));
    }

    // --- MockTranscriber ---

    #[tokio::test]
    async fn mock_ok_returns_configured_text() {
        let transcriber = MockTranscriber::ok("sunset over mountains");
        let audio = AudioPayload::new(vec![1, 2, 3], "clip.wav");
        assert_eq!(
            transcriber.transcribe(&audio).await.unwrap(),
            "sunset over mountains"
        );
    }

    #[tokio::test]
    async fn mock_err_returns_configured_error() {
        let transcriber = MockTranscriber::err(SttError::EmptyTranscript);
        let audio = AudioPayload::new(vec![1, 2, 3], "clip.wav");
        let err = transcriber.transcribe(&audio).await.unwrap_err();
        assert!(matches!(err, SttError::EmptyTranscript));
    }

    // --- ApiTranscriber construction ---

    #[test]
    fn api_transcriber_builds_from_client() {
        let _transcriber = ApiTranscriber::new(make_client(), "whisper-1");
    }

    /// Verify that `ApiTranscriber` is object-safe (usable as `dyn Transcriber`).
    #[test]
    fn transcriber_is_object_safe() {
        let transcriber: Box<dyn Transcriber> =
            Box::new(ApiTranscriber::new(make_client(), "whisper-1"));
        drop(transcriber);
    }

    // --- Error conversion ---

    #[test]
    fn provider_error_converts_into_stt_error() {
        let err: SttError = ProviderError::Timeout.into();
        assert!(matches!(err, SttError::Provider(ProviderError::Timeout)));
    }
}
