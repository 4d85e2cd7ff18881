//! Core prompt-synthesis trait shared by the pipeline and its tests.
//!
//! [`PromptSynthesizer`] is object-safe and `Send + Sync` so it can be held
//! behind an `Arc<dyn PromptSynthesizer>`.  The production implementation is
//! [`LadderSynthesizer`](crate::prompt::LadderSynthesizer); tests use
//! [`MockPromptSynthesizer`].

use async_trait::async_trait;
use thiserror::Error;

use crate::provider::ProviderError;

// ---------------------------------------------------------------------------
// PromptError
// ---------------------------------------------------------------------------

/// All errors that can arise from the prompt-synthesis stage.
#[derive(Debug, Clone, Error)]
pub enum PromptError {
    /// The supplied transcript was empty or whitespace-only.  Checked here
    /// as well as in the transcription stage, since this stage may be fed
    /// transcripts from other sources.
    #[error("transcript is empty — cannot derive an image prompt from empty input")]
    EmptyTranscript,

    /// The provider call itself failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

// ---------------------------------------------------------------------------
// PromptSynthesizer trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface for transcript → image-prompt
/// synthesis.
///
/// # Contract
///
/// - On success the returned prompt is non-empty after trimming.
/// - An empty or whitespace-only `transcript` is rejected with
///   `Err(PromptError::EmptyTranscript)` before any network call.
#[async_trait]
pub trait PromptSynthesizer: Send + Sync {
    /// Turn `transcript` into a visually descriptive image prompt.
    async fn synthesize(&self, transcript: &str) -> Result<String, PromptError>;
}

// Compile-time assertion: Box<dyn PromptSynthesizer> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn PromptSynthesizer>) {}
};

// ---------------------------------------------------------------------------
// MockPromptSynthesizer  (test-only)
// ---------------------------------------------------------------------------

/// A test double that returns a pre-configured response without any network
/// access.
#[cfg(test)]
pub struct MockPromptSynthesizer {
    response: Result<String, PromptError>,
}

#[cfg(test)]
impl MockPromptSynthesizer {
    /// Create a mock that always returns `Ok(prompt)`.
    pub fn ok(prompt: impl Into<String>) -> Self {
        Self {
            response: Ok(prompt.into()),
        }
    }

    /// Create a mock that always returns `Err(error)`.
    pub fn err(error: PromptError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl PromptSynthesizer for MockPromptSynthesizer {
    async fn synthesize(&self, _transcript: &str) -> Result<String, PromptError> {
        self.response.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_ok_returns_configured_prompt() {
        let synthesizer = MockPromptSynthesizer::ok("A vivid watercolor of a red fox");
        let prompt = synthesizer.synthesize("a red fox").await.unwrap();
        assert_eq!(prompt, "A vivid watercolor of a red fox");
    }

    #[tokio::test]
    async fn mock_err_returns_configured_error() {
        let synthesizer = MockPromptSynthesizer::err(PromptError::EmptyTranscript);
        let err = synthesizer.synthesize("anything").await.unwrap_err();
        assert!(matches!(err, PromptError::EmptyTranscript));
    }

    #[test]
    fn mock_is_object_safe() {
        let _: Box<dyn PromptSynthesizer> = Box::new(MockPromptSynthesizer::ok("ok"));
    }

    #[test]
    fn provider_error_converts_into_prompt_error() {
        let err: PromptError = ProviderError::Timeout.into();
        assert!(matches!(err, PromptError::Provider(ProviderError::Timeout)));
    }
}
