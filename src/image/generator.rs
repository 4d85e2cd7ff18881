//! Core image-generation trait and the hosted-provider implementation.
//!
//! # Overview
//!
//! [`ImageGenerator`] is the final stage interface: prompt in, decoded
//! image bytes plus metadata out.  It is object-safe and `Send + Sync` so
//! it can be held behind an `Arc<dyn ImageGenerator>`.
//!
//! [`ApiImageGenerator`] is the production implementation: it posts the
//! prompt to the provider's `/v1/images/generations` endpoint, requests
//! exactly one image, and decodes the base64 payload from the response.
//!
//! [`MockImageGenerator`] (available under `#[cfg(test)]`) returns a
//! pre-configured response — useful for unit-testing the pipeline without
//! network access.

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use thiserror::Error;

use crate::config::ImageSize;
use crate::provider::{ProviderClient, ProviderError};

// ---------------------------------------------------------------------------
// ImageError
// ---------------------------------------------------------------------------

/// All errors that can arise from the image-synthesis stage.
#[derive(Debug, Clone, Error)]
pub enum ImageError {
    /// The supplied prompt was empty or whitespace-only.  The prompt stage
    /// guarantees non-empty output, so hitting this indicates a defect in
    /// the caller rather than a user-facing condition.
    #[error("image prompt is empty — the prompt stage must never hand over an empty prompt")]
    EmptyPrompt,

    /// The provider call itself failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The response carried a payload that could not be base64-decoded.
    #[error("failed to decode image payload: {0}")]
    Decode(String),
}

// ---------------------------------------------------------------------------
// GeneratedImage
// ---------------------------------------------------------------------------

/// Generation metadata returned alongside the image bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMetadata {
    /// Model identifier — the one reported by the provider when present,
    /// otherwise the one that was requested.
    pub model: String,
    /// Resolution the image was generated at.
    pub size: ImageSize,
}

/// Terminal artifact of the pipeline: decoded binary image data plus
/// metadata.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    /// Raw decoded image bytes (PNG unless the model says otherwise).
    pub bytes: Vec<u8>,
    /// Generation metadata.
    pub metadata: ImageMetadata,
}

// ---------------------------------------------------------------------------
// ImageGenerator trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface for prompt → image generation.
///
/// # Contract
///
/// - An empty or whitespace-only `prompt` is rejected with
///   `Err(ImageError::EmptyPrompt)` before any network call.
/// - On success the returned bytes are non-empty, fully decoded binary
///   data (no transport encoding left).
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate one image from `prompt`.
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, ImageError>;
}

// Compile-time assertion: Box<dyn ImageGenerator> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn ImageGenerator>) {}
};

// ---------------------------------------------------------------------------
// ApiImageGenerator
// ---------------------------------------------------------------------------

/// Production generator backed by the provider's `/v1/images/generations`
/// endpoint.  Always requests exactly one image at the configured size.
pub struct ApiImageGenerator {
    client: ProviderClient,
    model: String,
    size: ImageSize,
}

impl ApiImageGenerator {
    /// Build a generator that sends prompts to `model` via `client`,
    /// producing images at `size`.
    pub fn new(client: ProviderClient, model: impl Into<String>, size: ImageSize) -> Self {
        Self {
            client,
            model: model.into(),
            size,
        }
    }
}

#[async_trait]
impl ImageGenerator for ApiImageGenerator {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, ImageError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(ImageError::EmptyPrompt);
        }

        let body = serde_json::json!({
            "model":  self.model,
            "prompt": prompt,
            "size":   self.size.as_str(),
            "n":      1
        });

        let json = self.client.post_json("/v1/images/generations", &body).await?;

        let encoded = extract_b64_payload(&json).ok_or_else(|| {
            ProviderError::Parse("image response carried no `data[0].b64_json` field".into())
        })?;

        let bytes = general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| ImageError::Decode(e.to_string()))?;

        let model = reported_model(&json)
            .unwrap_or(&self.model)
            .to_string();

        Ok(GeneratedImage {
            bytes,
            metadata: ImageMetadata {
                model,
                size: self.size,
            },
        })
    }
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Pull the base64 image payload out of a generation response.
fn extract_b64_payload(json: &serde_json::Value) -> Option<&str> {
    json["data"][0]["b64_json"].as_str()
}

/// The model identifier the provider says it actually used, when echoed.
fn reported_model(json: &serde_json::Value) -> Option<&str> {
    json["model"].as_str()
}

// ---------------------------------------------------------------------------
// MockImageGenerator  (test-only)
// ---------------------------------------------------------------------------

/// A test double that returns a pre-configured response without any network
/// access.
#[cfg(test)]
pub struct MockImageGenerator {
    response: Result<GeneratedImage, ImageError>,
}

#[cfg(test)]
impl MockImageGenerator {
    /// Create a mock that always returns an image with `bytes` and default
    /// metadata.
    pub fn ok(bytes: Vec<u8>) -> Self {
        Self {
            response: Ok(GeneratedImage {
                bytes,
                metadata: ImageMetadata {
                    model: "mock-image-model".into(),
                    size: ImageSize::default(),
                },
            }),
        }
    }

    /// Create a mock that always returns `Err(error)`.
    pub fn err(error: ImageError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate(&self, _prompt: &str) -> Result<GeneratedImage, ImageError> {
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

    fn make_generator() -> ApiImageGenerator {
        let config = ProviderConfig {
            api_key: Some("sk-test".into()),
            ..ProviderConfig::default()
        };
        let client = ProviderClient::from_config_with_env(&config, |_| None).expect("client");
        ApiImageGenerator::new(client, "gpt-image-1", ImageSize::Square1024)
    }

    // --- Empty-prompt gate ---

    #[tokio::test]
    async fn empty_prompt_is_rejected_without_network_call() {
        // Had a request been issued it would fail with a Provider error,
        // never EmptyPrompt, so the assertion proves the gate fires first.
        let err = make_generator().generate("").await.unwrap_err();
        assert!(matches!(err, ImageError::EmptyPrompt));
    }

    #[tokio::test]
    async fn whitespace_prompt_is_rejected_without_network_call() {
        let err = make_generator().generate(" \n\t ").await.unwrap_err();
        assert!(matches!(err, ImageError::EmptyPrompt));
    }

    // --- Response helpers ---

    #[test]
    fn extract_b64_payload_reads_first_datum() {
        let encoded = general_purpose::STANDARD.encode(b"fake png bytes");
        let json = serde_json::json!({ "data": [ { "b64_json": encoded } ] });

        let payload = extract_b64_payload(&json).expect("payload");
        let bytes = general_purpose::STANDARD.decode(payload).expect("decode");
        assert_eq!(bytes, b"fake png bytes");
        assert!(!bytes.is_empty());
    }

    #[test]
    fn extract_b64_payload_handles_missing_data() {
        let json = serde_json::json!({ "created": 1_700_000_000 });
        assert_eq!(extract_b64_payload(&json), None);
    }

    #[test]
    fn extract_b64_payload_handles_url_only_response() {
        let json = serde_json::json!({
            "data": [ { "url": "https://example.com/image.png" } ]
        });
        assert_eq!(extract_b64_payload(&json), None);
    }

    #[test]
    fn reported_model_read_when_present() {
        let json = serde_json::json!({ "model": "gpt-image-1-hd", "data": [] });
        assert_eq!(reported_model(&json), Some("gpt-image-1-hd"));
    }

    #[test]
    fn reported_model_absent_when_not_echoed() {
        let json = serde_json::json!({ "data": [] });
        assert_eq!(reported_model(&json), None);
    }

    // --- MockImageGenerator ---

    #[tokio::test]
    async fn mock_ok_returns_bytes_and_metadata() {
        let generator = MockImageGenerator::ok(vec![0x89, 0x50, 0x4e, 0x47]);
        let image = generator.generate("a fox").await.unwrap();

        assert_eq!(image.bytes, vec![0x89, 0x50, 0x4e, 0x47]);
        assert_eq!(image.metadata.model, "mock-image-model");
        assert_eq!(image.metadata.size, ImageSize::Square1024);
    }

    #[tokio::test]
    async fn mock_err_returns_configured_error() {
        let generator = MockImageGenerator::err(ImageError::EmptyPrompt);
        let err = generator.generate("a fox").await.unwrap_err();
        assert!(matches!(err, ImageError::EmptyPrompt));
    }

    // --- Object safety ---

    #[test]
    fn generator_is_object_safe() {
        let generator: Box<dyn ImageGenerator> = Box::new(make_generator());
        drop(generator);
    }

    // --- Error display ---

    #[test]
    fn empty_prompt_error_reads_as_invariant_violation() {
        let message = ImageError::EmptyPrompt.to_string();
        assert!(message.contains("prompt stage"));
    }

    #[test]
    fn decode_error_carries_detail() {
        let err = ImageError::Decode("invalid padding".into());
        assert!(err.to_string().contains("invalid padding"));
    }
}
