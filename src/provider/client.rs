//! Shared HTTP client for the hosted capability provider.
//!
//! `ProviderClient` speaks the OpenAI wire formats — JSON bodies for chat
//! and image endpoints, multipart uploads for transcription — against any
//! base URL that implements them.  All connection details come from
//! [`ProviderConfig`]; nothing is hardcoded.
//!
//! Each pipeline stage holds a clone of the same client, so credential
//! resolution and timeout policy are decided exactly once per assembly.

use thiserror::Error;

use crate::config::ProviderConfig;

/// Environment variable consulted when no explicit API key is configured.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Longest provider error body quoted verbatim in an error message.
/// Anything longer (HTML error pages, stack dumps) is truncated.
const MAX_ERROR_BODY: usize = 200;

// ---------------------------------------------------------------------------
// CredentialError
// ---------------------------------------------------------------------------

/// Raised at assembly time when no usable API key can be found.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Neither the config file, the CLI, nor the environment supplied a key.
    #[error("no API key configured — set {0} or add `api_key` to settings.toml")]
    Missing(&'static str),
}

// ---------------------------------------------------------------------------
// ProviderError
// ---------------------------------------------------------------------------

/// Errors raised by provider calls, shared by all three pipeline stages.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("provider request timed out")]
    Timeout,

    /// The provider answered with a non-success status code.
    #[error("provider returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The HTTP response could not be parsed as expected JSON.
    #[error("failed to parse provider response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout
        } else {
            ProviderError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Credential resolution
// ---------------------------------------------------------------------------

/// Resolve the API key to use for provider calls.
///
/// An explicitly configured key always wins; the ambient environment
/// (`OPENAI_API_KEY`) is consulted only when no explicit key is present.
/// Empty strings count as absent in both positions.
///
/// The environment is read through the `ambient` closure so tests can
/// exercise every branch without mutating process state.
pub fn resolve_api_key(
    explicit: Option<&str>,
    ambient: impl FnOnce(&str) -> Option<String>,
) -> Result<String, CredentialError> {
    if let Some(key) = explicit {
        if !key.is_empty() {
            return Ok(key.to_string());
        }
    }
    match ambient(API_KEY_ENV) {
        Some(key) if !key.is_empty() => Ok(key),
        _ => Err(CredentialError::Missing(API_KEY_ENV)),
    }
}

// ---------------------------------------------------------------------------
// ProviderClient
// ---------------------------------------------------------------------------

/// Authenticated HTTP client bound to one provider base URL.
///
/// Cloning is cheap — the inner `reqwest::Client` is reference-counted —
/// so each stage adapter carries its own copy.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ProviderClient {
    /// Build a client from provider config, resolving the API key from the
    /// config itself or from the process environment.
    ///
    /// Fails with [`CredentialError::Missing`] when no key can be found —
    /// callers should surface this before any audio is processed.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, CredentialError> {
        Self::from_config_with_env(config, |name| std::env::var(name).ok())
    }

    /// Same as [`from_config`](Self::from_config) but with an injectable
    /// environment lookup (used by tests).
    pub fn from_config_with_env(
        config: &ProviderConfig,
        ambient: impl FnOnce(&str) -> Option<String>,
    ) -> Result<Self, CredentialError> {
        let api_key = resolve_api_key(config.api_key.as_deref(), ambient)?;

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// POST a JSON body to `path` (e.g. `/v1/chat/completions`) and return
    /// the parsed JSON response.
    pub async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, ProviderError> {
        let response = self
            .http
            .post(self.endpoint(path))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        Self::read_json(response).await
    }

    /// POST a multipart form to `path` (e.g. `/v1/audio/transcriptions`) and
    /// return the parsed JSON response.
    pub async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<serde_json::Value, ProviderError> {
        let response = self
            .http
            .post(self.endpoint(path))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        Self::read_json(response).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn an HTTP response into parsed JSON, mapping non-success statuses
    /// to [`ProviderError::Api`] with the provider's own error message when
    /// one can be extracted from the body.
    async fn read_json(response: reqwest::Response) -> Result<serde_json::Value, ProviderError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), &body));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))
    }
}

/// Build a [`ProviderError::Api`] from a status code and raw response body.
///
/// OpenAI-style bodies carry `{"error": {"message": …}}`; that message is
/// preferred.  Non-JSON bodies are quoted directly, truncated to
/// [`MAX_ERROR_BODY`] characters.
fn api_error(status: u16, body: &str) -> ProviderError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| json["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "(no response body)".to_string()
            } else {
                trimmed.chars().take(MAX_ERROR_BODY).collect()
            }
        });

    ProviderError::Api { status, message }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
