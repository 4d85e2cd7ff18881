//! Three-tier fallback ladder that turns a transcript into an image prompt.
//!
//! The tiers are evaluated in order until one yields usable text:
//!
//! 1. **Primary attempt** — detailed instruction pair, temperature 0.8,
//!    up to 300 tokens.
//! 2. **Simplified attempt** — shorter instruction pair, temperature 0.7,
//!    up to 250 tokens.  Reached when tier 1 errors or returns no usable
//!    content.
//! 3. **Local template** — pure string formatting over the transcript, no
//!    network call, cannot fail.
//!
//! Every network outcome is first classified into an [`AttemptOutcome`]
//! (`Success` / `Empty` / `Failed`) so the ladder loop advances on a single
//! well-defined condition: anything that is not `Success` moves to the next
//! tier.  Because tier 3 is infallible, [`LadderSynthesizer::synthesize`]
//! can only fail on an empty input transcript.

use async_trait::async_trait;

use crate::prompt::instructions;
use crate::prompt::synthesizer::{PromptError, PromptSynthesizer};
use crate::provider::{ProviderClient, ProviderError};

// ---------------------------------------------------------------------------
// Tier sampling parameters
// ---------------------------------------------------------------------------

const PRIMARY_TEMPERATURE: f64 = 0.8;
const PRIMARY_MAX_TOKENS: u32 = 300;
const FALLBACK_TEMPERATURE: f64 = 0.7;
const FALLBACK_MAX_TOKENS: u32 = 250;

// ---------------------------------------------------------------------------
// ChatRequest
// ---------------------------------------------------------------------------

/// One chat-completion call: instruction pair plus sampling parameters.
#[derive(Debug, Clone, Copy)]
pub struct ChatRequest<'a> {
    /// Model identifier sent to the provider.
    pub model: &'a str,
    /// System-role instruction.
    pub system: &'a str,
    /// User-role content.
    pub user: &'a str,
    /// Sampling temperature (0.0 – 1.0).
    pub temperature: f64,
    /// Maximum output length in tokens.
    pub max_tokens: u32,
}

// ---------------------------------------------------------------------------
// CompletionBackend trait
// ---------------------------------------------------------------------------

/// Thin seam over the chat-completion call so the ladder can be tested with
/// scripted outcomes.
///
/// `Ok(None)` means the provider answered but the response carried no text
/// content — distinct from a transport or API failure.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Execute one chat completion and return its text content, if any.
    async fn complete(&self, request: ChatRequest<'_>) -> Result<Option<String>, ProviderError>;
}

// ---------------------------------------------------------------------------
// AttemptOutcome
// ---------------------------------------------------------------------------

/// Classification of a single ladder attempt.
#[derive(Debug)]
pub enum AttemptOutcome {
    /// Non-empty content, already trimmed.
    Success(String),
    /// The call went through but yielded no usable text (missing content,
    /// or whitespace-only).
    Empty,
    /// The call itself failed.
    Failed(ProviderError),
}

impl AttemptOutcome {
    /// Classify a raw backend result.  Trimmed non-empty text is a
    /// `Success`; everything else advances the ladder.
    fn classify(result: Result<Option<String>, ProviderError>) -> Self {
        match result {
            Ok(Some(content)) => {
                let trimmed = content.trim();
                if trimmed.is_empty() {
                    AttemptOutcome::Empty
                } else {
                    AttemptOutcome::Success(trimmed.to_string())
                }
            }
            Ok(None) => AttemptOutcome::Empty,
            Err(err) => AttemptOutcome::Failed(err),
        }
    }
}

// ---------------------------------------------------------------------------
// LadderSynthesizer
// ---------------------------------------------------------------------------

/// Production [`PromptSynthesizer`] implementing the three-tier ladder over
/// any [`CompletionBackend`].
pub struct LadderSynthesizer<B: CompletionBackend> {
    backend: B,
    model: String,
}

impl<B: CompletionBackend> LadderSynthesizer<B> {
    /// Build a synthesizer that sends chat completions to `model` via
    /// `backend`.
    pub fn new(backend: B, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    async fn attempt(
        &self,
        system: &str,
        user: &str,
        temperature: f64,
        max_tokens: u32,
    ) -> AttemptOutcome {
        let request = ChatRequest {
            model: &self.model,
            system,
            user,
            temperature,
            max_tokens,
        };
        AttemptOutcome::classify(self.backend.complete(request).await)
    }
}

#[async_trait]
impl<B: CompletionBackend> PromptSynthesizer for LadderSynthesizer<B> {
    /// Run the ladder.  Never returns a provider error — the only failure
    /// mode is an empty input transcript.
    async fn synthesize(&self, transcript: &str) -> Result<String, PromptError> {
        let transcript = transcript.trim();
        if transcript.is_empty() {
            return Err(PromptError::EmptyTranscript);
        }

        // Tier 1: primary attempt.
        let (system, user) = instructions::build_primary(transcript);
        match self
            .attempt(&system, &user, PRIMARY_TEMPERATURE, PRIMARY_MAX_TOKENS)
            .await
        {
            AttemptOutcome::Success(prompt) => {
                log::debug!("prompt synthesis: primary attempt succeeded (len={})", prompt.len());
                return Ok(prompt);
            }
            AttemptOutcome::Empty => {
                log::warn!("prompt synthesis: primary attempt returned no content, retrying with simplified instructions");
            }
            AttemptOutcome::Failed(err) => {
                log::warn!("prompt synthesis: primary attempt failed ({err}), retrying with simplified instructions");
            }
        }

        // Tier 2: simplified attempt.
        let (system, user) = instructions::build_fallback(transcript);
        match self
            .attempt(&system, &user, FALLBACK_TEMPERATURE, FALLBACK_MAX_TOKENS)
            .await
        {
            AttemptOutcome::Success(prompt) => {
                log::debug!("prompt synthesis: simplified attempt succeeded (len={})", prompt.len());
                return Ok(prompt);
            }
            AttemptOutcome::Empty => {
                log::warn!("prompt synthesis: simplified attempt returned no content, deriving prompt locally");
            }
            AttemptOutcome::Failed(err) => {
                log::warn!("prompt synthesis: simplified attempt failed ({err}), deriving prompt locally");
            }
        }

        // Tier 3: local template. Pure formatting, cannot fail.
        Ok(instructions::template_prompt(transcript))
    }
}

// ---------------------------------------------------------------------------
// ProviderClient backend
// ---------------------------------------------------------------------------

/// Build the JSON body for one chat-completion call.
fn chat_body(request: &ChatRequest<'_>) -> serde_json::Value {
    serde_json::json!({
        "model":       request.model,
        "messages": [
            { "role": "system", "content": request.system },
            { "role": "user",   "content": request.user   }
        ],
        "stream":      false,
        "temperature": request.temperature,
        "max_tokens":  request.max_tokens
    })
}

/// Pull the assistant message text out of a chat-completion response.
/// Returns `None` when the content field is missing or not a string.
fn extract_content(json: &serde_json::Value) -> Option<String> {
    json["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
}

#[async_trait]
impl CompletionBackend for ProviderClient {
    async fn complete(&self, request: ChatRequest<'_>) -> Result<Option<String>, ProviderError> {
        let body = chat_body(&request);
        let json = self.post_json("/v1/chat/completions", &body).await?;
        Ok(extract_content(&json))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
