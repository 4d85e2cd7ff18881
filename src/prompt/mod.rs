//! Prompt-synthesis stage: transcript → image prompt.
//!
//! This module provides:
//! * [`PromptSynthesizer`] — async trait implemented by all synthesizer
//!   backends.
//! * [`LadderSynthesizer`] — production implementation running the
//!   three-tier fallback ladder (primary attempt → simplified attempt →
//!   local template).
//! * [`CompletionBackend`] / [`ChatRequest`] — seam over the provider's
//!   chat endpoint, implemented for [`ProviderClient`] and mockable in
//!   tests.
//! * [`instructions`] — the per-tier instruction pairs and the
//!   deterministic template.
//! * [`PromptError`] — error variants for prompt synthesis.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use voice_to_image::config::ProviderConfig;
//! use voice_to_image::prompt::{LadderSynthesizer, PromptSynthesizer};
//! use voice_to_image::provider::ProviderClient;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = ProviderClient::from_config(&ProviderConfig::default())?;
//! let synthesizer = LadderSynthesizer::new(client, "gpt-4o-mini");
//!
//! // Guaranteed non-empty for a non-empty transcript, even when the
//! // provider is unreachable.
//! let prompt = synthesizer.synthesize("a red fox in a forest").await?;
//! println!("{prompt}");
//! # Ok(())
//! # }
//! ```
//!
//! [`ProviderClient`]: crate::provider::ProviderClient

pub mod instructions;
pub mod ladder;
pub mod synthesizer;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use instructions::template_prompt;
pub use ladder::{AttemptOutcome, ChatRequest, CompletionBackend, LadderSynthesizer};
pub use synthesizer::{PromptError, PromptSynthesizer};

// test-only re-export so the pipeline test module can import
// MockPromptSynthesizer directly from the stage module.
#[cfg(test)]
pub use synthesizer::MockPromptSynthesizer;
