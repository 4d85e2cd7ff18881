//! Pipeline orchestrator — drives the full audio → transcript → prompt →
//! image sequence.
//!
//! # Pipeline flow
//!
//! ```text
//! run(audio)
//!   └─▶ transcriber.transcribe(audio)          [Transcribing]
//!         └─▶ synthesizer.synthesize(text)     [PromptBuilding]
//!               └─▶ generator.generate(prompt) [ImageGenerating]
//!                     └─▶ PipelineResult       [Succeeded]
//! any stage error ──▶ PipelineResult with failure recorded [Failed],
//!                     earlier stage outputs preserved
//! ```
//!
//! The orchestrator never retries a stage; the only internal recovery is
//! the fallback ladder inside prompt synthesis.  Each invocation is
//! independent and shares no mutable state with any other.

use std::sync::Arc;

use crate::audio::AudioPayload;
use crate::config::AppConfig;
use crate::image::{ApiImageGenerator, ImageGenerator};
use crate::prompt::{LadderSynthesizer, PromptSynthesizer};
use crate::provider::{CredentialError, ProviderClient};
use crate::stt::{ApiTranscriber, Transcriber};

use super::state::{PipelineFailure, PipelineResult, PipelineState, Stage};

// ---------------------------------------------------------------------------
// PipelineOrchestrator
// ---------------------------------------------------------------------------

/// Sequences the three pipeline stages over trait objects, so any stage can
/// be swapped for a test double.
///
/// Create with [`PipelineOrchestrator::from_config`] for the production
/// wiring, or [`new`](Self::new) to supply the stages directly.
///
/// ```rust,no_run
/// use voice_to_image::audio::AudioPayload;
/// use voice_to_image::config::AppConfig;
/// use voice_to_image::pipeline::PipelineOrchestrator;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = AppConfig::default();
///     let pipeline = PipelineOrchestrator::from_config(&config)?;
///
///     let audio = AudioPayload::new(std::fs::read("clip.wav")?, "clip.wav");
///     let result = pipeline.run(&audio).await;
///
///     match result.failure {
///         None => println!("image: {} bytes", result.image.unwrap().bytes.len()),
///         Some(failure) => eprintln!("{failure}"),
///     }
///     Ok(())
/// }
/// ```
pub struct PipelineOrchestrator {
    transcriber: Arc<dyn Transcriber>,
    synthesizer: Arc<dyn PromptSynthesizer>,
    generator: Arc<dyn ImageGenerator>,
}

impl PipelineOrchestrator {
    /// Create an orchestrator from explicit stage implementations.
    pub fn new(
        transcriber: Arc<dyn Transcriber>,
        synthesizer: Arc<dyn PromptSynthesizer>,
        generator: Arc<dyn ImageGenerator>,
    ) -> Self {
        Self {
            transcriber,
            synthesizer,
            generator,
        }
    }

    /// Wire up the production stages from application config.
    ///
    /// One [`ProviderClient`] is built here and cloned into every stage, so
    /// credentials are resolved exactly once.  Fails with
    /// [`CredentialError`] before any audio is processed when no API key
    /// can be found.
    pub fn from_config(config: &AppConfig) -> Result<Self, CredentialError> {
        let client = ProviderClient::from_config(&config.provider)?;

        let transcriber = ApiTranscriber::new(client.clone(), &config.models.transcription);
        let synthesizer = LadderSynthesizer::new(client.clone(), &config.models.prompt);
        let generator = ApiImageGenerator::new(client, &config.models.image, config.image_size);

        Ok(Self::new(
            Arc::new(transcriber),
            Arc::new(synthesizer),
            Arc::new(generator),
        ))
    }

    // -----------------------------------------------------------------------
    // Invocation
    // -----------------------------------------------------------------------

    /// Run the full pipeline over one audio payload.
    ///
    /// Never returns an error: failures are recorded in the result together
    /// with every stage output produced before the failing stage, so a
    /// caller can still show the transcript when image generation fails.
    pub async fn run(&self, audio: &AudioPayload) -> PipelineResult {
        let mut result = PipelineResult::default();

        // ── 1. Transcription ─────────────────────────────────────────────
        Self::enter(PipelineState::Transcribing);
        log::info!(
            "pipeline: step 1/3 — transcribing {} ({} bytes)",
            audio.filename(),
            audio.bytes().len()
        );

        let transcript = match self.transcriber.transcribe(audio).await {
            Ok(text) => text,
            Err(e) => return Self::fail(result, Stage::Transcription, e.to_string()),
        };
        log::debug!("pipeline: transcript = {transcript:?}");
        result.transcript = Some(transcript.clone());

        // ── 2. Prompt synthesis ──────────────────────────────────────────
        Self::enter(PipelineState::PromptBuilding);
        log::info!(
            "pipeline: step 2/3 — building image prompt from transcript ({} chars)",
            transcript.len()
        );

        let image_prompt = match self.synthesizer.synthesize(&transcript).await {
            Ok(prompt) => prompt,
            Err(e) => return Self::fail(result, Stage::PromptSynthesis, e.to_string()),
        };
        log::debug!("pipeline: image prompt = {image_prompt:?}");
        result.image_prompt = Some(image_prompt.clone());

        // ── 3. Image synthesis ───────────────────────────────────────────
        Self::enter(PipelineState::ImageGenerating);
        log::info!(
            "pipeline: step 3/3 — generating image from prompt ({} chars)",
            image_prompt.len()
        );

        let image = match self.generator.generate(&image_prompt).await {
            Ok(image) => image,
            Err(e) => return Self::fail(result, Stage::ImageSynthesis, e.to_string()),
        };
        log::info!(
            "pipeline: image ready ({} bytes, model {}, size {})",
            image.bytes.len(),
            image.metadata.model,
            image.metadata.size
        );
        result.image = Some(image);

        Self::enter(PipelineState::Succeeded);
        result
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn enter(state: PipelineState) {
        log::debug!("pipeline: → {}", state.label());
    }

    fn fail(mut result: PipelineResult, stage: Stage, message: String) -> PipelineResult {
        let failure = PipelineFailure::new(stage, message);
        log::error!("pipeline: {failure}");
        Self::enter(PipelineState::Failed);
        result.failure = Some(failure);
        result
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{ImageError, MockImageGenerator};
    use crate::prompt::{MockPromptSynthesizer, PromptError};
    use crate::provider::ProviderError;
    use crate::stt::{MockTranscriber, SttError};

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn sample_audio() -> AudioPayload {
        AudioPayload::new(vec![0u8; 64], "clip.wav")
    }

    fn make_pipeline(
        transcriber: MockTranscriber,
        synthesizer: MockPromptSynthesizer,
        generator: MockImageGenerator,
    ) -> PipelineOrchestrator {
        PipelineOrchestrator::new(
            Arc::new(transcriber),
            Arc::new(synthesizer),
            Arc::new(generator),
        )
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    /// Full happy path: all three stages succeed and every field of the
    /// result is populated.
    #[tokio::test]
    async fn all_stages_succeed_populates_every_field() {
        let pipeline = make_pipeline(
            MockTranscriber::ok("a red fox in a forest"),
            MockPromptSynthesizer::ok("A vivid watercolor of a red fox darting through ferns"),
            MockImageGenerator::ok(vec![0x89, 0x50, 0x4e, 0x47]),
        );

        let result = pipeline.run(&sample_audio()).await;

        assert!(result.is_success());
        assert_eq!(result.state(), PipelineState::Succeeded);
        assert_eq!(result.transcript.as_deref(), Some("a red fox in a forest"));
        assert_eq!(
            result.image_prompt.as_deref(),
            Some("A vivid watercolor of a red fox darting through ferns")
        );
        let image = result.image.expect("image");
        assert!(!image.bytes.is_empty());
        assert!(result.failure.is_none());
    }

    /// An empty transcription fails the invocation at the first stage with
    /// no downstream fields populated.
    #[tokio::test]
    async fn empty_transcription_fails_with_nothing_populated() {
        let pipeline = make_pipeline(
            MockTranscriber::err(SttError::EmptyTranscript),
            MockPromptSynthesizer::ok("never used"),
            MockImageGenerator::ok(vec![1]),
        );

        let result = pipeline.run(&sample_audio()).await;

        assert!(!result.is_success());
        assert_eq!(result.state(), PipelineState::Failed);
        assert!(result.transcript.is_none());
        assert!(result.image_prompt.is_none());
        assert!(result.image.is_none());

        let failure = result.failure.expect("failure");
        assert_eq!(failure.stage, Stage::Transcription);
        assert!(failure.message.contains("no text"));
    }

    /// A provider error during transcription is attributed to the
    /// transcription stage.
    #[tokio::test]
    async fn transcription_provider_error_names_the_stage() {
        let pipeline = make_pipeline(
            MockTranscriber::err(SttError::Provider(ProviderError::Timeout)),
            MockPromptSynthesizer::ok("never used"),
            MockImageGenerator::ok(vec![1]),
        );

        let result = pipeline.run(&sample_audio()).await;

        let failure = result.failure.expect("failure");
        assert_eq!(failure.stage, Stage::Transcription);
        assert!(failure.message.contains("timed out"));
    }

    /// A prompt-stage failure preserves the transcript.
    #[tokio::test]
    async fn prompt_failure_preserves_transcript() {
        let pipeline = make_pipeline(
            MockTranscriber::ok("a red fox in a forest"),
            MockPromptSynthesizer::err(PromptError::EmptyTranscript),
            MockImageGenerator::ok(vec![1]),
        );

        let result = pipeline.run(&sample_audio()).await;

        assert!(!result.is_success());
        assert_eq!(result.transcript.as_deref(), Some("a red fox in a forest"));
        assert!(result.image_prompt.is_none());
        assert!(result.image.is_none());
        assert_eq!(result.failure.expect("failure").stage, Stage::PromptSynthesis);
    }

    /// An image-stage failure preserves both the transcript and the prompt —
    /// partial progress stays visible.
    #[tokio::test]
    async fn image_failure_preserves_transcript_and_prompt() {
        let pipeline = make_pipeline(
            MockTranscriber::ok("a red fox in a forest"),
            MockPromptSynthesizer::ok("A vivid watercolor of a red fox"),
            MockImageGenerator::err(ImageError::Provider(ProviderError::Api {
                status: 500,
                message: "internal error".into(),
            })),
        );

        let result = pipeline.run(&sample_audio()).await;

        assert!(!result.is_success());
        assert_eq!(result.state(), PipelineState::Failed);
        assert_eq!(result.transcript.as_deref(), Some("a red fox in a forest"));
        assert_eq!(
            result.image_prompt.as_deref(),
            Some("A vivid watercolor of a red fox")
        );
        assert!(result.image.is_none());

        let failure = result.failure.expect("failure");
        assert_eq!(failure.stage, Stage::ImageSynthesis);
        assert!(failure.message.contains("500"));
    }

    /// Invocations are independent: the same orchestrator can run twice and
    /// each call returns a fresh result.
    #[tokio::test]
    async fn repeated_runs_return_fresh_results() {
        let pipeline = make_pipeline(
            MockTranscriber::ok("a harbour at dawn"),
            MockPromptSynthesizer::ok("A misty harbour in morning light"),
            MockImageGenerator::ok(vec![7, 7, 7]),
        );

        let first = pipeline.run(&sample_audio()).await;
        let second = pipeline.run(&sample_audio()).await;

        assert!(first.is_success());
        assert!(second.is_success());
        assert_eq!(first.transcript, second.transcript);
    }

    /// `from_config` with an explicit API key wires up without touching the
    /// environment.
    #[test]
    fn from_config_succeeds_with_explicit_key() {
        let mut config = AppConfig::default();
        config.provider.api_key = Some("sk-test".into());

        assert!(PipelineOrchestrator::from_config(&config).is_ok());
    }
}
