//! Pipeline state machine and result types.
//!
//! [`PipelineState`] names the phases of one pipeline invocation.
//! [`PipelineResult`] is the value an invocation returns: every stage
//! output it managed to produce, plus the failure (if any) that stopped it.
//!
//! The pipeline is a pure service: callers hand it an audio payload and get
//! a result value back.  Any state retention across invocations is the
//! caller's concern.

use crate::image::GeneratedImage;

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// One of the three pipeline stages, used to attribute failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Audio payload → transcript.
    Transcription,
    /// Transcript → image prompt.
    PromptSynthesis,
    /// Image prompt → image bytes.
    ImageSynthesis,
}

impl Stage {
    /// A short human-readable label for status lines and error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Transcription => "transcription",
            Stage::PromptSynthesis => "prompt synthesis",
            Stage::ImageSynthesis => "image synthesis",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// PipelineState
// ---------------------------------------------------------------------------

/// Phases of one pipeline invocation.
///
/// The transitions are strictly forward:
///
/// ```text
/// Idle ──▶ Transcribing ──▶ PromptBuilding ──▶ ImageGenerating ──▶ Succeeded
///              │                  │                   │
///              └──────────────────┴───────────────────┴──error──▶ Failed
/// ```
///
/// No stage is retried by the orchestrator; the only internal retry lives
/// inside prompt synthesis (its fallback ladder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// No invocation in progress.
    Idle,

    /// The audio payload is being transcribed.
    Transcribing,

    /// The transcript is being rewritten into an image prompt.
    PromptBuilding,

    /// The image prompt is being rendered by the image model.
    ImageGenerating,

    /// All three stages completed; the result carries an image.
    Succeeded,

    /// A stage failed; the result carries the failure and any outputs
    /// produced before it.
    Failed,
}

impl PipelineState {
    /// Returns `true` once the invocation has finished, successfully or not.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Succeeded | PipelineState::Failed)
    }

    /// A short human-readable label suitable for status lines.
    pub fn label(&self) -> &'static str {
        match self {
            PipelineState::Idle => "Idle",
            PipelineState::Transcribing => "Transcribing",
            PipelineState::PromptBuilding => "Building prompt",
            PipelineState::ImageGenerating => "Generating image",
            PipelineState::Succeeded => "Done",
            PipelineState::Failed => "Failed",
        }
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        PipelineState::Idle
    }
}

// ---------------------------------------------------------------------------
// PipelineFailure
// ---------------------------------------------------------------------------

/// The stage that stopped an invocation plus a human-readable description.
///
/// Stack traces and provider internals stay in the logs; this carries only
/// what a caller should show to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineFailure {
    /// The stage that failed.
    pub stage: Stage,
    /// Human-readable description of what went wrong.
    pub message: String,
}

impl PipelineFailure {
    pub fn new(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for PipelineFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.stage, self.message)
    }
}

// ---------------------------------------------------------------------------
// PipelineResult
// ---------------------------------------------------------------------------

/// Everything one pipeline invocation produced.
///
/// On failure the fields filled by earlier stages stay populated, so a
/// caller can still show the transcript when image generation was the stage
/// that failed.
#[derive(Debug, Clone, Default)]
pub struct PipelineResult {
    /// Recognised speech, present once transcription succeeded.
    pub transcript: Option<String>,

    /// The prompt handed to the image model, present once prompt synthesis
    /// succeeded.
    pub image_prompt: Option<String>,

    /// The generated image, present only on full success.
    pub image: Option<GeneratedImage>,

    /// The failure that stopped the invocation, if any.
    pub failure: Option<PipelineFailure>,
}

impl PipelineResult {
    /// `true` when all three stages completed.
    pub fn is_success(&self) -> bool {
        self.failure.is_none() && self.image.is_some()
    }

    /// The terminal state this result represents.
    ///
    /// A default (never-run) result maps to `Idle`.
    pub fn state(&self) -> PipelineState {
        if self.failure.is_some() {
            PipelineState::Failed
        } else if self.image.is_some() {
            PipelineState::Succeeded
        } else {
            PipelineState::Idle
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ImageSize;
    use crate::image::ImageMetadata;

    fn some_image() -> GeneratedImage {
        GeneratedImage {
            bytes: vec![1, 2, 3],
            metadata: ImageMetadata {
                model: "gpt-image-1".into(),
                size: ImageSize::Square1024,
            },
        }
    }

    // ---- Stage::label ---

    #[test]
    fn stage_labels() {
        assert_eq!(Stage::Transcription.label(), "transcription");
        assert_eq!(Stage::PromptSynthesis.label(), "prompt synthesis");
        assert_eq!(Stage::ImageSynthesis.label(), "image synthesis");
    }

    #[test]
    fn stage_display_matches_label() {
        assert_eq!(Stage::ImageSynthesis.to_string(), "image synthesis");
    }

    // ---- PipelineState::is_terminal ---

    #[test]
    fn idle_is_not_terminal() {
        assert!(!PipelineState::Idle.is_terminal());
    }

    #[test]
    fn transcribing_is_not_terminal() {
        assert!(!PipelineState::Transcribing.is_terminal());
    }

    #[test]
    fn prompt_building_is_not_terminal() {
        assert!(!PipelineState::PromptBuilding.is_terminal());
    }

    #[test]
    fn image_generating_is_not_terminal() {
        assert!(!PipelineState::ImageGenerating.is_terminal());
    }

    #[test]
    fn succeeded_is_terminal() {
        assert!(PipelineState::Succeeded.is_terminal());
    }

    #[test]
    fn failed_is_terminal() {
        assert!(PipelineState::Failed.is_terminal());
    }

    // ---- PipelineState::label ---

    #[test]
    fn label_idle() {
        assert_eq!(PipelineState::Idle.label(), "Idle");
    }

    #[test]
    fn label_transcribing() {
        assert_eq!(PipelineState::Transcribing.label(), "Transcribing");
    }

    #[test]
    fn label_prompt_building() {
        assert_eq!(PipelineState::PromptBuilding.label(), "Building prompt");
    }

    #[test]
    fn label_image_generating() {
        assert_eq!(PipelineState::ImageGenerating.label(), "Generating image");
    }

    #[test]
    fn label_succeeded() {
        assert_eq!(PipelineState::Succeeded.label(), "Done");
    }

    #[test]
    fn label_failed() {
        assert_eq!(PipelineState::Failed.label(), "Failed");
    }

    // ---- Default ---

    #[test]
    fn default_pipeline_state_is_idle() {
        assert_eq!(PipelineState::default(), PipelineState::Idle);
    }

    // ---- PipelineFailure ---

    #[test]
    fn failure_display_names_the_stage() {
        let failure = PipelineFailure::new(Stage::ImageSynthesis, "HTTP 500");
        assert_eq!(failure.to_string(), "image synthesis failed: HTTP 500");
    }

    // ---- PipelineResult ---

    #[test]
    fn default_result_is_idle_and_not_success() {
        let result = PipelineResult::default();
        assert!(!result.is_success());
        assert_eq!(result.state(), PipelineState::Idle);
    }

    #[test]
    fn complete_result_is_succeeded() {
        let result = PipelineResult {
            transcript: Some("a fox".into()),
            image_prompt: Some("A vivid fox".into()),
            image: Some(some_image()),
            failure: None,
        };
        assert!(result.is_success());
        assert_eq!(result.state(), PipelineState::Succeeded);
    }

    #[test]
    fn failed_result_reports_failed_state() {
        let result = PipelineResult {
            transcript: Some("a fox".into()),
            image_prompt: None,
            image: None,
            failure: Some(PipelineFailure::new(Stage::PromptSynthesis, "boom")),
        };
        assert!(!result.is_success());
        assert_eq!(result.state(), PipelineState::Failed);
    }

    #[test]
    fn failure_takes_precedence_over_partial_outputs() {
        // Even with an image present, a recorded failure means Failed.
        let result = PipelineResult {
            transcript: Some("a fox".into()),
            image_prompt: Some("A vivid fox".into()),
            image: Some(some_image()),
            failure: Some(PipelineFailure::new(Stage::ImageSynthesis, "late error")),
        };
        assert!(!result.is_success());
        assert_eq!(result.state(), PipelineState::Failed);
    }
}
