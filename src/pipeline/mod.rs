//! Pipeline orchestrator module: audio in, image out.
//!
//! This module sequences the three stages and packages what each produced
//! into a single result value.
//!
//! # Architecture
//!
//! ```text
//! PipelineOrchestrator::run(audio)   ← one invocation, no shared state
//!        │
//!        ├─ Transcriber::transcribe       → Transcribing
//!        ├─ PromptSynthesizer::synthesize → PromptBuilding
//!        └─ ImageGenerator::generate      → ImageGenerating
//!               │
//!               ▼
//!        PipelineResult { transcript, image_prompt, image, failure }
//! ```
//!
//! A stage error stops the run; outputs from earlier stages stay in the
//! result so the caller can surface partial progress.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use voice_to_image::audio::AudioPayload;
//! use voice_to_image::config::AppConfig;
//! use voice_to_image::pipeline::PipelineOrchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pipeline = PipelineOrchestrator::from_config(&AppConfig::load()?)?;
//!
//!     let audio = AudioPayload::new(std::fs::read("clip.wav")?, "clip.wav");
//!     let result = pipeline.run(&audio).await;
//!
//!     if let Some(transcript) = &result.transcript {
//!         println!("heard: {transcript}");
//!     }
//!     if let Some(image) = &result.image {
//!         std::fs::write("out.png", &image.bytes)?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::PipelineOrchestrator;
pub use state::{PipelineFailure, PipelineResult, PipelineState, Stage};
