//! STT (Speech-to-Text) stage module.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 Transcriber (trait)                   │
//! │                                                      │
//! │   ┌──────────────┐        ┌────────────────┐         │
//! │   │ AudioPayload │───────▶│ ApiTranscriber │         │
//! │   │ bytes + name │        │ - client       │         │
//! │   └──────────────┘        │ - model        │         │
//! │                           └───────┬────────┘         │
//! │                                   │ multipart upload │
//! │                                   ▼                  │
//! │                      /v1/audio/transcriptions        │
//! │                           text → trimmed             │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use voice_to_image::audio::AudioPayload;
//! use voice_to_image::config::ProviderConfig;
//! use voice_to_image::provider::ProviderClient;
//! use voice_to_image::stt::{ApiTranscriber, Transcriber};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = ProviderClient::from_config(&ProviderConfig::default())?;
//! let transcriber = ApiTranscriber::new(client, "whisper-1");
//!
//! let audio = AudioPayload::new(std::fs::read("clip.wav")?, "clip.wav");
//! let transcript = transcriber.transcribe(&audio).await?;
//! println!("{transcript}");
//! # Ok(())
//! # }
//! ```

pub mod transcriber;

// ── Public re-exports ──────────────────────────────────────────────────────

pub use transcriber::{normalize_transcript, ApiTranscriber, SttError, Transcriber};

// test-only re-export so the pipeline test module can import MockTranscriber
// without `use voice_to_image::stt::transcriber::MockTranscriber`.
#[cfg(test)]
pub use transcriber::MockTranscriber;
