//! Voice-to-Image pipeline — audio → transcript → image prompt → image.
//!
//! # Architecture
//!
//! ```text
//! AudioPayload
//!      │
//!      ▼
//! PipelineOrchestrator::run()
//!      │
//!      ├─ Transcriber::transcribe        (stt)      → transcript
//!      ├─ PromptSynthesizer::synthesize  (prompt)   → image prompt
//!      │     └─ three-tier fallback ladder; the last tier is a local
//!      │       template and cannot fail
//!      └─ ImageGenerator::generate       (image)    → image bytes + metadata
//!      │
//!      ▼
//! PipelineResult  (partial results preserved on failure)
//! ```
//!
//! All three stages talk to a single hosted provider through
//! [`provider::ProviderClient`]; credentials come from the configuration or
//! the `OPENAI_API_KEY` environment variable.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use voice_to_image::audio::AudioPayload;
//! use voice_to_image::config::AppConfig;
//! use voice_to_image::pipeline::PipelineOrchestrator;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let orchestrator = PipelineOrchestrator::from_config(&config)
//!         .expect("no API key configured");
//!
//!     let audio = AudioPayload::new(std::fs::read("voice.wav").unwrap(), "voice.wav");
//!     let result = orchestrator.run(&audio).await;
//!
//!     if let Some(image) = &result.image {
//!         std::fs::write("out.png", &image.bytes).unwrap();
//!     }
//! }
//! ```

pub mod audio;
pub mod config;
pub mod image;
pub mod pipeline;
pub mod prompt;
pub mod provider;
pub mod stt;
