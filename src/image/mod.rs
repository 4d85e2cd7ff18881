//! Image-synthesis stage: image prompt → decoded image bytes.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                ImageGenerator (trait)                 │
//! │                                                      │
//! │   prompt ──▶ ┌───────────────────┐                    │
//! │              │ ApiImageGenerator │                    │
//! │              │ - client          │                    │
//! │              │ - model, size     │                    │
//! │              └─────────┬─────────┘                    │
//! │                        │ n=1, base64 payload          │
//! │                        ▼                              │
//! │              /v1/images/generations                   │
//! │                 b64_json → bytes                      │
//! └──────────────────────────────────────────────────────┘
//! ```

pub mod generator;

// ── Public re-exports ──────────────────────────────────────────────────────

pub use generator::{ApiImageGenerator, GeneratedImage, ImageError, ImageGenerator, ImageMetadata};

// test-only re-export so the pipeline test module can import
// MockImageGenerator directly from the stage module.
#[cfg(test)]
pub use generator::MockImageGenerator;
