//! Configuration module for the voice-to-image pipeline.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for the provider
//! connection and stage models, `AppPaths` for cross-platform config
//! directories, and TOML persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, ImageSize, ModelConfig, ProviderConfig};
