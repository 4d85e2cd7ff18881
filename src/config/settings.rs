//! Pipeline settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// ImageSize
// ---------------------------------------------------------------------------

/// Resolution of the generated image.
///
/// The provider accepts a small enumerated set of square sizes; larger
/// resolutions produce richer images at the cost of generation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSize {
    /// 512 × 512 pixels — fastest.
    #[serde(rename = "512x512")]
    Square512,
    /// 768 × 768 pixels.
    #[serde(rename = "768x768")]
    Square768,
    /// 1024 × 1024 pixels — best quality (default).
    #[serde(rename = "1024x1024")]
    Square1024,
}

impl ImageSize {
    /// The size specifier string the provider's image endpoint expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Square512 => "512x512",
            ImageSize::Square768 => "768x768",
            ImageSize::Square1024 => "1024x1024",
        }
    }
}

impl Default for ImageSize {
    fn default() -> Self {
        Self::Square1024
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageSize {
    type Err = String;

    /// Parse a size specifier such as `"1024x1024"` (used by the CLI).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "512x512" => Ok(ImageSize::Square512),
            "768x768" => Ok(ImageSize::Square768),
            "1024x1024" => Ok(ImageSize::Square1024),
            other => Err(format!(
                "unknown image size {other:?} (expected 512x512, 768x768 or 1024x1024)"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// ProviderConfig
// ---------------------------------------------------------------------------

/// Connection settings for the hosted capability provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the provider API (default: `https://api.openai.com`).
    pub base_url: String,
    /// API key — `None` falls back to the `OPENAI_API_KEY` environment
    /// variable when the pipeline is assembled.
    pub api_key: Option<String>,
    /// Maximum seconds to wait for any single provider call before timing
    /// out.  Applied uniformly to all three stages.
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".into(),
            api_key: None,
            timeout_secs: 120,
        }
    }
}

// ---------------------------------------------------------------------------
// ModelConfig
// ---------------------------------------------------------------------------

/// Model identifiers sent to the provider, one per pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Audio transcription model (e.g. `"whisper-1"`).
    pub transcription: String,
    /// Chat model that rewrites the transcript into an image prompt
    /// (e.g. `"gpt-4o-mini"`).
    pub prompt: String,
    /// Image generation model (e.g. `"gpt-image-1"`).
    pub image: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            transcription: "whisper-1".into(),
            prompt: "gpt-4o-mini".into(),
            image: "gpt-image-1".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level pipeline configuration, serialised as `settings.toml`.
///
/// Handed to the pipeline once at assembly time and never mutated while a
/// run is in flight.
///
/// # Persistence
///
/// ```rust,no_run
/// use voice_to_image::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Provider connection settings.
    pub provider: ProviderConfig,
    /// Per-stage model identifiers.
    pub models: ModelConfig,
    /// Resolution of the generated image.
    pub image_size: ImageSize,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
