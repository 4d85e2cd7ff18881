//! Application entry point — voice-to-image CLI.
//!
//! Startup sequence:
//!
//! 1. Load `.env` if present and initialise logging.
//! 2. Parse command-line arguments.
//! 3. Load the configuration file (defaults on first run) and fold
//!    command-line overrides into it.
//! 4. Read the audio file into an [`AudioPayload`].
//! 5. Assemble the pipeline (API key resolution happens here).
//! 6. Run the pipeline and write the image to the output path.
//!
//! Partial results are printed even when a stage fails: a run that
//! transcribes fine but dies generating the image still shows the
//! transcript and the synthesized prompt before exiting non-zero.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use voice_to_image::audio::AudioPayload;
use voice_to_image::config::{AppConfig, ImageSize};
use voice_to_image::pipeline::PipelineOrchestrator;

/// Turn a voice message into a generated image.
#[derive(Parser, Debug)]
#[command(
    name = "voice-to-image",
    version,
    about = "Transcribe a voice message, derive an image prompt, and generate the image"
)]
struct Cli {
    /// Audio file to process (wav, mp3, m4a, ogg or webm)
    #[arg(value_name = "AUDIO")]
    audio: PathBuf,

    /// Where to write the generated image
    #[arg(short, long, value_name = "PATH", default_value = "generated.png")]
    out: PathBuf,

    /// Configuration file (default: the platform config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// API key (overrides the config file and the environment)
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,

    /// Speech-to-text model
    #[arg(long, value_name = "MODEL")]
    transcription_model: Option<String>,

    /// Chat model used to synthesize the image prompt
    #[arg(long, value_name = "MODEL")]
    prompt_model: Option<String>,

    /// Image generation model
    #[arg(long, value_name = "MODEL")]
    image_model: Option<String>,

    /// Image size: 512x512, 768x768 or 1024x1024
    #[arg(long, value_name = "SIZE")]
    size: Option<ImageSize>,
}

impl Cli {
    /// Folds command-line overrides into a loaded configuration.
    fn apply_to(&self, config: &mut AppConfig) {
        if let Some(key) = &self.api_key {
            config.provider.api_key = Some(key.clone());
        }
        if let Some(model) = &self.transcription_model {
            config.models.transcription = model.clone();
        }
        if let Some(model) = &self.prompt_model {
            config.models.prompt = model.clone();
        }
        if let Some(model) = &self.image_model {
            config.models.image = model.clone();
        }
        if let Some(size) = self.size {
            config.image_size = size;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config ({e}); using defaults");
            AppConfig::default()
        }),
    };
    cli.apply_to(&mut config);

    let bytes = std::fs::read(&cli.audio)
        .with_context(|| format!("failed to read audio file {}", cli.audio.display()))?;
    let filename = cli
        .audio
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let audio = AudioPayload::new(bytes, filename);
    log::info!(
        "voice-to-image starting ({}, {} bytes)",
        audio.filename(),
        audio.bytes().len()
    );

    let pipeline = PipelineOrchestrator::from_config(&config)?;
    let result = pipeline.run(&audio).await;

    if let Some(transcript) = &result.transcript {
        println!("transcript: {transcript}");
    }
    if let Some(prompt) = &result.image_prompt {
        println!("image prompt: {prompt}");
    }

    match (result.image, result.failure) {
        (Some(image), None) => {
            std::fs::write(&cli.out, &image.bytes)
                .with_context(|| format!("failed to write image to {}", cli.out.display()))?;
            println!(
                "image: {} ({} bytes, model {}, size {})",
                cli.out.display(),
                image.bytes.len(),
                image.metadata.model,
                image.metadata.size
            );
            Ok(())
        }
        (_, Some(failure)) => Err(anyhow::anyhow!("{failure}")),
        // Unreachable by construction: a result carries an image or a failure.
        (None, None) => Err(anyhow::anyhow!("pipeline produced neither image nor failure")),
    }
}
