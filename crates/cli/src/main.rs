mod args;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ffstream_core::{
    build_rtmps_url, load_config, validate_config, Config, Merger, RtmpsConfig, RtmpsStreamer,
    SanitizedConfig, Streamer,
};

use args::{Cli, Command, DEFAULT_CONFIG_PATH};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = resolve_config(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    validate_config(&config).context("Configuration validation failed")?;

    let streamer = Streamer::new(config.ffmpeg.clone());

    match &cli.command {
        Command::Check => {
            streamer.check_available().await?;
            info!("FFmpeg is available at {:?}", config.ffmpeg.path);
        }
        Command::Url { endpoint } => {
            let endpoint = endpoint.resolve(config.rtmps.as_ref());
            println!("{}", build_rtmps_url(&endpoint)?);
        }
        Command::Stream {
            input,
            endpoint,
            stream,
        } => {
            let endpoint = endpoint.resolve(config.rtmps.as_ref());
            let options = stream.resolve(&config.stream);
            RtmpsStreamer::new(streamer, endpoint)
                .stream_to_rtmps(input, &options)
                .await
                .with_context(|| format!("Streaming {:?} failed", input))?;
            info!("Streaming completed successfully");
        }
        Command::Merge {
            image,
            audio,
            output,
            merge,
        } => {
            let merge = merge.resolve(&config.merge);
            Merger::new(streamer)
                .merge_image_and_audio(image, audio, output, &merge)
                .await
                .context("Merge failed")?;
            info!("Merge completed successfully: {:?}", output);
        }
        Command::MergeStream {
            image,
            audio,
            endpoint,
            merge,
            stream,
        } => {
            let endpoint = endpoint.resolve(config.rtmps.as_ref());
            let merge = merge.resolve(&config.merge);
            let options = stream.resolve(&config.stream);
            Merger::new(streamer)
                .merge_and_stream_to_rtmps(image, audio, &endpoint, &merge, &options)
                .await
                .context("Merge and stream failed")?;
            info!("Merge and stream completed successfully");
        }
        Command::TestConnection { endpoint } => {
            let endpoint: RtmpsConfig = endpoint.resolve(config.rtmps.as_ref());
            RtmpsStreamer::new(streamer, endpoint)
                .test_connection()
                .await
                .context("RTMPS connection test failed")?;
            info!("RTMPS connection test succeeded");
        }
        Command::ShowConfig => {
            let sanitized = SanitizedConfig::from(&config);
            println!("{}", serde_json::to_string_pretty(&sanitized)?);
        }
    }

    Ok(())
}

/// Loads the explicit config file, else `ffstream.toml` if present, else defaults.
fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_PATH);
            if !default.exists() {
                info!("No config file, using defaults");
                return Ok(Config::default());
            }
            default
        }
    };

    info!("Loading configuration from {:?}", path);
    load_config(&path).with_context(|| format!("Failed to load config from {:?}", path))
}
