use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use bytes::Bytes;
use clap::{Arg, ArgAction, Command};
use log::{debug, info};

use crate::asset::SourceAsset;
use crate::config::EngineConfig;
use crate::pipeline::{ConversionEngine, EngineEvent, default_stages};
use crate::playback::{PlaybackPair, ViewId};
use crate::utils::string::format_seconds;
use crate::wizard::Wizard;

pub mod asset;
pub mod config;
pub mod pipeline;
pub mod playback;
pub mod utils;
pub mod wizard;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let matches = Command::new(config::app_name())
        .version(config::version())
        .author(env!("CARGO_PKG_AUTHORS"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .help("The 2D video file to convert.")
                .required(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Emit progress snapshots as JSON lines.")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let input = matches
        .get_one::<String>("input")
        .context("missing input file")?;
    let as_json = matches.get_flag("json");

    let name = Path::new(input)
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("invalid input path: {}", input))?
        .to_owned();
    let data = tokio::fs::read(input)
        .await
        .with_context(|| format!("failed to read {}", input))?;
    let asset = SourceAsset::new(name, Bytes::from(data));

    let mut wizard = Wizard::new();
    wizard.accept_upload(asset.clone())?;

    // Processing view: run the staged engine to completion
    let started = Instant::now();
    let (mut engine, mut events) = ConversionEngine::new(EngineConfig::default());
    engine.start(default_stages())?;

    while let Some(event) = events.recv().await {
        match event {
            EngineEvent::Progress(snapshot) => {
                if as_json {
                    println!("{}", serde_json::to_string(&snapshot)?);
                } else {
                    debug!("overall progress {:.1}%", snapshot.overall_progress);
                }
            }
            EngineEvent::StageCompleted { index, name } => {
                info!("stage {} completed: {}", index + 1, name);
            }
            EngineEvent::Completed => break,
        }
    }
    info!(
        "conversion finished in {}",
        format_seconds(started.elapsed().as_secs())
    );

    // Preview view: both eyes bound to the same asset, one play intent
    wizard.conversion_complete()?;
    let mut pair = PlaybackPair::bind(&asset);
    pair.toggle();
    info!(
        "previewing '{}' (playing: {})",
        pair.left().asset_name(),
        pair.is_playing()
    );
    pair.on_ended(ViewId::Left);

    // Download view: derive the artifact name from the upload
    wizard.to_download()?;
    info!(
        "ready to save {} ({})",
        wizard.download_name()?,
        asset.display_size()
    );

    Ok(())
}
