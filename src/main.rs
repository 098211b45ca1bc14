//! imgcompare - command line front end for the comparison controller
//!
//! # Overview
//!
//! The binary stands in for the host UI: it turns its arguments into the same
//! events a page with two drop zones would produce, waits for the loads, and
//! prints what the comparison widget would be configured with.
//!
//! - positional `FILES` are one drop, delivered to `--zone` (or to no zone in
//!   particular, where only a two-file drop assigns anything)
//! - `--before` / `--after` are file-picker selections on that zone
//! - `--variant` / `--direction` are the radio selections
//!
//! # Execution Flow
//!
//! 1. Load `Compare Settings.yaml` from the config directory
//! 2. Initialize logging → <log dir>/imgcompare.<date>
//! 3. Create tokio runtime, StateManager and ComparisonController
//! 4. Deliver picker and drop events, wait for every load
//! 5. Print labels (or the full widget config as YAML) and any load notice

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use imgcompare::models::{Direction, Variant};
use imgcompare::services::ImageFile;
use imgcompare::ui::PendingLoads;
use imgcompare::{
    APP_NAME, ComparisonController, ConfigManager, SlotId, StateManager, VERSION, ZoneEvent,
};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "imgcompare", version, about = "Compare a before/after image pair")]
struct Cli {
    /// Directory holding Compare Settings.yaml
    #[arg(long, default_value = "imgcompare Data")]
    config_dir: Utf8PathBuf,

    /// Widget variant: slider, overlay or split
    #[arg(long)]
    variant: Option<Variant>,

    /// Reading direction: ltr or rtl
    #[arg(long)]
    direction: Option<Direction>,

    /// Drop zone the positional files are dropped on (before or after)
    #[arg(long, value_parser = parse_zone)]
    zone: Option<SlotId>,

    /// Pick a file for the before slot
    #[arg(long)]
    before: Option<Utf8PathBuf>,

    /// Pick a file for the after slot
    #[arg(long)]
    after: Option<Utf8PathBuf>,

    /// Print the full widget configuration as YAML
    #[arg(long)]
    yaml: bool,

    /// Debug-level logging, mirrored to stderr
    #[arg(long)]
    debug: bool,

    /// Files dropped together, in drop order
    files: Vec<Utf8PathBuf>,
}

fn parse_zone(value: &str) -> Result<SlotId, String> {
    match value.to_ascii_lowercase().as_str() {
        "before" => Ok(SlotId::Before),
        "after" => Ok(SlotId::After),
        other => Err(format!("unknown zone '{}' (expected before or after)", other)),
    }
}

/// Open every path, reporting the ones that cannot be used.
///
/// Unusable paths are skipped, the same way a browser never hands a page a
/// file it cannot read.
async fn open_files(paths: &[Utf8PathBuf]) -> Vec<ImageFile> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        match ImageFile::open(path).await {
            Ok(file) => files.push(file),
            Err(e) => {
                tracing::warn!("Skipping {}: {}", path, e);
                eprintln!("warning: {}", e);
            }
        }
    }
    files
}

/// Picker event for a path, or nothing when the path cannot be opened.
///
/// An unreadable path was already reported by `open_files`; it is not a
/// cancelled pick.
async fn pick(path: &Utf8PathBuf) -> Option<ZoneEvent> {
    open_files(std::slice::from_ref(path))
        .await
        .pop()
        .map(|file| ZoneEvent::Pick(Some(file)))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_manager = ConfigManager::new(&cli.config_dir)?;
    let user_config = config_manager.load_user_config()?;
    let mut settings = user_config.compare_settings;
    settings.debug_mode |= cli.debug;

    let _log_guard = imgcompare::logging::setup_logging_with_console(
        &settings.log_dir,
        APP_NAME,
        settings.debug_mode,
        cli.debug,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(2)
        .thread_name("imgcompare-loader")
        .build()
        .context("Failed to build tokio runtime")?;

    let state_manager = Arc::new(StateManager::from_settings(&settings));
    let controller = ComparisonController::new(state_manager, &settings, runtime.handle().clone())?;

    if let Some(variant) = cli.variant {
        controller.set_variant(variant);
    }
    if let Some(direction) = cli.direction {
        controller.set_direction(direction);
    }

    runtime.block_on(async {
        let mut pending: Vec<PendingLoads> = Vec::new();

        for (zone, path) in [(SlotId::Before, &cli.before), (SlotId::After, &cli.after)] {
            let Some(path) = path else { continue };
            if let Some(event) = pick(path).await {
                pending.push(controller.handle_zone_event(zone, event).loads);
            }
        }

        if !cli.files.is_empty() {
            let files = open_files(&cli.files).await;
            let loads = match cli.zone {
                Some(zone) => controller.handle_zone_event(zone, ZoneEvent::Drop(files)).loads,
                None => controller.ingest(files, None),
            };
            if loads.is_empty() {
                eprintln!(
                    "note: dropped {} file(s) without assigning any (drop one file on a --zone, or exactly two)",
                    cli.files.len()
                );
            }
            pending.push(loads);
        }

        for loads in pending {
            loads.wait().await;
        }
    });

    let view = controller.view_model();
    if let Some(notice) = &view.notice {
        eprintln!("error: {}", notice);
    }

    if cli.yaml {
        let yaml = serde_yaml_ng::to_string(&view.widget)
            .context("Failed to serialize widget configuration")?;
        print!("{}", yaml);
    } else {
        println!("{}", view.widget.label_before);
        println!("{}", view.widget.label_after);
    }

    controller.metrics().log_summary();
    runtime.shutdown_timeout(std::time::Duration::from_secs(5));
    tracing::info!("Shutdown complete");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_unreadable_pick_delivers_no_event() {
        let temp_dir = TempDir::new().unwrap();
        let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();

        assert!(pick(&dir.join("missing.png")).await.is_none());
        assert!(pick(&dir).await.is_none());
    }

    #[tokio::test]
    async fn test_readable_pick_carries_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(temp_dir.path().join("photo.png")).unwrap();
        std::fs::write(&path, [0u8; 16]).unwrap();

        let event = pick(&path).await;
        assert!(matches!(event, Some(ZoneEvent::Pick(Some(file))) if file.name() == "photo.png"));
    }

    #[test]
    fn test_parse_zone() {
        assert_eq!(parse_zone("Before"), Ok(SlotId::Before));
        assert_eq!(parse_zone("after"), Ok(SlotId::After));
        assert!(parse_zone("middle").is_err());
    }
}
