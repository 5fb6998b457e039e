//! Subcue command-line driver.
//!
//! Runs the preview engine without a rendering surface: font-size lookups,
//! one-shot previews, command replay, and burn-in / SRT export.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use subcue_lib::core::captions::{
    export_srt, parse_segments, Segment, SegmentFormat, StyleConfig,
};
use subcue_lib::core::fs::{atomic_write_json_pretty, atomic_write_text};
use subcue_lib::core::playback::Seeker;
use subcue_lib::core::render::{
    build_ass_script, preview_font_size, video_font_size, RenderSurface,
};
use subcue_lib::core::settings::StyleFile;
use subcue_lib::core::sync::SubtitleSyncEngine;
use subcue_lib::core::TimeSec;
use subcue_lib::ipc::{dispatch, EngineCommand, JsonLinesSink, RenderStylePayload};

#[derive(Parser, Debug)]
#[command(
    name = "subcue",
    version,
    about = "Headless subtitle preview, command replay and burn-in script generation"
)]
struct Cli {
    /// Also write logs to daily-rotated files in this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Segments file: SubRip (.srt) or JSON array of {start, end, text}
    #[arg(long)]
    segments: PathBuf,

    /// Style JSON file (missing keys take defaults)
    #[arg(long)]
    style: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SurfaceArgs {
    /// Width of the on-screen media element in pixels
    #[arg(long, default_value_t = 640)]
    preview_width: i64,

    /// Width of the burned-in output frame in pixels
    #[arg(long, default_value_t = 1280)]
    target_width: i64,

    /// Height of the burned-in output frame in pixels
    #[arg(long, default_value_t = 720)]
    target_height: i64,
}

impl SurfaceArgs {
    fn surface(&self) -> RenderSurface {
        RenderSurface::new(self.preview_width, self.target_width, self.target_height)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the font size for a nominal size at a render width
    FontSize {
        #[arg(long)]
        nominal: f64,
        #[arg(long)]
        target_width: i64,
        #[arg(long)]
        preview_width: Option<i64>,
    },
    /// Print the view model at one playback time
    Preview {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long)]
        time: TimeSec,
        #[command(flatten)]
        surface: SurfaceArgs,
    },
    /// Apply JSON-lines engine commands and print the emitted events
    Replay {
        #[command(flatten)]
        input: InputArgs,
        /// Command file, or "-" for stdin
        #[arg(long, default_value = "-")]
        events: String,
        #[command(flatten)]
        surface: SurfaceArgs,
    },
    /// Write the ASS burn-in script (and optionally the backend payload)
    Burn {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long)]
        width: i64,
        #[arg(long)]
        height: i64,
        #[arg(long)]
        output: PathBuf,
        /// Where to write the render style payload JSON
        #[arg(long)]
        payload: Option<PathBuf>,
    },
    /// Write formatted SubRip subtitles
    ExportSrt {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long)]
        output: PathBuf,
    },
}

// =============================================================================
// Logging
// =============================================================================

fn init_logging(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    use tracing_subscriber::prelude::*;

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    // stdout carries command output, so logs go to stderr
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(cfg!(debug_assertions));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let _ = std::fs::create_dir_all(dir);
            let file_appender = tracing_appender::rolling::daily(dir, "subcue.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer);

    let _ = tracing::subscriber::set_global_default(subscriber);
    guard
}

// =============================================================================
// Inputs
// =============================================================================

async fn load_segments(path: &Path) -> Result<Vec<Segment>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read segments from {}", path.display()))?;

    let segments = parse_segments(&content, SegmentFormat::from_path(path))
        .with_context(|| format!("Invalid segments file {}", path.display()))?;

    info!("Loaded {} segments from {}", segments.len(), path.display());
    Ok(segments)
}

fn load_style(path: Option<&Path>) -> StyleConfig {
    match path {
        Some(path) => StyleFile::new(path).load(),
        None => StyleConfig::default(),
    }
}

async fn load_input(input: &InputArgs) -> Result<(Vec<Segment>, StyleConfig)> {
    let segments = load_segments(&input.segments).await?;
    Ok((segments, load_style(input.style.as_deref())))
}

/// The CLI has no player; seeks are only logged
struct LoggingSeeker;

impl Seeker for LoggingSeeker {
    fn seek(&mut self, time: TimeSec) {
        info!("Seek requested to {:.3}s", time);
    }
}

// =============================================================================
// Commands
// =============================================================================

async fn replay<R: AsyncBufRead + Unpin>(engine: &mut SubtitleSyncEngine, reader: R) -> Result<usize> {
    let mut lines = reader.lines();
    let mut sink = JsonLinesSink::new(std::io::stdout());
    let mut seeker = LoggingSeeker;
    let mut applied = 0;
    let mut line_no = 0;

    while let Some(line) = lines.next_line().await.context("Failed to read command")? {
        line_no += 1;
        if line.trim().is_empty() {
            continue;
        }

        let command: EngineCommand = match serde_json::from_str(&line) {
            Ok(command) => command,
            Err(e) => {
                warn!("Skipping line {}: {}", line_no, e);
                continue;
            }
        };

        dispatch(engine, command, &mut seeker, &mut sink)
            .with_context(|| format!("Failed to emit events for line {}", line_no))?;
        applied += 1;
    }

    Ok(applied)
}

async fn run(command: Command) -> Result<()> {
    match command {
        Command::FontSize {
            nominal,
            target_width,
            preview_width,
        } => {
            let video = video_font_size(nominal, target_width)?;
            let preview = preview_width
                .map(|width| preview_font_size(nominal, width, target_width))
                .transpose()?;
            let output = json!({
                "videoFontSize": video,
                "previewFontSize": preview,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Preview {
            input,
            time,
            surface,
        } => {
            let (segments, style) = load_input(&input).await?;
            let mut engine = SubtitleSyncEngine::new(segments, style, surface.surface());
            let view = engine.on_time_update(time);
            println!("{}", serde_json::to_string_pretty(view)?);
        }
        Command::Replay {
            input,
            events,
            surface,
        } => {
            let (segments, style) = load_input(&input).await?;
            let mut engine = SubtitleSyncEngine::new(segments, style, surface.surface());

            let applied = if events == "-" {
                replay(&mut engine, BufReader::new(tokio::io::stdin())).await?
            } else {
                let file = tokio::fs::File::open(&events)
                    .await
                    .with_context(|| format!("Failed to open command file {}", events))?;
                replay(&mut engine, BufReader::new(file)).await?
            };
            info!("Replayed {} commands", applied);
        }
        Command::Burn {
            input,
            width,
            height,
            output,
            payload,
        } => {
            let (segments, style) = load_input(&input).await?;
            let script = build_ass_script(&segments, &style, width, height)?;
            atomic_write_text(&output, &script)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!("Burn-in script written to {}", output.display());

            if let Some(path) = payload {
                let payload = RenderStylePayload::new(style, width, height)?;
                atomic_write_json_pretty(&path, &payload)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!(
                    "Render payload written to {} (font {}px)",
                    path.display(),
                    payload.effective_font_size()?
                );
            }
        }
        Command::ExportSrt { input, output } => {
            let (segments, style) = load_input(&input).await?;
            if segments.is_empty() {
                bail!("No segments to export");
            }
            let srt = export_srt(&segments, &style.normalized());
            atomic_write_text(&output, &srt)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!("SubRip written to {}", output.display());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.log_dir.as_deref());
    run(cli.command).await
}
