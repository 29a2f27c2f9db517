//! Headless command-line front end for annotation files.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use annotate::config::{AppConfig, LogLevel};
use annotate::format::{AnnotationFile, FormatRegistry};
use annotate::tools::{Editor, InputEvent};

#[derive(Debug, Parser)]
#[command(name = "annotate")]
#[command(about = "Inspect, replay and export image annotations")]
struct Cli {
    /// Configuration file (defaults to the user config directory).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log verbosity: error, warn, info, debug or trace.
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print a machine-readable summary of an annotation file.
    Info {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Export annotation files to a training format.
    Export {
        /// Format id (json, yolo, coco).
        #[arg(long)]
        format: String,
        #[arg(long, value_name = "DIR")]
        output: PathBuf,
        /// Image width for files that do not record one.
        #[arg(long)]
        width: Option<u32>,
        /// Image height for files that do not record one.
        #[arg(long)]
        height: Option<u32>,
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,
    },
    /// Feed recorded input events through the editor and save the result.
    Replay {
        /// JSON list of input events.
        #[arg(long, value_name = "FILE")]
        events: PathBuf,
        /// Where to write the result (prints to stdout when omitted).
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Debug, Serialize)]
struct InfoOutput {
    path: String,
    name: String,
    width: Option<u32>,
    height: Option<u32>,
    annotation_count: usize,
    by_kind: BTreeMap<&'static str, usize>,
}

fn main() {
    if let Err(error) = run(std::env::args_os()) {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);
    let config = load_config(cli.config.as_deref())?;

    let level = cli.log_level.unwrap_or(config.preferences.log_level);
    env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Info { file } => run_info(&file),
        Commands::Export {
            format,
            output,
            width,
            height,
            files,
        } => run_export(&config, &format, &output, width.zip(height), &files),
        Commands::Replay {
            events,
            output,
            file,
        } => run_replay(&config, &events, output.as_deref(), &file),
    }
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load_from_path(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => match AppConfig::default_path() {
            Ok(path) => AppConfig::load_or_default(&path)
                .with_context(|| format!("failed to load config from {}", path.display())),
            Err(_) => Ok(AppConfig::default()),
        },
    }
}

fn load_file(path: &Path) -> Result<AnnotationFile> {
    AnnotationFile::load(path)
        .with_context(|| format!("failed to read annotation file {}", path.display()))
}

fn run_info(path: &Path) -> Result<()> {
    let file = load_file(path)?;

    let mut by_kind = BTreeMap::new();
    for object in &file.annotations {
        *by_kind.entry(object.kind().name()).or_insert(0) += 1;
    }

    let payload = InfoOutput {
        path: path.display().to_string(),
        name: file.name.clone(),
        width: file.width,
        height: file.height,
        annotation_count: file.annotations.len(),
        by_kind,
    };
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn run_export(
    config: &AppConfig,
    format_id: &str,
    output: &Path,
    fallback_size: Option<(u32, u32)>,
    paths: &[PathBuf],
) -> Result<()> {
    let formats = FormatRegistry::new();
    let format = formats.require(format_id)?;

    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        let mut file = load_file(path)?;
        if file.dimensions().is_none()
            && let Some((width, height)) = fallback_size
        {
            file = file.with_dimensions(width, height);
        }
        images.push(file);
    }

    let result = format
        .export(&images, &config.classes, output)
        .with_context(|| format!("failed to export to {}", output.display()))?;

    if result.has_warnings() {
        eprintln!("{} warning(s), see log output", result.warnings.len());
    }
    for path in &result.files_created {
        println!("{}", path.display());
    }
    Ok(())
}

fn run_replay(
    config: &AppConfig,
    events_path: &Path,
    output: Option<&Path>,
    path: &Path,
) -> Result<()> {
    let file = load_file(path)?;

    let json = std::fs::read_to_string(events_path)
        .with_context(|| format!("failed to read events from {}", events_path.display()))?;
    let events: Vec<InputEvent> = serde_json::from_str(&json)
        .with_context(|| format!("invalid event list in {}", events_path.display()))?;

    let mut editor = Editor::new(config.classes.clone());
    editor.set_zoom(config.preferences.zoom);
    editor.load_file(&file);
    for event in &events {
        editor.handle_event(event);
    }
    log::info!(
        "Replayed {} events, {} annotations",
        events.len(),
        editor.store().len()
    );

    let mut result = editor.to_annotation_file(&file.name);
    if file.dimensions().is_none() {
        result.width = None;
        result.height = None;
    }

    match output {
        Some(output) => result
            .save(output)
            .with_context(|| format!("failed to write {}", output.display()))?,
        None => println!("{}", result.to_json()?),
    }
    Ok(())
}
