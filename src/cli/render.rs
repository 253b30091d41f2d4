//! Render command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::domain::Report;
use crate::input::load_report;
use crate::render::{render_map, MapFormat};

/// Base name used when the output path is an existing directory.
const DEFAULT_MAP_STEM: &str = "Mapping";

#[derive(Args)]
pub struct RenderArgs {
    /// Report document (.json, .yaml or .yml)
    #[arg(value_name = "REPORT")]
    pub report: PathBuf,

    /// Map format [default: text]
    #[arg(short, long, value_enum)]
    pub format: Option<MapFormat>,

    /// Write the map here instead of stdout; a directory receives Mapping.<ext>
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Config file (TOML or YAML); discovered in the working directory otherwise
    #[arg(short, long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Write the destination in place instead of replacing it atomically
    #[arg(long)]
    pub no_atomic: bool,
}

pub fn run(args: RenderArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let file_config = load_config(&cwd, args.config.as_deref())?;
    let config = merge_cli_with_config(
        file_config,
        CliOverrides {
            format: args.format,
            output: args.output.clone(),
            atomic_write: if args.no_atomic { Some(false) } else { None },
        },
    );

    let report = load_report(&args.report)?;

    match config.output {
        Some(output) => {
            let path = resolve_output_path(&output, config.format);
            write_map_file(&path, config.format, &report, config.atomic_write)?;
            tracing::info!(path = %path.display(), format = %config.format, "map written");
            eprintln!("Map written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            render_map(config.format, &report, BufWriter::new(stdout.lock()))
                .context("Failed writing map to stdout")?;
        }
    }
    Ok(())
}

fn resolve_output_path(output: &Path, format: MapFormat) -> PathBuf {
    if output.is_dir() {
        output.join(format!("{}.{}", DEFAULT_MAP_STEM, format.extension()))
    } else {
        output.to_path_buf()
    }
}

fn write_map_file(path: &Path, format: MapFormat, report: &Report, atomic: bool) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed creating output directory: {}", dir.display()))?;

    if !atomic {
        let file = File::create(path)
            .with_context(|| format!("Failed creating map file: {}", path.display()))?;
        render_map(format, report, BufWriter::new(file))
            .with_context(|| format!("Failed writing map file: {}", path.display()))?;
        return Ok(());
    }

    // The destination is only replaced once the whole map rendered.
    let mut tmp = NamedTempFile::new_in(&dir)
        .with_context(|| format!("Failed creating temporary file in {}", dir.display()))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        render_map(format, report, &mut writer)
            .with_context(|| format!("Failed writing map file: {}", path.display()))?;
        writer.flush()?;
    }
    tmp.persist(path).with_context(|| format!("Failed replacing {}", path.display()))?;
    Ok(())
}
