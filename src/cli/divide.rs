//! Divide command implementation.
//!
//! Loads the two input images, resolves configuration (file, then CLI
//! overrides), runs the pipeline and reports the outcome.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::{Config, CONFIG_FILENAME};
use crate::error::{DividerError, Result};
use crate::output::{display_path, plural, Printer};
use crate::pipeline::{divide, DivideOutcome};
use crate::types::{BlendMode, PixelBuffer};

/// Divide a base-colour image into per-colour layers under its line art
#[derive(Args, Debug)]
pub struct DivideArgs {
    /// Flat base-colour image
    pub base_color: PathBuf,

    /// Line-art image
    pub line_art: PathBuf,

    /// Per-channel colour grouping tolerance (0-50)
    #[arg(long, short = 't')]
    pub tolerance: Option<u8>,

    /// Blend mode for the line-art layer
    #[arg(long, value_enum)]
    pub blend_mode: Option<BlendMode>,

    /// Disable folding of undersized regions into the catch-all layer
    #[arg(long)]
    pub no_merge_small: bool,

    /// Pixel-count threshold below which regions are merged (10-1000)
    #[arg(long)]
    pub min_region_size: Option<usize>,

    /// Output directory for the document
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Filename prefix for the document
    #[arg(long)]
    pub prefix: Option<String>,

    /// Configuration file (default: layerdiv.yaml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Also write the composite preview to this PNG path
    #[arg(long)]
    pub preview: Option<PathBuf>,
}

pub fn run(args: DivideArgs, printer: &Printer) -> Result<()> {
    let config = resolve_config(&args)?;
    config.validate()?;

    let base = PixelBuffer::open(&args.base_color)?;
    let line_art = PixelBuffer::open(&args.line_art)?;

    printer.status(
        "Dividing",
        &format!(
            "{} ({}x{}, tolerance {})",
            display_path(&args.base_color),
            base.width(),
            base.height(),
            config.color_tolerance
        ),
    );

    let outcome = divide(&base, &line_art, &config, &config.output)?;

    report(&outcome, printer);

    if let Some(preview_path) = &args.preview {
        write_preview(&outcome, preview_path)?;
        printer.info("Preview", &display_path(preview_path));
    }

    Ok(())
}

/// Layer a config file under the CLI flag overrides.
fn resolve_config(args: &DivideArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => {
            let default_path = Path::new(CONFIG_FILENAME);
            if default_path.exists() {
                Config::load(default_path)?
            } else {
                Config::default()
            }
        }
    };

    if let Some(tolerance) = args.tolerance {
        config.color_tolerance = tolerance;
    }
    if let Some(mode) = args.blend_mode {
        config.line_blend_mode = mode;
    }
    if args.no_merge_small {
        config.merge_small_regions = false;
    }
    if let Some(min_size) = args.min_region_size {
        config.min_region_size = min_size;
    }
    if let Some(output) = &args.output {
        config.output = output.clone();
    }
    if let Some(prefix) = &args.prefix {
        config.filename_prefix = prefix.clone();
    }

    Ok(config)
}

fn report(outcome: &DivideOutcome, printer: &Printer) {
    printer.info(
        "Regions",
        &plural(outcome.region_count, "colour region", "colour regions"),
    );
    printer.success("Wrote", &display_path(&outcome.document_path));
}

fn write_preview(outcome: &DivideOutcome, path: &Path) -> Result<()> {
    outcome
        .composite
        .to_rgba_image()
        .save(path)
        .map_err(|e| DividerError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write preview PNG: {}", e),
        })
}
