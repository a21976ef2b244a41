//! Init command implementation.
//!
//! Generates a `layerdiv.yaml` with the default options spelled out.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::config::{Config, CONFIG_FILENAME};
use crate::error::{DividerError, Result};
use crate::output::{display_path, Printer};

/// Initialize a layerdiv project by generating a layerdiv.yaml
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing layerdiv.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let config_path = args.path.join(CONFIG_FILENAME);

    if config_path.exists() && !args.force {
        return Err(DividerError::Config {
            message: format!("{} already exists", CONFIG_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    // Build YAML manually for clean formatting and comments
    let defaults = Config::default();
    let yaml = format!(
        "# Per-channel colour grouping tolerance (0-50)\n\
         color_tolerance: {}\n\
         # Blend mode for the line-art layer: multiply | normal | darken | overlay\n\
         line_blend_mode: {}\n\
         # Fold undersized regions into a single catch-all layer\n\
         merge_small_regions: {}\n\
         # Pixel-count threshold for merging (10-1000)\n\
         min_region_size: {}\n\
         # Where documents are written\n\
         output: {}\n\
         filename_prefix: {}\n",
        defaults.color_tolerance,
        defaults.line_blend_mode,
        defaults.merge_small_regions,
        defaults.min_region_size,
        defaults.output.display(),
        defaults.filename_prefix,
    );

    fs::write(&config_path, &yaml).map_err(|e| DividerError::Io {
        path: config_path.clone(),
        message: format!("Failed to write config: {}", e),
    })?;

    printer.success("Created", &display_path(&config_path));

    Ok(())
}
