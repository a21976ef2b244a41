//! The divide pipeline.
//!
//! Single-pass batch transform: extract colour regions from the base image,
//! optionally fold undersized regions into the catch-all bucket, assemble the
//! layer stack, persist it, and flatten the preview composite. One invocation
//! processes one pair of images to completion; every failure aborts the
//! invocation.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::config::Config;
use crate::document::{DocumentSerializer, LdivWriter};
use crate::error::{DividerError, Result};
use crate::region::{extract_regions, merge_small_regions};
use crate::render::{build_layers, composite_preview};
use crate::types::PixelBuffer;

/// Extension of persisted documents.
pub const DOCUMENT_EXT: &str = "ldiv";

/// Everything one pipeline invocation produces.
#[derive(Debug, Clone)]
pub struct DivideOutcome {
    /// Preview composite of line art over the base image.
    pub composite: PixelBuffer,

    /// The base image, passed through unmodified.
    pub base: PixelBuffer,

    /// Number of distinct regions written, post-merge.
    pub region_count: usize,

    /// Path of the persisted layered document.
    pub document_path: PathBuf,
}

/// Run the full pipeline for one base-colour / line-art pair.
///
/// `output_dir` is resolved by the caller and passed in explicitly; it is
/// created on first use. The document lands at
/// `<output_dir>/<prefix>_<YYYYmmdd_HHMMSS>.ldiv`.
pub fn divide(
    base: &PixelBuffer,
    line_art: &PixelBuffer,
    config: &Config,
    output_dir: &Path,
) -> Result<DivideOutcome> {
    if !base.same_dimensions(line_art) {
        return Err(DividerError::Input {
            message: format!(
                "Image dimensions differ: base is {}x{}, line art is {}x{}",
                base.width(),
                base.height(),
                line_art.width(),
                line_art.height()
            ),
            help: Some("Base colour and line art images must match in size".to_string()),
        });
    }

    let regions = extract_regions(base, config.color_tolerance);
    let regions = merge_small_regions(regions, config.effective_min_region_size());
    let region_count = regions.len();

    let layers = build_layers(base, &regions, line_art, config.line_blend_mode);

    if !output_dir.exists() {
        fs::create_dir_all(output_dir).map_err(|e| DividerError::Io {
            path: output_dir.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let document_path = output_dir.join(format!(
        "{}_{}.{}",
        config.filename_prefix, timestamp, DOCUMENT_EXT
    ));

    LdivWriter::default().write(&layers, &document_path)?;

    let composite = composite_preview(base, line_art, config.line_blend_mode)?;

    Ok(DivideOutcome {
        composite,
        base: base.clone(),
        region_count,
        document_path,
    })
}
