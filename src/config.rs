//! Pipeline configuration (layerdiv.yaml).
//!
//! Recognized options, their defaults, and range validation. Validation
//! happens here at the CLI boundary; the core pipeline assumes pre-validated
//! values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DividerError, Result};
use crate::types::BlendMode;

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "layerdiv.yaml";

/// Maximum accepted colour tolerance.
pub const TOLERANCE_MAX: u8 = 50;

/// Accepted bounds for the small-region threshold.
pub const MIN_REGION_SIZE_RANGE: std::ops::RangeInclusive<usize> = 10..=1000;

/// Pipeline configuration loaded from layerdiv.yaml and/or CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Per-channel grouping threshold (0-50).
    pub color_tolerance: u8,

    /// Blend mode for the top line-art layer and the preview.
    pub line_blend_mode: BlendMode,

    /// Whether undersized regions are folded into the catch-all bucket.
    pub merge_small_regions: bool,

    /// Pixel-count threshold for merging (10-1000).
    pub min_region_size: usize,

    /// Output directory for persisted documents.
    pub output: PathBuf,

    /// Filename prefix for persisted documents.
    pub filename_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color_tolerance: 10,
            line_blend_mode: BlendMode::Multiply,
            merge_small_regions: true,
            min_region_size: 100,
            output: PathBuf::from("output"),
            filename_prefix: "rgb_divided".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DividerError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| DividerError::Config {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })
    }

    /// Reject out-of-range option values.
    pub fn validate(&self) -> Result<()> {
        if self.color_tolerance > TOLERANCE_MAX {
            return Err(DividerError::Config {
                message: format!(
                    "color_tolerance {} is out of range",
                    self.color_tolerance
                ),
                help: Some(format!("Use a value between 0 and {}", TOLERANCE_MAX)),
            });
        }

        if !MIN_REGION_SIZE_RANGE.contains(&self.min_region_size) {
            return Err(DividerError::Config {
                message: format!(
                    "min_region_size {} is out of range",
                    self.min_region_size
                ),
                help: Some(format!(
                    "Use a value between {} and {}",
                    MIN_REGION_SIZE_RANGE.start(),
                    MIN_REGION_SIZE_RANGE.end()
                )),
            });
        }

        Ok(())
    }

    /// Effective merge threshold: 0 when merging is disabled, which the
    /// filter treats as pass-through.
    pub fn effective_min_region_size(&self) -> usize {
        if self.merge_small_regions {
            self.min_region_size
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.color_tolerance, 10);
        assert_eq!(config.line_blend_mode, BlendMode::Multiply);
        assert!(config.merge_small_regions);
        assert_eq!(config.min_region_size, 100);
        assert_eq!(config.output, PathBuf::from("output"));
        assert_eq!(config.filename_prefix, "rgb_divided");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_yaml_fills_defaults() {
        let config = Config::parse("color_tolerance: 25\nline_blend_mode: darken\n").unwrap();

        assert_eq!(config.color_tolerance, 25);
        assert_eq!(config.line_blend_mode, BlendMode::Darken);
        assert_eq!(config.min_region_size, 100);
    }

    #[test]
    fn test_parse_invalid_yaml() {
        assert!(Config::parse("color_tolerance: [oops").is_err());
        assert!(Config::parse("line_blend_mode: screen").is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut config = Config::default();
        config.color_tolerance = 51;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.min_region_size = 9;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.min_region_size = 1001;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.min_region_size = 1000;
        config.color_tolerance = 50;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_effective_min_region_size() {
        let mut config = Config::default();
        assert_eq!(config.effective_min_region_size(), 100);

        config.merge_small_regions = false;
        assert_eq!(config.effective_min_region_size(), 0);
    }
}
