//! Layered document output.
//!
//! The pipeline fixes the layer list, ordering, names and blend modes;
//! everything about the persisted bytes lives behind the
//! [`DocumentSerializer`] seam. The shipped implementation writes the
//! `.ldiv` container described in [`format`].

pub mod format;

use std::fs;
use std::path::Path;

pub use format::{read_layer, read_manifest, DocumentManifest, LayerEntry};

use crate::error::{DividerError, Result};
use crate::types::Layer;

/// Colour mode flag recorded in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Rgb,
}

impl ColorMode {
    /// Numeric code written into the container header.
    pub fn code(self) -> u8 {
        match self {
            ColorMode::Rgb => 3,
        }
    }

    /// Decode a header code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            3 => Some(ColorMode::Rgb),
            _ => None,
        }
    }
}

/// Writes an ordered layer stack to a path.
///
/// Implementations receive the stack in bottom-to-top order and must either
/// persist the whole document or fail; partial output is never usable.
pub trait DocumentSerializer {
    fn write(&self, layers: &[Layer], path: &Path) -> Result<()>;
}

/// The default serializer, producing a `.ldiv` container.
#[derive(Debug, Clone, Default)]
pub struct LdivWriter {
    pub color_mode: ColorMode,
}

impl DocumentSerializer for LdivWriter {
    fn write(&self, layers: &[Layer], path: &Path) -> Result<()> {
        let bytes = format::encode_document(layers, self.color_mode)?;

        // Single scoped write: open, write, close. No retry on failure.
        fs::write(path, bytes).map_err(|e| DividerError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write document: {}", e),
        })
    }
}
