//! Layers and blend modes.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{DividerError, Result};
use crate::types::PixelBuffer;

/// Blend mode applied when compositing a layer over the stack beneath it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    #[default]
    Multiply,
    Normal,
    Darken,
    Overlay,
}

impl BlendMode {
    /// Name used in documents and CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            BlendMode::Multiply => "multiply",
            BlendMode::Normal => "normal",
            BlendMode::Darken => "darken",
            BlendMode::Overlay => "overlay",
        }
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlendMode {
    type Err = DividerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "multiply" => Ok(BlendMode::Multiply),
            "normal" => Ok(BlendMode::Normal),
            "darken" => Ok(BlendMode::Darken),
            "overlay" => Ok(BlendMode::Overlay),
            _ => Err(DividerError::Config {
                message: format!("Unknown blend mode: {}", s),
                help: Some("Use multiply, normal, darken, or overlay".to_string()),
            }),
        }
    }
}

/// One layer of the output document.
///
/// Layers are created once by the assembler and never mutated; the serializer
/// consumes them in stack order (bottom-to-top).
#[derive(Debug, Clone)]
pub struct Layer {
    /// Layer name as written into the document.
    pub name: String,

    /// Pixel data for the layer.
    pub buffer: PixelBuffer,

    /// Visibility flag.
    pub visible: bool,

    /// Opacity (255 = fully opaque).
    pub opacity: u8,

    /// Blend mode against the layers beneath.
    pub blend_mode: BlendMode,

    /// Horizontal offset of the layer's top-left corner.
    pub left: i32,

    /// Vertical offset of the layer's top-left corner.
    pub top: i32,
}

impl Layer {
    /// Create a visible, fully opaque layer positioned at the origin.
    pub fn new(name: impl Into<String>, buffer: PixelBuffer, blend_mode: BlendMode) -> Self {
        Self {
            name: name.into(),
            buffer,
            visible: true,
            opacity: 255,
            blend_mode,
            left: 0,
            top: 0,
        }
    }
}
