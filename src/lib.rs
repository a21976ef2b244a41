//! layerdiv - RGB region layer divider
//!
//! A library for dividing a flat-coloured base image plus a line-art overlay
//! into disjoint same-colour pixel regions, each exported as an independent
//! layer of a layered image document.

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod region;
pub mod render;
pub mod types;

pub use config::{Config, CONFIG_FILENAME};
pub use document::{read_manifest, ColorMode, DocumentSerializer, LdivWriter};
pub use error::{DividerError, Result};
pub use pipeline::{divide, DivideOutcome};
pub use region::{extract_regions, merge_small_regions, RegionKey, RegionMap};
pub use render::{build_layers, composite_preview, BACKGROUND_LAYER, LINE_ART_LAYER};
pub use types::{BlendMode, Colour, Layer, PixelBuffer, RegionMask};
