//! Rendering module for layerdiv.
//!
//! This module turns a region map into the ordered layer stack and flattens
//! the preview composite.

mod composite;
mod layers;

pub use composite::composite_preview;
pub use layers::{build_layers, BACKGROUND_LAYER, LINE_ART_LAYER};
