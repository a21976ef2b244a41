//! Core domain types for layerdiv.
//!
//! This module contains the fundamental types used throughout the pipeline:
//! - `Colour` - RGB colour values
//! - `PixelBuffer` - immutable interleaved pixel grids
//! - `RegionMask` - per-region pixel membership
//! - `Layer` / `BlendMode` - output document layers

mod colour;
mod layer;
mod mask;
mod pixel_buffer;

pub use colour::Colour;
pub use layer::{BlendMode, Layer};
pub use mask::RegionMask;
pub use pixel_buffer::PixelBuffer;
