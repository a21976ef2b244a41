//! Layer assembly.
//!
//! Builds the ordered layer stack handed to the document serializer. The
//! order is a hard contract: background first, one layer per region in map
//! order, line art last (topmost).

use crate::region::RegionMap;
use crate::types::{BlendMode, Layer, PixelBuffer};

/// Name of the bottom layer carrying the unrestricted base image.
pub const BACKGROUND_LAYER: &str = "Background";

/// Name of the top layer carrying the line art.
pub const LINE_ART_LAYER: &str = "Line Art";

/// Build the full layer stack for a divided image.
///
/// Every region becomes a layer holding the base image restricted to the
/// region's mask (zero outside), named from its key, normal blend. The line
/// art layer alone carries the caller-supplied blend mode. An empty region
/// map is valid and yields just background + line art.
pub fn build_layers(
    base: &PixelBuffer,
    regions: &RegionMap,
    line_art: &PixelBuffer,
    line_blend: BlendMode,
) -> Vec<Layer> {
    let mut layers = Vec::with_capacity(regions.len() + 2);

    layers.push(Layer::new(BACKGROUND_LAYER, base.clone(), BlendMode::Normal));

    for (key, mask) in regions {
        layers.push(Layer::new(
            key.layer_name(),
            base.masked(mask),
            BlendMode::Normal,
        ));
    }

    layers.push(Layer::new(LINE_ART_LAYER, line_art.clone(), line_blend));

    layers
}
