//! Colour-region segmentation.
//!
//! This module partitions a flat-coloured image into groups of
//! mutually-similar colours and filters undersized groups into a single
//! catch-all bucket.

mod extract;
mod merge;

use std::collections::BTreeMap;

pub use extract::extract_regions;
pub use merge::merge_small_regions;

use crate::types::{Colour, RegionMask};

/// Key identifying a colour region.
///
/// Extracted regions are keyed by their representative (averaged) colour.
/// The merge filter's catch-all bucket gets the reserved `Misc` key, so it
/// can never collide with a genuine extracted colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegionKey {
    /// A region keyed by its representative colour.
    Colour(Colour),

    /// The merged bucket of undersized regions. Sorts after all colours.
    Misc,
}

impl RegionKey {
    /// Deterministic layer name for this region.
    pub fn layer_name(&self) -> String {
        match self {
            RegionKey::Colour(c) => format!("Color_R{}_G{}_B{}", c.r, c.g, c.b),
            RegionKey::Misc => "Small Regions".to_string(),
        }
    }
}

/// Ordered mapping from region key to membership mask.
///
/// A `BTreeMap` keeps iteration order stable, which the layer stack and the
/// tests rely on for reproducibility.
pub type RegionMap = BTreeMap<RegionKey, RegionMask>;
