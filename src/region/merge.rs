//! Small-region merge filter.
//!
//! Regions below a pixel-count threshold are folded into a single catch-all
//! bucket under the reserved `Misc` key. Pixels are only regrouped, never
//! dropped: the total member count before and after merging is identical.

use crate::region::{RegionKey, RegionMap};
use crate::types::RegionMask;

/// Fold every region smaller than `min_size` into the `Misc` bucket.
///
/// Regions at or above the threshold pass through under their original key.
/// With `min_size == 0` the input passes through unchanged, which is how a
/// disabled filter is expressed.
pub fn merge_small_regions(regions: RegionMap, min_size: usize) -> RegionMap {
    if min_size == 0 {
        return regions;
    }

    let mut out = RegionMap::new();
    let mut misc: Option<RegionMask> = None;

    for (key, mask) in regions {
        if mask.count() >= min_size {
            out.insert(key, mask);
        } else {
            match misc.as_mut() {
                Some(acc) => acc.union_with(&mask),
                None => misc = Some(mask),
            }
        }
    }

    if let Some(acc) = misc {
        if !acc.is_empty() {
            // Misc masks from the input (there should be none) would land
            // here too rather than clobbering a surviving entry.
            match out.get_mut(&RegionKey::Misc) {
                Some(existing) => existing.union_with(&acc),
                None => {
                    out.insert(RegionKey::Misc, acc);
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Colour;

    fn mask_with(width: u32, height: u32, cells: &[(u32, u32)]) -> RegionMask {
        let mut mask = RegionMask::new(width, height);
        for &(x, y) in cells {
            mask.set(x, y);
        }
        mask
    }

    fn total_pixels(regions: &RegionMap) -> usize {
        regions.values().map(|m| m.count()).sum()
    }

    #[test]
    fn test_all_small_regions_collapse_into_misc() {
        // Two regions of size 2, threshold 3: everything folds into misc
        let mut regions = RegionMap::new();
        regions.insert(
            RegionKey::Colour(Colour::BLACK),
            mask_with(2, 2, &[(0, 0), (1, 0)]),
        );
        regions.insert(
            RegionKey::Colour(Colour::WHITE),
            mask_with(2, 2, &[(0, 1), (1, 1)]),
        );

        let merged = merge_small_regions(regions, 3);

        assert_eq!(merged.len(), 1);
        let misc = &merged[&RegionKey::Misc];
        assert_eq!(misc.count(), 4);
    }

    #[test]
    fn test_large_regions_pass_through() {
        let mut regions = RegionMap::new();
        let big = mask_with(3, 1, &[(0, 0), (1, 0), (2, 0)]);
        regions.insert(RegionKey::Colour(Colour::BLACK), big.clone());

        let merged = merge_small_regions(regions, 3);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[&RegionKey::Colour(Colour::BLACK)], big);
    }

    #[test]
    fn test_mixed_sizes() {
        let mut regions = RegionMap::new();
        regions.insert(
            RegionKey::Colour(Colour::BLACK),
            mask_with(4, 1, &[(0, 0), (1, 0), (2, 0)]),
        );
        regions.insert(RegionKey::Colour(Colour::WHITE), mask_with(4, 1, &[(3, 0)]));

        let before = total_pixels(&regions);
        let merged = merge_small_regions(regions, 2);

        assert_eq!(merged.len(), 2);
        assert!(merged.contains_key(&RegionKey::Colour(Colour::BLACK)));
        assert_eq!(merged[&RegionKey::Misc].count(), 1);
        // Conservation: regrouped, never dropped or duplicated
        assert_eq!(total_pixels(&merged), before);
    }

    #[test]
    fn test_min_size_zero_is_pass_through() {
        let mut regions = RegionMap::new();
        regions.insert(RegionKey::Colour(Colour::BLACK), mask_with(2, 1, &[(0, 0)]));
        regions.insert(RegionKey::Colour(Colour::WHITE), mask_with(2, 1, &[(1, 0)]));

        let merged = merge_small_regions(regions.clone(), 0);
        assert_eq!(merged, regions);
    }

    #[test]
    fn test_empty_input() {
        let merged = merge_small_regions(RegionMap::new(), 100);
        assert!(merged.is_empty());
    }

    #[test]
    fn test_misc_stays_disjoint_from_survivors() {
        let mut regions = RegionMap::new();
        regions.insert(
            RegionKey::Colour(Colour::BLACK),
            mask_with(4, 1, &[(0, 0), (1, 0)]),
        );
        regions.insert(RegionKey::Colour(Colour::rgb(9, 9, 9)), mask_with(4, 1, &[(2, 0)]));
        regions.insert(RegionKey::Colour(Colour::WHITE), mask_with(4, 1, &[(3, 0)]));

        let merged = merge_small_regions(regions, 2);

        let misc = &merged[&RegionKey::Misc];
        assert_eq!(misc.count(), 2);
        assert!(!misc.intersects(&merged[&RegionKey::Colour(Colour::BLACK)]));
    }
}
