//! Colour-region extraction.
//!
//! Groups valid pixels of a flat-coloured image by colour similarity. Two
//! pixels share a group when both are within the tolerance of the group's
//! seed colour on every channel. Candidate groups are looked up through a
//! hash of coarse colour cells instead of a pairwise scan over all pixels,
//! which keeps extraction near-linear in the pixel count.
//!
//! Grouping is order-dependent when tolerance bands overlap: pixels are
//! visited in scan order and always join the earliest-created matching group.

use std::collections::HashMap;

use crate::region::{RegionKey, RegionMap};
use crate::types::{Colour, PixelBuffer, RegionMask};

/// A colour group under construction.
struct Group {
    /// First pixel's colour; membership is tested against this.
    seed: Colour,
    /// Running per-channel sums for the representative mean.
    sums: [u64; 3],
    count: u64,
    mask: RegionMask,
}

impl Group {
    fn new(seed: Colour, width: u32, height: u32) -> Self {
        Self {
            seed,
            sums: [0; 3],
            count: 0,
            mask: RegionMask::new(width, height),
        }
    }

    fn add(&mut self, colour: Colour, x: u32, y: u32) {
        self.sums[0] += colour.r as u64;
        self.sums[1] += colour.g as u64;
        self.sums[2] += colour.b as u64;
        self.count += 1;
        self.mask.set(x, y);
    }

    /// Integer-truncated channel-wise mean of all members.
    fn representative(&self) -> Colour {
        Colour::rgb(
            (self.sums[0] / self.count) as u8,
            (self.sums[1] / self.count) as u8,
            (self.sums[2] / self.count) as u8,
        )
    }
}

/// Quantize a colour into a coarse cell of edge `cell` (= tolerance + 1).
///
/// Any colour within tolerance of a seed lands in the seed's cell or one of
/// its 26 neighbours, so a match search only has to probe 27 cells.
fn cell_of(colour: Colour, cell: u16) -> (u8, u8, u8) {
    (
        (colour.r as u16 / cell) as u8,
        (colour.g as u16 / cell) as u8,
        (colour.b as u16 / cell) as u8,
    )
}

/// Partition the valid pixels of `base` into colour regions.
///
/// Returns a map from representative colour to membership mask. Pixels with
/// alpha 0 belong to no region; masks of distinct keys are disjoint, and
/// their union covers exactly the valid pixels. Pure function of its inputs.
pub fn extract_regions(base: &PixelBuffer, tolerance: u8) -> RegionMap {
    let (width, height) = (base.width(), base.height());
    let cell = tolerance as u16 + 1;

    let mut groups: Vec<Group> = Vec::new();
    // Colour cell -> indices of groups seeded in that cell.
    let mut cells: HashMap<(u8, u8, u8), Vec<usize>> = HashMap::new();

    for y in 0..height {
        for x in 0..width {
            if !base.is_valid(x, y) {
                continue;
            }
            let colour = base.colour(x, y);

            // Earliest-created group whose seed matches, across the 27
            // neighbouring cells.
            let (cr, cg, cb) = cell_of(colour, cell);
            let mut best: Option<usize> = None;
            for dr in -1i16..=1 {
                for dg in -1i16..=1 {
                    for db in -1i16..=1 {
                        let key = (
                            cr as i16 + dr,
                            cg as i16 + dg,
                            cb as i16 + db,
                        );
                        if key.0 < 0 || key.1 < 0 || key.2 < 0 {
                            continue;
                        }
                        if key.0 > 255 || key.1 > 255 || key.2 > 255 {
                            continue;
                        }
                        let key = (key.0 as u8, key.1 as u8, key.2 as u8);
                        let Some(indices) = cells.get(&key) else {
                            continue;
                        };
                        for &gi in indices {
                            if groups[gi].seed.within_tolerance(colour, tolerance)
                                && best.map_or(true, |b| gi < b)
                            {
                                best = Some(gi);
                            }
                        }
                    }
                }
            }

            let gi = match best {
                Some(gi) => gi,
                None => {
                    let gi = groups.len();
                    groups.push(Group::new(colour, width, height));
                    cells.entry((cr, cg, cb)).or_default().push(gi);
                    gi
                }
            };
            groups[gi].add(colour, x, y);
        }
    }

    // Distinct groups can truncate to the same mean; union their masks so no
    // pixel is dropped.
    let mut regions = RegionMap::new();
    for group in groups {
        let key = RegionKey::Colour(group.representative());
        match regions.get_mut(&key) {
            Some(existing) => existing.union_with(&group.mask),
            None => {
                regions.insert(key, group.mask);
            }
        }
    }

    regions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb_buffer(width: u32, height: u32, pixels: &[[u8; 3]]) -> PixelBuffer {
        let data: Vec<u8> = pixels.iter().flatten().copied().collect();
        PixelBuffer::new(width, height, 3, data).unwrap()
    }

    fn rgba_buffer(width: u32, height: u32, pixels: &[[u8; 4]]) -> PixelBuffer {
        let data: Vec<u8> = pixels.iter().flatten().copied().collect();
        PixelBuffer::new(width, height, 4, data).unwrap()
    }

    #[test]
    fn test_two_colour_image_zero_tolerance() {
        let base = rgb_buffer(
            2,
            2,
            &[[0, 0, 0], [0, 0, 0], [255, 255, 255], [255, 255, 255]],
        );

        let regions = extract_regions(&base, 0);

        assert_eq!(regions.len(), 2);
        let black = &regions[&RegionKey::Colour(Colour::BLACK)];
        let white = &regions[&RegionKey::Colour(Colour::WHITE)];
        assert_eq!(black.count(), 2);
        assert_eq!(white.count(), 2);
        assert!(black.get(0, 0) && black.get(1, 0));
        assert!(white.get(0, 1) && white.get(1, 1));
    }

    #[test]
    fn test_tolerance_groups_near_colours() {
        let base = rgb_buffer(2, 1, &[[100, 100, 100], [104, 98, 100]]);

        let regions = extract_regions(&base, 5);

        assert_eq!(regions.len(), 1);
        // Truncated mean of the two members
        let key = RegionKey::Colour(Colour::rgb(102, 99, 100));
        assert_eq!(regions[&key].count(), 2);
    }

    #[test]
    fn test_tolerance_respects_every_channel() {
        // Blue channel differs by 6, over the tolerance of 5
        let base = rgb_buffer(2, 1, &[[100, 100, 100], [100, 100, 106]]);

        let regions = extract_regions(&base, 5);
        assert_eq!(regions.len(), 2);
    }

    #[test]
    fn test_transparent_pixels_excluded() {
        let base = rgba_buffer(2, 1, &[[50, 50, 50, 0], [50, 50, 50, 255]]);

        let regions = extract_regions(&base, 0);

        assert_eq!(regions.len(), 1);
        let mask = &regions[&RegionKey::Colour(Colour::rgb(50, 50, 50))];
        assert!(!mask.get(0, 0));
        assert!(mask.get(1, 0));
    }

    #[test]
    fn test_fully_transparent_image_yields_no_regions() {
        let base = rgba_buffer(2, 2, &[[1, 2, 3, 0]; 4]);
        assert!(extract_regions(&base, 10).is_empty());
    }

    #[test]
    fn test_masks_are_disjoint_and_cover_valid_pixels() {
        // Four colours spread over tolerance boundaries
        let base = rgba_buffer(
            3,
            2,
            &[
                [10, 10, 10, 255],
                [12, 12, 12, 255],
                [200, 10, 10, 255],
                [10, 200, 10, 255],
                [0, 0, 0, 0],
                [201, 11, 9, 255],
            ],
        );

        let regions = extract_regions(&base, 4);
        let masks: Vec<&RegionMask> = regions.values().collect();

        for (i, a) in masks.iter().enumerate() {
            for b in &masks[i + 1..] {
                assert!(!a.intersects(b));
            }
        }

        let mut union = RegionMask::new(3, 2);
        for mask in &masks {
            union.union_with(mask);
        }
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(union.get(x, y), base.is_valid(x, y));
            }
        }
    }

    #[test]
    fn test_members_within_tolerance_of_representative_at_zero() {
        let base = rgb_buffer(2, 2, &[[9, 9, 9], [9, 9, 9], [9, 9, 9], [77, 1, 3]]);

        let regions = extract_regions(&base, 0);

        for (key, mask) in &regions {
            let RegionKey::Colour(rep) = key else { panic!() };
            for (x, y) in mask.iter_set() {
                assert!(rep.within_tolerance(base.colour(x, y), 0));
            }
        }
    }

    #[test]
    fn test_scan_order_determinism() {
        let base = rgb_buffer(
            4,
            1,
            &[[10, 10, 10], [20, 20, 20], [15, 15, 15], [200, 200, 200]],
        );

        let a = extract_regions(&base, 8);
        let b = extract_regions(&base, 8);
        assert_eq!(a, b);

        // 15 joins the group seeded at 10 (earliest created), not 20's
        let keys: Vec<_> = a.keys().copied().collect();
        assert!(keys.contains(&RegionKey::Colour(Colour::rgb(12, 12, 12))));
    }
}
