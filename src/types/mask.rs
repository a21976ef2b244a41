//! Region masks.
//!
//! A `RegionMask` marks which pixels of a buffer belong to one colour region.
//! Masks produced by extraction are pairwise disjoint; the merge filter is the
//! only place masks are combined.

/// A boolean pixel-membership grid, same dimensions as its source buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl RegionMask {
    /// Create an empty mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width as usize * height as usize],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Mark the pixel at (x, y) as a member.
    pub fn set(&mut self, x: u32, y: u32) {
        let i = self.index(x, y);
        self.bits[i] = true;
    }

    /// Whether the pixel at (x, y) is a member.
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.bits[self.index(x, y)]
    }

    /// Number of member pixels.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Whether the mask has no members.
    pub fn is_empty(&self) -> bool {
        !self.bits.iter().any(|&b| b)
    }

    /// OR another mask into this one. Masks must share dimensions.
    pub fn union_with(&mut self, other: &RegionMask) {
        debug_assert_eq!((self.width, self.height), (other.width, other.height));
        for (dst, src) in self.bits.iter_mut().zip(&other.bits) {
            *dst |= src;
        }
    }

    /// Whether any member pixel is shared with another mask.
    pub fn intersects(&self, other: &RegionMask) -> bool {
        self.bits.iter().zip(&other.bits).any(|(&a, &b)| a && b)
    }

    /// Iterate member pixel positions in scan order.
    pub fn iter_set(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width;
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, &b)| b)
            .map(move |(i, _)| ((i as u32) % width, (i as u32) / width))
    }
}
