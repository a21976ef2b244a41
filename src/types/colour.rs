//! Colour type.

/// An RGB colour value.
///
/// Alpha is not part of the colour itself; validity of a pixel is carried by
/// the buffer's fourth channel where one exists. Colours only ever come from
/// pixel data, so there is no string form to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    /// Create a new colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Check whether every channel of `other` is within `tolerance` of
    /// this colour.
    pub fn within_tolerance(self, other: Colour, tolerance: u8) -> bool {
        self.r.abs_diff(other.r) <= tolerance
            && self.g.abs_diff(other.g) <= tolerance
            && self.b.abs_diff(other.b) <= tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_tolerance() {
        let a = Colour::rgb(100, 100, 100);

        assert!(a.within_tolerance(Colour::rgb(100, 100, 100), 0));
        assert!(a.within_tolerance(Colour::rgb(110, 95, 100), 10));
        assert!(!a.within_tolerance(Colour::rgb(111, 100, 100), 10));
        // One channel out of bounds is enough to reject
        assert!(!a.within_tolerance(Colour::rgb(100, 100, 90), 5));
    }

    #[test]
    fn test_within_tolerance_is_symmetric() {
        let a = Colour::rgb(10, 200, 30);
        let b = Colour::rgb(14, 196, 30);

        assert_eq!(a.within_tolerance(b, 4), b.within_tolerance(a, 4));
        assert!(a.within_tolerance(b, 4));
    }

    #[test]
    fn test_ordering_is_channel_lexicographic() {
        assert!(Colour::rgb(0, 255, 255) < Colour::rgb(1, 0, 0));
        assert!(Colour::BLACK < Colour::WHITE);
    }
}
