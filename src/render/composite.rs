//! Preview compositing.
//!
//! Flattens the line art over the base image the way the persisted document
//! will render its top layer, so the caller gets an immediate visual check.
//! All blending is done per RGB channel in 8-bit space; the base image's
//! alpha channel passes through untouched.

use crate::error::{DividerError, Result};
use crate::types::{BlendMode, PixelBuffer};

/// Composite the line art over the base image with the given blend mode.
///
/// `multiply` ignores the line art's alpha entirely; `normal`, `darken` and
/// `overlay` weight the blended result by the line art's alpha. Buffers must
/// share dimensions.
pub fn composite_preview(
    base: &PixelBuffer,
    line_art: &PixelBuffer,
    mode: BlendMode,
) -> Result<PixelBuffer> {
    if !base.same_dimensions(line_art) {
        return Err(DividerError::Input {
            message: format!(
                "Image dimensions differ: base is {}x{}, line art is {}x{}",
                base.width(),
                base.height(),
                line_art.width(),
                line_art.height()
            ),
            help: Some("Base colour and line art images must match in size".to_string()),
        });
    }

    let stride = base.channels() as usize;
    let mut data = base.data().to_vec();

    for y in 0..base.height() {
        for x in 0..base.width() {
            let i = (y as usize * base.width() as usize + x as usize) * stride;
            let line = line_art.pixel(x, y);
            let alpha = line_art.alpha(x, y) as f32 / 255.0;

            for c in 0..3 {
                let b = data[i + c];
                let l = line[c];
                data[i + c] = match mode {
                    BlendMode::Multiply => multiply(b, l),
                    BlendMode::Normal => lerp(b, l, alpha),
                    BlendMode::Darken => lerp(b, b.min(l), alpha),
                    BlendMode::Overlay => lerp(b, overlay(b, l), alpha),
                };
            }
        }
    }

    PixelBuffer::new(base.width(), base.height(), base.channels(), data)
}

/// `base * line / 255`, truncated.
fn multiply(base: u8, line: u8) -> u8 {
    ((base as u16 * line as u16) / 255) as u8
}

/// Standard separable overlay: multiply below mid-point, screen above.
fn overlay(base: u8, line: u8) -> u8 {
    let (b, l) = (base as u16, line as u16);
    if b < 128 {
        ((2 * b * l) / 255) as u8
    } else {
        (255 - (2 * (255 - b) * (255 - l)) / 255) as u8
    }
}

/// Blend `target` over `base` with weight `alpha` in [0, 1].
fn lerp(base: u8, target: u8, alpha: f32) -> u8 {
    (target as f32 * alpha + base as f32 * (1.0 - alpha)) as u8
}
