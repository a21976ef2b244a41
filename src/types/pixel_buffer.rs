//! Pixel buffer type.
//!
//! A `PixelBuffer` is the flat, interleaved pixel grid the whole pipeline
//! operates on: 8 bits per channel, 3 (RGB) or 4 (RGBA) channels. Buffers are
//! captured once from input and never mutated in place; every transform
//! produces a fresh buffer.

use std::path::Path;

use image::{DynamicImage, RgbaImage};

use crate::error::{DividerError, Result};
use crate::types::{Colour, RegionMask};

/// A 2-D grid of interleaved 8-bit pixels with 3 or 4 channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer from raw interleaved channel data.
    ///
    /// Fails fast on a channel count other than 3 or 4, or on a data length
    /// that does not match `width * height * channels`.
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self> {
        if channels != 3 && channels != 4 {
            return Err(DividerError::Input {
                message: format!("Unsupported channel count: {}", channels),
                help: Some("Images must have 3 (RGB) or 4 (RGBA) channels".to_string()),
            });
        }

        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(DividerError::Input {
                message: format!(
                    "Pixel data length {} does not match {}x{}x{} = {}",
                    data.len(),
                    width,
                    height,
                    channels,
                    expected
                ),
                help: None,
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Capture a buffer from a decoded image, normalized to RGBA.
    pub fn from_image(img: &DynamicImage) -> Self {
        let rgba = img.to_rgba8();
        Self {
            width: rgba.width(),
            height: rgba.height(),
            channels: 4,
            data: rgba.into_raw(),
        }
    }

    /// Load a buffer from an image file.
    pub fn open(path: &Path) -> Result<Self> {
        let img = image::open(path).map_err(|e| DividerError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read image: {}", e),
        })?;
        Ok(Self::from_image(&img))
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of channels per pixel (3 or 4).
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw interleaved channel data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Check that another buffer has the same width and height.
    pub fn same_dimensions(&self, other: &PixelBuffer) -> bool {
        self.width == other.width && self.height == other.height
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels as usize
    }

    /// Channel slice for the pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let i = self.offset(x, y);
        &self.data[i..i + self.channels as usize]
    }

    /// RGB components of the pixel at (x, y).
    pub fn colour(&self, x: u32, y: u32) -> Colour {
        let p = self.pixel(x, y);
        Colour::rgb(p[0], p[1], p[2])
    }

    /// Alpha of the pixel at (x, y). A 3-channel buffer is fully opaque.
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        if self.channels == 4 {
            self.pixel(x, y)[3]
        } else {
            255
        }
    }

    /// Whether the pixel at (x, y) carries colour (alpha > 0).
    pub fn is_valid(&self, x: u32, y: u32) -> bool {
        self.alpha(x, y) > 0
    }

    /// Restrict the buffer to a mask: pixels outside the mask are zero in
    /// every channel, pixels inside are copied verbatim.
    pub fn masked(&self, mask: &RegionMask) -> PixelBuffer {
        let mut data = vec![0u8; self.data.len()];
        let stride = self.channels as usize;

        for (x, y) in mask.iter_set() {
            let i = self.offset(x, y);
            data[i..i + stride].copy_from_slice(self.pixel(x, y));
        }

        Self {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data,
        }
    }

    /// Convert to an RGBA image (for PNG output). A 3-channel buffer gets an
    /// opaque alpha channel.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut out = Vec::with_capacity(self.pixel_count() * 4);
        for px in self.data.chunks_exact(self.channels as usize) {
            out.extend_from_slice(&px[..3]);
            out.push(if self.channels == 4 { px[3] } else { 255 });
        }
        RgbaImage::from_raw(self.width, self.height, out)
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }
}
