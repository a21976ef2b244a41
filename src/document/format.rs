//! Layered document container format.
//!
//! A `.ldiv` document is a single file: a fixed header, a JSON manifest
//! describing every layer in stack order (bottom-to-top), then the layers'
//! pixel data as PNG blobs. The whole container is assembled in memory and
//! persisted with one scoped write; a failure mid-write leaves no usable
//! partial output and is surfaced to the caller.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::document::ColorMode;
use crate::error::{DividerError, Result};
use crate::types::{BlendMode, Layer, PixelBuffer};

/// File magic for layered documents.
pub const MAGIC: &[u8; 4] = b"LDIV";

/// Current container version.
pub const VERSION: u8 = 1;

/// Header bytes before the manifest: magic + version + colour mode +
/// manifest length (u32 LE).
const HEADER_LEN: usize = 4 + 1 + 1 + 4;

/// Manifest describing a document's layer stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentManifest {
    /// Canvas width in pixels.
    pub width: u32,

    /// Canvas height in pixels.
    pub height: u32,

    /// Layers in stack order, bottom-to-top.
    pub layers: Vec<LayerEntry>,
}

/// One layer's metadata and the location of its pixel blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerEntry {
    pub name: String,
    pub blend_mode: BlendMode,
    pub opacity: u8,
    pub visible: bool,
    pub left: i32,
    pub top: i32,

    /// Byte offset of the PNG blob, relative to the end of the manifest.
    pub offset: u64,

    /// Length of the PNG blob in bytes.
    pub len: u64,
}

/// Serialize a layer stack into container bytes.
pub fn encode_document(layers: &[Layer], color_mode: ColorMode) -> Result<Vec<u8>> {
    let (width, height) = layers
        .first()
        .map(|l| (l.buffer.width(), l.buffer.height()))
        .unwrap_or((0, 0));

    let mut entries = Vec::with_capacity(layers.len());
    let mut blobs: Vec<u8> = Vec::new();

    for layer in layers {
        let png = encode_png(&layer.buffer)?;
        entries.push(LayerEntry {
            name: layer.name.clone(),
            blend_mode: layer.blend_mode,
            opacity: layer.opacity,
            visible: layer.visible,
            left: layer.left,
            top: layer.top,
            offset: blobs.len() as u64,
            len: png.len() as u64,
        });
        blobs.extend_from_slice(&png);
    }

    let manifest = DocumentManifest {
        width,
        height,
        layers: entries,
    };
    let manifest_json = serde_json::to_vec(&manifest).map_err(|e| DividerError::Document {
        message: format!("Failed to encode manifest: {}", e),
        help: None,
    })?;

    let mut out = Vec::with_capacity(HEADER_LEN + manifest_json.len() + blobs.len());
    out.extend_from_slice(MAGIC);
    out.push(VERSION);
    out.push(color_mode.code());
    out.extend_from_slice(&(manifest_json.len() as u32).to_le_bytes());
    out.extend_from_slice(&manifest_json);
    out.extend_from_slice(&blobs);

    Ok(out)
}

/// Read a document's manifest and colour mode from disk.
pub fn read_manifest(path: &Path) -> Result<(DocumentManifest, ColorMode)> {
    let bytes = fs::read(path).map_err(|e| DividerError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read document: {}", e),
    })?;

    let (manifest, color_mode, _) = parse(&bytes, path)?;
    Ok((manifest, color_mode))
}

/// Decode one layer's pixels from a document on disk.
pub fn read_layer(path: &Path, entry: &LayerEntry) -> Result<PixelBuffer> {
    let bytes = fs::read(path).map_err(|e| DividerError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read document: {}", e),
    })?;

    let (_, _, blobs) = parse(&bytes, path)?;
    let start = entry.offset as usize;
    let end = start + entry.len as usize;
    if end > blobs.len() {
        return Err(DividerError::Document {
            message: format!("Layer blob for {:?} is out of bounds", entry.name),
            help: None,
        });
    }

    let img = image::load_from_memory_with_format(&blobs[start..end], image::ImageFormat::Png)
        .map_err(|e| DividerError::Document {
            message: format!("Failed to decode layer {:?}: {}", entry.name, e),
            help: None,
        })?;

    Ok(PixelBuffer::from_image(&img))
}

fn parse<'a>(bytes: &'a [u8], path: &Path) -> Result<(DocumentManifest, ColorMode, &'a [u8])> {
    let malformed = |message: String| DividerError::Document {
        message,
        help: Some(format!("{} is not a layerdiv document", path.display())),
    };

    if bytes.len() < HEADER_LEN || &bytes[0..4] != MAGIC {
        return Err(malformed("Bad magic".to_string()));
    }
    if bytes[4] != VERSION {
        return Err(malformed(format!("Unsupported version: {}", bytes[4])));
    }
    let color_mode = ColorMode::from_code(bytes[5])
        .ok_or_else(|| malformed(format!("Unknown colour mode: {}", bytes[5])))?;

    let manifest_len = u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]) as usize;
    let manifest_end = HEADER_LEN + manifest_len;
    if bytes.len() < manifest_end {
        return Err(malformed("Truncated manifest".to_string()));
    }

    let manifest: DocumentManifest = serde_json::from_slice(&bytes[HEADER_LEN..manifest_end])
        .map_err(|e| malformed(format!("Invalid manifest: {}", e)))?;

    Ok((manifest, color_mode, &bytes[manifest_end..]))
}

fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>> {
    let img = buffer.to_rgba_image();
    let mut blob = Cursor::new(Vec::new());
    img.write_to(&mut blob, image::ImageFormat::Png)
        .map_err(|e| DividerError::Document {
            message: format!("Failed to encode layer pixels: {}", e),
            help: None,
        })?;
    Ok(blob.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn layer(name: &str, pixels: &[[u8; 4]], width: u32, blend: BlendMode) -> Layer {
        let data: Vec<u8> = pixels.iter().flatten().copied().collect();
        let buf = PixelBuffer::new(width, pixels.len() as u32 / width, 4, data).unwrap();
        Layer::new(name, buf, blend)
    }

    #[test]
    fn test_round_trip() {
        let layers = vec![
            layer("Background", &[[1, 2, 3, 255], [4, 5, 6, 255]], 2, BlendMode::Normal),
            layer("Line Art", &[[0, 0, 0, 128], [9, 9, 9, 255]], 2, BlendMode::Multiply),
        ];

        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.ldiv");
        fs::write(&path, encode_document(&layers, ColorMode::Rgb).unwrap()).unwrap();

        let (manifest, color_mode) = read_manifest(&path).unwrap();

        assert_eq!(color_mode, ColorMode::Rgb);
        assert_eq!((manifest.width, manifest.height), (2, 1));
        assert_eq!(manifest.layers.len(), 2);
        assert_eq!(manifest.layers[0].name, "Background");
        assert_eq!(manifest.layers[0].blend_mode, BlendMode::Normal);
        assert_eq!(manifest.layers[1].name, "Line Art");
        assert_eq!(manifest.layers[1].blend_mode, BlendMode::Multiply);

        let pixels = read_layer(&path, &manifest.layers[0]).unwrap();
        assert_eq!(pixels.pixel(0, 0), &[1, 2, 3, 255]);
        assert_eq!(pixels.pixel(1, 0), &[4, 5, 6, 255]);
    }

    #[test]
    fn test_empty_stack_encodes() {
        let bytes = encode_document(&[], ColorMode::Rgb).unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.ldiv");
        fs::write(&path, bytes).unwrap();

        let (manifest, _) = read_manifest(&path).unwrap();
        assert!(manifest.layers.is_empty());
    }

    #[test]
    fn test_rejects_bad_magic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bogus.ldiv");
        fs::write(&path, b"not a document").unwrap();

        assert!(read_manifest(&path).is_err());
    }
}
