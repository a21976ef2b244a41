//! Inspect command implementation.
//!
//! Reads a written document and lists its layer stack, bottom-to-top.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::document::{read_manifest, DocumentManifest};
use crate::error::{DividerError, Result};
use crate::output::{display_path, plural, Printer};
use crate::types::BlendMode;

/// List the layers of a written document
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Document to inspect
    pub document: PathBuf,

    /// Emit machine-readable JSON on stdout
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct JsonLayer<'a> {
    index: usize,
    name: &'a str,
    blend_mode: BlendMode,
    opacity: u8,
    visible: bool,
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    width: u32,
    height: u32,
    layers: Vec<JsonLayer<'a>>,
}

pub fn run(args: InspectArgs, printer: &Printer) -> Result<()> {
    let (manifest, _color_mode) = read_manifest(&args.document)?;

    if args.json {
        print_json(&manifest)?;
        return Ok(());
    }

    printer.info(
        "Document",
        &format!(
            "{} ({}x{}, {})",
            display_path(&args.document),
            manifest.width,
            manifest.height,
            plural(manifest.layers.len(), "layer", "layers")
        ),
    );

    for (index, layer) in manifest.layers.iter().enumerate() {
        println!(
            "{:>3}  {:<24} {:<9} opacity {:>3}  {}",
            index,
            layer.name,
            layer.blend_mode,
            layer.opacity,
            if layer.visible { "visible" } else { "hidden" }
        );
    }

    Ok(())
}

fn print_json(manifest: &DocumentManifest) -> Result<()> {
    let doc = JsonDocument {
        width: manifest.width,
        height: manifest.height,
        layers: manifest
            .layers
            .iter()
            .enumerate()
            .map(|(index, l)| JsonLayer {
                index,
                name: &l.name,
                blend_mode: l.blend_mode,
                opacity: l.opacity,
                visible: l.visible,
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&doc).map_err(|e| DividerError::Document {
        message: format!("Failed to encode JSON: {}", e),
        help: None,
    })?;
    println!("{}", json);

    Ok(())
}
