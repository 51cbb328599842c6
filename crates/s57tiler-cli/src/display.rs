//! Display utilities for formatting CLI output.
//!
//! This module provides table row structures and formatting functions
//! for presenting chart layers and export results in a human-readable format.

use tabled::{Table, Tabled};

use s57tiler_core::types::{LayerInfo, RenderSummary};

/// Table row representation for a chart layer.
#[derive(Tabled)]
pub struct LayerRow {
    /// S-57 object class acronym.
    #[tabled(rename = "Layer")]
    pub name: String,
    /// Number of features reported by the driver.
    #[tabled(rename = "Features")]
    pub features: u64,
    /// Reference system of the layer.
    #[tabled(rename = "CRS")]
    pub crs: String,
}

/// Table row representation for a written GeoJSON layer.
#[derive(Tabled)]
pub struct RenderedRow {
    #[tabled(rename = "Layer")]
    pub name: String,
    #[tabled(rename = "Features")]
    pub features: usize,
    #[tabled(rename = "File")]
    pub file: String,
}

/// Table row representation for a layer that produced no file.
#[derive(Tabled)]
pub struct SkippedRow {
    #[tabled(rename = "Layer")]
    pub name: String,
    #[tabled(rename = "Reason")]
    pub reason: String,
}

fn layer_rows(layers: &[LayerInfo]) -> Vec<LayerRow> {
    layers
        .iter()
        .map(|layer| LayerRow {
            name: layer.name.clone(),
            features: layer.feature_count,
            crs: layer
                .epsg
                .map_or_else(|| "N/A".to_string(), |code| format!("EPSG:{code}")),
        })
        .collect()
}

/// Display the layers of a chart in a formatted table.
pub fn display_layers(layers: &[LayerInfo]) {
    println!("\nLayers ({} total):\n", layers.len());
    println!("{}", Table::new(layer_rows(layers)));
}

/// Display the outcome of an export.
pub fn display_summary(summary: &RenderSummary) {
    println!("\nOutput directory: {}", summary.out_dir.display());

    if !summary.rendered.is_empty() {
        println!("\n=== Rendered ===");
        let rows: Vec<RenderedRow> = summary
            .rendered
            .iter()
            .map(|layer| RenderedRow {
                name: layer.name.clone(),
                features: layer.feature_count,
                file: layer
                    .path
                    .file_name()
                    .map_or_else(String::new, |f| f.to_string_lossy().into_owned()),
            })
            .collect();
        println!("{}", Table::new(rows));
    }

    if !summary.skipped.is_empty() {
        println!("\n=== Skipped ===");
        let rows: Vec<SkippedRow> = summary
            .skipped
            .iter()
            .map(|(name, reason)| SkippedRow {
                name: name.clone(),
                reason: reason.as_str().to_string(),
            })
            .collect();
        println!("{}", Table::new(rows));
    }
}
