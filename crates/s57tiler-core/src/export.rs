//! Export of chart layers as GeoJSON files.
//!
//! Every accepted layer with at least one feature is written to `<out_dir>/<LAYER>.json`.
//! A `meta.json` listing the written files is written last.

use std::path::Path;

use gdal::vector::Layer;
use log::{info, warn};
use serde_json::json;

use crate::builder::FeatureBuilder;
use crate::chart::S57Chart;
use crate::error::{FormatError, Result};
use crate::output::{prepare_output_dir, write_json};
use crate::types::{RenderOptions, RenderSummary, RenderedLayer, SkipReason};

/// Name of the index file written next to the layers.
pub const META_FILE: &str = "meta.json";

/// Renders every layer of `chart` into `out_dir`.
///
/// Layers are visited in driver order and each name is printed to standard output. A layer
/// that cannot be read or converted is reported in [`RenderSummary::skipped`] and does not
/// stop the export.
///
/// # Errors
///
/// This function will return an error if:
/// - The output directory cannot be prepared.
/// - The WGS84 reference system or the zoom transform cannot be built.
/// - A GeoJSON file or `meta.json` cannot be written.
pub fn render_geojson(
    chart: &mut S57Chart,
    out_dir: &Path,
    options: &RenderOptions,
) -> Result<RenderSummary> {
    info!("rendering geojson to: {}", out_dir.display());
    let out_dir = prepare_output_dir(out_dir)?;
    let builder = FeatureBuilder::new()?;
    let mut summary = RenderSummary {
        out_dir: out_dir.clone(),
        ..RenderSummary::default()
    };

    let names = chart.layer_names().to_vec();
    for (index, name) in names.into_iter().enumerate() {
        println!("{name}");

        if let Some(reason) = options.filter.rejection(&name) {
            info!("skipping layer {name}: {}", reason.as_str());
            summary.skipped.push((name, reason));
            continue;
        }

        let layer = chart.layer(index);
        match render_layer(&builder, &out_dir, &name, layer, options.pretty)? {
            Ok(rendered) => summary.rendered.push(rendered),
            Err(reason) => summary.skipped.push((name, reason)),
        }
    }

    write_meta(&out_dir, &summary)?;
    info!(
        "rendered {} layer(s), skipped {}",
        summary.rendered.len(),
        summary.skipped.len()
    );
    Ok(summary)
}

/// Writes one layer. The inner `Err` carries the reason a layer produced no file.
fn render_layer(
    builder: &FeatureBuilder,
    out_dir: &Path,
    name: &str,
    layer: Result<Layer<'_>>,
    pretty: bool,
) -> Result<std::result::Result<RenderedLayer, SkipReason>> {
    let collection = match layer.and_then(|mut layer| builder.collection_from_layer(&mut layer)) {
        Ok(Some(collection)) => collection,
        Ok(None) => return Ok(Err(SkipReason::Empty)),
        Err(e) => {
            warn!("failed to render layer {name}: {e}");
            return Ok(Err(SkipReason::Failed(e.to_string())));
        },
    };

    let encoded = if pretty {
        serde_json::to_string_pretty(&collection)
    } else {
        serde_json::to_string(&collection)
    }
    .map_err(|source| FormatError::Encode {
        layer: name.to_string(),
        source,
    })?;

    let path = write_json(out_dir, &format!("{name}.json"), &encoded)?;
    info!("rendered layer {}", path.display());
    Ok(Ok(RenderedLayer {
        name: name.to_string(),
        path,
        feature_count: collection.features.len(),
    }))
}

fn write_meta(out_dir: &Path, summary: &RenderSummary) -> Result<()> {
    let layers: Vec<String> = summary
        .rendered
        .iter()
        .map(|layer| layer.path.display().to_string())
        .collect();
    let meta = json!({ "layers": layers });
    let encoded = serde_json::to_string_pretty(&meta).map_err(|source| FormatError::Encode {
        layer: META_FILE.to_string(),
        source,
    })?;
    write_json(out_dir, META_FILE, &encoded)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::S57Error;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_unreadable_layer_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let builder = FeatureBuilder::new().unwrap();
        let unreadable = Err(S57Error::Other(anyhow::anyhow!("layer 3 is unavailable")));

        let outcome =
            render_layer(&builder, temp_dir.path(), "DEPARE", unreadable, false).unwrap();

        assert_eq!(
            outcome,
            Err(SkipReason::Failed("layer 3 is unavailable".to_string()))
        );
        assert!(!temp_dir.path().join("DEPARE.json").exists());
    }

    #[test]
    fn test_write_meta_lists_rendered_layers() {
        let temp_dir = TempDir::new().unwrap();
        let summary = RenderSummary {
            out_dir: temp_dir.path().to_path_buf(),
            rendered: vec![
                RenderedLayer {
                    name: "DEPARE".to_string(),
                    path: PathBuf::from("/charts/DEPARE.json"),
                    feature_count: 12,
                },
                RenderedLayer {
                    name: "SOUNDG".to_string(),
                    path: PathBuf::from("/charts/SOUNDG.json"),
                    feature_count: 40,
                },
            ],
            skipped: vec![],
        };

        write_meta(temp_dir.path(), &summary).unwrap();

        let meta: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(temp_dir.path().join(META_FILE)).unwrap(),
        )
        .unwrap();
        assert_eq!(
            meta,
            json!({ "layers": ["/charts/DEPARE.json", "/charts/SOUNDG.json"] })
        );
    }
}
