//! Map styles and tile server configuration for exported charts.
//!
//! [`create_style`] writes one Mapbox GL style document per colour scheme and depth unit. Each
//! style reads the `marine-chart` tile set that [`create_config`] registers with TileServer-GL.

mod layers;
pub mod palette;

use std::fmt;
use std::path::{Path, PathBuf};

use log::info;
use serde_json::{Value, json};

use crate::error::Result;
use crate::mbtiles::MBTILES_FILE;
use crate::output::{prepare_output_dir, write_json};
use palette::Palette;

pub use layers::style_layers;

/// Name of the vector source every style layer reads from.
pub const SOURCE: &str = "src_senc";

/// Name the tile set is published under.
pub const TILESET: &str = "marine-chart";

/// File name of the generated TileServer-GL configuration.
pub const CONFIG_FILE: &str = "config.json";

/// Lighting conditions a style is drawn for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    /// Bright daylight
    Day,
    /// Dusk
    Dusk,
    /// Night
    Dark,
}

impl ColorScheme {
    /// Every scheme, in output order.
    pub const ALL: [Self; 3] = [Self::Day, Self::Dusk, Self::Dark];

    /// Lowercase name used in file and sprite names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Dusk => "dusk",
            Self::Dark => "dark",
        }
    }

    /// Colours painted by this scheme.
    #[must_use]
    pub fn palette(self) -> &'static Palette {
        match self {
            Self::Day => &palette::DAY_BRIGHT,
            Self::Dusk => &palette::DUSK,
            Self::Dark => &palette::NIGHT,
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit sounding labels are shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthUnit {
    /// Fathoms with a smaller feet remainder
    Fathoms,
    /// Meters with one decimal
    Meters,
    /// Whole feet
    Feet,
}

impl DepthUnit {
    /// Every unit, in output order.
    pub const ALL: [Self; 3] = [Self::Fathoms, Self::Meters, Self::Feet];

    /// Lowercase name used in file names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fathoms => "fathoms",
            Self::Meters => "meters",
            Self::Feet => "feet",
        }
    }
}

impl fmt::Display for DepthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// URL the styles are served from.
///
/// ```
/// use s57tiler_core::style::base_url;
///
/// assert_eq!(base_url("localhost:8080", false), "http://localhost:8080");
/// assert_eq!(base_url("charts.example.com", true), "https://charts.example.com");
/// ```
#[must_use]
pub fn base_url(socket_address: &str, tls: bool) -> String {
    let scheme = if tls { "https" } else { "http" };
    format!("{scheme}://{socket_address}")
}

/// File name of the style for a scheme and depth unit, e.g. `day_meters_style.json`.
#[must_use]
pub fn style_file_name(color: ColorScheme, depth: DepthUnit) -> String {
    format!("{color}_{depth}_style.json")
}

/// Builds the Mapbox GL style document for one scheme and depth unit.
#[must_use]
pub fn style_document(base_url: &str, color: ColorScheme, depth: DepthUnit) -> Value {
    json!({
        "version": 8,
        "name": format!("{color}-{depth}"),
        "sources": {
            SOURCE: {
                "type": "vector",
                "url": format!("{base_url}/data/{TILESET}.json")
            }
        },
        "sprite": format!("rastersymbols-{color}"),
        "glyphs": format!("{base_url}/fonts/{{fontstack}}/{{range}}.pbf"),
        "layers": style_layers(color.palette(), depth)
    })
}

/// Writes every style into `out_dir` and returns the written paths.
///
/// # Errors
///
/// Returns an I/O error when the directory cannot be prepared or a style cannot be written.
pub fn create_style(out_dir: &Path, base_url: &str) -> Result<Vec<PathBuf>> {
    let out_dir = prepare_output_dir(out_dir)?;
    let mut written = Vec::with_capacity(DepthUnit::ALL.len() * ColorScheme::ALL.len());
    for depth in DepthUnit::ALL {
        for color in ColorScheme::ALL {
            let document = style_document(base_url, color, depth);
            let path = write_json(
                &out_dir,
                &style_file_name(color, depth),
                &document.to_string(),
            )?;
            written.push(path);
        }
    }
    info!("wrote {} styles to {}", written.len(), out_dir.display());
    Ok(written)
}

/// Builds a TileServer-GL configuration serving the chart tile set to `domains`.
#[must_use]
pub fn config_document(domains: &[String]) -> Value {
    json!({
        "options": {
            "paths": {
                "root": "",
                "fonts": "fonts",
                "sprites": "sprites",
                "styles": "styles",
                "mbtiles": ""
            },
            "domains": domains,
            "formatQuality": {
                "jpeg": 80,
                "webp": 90
            },
            "maxScaleFactor": 3,
            "maxSize": 2048,
            "pbfAlias": "pbf",
            "serveAllFonts": true,
            "serveAllStyles": true,
            "serveStaticMaps": true,
            "tileMargin": 0
        },
        "data": {
            TILESET: { "mbtiles": MBTILES_FILE }
        }
    })
}

/// Writes `out_dir/config.json` for TileServer-GL.
///
/// # Errors
///
/// Returns an I/O error when the directory cannot be prepared or the file cannot be written.
pub fn create_config(out_dir: &Path, domains: &[String]) -> Result<PathBuf> {
    let out_dir = prepare_output_dir(out_dir)?;
    let path = write_json(&out_dir, CONFIG_FILE, &config_document(domains).to_string())?;
    info!("wrote {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_style_document() {
        let style = style_document("http://localhost:8080", ColorScheme::Dusk, DepthUnit::Feet);

        assert_eq!(style["version"], 8);
        assert_eq!(style["name"], "dusk-feet");
        assert_eq!(style["sprite"], "rastersymbols-dusk");
        assert_eq!(
            style["sources"]["src_senc"]["url"],
            "http://localhost:8080/data/marine-chart.json"
        );
        assert_eq!(
            style["glyphs"],
            "http://localhost:8080/fonts/{fontstack}/{range}.pbf"
        );
        assert!(!style["layers"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_create_style_writes_every_combination() {
        let temp_dir = TempDir::new().unwrap();
        let out_dir = temp_dir.path().join("styles");

        let written = create_style(&out_dir, "https://charts.example.com").unwrap();

        assert_eq!(written.len(), 9);
        for name in [
            "day_fathoms_style.json",
            "dusk_meters_style.json",
            "dark_feet_style.json",
        ] {
            assert!(out_dir.join(name).is_file(), "{name} missing");
        }
        let contents = std::fs::read_to_string(out_dir.join("dark_feet_style.json")).unwrap();
        let style: Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(style["name"], "dark-feet");
    }

    #[test]
    fn test_create_config() {
        let temp_dir = TempDir::new().unwrap();
        let domains = vec!["127.0.0.1:8080".to_string(), "localhost:8080".to_string()];

        let path = create_config(temp_dir.path(), &domains).unwrap();

        assert_eq!(path, temp_dir.path().join(CONFIG_FILE));
        let config: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(
            config["options"]["domains"],
            json!(["127.0.0.1:8080", "localhost:8080"])
        );
        assert_eq!(config["options"]["paths"]["styles"], "styles");
        assert_eq!(config["data"]["marine-chart"]["mbtiles"], "chart.mbtiles");
    }

    #[test]
    fn test_scheme_names() {
        let names = ColorScheme::ALL.map(ColorScheme::as_str);
        assert_eq!(names, ["day", "dusk", "dark"]);
        assert_eq!(ColorScheme::Dark.palette(), &palette::NIGHT);
        assert_eq!(
            style_file_name(ColorScheme::Day, DepthUnit::Fathoms),
            "day_fathoms_style.json"
        );
    }
}
