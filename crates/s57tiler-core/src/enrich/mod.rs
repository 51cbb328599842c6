//! Per object class post processing of converted features.
//!
//! GDAL hands back S-57 attributes verbatim. Styling a web map needs a few derived values:
//! a minimum zoom for every feature, depth labels for soundings, and a symbol name for lights.

mod colour;
mod lights;
mod scamin;
mod soundg;

pub use colour::Colour;
pub use lights::{light_symbol, process_lights};
pub use scamin::{MINZ, process_scamin};
pub use soundg::{Depth, process_sounding};

use geojson::{Geometry, JsonObject};

use crate::error::Result;
use crate::zoom::ZoomFinder;

/// Applies every enrichment relevant to `layer_name` and returns the (possibly rewritten)
/// geometry.
///
/// # Errors
///
/// Propagates [`process_scamin`] failures.
pub fn enrich_feature(
    layer_name: &str,
    geometry: Geometry,
    center_lat: f64,
    zoom: &ZoomFinder,
    properties: &mut JsonObject,
) -> Result<Geometry> {
    process_scamin(zoom, center_lat, properties)?;
    Ok(match layer_name {
        "SOUNDG" => process_sounding(geometry, properties),
        "LIGHTS" => process_lights(geometry, properties),
        _ => geometry,
    })
}
