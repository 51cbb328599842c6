use geojson::JsonObject;
use serde_json::{Value, json};

use crate::error::Result;
use crate::zoom::{MAX_ZOOM, ZoomFinder};

/// Property holding the minimum zoom level derived from `SCAMIN`.
pub const MINZ: &str = "MINZ";

/// Inserts `MINZ` into `properties`.
///
/// `center_lat` is the latitude of the feature's centroid. A feature without a usable `SCAMIN`
/// (missing or negative) is visible at every zoom level up to [`MAX_ZOOM`].
///
/// # Errors
///
/// Propagates [`ZoomFinder::find_zoom`] failures.
pub fn process_scamin(
    zoom: &ZoomFinder,
    center_lat: f64,
    properties: &mut JsonObject,
) -> Result<()> {
    let scamin = properties
        .get("SCAMIN")
        .and_then(scamin_value)
        .filter(|scamin| *scamin >= 0);
    let min_z = match scamin {
        Some(scamin) => zoom.find_zoom(scamin, center_lat)?,
        None => MAX_ZOOM,
    };
    properties.insert(MINZ.to_string(), json!(min_z));
    Ok(())
}

fn scamin_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minz(scamin: Option<Value>, center_lat: f64) -> Option<Value> {
        let zoom = ZoomFinder::new().unwrap();
        let mut properties = JsonObject::new();
        if let Some(scamin) = scamin {
            properties.insert("SCAMIN".to_string(), scamin);
        }
        process_scamin(&zoom, center_lat, &mut properties).unwrap();
        properties.get(MINZ).cloned()
    }

    #[test]
    fn test_scamin_sets_minz() {
        assert_eq!(minz(Some(json!(29999)), 47.270827), Some(json!(13)));
    }

    #[test]
    fn test_string_scamin_is_accepted() {
        assert_eq!(minz(Some(json!("29999")), 0.0), Some(json!(14)));
    }

    #[test]
    fn test_missing_scamin_defaults_to_max_zoom() {
        assert_eq!(minz(None, 47.0), Some(json!(MAX_ZOOM)));
    }

    #[test]
    fn test_negative_scamin_defaults_to_max_zoom() {
        assert_eq!(minz(Some(json!(-1)), 47.0), Some(json!(MAX_ZOOM)));
    }
}
