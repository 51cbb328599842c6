use geojson::{Geometry, JsonObject, Value};
use serde_json::json;

const FEET_PER_METER: f64 = 3.280_84;
const FEET_PER_FATHOM: f64 = 6.0;

/// A sounding expressed in the units chart labels are drawn in.
///
/// Drying heights are negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Depth {
    /// Meters, rounded to one decimal.
    pub meters: f64,
    /// Whole feet.
    pub feet: i64,
    /// Whole fathoms.
    pub fathoms: i64,
    /// Remaining feet after whole fathoms, 0 to 5.
    pub fathoms_ft: i64,
}

impl Depth {
    /// Converts a depth in meters.
    ///
    /// ```
    /// use s57tiler_core::enrich::Depth;
    ///
    /// let depth = Depth::from_meters(10.0);
    /// assert_eq!((depth.fathoms, depth.fathoms_ft), (5, 3));
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_meters(meters: f64) -> Self {
        let feet = meters * FEET_PER_METER;
        let magnitude = feet.abs();
        let mut fathoms = (magnitude / FEET_PER_FATHOM).floor() as i64;
        let mut fathoms_ft = (magnitude - fathoms as f64 * FEET_PER_FATHOM).round() as i64;
        if fathoms_ft == 6 {
            fathoms += 1;
            fathoms_ft = 0;
        }
        let sign = if meters < 0.0 { -1 } else { 1 };
        Self {
            meters: (meters * 10.0).round() / 10.0,
            feet: feet.round() as i64,
            fathoms: sign * fathoms,
            fathoms_ft,
        }
    }

    fn write_to(&self, properties: &mut JsonObject) {
        properties.insert("METERS".to_string(), json!(self.meters));
        properties.insert("FEET".to_string(), json!(self.feet));
        properties.insert("FATHOMS".to_string(), json!(self.fathoms));
        properties.insert("FATHOMS_FT".to_string(), json!(self.fathoms_ft));
    }
}

/// Labels a `SOUNDG` feature with its depth and flattens it to a 2D point.
///
/// The depth comes from the Z coordinate of a split sounding, or from the `DEPTH` attribute
/// when the driver adds one. Multipoint soundings are left untouched.
pub fn process_sounding(geometry: Geometry, properties: &mut JsonObject) -> Geometry {
    let Value::Point(position) = &geometry.value else {
        return geometry;
    };
    let depth = position
        .get(2)
        .copied()
        .or_else(|| properties.get("DEPTH").and_then(serde_json::Value::as_f64));
    let Some(meters) = depth else {
        return geometry;
    };
    Depth::from_meters(meters).write_to(properties);
    let flat = position.iter().take(2).copied().collect();
    Geometry::new(Value::Point(flat))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_units() {
        let depth = Depth::from_meters(10.0);
        assert_eq!(depth.meters, 10.0);
        assert_eq!(depth.feet, 33);
        assert_eq!(depth.fathoms, 5);
        assert_eq!(depth.fathoms_ft, 3);
    }

    #[test]
    fn test_fathom_feet_carry() {
        // 11.85 feet rounds up to a whole second fathom
        let depth = Depth::from_meters(3.612);
        assert_eq!((depth.fathoms, depth.fathoms_ft), (2, 0));
    }

    #[test]
    fn test_drying_height_is_negative() {
        let depth = Depth::from_meters(-1.2);
        assert_eq!(depth.meters, -1.2);
        assert_eq!(depth.feet, -4);
        assert_eq!(depth.fathoms, 0);
        assert_eq!(depth.fathoms_ft, 4);
    }

    #[test]
    fn test_sounding_uses_z_and_flattens() {
        let geometry = Geometry::new(Value::Point(vec![-122.4, 47.6, 12.34]));
        let mut properties = JsonObject::new();

        let out = process_sounding(geometry, &mut properties);

        assert_eq!(out.value, Value::Point(vec![-122.4, 47.6]));
        assert_eq!(properties.get("METERS"), Some(&json!(12.3)));
        assert_eq!(properties.get("FEET"), Some(&json!(40)));
    }

    #[test]
    fn test_sounding_falls_back_to_depth_attribute() {
        let geometry = Geometry::new(Value::Point(vec![-122.4, 47.6]));
        let mut properties = JsonObject::new();
        properties.insert("DEPTH".to_string(), json!(1.8288));

        process_sounding(geometry, &mut properties);

        assert_eq!(properties.get("FATHOMS"), Some(&json!(1)));
        assert_eq!(properties.get("FATHOMS_FT"), Some(&json!(0)));
    }

    #[test]
    fn test_multipoint_sounding_is_untouched() {
        let geometry = Geometry::new(Value::MultiPoint(vec![
            vec![-122.4, 47.6, 3.0],
            vec![-122.5, 47.7, 4.0],
        ]));
        let mut properties = JsonObject::new();

        let out = process_sounding(geometry.clone(), &mut properties);

        assert_eq!(out, geometry);
        assert!(properties.is_empty());
    }
}
