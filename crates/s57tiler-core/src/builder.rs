//! Conversion of GDAL features into GeoJSON.
//!
//! Attributes become GeoJSON properties, geometries are reprojected to WGS84 lon/lat when the
//! layer uses another reference system, and the result is passed through [`crate::enrich`].

use gdal::spatial_ref::{AxisMappingStrategy, SpatialRef};
use gdal::vector::{Feature, FieldValue, Geometry, Layer, LayerAccess};
use geojson::{FeatureCollection, JsonObject};
use log::{debug, trace};
use serde_json::{Number, Value};

use crate::enrich::enrich_feature;
use crate::error::{FormatError, Result};
use crate::zoom::ZoomFinder;

/// EPSG code of WGS84, the only reference system GeoJSON allows.
pub const WGS84_EPSG: u32 = 4326;

/// Converts a single field value to JSON.
///
/// Returns `None` for values that carry no information: empty strings and non-finite reals.
#[must_use]
pub fn field_value_to_json(value: &FieldValue) -> Option<Value> {
    match value {
        FieldValue::IntegerValue(v) => Some(Value::from(*v)),
        FieldValue::Integer64Value(v) => Some(Value::from(*v)),
        FieldValue::RealValue(v) => Number::from_f64(*v).map(Value::Number),
        FieldValue::StringValue(v) => {
            if v.is_empty() {
                None
            } else {
                Some(Value::String(v.clone()))
            }
        },
        FieldValue::IntegerListValue(v) => Some(v.iter().copied().map(Value::from).collect()),
        FieldValue::Integer64ListValue(v) => Some(v.iter().copied().map(Value::from).collect()),
        FieldValue::RealListValue(v) => Some(
            v.iter()
                .filter_map(|ea| Number::from_f64(*ea))
                .map(Value::Number)
                .collect(),
        ),
        FieldValue::StringListValue(v) => Some(v.iter().cloned().map(Value::String).collect()),
        FieldValue::DateValue(v) => Some(Value::String(v.to_string())),
        FieldValue::DateTimeValue(v) => Some(Value::String(v.to_rfc3339())),
    }
}

/// Collects the non-empty attributes of a feature.
#[must_use]
pub fn feature_properties(feature: &Feature) -> JsonObject {
    feature
        .fields()
        .filter_map(|(name, value)| {
            value
                .as_ref()
                .and_then(field_value_to_json)
                .map(|json| (name, json))
        })
        .collect()
}

/// Latitude of the geometry's centroid.
///
/// Returns `None` when GDAL cannot compute a centroid or the centroid is empty.
#[must_use]
pub fn centroid_latitude(geometry: &Geometry) -> Option<f64> {
    geometry
        .centroid()
        .filter(|centroid| !centroid.is_empty())
        .map(|centroid| centroid.get_point(0).1)
}

/// Builds GeoJSON features for one layer.
pub struct FeatureBuilder {
    target: SpatialRef,
    zoom: ZoomFinder,
}

impl FeatureBuilder {
    /// Creates a builder producing WGS84 lon/lat coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::SpatialRef`] if GDAL cannot build the WGS84 reference, and
    /// propagates [`ZoomFinder::new`] failures.
    pub fn new() -> Result<Self> {
        let mut target =
            SpatialRef::from_epsg(WGS84_EPSG).map_err(|source| FormatError::SpatialRef {
                epsg: WGS84_EPSG,
                source,
            })?;
        target.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);
        Ok(Self {
            target,
            zoom: ZoomFinder::new()?,
        })
    }

    fn needs_transform(&self, source: Option<SpatialRef>) -> bool {
        source.is_some_and(|sr| sr.auth_code().ok() != self.target.auth_code().ok())
    }

    /// Converts one feature.
    ///
    /// Features without a geometry, or whose geometry has no centroid, yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidGeometry`] when GDAL cannot reproject or serialize the
    /// geometry, and propagates enrichment failures.
    pub fn build(&self, layer_name: &str, feature: &Feature) -> Result<Option<geojson::Feature>> {
        let Some(geometry) = feature.geometry() else {
            return Ok(None);
        };
        let invalid = |message: String| FormatError::InvalidGeometry {
            layer: layer_name.to_string(),
            message,
        };

        let transformed;
        let geometry = if self.needs_transform(geometry.spatial_ref()) {
            trace!("performing coordinate transform");
            transformed = geometry
                .transform_to(&self.target)
                .map_err(|e| invalid(e.to_string()))?;
            &transformed
        } else {
            geometry
        };

        let Some(center_lat) = centroid_latitude(geometry) else {
            debug!("layer {layer_name}: dropping feature without a centroid");
            return Ok(None);
        };
        let json = geometry.json().map_err(|e| invalid(e.to_string()))?;
        let geometry: geojson::Geometry =
            serde_json::from_str(&json).map_err(|e| invalid(e.to_string()))?;

        let mut properties = feature_properties(feature);
        let geometry =
            enrich_feature(layer_name, geometry, center_lat, &self.zoom, &mut properties)?;

        Ok(Some(geojson::Feature {
            bbox: None,
            geometry: Some(geometry),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }))
    }

    /// Converts every feature of `layer`.
    ///
    /// Returns `Ok(None)` when the layer has no feature with a geometry.
    ///
    /// # Errors
    ///
    /// Propagates the first [`FeatureBuilder::build`] failure.
    pub fn collection_from_layer(&self, layer: &mut Layer) -> Result<Option<FeatureCollection>> {
        let name = layer.name();
        let mut features = Vec::new();
        for feature in layer.features() {
            if let Some(converted) = self.build(&name, &feature)? {
                features.push(converted);
            }
        }
        debug!("layer {name}: {} feature(s) converted", features.len());

        if features.is_empty() {
            return Ok(None);
        }
        Ok(Some(FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_values() {
        assert_eq!(
            field_value_to_json(&FieldValue::IntegerValue(7)),
            Some(json!(7))
        );
        assert_eq!(
            field_value_to_json(&FieldValue::Integer64Value(1_234_567_890_123)),
            Some(json!(1_234_567_890_123_i64))
        );
    }

    #[test]
    fn test_empty_string_is_dropped() {
        assert_eq!(
            field_value_to_json(&FieldValue::StringValue(String::new())),
            None
        );
        assert_eq!(
            field_value_to_json(&FieldValue::StringValue("Shilshole".to_string())),
            Some(json!("Shilshole"))
        );
    }

    #[test]
    fn test_non_finite_real_is_dropped() {
        assert_eq!(field_value_to_json(&FieldValue::RealValue(f64::NAN)), None);
        assert_eq!(
            field_value_to_json(&FieldValue::RealValue(2.5)),
            Some(json!(2.5))
        );
    }

    #[test]
    fn test_list_values() {
        assert_eq!(
            field_value_to_json(&FieldValue::StringListValue(vec![
                "3".to_string(),
                "1".to_string()
            ])),
            Some(json!(["3", "1"]))
        );
        assert_eq!(
            field_value_to_json(&FieldValue::IntegerListValue(vec![1, 2])),
            Some(json!([1, 2]))
        );
        assert_eq!(
            field_value_to_json(&FieldValue::RealListValue(vec![1.5, f64::INFINITY])),
            Some(json!([1.5]))
        );
    }

    #[test]
    fn test_date_values() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(
            field_value_to_json(&FieldValue::DateValue(date)),
            Some(json!("2024-03-01"))
        );

        let date_time = chrono::DateTime::parse_from_rfc3339("2024-03-01T12:30:00+02:00").unwrap();
        assert_eq!(
            field_value_to_json(&FieldValue::DateTimeValue(date_time)),
            Some(json!("2024-03-01T12:30:00+02:00"))
        );
    }

    #[test]
    fn test_centroid_latitude_of_polygon() {
        // Bounding box midpoint is 15, the centroid sits at a third of the height
        let polygon = Geometry::from_wkt("POLYGON ((0 0, 10 0, 0 30, 0 0))").unwrap();
        let lat = centroid_latitude(&polygon).unwrap();
        assert!((lat - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_centroid_latitude_of_empty_geometry() {
        let empty = Geometry::from_wkt("POINT EMPTY").unwrap();
        assert_eq!(centroid_latitude(&empty), None);
    }

    #[test]
    fn test_builder_targets_wgs84() {
        let builder = FeatureBuilder::new().unwrap();
        assert_eq!(builder.target.auth_code().unwrap(), 4326);
        assert!(!builder.needs_transform(None));
        assert!(!builder.needs_transform(Some(SpatialRef::from_epsg(4326).unwrap())));
        assert!(builder.needs_transform(Some(SpatialRef::from_epsg(3857).unwrap())));
    }
}
