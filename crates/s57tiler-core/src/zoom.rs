//! Conversion of S-57 display scales to web map zoom levels.
//!
//! See <https://docs.mapbox.com/help/glossary/zoom-level/>.

use gdal::spatial_ref::{AxisMappingStrategy, CoordTransform, SpatialRef};

use crate::builder::WGS84_EPSG;
use crate::error::{FormatError, Result};

/// Highest zoom level a feature can be assigned.
pub const MAX_ZOOM: i64 = 30;

/// Mean earth radius used for great circle distances, in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// EPSG code of spherical (web) mercator.
pub const WEB_MERCATOR_EPSG: u32 = 3857;

/// SCAMIN values within an ENC are set 1, 2, 3 or 4 steps smaller scale than the compilation
/// scale of the cell.
const SCAMIN_STEP: i64 = 1;

#[derive(Debug, Copy, Clone)]
struct GeoPoint {
    lat: f64,
    lng: f64,
}

fn haversine_distance(origin: GeoPoint, destination: GeoPoint) -> f64 {
    let delta_lat = (destination.lat - origin.lat).to_radians();
    let delta_lng = (destination.lng - origin.lng).to_radians();
    let central_angle_inner = (delta_lat / 2.0).sin().powi(2)
        + origin.lat.to_radians().cos()
            * destination.lat.to_radians().cos()
            * (delta_lng / 2.0).sin().powi(2);
    let central_angle = 2.0 * central_angle_inner.sqrt().asin();
    EARTH_RADIUS_M * central_angle
}

fn zoom_for_true_scale(true_scale: f64) -> i64 {
    let mut z = MAX_ZOOM;
    let mut ts = true_scale;
    while ts > 1.0 {
        ts /= 2.0;
        z -= 1;
    }
    z - SCAMIN_STEP
}

/// Maps S-57 display scales to zoom levels.
///
/// Holds the WGS84 to web mercator transform so it is built once per export.
pub struct ZoomFinder {
    to_mercator: CoordTransform,
}

impl ZoomFinder {
    /// Creates a finder.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::SpatialRef`] or [`FormatError::Transform`] when GDAL cannot
    /// build the reference systems or the transform between them.
    pub fn new() -> Result<Self> {
        let spatial_ref = |epsg: u32| {
            SpatialRef::from_epsg(epsg).map_err(|source| FormatError::SpatialRef { epsg, source })
        };
        let mut wgs84 = spatial_ref(WGS84_EPSG)?;
        wgs84.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);
        let mut mercator = spatial_ref(WEB_MERCATOR_EPSG)?;
        mercator.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);

        let to_mercator =
            CoordTransform::new(&wgs84, &mercator).map_err(|source| FormatError::Transform {
                from: WGS84_EPSG,
                to: WEB_MERCATOR_EPSG,
                source,
            })?;
        Ok(Self { to_mercator })
    }

    /// Distance between two points in web mercator meters.
    fn mercator_distance(&self, origin: GeoPoint, destination: GeoPoint) -> Result<f64> {
        let mut x = [origin.lng, destination.lng];
        let mut y = [origin.lat, destination.lat];
        self.to_mercator
            .transform_coords(&mut x, &mut y, &mut [])
            .map_err(|source| FormatError::Transform {
                from: WGS84_EPSG,
                to: WEB_MERCATOR_EPSG,
                source,
            })?;
        Ok(((x[0] - x[1]).powi(2) + (y[0] - y[1]).powi(2)).sqrt())
    }

    /// Ratio of projected to true distance for one degree of longitude at `latitude`.
    fn latitude_distortion(&self, latitude: f64) -> Result<f64> {
        let origin = GeoPoint {
            lat: latitude,
            lng: 0.0,
        };
        let destination = GeoPoint {
            lat: latitude,
            lng: 1.0,
        };
        Ok(self.mercator_distance(origin, destination)? / haversine_distance(origin, destination))
    }

    /// Returns the minimum zoom level at which a feature with display scale `scale` should
    /// appear when located at `latitude`.
    ///
    /// ```no_run
    /// use s57tiler_core::zoom::ZoomFinder;
    ///
    /// let finder = ZoomFinder::new()?;
    /// assert_eq!(finder.find_zoom(29999, 47.270827)?, 13);
    /// # Ok::<(), s57tiler_core::error::S57Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Transform`] if GDAL fails to project the sample points.
    pub fn find_zoom(&self, scale: i64, latitude: f64) -> Result<i64> {
        #[allow(clippy::cast_precision_loss)]
        let true_scale = scale as f64 * self.latitude_distortion(latitude)?;
        Ok(zoom_for_true_scale(true_scale))
    }
}
