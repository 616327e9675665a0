//! Geographic primitives and spherical geometry.
//!
//! Coordinates are degrees of latitude and longitude on a spherical earth.
//! Nothing here validates ranges; values are accepted as opaque floats.

use std::f64::consts::PI;

/// Number of vertices in a circle approximation, one per degree of bearing.
pub const CIRCLE_VERTICES: usize = 360;

/// Mean earth radius in metres (IUGG).
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl LatLng {
    /// Create a new coordinate pair.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

/// Pair latitudes and longitudes positionally.
///
/// The result is as long as the shorter input.
#[must_use]
pub fn zip_coords(lats: &[f64], lngs: &[f64]) -> Vec<LatLng> {
    lats.iter()
        .zip(lngs)
        .map(|(&lat, &lng)| LatLng::new(lat, lng))
        .collect()
}

/// Wrap a longitude in degrees into (-180, 180].
#[must_use]
pub fn wrap_longitude(lng: f64) -> f64 {
    let wrapped = (lng + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Convert a distance along the earth's surface into an angular radius.
///
/// [`approximate_circle`] takes its radius in radians of arc; use this when
/// the radius is known in metres.
#[must_use]
pub fn meters_to_angular_radius(meters: f64) -> f64 {
    meters / EARTH_RADIUS_METERS
}

/// Approximate a circle on the sphere with [`CIRCLE_VERTICES`] points.
///
/// `angular_radius` is an angular distance in **radians** and is used as-is;
/// only the centre is converted from degrees. Point `i` lies at bearing `i`
/// degrees, so the ring starts due north of the centre. The ring is not
/// explicitly closed (the first point is not repeated).
#[must_use]
pub fn approximate_circle(center: LatLng, angular_radius: f64) -> Vec<LatLng> {
    let lat1 = center.lat.to_radians();
    let lng1 = center.lng.to_radians();
    let (sin_r, cos_r) = angular_radius.sin_cos();
    let (sin_lat1, cos_lat1) = lat1.sin_cos();

    (0..CIRCLE_VERTICES)
        .map(|bearing| {
            let tc = (bearing as f64).to_radians();
            let y = (sin_lat1 * cos_r + cos_lat1 * sin_r * tc.cos()).asin();
            let dlng = (tc.sin() * sin_r * cos_lat1).atan2(cos_r - sin_lat1 * y.sin());
            // Longitude offset is subtracted: bearings advance westward.
            let x = (lng1 - dlng) * (180.0 / PI);
            LatLng::new(y.to_degrees(), wrap_longitude(x))
        })
        .collect()
}
