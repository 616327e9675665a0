//! Geocoding seam.
//!
//! Resolving a place name to coordinates needs a network lookup, which this
//! crate leaves to the caller. [`Geocoder`] is the boundary: anything that
//! turns a location string into a [`LatLng`] can seed a
//! [`MapPlotter`](crate::plotter::MapPlotter). Helpers are provided for
//! building the request URL and parsing the JSON response of the Google
//! geocoding endpoint.

use crate::error::{Error, Result};
use crate::geometry::LatLng;
use serde::Deserialize;

/// Base URL of the geocoding endpoint.
pub const GEOCODE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Resolves a free-text location to its best-match coordinates.
pub trait Geocoder {
    /// Look up `location`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lookup`] when no usable result exists.
    fn geocode(&self, location: &str) -> Result<LatLng>;
}

impl<F> Geocoder for F
where
    F: Fn(&str) -> Result<LatLng>,
{
    fn geocode(&self, location: &str) -> Result<LatLng> {
        self(location)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

/// Build the request URL for `location`.
///
/// The address is wrapped in double quotes; characters that would break the
/// query string are percent-escaped.
#[must_use]
pub fn geocode_request_url(location: &str) -> String {
    let mut encoded = String::with_capacity(location.len() + 6);
    encoded.push_str("%22");
    for ch in location.chars() {
        match ch {
            ' ' => encoded.push_str("%20"),
            '"' => encoded.push_str("%22"),
            '&' => encoded.push_str("%26"),
            '#' => encoded.push_str("%23"),
            '+' => encoded.push_str("%2B"),
            '%' => encoded.push_str("%25"),
            '?' => encoded.push_str("%3F"),
            c => encoded.push(c),
        }
    }
    encoded.push_str("%22");
    format!("{GEOCODE_ENDPOINT}?address={encoded}")
}

/// Extract the first result's location from a geocoding JSON response.
///
/// # Errors
///
/// Returns [`Error::Lookup`] if the body is not valid JSON, lacks the
/// expected structure, or contains no results.
pub fn parse_geocode_response(body: &str) -> Result<LatLng> {
    let response: GeocodeResponse = serde_json::from_str(body)
        .map_err(|e| Error::Lookup(format!("malformed geocode response: {e}")))?;

    let first = response.results.into_iter().next().ok_or_else(|| {
        let status = response.status.as_deref().unwrap_or("unknown");
        Error::Lookup(format!("no results (status {status})"))
    })?;

    let Location { lat, lng } = first.geometry.location;
    Ok(LatLng::new(lat, lng))
}
