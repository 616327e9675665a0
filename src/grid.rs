//! Coordinate grid expansion.
//!
//! A [`GridSpec`] describes latitude and longitude ranges with step sizes.
//! [`GridSpec::lines`] validates the steps before iterating, so a zero step
//! or a step pointing away from the end of its range is reported instead of
//! looping forever or silently yielding nothing. Grids larger than
//! [`MAX_GRID_LINES`] are rejected the same way.

use crate::error::{Error, Result};
use crate::geometry::LatLng;

/// Bounds and step sizes of a coordinate grid, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    /// First latitude.
    pub start_lat: f64,
    /// Last latitude (exclusive).
    pub end_lat: f64,
    /// Latitude step.
    pub lat_step: f64,
    /// First longitude.
    pub start_lng: f64,
    /// Last longitude (exclusive).
    pub end_lng: f64,
    /// Longitude step.
    pub lng_step: f64,
}

/// A two-point grid line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    /// Segment start.
    pub start: LatLng,
    /// Segment end.
    pub end: LatLng,
}

impl GridLine {
    /// The segment as a two-point path.
    #[must_use]
    pub fn points(&self) -> [LatLng; 2] {
        [self.start, self.end]
    }
}

/// Largest number of lines a grid may expand into, summed over both axes.
pub const MAX_GRID_LINES: usize = 100_000;

/// Number of whole steps from `start` to `end`, or an error when the step
/// cannot reach `end`.
fn step_count(axis: &'static str, start: f64, end: f64, step: f64) -> Result<usize> {
    if !(start.is_finite() && end.is_finite() && step.is_finite()) {
        return Err(Error::InvalidGrid {
            axis,
            message: format!("bounds and step must be finite (start {start}, end {end}, step {step})"),
        });
    }
    if step == 0.0 {
        return Err(Error::InvalidGrid {
            axis,
            message: "step must be non-zero".to_string(),
        });
    }

    let count = ((end - start) / step).trunc();
    if count < 0.0 {
        return Err(Error::InvalidGrid {
            axis,
            message: format!("step {step} points away from end {end} (start {start})"),
        });
    }
    if count < 1.0 {
        return Err(Error::InvalidGrid {
            axis,
            message: format!("range {start}..{end} is shorter than one step of {step}"),
        });
    }
    if count > MAX_GRID_LINES as f64 {
        return Err(Error::InvalidGrid {
            axis,
            message: format!("step {step} yields more than {MAX_GRID_LINES} lines over {start}..{end}"),
        });
    }
    Ok(count as usize)
}

fn total_lines(lat_count: usize, lng_count: usize) -> Result<usize> {
    lat_count
        .checked_add(lng_count)
        .filter(|total| *total <= MAX_GRID_LINES)
        .ok_or_else(|| Error::InvalidGrid {
            axis: "longitude",
            message: format!("grid exceeds {MAX_GRID_LINES} lines ({lat_count} latitude, {lng_count} longitude)"),
        })
}

impl GridSpec {
    /// Create a grid specification.
    #[must_use]
    pub const fn new(
        start_lat: f64,
        end_lat: f64,
        lat_step: f64,
        start_lng: f64,
        end_lng: f64,
        lng_step: f64,
    ) -> Self {
        Self {
            start_lat,
            end_lat,
            lat_step,
            start_lng,
            end_lng,
            lng_step,
        }
    }

    /// Check both axes without generating lines.
    pub fn validate(&self) -> Result<()> {
        let lat_count = step_count("latitude", self.start_lat, self.end_lat, self.lat_step)?;
        let lng_count = step_count("longitude", self.start_lng, self.end_lng, self.lng_step)?;
        total_lines(lat_count, lng_count).map(|_| ())
    }

    /// Expand into line segments: every latitude line, then every
    /// longitude line. Lines sit half a step in from each grid position.
    pub fn lines(&self) -> Result<Vec<GridLine>> {
        let lat_count = step_count("latitude", self.start_lat, self.end_lat, self.lat_step)?;
        let lng_count = step_count("longitude", self.start_lng, self.end_lng, self.lng_step)?;

        let half_lat = self.lat_step / 2.0;
        let half_lng = self.lng_step / 2.0;
        let mut lines = Vec::with_capacity(total_lines(lat_count, lng_count)?);

        for i in 0..lat_count {
            let lat = self.start_lat + i as f64 * self.lat_step + half_lat;
            lines.push(GridLine {
                start: LatLng::new(lat, self.start_lng + half_lng),
                end: LatLng::new(lat, self.end_lng + half_lng),
            });
        }

        for i in 0..lng_count {
            let lng = self.start_lng + i as f64 * self.lng_step + half_lng;
            lines.push(GridLine {
                start: LatLng::new(self.start_lat + half_lat, lng),
                end: LatLng::new(self.end_lat + half_lat, lng),
            });
        }

        Ok(lines)
    }
}
