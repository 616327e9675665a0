//! # Trueno-Map
//!
//! Map overlay builder: accumulate geospatial drawing primitives and render
//! them into a single self-contained HTML document that drives the Google
//! Maps JavaScript runtime.
//!
//! ## Features
//!
//! - **Markers, polylines, polygons, circles and heatmap layers** appended in
//!   call order, which is also their draw order
//! - **Permissive styling**: named options with short aliases (`c`, `ec`,
//!   `ea`, ...) resolved through a fixed cascade into complete style records
//! - **Spherical circles**: 360-vertex rings from the destination-point formula
//! - **Deterministic output**: the same scene always renders to the same bytes
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use trueno_map::prelude::*;
//!
//! let mut map = MapPlotter::new(37.428, -122.145, 16);
//! map.scatter(&[37.428, 37.429], &[-122.145, -122.146], &StyleOptions::new().c("#3B0B39"), true, None);
//! map.heatmap(&[37.428, 37.430], &[-122.145, -122.142], HeatmapStyle::default());
//! map.draw("mymap.html")?;
//! ```
//!
//! ## Units
//!
//! Coordinates are degrees. Circle radii are angular distances in **radians**
//! of arc; convert metres with [`geometry::meters_to_angular_radius`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in geometry code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Geographic coordinates and spherical geometry.
pub mod geometry;

/// Style options and resolved style records.
pub mod style;

/// Coordinate grid expansion.
pub mod grid;

/// The accumulated scene.
pub mod scene;

// ============================================================================
// Building and Rendering
// ============================================================================

/// Map plotter facade.
pub mod plotter;

/// Output encoders (HTML).
pub mod output;

/// Document configuration.
pub mod config;

/// Geocoding seam.
pub mod geocode;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-map operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust,ignore
/// use trueno_map::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{DocumentConfig, MapType};
    pub use crate::error::{Error, Result};
    pub use crate::geocode::Geocoder;
    pub use crate::geometry::LatLng;
    pub use crate::grid::GridSpec;
    pub use crate::output::HtmlDocument;
    pub use crate::plotter::MapPlotter;
    pub use crate::scene::Scene;
    pub use crate::style::{GradientStop, HeatmapStyle, StyleOptions, StyleRecord};
}
