//! The accumulated map scene.
//!
//! A [`Scene`] is owned by a single [`MapPlotter`](crate::plotter::MapPlotter)
//! and only grows: primitives are appended in call order and that order is the
//! draw order of the rendered document.

use crate::geometry::LatLng;
use crate::grid::GridSpec;
use crate::style::{HeatmapStyle, StyleRecord};

/// A map marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Marker position.
    pub position: LatLng,
    /// Resolved marker colour.
    pub color: String,
    /// Hover title.
    pub title: String,
}

/// A coordinate sequence with its resolved style.
///
/// Used both for polylines and for filled shapes (polygons and circles).
#[derive(Debug, Clone, PartialEq)]
pub struct StyledPath {
    /// Vertices in order.
    pub points: Vec<LatLng>,
    /// Resolved style.
    pub style: StyleRecord,
}

/// A heatmap layer: weighted-equally points plus layer settings.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapLayer {
    /// Sample points.
    pub points: Vec<LatLng>,
    /// Layer settings.
    pub style: HeatmapStyle,
}

/// Canvas configuration plus every accumulated primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    center: LatLng,
    zoom: u32,
    pub(crate) grid: Option<GridSpec>,
    pub(crate) markers: Vec<Marker>,
    pub(crate) paths: Vec<StyledPath>,
    pub(crate) shapes: Vec<StyledPath>,
    pub(crate) heatmaps: Vec<HeatmapLayer>,
}

impl Scene {
    /// Create an empty scene. Centre and zoom are fixed for its lifetime.
    #[must_use]
    pub fn new(center: LatLng, zoom: u32) -> Self {
        Self {
            center,
            zoom,
            grid: None,
            markers: Vec::new(),
            paths: Vec::new(),
            shapes: Vec::new(),
            heatmaps: Vec::new(),
        }
    }

    /// Map centre.
    #[must_use]
    pub fn center(&self) -> LatLng {
        self.center
    }

    /// Initial zoom level.
    #[must_use]
    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    /// Grid specification, if one was requested.
    #[must_use]
    pub fn grid(&self) -> Option<&GridSpec> {
        self.grid.as_ref()
    }

    /// Markers in insertion order.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Polylines in insertion order.
    #[must_use]
    pub fn paths(&self) -> &[StyledPath] {
        &self.paths
    }

    /// Polygons and circles in insertion order.
    #[must_use]
    pub fn shapes(&self) -> &[StyledPath] {
        &self.shapes
    }

    /// Heatmap layers in insertion order.
    #[must_use]
    pub fn heatmaps(&self) -> &[HeatmapLayer] {
        &self.heatmaps
    }

    /// Total number of primitives (grid excluded).
    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.markers.len() + self.paths.len() + self.shapes.len() + self.heatmaps.len()
    }

    /// Whether no primitive and no grid has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grid.is_none() && self.primitive_count() == 0
    }
}
