//! Map plotter: the accumulation facade.
//!
//! A [`MapPlotter`] owns one [`Scene`] and exposes the drawing calls that
//! append to it. Drawing calls never fail: style options are resolved
//! permissively and coordinates are taken as given. Errors only surface when
//! the scene is rendered (invalid grid) or written (I/O).
//!
//! ```rust,ignore
//! use trueno_map::prelude::*;
//!
//! let mut map = MapPlotter::new(37.428, -122.145, 16);
//! map.plot(&[37.42, 37.43], &[-122.14, -122.15], &StyleOptions::new().color("#3B0B39").edge_width(5.0));
//! map.circle(37.429, -122.145, 0.0001, &StyleOptions::new().color("#FF0000"));
//! map.draw("mymap.html")?;
//! ```

use crate::config::DocumentConfig;
use crate::error::Result;
use crate::geocode::Geocoder;
use crate::geometry::{approximate_circle, zip_coords, LatLng};
use crate::grid::GridSpec;
use crate::output::HtmlDocument;
use crate::scene::{HeatmapLayer, Marker, Scene, StyledPath};
use crate::style::{HeatmapStyle, StyleOptions};
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// Zoom level used by [`MapPlotter::from_geocode`] callers that have no preference.
pub const DEFAULT_ZOOM: u32 = 13;

/// Circle radius used by [`MapPlotter::scatter`] when no size is given.
pub const DEFAULT_SCATTER_SIZE: f64 = 40.0;

/// Marker title used when the caller gives none.
pub const UNSPECIFIED_TITLE: &str = "no implementation";

/// Face alpha applied to circles unless `face_alpha` is supplied.
pub const CIRCLE_FACE_ALPHA: f64 = 0.2;

/// Face colour applied to circles unless `face_color` is supplied.
pub const CIRCLE_FACE_COLOR: &str = "#000000";

/// Accumulates map primitives and renders them into an HTML document.
#[derive(Debug, Clone)]
pub struct MapPlotter {
    scene: Scene,
    config: DocumentConfig,
}

fn paired(kind: &'static str, lats: &[f64], lngs: &[f64]) -> Vec<LatLng> {
    if lats.len() != lngs.len() {
        warn!(
            kind,
            lats = lats.len(),
            lngs = lngs.len(),
            "latitude and longitude counts differ; extra values ignored"
        );
    }
    zip_coords(lats, lngs)
}

impl MapPlotter {
    /// Create a plotter centred on `(center_lat, center_lng)` at `zoom`.
    #[must_use]
    pub fn new(center_lat: f64, center_lng: f64, zoom: u32) -> Self {
        Self {
            scene: Scene::new(LatLng::new(center_lat, center_lng), zoom),
            config: DocumentConfig::default(),
        }
    }

    /// Create a plotter centred on a place name.
    ///
    /// # Errors
    ///
    /// Propagates the geocoder's [`Error::Lookup`](crate::Error::Lookup).
    pub fn from_geocode<G>(geocoder: &G, location: &str, zoom: u32) -> Result<Self>
    where
        G: Geocoder + ?Sized,
    {
        let center = geocoder.geocode(location)?;
        debug!(location, lat = center.lat, lng = center.lng, "geocoded map centre");
        Ok(Self::new(center.lat, center.lng, zoom))
    }

    /// Replace the document configuration.
    #[must_use]
    pub fn with_config(mut self, config: DocumentConfig) -> Self {
        self.config = config;
        self
    }

    /// Document configuration.
    #[must_use]
    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    /// The accumulated scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Map centre.
    #[must_use]
    pub fn center(&self) -> LatLng {
        self.scene.center()
    }

    /// Initial zoom level.
    #[must_use]
    pub fn zoom(&self) -> u32 {
        self.scene.zoom()
    }

    /// Request a coordinate grid. Replaces any earlier grid.
    ///
    /// The specification is checked when the document is rendered.
    pub fn grid(&mut self, spec: GridSpec) {
        debug!(?spec, "grid set");
        self.scene.grid = Some(spec);
    }

    /// Add a marker.
    ///
    /// Colour resolves `color`, `c`, `edge_color`, `ec`, then `#00FF00`.
    pub fn marker(&mut self, lat: f64, lng: f64, style: &StyleOptions, title: Option<&str>) {
        self.scene.markers.push(Marker {
            position: LatLng::new(lat, lng),
            color: style.marker_color(),
            title: title.unwrap_or(UNSPECIFIED_TITLE).to_string(),
        });
    }

    /// Add one marker or one circle per coordinate pair.
    ///
    /// With `marker` set, each point becomes a marker in the resolved
    /// `color` with the unspecified title. Otherwise each point becomes a
    /// circle of angular radius `size` (default [`DEFAULT_SCATTER_SIZE`]).
    pub fn scatter(
        &mut self,
        lats: &[f64],
        lngs: &[f64],
        style: &StyleOptions,
        marker: bool,
        size: Option<f64>,
    ) {
        let points = paired("scatter", lats, lngs);
        let style = style.with_short_color_folded();
        debug!(points = points.len(), marker, "scatter");

        if marker {
            let color = style.resolve().color;
            self.scene
                .markers
                .extend(points.into_iter().map(|position| Marker {
                    position,
                    color: color.clone(),
                    title: UNSPECIFIED_TITLE.to_string(),
                }));
        } else {
            let radius = size.unwrap_or(DEFAULT_SCATTER_SIZE);
            for p in points {
                self.circle(p.lat, p.lng, radius, &style);
            }
        }
    }

    /// Add a circle approximated by a 360-point ring.
    ///
    /// `radius` is an angular distance in **radians** of arc, not metres; see
    /// [`meters_to_angular_radius`](crate::geometry::meters_to_angular_radius).
    /// Circles default to a face alpha of 0.2 and a black face unless a
    /// usable face alpha or colour is given under any of its names.
    pub fn circle(&mut self, lat: f64, lng: f64, radius: f64, style: &StyleOptions) {
        let mut style = style.with_short_color_folded();
        if style.supplied_face_alpha().is_none() {
            style.face_alpha = Some(CIRCLE_FACE_ALPHA);
        }
        if style.supplied_face_color().is_none() {
            style.face_color = Some(CIRCLE_FACE_COLOR.to_string());
        }

        let points = approximate_circle(LatLng::new(lat, lng), radius);
        self.scene.shapes.push(StyledPath {
            points,
            style: style.resolve(),
        });
    }

    /// Add a polyline.
    pub fn plot(&mut self, lats: &[f64], lngs: &[f64], style: &StyleOptions) {
        let points = paired("plot", lats, lngs);
        self.scene.paths.push(StyledPath {
            points,
            style: style.with_short_color_folded().resolve(),
        });
    }

    /// Add a filled polygon.
    pub fn polygon(&mut self, lats: &[f64], lngs: &[f64], style: &StyleOptions) {
        let points = paired("polygon", lats, lngs);
        self.scene.shapes.push(StyledPath {
            points,
            style: style.with_short_color_folded().resolve(),
        });
    }

    /// Add a heatmap layer.
    pub fn heatmap(&mut self, lats: &[f64], lngs: &[f64], style: HeatmapStyle) {
        let points = paired("heatmap", lats, lngs);
        self.scene.heatmaps.push(HeatmapLayer { points, style });
    }

    /// Lower the scene into a document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGrid`](crate::Error::InvalidGrid) for an
    /// unusable grid.
    pub fn document(&self) -> Result<HtmlDocument> {
        HtmlDocument::from_scene(&self.scene, &self.config)
    }

    /// Render the scene to an HTML string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGrid`](crate::Error::InvalidGrid) for an
    /// unusable grid.
    pub fn render(&self) -> Result<String> {
        Ok(self.document()?.render())
    }

    /// Render the scene into `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unusable grid or a failed write.
    pub fn render_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        self.document()?.write_to(writer)
    }

    /// Render the scene into the file at `path`.
    ///
    /// The file is only created once the document has rendered.
    ///
    /// # Errors
    ///
    /// Returns an error for an unusable grid or a failed write.
    pub fn draw<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.document()?.write_to_file(path)?;
        debug!(path = %path.display(), "map document written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::geometry::CIRCLE_VERTICES;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_new_plotter() {
        let map = MapPlotter::new(37.428, -122.145, 16);
        assert_eq!(map.center(), LatLng::new(37.428, -122.145));
        assert_eq!(map.zoom(), 16);
        assert!(map.scene().is_empty());
    }

    #[test]
    fn test_grid_replaces() {
        let mut map = MapPlotter::new(0.0, 0.0, 1);
        map.grid(GridSpec::new(0.0, 1.0, 0.5, 0.0, 1.0, 0.5));
        map.grid(GridSpec::new(0.0, 2.0, 1.0, 0.0, 2.0, 1.0));
        assert_eq!(map.scene().grid(), Some(&GridSpec::new(0.0, 2.0, 1.0, 0.0, 2.0, 1.0)));
    }

    #[test]
    fn test_marker_defaults() {
        let mut map = MapPlotter::new(0.0, 0.0, 1);
        map.marker(1.0, 2.0, &StyleOptions::new(), None);
        map.marker(3.0, 4.0, &StyleOptions::new().c("#FF0000"), Some("Depot"));

        let markers = map.scene().markers();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].color, "#00FF00");
        assert_eq!(markers[0].title, UNSPECIFIED_TITLE);
        assert_eq!(markers[1].color, "#FF0000");
        assert_eq!(markers[1].title, "Depot");
        assert_eq!(markers[1].position, LatLng::new(3.0, 4.0));
    }

    #[test]
    fn test_scatter_circles() {
        let mut map = MapPlotter::new(0.0, 0.0, 1);
        map.scatter(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &StyleOptions::new(), false, Some(0.001));

        assert_eq!(map.scene().shapes().len(), 3);
        assert!(map.scene().markers().is_empty());
        assert!(map
            .scene()
            .shapes()
            .iter()
            .all(|s| s.points.len() == CIRCLE_VERTICES));
    }

    #[test]
    fn test_scatter_markers() {
        let mut map = MapPlotter::new(0.0, 0.0, 1);
        map.scatter(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &StyleOptions::new().c("#123456"), true, None);

        let markers = map.scene().markers();
        assert_eq!(markers.len(), 3);
        assert!(map.scene().shapes().is_empty());
        assert!(markers.iter().all(|m| m.color == "#123456"));
        assert!(markers.iter().all(|m| m.title == UNSPECIFIED_TITLE));
        assert_eq!(markers[2].position, LatLng::new(3.0, 6.0));
    }

    #[test]
    fn test_scatter_default_size() {
        let mut map = MapPlotter::new(0.0, 0.0, 1);
        map.scatter(&[0.0], &[0.0], &StyleOptions::new(), false, None);

        let mut expected = MapPlotter::new(0.0, 0.0, 1);
        expected.circle(0.0, 0.0, DEFAULT_SCATTER_SIZE, &StyleOptions::new());
        assert_eq!(map.scene().shapes(), expected.scene().shapes());
    }

    #[test]
    fn test_scatter_mismatched_lengths_truncate() {
        let mut map = MapPlotter::new(0.0, 0.0, 1);
        map.scatter(&[1.0, 2.0, 3.0], &[4.0], &StyleOptions::new(), true, None);
        assert_eq!(map.scene().markers().len(), 1);
    }

    #[test]
    fn test_circle_face_defaults() {
        let mut map = MapPlotter::new(0.0, 0.0, 1);
        map.circle(0.0, 0.0, 0.01, &StyleOptions::new());

        let shape = &map.scene().shapes()[0];
        assert_eq!(shape.points.len(), CIRCLE_VERTICES);
        assert_abs_diff_eq!(shape.style.face_alpha, 0.2);
        assert_eq!(shape.style.face_color, "#000000");
        assert_abs_diff_eq!(shape.style.edge_alpha, 1.0);
    }

    #[test]
    fn test_circle_respects_supplied_face() {
        let mut map = MapPlotter::new(0.0, 0.0, 1);
        map.circle(0.0, 0.0, 0.01, &StyleOptions::new().face_alpha(0.7).color("#FF0000"));
        map.circle(0.0, 0.0, 0.01, &StyleOptions::new().alpha(0.9));

        let shapes = map.scene().shapes();
        assert_abs_diff_eq!(shapes[0].style.face_alpha, 0.7);
        assert_eq!(shapes[0].style.face_color, "#FF0000");
        assert_abs_diff_eq!(shapes[1].style.face_alpha, 0.9);
    }

    #[test]
    fn test_circle_honours_face_aliases() {
        let style = StyleOptions::new().fa(0.5).fc("#FF0000");
        let mut map = MapPlotter::new(0.0, 0.0, 1);
        map.scatter(&[0.0], &[0.0], &style, false, Some(0.001));
        map.circle(0.0, 0.0, 0.001, &style);
        map.polygon(&[0.0, 1.0, 0.0], &[0.0, 0.0, 1.0], &style);

        for shape in map.scene().shapes() {
            assert_abs_diff_eq!(shape.style.face_alpha, 0.5);
            assert_eq!(shape.style.face_color, "#FF0000");
        }
    }

    #[test]
    fn test_circle_garbled_face_alpha_uses_circle_default() {
        let mut map = MapPlotter::new(0.0, 0.0, 1);
        map.circle(0.0, 0.0, 0.01, &StyleOptions::new().face_alpha(7.0));
        map.circle(0.0, 0.0, 0.01, &StyleOptions::new().face_alpha(f64::NAN).face_color(""));

        let shapes = map.scene().shapes();
        assert_abs_diff_eq!(shapes[0].style.face_alpha, CIRCLE_FACE_ALPHA);
        assert_abs_diff_eq!(shapes[1].style.face_alpha, CIRCLE_FACE_ALPHA);
        assert_eq!(shapes[1].style.face_color, CIRCLE_FACE_COLOR);
    }

    #[test]
    fn test_plot_and_polygon() {
        let mut map = MapPlotter::new(0.0, 0.0, 1);
        map.plot(&[0.0, 1.0], &[0.0, 1.0], &StyleOptions::new().c("#ABCDEF"));
        map.polygon(&[0.0, 1.0, 0.0], &[0.0, 0.0, 1.0], &StyleOptions::new().edge_width(3.0));

        let path = &map.scene().paths()[0];
        assert_eq!(path.points, vec![LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0)]);
        assert_eq!(path.style.edge_color, "#ABCDEF");

        let shape = &map.scene().shapes()[0];
        assert_eq!(shape.points.len(), 3);
        assert_abs_diff_eq!(shape.style.edge_width, 3.0);
        assert_abs_diff_eq!(shape.style.face_alpha, 0.3);
    }

    #[test]
    fn test_polygon_and_circle_share_order() {
        let mut map = MapPlotter::new(0.0, 0.0, 1);
        map.circle(0.0, 0.0, 0.01, &StyleOptions::new());
        map.polygon(&[0.0, 1.0, 0.0], &[0.0, 0.0, 1.0], &StyleOptions::new());
        map.circle(1.0, 1.0, 0.01, &StyleOptions::new());

        let lens: Vec<usize> = map.scene().shapes().iter().map(|s| s.points.len()).collect();
        assert_eq!(lens, vec![CIRCLE_VERTICES, 3, CIRCLE_VERTICES]);
    }

    #[test]
    fn test_heatmap() {
        let mut map = MapPlotter::new(0.0, 0.0, 1);
        map.heatmap(&[1.0, 2.0], &[3.0, 4.0], HeatmapStyle::new().radius(25));

        let layer = &map.scene().heatmaps()[0];
        assert_eq!(layer.points.len(), 2);
        assert_eq!(layer.style.radius, 25);
        assert_eq!(layer.style.threshold, 10);
    }

    #[test]
    fn test_calls_append_twice() {
        let mut map = MapPlotter::new(0.0, 0.0, 1);
        map.plot(&[0.0], &[0.0], &StyleOptions::new());
        map.plot(&[0.0], &[0.0], &StyleOptions::new());
        assert_eq!(map.scene().paths().len(), 2);
    }

    #[test]
    fn test_from_geocode() {
        let geocoder = |_: &str| -> Result<LatLng> { Ok(LatLng::new(48.8566, 2.3522)) };
        let map = MapPlotter::from_geocode(&geocoder, "Paris", DEFAULT_ZOOM).unwrap();
        assert_eq!(map.center(), LatLng::new(48.8566, 2.3522));
        assert_eq!(map.zoom(), 13);
    }

    #[test]
    fn test_from_geocode_failure() {
        let geocoder = |loc: &str| -> Result<LatLng> { Err(Error::Lookup(format!("no match for {loc}"))) };
        let result = MapPlotter::from_geocode(&geocoder, "Atlantis", DEFAULT_ZOOM);
        assert!(matches!(result, Err(Error::Lookup(_))));
    }

    #[test]
    fn test_draw_invalid_grid_creates_no_file() {
        let mut map = MapPlotter::new(0.0, 0.0, 1);
        map.grid(GridSpec::new(0.0, 1.0, 0.0, 0.0, 1.0, 0.5));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.html");
        let result = map.draw(&path);

        assert!(matches!(result, Err(Error::InvalidGrid { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn test_draw_writes_render_output() {
        let mut map = MapPlotter::new(0.0, 0.0, 1);
        map.marker(0.5, 0.5, &StyleOptions::new(), Some("x"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.html");
        map.draw(&path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), map.render().unwrap());
    }

    #[test]
    fn test_render_to_failing_sink() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let map = MapPlotter::new(0.0, 0.0, 1);
        let result = map.render_to(&mut Broken);
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_with_config() {
        let config = DocumentConfig {
            title: "Survey".to_string(),
            ..DocumentConfig::default()
        };
        let map = MapPlotter::new(0.0, 0.0, 1).with_config(config);
        assert_eq!(map.config().title, "Survey");
        assert!(map.render().unwrap().contains("<title>Survey</title>"));
    }
}
