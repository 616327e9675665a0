//! HTML map document output.
//!
//! A [`Scene`] is first lowered into an ordered list of typed [`Section`]s,
//! then each section is serialized by its own formatter. Section order is
//! fixed: canvas setup, grid lines, markers, paths, shapes, heatmap layers.
//! Within a group, primitives keep their insertion order, so the same scene
//! always renders to the same bytes.

use crate::config::{DocumentConfig, MapType};
use crate::error::Result;
use crate::geometry::LatLng;
use crate::scene::{HeatmapLayer, Scene, StyledPath};
use crate::style::{HeatmapStyle, StyleOptions, StyleRecord};
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Group of primitives in the initialization script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Coordinate grid lines.
    Grid,
    /// Markers.
    Markers,
    /// Polylines.
    Paths,
    /// Polygons and circles.
    Shapes,
    /// Heatmap layers.
    Heatmaps,
}

impl SectionKind {
    /// Comment label that introduces the group in the script.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Markers => "markers",
            Self::Paths => "paths",
            Self::Shapes => "shapes",
            Self::Heatmaps => "heatmaps",
        }
    }
}

/// Stroke attributes of a line or outline.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    /// Stroke colour, emitted verbatim.
    pub color: String,
    /// Stroke opacity.
    pub opacity: f64,
    /// Stroke weight, emitted as an integer.
    pub weight: f64,
}

/// Fill attributes of a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    /// Fill colour, emitted verbatim.
    pub color: String,
    /// Fill opacity.
    pub opacity: f64,
}

impl From<&StyleRecord> for Stroke {
    fn from(style: &StyleRecord) -> Self {
        Self {
            color: style.edge_color.clone(),
            opacity: style.edge_alpha,
            weight: style.edge_width,
        }
    }
}

impl From<&StyleRecord> for Fill {
    fn from(style: &StyleRecord) -> Self {
        Self {
            color: style.face_color.clone(),
            opacity: style.face_alpha,
        }
    }
}

/// One unit of the initialization script.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum Section {
    /// Map construction.
    Canvas {
        center: LatLng,
        zoom: u32,
        map_type: MapType,
        canvas_id: String,
    },
    /// Start of a primitive group.
    Group(SectionKind),
    /// Marker with hover title.
    Marker { position: LatLng, title: String },
    /// Open polyline.
    Polyline { points: Vec<LatLng>, stroke: Stroke },
    /// Filled polygon.
    Polygon {
        points: Vec<LatLng>,
        stroke: Stroke,
        fill: Fill,
    },
    /// Heatmap layer.
    Heatmap {
        points: Vec<LatLng>,
        style: HeatmapStyle,
    },
}

/// A complete map document ready to be serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlDocument {
    title: String,
    script_url: String,
    canvas_id: String,
    sections: Vec<Section>,
}

impl HtmlDocument {
    /// Lower a scene into document sections.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGrid`](crate::Error::InvalidGrid) when the
    /// scene's grid cannot be expanded. Nothing has been written at that
    /// point.
    pub fn from_scene(scene: &Scene, config: &DocumentConfig) -> Result<Self> {
        let grid_lines = match scene.grid() {
            Some(spec) => spec.lines()?,
            None => Vec::new(),
        };

        let mut sections = Vec::with_capacity(
            6 + grid_lines.len() + scene.primitive_count(),
        );
        sections.push(Section::Canvas {
            center: scene.center(),
            zoom: scene.zoom(),
            map_type: config.map_type,
            canvas_id: config.canvas_id.clone(),
        });

        if !grid_lines.is_empty() {
            let grid_style = StyleOptions::new().color("#000000").resolve();
            sections.push(Section::Group(SectionKind::Grid));
            sections.extend(grid_lines.iter().map(|line| Section::Polyline {
                points: line.points().to_vec(),
                stroke: Stroke::from(&grid_style),
            }));
        }

        if !scene.markers().is_empty() {
            sections.push(Section::Group(SectionKind::Markers));
            sections.extend(scene.markers().iter().map(|m| Section::Marker {
                position: m.position,
                title: m.title.clone(),
            }));
        }

        if !scene.paths().is_empty() {
            sections.push(Section::Group(SectionKind::Paths));
            sections.extend(scene.paths().iter().map(|StyledPath { points, style }| {
                Section::Polyline {
                    points: points.clone(),
                    stroke: Stroke::from(style),
                }
            }));
        }

        if !scene.shapes().is_empty() {
            sections.push(Section::Group(SectionKind::Shapes));
            sections.extend(scene.shapes().iter().map(|StyledPath { points, style }| {
                Section::Polygon {
                    points: points.clone(),
                    stroke: Stroke::from(style),
                    fill: Fill::from(style),
                }
            }));
        }

        if !scene.heatmaps().is_empty() {
            sections.push(Section::Group(SectionKind::Heatmaps));
            sections.extend(scene.heatmaps().iter().map(|HeatmapLayer { points, style }| {
                Section::Heatmap {
                    points: points.clone(),
                    style: style.clone(),
                }
            }));
        }

        Ok(Self {
            title: config.title.clone(),
            script_url: config.script_url(),
            canvas_id: config.canvas_id.clone(),
            sections,
        })
    }

    /// Sections in emission order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Render to an HTML string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(4096 + self.sections.len() * 256);

        out.push_str("<html>\n<head>\n");
        out.push_str("<meta name=\"viewport\" content=\"initial-scale=1.0, user-scalable=no\" />\n");
        out.push_str("<meta http-equiv=\"content-type\" content=\"text/html; charset=UTF-8\"/>\n");
        let _ = writeln!(out, "<title>{}</title>", escape_html(&self.title));
        let _ = writeln!(
            out,
            "<script type=\"text/javascript\" src=\"{}\"></script>",
            escape_html(&self.script_url)
        );
        out.push_str("<script type=\"text/javascript\">\n");
        out.push_str("\tfunction initialize() {\n");

        for section in &self.sections {
            write_section(&mut out, section);
        }

        out.push_str("\t}\n</script>\n</head>\n");
        out.push_str("<body style=\"margin:0px; padding:0px;\" onload=\"initialize()\">\n");
        let _ = writeln!(
            out,
            "\t<div id=\"{}\" style=\"width: 100%; height: 100%;\"></div>",
            escape_html(&self.canvas_id)
        );
        out.push_str("</body>\n</html>\n");

        debug!(
            sections = self.sections.len(),
            bytes = out.len(),
            "rendered map document"
        );
        out
    }

    /// Write the rendered document to `writer` in one piece.
    ///
    /// # Errors
    ///
    /// Returns an error if writing or flushing fails.
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(self.render().as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let html = self.render();
        let mut file = File::create(path)?;
        file.write_all(html.as_bytes())?;
        file.flush()?;
        Ok(())
    }
}

/// Format a coordinate pair as a runtime `LatLng`.
fn lat_lng(p: LatLng) -> String {
    format!("new google.maps.LatLng({:.6}, {:.6})", p.lat, p.lng)
}

fn write_coords(out: &mut String, var: &str, points: &[LatLng]) {
    let _ = writeln!(out, "var {var} = [");
    for p in points {
        let _ = writeln!(out, "{},", lat_lng(*p));
    }
    out.push_str("];\n\n");
}

fn write_stroke(out: &mut String, stroke: &Stroke) {
    let _ = writeln!(out, "strokeColor: \"{}\",", escape_js(&stroke.color));
    let _ = writeln!(out, "strokeOpacity: {:.6},", stroke.opacity);
    let _ = writeln!(out, "strokeWeight: {}", stroke.weight.trunc() as i64);
}

fn write_section(out: &mut String, section: &Section) {
    match section {
        Section::Canvas {
            center,
            zoom,
            map_type,
            canvas_id,
        } => {
            let _ = writeln!(
                out,
                "\t\tvar centerlatlng = new google.maps.LatLng({:.6}, {:.6});",
                center.lat, center.lng
            );
            out.push_str("\t\tvar myOptions = {\n");
            let _ = writeln!(out, "\t\t\tzoom: {zoom},");
            out.push_str("\t\t\tcenter: centerlatlng,\n");
            let _ = writeln!(
                out,
                "\t\t\tmapTypeId: google.maps.MapTypeId.{}",
                map_type.runtime_id()
            );
            out.push_str("\t\t};\n");
            let _ = writeln!(
                out,
                "\t\tvar map = new google.maps.Map(document.getElementById(\"{}\"), myOptions);",
                escape_js(canvas_id)
            );
            out.push('\n');
        }
        Section::Group(kind) => {
            let _ = writeln!(out, "\t\t// {}", kind.label());
        }
        Section::Marker { position, title } => {
            let _ = writeln!(out, "\t\tvar latlng = {};", lat_lng(*position));
            out.push_str("\t\tvar marker = new google.maps.Marker({\n");
            let _ = writeln!(out, "\t\ttitle: \"{}\",", escape_js(title));
            out.push_str("\t\tposition: latlng\n");
            out.push_str("\t\t});\n");
            out.push_str("\t\tmarker.setMap(map);\n\n");
        }
        Section::Polyline { points, stroke } => {
            write_coords(out, "PolylineCoordinates", points);
            out.push_str("var Path = new google.maps.Polyline({\n");
            out.push_str("clickable: false,\n");
            out.push_str("geodesic: true,\n");
            out.push_str("path: PolylineCoordinates,\n");
            write_stroke(out, stroke);
            out.push_str("});\n\n");
            out.push_str("Path.setMap(map);\n\n\n");
        }
        Section::Polygon {
            points,
            stroke,
            fill,
        } => {
            write_coords(out, "coords", points);
            out.push_str("var polygon = new google.maps.Polygon({\n");
            out.push_str("clickable: false,\n");
            out.push_str("geodesic: true,\n");
            let _ = writeln!(out, "fillColor: \"{}\",", escape_js(&fill.color));
            let _ = writeln!(out, "fillOpacity: {:.6},", fill.opacity);
            out.push_str("paths: coords,\n");
            write_stroke(out, stroke);
            out.push_str("});\n\n");
            out.push_str("polygon.setMap(map);\n\n\n");
        }
        Section::Heatmap { points, style } => {
            write_coords(out, "heatmap_points", points);
            out.push_str("var pointArray = new google.maps.MVCArray(heatmap_points);\n");
            out.push_str("var heatmap;\n");
            out.push_str("heatmap = new google.maps.visualization.HeatmapLayer({\n\n");
            out.push_str("data: pointArray\n");
            out.push_str("});\n");
            out.push_str("heatmap.setMap(map);\n");
            write_heatmap_settings(out, style);
        }
    }
}

fn write_heatmap_settings(out: &mut String, style: &HeatmapStyle) {
    let _ = writeln!(out, "heatmap.set('threshold', {});", style.threshold);
    let _ = writeln!(out, "heatmap.set('radius', {});", style.radius);
    let _ = writeln!(out, "heatmap.set('opacity', {:.6});", style.opacity);
    let _ = writeln!(out, "heatmap.set('dissipating', {});", style.dissipating);

    if let Some(gradient) = &style.gradient {
        out.push_str("var gradient = [\n");
        for stop in gradient {
            let _ = writeln!(
                out,
                "\t'rgba({}, {}, {}, {})',",
                stop.r, stop.g, stop.b, stop.a
            );
        }
        out.push_str("];\n");
        out.push_str("heatmap.set('gradient', gradient);\n");
    }
}

/// Escape text for a double- or single-quoted JavaScript string inside a
/// `<script>` element.
fn escape_js(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '<' => escaped.push_str("\\u003c"),
            '>' => escaped.push_str("\\u003e"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Escape text for HTML element content and attribute values.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
