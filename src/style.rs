//! Style options and their resolution into canonical style records.
//!
//! Callers describe styling with a loose set of named options, several of
//! which are aliases for one another (`color`/`c`, `edge_alpha`/`ea`, ...).
//! [`StyleOptions::resolve`] walks a fixed cascade for every field and always
//! produces a complete [`StyleRecord`]. Resolution never fails: options that
//! are missing or unusable (blank colours, alphas outside `[0, 1]`, negative
//! widths, NaN) are skipped and the cascade falls through to the next alias,
//! and finally to the default.

use serde::{Deserialize, Serialize};

/// Default edge and face colour.
pub const DEFAULT_COLOR: &str = "#000000";
/// Default edge alpha.
pub const DEFAULT_EDGE_ALPHA: f64 = 1.0;
/// Default edge width.
pub const DEFAULT_EDGE_WIDTH: f64 = 1.0;
/// Default face alpha.
pub const DEFAULT_FACE_ALPHA: f64 = 0.3;
/// Default marker colour.
pub const DEFAULT_MARKER_COLOR: &str = "#00FF00";

/// Named style options as supplied by a caller.
///
/// Every field is optional. Short names are aliases: `c` for `color`, `ec`
/// for `edge_color`, `ea` for `edge_alpha`, `ew` for `edge_width`, `fc` for
/// `face_color` and `fa` for `face_alpha`. `alpha` sets both edge and face
/// alpha at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOptions {
    /// Shared colour for edge, face and marker.
    pub color: Option<String>,
    /// Short alias of `color`.
    pub c: Option<String>,
    /// Shared alpha for edge and face.
    pub alpha: Option<f64>,
    /// Edge (stroke) colour.
    pub edge_color: Option<String>,
    /// Short alias of `edge_color`.
    pub ec: Option<String>,
    /// Edge (stroke) alpha.
    pub edge_alpha: Option<f64>,
    /// Short alias of `edge_alpha`.
    pub ea: Option<f64>,
    /// Edge (stroke) width.
    pub edge_width: Option<f64>,
    /// Short alias of `edge_width`.
    pub ew: Option<f64>,
    /// Face (fill) colour.
    pub face_color: Option<String>,
    /// Short alias of `face_color`.
    pub fc: Option<String>,
    /// Face (fill) alpha.
    pub face_alpha: Option<f64>,
    /// Short alias of `face_alpha`.
    pub fa: Option<f64>,
    /// Whether the path is closed. `None` means unspecified.
    pub closed: Option<bool>,
}

/// A fully resolved style. No field is left unset except `closed`, whose
/// `None` carries the meaning "caller did not specify".
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRecord {
    /// Stroke colour.
    pub edge_color: String,
    /// Stroke alpha in `[0, 1]`.
    pub edge_alpha: f64,
    /// Stroke width, `>= 0`.
    pub edge_width: f64,
    /// Fill colour.
    pub face_color: String,
    /// Fill alpha in `[0, 1]`.
    pub face_alpha: f64,
    /// Primary colour.
    pub color: String,
    /// Closed flag as supplied.
    pub closed: Option<bool>,
}

impl Default for StyleRecord {
    fn default() -> Self {
        StyleOptions::default().resolve()
    }
}

fn first_color<'a>(candidates: &[&'a Option<String>]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|c| c.as_deref())
        .find(|c| !c.trim().is_empty())
}

fn first_alpha(candidates: &[Option<f64>]) -> Option<f64> {
    candidates
        .iter()
        .flatten()
        .copied()
        .find(|a| a.is_finite() && (0.0..=1.0).contains(a))
}

fn first_width(candidates: &[Option<f64>]) -> Option<f64> {
    candidates
        .iter()
        .flatten()
        .copied()
        .find(|w| w.is_finite() && *w >= 0.0)
}

impl StyleOptions {
    /// Create an empty option set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shared colour.
    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the shared colour through its short alias.
    #[must_use]
    pub fn c(mut self, color: impl Into<String>) -> Self {
        self.c = Some(color.into());
        self
    }

    /// Set the shared alpha.
    #[must_use]
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    /// Set the edge colour.
    #[must_use]
    pub fn edge_color(mut self, color: impl Into<String>) -> Self {
        self.edge_color = Some(color.into());
        self
    }

    /// Set the edge colour through its short alias.
    #[must_use]
    pub fn ec(mut self, color: impl Into<String>) -> Self {
        self.ec = Some(color.into());
        self
    }

    /// Set the edge alpha.
    #[must_use]
    pub fn edge_alpha(mut self, alpha: f64) -> Self {
        self.edge_alpha = Some(alpha);
        self
    }

    /// Set the edge alpha through its short alias.
    #[must_use]
    pub fn ea(mut self, alpha: f64) -> Self {
        self.ea = Some(alpha);
        self
    }

    /// Set the edge width.
    #[must_use]
    pub fn edge_width(mut self, width: f64) -> Self {
        self.edge_width = Some(width);
        self
    }

    /// Set the edge width through its short alias.
    #[must_use]
    pub fn ew(mut self, width: f64) -> Self {
        self.ew = Some(width);
        self
    }

    /// Set the face colour.
    #[must_use]
    pub fn face_color(mut self, color: impl Into<String>) -> Self {
        self.face_color = Some(color.into());
        self
    }

    /// Set the face colour through its short alias.
    #[must_use]
    pub fn fc(mut self, color: impl Into<String>) -> Self {
        self.fc = Some(color.into());
        self
    }

    /// Set the face alpha.
    #[must_use]
    pub fn face_alpha(mut self, alpha: f64) -> Self {
        self.face_alpha = Some(alpha);
        self
    }

    /// Set the face alpha through its short alias.
    #[must_use]
    pub fn fa(mut self, alpha: f64) -> Self {
        self.fa = Some(alpha);
        self
    }

    /// Set the closed flag.
    #[must_use]
    pub fn closed(mut self, closed: bool) -> Self {
        self.closed = Some(closed);
        self
    }

    /// Promote the `c` alias into `color` when no usable `color` was given.
    ///
    /// Drawing calls treat `c` as a plain synonym of `color`, so it takes
    /// part in the edge and face cascades too.
    #[must_use]
    pub fn with_short_color_folded(&self) -> Self {
        let mut folded = self.clone();
        if first_color(&[&self.color]).is_none() {
            if let Some(c) = first_color(&[&self.c]) {
                folded.color = Some(c.to_string());
            }
        }
        folded
    }

    /// Resolve every field through its alias cascade.
    #[must_use]
    pub fn resolve(&self) -> StyleRecord {
        let edge_color = first_color(&[&self.color, &self.edge_color, &self.ec])
            .unwrap_or(DEFAULT_COLOR)
            .to_string();
        let edge_alpha =
            first_alpha(&[self.alpha, self.edge_alpha, self.ea]).unwrap_or(DEFAULT_EDGE_ALPHA);
        let edge_width = first_width(&[self.edge_width, self.ew]).unwrap_or(DEFAULT_EDGE_WIDTH);
        let face_alpha = self.supplied_face_alpha().unwrap_or(DEFAULT_FACE_ALPHA);
        let face_color = self
            .supplied_face_color()
            .unwrap_or(DEFAULT_COLOR)
            .to_string();
        let color = first_color(&[&self.color, &self.c])
            .map_or_else(|| edge_color.clone(), str::to_string);

        StyleRecord {
            edge_color,
            edge_alpha,
            edge_width,
            face_color,
            face_alpha,
            color,
            closed: self.closed,
        }
    }

    /// First usable face alpha among `alpha`, `face_alpha` and `fa`.
    #[must_use]
    pub fn supplied_face_alpha(&self) -> Option<f64> {
        first_alpha(&[self.alpha, self.face_alpha, self.fa])
    }

    /// First usable face colour among `color`, `face_color` and `fc`.
    #[must_use]
    pub fn supplied_face_color(&self) -> Option<&str> {
        first_color(&[&self.color, &self.face_color, &self.fc])
    }

    /// Resolve the colour of a marker: `color`, `c`, `edge_color`, `ec`,
    /// then [`DEFAULT_MARKER_COLOR`].
    #[must_use]
    pub fn marker_color(&self) -> String {
        first_color(&[&self.color, &self.c, &self.edge_color, &self.ec])
            .unwrap_or(DEFAULT_MARKER_COLOR)
            .to_string()
    }
}

/// One colour stop of a heatmap gradient, emitted as `rgba(r, g, b, a)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Red component.
    pub r: u8,
    /// Green component.
    pub g: u8,
    /// Blue component.
    pub b: u8,
    /// Alpha component (integer, as the runtime's `rgba()` receives it).
    pub a: u8,
}

impl GradientStop {
    /// Create a new gradient stop.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl From<(u8, u8, u8, u8)> for GradientStop {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self::new(r, g, b, a)
    }
}

/// Heatmap layer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapStyle {
    /// Maximum intensity threshold.
    pub threshold: i32,
    /// Influence radius of each point, in pixels.
    pub radius: i32,
    /// Layer opacity.
    pub opacity: f64,
    /// Whether the radius scales with zoom.
    pub dissipating: bool,
    /// Optional colour gradient, in order.
    pub gradient: Option<Vec<GradientStop>>,
}

impl Default for HeatmapStyle {
    fn default() -> Self {
        Self {
            threshold: 10,
            radius: 10,
            opacity: 0.6,
            dissipating: true,
            gradient: None,
        }
    }
}

impl HeatmapStyle {
    /// Create heatmap settings with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the intensity threshold.
    #[must_use]
    pub fn threshold(mut self, threshold: i32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the point radius.
    #[must_use]
    pub fn radius(mut self, radius: i32) -> Self {
        self.radius = radius;
        self
    }

    /// Set the layer opacity.
    #[must_use]
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Set whether the layer dissipates on zoom.
    #[must_use]
    pub fn dissipating(mut self, dissipating: bool) -> Self {
        self.dissipating = dissipating;
        self
    }

    /// Set the colour gradient.
    #[must_use]
    pub fn gradient<I, S>(mut self, stops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<GradientStop>,
    {
        self.gradient = Some(stops.into_iter().map(Into::into).collect());
        self
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_resolved_values_in_range(
            alpha in proptest::option::of(-2.0f64..2.0),
            ea in proptest::option::of(-2.0f64..2.0),
            fa in proptest::option::of(-2.0f64..2.0),
            ew in proptest::option::of(-5.0f64..5.0),
        ) {
            let opts = StyleOptions { alpha, ea, fa, ew, ..StyleOptions::default() };
            let style = opts.resolve();
            prop_assert!((0.0..=1.0).contains(&style.edge_alpha));
            prop_assert!((0.0..=1.0).contains(&style.face_alpha));
            prop_assert!(style.edge_width >= 0.0);
            prop_assert!(!style.color.is_empty());
        }
    }
}
