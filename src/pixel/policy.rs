use std::str::FromStr;

use crate::foundation::error::StrataError;

#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
/// Grid that resolved geometry is rounded onto.
pub enum PixelPolicy {
    /// No snapping; coordinates pass through unchanged.
    Subpixel,
    /// Round to whole device pixels.
    #[default]
    Integer,
    /// Round to half device pixels (crisp centered strokes).
    HalfPixel,
}

impl PixelPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Subpixel => "subpixel",
            Self::Integer => "integer",
            Self::HalfPixel => "half-pixel",
        }
    }
}

impl FromStr for PixelPolicy {
    type Err = StrataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "subpixel" => Ok(Self::Subpixel),
            "integer" => Ok(Self::Integer),
            "half-pixel" | "half_pixel" | "halfpixel" => Ok(Self::HalfPixel),
            other => Err(StrataError::validation(format!(
                "unknown pixel policy '{other}' (expected subpixel, integer or half-pixel)"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize, PartialEq)]
/// Snapping configuration threaded through measure and layout.
///
/// Nothing here is global: every pass receives the config it should honor, so two trees with
/// different DPRs can coexist in one process.
pub struct PixelConfig {
    /// Active snapping grid.
    #[serde(default)]
    pub policy: PixelPolicy,
    /// Device pixel ratio (physical px per logical px).
    #[serde(default = "default_dpr")]
    pub dpr: f64,
    /// When false the grid is computed as if `dpr == 1`.
    #[serde(default = "default_snap_to_dpr")]
    pub snap_to_dpr: bool,
}

fn default_dpr() -> f64 {
    1.0
}

fn default_snap_to_dpr() -> bool {
    true
}

impl Default for PixelConfig {
    fn default() -> Self {
        Self {
            policy: PixelPolicy::default(),
            dpr: default_dpr(),
            snap_to_dpr: default_snap_to_dpr(),
        }
    }
}

/// Replace a non-finite or non-positive DPR with 1.0.
pub fn sanitize_dpr(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 {
        dpr
    } else {
        tracing::warn!(dpr, "invalid device pixel ratio, falling back to 1.0");
        1.0
    }
}

impl PixelConfig {
    pub fn new(policy: PixelPolicy, dpr: f64) -> Self {
        Self {
            policy,
            dpr: sanitize_dpr(dpr),
            snap_to_dpr: true,
        }
    }

    pub fn with_snap_to_dpr(mut self, snap_to_dpr: bool) -> Self {
        self.snap_to_dpr = snap_to_dpr;
        self
    }

    /// Grid cells per logical pixel, or `None` when snapping is disabled.
    fn grid(&self) -> Option<f64> {
        let base = if self.snap_to_dpr {
            if self.dpr.is_finite() && self.dpr > 0.0 {
                self.dpr
            } else {
                1.0
            }
        } else {
            1.0
        };
        match self.policy {
            PixelPolicy::Subpixel => None,
            PixelPolicy::Integer => Some(base),
            PixelPolicy::HalfPixel => Some(base * 2.0),
        }
    }

    /// Round a coordinate to the nearest grid line.
    pub fn snap_point(&self, v: f64) -> f64 {
        match self.grid() {
            Some(g) => (v * g).round() / g,
            None => v,
        }
    }

    /// Round an extent up to the next grid line; never shrinks `v`.
    pub fn snap_extent(&self, v: f64) -> f64 {
        match self.grid() {
            Some(g) => (v * g).ceil() / g,
            None => v,
        }
    }

    /// Snap both corners of a rectangle and derive its size from them.
    ///
    /// Adjacent rectangles sharing an edge in continuous space still share it after snapping, and
    /// applying this twice yields the same rectangle.
    pub fn snap_rect(&self, x: f64, y: f64, w: f64, h: f64) -> (f64, f64, f64, f64) {
        let x0 = self.snap_point(x);
        let y0 = self.snap_point(y);
        let x1 = self.snap_point(x + w);
        let y1 = self.snap_point(y + h);
        (x0, y0, x1 - x0, y1 - y0)
    }

    pub fn is_pixel_aligned(&self, v: f64) -> bool {
        (v - self.snap_point(v)).abs() < 0.001
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pixel/policy.rs"]
mod tests;
