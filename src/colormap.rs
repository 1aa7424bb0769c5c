//! Named colormaps for the plot front-ends
//!
//! Small linear-interpolation ramps over RGB anchor points, selected by name
//! from the command line and normalized over the data range at draw time.

use crate::errors::{AvePostError, Result};
use plotters::style::RGBColor;

/// A colormap as a sequence of evenly spaced RGB anchors.
#[derive(Debug, Clone)]
pub struct Colormap {
    name: &'static str,
    anchors: &'static [(u8, u8, u8)],
}

const VIRIDIS: &[(u8, u8, u8)] = &[
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

const COOLWARM: &[(u8, u8, u8)] = &[(59, 76, 192), (221, 221, 221), (180, 4, 38)];

const JET: &[(u8, u8, u8)] = &[
    (0, 0, 131),
    (0, 60, 170),
    (5, 255, 255),
    (255, 255, 0),
    (250, 0, 0),
    (128, 0, 0),
];

impl Colormap {
    /// Looks a colormap up by its command-line name.
    pub fn by_name(name: &str) -> Result<Self> {
        let (name, anchors) = match name {
            "viridis" => ("viridis", VIRIDIS),
            "coolwarm" => ("coolwarm", COOLWARM),
            "jet" => ("jet", JET),
            _ => {
                return Err(AvePostError::Generic(format!(
                    "Unknown colormap '{}' (available: viridis, coolwarm, jet)",
                    name
                )))
            }
        };
        Ok(Self { name, anchors })
    }

    pub fn name(&self) -> &str {
        self.name
    }

    /// Samples the ramp at `t` in `[0, 1]` (clamped).
    pub fn sample(&self, t: f64) -> RGBColor {
        let t = t.clamp(0.0, 1.0);
        let segments = self.anchors.len() - 1;
        let scaled = t * segments as f64;
        let idx = (scaled.floor() as usize).min(segments - 1);
        let frac = scaled - idx as f64;
        let (r0, g0, b0) = self.anchors[idx];
        let (r1, g1, b1) = self.anchors[idx + 1];
        RGBColor(
            lerp(r0, r1, frac),
            lerp(g0, g1, frac),
            lerp(b0, b1, frac),
        )
    }

    /// Samples the ramp for `value` normalized over `[min, max]`.
    pub fn color_for(&self, value: f64, min: f64, max: f64) -> RGBColor {
        if max > min {
            self.sample((value - min) / (max - min))
        } else {
            self.sample(0.5)
        }
    }
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round() as u8
}
