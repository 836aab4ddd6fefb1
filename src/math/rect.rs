use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Raw bounding geometry as a target reports it.
///
/// Some sources give the size directly, others only give the far edges.
/// Both are viewport-relative pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bounds {
    Sized {
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    },
    Edges {
        left: f64,
        top: f64,
        right: f64,
        bottom: f64,
    },
}

impl Bounds {
    /// Normalize to the explicit width/height form
    pub fn normalize(&self) -> Rect {
        match *self {
            Bounds::Sized { left, top, width, height } => Rect::new(left, top, width, height),
            Bounds::Edges { left, top, right, bottom } => {
                Rect::new(left, top, right - left, bottom - top)
            }
        }
    }
}

/// Normalized, viewport-relative rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.left, self.top) + DVec2::new(self.width, self.height) * 0.5
    }

    /// Radius of the smallest circle around the center covering the longer half-extent
    pub fn half_extent(&self) -> f64 {
        (self.width / 2.0).max(self.height / 2.0)
    }
}
