//! Square, padded chart bounds fitted around a trajectory.

use serde::Serialize;

/// Fractional margin added around the trajectory when none is configured.
pub const DEFAULT_PADDING: f64 = 0.08;

/// Axis ranges for a chart with a locked 1:1 aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

impl Viewport {
    pub fn width(&self) -> f64 {
        self.x_range.1 - self.x_range.0
    }

    pub fn height(&self) -> f64 {
        self.y_range.1 - self.y_range.0
    }

    pub fn center(&self) -> (f64, f64) {
        (
            0.5 * (self.x_range.0 + self.x_range.1),
            0.5 * (self.y_range.0 + self.y_range.1),
        )
    }

    /// Half the side length of the square.
    pub fn half_extent(&self) -> f64 {
        0.5 * self.width()
    }
}

/// Fit a square viewport around every finite `(x, y)` pair.
///
/// Pairs with a non-finite component are skipped. Returns `None` when no
/// finite pair remains, or when the padded extent overflows, in which case
/// the chart should auto-scale. A zero extent (single distinct point) falls
/// back to a half-extent of 1 before padding is applied.
pub fn viewport(x: &[f64], y: &[f64], padding: f64) -> Option<Viewport> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    let mut finite = 0usize;

    for (&px, &py) in x.iter().zip(y) {
        if !(px.is_finite() && py.is_finite()) {
            continue;
        }
        min_x = min_x.min(px);
        max_x = max_x.max(px);
        min_y = min_y.min(py);
        max_y = max_y.max(py);
        finite += 1;
    }

    if finite == 0 {
        return None;
    }

    let cx = 0.5 * (min_x + max_x);
    let cy = 0.5 * (min_y + max_y);
    let mut half = 0.5 * (max_x - min_x).max(max_y - min_y);
    if half == 0.0 {
        half = 1.0;
    }
    let r = half * (1.0 + padding);

    let view = Viewport {
        x_range: (cx - r, cx + r),
        y_range: (cy - r, cy + r),
    };
    // Finite samples far apart can still overflow the extent.
    let bounds = [view.x_range.0, view.x_range.1, view.y_range.0, view.y_range.1];
    bounds.iter().all(|b| b.is_finite()).then_some(view)
}
