//! Stationary points of the massive-particle effective potential in inverse radius.
//!
//! With `u = 1/r` the energy-form potential is
//! `U(u) = -M·u + ½·L²·u² - M·L²·u³`, and `U'(u) = 0` reduces to the quadratic
//! `3M·L²·u² - L²·u + M = 0`. Its discriminant (normalized by `L⁴`) is
//! `1 - 12·M²/L²`, so real extrema exist only for `L² > 12·M²`.

use serde::Serialize;

/// A radius where the effective potential is stationary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CriticalPoint {
    pub radius: f64,
    pub potential: f64,
}

/// The pair of extrema of `U`, present only when bound orbits are possible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CriticalPoints {
    /// Potential minimum at the larger radius (stable circular orbit).
    pub outer: CriticalPoint,
    /// Potential maximum at the smaller radius (unstable circular orbit).
    pub inner: CriticalPoint,
    pub v_min: f64,
    pub v_max: f64,
    /// Smaller inverse-radius root, used to size auto-ranged plots.
    pub u_min: f64,
}

/// Evaluate `U(u)` for mass `M` and angular momentum `L`.
#[inline]
pub fn inverse_radius_potential(u: f64, mass: f64, angular_momentum: f64) -> f64 {
    let l2 = angular_momentum * angular_momentum;
    -mass * u + 0.5 * l2 * u * u - mass * l2 * u * u * u
}

/// Solve for both critical points of `U`.
///
/// Returns `None` unless `M > 0`, `L > 0` and the discriminant is strictly
/// positive. A `None` result is a valid outcome: the curve is then drawn
/// without extrema markers.
pub fn solve(mass: f64, angular_momentum: f64) -> Option<CriticalPoints> {
    if !(mass > 0.0 && angular_momentum > 0.0) || !angular_momentum.is_finite() {
        return None;
    }

    let disc = 1.0 - 12.0 * mass * mass / (angular_momentum * angular_momentum);
    if !(disc > 0.0) {
        return None;
    }

    let s = disc.sqrt();
    let u1 = (1.0 - s) / (6.0 * mass);
    let u2 = (1.0 + s) / (6.0 * mass);

    let point = |u: f64| CriticalPoint {
        radius: 1.0 / u,
        potential: inverse_radius_potential(u, mass, angular_momentum),
    };
    let outer = point(u1);
    let inner = point(u2);

    Some(CriticalPoints {
        outer,
        inner,
        v_min: outer.potential.min(inner.potential),
        v_max: outer.potential.max(inner.potential),
        u_min: u1.min(u2),
    })
}
