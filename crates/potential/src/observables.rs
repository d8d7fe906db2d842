//! Pointwise Schwarzschild observables used to annotate service output locally.

use geodesic_core::ParticleKind;

/// Metric function `f(r) = 1 - 2M/r`.
#[inline]
pub fn lapse(r: f64, mass: f64) -> f64 {
    1.0 - 2.0 * mass / r
}

/// Squared effective potential in the form matching `(dr/dτ)² + V² = E²`.
///
/// Massive: `f·(1 + L²/r²)`. Photon: `f·L²/r²`.
pub fn v_eff_squared(r: f64, mass: f64, angular_momentum: f64, particle: ParticleKind) -> f64 {
    let f = lapse(r, mass);
    let l2_over_r2 = angular_momentum * angular_momentum / (r * r);
    match particle {
        ParticleKind::Massive => f * (1.0 + l2_over_r2),
        ParticleKind::Photon => f * l2_over_r2,
    }
}

/// Impact parameter `b = L/E`, undefined for zero energy.
pub fn impact_parameter(energy: f64, angular_momentum: f64) -> Option<f64> {
    if energy == 0.0 {
        None
    } else {
        Some(angular_momentum / energy)
    }
}
