//! Pure mapping from [`OrbitParameters`] to the request bodies the service expects.
//!
//! Nothing here performs I/O. Every rejection is a [`ValidationError`] raised
//! before a request is dispatched.

use std::f64::consts::TAU;

use geodesic_core::constants::{AUTO_R_MAX_FACTOR, AUTO_R_MIN_FACTOR, MAX_TURNS, MIN_TURNS};
use geodesic_core::{EnergyMode, OrbitParameters, ParticleKind, Variant};
use geodesic_potential::critical;
use thiserror::Error;

use crate::schemas::{PotentialRequest, TrajectoryRequest};

/// Local rejections of user input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("energy parameter Ē = {0} is out of range: 2Ē + 1 must be positive (Ē > -0.5)")]
    InvalidEnergy(f64),
    #[error("r_max ({r_max}) must be greater than r_min ({r_min})")]
    InvalidRadialRange { r_min: f64, r_max: f64 },
    #[error("theta must be positive for the noncommutative metric (got {0})")]
    InvalidTheta(f64),
    #[error("mass M must be positive (got {0})")]
    InvalidMass(f64),
    #[error("initial radius r0 must be positive (got {0})")]
    InvalidInitialRadius(f64),
    #[error("specific energy E must be positive (got {0})")]
    NonPositiveEnergy(f64),
    #[error("angular momentum L must be positive (got {0})")]
    InvalidAngularMomentum(f64),
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("{field} must be greater than zero")]
    EmptySampling { field: &'static str },
}

/// Both request bodies for one run of a variant.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedRequest {
    pub trajectory: TrajectoryRequest,
    pub potential: PotentialRequest,
}

/// Radial interval sampled by the potential endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialRange {
    pub r_min: f64,
    pub r_max: f64,
}

/// Energy-like quantity shown next to the energy control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayEnergy {
    /// `Ē = (E² - 1) / 2` for massive particles.
    Parameter(f64),
    /// `k = (E/L)²` for photons, 0 when `L = 0`.
    PhotonRatio(f64),
}

impl DisplayEnergy {
    pub fn value(self) -> f64 {
        match self {
            DisplayEnergy::Parameter(v) | DisplayEnergy::PhotonRatio(v) => v,
        }
    }
}

/// Integration span `2π · clamp(turns, 1, 20)`.
pub fn phi_max(turns: i64) -> f64 {
    TAU * turns.clamp(MIN_TURNS, MAX_TURNS) as f64
}

/// Map the dimensionless parameter `Ē` to specific energy `E = sqrt(2Ē + 1)`.
pub fn energy_from_parameter(parameter: f64) -> Result<f64, ValidationError> {
    let inside = 2.0 * parameter + 1.0;
    if inside > 0.0 && inside.is_finite() {
        Ok(inside.sqrt())
    } else {
        Err(ValidationError::InvalidEnergy(parameter))
    }
}

/// Specific energy to send, honouring the energy mode for massive particles.
pub fn resolve_energy(params: &OrbitParameters) -> Result<f64, ValidationError> {
    match (params.particle, params.energy_mode) {
        (ParticleKind::Massive, EnergyMode::Parameter) => energy_from_parameter(params.energy),
        _ => Ok(params.energy),
    }
}

/// Inverse of the energy mapping, for display.
pub fn display_energy(particle: ParticleKind, energy: f64, angular_momentum: f64) -> DisplayEnergy {
    match particle {
        ParticleKind::Massive => DisplayEnergy::Parameter(0.5 * (energy * energy - 1.0)),
        ParticleKind::Photon => {
            if angular_momentum == 0.0 {
                DisplayEnergy::PhotonRatio(0.0)
            } else {
                let ratio = energy / angular_momentum;
                DisplayEnergy::PhotonRatio(ratio * ratio)
            }
        }
    }
}

/// Plot bounds chosen from the physics rather than the user.
///
/// The outer bound is twice the stable circular-orbit radius when the
/// critical-point solve succeeds (massive particles only), else `30·M`.
pub fn auto_range(mass: f64, angular_momentum: f64, particle: ParticleKind) -> RadialRange {
    let r_min = (AUTO_R_MIN_FACTOR * mass).max(AUTO_R_MIN_FACTOR);
    let solved = match particle {
        ParticleKind::Massive => critical::solve(mass, angular_momentum),
        ParticleKind::Photon => None,
    };
    let r_max = match solved {
        Some(points) => 2.0 / points.u_min,
        None => AUTO_R_MAX_FACTOR * mass,
    };
    RadialRange { r_min, r_max }
}

/// Radial bounds for a variant: auto-ranged only for the standard variant.
pub fn resolve_range(variant: Variant, params: &OrbitParameters) -> RadialRange {
    if variant == Variant::Standard && params.auto_range {
        auto_range(params.mass, params.angular_momentum, params.particle)
    } else {
        RadialRange {
            r_min: params.r_min,
            r_max: params.r_max,
        }
    }
}

/// Validate `params` and build both request bodies for `variant`.
pub fn map_parameters(
    variant: Variant,
    params: &OrbitParameters,
) -> Result<MappedRequest, ValidationError> {
    let finite_fields = [
        ("M", params.mass),
        ("E", params.energy),
        ("L", params.angular_momentum),
        ("r0", params.r0),
    ];
    for (field, value) in finite_fields {
        if !value.is_finite() {
            return Err(ValidationError::NonFinite { field });
        }
    }
    if params.mass <= 0.0 {
        return Err(ValidationError::InvalidMass(params.mass));
    }
    if params.r0 <= 0.0 {
        return Err(ValidationError::InvalidInitialRadius(params.r0));
    }
    if params.angular_momentum <= 0.0 {
        return Err(ValidationError::InvalidAngularMomentum(
            params.angular_momentum,
        ));
    }

    let energy = resolve_energy(params)?;
    // Raw and photon energies bypass the parameter mapping.
    if energy <= 0.0 {
        return Err(ValidationError::NonPositiveEnergy(energy));
    }

    if params.sample_count == 0 {
        return Err(ValidationError::EmptySampling {
            field: "sample_count",
        });
    }
    if params.potential_sample_count == 0 {
        return Err(ValidationError::EmptySampling {
            field: "potential_sample_count",
        });
    }

    let range = resolve_range(variant, params);
    // NaN bounds fail this comparison too.
    if !(range.r_max > range.r_min) {
        return Err(ValidationError::InvalidRadialRange {
            r_min: range.r_min,
            r_max: range.r_max,
        });
    }

    let theta = match variant {
        Variant::Standard => None,
        Variant::Noncommutative => {
            if !(params.theta > 0.0) || !params.theta.is_finite() {
                return Err(ValidationError::InvalidTheta(params.theta));
            }
            Some(params.theta)
        }
    };

    let metric = variant.metric();
    Ok(MappedRequest {
        trajectory: TrajectoryRequest {
            metric,
            particle: params.particle,
            mass: params.mass,
            energy,
            angular_momentum: params.angular_momentum,
            r0: params.r0,
            radial_sign: params.radial_sign,
            phi_max: phi_max(params.turns),
            n: params.sample_count,
            theta,
        },
        potential: PotentialRequest {
            metric,
            particle: params.particle,
            mass: params.mass,
            energy,
            angular_momentum: params.angular_momentum,
            r_min: range.r_min,
            r_max: range.r_max,
            n: params.potential_sample_count,
            theta,
        },
    })
}
