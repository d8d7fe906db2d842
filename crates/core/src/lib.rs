//! Core vocabulary, constants, and shared parameter types for the Geodesic Explorer workspace.
//!
//! Everything is expressed in geometrized units (G = c = 1), so radii, masses,
//! and angular momenta share the same length scale.

use serde::{Deserialize, Serialize};

/// Physical and presentation constants shared across crates.
pub mod constants {
    /// Schwarzschild horizon radius in units of M.
    pub const HORIZON_FACTOR: f64 = 2.0;
    /// Photon-sphere radius in units of M.
    pub const PHOTON_SPHERE_FACTOR: f64 = 3.0;
    /// Smallest number of revolutions a trajectory request may span.
    pub const MIN_TURNS: i64 = 1;
    /// Largest number of revolutions a trajectory request may span.
    pub const MAX_TURNS: i64 = 20;
    /// Auto-range inner bound, as a multiple of M (and an absolute floor).
    pub const AUTO_R_MIN_FACTOR: f64 = 2.05;
    /// Auto-range outer bound used when no critical points exist.
    pub const AUTO_R_MAX_FACTOR: f64 = 30.0;
    /// Raw energy a photon starts from when switched over from massive controls.
    pub const PHOTON_DEFAULT_ENERGY: f64 = 1.0;
    /// Address of a locally running simulation service.
    pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
}

/// Radial helpers for the Schwarzschild geometry.
pub mod radii {
    use super::constants::{HORIZON_FACTOR, PHOTON_SPHERE_FACTOR};

    /// Event horizon radius `2M`.
    #[inline]
    pub fn horizon(mass: f64) -> f64 {
        HORIZON_FACTOR * mass
    }

    /// Unstable circular photon orbit radius `3M`.
    #[inline]
    pub fn photon_sphere(mass: f64) -> f64 {
        PHOTON_SPHERE_FACTOR * mass
    }
}

/// Backend pipeline a session talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Standard,
    Noncommutative,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Standard, Variant::Noncommutative];

    /// Metric tag carried in every request for this variant.
    pub fn metric(self) -> Metric {
        match self {
            Variant::Standard => Metric::Schwarzschild,
            Variant::Noncommutative => Metric::NcSchwarzschild,
        }
    }

    /// Endpoint path of the trajectory integrator.
    pub fn trajectory_path(self) -> &'static str {
        match self {
            Variant::Standard => "/simulate",
            Variant::Noncommutative => "/simulate_nc",
        }
    }

    /// Endpoint path of the effective-potential sampler.
    pub fn potential_path(self) -> &'static str {
        match self {
            Variant::Standard => "/veff",
            Variant::Noncommutative => "/veff_nc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Variant::Standard => "standard",
            Variant::Noncommutative => "noncommutative",
        }
    }
}

/// Spacetime metric understood by the simulation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "schwarzschild")]
    Schwarzschild,
    #[serde(rename = "nc-schwarzschild")]
    NcSchwarzschild,
}

/// Test particle species: timelike (massive) or null (photon) geodesics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleKind {
    Massive,
    Photon,
}

/// Initial radial direction of motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadialSign {
    In,
    Out,
}

/// How the `energy` field of [`OrbitParameters`] is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyMode {
    /// `energy` is the specific energy `E` sent to the service as-is.
    Raw,
    /// `energy` is the dimensionless parameter `Ē = (E² - 1) / 2` (massive particles only).
    Parameter,
}

/// User-facing orbit controls owned by a single variant session.
///
/// Every field is optional in configuration files; missing fields take the
/// values from [`OrbitParameters::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitParameters {
    pub particle: ParticleKind,
    pub mass: f64,
    pub energy: f64,
    pub energy_mode: EnergyMode,
    pub angular_momentum: f64,
    pub r0: f64,
    pub radial_sign: RadialSign,
    pub turns: i64,
    pub sample_count: u32,
    pub r_min: f64,
    pub r_max: f64,
    pub potential_sample_count: u32,
    pub auto_range: bool,
    /// Noncommutative smearing parameter θ; ignored by the standard variant.
    pub theta: f64,
}

impl Default for OrbitParameters {
    fn default() -> Self {
        Self {
            particle: ParticleKind::Massive,
            mass: 1.0,
            energy: 0.0,
            energy_mode: EnergyMode::Parameter,
            angular_momentum: 4.2,
            r0: 20.0,
            radial_sign: RadialSign::In,
            turns: 6,
            sample_count: 4000,
            r_min: 2.05,
            r_max: 50.0,
            potential_sample_count: 2000,
            auto_range: true,
            theta: 1.0,
        }
    }
}

impl OrbitParameters {
    /// Built-in defaults for a variant. The noncommutative pipeline never auto-ranges.
    pub fn default_for(variant: Variant) -> Self {
        match variant {
            Variant::Standard => Self::default(),
            Variant::Noncommutative => Self {
                auto_range: false,
                ..Self::default()
            },
        }
    }

    /// Change the particle species.
    ///
    /// Photons have no energy parameter, so switching to a photon while the
    /// controls hold an `Ē` value resets the energy to a raw `E = 1`.
    pub fn set_particle(&mut self, particle: ParticleKind) {
        if particle == ParticleKind::Photon && self.energy_mode == EnergyMode::Parameter {
            self.energy = constants::PHOTON_DEFAULT_ENERGY;
            self.energy_mode = EnergyMode::Raw;
        }
        self.particle = particle;
    }
}
