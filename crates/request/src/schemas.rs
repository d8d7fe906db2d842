//! Request and response bodies exchanged with the simulation service.
//!
//! Responses are validated while deserializing, so downstream code never sees
//! ragged coordinate arrays or a potential curve without radii. JSON `null`
//! samples (non-finite values on the service side) decode as `NaN`.

use geodesic_core::{Metric, ParticleKind, RadialSign};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body of `POST /simulate` and `POST /simulate_nc`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectoryRequest {
    pub metric: Metric,
    pub particle: ParticleKind,
    #[serde(rename = "M")]
    pub mass: f64,
    #[serde(rename = "E")]
    pub energy: f64,
    #[serde(rename = "L")]
    pub angular_momentum: f64,
    pub r0: f64,
    pub radial_sign: RadialSign,
    pub phi_max: f64,
    pub n: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theta: Option<f64>,
}

/// Body of `POST /veff` and `POST /veff_nc`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PotentialRequest {
    pub metric: Metric,
    pub particle: ParticleKind,
    #[serde(rename = "M")]
    pub mass: f64,
    #[serde(rename = "E")]
    pub energy: f64,
    #[serde(rename = "L")]
    pub angular_momentum: f64,
    pub r_min: f64,
    pub r_max: f64,
    pub n: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theta: Option<f64>,
}

/// Structural problems detected in a service response.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("`{left}` has {left_len} samples but `{right}` has {right_len}")]
    LengthMismatch {
        left: &'static str,
        right: &'static str,
        left_len: usize,
        right_len: usize,
    },
    #[error("potential response carries neither `U_eff` nor `V_eff2`")]
    MissingPotential,
    #[error("radial samples are not in ascending order at index {index}")]
    Descending { index: usize },
}

/// Trajectory metadata reported by the service.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrajectoryMeta {
    pub points_returned: usize,
    pub captured: bool,
    pub r_horizon: Option<f64>,
    pub photon_sphere: Option<f64>,
}

/// Integrated orbit in the equatorial plane.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "TrajectoryWire")]
pub struct TrajectoryResult {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Azimuth samples; empty when the service omitted them.
    pub phi: Vec<f64>,
    /// Radius samples; empty when the service omitted them.
    pub r: Vec<f64>,
    pub meta: TrajectoryMeta,
}

impl TrajectoryResult {
    /// Build a result from bare Cartesian samples.
    pub fn from_xy(x: Vec<f64>, y: Vec<f64>) -> Self {
        let points_returned = x.len().min(y.len());
        Self {
            x,
            y,
            phi: Vec::new(),
            r: Vec::new(),
            meta: TrajectoryMeta {
                points_returned,
                ..TrajectoryMeta::default()
            },
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Which quantity a potential curve holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PotentialForm {
    /// Energy form `U_eff`, directly comparable to `Ē`.
    Energy,
    /// Squared form `V_eff²`, directly comparable to `E²`.
    EnergySquared,
}

impl PotentialForm {
    pub fn label(self) -> &'static str {
        match self {
            PotentialForm::Energy => "U_eff",
            PotentialForm::EnergySquared => "V_eff^2",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PotentialMeta {
    pub sample_count: usize,
}

/// Effective potential sampled on an ascending radial grid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "PotentialWire")]
pub struct PotentialResult {
    pub r: Vec<f64>,
    pub effective_potential: Vec<f64>,
    pub form: PotentialForm,
    pub meta: PotentialMeta,
}

impl PotentialResult {
    pub fn new(r: Vec<f64>, effective_potential: Vec<f64>, form: PotentialForm) -> Self {
        let sample_count = r.len();
        Self {
            r,
            effective_potential,
            form,
            meta: PotentialMeta { sample_count },
        }
    }
}

type WireSeries = Vec<Option<f64>>;

fn series(values: WireSeries) -> Vec<f64> {
    values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect()
}

fn check_lengths(
    left: &'static str,
    left_len: usize,
    right: &'static str,
    right_len: usize,
) -> Result<(), SchemaError> {
    if left_len == right_len {
        Ok(())
    } else {
        Err(SchemaError::LengthMismatch {
            left,
            right,
            left_len,
            right_len,
        })
    }
}

#[derive(Deserialize)]
struct TrajectoryWire {
    x: WireSeries,
    y: WireSeries,
    #[serde(default)]
    phi: WireSeries,
    #[serde(default)]
    r: WireSeries,
    #[serde(default)]
    meta: TrajectoryMetaWire,
}

#[derive(Deserialize, Default)]
struct TrajectoryMetaWire {
    points_returned: Option<usize>,
    #[serde(default)]
    captured: bool,
    r_horizon: Option<f64>,
    photon_sphere: Option<f64>,
}

impl TryFrom<TrajectoryWire> for TrajectoryResult {
    type Error = SchemaError;

    fn try_from(wire: TrajectoryWire) -> Result<Self, Self::Error> {
        check_lengths("x", wire.x.len(), "y", wire.y.len())?;
        if !wire.phi.is_empty() {
            check_lengths("x", wire.x.len(), "phi", wire.phi.len())?;
        }
        if !wire.r.is_empty() {
            check_lengths("x", wire.x.len(), "r", wire.r.len())?;
        }

        let points_returned = wire.meta.points_returned.unwrap_or(wire.x.len());
        Ok(TrajectoryResult {
            x: series(wire.x),
            y: series(wire.y),
            phi: series(wire.phi),
            r: series(wire.r),
            meta: TrajectoryMeta {
                points_returned,
                captured: wire.meta.captured,
                r_horizon: wire.meta.r_horizon,
                photon_sphere: wire.meta.photon_sphere,
            },
        })
    }
}

#[derive(Deserialize)]
struct PotentialWire {
    r: WireSeries,
    #[serde(rename = "U_eff")]
    u_eff: Option<WireSeries>,
    #[serde(rename = "V_eff2")]
    v_eff2: Option<WireSeries>,
    #[serde(default)]
    meta: PotentialMetaWire,
}

#[derive(Deserialize, Default)]
struct PotentialMetaWire {
    n: Option<usize>,
}

impl TryFrom<PotentialWire> for PotentialResult {
    type Error = SchemaError;

    fn try_from(wire: PotentialWire) -> Result<Self, Self::Error> {
        let (values, form) = match (wire.u_eff, wire.v_eff2) {
            (Some(u), _) => (u, PotentialForm::Energy),
            (None, Some(v)) => (v, PotentialForm::EnergySquared),
            (None, None) => return Err(SchemaError::MissingPotential),
        };
        let field = match form {
            PotentialForm::Energy => "U_eff",
            PotentialForm::EnergySquared => "V_eff2",
        };
        check_lengths("r", wire.r.len(), field, values.len())?;

        let r = series(wire.r);
        if let Some(index) = r.windows(2).position(|w| w[1] < w[0]) {
            return Err(SchemaError::Descending { index: index + 1 });
        }

        let sample_count = wire.meta.n.unwrap_or(r.len());
        Ok(PotentialResult {
            r,
            effective_potential: series(values),
            form,
            meta: PotentialMeta { sample_count },
        })
    }
}
