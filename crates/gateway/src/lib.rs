//! Simulation gateway: runs the trajectory and potential calls of a variant as one unit.
//!
//! The gateway keeps no state between calls. Each run is built from the
//! caller's [`MappedRequest`] snapshot and either yields both results or the
//! error of the call that failed.

use std::thread;

use geodesic_core::Variant;
use geodesic_request::{
    MappedRequest, PotentialRequest, PotentialResult, TrajectoryRequest, TrajectoryResult,
};
use thiserror::Error;

pub mod http;

pub use http::{DEFAULT_BASE_URL, HttpBackend};

/// Transport-level failures. `Display` is the user-facing error text.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Non-2xx response; `message` is the response body, or `HTTP <status>` when empty.
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("{0}")]
    Network(#[from] reqwest::Error),
    #[error("invalid response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl GatewayError {
    /// Build the error for a non-2xx response from its status code and body text.
    pub fn from_status(status: u16, body: String) -> Self {
        let message = if body.trim().is_empty() {
            format!("HTTP {status}")
        } else {
            body
        };
        GatewayError::Status { status, message }
    }
}

/// The two endpoints of a simulation service variant.
///
/// Implementations must be shareable across the threads that carry the
/// paired calls.
pub trait SimulationBackend: Sync {
    fn trajectory(
        &self,
        variant: Variant,
        request: &TrajectoryRequest,
    ) -> Result<TrajectoryResult, GatewayError>;

    fn potential(
        &self,
        variant: Variant,
        request: &PotentialRequest,
    ) -> Result<PotentialResult, GatewayError>;
}

/// Both results of a successful variant run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    pub trajectory: TrajectoryResult,
    pub potential: PotentialResult,
}

/// Issue the trajectory and potential calls concurrently and join them.
///
/// Fails with the first failing call's error (trajectory before potential);
/// no partial outcome is ever returned.
pub fn run_variant<B>(
    backend: &B,
    variant: Variant,
    request: &MappedRequest,
) -> Result<SimulationOutcome, GatewayError>
where
    B: SimulationBackend + ?Sized,
{
    log::debug!(
        "dispatching {} run (phi_max = {:.3}, r in [{}, {}])",
        variant.label(),
        request.trajectory.phi_max,
        request.potential.r_min,
        request.potential.r_max
    );

    let (trajectory, potential) = thread::scope(|scope| {
        let trajectory = scope.spawn(|| backend.trajectory(variant, &request.trajectory));
        let potential = backend.potential(variant, &request.potential);
        let trajectory = trajectory
            .join()
            .unwrap_or_else(|payload| std::panic::resume_unwind(payload));
        (trajectory, potential)
    });

    match (trajectory, potential) {
        (Ok(trajectory), Ok(potential)) => Ok(SimulationOutcome {
            trajectory,
            potential,
        }),
        (Err(err), _) | (Ok(_), Err(err)) => {
            log::warn!("{} run failed: {err}", variant.label());
            Err(err)
        }
    }
}

/// Run both variants concurrently; their outcomes are independent.
pub fn run_both<B>(
    backend: &B,
    standard: &MappedRequest,
    noncommutative: &MappedRequest,
) -> (
    Result<SimulationOutcome, GatewayError>,
    Result<SimulationOutcome, GatewayError>,
)
where
    B: SimulationBackend + ?Sized,
{
    thread::scope(|scope| {
        let nc = scope.spawn(|| run_variant(backend, Variant::Noncommutative, noncommutative));
        let standard = run_variant(backend, Variant::Standard, standard);
        let nc = nc
            .join()
            .unwrap_or_else(|payload| std::panic::resume_unwind(payload));
        (standard, nc)
    })
}
