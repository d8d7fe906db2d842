//! Client-side pipeline for exploring Schwarzschild and noncommutative geodesics.
//!
//! Orbit controls are mapped into service requests, both pipelines are run
//! against the simulation service, and the returned curves are reduced and
//! framed for rendering. Keeping this logic in a library crate lets the CLI
//! binaries and any future front-end share it.

pub mod plot;
pub mod session;

pub use geodesic_config as config;
pub use geodesic_core as types;
pub use geodesic_export as export;
pub use geodesic_gateway as gateway;
pub use geodesic_potential as potential;
pub use geodesic_request as request;
pub use geodesic_sampling as sampling;

/// Returns the version of the library for smoke tests and CLI banners.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
