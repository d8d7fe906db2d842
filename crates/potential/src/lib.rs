//! Effective-potential analysis: analytic critical points and local curve evaluators.

pub mod critical;
pub mod observables;

pub use critical::{CriticalPoint, CriticalPoints, inverse_radius_potential, solve as critical_points};
