//! Translation of user-facing orbit controls into service requests, plus typed response schemas.

pub mod mapper;
pub mod schemas;

pub use mapper::{
    DisplayEnergy, MappedRequest, RadialRange, ValidationError, auto_range, display_energy,
    energy_from_parameter, map_parameters, phi_max, resolve_energy, resolve_range,
};
pub use schemas::{
    PotentialForm, PotentialMeta, PotentialRequest, PotentialResult, SchemaError,
    TrajectoryMeta, TrajectoryRequest, TrajectoryResult,
};
