//! Presentation state for the two independent simulation pipelines.
//!
//! A [`Session`] owns one [`VariantSession`] per backend variant. Each variant
//! session exclusively owns its parameters and results; all mutation goes
//! through the methods below so one variant can never observe or overwrite
//! the other's state.
//!
//! Runs are split into [`VariantSession::begin_run`] and
//! [`VariantSession::finish_run`] so callers may keep several requests in
//! flight. Every dispatched run carries a generation number, and only the
//! latest generation is allowed to land.

use std::thread;

use geodesic_config::ExplorerConfig;
use geodesic_core::{OrbitParameters, ParticleKind, Variant};
use geodesic_gateway::{GatewayError, SimulationBackend, SimulationOutcome, run_variant};
use geodesic_potential::CriticalPoints;
use geodesic_request::{
    DisplayEnergy, MappedRequest, PotentialResult, TrajectoryResult, ValidationError,
    display_energy, map_parameters, resolve_energy,
};
use geodesic_sampling::{Downsampled, Viewport, downsample, viewport};

/// Error text stored on a variant, tagged by where it came from.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    /// Rejected locally before any request was sent.
    #[error("{0}")]
    Validation(String),
    /// Reported by the transport or the service.
    #[error("{0}")]
    Transport(String),
}

impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        SessionError::Validation(err.to_string())
    }
}

impl From<GatewayError> for SessionError {
    fn from(err: GatewayError) -> Self {
        SessionError::Transport(err.to_string())
    }
}

/// Handle for one dispatched run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunTicket {
    variant: Variant,
    generation: u64,
    request: MappedRequest,
}

impl RunTicket {
    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn request(&self) -> &MappedRequest {
        &self.request
    }
}

/// Everything a renderer needs for the current trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderView {
    pub trajectory: Downsampled,
    /// `None` when no finite sample exists; the chart should auto-scale.
    pub viewport: Option<Viewport>,
    pub critical_points: Option<CriticalPoints>,
}

/// State of one backend pipeline.
#[derive(Debug, Clone)]
pub struct VariantSession {
    variant: Variant,
    params: OrbitParameters,
    trajectory: Option<TrajectoryResult>,
    potential: Option<PotentialResult>,
    error: Option<SessionError>,
    loading: bool,
    generation: u64,
}

impl VariantSession {
    pub fn new(variant: Variant, params: OrbitParameters) -> Self {
        Self {
            variant,
            params,
            trajectory: None,
            potential: None,
            error: None,
            loading: false,
            generation: 0,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn parameters(&self) -> &OrbitParameters {
        &self.params
    }

    pub fn trajectory(&self) -> Option<&TrajectoryResult> {
        self.trajectory.as_ref()
    }

    pub fn potential(&self) -> Option<&PotentialResult> {
        self.potential.as_ref()
    }

    pub fn error(&self) -> Option<&SessionError> {
        self.error.as_ref()
    }

    /// Error text for display; empty when the last run succeeded.
    pub fn error_message(&self) -> String {
        self.error.as_ref().map(ToString::to_string).unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Generation of the most recently dispatched (or invalidated) run.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the controls after a user edit.
    ///
    /// A stored validation error is cleared once the new controls validate;
    /// transport errors stay until the next run.
    pub fn set_parameters(&mut self, params: OrbitParameters) {
        self.params = params;
        let validation_pending = matches!(self.error, Some(SessionError::Validation(_)));
        if validation_pending && map_parameters(self.variant, &self.params).is_ok() {
            self.error = None;
        }
    }

    /// Validate the controls and start a run.
    ///
    /// On a validation error the message is stored, results are cleared,
    /// outstanding runs are invalidated, and `None` is returned.
    pub fn begin_run(&mut self) -> Option<RunTicket> {
        self.generation += 1;
        match map_parameters(self.variant, &self.params) {
            Ok(request) => {
                self.loading = true;
                Some(RunTicket {
                    variant: self.variant,
                    generation: self.generation,
                    request,
                })
            }
            Err(err) => {
                log::warn!("{} parameters rejected: {err}", self.variant.label());
                self.fail(err.into());
                None
            }
        }
    }

    /// Apply a finished gateway call.
    ///
    /// Returns `false` (and leaves the state untouched) when the ticket
    /// belongs to another variant or has been superseded by a later run.
    pub fn finish_run(
        &mut self,
        ticket: &RunTicket,
        outcome: Result<SimulationOutcome, GatewayError>,
    ) -> bool {
        if ticket.variant != self.variant || ticket.generation != self.generation {
            log::warn!(
                "dropping stale {} response (generation {}, latest {})",
                ticket.variant.label(),
                ticket.generation,
                self.generation
            );
            return false;
        }

        match outcome {
            Ok(outcome) => {
                self.trajectory = Some(outcome.trajectory);
                self.potential = Some(outcome.potential);
                self.error = None;
                self.loading = false;
            }
            Err(err) => self.fail(err.into()),
        }
        true
    }

    /// Run synchronously against `backend`.
    pub fn refresh<B>(&mut self, backend: &B) -> Result<(), SessionError>
    where
        B: SimulationBackend + ?Sized,
    {
        let Some(ticket) = self.begin_run() else {
            return Err(self.stored_error());
        };
        let outcome = run_variant(backend, ticket.variant, &ticket.request);
        self.finish_run(&ticket, outcome);
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Analytic extrema for the potential plot (standard metric, massive particles).
    pub fn critical_points(&self) -> Option<CriticalPoints> {
        match (self.variant, self.params.particle) {
            (Variant::Standard, ParticleKind::Massive) => geodesic_potential::critical_points(
                self.params.mass,
                self.params.angular_momentum,
            ),
            _ => None,
        }
    }

    /// Energy-like quantity to show next to the energy control, when the energy is valid.
    pub fn display_energy(&self) -> Option<DisplayEnergy> {
        let energy = resolve_energy(&self.params).ok()?;
        Some(display_energy(
            self.params.particle,
            energy,
            self.params.angular_momentum,
        ))
    }

    /// Downsampled trajectory and its viewport, if a trajectory is loaded.
    pub fn render_view(&self, max_points: usize, padding: f64) -> Option<RenderView> {
        let trajectory = self.trajectory.as_ref()?;
        let reduced = downsample(&trajectory.x, &trajectory.y, max_points);
        let viewport = viewport(&reduced.x, &reduced.y, padding);
        Some(RenderView {
            trajectory: reduced,
            viewport,
            critical_points: self.critical_points(),
        })
    }

    fn fail(&mut self, err: SessionError) {
        self.trajectory = None;
        self.potential = None;
        self.error = Some(err);
        self.loading = false;
    }

    fn stored_error(&self) -> SessionError {
        self.error
            .clone()
            .unwrap_or_else(|| SessionError::Validation("run was not started".to_string()))
    }
}

/// Both variant sessions of one explorer process.
#[derive(Debug, Clone)]
pub struct Session {
    standard: VariantSession,
    noncommutative: VariantSession,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(
            OrbitParameters::default_for(Variant::Standard),
            OrbitParameters::default_for(Variant::Noncommutative),
        )
    }
}

impl Session {
    pub fn new(standard: OrbitParameters, noncommutative: OrbitParameters) -> Self {
        Self {
            standard: VariantSession::new(Variant::Standard, standard),
            noncommutative: VariantSession::new(Variant::Noncommutative, noncommutative),
        }
    }

    pub fn from_config(config: &ExplorerConfig) -> Self {
        Self::new(config.standard.clone(), config.noncommutative.clone())
    }

    pub fn variant(&self, variant: Variant) -> &VariantSession {
        match variant {
            Variant::Standard => &self.standard,
            Variant::Noncommutative => &self.noncommutative,
        }
    }

    pub fn variant_mut(&mut self, variant: Variant) -> &mut VariantSession {
        match variant {
            Variant::Standard => &mut self.standard,
            Variant::Noncommutative => &mut self.noncommutative,
        }
    }

    pub fn refresh<B>(&mut self, variant: Variant, backend: &B) -> Result<(), SessionError>
    where
        B: SimulationBackend + ?Sized,
    {
        self.variant_mut(variant).refresh(backend)
    }

    /// Refresh both variants concurrently; returns `(standard, noncommutative)` outcomes.
    pub fn refresh_all<B>(
        &mut self,
        backend: &B,
    ) -> (Result<(), SessionError>, Result<(), SessionError>)
    where
        B: SimulationBackend + ?Sized,
    {
        let Session {
            standard,
            noncommutative,
        } = self;
        thread::scope(|scope| {
            let nc = scope.spawn(move || noncommutative.refresh(backend));
            let standard = standard.refresh(backend);
            let nc = nc
                .join()
                .unwrap_or_else(|payload| std::panic::resume_unwind(payload));
            (standard, nc)
        })
    }
}
