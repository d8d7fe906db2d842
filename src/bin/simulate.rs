use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use geodesic_explorer::config::{ExplorerConfig, load_or_default};
use geodesic_explorer::export::series::{write_potential, write_trajectory};
use geodesic_explorer::export::summary::{RunSummary, write_summary};
use geodesic_explorer::gateway::HttpBackend;
use geodesic_explorer::plot::{self, ChartSize};
use geodesic_explorer::potential::observables::impact_parameter;
use geodesic_explorer::request::{DisplayEnergy, TrajectoryResult, resolve_energy};
use geodesic_explorer::session::{Session, SessionError, VariantSession};
use geodesic_explorer::types::radii;
use geodesic_explorer::types::{EnergyMode, OrbitParameters, ParticleKind, RadialSign, Variant};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Run the standard and noncommutative geodesic pipelines against the simulation service"
)]
struct Cli {
    /// Configuration file (.toml or YAML); built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulation service base URL (overrides the config)
    #[arg(long)]
    base_url: Option<String>,

    /// Which pipeline(s) to run
    #[arg(long, value_enum, default_value_t = VariantChoice::Both)]
    variant: VariantChoice,

    /// Particle species
    #[arg(long, value_enum)]
    particle: Option<ParticleChoice>,

    /// Black hole mass M
    #[arg(long)]
    mass: Option<f64>,

    /// Dimensionless energy parameter Ē = (E² - 1)/2 (massive particles)
    #[arg(long, allow_hyphen_values = true)]
    energy_parameter: Option<f64>,

    /// Raw specific energy E
    #[arg(long, conflicts_with = "energy_parameter", allow_hyphen_values = true)]
    energy: Option<f64>,

    /// Angular momentum L
    #[arg(long, allow_hyphen_values = true)]
    angular_momentum: Option<f64>,

    /// Initial radius r0
    #[arg(long)]
    r0: Option<f64>,

    /// Initial radial direction
    #[arg(long, value_enum)]
    radial: Option<RadialChoice>,

    /// Number of revolutions to integrate (clamped to 1..=20)
    #[arg(long, allow_hyphen_values = true)]
    turns: Option<i64>,

    /// Explicit potential range; disables auto-range for the standard pipeline
    #[arg(long, num_args = 2, value_names = ["R_MIN", "R_MAX"])]
    range: Option<Vec<f64>>,

    /// Noncommutative smearing parameter θ
    #[arg(long, allow_hyphen_values = true)]
    theta: Option<f64>,

    /// Write CSV/JSON artifacts into this directory
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Also render PNG charts into the output directory
    #[arg(long, default_value_t = false, requires = "output_dir")]
    plot: bool,
}

#[derive(Copy, Clone, ValueEnum, Debug, PartialEq, Eq)]
enum VariantChoice {
    Standard,
    Nc,
    Both,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum ParticleChoice {
    Massive,
    Photon,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum RadialChoice {
    In,
    Out,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(url) = &cli.base_url {
        config.backend.base_url = url.clone();
    }
    apply_overrides(&cli, &mut config.standard);
    apply_overrides(&cli, &mut config.noncommutative);

    let backend = HttpBackend::with_timeout(
        config.backend.base_url.clone(),
        config.backend.timeout_secs.map(Duration::from_secs_f64),
    )?;
    let mut session = Session::from_config(&config);

    let variants: &[Variant] = match cli.variant {
        VariantChoice::Standard => &[Variant::Standard],
        VariantChoice::Nc => &[Variant::Noncommutative],
        VariantChoice::Both => &Variant::ALL,
    };
    // Failures are stored on the session and reported below.
    if variants.len() == 2 {
        let _ = session.refresh_all(&backend);
    } else {
        for &variant in variants {
            let _ = session.refresh(variant, &backend);
        }
    }

    let generated_at = chrono::Utc::now().to_rfc3339();
    let mut failures = 0;
    for &variant in variants {
        let state = session.variant(variant);
        report(state, &config);
        if state.error().is_some() {
            failures += 1;
        }
        if let Some(dir) = &cli.output_dir {
            export(state, &config, dir, cli.plot, &generated_at)?;
        }
    }

    if failures == variants.len() {
        return Err(anyhow::anyhow!("every requested pipeline failed"));
    }
    Ok(())
}

fn apply_overrides(cli: &Cli, params: &mut OrbitParameters) {
    if let Some(particle) = cli.particle {
        params.set_particle(match particle {
            ParticleChoice::Massive => ParticleKind::Massive,
            ParticleChoice::Photon => ParticleKind::Photon,
        });
    }
    if let Some(mass) = cli.mass {
        params.mass = mass;
    }
    if let Some(parameter) = cli.energy_parameter {
        params.energy = parameter;
        params.energy_mode = EnergyMode::Parameter;
    }
    if let Some(energy) = cli.energy {
        params.energy = energy;
        params.energy_mode = EnergyMode::Raw;
    }
    if let Some(l) = cli.angular_momentum {
        params.angular_momentum = l;
    }
    if let Some(r0) = cli.r0 {
        params.r0 = r0;
    }
    if let Some(radial) = cli.radial {
        params.radial_sign = match radial {
            RadialChoice::In => RadialSign::In,
            RadialChoice::Out => RadialSign::Out,
        };
    }
    if let Some(turns) = cli.turns {
        params.turns = turns;
    }
    if let Some(range) = &cli.range {
        if let [r_min, r_max] = range.as_slice() {
            params.r_min = *r_min;
            params.r_max = *r_max;
            params.auto_range = false;
        }
    }
    if let Some(theta) = cli.theta {
        params.theta = theta;
    }
}

fn report(state: &VariantSession, config: &ExplorerConfig) {
    let variant = state.variant();
    println!("=== {} ({:?}) ===", variant.label(), variant.metric());

    if let Some(err) = state.error() {
        let tag = match err {
            SessionError::Validation(_) => "invalid",
            SessionError::Transport(_) => "error",
        };
        println!("[{tag}] {err}");
        return;
    }

    let params = state.parameters();
    match state.display_energy() {
        Some(DisplayEnergy::Parameter(value)) => println!("Energy         : Ē = {value:.6}"),
        Some(DisplayEnergy::PhotonRatio(value)) => println!("Energy         : k = (E/L)² = {value:.6}"),
        None => {}
    }
    if let Some(b) = resolve_energy(params)
        .ok()
        .and_then(|energy| impact_parameter(energy, params.angular_momentum))
    {
        println!("Impact param   : b = L/E = {b:.6}");
    }

    if let (Some(trajectory), Some(view)) = (
        state.trajectory(),
        state.render_view(config.render.max_points, config.render.padding),
    ) {
        println!(
            "Trajectory     : {} points returned, {} rendered (step {}), captured = {}",
            trajectory.meta.points_returned,
            view.trajectory.len(),
            view.trajectory.step,
            trajectory.meta.captured
        );
        match view.viewport {
            Some(vp) => {
                let (cx, cy) = vp.center();
                println!(
                    "Viewport       : x [{:.3}, {:.3}], y [{:.3}, {:.3}], centred at ({cx:.3}, {cy:.3})",
                    vp.x_range.0, vp.x_range.1, vp.y_range.0, vp.y_range.1
                );
            }
            None => println!("Viewport       : auto (no finite samples)"),
        }
        if let Some(r) = trajectory.meta.r_horizon {
            println!("Horizon        : r = {r:.4}");
        }
        if let Some(r) = trajectory.meta.photon_sphere {
            println!("Photon sphere  : r = {r:.4}");
        }
    }

    if let Some(potential) = state.potential() {
        println!(
            "Potential      : {} samples of {} over r in [{:.3}, {:.3}]",
            potential.meta.sample_count,
            potential.form.label(),
            potential.r.first().copied().unwrap_or(f64::NAN),
            potential.r.last().copied().unwrap_or(f64::NAN)
        );
    }

    match state.critical_points() {
        Some(points) => println!(
            "Critical points: outer r = {:.3} (U = {:.5}), inner r = {:.3} (U = {:.5})",
            points.outer.radius, points.outer.potential, points.inner.radius, points.inner.potential
        ),
        None if variant == Variant::Standard && params.particle == ParticleKind::Massive => {
            println!("Critical points: none (L² <= 12 M², no bound orbits)")
        }
        None => {}
    }
}

fn export(
    state: &VariantSession,
    config: &ExplorerConfig,
    dir: &Path,
    render: bool,
    generated_at: &str,
) -> anyhow::Result<()> {
    let label = state.variant().label();
    let view = state.render_view(config.render.max_points, config.render.padding);
    let trajectory: Option<&TrajectoryResult> = state.trajectory();
    let request = geodesic_explorer::request::map_parameters(state.variant(), state.parameters()).ok();
    let error = state.error().map(ToString::to_string);

    let summary = RunSummary {
        generated_at,
        variant: label,
        parameters: state.parameters(),
        phi_max: request.as_ref().map(|r| r.trajectory.phi_max),
        r_min: request.as_ref().map(|r| r.potential.r_min),
        r_max: request.as_ref().map(|r| r.potential.r_max),
        points_returned: trajectory.map(|t| t.meta.points_returned),
        points_rendered: view.as_ref().map(|v| v.trajectory.len()),
        downsample_step: view.as_ref().map(|v| v.trajectory.step),
        captured: trajectory.map(|t| t.meta.captured),
        potential_form: state.potential().map(|p| p.form.label()),
        viewport: view.as_ref().and_then(|v| v.viewport),
        critical_points: state.critical_points(),
        error: error.as_deref(),
    };
    let summary_path = dir.join(format!("{label}_summary.json"));
    write_summary(&summary_path, &summary)?;
    println!("[written] {}", summary_path.display());

    if let (Some(trajectory), Some(view)) = (trajectory, &view) {
        let csv_path = dir.join(format!("{label}_trajectory.csv"));
        write_trajectory(&csv_path, &trajectory.x, &trajectory.y)?;
        println!("[written] {}", csv_path.display());

        if render {
            let png_path = dir.join(format!("{label}_trajectory.png"));
            // Prefer the service's horizon; the smeared metric has no closed form here.
            let horizon = trajectory.meta.r_horizon.or(match state.variant() {
                Variant::Standard => Some(radii::horizon(state.parameters().mass)),
                Variant::Noncommutative => None,
            });
            plot::render_trajectory(
                &png_path,
                &view.trajectory.x,
                &view.trajectory.y,
                view.viewport,
                horizon,
                chart_size(config),
                &format!("{label} trajectory"),
            )?;
            println!("[written] {}", png_path.display());
        }
    }

    if let Some(potential) = state.potential() {
        let csv_path = dir.join(format!("{label}_potential.csv"));
        write_potential(&csv_path, &potential.r, &potential.effective_potential)?;
        println!("[written] {}", csv_path.display());

        if render {
            let png_path = dir.join(format!("{label}_potential.png"));
            let critical = state.critical_points();
            plot::render_potential(
                &png_path,
                &potential.r,
                &potential.effective_potential,
                potential.form,
                critical.as_ref(),
                chart_size(config),
                &format!("{label} effective potential"),
            )?;
            println!("[written] {}", png_path.display());
        }
    }

    Ok(())
}

fn chart_size(config: &ExplorerConfig) -> ChartSize {
    ChartSize {
        width: config.render.width,
        height: config.render.height,
    }
}
