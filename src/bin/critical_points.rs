use clap::Parser;
use geodesic_explorer::potential::{critical_points, observables};
use geodesic_explorer::request::auto_range;
use geodesic_explorer::types::{ParticleKind, radii};
use serde_json::json;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Solve for the circular-orbit radii of a massive particle around a Schwarzschild black hole"
)]
struct Cli {
    /// Black hole mass M
    #[arg(long, default_value_t = 1.0)]
    mass: f64,

    /// Angular momentum L
    #[arg(long, default_value_t = 4.2)]
    angular_momentum: f64,

    /// Emit JSON instead of the text report
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if !(cli.mass > 0.0 && cli.mass.is_finite()) {
        anyhow::bail!("mass M must be positive (got {})", cli.mass);
    }

    let mass = cli.mass;
    let l = cli.angular_momentum;
    let points = critical_points(mass, l);
    let range = auto_range(mass, l, ParticleKind::Massive);

    if cli.json {
        let circular = points.map(|p| {
            json!({
                "stable": {
                    "r": p.outer.radius,
                    "U_eff": p.outer.potential,
                    "E2": observables::v_eff_squared(p.outer.radius, mass, l, ParticleKind::Massive),
                },
                "unstable": {
                    "r": p.inner.radius,
                    "U_eff": p.inner.potential,
                    "E2": observables::v_eff_squared(p.inner.radius, mass, l, ParticleKind::Massive),
                },
            })
        });
        let report = json!({
            "M": mass,
            "L": l,
            "r_horizon": radii::horizon(mass),
            "photon_sphere": radii::photon_sphere(mass),
            "critical_points": circular,
            "auto_range": [range.r_min, range.r_max],
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("=== Schwarzschild effective potential (M = {mass}, L = {l}) ===");
    println!("Horizon        : r = {:.4}", radii::horizon(mass));
    println!("Photon sphere  : r = {:.4}", radii::photon_sphere(mass));
    match points {
        Some(p) => {
            let stable_e2 = observables::v_eff_squared(p.outer.radius, mass, l, ParticleKind::Massive);
            let unstable_e2 =
                observables::v_eff_squared(p.inner.radius, mass, l, ParticleKind::Massive);
            println!(
                "Stable orbit   : r = {:.4}, U_eff = {:.6}, E² = {:.6}",
                p.outer.radius, p.outer.potential, stable_e2
            );
            println!(
                "Unstable orbit : r = {:.4}, U_eff = {:.6}, E² = {:.6}",
                p.inner.radius, p.inner.potential, unstable_e2
            );
        }
        None => println!("No critical points: L² <= 12 M², so no circular orbits exist."),
    }
    println!(
        "Auto range     : r in [{:.4}, {:.4}]",
        range.r_min, range.r_max
    );
    Ok(())
}
