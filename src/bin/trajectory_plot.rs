use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use csv::ReaderBuilder;
use geodesic_explorer::plot::{self, ChartSize};
use geodesic_explorer::sampling::{DEFAULT_MAX_POINTS, DEFAULT_PADDING, downsample, viewport};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Render a trajectory CSV (x,y columns) to PNG with bounded decimation and a square viewport"
)]
struct Cli {
    /// CSV produced by `simulate --output-dir`
    #[arg(long)]
    input: PathBuf,

    /// Destination PNG file
    #[arg(long)]
    output: PathBuf,

    /// Point budget for the rendered polyline
    #[arg(long, default_value_t = DEFAULT_MAX_POINTS)]
    max_points: usize,

    /// Fractional margin around the orbit
    #[arg(long, default_value_t = DEFAULT_PADDING)]
    padding: f64,

    #[arg(long, default_value_t = 900)]
    width: u32,

    #[arg(long, default_value_t = 900)]
    height: u32,

    /// Draw the event horizon disc with this radius
    #[arg(long)]
    horizon: Option<f64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.max_points == 0 {
        bail!("--max-points must be at least 1");
    }
    if !(cli.padding >= 0.0 && cli.padding.is_finite()) {
        bail!("--padding must be a non-negative number");
    }

    let (x, y) = read_samples(&cli.input)?;
    if !x.iter().zip(&y).any(|(a, b)| a.is_finite() && b.is_finite()) {
        bail!("no finite samples found in {}", cli.input.display());
    }

    let reduced = downsample(&x, &y, cli.max_points);
    let view = viewport(&reduced.x, &reduced.y, cli.padding);
    log::info!(
        "rendering {} of {} samples (step {})",
        reduced.len(),
        x.len(),
        reduced.step
    );

    plot::render_trajectory(
        &cli.output,
        &reduced.x,
        &reduced.y,
        view,
        cli.horizon,
        ChartSize {
            width: cli.width,
            height: cli.height,
        },
        "Trajectory",
    )?;

    println!(
        "[written] {} ({} points, step {})",
        cli.output.display(),
        reduced.len(),
        reduced.step
    );
    Ok(())
}

fn read_samples(path: &Path) -> Result<(Vec<f64>, Vec<f64>)> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut x = Vec::new();
    let mut y = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("failed to read row {}", row + 1))?;
        let (Some(px), Some(py)) = (record.get(0), record.get(1)) else {
            bail!("row {} does not have x and y columns", row + 1);
        };
        x.push(parse_value(px).with_context(|| format!("bad x on row {}", row + 1))?);
        y.push(parse_value(py).with_context(|| format!("bad y on row {}", row + 1))?);
    }
    Ok((x, y))
}

fn parse_value(raw: &str) -> Result<f64> {
    if raw.is_empty() {
        return Ok(f64::NAN);
    }
    Ok(raw.parse::<f64>()?)
}
