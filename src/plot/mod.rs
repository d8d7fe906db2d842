//! PNG rendering of trajectories and effective-potential curves.

use std::fs;
use std::path::Path;

use geodesic_potential::CriticalPoints;
use geodesic_request::PotentialForm;
use geodesic_sampling::Viewport;
use plotters::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),
    #[error("output path contains invalid UTF-8: {0}")]
    InvalidPath(String),
    #[error("drawing failed: {0}")]
    Drawing(String),
}

fn drawing<E: std::fmt::Display>(err: E) -> PlotError {
    PlotError::Drawing(err.to_string())
}

/// Chart size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartSize {
    fn default() -> Self {
        Self {
            width: 900,
            height: 900,
        }
    }
}

pub fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}

fn prepare_output(path: &Path) -> Result<&str, PlotError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    path.to_str()
        .ok_or_else(|| PlotError::InvalidPath(path.display().to_string()))
}

/// Draw an orbit in the equatorial plane inside a square viewport.
///
/// Non-finite samples break the path. When `viewport` is `None` the unit
/// square around the origin is used. A filled disc marks the horizon when
/// `horizon_radius` is given.
pub fn render_trajectory(
    path: &Path,
    x: &[f64],
    y: &[f64],
    viewport: Option<Viewport>,
    horizon_radius: Option<f64>,
    size: ChartSize,
    caption: &str,
) -> Result<(), PlotError> {
    let output = prepare_output(path)?;
    let root = BitMapBackend::new(output, (size.width, size.height)).into_drawing_area();
    root.fill(&WHITE).map_err(drawing)?;

    let view = viewport.unwrap_or(Viewport {
        x_range: (-1.0, 1.0),
        y_range: (-1.0, 1.0),
    });
    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 24.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 16.0, FontStyle::Normal);

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(caption.to_string(), caption_font)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(view.x_range.0..view.x_range.1, view.y_range.0..view.y_range.1)
        .map_err(drawing)?;

    chart
        .configure_mesh()
        .x_desc("x / M")
        .y_desc("y / M")
        .label_style(label_font)
        .x_labels(7)
        .y_labels(7)
        .draw()
        .map_err(drawing)?;

    if let Some(radius) = horizon_radius.filter(|r| *r > 0.0 && r.is_finite()) {
        let disc: Vec<(f64, f64)> = (0..=120)
            .map(|i| {
                let t = i as f64 / 120.0 * std::f64::consts::TAU;
                (radius * t.cos(), radius * t.sin())
            })
            .collect();
        chart
            .draw_series(std::iter::once(Polygon::new(disc, BLACK.filled())))
            .map_err(drawing)?;
    }

    let orbit_color = RGBColor(30, 90, 200);
    for segment in finite_segments(x, y) {
        chart
            .draw_series(std::iter::once(PathElement::new(
                segment,
                ShapeStyle::from(&orbit_color).stroke_width(2),
            )))
            .map_err(drawing)?;
    }

    root.present().map_err(drawing)?;
    Ok(())
}

/// Draw an effective-potential curve with optional extrema markers.
///
/// Markers are drawn only for the energy form, where the analytic extrema
/// share the curve's units.
pub fn render_potential(
    path: &Path,
    r: &[f64],
    potential: &[f64],
    form: PotentialForm,
    critical_points: Option<&CriticalPoints>,
    size: ChartSize,
    caption: &str,
) -> Result<(), PlotError> {
    let output = prepare_output(path)?;
    let root = BitMapBackend::new(output, (size.width, size.height)).into_drawing_area();
    root.fill(&WHITE).map_err(drawing)?;

    let (r_lo, r_hi) = finite_bounds(r).unwrap_or((0.0, 1.0));
    let (v_lo, v_hi) = finite_bounds(potential).unwrap_or((-1.0, 1.0));
    let v_pad = if v_hi > v_lo { 0.05 * (v_hi - v_lo) } else { 1.0 };
    let r_hi = if r_hi > r_lo { r_hi } else { r_lo + 1.0 };

    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 24.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 16.0, FontStyle::Normal);

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(caption.to_string(), caption_font)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(r_lo..r_hi, (v_lo - v_pad)..(v_hi + v_pad))
        .map_err(drawing)?;

    chart
        .configure_mesh()
        .x_desc("r / M")
        .y_desc(form.label())
        .label_style(label_font.clone())
        .x_labels(8)
        .y_labels(8)
        .y_label_formatter(&|v| format!("{v:.4}"))
        .draw()
        .map_err(drawing)?;

    for segment in finite_segments(r, potential) {
        chart
            .draw_series(std::iter::once(PathElement::new(
                segment,
                ShapeStyle::from(&BLACK).stroke_width(2),
            )))
            .map_err(drawing)?;
    }

    if let (PotentialForm::Energy, Some(points)) = (form, critical_points) {
        let marker_color = RGBColor(210, 100, 20);
        for point in [points.outer, points.inner] {
            if !(r_lo..=r_hi).contains(&point.radius) {
                continue;
            }
            chart
                .draw_series(std::iter::once(Circle::new(
                    (point.radius, point.potential),
                    5,
                    marker_color.filled(),
                )))
                .map_err(drawing)?;
            chart
                .draw_series(std::iter::once(Text::new(
                    format!("r = {:.3}", point.radius),
                    (point.radius, point.potential),
                    label_font.clone().color(&marker_color),
                )))
                .map_err(drawing)?;
        }
    }

    root.present().map_err(drawing)?;
    Ok(())
}

/// Split co-indexed samples into runs of finite points.
fn finite_segments(x: &[f64], y: &[f64]) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for (&px, &py) in x.iter().zip(y) {
        if px.is_finite() && py.is_finite() {
            current.push((px, py));
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

fn finite_bounds(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
