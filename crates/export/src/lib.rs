//! Export helpers for CSV and JSON artifacts.

pub mod series {
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    pub const TRAJECTORY_HEADER: &str = "x,y";
    pub const POTENTIAL_HEADER: &str = "r,effective_potential";

    /// Create a writer for the target path, handling stdout (`-`) by convention.
    pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
        if path == Path::new("-") {
            return Ok(Box::new(BufWriter::new(io::stdout())));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    /// Write two co-indexed columns under `header`. Non-finite samples are written as `NaN`.
    pub fn write_columns(
        writer: &mut dyn Write,
        header: &str,
        first: &[f64],
        second: &[f64],
    ) -> io::Result<()> {
        writeln!(writer, "{}", header)?;
        for (a, b) in first.iter().zip(second) {
            writeln!(writer, "{},{}", a, b)?;
        }
        writer.flush()
    }

    /// Write trajectory samples as `x,y` rows.
    pub fn write_trajectory(path: &Path, x: &[f64], y: &[f64]) -> io::Result<()> {
        let mut writer = writer_for_path(path)?;
        write_columns(writer.as_mut(), TRAJECTORY_HEADER, x, y)
    }

    /// Write a potential curve as `r,effective_potential` rows.
    pub fn write_potential(path: &Path, r: &[f64], potential: &[f64]) -> io::Result<()> {
        let mut writer = writer_for_path(path)?;
        write_columns(writer.as_mut(), POTENTIAL_HEADER, r, potential)
    }
}

pub mod summary {
    use std::fs::{self, File};
    use std::io;
    use std::path::Path;

    use geodesic_core::OrbitParameters;
    use geodesic_potential::CriticalPoints;
    use geodesic_sampling::Viewport;
    use serde::Serialize;
    use serde_json::to_writer_pretty;

    /// JSON sidecar describing one variant run.
    #[derive(Debug, Serialize)]
    pub struct RunSummary<'a> {
        pub generated_at: &'a str,
        pub variant: &'a str,
        pub parameters: &'a OrbitParameters,
        pub phi_max: Option<f64>,
        pub r_min: Option<f64>,
        pub r_max: Option<f64>,
        pub points_returned: Option<usize>,
        pub points_rendered: Option<usize>,
        pub downsample_step: Option<usize>,
        pub captured: Option<bool>,
        pub potential_form: Option<&'a str>,
        pub viewport: Option<Viewport>,
        pub critical_points: Option<CriticalPoints>,
        pub error: Option<&'a str>,
    }

    /// Write the summary as pretty-printed JSON, creating parent directories.
    pub fn write_summary(path: &Path, summary: &RunSummary<'_>) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        to_writer_pretty(File::create(path)?, summary)?;
        Ok(())
    }
}
