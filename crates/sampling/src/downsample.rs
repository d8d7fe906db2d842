//! Fixed-stride decimation of co-indexed coordinate sequences.
//!
//! The output is always a subsequence of the input: sample values are never
//! interpolated or smoothed, so hover/inspection shows exact service output.

/// Point budget used when the caller does not supply one.
pub const DEFAULT_MAX_POINTS: usize = 7000;

/// Decimated coordinate pairs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Downsampled {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Stride applied to the source; 1 when the input already fit the budget.
    pub step: usize,
}

impl Downsampled {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Stride needed to fit `n` samples into `max_points`.
pub fn stride(n: usize, max_points: usize) -> usize {
    if max_points == 0 || n <= max_points {
        1
    } else {
        n.div_ceil(max_points)
    }
}

/// Source indices retained for `n` samples under a `max_points` budget.
///
/// Indices are strictly increasing and never exceed the budget. The final
/// index `n - 1` is always retained: it is appended when the budget has room,
/// otherwise it takes the place of the last strided index.
pub fn sample_indices(n: usize, max_points: usize) -> Vec<usize> {
    if n == 0 || max_points == 0 {
        return Vec::new();
    }
    if n <= max_points {
        return (0..n).collect();
    }

    let step = stride(n, max_points);
    let mut indices: Vec<usize> = (0..n).step_by(step).collect();
    let last = n - 1;
    if indices.last() != Some(&last) {
        if indices.len() < max_points {
            indices.push(last);
        } else if let Some(tail) = indices.last_mut() {
            *tail = last;
        }
    }
    indices
}

/// Reduce `x`/`y` to at most `max_points` co-indexed samples.
///
/// Only the first `min(x.len(), y.len())` pairs are considered. When that
/// count already fits the budget the pairs are returned unchanged.
pub fn downsample(x: &[f64], y: &[f64], max_points: usize) -> Downsampled {
    let n = x.len().min(y.len());
    let step = stride(n, max_points);
    if step == 1 && max_points != 0 {
        return Downsampled {
            x: x[..n].to_vec(),
            y: y[..n].to_vec(),
            step,
        };
    }

    let indices = sample_indices(n, max_points);
    log::debug!(
        "downsampling {n} samples to {} (step {step}, budget {max_points})",
        indices.len()
    );
    Downsampled {
        x: indices.iter().map(|&i| x[i]).collect(),
        y: indices.iter().map(|&i| y[i]).collect(),
        step,
    }
}
