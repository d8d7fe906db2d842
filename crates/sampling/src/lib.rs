//! Render-side reductions of returned trajectories: bounded decimation and square viewports.

pub mod downsample;
pub mod viewport;

pub use downsample::{DEFAULT_MAX_POINTS, Downsampled, downsample};
pub use viewport::{DEFAULT_PADDING, Viewport, viewport};
