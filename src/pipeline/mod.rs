//! Plot assembly pipeline
//!
//! Turns a [`PlotRequest`] into a [`PlotSpec`]:
//!
//! ```text
//! datasets ──► variance ──► classify ──► aggregate ──► style ──► PlotSpec
//!               (which        (group       (trajectory   (colors,
//!                params        labels)      or scalar)    shapes)
//!                vary)
//! ```
//!
//! - [`variance`]: parameters that differ across the selected datasets
//! - [`classify`]: group labels built from the varying parameters
//! - [`aggregate`]: time trajectories or trailing-window scalars
//! - [`style`]: deterministic color and marker/linestyle assignment
//! - [`assemble`]: validation and composition into a [`PlotSpec`]
//!
//! The pipeline is synchronous and stateless; every type is `Send + Sync`.

pub mod aggregate;
pub mod assemble;
pub mod classify;
pub mod style;
pub mod variance;

pub use aggregate::{Trajectory, scalar, scalar_summary, trailing_window_start, trajectory};
pub use assemble::{
    AxisSlot, MAX_QUANTITIES, PlotRequest, PlotSpec, PlotSpecAssembler, Series, YAxis,
};
pub use classify::{Classification, GroupLabel, classify};
pub use style::{
    DEFAULT_COLORS, DEFAULT_LINE_STYLES, DEFAULT_MARKERS, LineStyle, Marker, Rgb, SeriesShape,
    StylePalette,
};
pub use variance::{distinct_values, varying_parameters};
