//! Visualization module for assembled plots
//!
//! This module renders [`PlotSpec`](crate::pipeline::PlotSpec)s using the `plotters` library.
//!
//! # Organization
//!
//! - **config**: Plot configuration (`PlotConfig`)
//! - **plot_spec**: Rendering of time plots (lines) and scalar plots (markers)
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use diffplot::output::visualization::{render_plot_spec, PlotConfig};
//!
//! let spec = PlotSpecAssembler::new().assemble(&request)?;
//!
//! // Default configuration, PNG output
//! render_plot_spec(&spec, "diffusion.png", None)?;
//!
//! // Log-log SVG at 8x6 inches
//! let config = PlotConfig::figure(8.0, 6.0).with_log_scales(true, true, false);
//! render_plot_spec(&spec, "diffusion.svg", Some(&config))?;
//! ```

pub mod config;
pub mod plot_spec;

pub use config::{IntoOptionalTitle, NO_TITLE, PlotConfig};

pub use plot_spec::render_plot_spec;
