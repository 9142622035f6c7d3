//! Output module for assembled plots
//!
//! This module turns a [`PlotSpec`](crate::pipeline::PlotSpec) into files:
//! - **Visualization**: PNG/SVG plots using plotters
//! - **Export**: CSV data export for external analysis
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! ├── visualization/      ← Plots and graphics
//! │   ├── mod.rs
//! │   ├── config.rs
//! │   └── plot_spec.rs
//! └── export/             ← Data export
//!     ├── mod.rs
//!     └── csv.rs
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use diffplot::output::{render_plot_spec, CsvExporter, Exporter};
//!
//! render_plot_spec(&spec, "diffusion.png", None)?;
//! CsvExporter::default().export(&spec, Path::new("diffusion.csv"))?;
//! ```
//!
//! Neither sub-module holds domain logic: everything they draw or write is already
//! resolved in the `PlotSpec`.

pub mod visualization;
pub mod export;

pub use visualization::{render_plot_spec, PlotConfig};

pub use export::{CsvConfig, CsvError, CsvExporter, CsvMetadata, Exporter};
