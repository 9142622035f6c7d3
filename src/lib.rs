//! diffplot: Plot Assembly for Monte-Carlo Diffusion Simulations
//!
//! Loads the output directories of exciton diffusion simulations and builds
//! comparable multi-series plots across runs with different physical parameters.
//!
//! # Architecture
//!
//! diffplot is built on two principles:
//!
//! 1. **Separation of assembly and rendering**
//!    - The pipeline decides what is drawn (groups, aggregates, styles)
//!    - Output modules decide how it is drawn or written (plotters, CSV)
//!
//! 2. **Determinism**
//!    - Group labels depend only on the selected runs and the x axis
//!    - Styles depend only on the ordered keys they are assigned to
//!
//! # Quick Start
//!
//! ```rust
//! use diffplot::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let time = vec![0.0, 1.0e-12, 2.0e-12, 3.0e-12];
//! let run = |temperature: f64, xx: f64| {
//!     Dataset::new(
//!         format!("runs/{temperature}K"),
//!         RunParameters { temperature, ..RunParameters::default() },
//!         TimeSeriesTable::new(time.clone()),
//!         TimeSeriesTable::new(time.clone()).with_column(Component::Xx, vec![xx; 4]),
//!         ParticleTable::new(),
//!     )
//! };
//! let (cold, hot) = (run(300.0, 1.0e-6)?, run(350.0, 2.0e-6)?);
//!
//! // Diffusion tensor xx against temperature (replay tokens: axis 3, quantity 1)
//! let selection = QuantitySelection::new().with_index_tokens(1, &["xx"])?;
//! let request = PlotRequest::new([&cold, &hot], AxisSelector::from_index(3)?, selection, "Dxx");
//! let spec = PlotSpecAssembler::new().assemble(&request)?;
//!
//! assert_eq!(spec.series.len(), 2);
//! assert_eq!(spec.series[1].x, vec![350.0]);
//! assert_eq!(spec.series[1].y, vec![2.0e-6]);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`dataset`]: Run records, selectors and the directory loader
//! - [`pipeline`]: Variance detection, classification, aggregation, styling, assembly
//! - [`output`]: Rendering (PNG/SVG) and CSV export
//! - [`error`]: Plot request rejections

pub mod dataset;
pub mod error;
pub mod output;
pub mod pipeline;

pub use error::PlotError;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use diffplot::prelude::*;
    //! ```
    pub use crate::dataset::{AxisSelector,
                             Component,
                             Dataset,
                             ParticleTable,
                             Quantity,
                             QuantitySelection,
                             RunParameters,
                             TimeSeriesTable,
                             load_dataset,
                             load_datasets};
    pub use crate::error::PlotError;
    pub use crate::output::{render_plot_spec,
                            CsvExporter,
                            Exporter,
                            PlotConfig};
    pub use crate::pipeline::{PlotRequest,
                              PlotSpec,
                              PlotSpecAssembler,
                              StylePalette};
}
