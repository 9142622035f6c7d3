//! Simulation run records
//!
//! This module provides the data model consumed by the plotting pipeline:
//!
//! - [`Dataset`]: one simulation output directory (parameters + sample tables)
//! - [`RunParameters`] / [`Parameter`]: the closed parameter registry
//! - [`TimeSeriesTable`] / [`ParticleTable`]: sample tables
//! - [`AxisSelector`], [`Quantity`], [`QuantitySelection`]: what a plot shows
//! - [`loader`]: reads a directory written by the simulator into a [`Dataset`]
//!
//! # Example
//!
//! ```rust
//! use diffplot::dataset::{Component, Dataset, ParticleTable, RunParameters, TimeSeriesTable};
//!
//! let time = vec![0.0, 1.0e-12, 2.0e-12, 3.0e-12];
//! let dataset = Dataset::new(
//!     "runs/300K",
//!     RunParameters { temperature: 300.0, ..RunParameters::default() },
//!     TimeSeriesTable::new(time.clone()).with_column(Component::X, vec![0.0, 1.0, 2.0, 3.0]),
//!     TimeSeriesTable::new(time).with_column(Component::Xx, vec![0.5, 0.5, 0.5, 0.5]),
//!     ParticleTable::new(),
//! )?;
//!
//! assert_eq!(dataset.params().temperature, 300.0);
//! # Ok::<(), diffplot::dataset::LoadError>(())
//! ```

pub mod loader;
pub mod params;
pub mod selectors;
pub mod series;

use std::path::{Path, PathBuf};

pub use loader::{LoadError, load_dataset, load_datasets};
pub use params::{ParamValue, Parameter, RunParameters};
pub use selectors::{
    AxisSelector, CoefficientId, Component, Quantity, QuantityRequest, QuantitySelection,
};
pub use series::{ParticleTable, SampleValue, TimeSeriesTable};

/// One simulation run: parameters and output tables
///
/// Immutable once built. The two time-indexed tables always share the same time index.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    source: PathBuf,
    params: RunParameters,
    displacement_squared: TimeSeriesTable,
    diffusion_tensor: TimeSeriesTable,
    diffusion_length: ParticleTable,
}

impl Dataset {
    /// Create a dataset
    ///
    /// # Errors
    ///
    /// [`LoadError::TimeIndexMismatch`] if the displacement-squared and diffusion-tensor
    /// tables do not share the same time column.
    pub fn new(
        source: impl Into<PathBuf>,
        params: RunParameters,
        displacement_squared: TimeSeriesTable,
        diffusion_tensor: TimeSeriesTable,
        diffusion_length: ParticleTable,
    ) -> Result<Self, LoadError> {
        let source = source.into();

        let same_index = displacement_squared.len() == diffusion_tensor.len()
            && displacement_squared
                .time()
                .iter()
                .zip(diffusion_tensor.time())
                .all(|(a, b)| a.total_cmp(b).is_eq());

        if !same_index {
            return Err(LoadError::TimeIndexMismatch {
                path: source,
                displacement_points: displacement_squared.len(),
                tensor_points: diffusion_tensor.len(),
            });
        }

        Ok(Self {
            source,
            params,
            displacement_squared,
            diffusion_tensor,
            diffusion_length,
        })
    }

    /// Directory the run was loaded from (stable key for deduplication and display)
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn params(&self) -> &RunParameters {
        &self.params
    }

    pub fn displacement_squared(&self) -> &TimeSeriesTable {
        &self.displacement_squared
    }

    pub fn diffusion_tensor(&self) -> &TimeSeriesTable {
        &self.diffusion_tensor
    }

    pub fn diffusion_length(&self) -> &ParticleTable {
        &self.diffusion_length
    }

    /// Shared time index of the time-ordered tables
    pub fn time(&self) -> &[f64] {
        self.diffusion_tensor.time()
    }

    /// Time-ordered table of a quantity (`None` for diffusion length)
    pub fn time_series(&self, quantity: Quantity) -> Option<&TimeSeriesTable> {
        match quantity {
            Quantity::DisplacementSquared => Some(&self.displacement_squared),
            Quantity::DiffusionTensor => Some(&self.diffusion_tensor),
            Quantity::DiffusionLength => None,
        }
    }

    /// Samples of one coefficient, whatever the table shape
    pub fn samples(&self, coefficient: CoefficientId) -> Option<&[SampleValue]> {
        match coefficient.quantity {
            Quantity::DisplacementSquared => self.displacement_squared.column(coefficient.component),
            Quantity::DiffusionTensor => self.diffusion_tensor.column(coefficient.component),
            Quantity::DiffusionLength => self.diffusion_length.column(coefficient.component),
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
