//! Plot assembly
//!
//! [`PlotSpecAssembler`] validates a [`PlotRequest`] and runs the pipeline stages in
//! order:
//!
//! ```text
//! PlotRequest → validated → classified → aggregated → styled → PlotSpec
//! ```
//!
//! Every stage is a pure transformation of the request; a rejected request produces no
//! partial output.

use std::path::PathBuf;

use super::aggregate::{self, Trajectory};
use super::classify::{GroupLabel, classify};
use super::style::{Rgb, SeriesShape, StylePalette};
use super::variance::varying_parameters;
use crate::dataset::{AxisSelector, CoefficientId, Dataset, Quantity, QuantitySelection};
use crate::error::PlotError;

/// Maximum number of y quantities (one per y axis)
pub const MAX_QUANTITIES: usize = 2;

/// One plot to build: which runs, what on x, what on y
#[derive(Debug, Clone)]
pub struct PlotRequest<'a> {
    datasets: Vec<&'a Dataset>,
    axis: AxisSelector,
    selection: QuantitySelection,
    title: String,
}

impl<'a> PlotRequest<'a> {
    pub fn new(
        datasets: impl IntoIterator<Item = &'a Dataset>,
        axis: AxisSelector,
        selection: QuantitySelection,
        title: impl Into<String>,
    ) -> Self {
        Self {
            datasets: datasets.into_iter().collect(),
            axis,
            selection,
            title: title.into(),
        }
    }

    pub fn datasets(&self) -> &[&'a Dataset] {
        &self.datasets
    }

    pub fn axis(&self) -> AxisSelector {
        self.axis
    }

    pub fn selection(&self) -> &QuantitySelection {
        &self.selection
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Y axis a series is drawn against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisSlot {
    Primary,
    Secondary,
}

impl AxisSlot {
    /// Slot of the n-th requested quantity
    pub fn from_position(position: usize) -> Self {
        if position == 0 {
            AxisSlot::Primary
        } else {
            AxisSlot::Secondary
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AxisSlot::Primary => "primary",
            AxisSlot::Secondary => "secondary",
        }
    }
}

/// A y axis of the plot
#[derive(Debug, Clone, PartialEq)]
pub struct YAxis {
    pub slot: AxisSlot,
    pub quantity: Quantity,
    pub label: String,
}

/// One drawn series: a coefficient of one dataset
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub source: PathBuf,
    pub group: GroupLabel,
    pub coefficient: CoefficientId,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub color: Rgb,
    pub shape: SeriesShape,
    pub slot: AxisSlot,
}

/// Renderer-ready description of one plot
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSpec {
    pub title: String,
    pub axis: AxisSelector,
    pub x_label: String,

    /// Y axes in slot order (primary first)
    pub y_axes: Vec<YAxis>,

    /// Series in dataset, quantity, coefficient order
    pub series: Vec<Series>,

    /// Coefficient colors in first-appearance order
    pub color_legend: Vec<(CoefficientId, Rgb)>,

    /// Group shapes in first-appearance order
    pub shape_legend: Vec<(GroupLabel, SeriesShape)>,
}

impl PlotSpec {
    /// Whether series are drawn against time
    pub fn is_time_plot(&self) -> bool {
        self.axis.is_time()
    }

    pub fn y_axis(&self, slot: AxisSlot) -> Option<&YAxis> {
        self.y_axes.iter().find(|a| a.slot == slot)
    }

    pub fn series_on(&self, slot: AxisSlot) -> impl Iterator<Item = &Series> {
        self.series.iter().filter(move |s| s.slot == slot)
    }
}

// =================================================================================================
// Assembler
// =================================================================================================

/// Builds [`PlotSpec`]s from [`PlotRequest`]s
///
/// Holds only the palettes, so one assembler can serve any number of requests.
///
/// # Example
///
/// ```rust
/// use diffplot::dataset::{AxisSelector, Component, Dataset, ParticleTable, Quantity,
///                         QuantitySelection, RunParameters, TimeSeriesTable};
/// use diffplot::pipeline::{PlotRequest, PlotSpecAssembler};
///
/// let time = vec![0.0, 1.0, 2.0, 3.0];
/// let run = Dataset::new(
///     "run",
///     RunParameters::default(),
///     TimeSeriesTable::new(time.clone()).with_column(Component::X, vec![0.0, 1.0, 2.0, 3.0]),
///     TimeSeriesTable::new(time),
///     ParticleTable::new(),
/// )?;
///
/// let selection = QuantitySelection::new().with_tokens(Quantity::DisplacementSquared, &["x"])?;
/// let request = PlotRequest::new([&run], AxisSelector::Time, selection, "Displacement");
/// let spec = PlotSpecAssembler::new().assemble(&request)?;
///
/// assert_eq!(spec.series.len(), 1);
/// assert_eq!(spec.series[0].y, vec![0.0, 1.0, 2.0, 3.0]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlotSpecAssembler {
    palette: StylePalette,
}

impl PlotSpecAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_palette(palette: StylePalette) -> Self {
        Self { palette }
    }

    pub fn palette(&self) -> &StylePalette {
        &self.palette
    }

    /// Reject requests that cannot be plotted
    ///
    /// Checks, in order: datasets present, 1 to [`MAX_QUANTITIES`] quantities, every
    /// quantity with at least one coefficient, no diffusion length against time.
    pub fn validate(&self, request: &PlotRequest<'_>) -> Result<(), PlotError> {
        if request.datasets.is_empty() {
            return Err(PlotError::NoDatasets);
        }

        let selection = &request.selection;
        if selection.is_empty() {
            return Err(PlotError::NoQuantities);
        }
        if selection.len() > MAX_QUANTITIES {
            return Err(PlotError::TooManyQuantities {
                requested: selection.len(),
            });
        }

        for quantity_request in selection.requests() {
            if quantity_request.components.is_empty() {
                return Err(PlotError::EmptyCoefficientSelection {
                    quantity: quantity_request.quantity,
                });
            }
            if request.axis.is_time() && !quantity_request.quantity.is_time_indexed() {
                return Err(PlotError::IncompatibleAxisQuantity {
                    quantity: quantity_request.quantity,
                });
            }
        }

        Ok(())
    }

    /// Build the plot description
    ///
    /// # Errors
    ///
    /// Any validation failure of [`validate`](Self::validate), or
    /// [`PlotError::NonNumericSample`] when a time-axis sample is not numeric.
    pub fn assemble(&self, request: &PlotRequest<'_>) -> Result<PlotSpec, PlotError> {
        self.validate(request)?;
        log::debug!(
            "Validated plot '{}': {} datasets, axis {}",
            request.title,
            request.datasets.len(),
            request.axis
        );

        let datasets = request.datasets();
        let axis = request.axis;

        // Classification
        let varying = varying_parameters(datasets, axis);
        let classification = classify(datasets, &varying);
        log::debug!(
            "Classified into {} group(s), varying: {:?}",
            classification.groups.len(),
            varying
        );

        // Coefficients in color order
        let coefficients: Vec<(AxisSlot, CoefficientId)> = request
            .selection
            .requests()
            .iter()
            .enumerate()
            .flat_map(|(position, r)| {
                r.coefficients()
                    .map(move |c| (AxisSlot::from_position(position), c))
            })
            .collect();

        let time_axis = axis.is_time();

        // Aggregation and series
        let mut series = Vec::with_capacity(datasets.len() * coefficients.len());
        for ((dataset, group), group_index) in datasets
            .iter()
            .zip(&classification.labels)
            .zip(&classification.group_of)
        {
            for (color_index, (slot, coefficient)) in coefficients.iter().enumerate() {
                let (x, y) = self.points(dataset, axis, *coefficient)?;

                series.push(Series {
                    source: dataset.source().to_path_buf(),
                    group: group.clone(),
                    coefficient: *coefficient,
                    x,
                    y,
                    color: self.palette.color(color_index),
                    shape: self.palette.shape(*group_index, time_axis),
                    slot: *slot,
                });
            }
        }
        log::debug!("Assembled {} series", series.len());

        let y_axes = request
            .selection
            .quantities()
            .enumerate()
            .map(|(position, quantity)| YAxis {
                slot: AxisSlot::from_position(position),
                quantity,
                label: quantity.axis_label().to_string(),
            })
            .collect();

        Ok(PlotSpec {
            title: request.title.clone(),
            axis,
            x_label: axis.label().to_string(),
            y_axes,
            series,
            color_legend: coefficients
                .iter()
                .enumerate()
                .map(|(i, (_, c))| (*c, self.palette.color(i)))
                .collect(),
            shape_legend: classification
                .groups
                .iter()
                .enumerate()
                .map(|(i, g)| (g.clone(), self.palette.shape(i, time_axis)))
                .collect(),
        })
    }

    fn points(
        &self,
        dataset: &Dataset,
        axis: AxisSelector,
        coefficient: CoefficientId,
    ) -> Result<(Vec<f64>, Vec<f64>), PlotError> {
        match dataset.params().axis_value(axis) {
            None => {
                let Trajectory { time, values } = aggregate::trajectory(dataset, coefficient)?;
                Ok((time, values))
            }
            Some(x) => Ok((vec![x], vec![aggregate::scalar(dataset, coefficient)])),
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
