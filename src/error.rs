//! Rejections raised while building a plot
//!
//! Every variant identifies the offending input so that a front-end can re-prompt
//! for exactly that selection. Nothing here is retried internally.

use std::path::PathBuf;

use thiserror::Error;

use crate::dataset::{CoefficientId, Quantity};

/// Rejection of a selection or a [`PlotRequest`](crate::pipeline::PlotRequest)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlotError {
    /// A coefficient token is not valid for the quantity it was given for
    #[error("'{token}' is not a valid {quantity} coefficient (expected one of: {expected})")]
    InvalidCoefficientToken {
        quantity: Quantity,
        token: String,
        expected: String,
    },

    /// Diffusion length has no time ordering and cannot be plotted against time
    #[error("cannot plot {quantity} over time: data is per particle, not time-ordered")]
    IncompatibleAxisQuantity { quantity: Quantity },

    /// A quantity was requested without any coefficient
    #[error("no coefficient selected for {quantity}")]
    EmptyCoefficientSelection { quantity: Quantity },

    /// Only two y-axis slots exist
    #[error("{requested} quantities requested but at most 2 can be plotted (one per y axis)")]
    TooManyQuantities { requested: usize },

    /// The request names no dataset
    #[error("no dataset selected for plot")]
    NoDatasets,

    /// The request names no y quantity
    #[error("no quantity selected for plot")]
    NoQuantities,

    /// A replay index does not name any selector
    #[error("{index} is not a valid {kind} selection (expected 0..={max})")]
    InvalidSelectorIndex {
        kind: &'static str,
        index: usize,
        max: usize,
    },

    /// A time-series sample could not be read as a number
    #[error("sample {index} of {coefficient} in {} is not numeric: '{raw}'", .path.display())]
    NonNumericSample {
        path: PathBuf,
        coefficient: CoefficientId,
        index: usize,
        raw: String,
    },
}
