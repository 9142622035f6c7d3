//! Series aggregation
//!
//! Two mutually exclusive modes, chosen by the x axis:
//!
//! - **Time mode**: each coefficient keeps its full `(time, value)` trajectory
//! - **Scalar mode**: each coefficient collapses to one value per dataset
//!
//! # Scalar summaries
//!
//! | Quantity | Summary |
//! |----------|---------|
//! | Displacement squared, diffusion tensor | mean over the trailing quarter of the samples |
//! | Diffusion length | mean of `abs(v)` over all particles |
//!
//! Missing samples (NaN or unparsed) count in neither the sum nor the count. When no
//! sample is eligible, the count is taken as 1 and the summary is 0; this substitution
//! is logged at `warn` level.

use std::collections::BTreeMap;

use crate::dataset::{CoefficientId, Dataset, Quantity, SampleValue};
use crate::error::PlotError;

/// Ordered `(time, value)` samples of one coefficient
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    pub time: Vec<f64>,
    pub values: Vec<f64>,
}

/// First index of the trailing window: `ceil(3 * n / 4)`
pub fn trailing_window_start(n: usize) -> usize {
    (3 * n).div_ceil(4)
}

/// Full trajectory of a time-indexed coefficient, values cast to numbers
///
/// NaN samples are kept; the renderer breaks lines on them.
///
/// # Errors
///
/// [`PlotError::NonNumericSample`] on the first sample that failed numeric parsing.
pub fn trajectory(dataset: &Dataset, coefficient: CoefficientId) -> Result<Trajectory, PlotError> {
    let Some(samples) = dataset.samples(coefficient) else {
        log::warn!(
            "{} has no {} samples, plotting an empty trajectory",
            dataset.source().display(),
            coefficient
        );
        return Ok(Trajectory::default());
    };

    let values = samples
        .iter()
        .enumerate()
        .map(|(index, sample)| match sample {
            SampleValue::Numeric(v) => Ok(*v),
            SampleValue::Unparsed(raw) => Err(PlotError::NonNumericSample {
                path: dataset.source().to_path_buf(),
                coefficient,
                index,
                raw: raw.clone(),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Trajectory {
        time: dataset.time().to_vec(),
        values,
    })
}

/// Scalar summary of one coefficient
///
/// Time-ordered quantities average their trailing quarter; diffusion length averages
/// the absolute value over all particles. Missing samples are skipped; with none left
/// the result is 0.
pub fn scalar(dataset: &Dataset, coefficient: CoefficientId) -> f64 {
    let samples = dataset.samples(coefficient).unwrap_or(&[]);

    let mean = match coefficient.quantity {
        Quantity::DisplacementSquared | Quantity::DiffusionTensor => {
            let start = trailing_window_start(samples.len());
            mean_present(&samples[start..], |v| v)
        }
        Quantity::DiffusionLength => mean_present(samples, f64::abs),
    };

    mean.unwrap_or_else(|| {
        log::warn!(
            "No valid {} samples in {}, using 0",
            coefficient,
            dataset.source().display()
        );
        0.0
    })
}

/// Arithmetic mean of the present samples
///
/// Summed relative to the first sample so a constant window is exact; infinite or
/// overflowing windows fall back to the plain sum.
fn mean_present(samples: &[SampleValue], f: impl Fn(f64) -> f64) -> Option<f64> {
    let values: Vec<f64> = samples.iter().filter_map(SampleValue::present).map(f).collect();
    let (&first, rest) = values.split_first()?;
    let count = values.len() as f64;

    let offset: f64 = rest.iter().map(|v| v - first).sum();
    if first.is_finite() && offset.is_finite() {
        Some(first + offset / count)
    } else {
        Some(values.iter().sum::<f64>() / count)
    }
}

/// Scalar summaries of several coefficients of one dataset
pub fn scalar_summary(
    dataset: &Dataset,
    coefficients: impl IntoIterator<Item = CoefficientId>,
) -> BTreeMap<CoefficientId, f64> {
    coefficients
        .into_iter()
        .map(|c| (c, scalar(dataset, c)))
        .collect()
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Component, ParticleTable, RunParameters, TimeSeriesTable};
    use approx::assert_relative_eq;

    fn dataset_with_tensor_xx(values: Vec<SampleValue>) -> Dataset {
        let time: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();
        let disp = TimeSeriesTable::new(time.clone());
        let tensor = TimeSeriesTable::new(time).with_column(Component::Xx, values);
        Dataset::new("run", RunParameters::default(), disp, tensor, ParticleTable::new()).unwrap()
    }

    fn xx() -> CoefficientId {
        CoefficientId::new(Quantity::DiffusionTensor, Component::Xx)
    }

    #[test]
    fn test_trailing_window_start() {
        assert_eq!(trailing_window_start(0), 0);
        assert_eq!(trailing_window_start(1), 1);
        assert_eq!(trailing_window_start(4), 3);
        assert_eq!(trailing_window_start(5), 4);
        assert_eq!(trailing_window_start(8), 6);
        assert_eq!(trailing_window_start(10), 8);
    }

    #[test]
    fn test_scalar_uses_trailing_quarter() {
        let values = (1..=8).map(|v| SampleValue::Numeric(v as f64)).collect();
        let dataset = dataset_with_tensor_xx(values);

        // samples 7 and 8
        assert_relative_eq!(scalar(&dataset, xx()), 7.5);
    }

    #[test]
    fn test_scalar_constant_window_is_exact() {
        let mut values: Vec<SampleValue> = vec![SampleValue::Numeric(100.0); 6];
        values.extend(vec![SampleValue::Numeric(0.1); 2]);
        let dataset = dataset_with_tensor_xx(values);

        assert_eq!(scalar(&dataset, xx()), 0.1);
    }

    #[test]
    fn test_scalar_skips_missing_samples() {
        let values = vec![
            SampleValue::Numeric(1.0),
            SampleValue::Numeric(1.0),
            SampleValue::Numeric(1.0),
            SampleValue::Numeric(1.0),
            SampleValue::Numeric(1.0),
            SampleValue::Numeric(f64::NAN),
            SampleValue::Unparsed("--".into()),
            SampleValue::Numeric(4.0),
        ];
        let dataset = dataset_with_tensor_xx(values);

        assert_relative_eq!(scalar(&dataset, xx()), 4.0);
    }

    #[test]
    fn test_scalar_constant_infinite_window() {
        for v in [f64::INFINITY, f64::NEG_INFINITY] {
            let mut values = vec![SampleValue::Numeric(1.0); 6];
            values.extend(vec![SampleValue::Numeric(v); 2]);
            let dataset = dataset_with_tensor_xx(values);

            assert_eq!(scalar(&dataset, xx()), v);
        }
    }

    #[test]
    fn test_scalar_infinite_sample_dominates() {
        let mut values = vec![SampleValue::Numeric(0.0); 6];
        values.push(SampleValue::Numeric(f64::INFINITY));
        values.push(SampleValue::Numeric(1.0));
        let dataset = dataset_with_tensor_xx(values);

        assert_eq!(scalar(&dataset, xx()), f64::INFINITY);
    }

    #[test]
    fn test_scalar_large_values_cancel() {
        let mut values = vec![SampleValue::Numeric(0.0); 6];
        values.push(SampleValue::Numeric(1e308));
        values.push(SampleValue::Numeric(-1e308));
        let dataset = dataset_with_tensor_xx(values);

        assert_eq!(scalar(&dataset, xx()), 0.0);
    }

    #[test]
    fn test_scalar_zero_guard() {
        let mut values = vec![SampleValue::Numeric(5.0); 3];
        values.push(SampleValue::Numeric(f64::NAN));
        let dataset = dataset_with_tensor_xx(values);

        assert_eq!(scalar(&dataset, xx()), 0.0);
    }

    #[test]
    fn test_diffusion_length_uses_absolute_mean_over_all_particles() {
        let time = vec![0.0];
        let dataset = Dataset::new(
            "run",
            RunParameters::default(),
            TimeSeriesTable::new(time.clone()),
            TimeSeriesTable::new(time),
            ParticleTable::new()
                .with_column(Component::X, vec![-1.0, 3.0, f64::NAN])
                .with_column(Component::Y, vec![f64::NAN, f64::NAN]),
        )
        .unwrap();

        let x = CoefficientId::new(Quantity::DiffusionLength, Component::X);
        let y = CoefficientId::new(Quantity::DiffusionLength, Component::Y);
        let summary = scalar_summary(&dataset, [x, y]);

        assert_relative_eq!(summary[&x], 2.0);
        assert_eq!(summary[&y], 0.0);
    }

    #[test]
    fn test_trajectory_passes_samples_through() {
        let values = vec![
            SampleValue::Numeric(1.0),
            SampleValue::Numeric(f64::NAN),
            SampleValue::Numeric(3.0),
        ];
        let dataset = dataset_with_tensor_xx(values);

        let trajectory = trajectory(&dataset, xx()).unwrap();
        assert_eq!(trajectory.time, vec![0.0, 1.0, 2.0]);
        assert_eq!(trajectory.values[0], 1.0);
        assert!(trajectory.values[1].is_nan());
        assert_eq!(trajectory.values[2], 3.0);
    }

    #[test]
    fn test_trajectory_rejects_unparsed_sample() {
        let values = vec![SampleValue::Numeric(1.0), SampleValue::Unparsed("oops".into())];
        let dataset = dataset_with_tensor_xx(values);

        let err = trajectory(&dataset, xx()).unwrap_err();
        assert_eq!(
            err,
            PlotError::NonNumericSample {
                path: "run".into(),
                coefficient: xx(),
                index: 1,
                raw: "oops".into(),
            }
        );
    }
}
