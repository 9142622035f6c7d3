//! In-memory dataset builders for integration tests

use diffplot::dataset::{
    CoefficientId, Component, Dataset, ParticleTable, RunParameters, SampleValue, TimeSeriesTable,
};
use diffplot::pipeline::{PlotSpec, Series};

/// Evenly spaced time index `0, dt, 2 dt, ...`
pub fn time_index(points: usize, dt: f64) -> Vec<f64> {
    (0..points).map(|i| i as f64 * dt).collect()
}

/// Run whose every coefficient is `value` at every time point
pub fn constant_run(name: &str, params: RunParameters, points: usize, value: f64) -> Dataset {
    let time = time_index(points, 1.0e-12);
    let displacement = [Component::X, Component::Y, Component::Z]
        .into_iter()
        .fold(TimeSeriesTable::new(time.clone()), |table, c| {
            table.with_column(c, vec![value; points])
        });
    let tensor = [
        Component::Xx,
        Component::Xy,
        Component::Xz,
        Component::Yy,
        Component::Yz,
        Component::Zz,
    ]
    .into_iter()
    .fold(TimeSeriesTable::new(time), |table, c| table.with_column(c, vec![value; points]));
    let lengths = [Component::X, Component::Y, Component::Z]
        .into_iter()
        .fold(ParticleTable::new(), |table, c| table.with_column(c, vec![-value, value]));

    Dataset::new(name, params, displacement, tensor, lengths).unwrap()
}

/// Run with only a diffusion-tensor `xx` column
pub fn run_with_tensor_xx(name: &str, params: RunParameters, xx: Vec<SampleValue>) -> Dataset {
    let time = time_index(xx.len(), 1.0e-12);
    Dataset::new(
        name,
        params,
        TimeSeriesTable::new(time.clone()),
        TimeSeriesTable::new(time).with_column(Component::Xx, xx),
        ParticleTable::new(),
    )
    .unwrap()
}

/// Series of a spec drawn from `source` for `coefficient`
pub fn series_for<'a>(spec: &'a PlotSpec, source: &str, coefficient: CoefficientId) -> &'a Series {
    spec.series
        .iter()
        .find(|s| s.source.as_os_str() == source && s.coefficient == coefficient)
        .unwrap_or_else(|| panic!("no {coefficient} series for {source}"))
}
