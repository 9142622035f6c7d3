//! Detection of parameters that vary across a dataset subset

use std::collections::BTreeSet;

use crate::dataset::{AxisSelector, Dataset, ParamValue, Parameter};

/// Distinct values of a parameter, in first-seen order
pub fn distinct_values(datasets: &[&Dataset], parameter: Parameter) -> Vec<ParamValue> {
    let mut seen: Vec<ParamValue> = Vec::new();
    for dataset in datasets {
        let value = dataset.params().value(parameter);
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

/// Registry parameters taking more than one value across `datasets`
///
/// The parameter encoded by `axis` is never reported: it is plotted, not grouped on.
pub fn varying_parameters(datasets: &[&Dataset], axis: AxisSelector) -> BTreeSet<Parameter> {
    let excluded = axis.parameter();

    Parameter::ALL
        .iter()
        .copied()
        .filter(|p| Some(*p) != excluded)
        .filter(|p| distinct_values(datasets, *p).len() > 1)
        .collect()
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{ParticleTable, RunParameters, TimeSeriesTable};

    fn dataset(name: &str, params: RunParameters) -> Dataset {
        Dataset::new(
            name,
            params,
            TimeSeriesTable::default(),
            TimeSeriesTable::default(),
            ParticleTable::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_constant_parameters_do_not_vary() {
        let a = dataset("a", RunParameters::default());
        let b = dataset("b", RunParameters::default());

        assert!(varying_parameters(&[&a, &b], AxisSelector::Time).is_empty());
    }

    #[test]
    fn test_axis_parameter_is_excluded() {
        let a = dataset("a", RunParameters { temperature: 300.0, ..Default::default() });
        let b = dataset("b", RunParameters { temperature: 350.0, ..Default::default() });

        assert!(varying_parameters(&[&a, &b], AxisSelector::Temperature).is_empty());
        assert_eq!(
            varying_parameters(&[&a, &b], AxisSelector::Time),
            BTreeSet::from([Parameter::Temperature])
        );
    }

    #[test]
    fn test_categorical_and_flag_parameters_vary() {
        let a = dataset(
            "a",
            RunParameters { chirality: "(6,5)".into(), bundle: true, ..Default::default() },
        );
        let b = dataset(
            "b",
            RunParameters { chirality: "(7,5)".into(), bundle: true, ..Default::default() },
        );

        assert_eq!(
            varying_parameters(&[&a, &b], AxisSelector::TubeSpacing),
            BTreeSet::from([Parameter::Chirality])
        );
    }

    #[test]
    fn test_distinct_values_first_seen_order() {
        let runs: Vec<Dataset> = [350.0, 300.0, 350.0, 400.0]
            .iter()
            .enumerate()
            .map(|(i, t)| {
                dataset(&i.to_string(), RunParameters { temperature: *t, ..Default::default() })
            })
            .collect();
        let refs: Vec<&Dataset> = runs.iter().collect();

        assert_eq!(
            distinct_values(&refs, Parameter::Temperature),
            vec![
                ParamValue::Number(350.0),
                ParamValue::Number(300.0),
                ParamValue::Number(400.0)
            ]
        );
    }
}
