//! Group labels for datasets
//!
//! Datasets that agree on every varying parameter share a group, and a group is drawn
//! with one marker (scalar axes) or one linestyle (time axis).

use std::collections::BTreeSet;
use std::fmt;

use crate::dataset::{Dataset, Parameter, RunParameters};

/// Label identifying datasets with identical values for all varying parameters
///
/// The empty label is the single implicit group used when nothing varies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupLabel(String);

impl GroupLabel {
    /// Build the label of one run
    ///
    /// Concatenates `"<name>: <value> "` for each varying parameter, in canonical
    /// parameter order.
    pub fn for_params(params: &RunParameters, varying: &BTreeSet<Parameter>) -> Self {
        let label = varying
            .iter()
            .map(|p| format!("{}: {} ", p.key(), params.value(*p)))
            .collect::<String>();
        GroupLabel(label)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of classifying a dataset subset
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// One label per dataset, in dataset order
    pub labels: Vec<GroupLabel>,

    /// Distinct labels in first-appearance order
    pub groups: Vec<GroupLabel>,

    /// Index into `groups` of each dataset, in dataset order
    pub group_of: Vec<usize>,
}

/// Label every dataset and collect the distinct groups
pub fn classify(datasets: &[&Dataset], varying: &BTreeSet<Parameter>) -> Classification {
    let labels: Vec<GroupLabel> = datasets
        .iter()
        .map(|d| GroupLabel::for_params(d.params(), varying))
        .collect();

    let mut groups: Vec<GroupLabel> = Vec::new();
    let mut group_of = Vec::with_capacity(labels.len());
    for label in &labels {
        let index = match groups.iter().position(|g| g == label) {
            Some(index) => index,
            None => {
                groups.push(label.clone());
                groups.len() - 1
            }
        };
        group_of.push(index);
    }

    Classification {
        labels,
        groups,
        group_of,
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{ParticleTable, TimeSeriesTable};

    fn run(temperature: f64, bundle: bool) -> Dataset {
        let params = RunParameters {
            temperature,
            bundle,
            ..RunParameters::default()
        };
        Dataset::new(
            format!("run-{temperature}-{bundle}"),
            params,
            TimeSeriesTable::new(vec![0.0]),
            TimeSeriesTable::new(vec![0.0]),
            ParticleTable::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_classify_indexes_groups_by_first_appearance() {
        let (a, b, c) = (run(300.0, true), run(350.0, false), run(300.0, false));
        let varying = BTreeSet::from([Parameter::Bundle]);

        let classification = classify(&[&a, &b, &c], &varying);

        assert_eq!(classification.groups.len(), 2);
        assert_eq!(classification.group_of, vec![0, 1, 1]);
        for (label, index) in classification.labels.iter().zip(&classification.group_of) {
            assert_eq!(&classification.groups[*index], label);
        }
    }

    #[test]
    fn test_label_is_empty_without_varying_parameters() {
        let label = GroupLabel::for_params(&RunParameters::default(), &BTreeSet::new());
        assert!(label.is_empty());
        assert_eq!(label.to_string(), "");
    }

    #[test]
    fn test_label_uses_canonical_order() {
        let params = RunParameters {
            temperature: 300.0,
            chirality: "(6,5)".into(),
            parallel: true,
            ..RunParameters::default()
        };
        let varying = BTreeSet::from([
            Parameter::Temperature,
            Parameter::Parallel,
            Parameter::Chirality,
        ]);

        assert_eq!(
            GroupLabel::for_params(&params, &varying).as_str(),
            "chirality: (6,5) parallel: true temperature: 300 "
        );
    }

    #[test]
    fn test_flag_label_reflects_its_own_parameter() {
        let params = RunParameters {
            bundle: true,
            parallel: false,
            ..RunParameters::default()
        };
        let varying = BTreeSet::from([Parameter::Parallel]);

        assert_eq!(
            GroupLabel::for_params(&params, &varying).as_str(),
            "parallel: false "
        );
    }
}
