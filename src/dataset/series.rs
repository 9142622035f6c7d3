//! Sample tables of one run
//!
//! Two table shapes come out of a simulation:
//!
//! - [`TimeSeriesTable`]: a shared time column plus one value column per coefficient
//!   (displacement squared, diffusion tensor)
//! - [`ParticleTable`]: one unordered value per particle and coefficient (diffusion length)
//!
//! Cells are stored as [`SampleValue`] so that a NaN written by the simulation and a cell
//! that could not be read as a number stay distinguishable.

use std::collections::BTreeMap;

use super::selectors::Component;

/// One cell of a sample table
#[derive(Debug, Clone, PartialEq)]
pub enum SampleValue {
    /// Parsed number (may be NaN)
    Numeric(f64),

    /// Raw text that failed numeric parsing
    Unparsed(String),
}

impl SampleValue {
    /// Parse a raw table cell
    ///
    /// Surrounding whitespace is ignored; `nan`, `inf` and signed scientific notation
    /// are accepted as numbers.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<f64>() {
            Ok(v) => SampleValue::Numeric(v),
            Err(_) => SampleValue::Unparsed(trimmed.to_string()),
        }
    }

    /// Numeric value, `None` if the cell failed to parse
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SampleValue::Numeric(v) => Some(*v),
            SampleValue::Unparsed(_) => None,
        }
    }

    /// Value usable in an average: parsed and not NaN
    pub fn present(&self) -> Option<f64> {
        self.as_f64().filter(|v| !v.is_nan())
    }

    /// Missing sample: NaN or unparsed
    pub fn is_missing(&self) -> bool {
        self.present().is_none()
    }
}

impl From<f64> for SampleValue {
    fn from(value: f64) -> Self {
        SampleValue::Numeric(value)
    }
}

// =================================================================================================
// Time-indexed table
// =================================================================================================

/// Time-ordered samples for a set of coefficients
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeriesTable {
    time: Vec<f64>,
    columns: BTreeMap<Component, Vec<SampleValue>>,
}

impl TimeSeriesTable {
    /// Create a table from its time column
    pub fn new(time: Vec<f64>) -> Self {
        Self {
            time,
            columns: BTreeMap::new(),
        }
    }

    /// Builder pattern: add a value column
    ///
    /// # Panics
    ///
    /// Panics if the column length differs from the time column length.
    pub fn with_column<V: Into<SampleValue>>(mut self, component: Component, values: Vec<V>) -> Self {
        assert_eq!(
            values.len(),
            self.time.len(),
            "Column {} must have one value per time point",
            component.token()
        );
        self.columns
            .insert(component, values.into_iter().map(Into::into).collect());
        self
    }

    /// Time column
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Samples of a coefficient
    pub fn column(&self, component: Component) -> Option<&[SampleValue]> {
        self.columns.get(&component).map(Vec::as_slice)
    }

    /// Number of time points
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Whether the table holds no time point
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

// =================================================================================================
// Per-particle table
// =================================================================================================

/// Unordered per-particle samples for a set of coefficients
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleTable {
    columns: BTreeMap<Component, Vec<SampleValue>>,
}

impl ParticleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: add a value column
    pub fn with_column<V: Into<SampleValue>>(mut self, component: Component, values: Vec<V>) -> Self {
        self.columns
            .insert(component, values.into_iter().map(Into::into).collect());
        self
    }

    /// Samples of a coefficient
    pub fn column(&self, component: Component) -> Option<&[SampleValue]> {
        self.columns.get(&component).map(Vec::as_slice)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_value_parse() {
        assert_eq!(SampleValue::parse(" +1.5e-3 "), SampleValue::Numeric(1.5e-3));
        assert!(SampleValue::parse("nan").as_f64().unwrap().is_nan());
        assert_eq!(SampleValue::parse("--"), SampleValue::Unparsed("--".into()));
    }

    #[test]
    fn test_sample_value_missing() {
        assert!(SampleValue::Numeric(f64::NAN).is_missing());
        assert!(SampleValue::Unparsed("n/a".into()).is_missing());
        assert!(!SampleValue::Numeric(0.0).is_missing());
        assert_eq!(SampleValue::Numeric(-2.0).present(), Some(-2.0));
    }

    #[test]
    fn test_time_series_table_columns() {
        let table = TimeSeriesTable::new(vec![0.0, 1.0])
            .with_column(Component::X, vec![1.0, 2.0]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.column(Component::X).unwrap()[1], SampleValue::Numeric(2.0));
        assert!(table.column(Component::Y).is_none());
    }

    #[test]
    #[should_panic(expected = "Column x must have one value per time point")]
    fn test_time_series_table_rejects_short_column() {
        let _ = TimeSeriesTable::new(vec![0.0, 1.0, 2.0])
            .with_column(Component::X, vec![1.0]);
    }
}
