//! Run parameters and the parameter registry
//!
//! Every simulation run is described by the same closed set of physical parameters.
//! They live in a plain record ([`RunParameters`]) with one field per parameter, and
//! the [`Parameter`] enum names them without strings so that grouping and axis
//! lookups stay type-safe.

use std::fmt;

use super::selectors::AxisSelector;

// =================================================================================================
// Parameter registry (type-safe identifiers)
// =================================================================================================

/// Registry of physical parameters recorded for each run
///
/// Variants are declared in alphabetical order of their registry key, so the derived
/// `Ord` is the canonical order used when building group labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Parameter {
    /// Whether tubes were generated in bundles
    Bundle,

    /// CNT chirality (categorical)
    Chirality,

    /// Whether tubes were generated parallel to each other
    Parallel,

    /// Density of quenching sites (proportion of scattering sites)
    QuenchingDensity,

    /// Relative permittivity of the medium
    RelativePermittivity,

    /// Temperature (K)
    Temperature,

    /// Intertube spacing (nm)
    TubeSpacing,
}

impl Parameter {
    /// All registry parameters, in canonical order
    pub const ALL: [Parameter; 7] = [
        Parameter::Bundle,
        Parameter::Chirality,
        Parameter::Parallel,
        Parameter::QuenchingDensity,
        Parameter::RelativePermittivity,
        Parameter::Temperature,
        Parameter::TubeSpacing,
    ];

    /// Registry key, also used as the name in group labels
    pub fn key(&self) -> &'static str {
        match self {
            Parameter::Bundle => "bundle",
            Parameter::Chirality => "chirality",
            Parameter::Parallel => "parallel",
            Parameter::QuenchingDensity => "quenching_density",
            Parameter::RelativePermittivity => "relative_permittivity",
            Parameter::Temperature => "temperature",
            Parameter::TubeSpacing => "tube_spacing",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// =================================================================================================
// Parameter values
// =================================================================================================

/// Value of one registry parameter for one run
///
/// Numbers compare by total order (`f64::total_cmp`), so two runs with the same
/// bit pattern always land in the same group, NaN included.
#[derive(Debug, Clone)]
pub enum ParamValue {
    /// Continuous physical value
    Number(f64),

    /// Categorical value (chirality)
    Category(String),

    /// Boolean switch (bundle, parallel)
    Flag(bool),
}

impl PartialEq for ParamValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ParamValue::Number(a), ParamValue::Number(b)) => a.total_cmp(b).is_eq(),
            (ParamValue::Category(a), ParamValue::Category(b)) => a == b,
            (ParamValue::Flag(a), ParamValue::Flag(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for ParamValue {}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(v) => write!(f, "{}", v),
            ParamValue::Category(c) => f.write_str(c),
            ParamValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

// =================================================================================================
// Run parameters (closed record)
// =================================================================================================

/// Physical parameters of one simulation run
///
/// Combines the run-level parameters (`input.json`) and the mesh-level parameters
/// (`mesh_input.json`) into a single record.
///
/// # Example
///
/// ```rust
/// use diffplot::dataset::{AxisSelector, Parameter, ParamValue, RunParameters};
///
/// let params = RunParameters {
///     temperature: 300.0,
///     ..RunParameters::default()
/// };
///
/// assert_eq!(params.value(Parameter::Temperature), ParamValue::Number(300.0));
/// assert_eq!(params.axis_value(AxisSelector::Temperature), Some(300.0));
/// assert_eq!(params.axis_value(AxisSelector::Time), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RunParameters {
    /// Temperature (K)
    pub temperature: f64,

    /// Relative permittivity εr
    pub relative_permittivity: f64,

    /// Density of quenching sites (proportion)
    pub quenching_density: f64,

    /// Intertube spacing (nm)
    pub tube_spacing: f64,

    /// Chirality, rendered as text (e.g. "(6,5)")
    pub chirality: String,

    /// Tubes generated in bundles
    pub bundle: bool,

    /// Tubes generated parallel
    pub parallel: bool,
}

impl Default for RunParameters {
    fn default() -> Self {
        Self {
            temperature: 300.0,
            relative_permittivity: 1.0,
            quenching_density: 0.0,
            tube_spacing: 0.0,
            chirality: String::new(),
            bundle: false,
            parallel: false,
        }
    }
}

impl RunParameters {
    /// Value of a registry parameter
    pub fn value(&self, parameter: Parameter) -> ParamValue {
        match parameter {
            Parameter::Bundle => ParamValue::Flag(self.bundle),
            Parameter::Chirality => ParamValue::Category(self.chirality.clone()),
            Parameter::Parallel => ParamValue::Flag(self.parallel),
            Parameter::QuenchingDensity => ParamValue::Number(self.quenching_density),
            Parameter::RelativePermittivity => ParamValue::Number(self.relative_permittivity),
            Parameter::Temperature => ParamValue::Number(self.temperature),
            Parameter::TubeSpacing => ParamValue::Number(self.tube_spacing),
        }
    }

    /// Numeric x value for a non-time axis
    ///
    /// Returns `None` for [`AxisSelector::Time`], whose x values come from the series.
    pub fn axis_value(&self, axis: AxisSelector) -> Option<f64> {
        match axis {
            AxisSelector::Time => None,
            AxisSelector::TubeSpacing => Some(self.tube_spacing),
            AxisSelector::QuenchingDensity => Some(self.quenching_density),
            AxisSelector::Temperature => Some(self.temperature),
            AxisSelector::RelativePermittivity => Some(self.relative_permittivity),
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
