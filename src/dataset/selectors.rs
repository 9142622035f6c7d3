//! Axis, quantity and coefficient selectors
//!
//! Closed enums for everything a user can pick when building a plot:
//!
//! - [`AxisSelector`]: what goes on the x axis
//! - [`Quantity`]: what goes on a y axis
//! - [`Component`] / [`CoefficientId`]: which coefficients of a quantity are drawn
//! - [`QuantitySelection`]: the y-axis request (1 or 2 quantities with their coefficients)
//!
//! # Replay tokens
//!
//! A front-end records selections as literal tokens: an axis index (`0..=4`), a quantity
//! index (`0..=2`) and case-insensitive coefficient short forms (`x`, `xy`, ...).
//! [`AxisSelector::from_index`], [`Quantity::from_index`] and
//! [`QuantitySelection::with_index_tokens`] turn those tokens back into selections.
//!
//! ```rust
//! use diffplot::dataset::{AxisSelector, Quantity, QuantitySelection};
//!
//! let axis = AxisSelector::from_index(3)?;
//! let selection = QuantitySelection::new()
//!     .with_index_tokens(0, &["X", "z"])?
//!     .with_index_tokens(1, &["xy"])?;
//!
//! assert_eq!(axis, AxisSelector::Temperature);
//! assert_eq!(selection.quantities().collect::<Vec<_>>(),
//!            vec![Quantity::DisplacementSquared, Quantity::DiffusionTensor]);
//! # Ok::<(), diffplot::PlotError>(())
//! ```

use std::fmt;

use super::params::Parameter;
use crate::error::PlotError;

// =================================================================================================
// X axis
// =================================================================================================

/// Quantity plotted on the x axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisSelector {
    /// Simulation time, series drawn as lines
    Time,

    /// CNT intertube spacing
    TubeSpacing,

    /// Density of quenching sites
    QuenchingDensity,

    /// Temperature
    Temperature,

    /// Relative permittivity
    RelativePermittivity,
}

impl AxisSelector {
    /// All selectors, in replay-index order
    pub const ALL: [AxisSelector; 5] = [
        AxisSelector::Time,
        AxisSelector::TubeSpacing,
        AxisSelector::QuenchingDensity,
        AxisSelector::Temperature,
        AxisSelector::RelativePermittivity,
    ];

    /// Selector for a replay index
    pub fn from_index(index: usize) -> Result<Self, PlotError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(PlotError::InvalidSelectorIndex {
                kind: "x-axis",
                index,
                max: Self::ALL.len() - 1,
            })
    }

    /// Replay index of this selector
    pub fn index(&self) -> usize {
        match self {
            AxisSelector::Time => 0,
            AxisSelector::TubeSpacing => 1,
            AxisSelector::QuenchingDensity => 2,
            AxisSelector::Temperature => 3,
            AxisSelector::RelativePermittivity => 4,
        }
    }

    /// Registry parameter encoded by this axis (`None` for time)
    pub fn parameter(&self) -> Option<Parameter> {
        match self {
            AxisSelector::Time => None,
            AxisSelector::TubeSpacing => Some(Parameter::TubeSpacing),
            AxisSelector::QuenchingDensity => Some(Parameter::QuenchingDensity),
            AxisSelector::Temperature => Some(Parameter::Temperature),
            AxisSelector::RelativePermittivity => Some(Parameter::RelativePermittivity),
        }
    }

    /// Whether series are time trajectories rather than scalar summaries
    pub fn is_time(&self) -> bool {
        matches!(self, AxisSelector::Time)
    }

    /// Axis description
    pub fn label(&self) -> &'static str {
        match self {
            AxisSelector::Time => "Time [s]",
            AxisSelector::TubeSpacing => "CNT tube spacing [nm]",
            AxisSelector::QuenchingDensity => "Quenching site density [proportion]",
            AxisSelector::Temperature => "Temperature [K]",
            AxisSelector::RelativePermittivity => "Relative permittivity",
        }
    }
}

impl fmt::Display for AxisSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AxisSelector::Time => "time",
            AxisSelector::TubeSpacing => "tube spacing",
            AxisSelector::QuenchingDensity => "quenching site density",
            AxisSelector::Temperature => "temperature",
            AxisSelector::RelativePermittivity => "relative permittivity",
        };
        f.write_str(name)
    }
}

// =================================================================================================
// Y quantities and coefficients
// =================================================================================================

/// Quantity plotted on a y axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quantity {
    /// Average displacement squared, time-indexed, coefficients x/y/z
    DisplacementSquared,

    /// Diffusion tensor, time-indexed, coefficients xx..zz
    DiffusionTensor,

    /// Final per-particle diffusion length, coefficients x/y/z (no time ordering)
    DiffusionLength,
}

impl Quantity {
    /// All quantities, in replay-index order
    pub const ALL: [Quantity; 3] = [
        Quantity::DisplacementSquared,
        Quantity::DiffusionTensor,
        Quantity::DiffusionLength,
    ];

    /// Quantity for a replay index
    pub fn from_index(index: usize) -> Result<Self, PlotError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(PlotError::InvalidSelectorIndex {
                kind: "quantity",
                index,
                max: Self::ALL.len() - 1,
            })
    }

    /// Valid coefficients, in canonical order
    pub fn components(&self) -> &'static [Component] {
        match self {
            Quantity::DisplacementSquared | Quantity::DiffusionLength => {
                &[Component::X, Component::Y, Component::Z]
            }
            Quantity::DiffusionTensor => &[
                Component::Xx,
                Component::Xy,
                Component::Xz,
                Component::Yy,
                Component::Yz,
                Component::Zz,
            ],
        }
    }

    /// Whether samples are ordered in time
    pub fn is_time_indexed(&self) -> bool {
        !matches!(self, Quantity::DiffusionLength)
    }

    /// Y axis description
    pub fn axis_label(&self) -> &'static str {
        match self {
            Quantity::DisplacementSquared => "Average Displacement Squared [m^2]",
            Quantity::DiffusionTensor => "Diffusion Tensor Element [m^2 / s]",
            Quantity::DiffusionLength => "Diffusion Length [m]",
        }
    }

    /// Normalize a case-insensitive short-form token into a coefficient of this quantity
    ///
    /// # Errors
    ///
    /// [`PlotError::InvalidCoefficientToken`] if the token names no coefficient of
    /// this quantity (e.g. `"xx"` for displacement, `"w"` for anything).
    pub fn parse_component(&self, token: &str) -> Result<Component, PlotError> {
        let normalized = token.trim().to_ascii_lowercase();

        self.components()
            .iter()
            .copied()
            .find(|c| c.token() == normalized)
            .ok_or_else(|| self.invalid_token(token))
    }

    fn invalid_token(&self, token: &str) -> PlotError {
        PlotError::InvalidCoefficientToken {
            quantity: *self,
            token: token.to_string(),
            expected: self
                .components()
                .iter()
                .map(|c| c.token())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quantity::DisplacementSquared => "average displacement squared",
            Quantity::DiffusionTensor => "diffusion tensor",
            Quantity::DiffusionLength => "diffusion length",
        };
        f.write_str(name)
    }
}

/// Scalar component of a vector or tensor quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Component {
    X,
    Y,
    Z,
    Xx,
    Xy,
    Xz,
    Yy,
    Yz,
    Zz,
}

impl Component {
    /// Lowercase short form, as typed by a user
    pub fn token(&self) -> &'static str {
        match self {
            Component::X => "x",
            Component::Y => "y",
            Component::Z => "z",
            Component::Xx => "xx",
            Component::Xy => "xy",
            Component::Xz => "xz",
            Component::Yy => "yy",
            Component::Yz => "yz",
            Component::Zz => "zz",
        }
    }
}

/// A coefficient of a specific quantity
///
/// This is the key colors are assigned to: displacement `x` and diffusion-length `x`
/// are different coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CoefficientId {
    pub quantity: Quantity,
    pub component: Component,
}

impl CoefficientId {
    pub fn new(quantity: Quantity, component: Component) -> Self {
        Self { quantity, component }
    }

    /// Canonical name, also the column header in the source tables for the tensor
    pub fn name(&self) -> String {
        match self.quantity {
            Quantity::DisplacementSquared => format!("avg disp sq {}", self.component.token()),
            Quantity::DiffusionTensor => format!("D{}", self.component.token()),
            Quantity::DiffusionLength => format!("diffusion len {}", self.component.token()),
        }
    }
}

impl fmt::Display for CoefficientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

// =================================================================================================
// Quantity selection
// =================================================================================================

/// One requested quantity with its chosen coefficients
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityRequest {
    pub quantity: Quantity,

    /// Chosen coefficients in canonical order, without repeats
    pub components: Vec<Component>,
}

impl QuantityRequest {
    /// Requested coefficients as identifiers
    pub fn coefficients(&self) -> impl Iterator<Item = CoefficientId> + '_ {
        self.components
            .iter()
            .map(move |c| CoefficientId::new(self.quantity, *c))
    }
}

/// Y-axis request: the quantities to plot, in slot order, with their coefficients
///
/// The builder only normalizes tokens; the count and emptiness constraints are
/// checked when the request is assembled, so an invalid selection can still be
/// described and rejected with a precise error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuantitySelection {
    requests: Vec<QuantityRequest>,
}

impl QuantitySelection {
    /// Empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add coefficients of a quantity
    ///
    /// Adding a quantity that is already present merges the coefficient sets.
    ///
    /// # Errors
    ///
    /// [`PlotError::InvalidCoefficientToken`] if a component does not belong to the quantity.
    pub fn with(mut self, quantity: Quantity, components: &[Component]) -> Result<Self, PlotError> {
        if let Some(invalid) = components
            .iter()
            .find(|c| !quantity.components().contains(c))
        {
            return Err(quantity.invalid_token(invalid.token()));
        }

        self.merge(quantity, components);
        Ok(self)
    }

    /// Add coefficients of a quantity from case-insensitive short-form tokens
    pub fn with_tokens(self, quantity: Quantity, tokens: &[&str]) -> Result<Self, PlotError> {
        let components = tokens
            .iter()
            .map(|t| quantity.parse_component(t))
            .collect::<Result<Vec<_>, _>>()?;
        self.with(quantity, &components)
    }

    /// Add a quantity by replay index with its coefficient tokens
    pub fn with_index_tokens(self, quantity_index: usize, tokens: &[&str]) -> Result<Self, PlotError> {
        let quantity = Quantity::from_index(quantity_index)?;
        self.with_tokens(quantity, tokens)
    }

    /// Add a quantity with all of its coefficients
    pub fn with_all(mut self, quantity: Quantity) -> Self {
        self.merge(quantity, quantity.components());
        self
    }

    fn merge(&mut self, quantity: Quantity, components: &[Component]) {
        let position = match self.requests.iter().position(|r| r.quantity == quantity) {
            Some(position) => position,
            None => {
                self.requests.push(QuantityRequest {
                    quantity,
                    components: Vec::new(),
                });
                self.requests.len() - 1
            }
        };

        let request = &mut self.requests[position];
        for component in components {
            if !request.components.contains(component) {
                request.components.push(*component);
            }
        }
        request.components.sort();
    }

    /// Requested quantities in slot order
    pub fn requests(&self) -> &[QuantityRequest] {
        &self.requests
    }

    /// Requested quantities in slot order
    pub fn quantities(&self) -> impl Iterator<Item = Quantity> + '_ {
        self.requests.iter().map(|r| r.quantity)
    }

    /// Whether a quantity is requested
    pub fn contains(&self, quantity: Quantity) -> bool {
        self.requests.iter().any(|r| r.quantity == quantity)
    }

    /// Number of distinct quantities
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Whether nothing is requested
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_from_index_roundtrip() {
        for (i, axis) in AxisSelector::ALL.iter().enumerate() {
            assert_eq!(AxisSelector::from_index(i).unwrap(), *axis);
            assert_eq!(axis.index(), i);
        }
    }

    #[test]
    fn test_axis_from_index_out_of_range() {
        let err = AxisSelector::from_index(5).unwrap_err();
        assert_eq!(
            err,
            PlotError::InvalidSelectorIndex { kind: "x-axis", index: 5, max: 4 }
        );
    }

    #[test]
    fn test_quantity_from_index() {
        assert_eq!(Quantity::from_index(0).unwrap(), Quantity::DisplacementSquared);
        assert_eq!(Quantity::from_index(1).unwrap(), Quantity::DiffusionTensor);
        assert_eq!(Quantity::from_index(2).unwrap(), Quantity::DiffusionLength);
        assert!(matches!(
            Quantity::from_index(3),
            Err(PlotError::InvalidSelectorIndex { kind: "quantity", index: 3, max: 2 })
        ));
    }

    #[test]
    fn test_parse_component_is_case_insensitive() {
        let q = Quantity::DiffusionTensor;
        assert_eq!(q.parse_component("XY").unwrap(), Component::Xy);
        assert_eq!(q.parse_component(" zz ").unwrap(), Component::Zz);
        assert_eq!(
            Quantity::DisplacementSquared.parse_component("Z").unwrap(),
            Component::Z
        );
    }

    #[test]
    fn test_parse_component_rejects_foreign_tokens() {
        let err = Quantity::DisplacementSquared.parse_component("xx").unwrap_err();
        match err {
            PlotError::InvalidCoefficientToken { quantity, token, expected } => {
                assert_eq!(quantity, Quantity::DisplacementSquared);
                assert_eq!(token, "xx");
                assert_eq!(expected, "x y z");
            }
            other => panic!("unexpected error {other:?}"),
        }

        assert!(Quantity::DiffusionTensor.parse_component("yx").is_err());
        assert!(Quantity::DiffusionTensor.parse_component("x").is_err());
        assert!(Quantity::DiffusionLength.parse_component("").is_err());
    }

    #[test]
    fn test_coefficient_names() {
        let disp = CoefficientId::new(Quantity::DisplacementSquared, Component::X);
        let tensor = CoefficientId::new(Quantity::DiffusionTensor, Component::Xy);
        let length = CoefficientId::new(Quantity::DiffusionLength, Component::X);

        assert_eq!(disp.name(), "avg disp sq x");
        assert_eq!(tensor.name(), "Dxy");
        assert_eq!(length.to_string(), "diffusion len x");
        assert_ne!(disp, length);
    }

    #[test]
    fn test_selection_merges_repeated_quantity() {
        let selection = QuantitySelection::new()
            .with_tokens(Quantity::DiffusionTensor, &["zz", "xx"])
            .unwrap()
            .with_tokens(Quantity::DiffusionTensor, &["XX", "xy"])
            .unwrap();

        assert_eq!(selection.len(), 1);
        assert_eq!(
            selection.requests()[0].components,
            vec![Component::Xx, Component::Xy, Component::Zz]
        );
    }

    #[test]
    fn test_selection_keeps_slot_order() {
        let selection = QuantitySelection::new()
            .with_tokens(Quantity::DiffusionTensor, &["xx"])
            .unwrap()
            .with_tokens(Quantity::DisplacementSquared, &["x"])
            .unwrap();

        let quantities: Vec<_> = selection.quantities().collect();
        assert_eq!(
            quantities,
            vec![Quantity::DiffusionTensor, Quantity::DisplacementSquared]
        );
    }

    #[test]
    fn test_selection_with_rejects_foreign_component() {
        let err = QuantitySelection::new()
            .with(Quantity::DisplacementSquared, &[Component::Yz])
            .unwrap_err();
        assert!(matches!(err, PlotError::InvalidCoefficientToken { .. }));
    }

    #[test]
    fn test_selection_with_all() {
        let selection = QuantitySelection::new().with_all(Quantity::DiffusionLength);
        let coefficients: Vec<String> = selection.requests()[0]
            .coefficients()
            .map(|c| c.name())
            .collect();
        assert_eq!(
            coefficients,
            vec!["diffusion len x", "diffusion len y", "diffusion len z"]
        );
    }

    #[test]
    fn test_selection_allows_empty_coefficients_until_assembly() {
        let selection = QuantitySelection::new()
            .with_tokens(Quantity::DiffusionTensor, &[])
            .unwrap();
        assert_eq!(selection.len(), 1);
        assert!(selection.requests()[0].components.is_empty());
    }
}
