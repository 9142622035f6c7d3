//! Deterministic style assignment
//!
//! Styles come from fixed, ordered palettes. A key (a coefficient for colors, a group
//! label for shapes) receives the palette entry at its first-appearance index modulo
//! the palette length, so the same ordered key list always yields the same styles.
//!
//! # Example
//!
//! ```rust
//! use diffplot::pipeline::{SeriesShape, StylePalette};
//!
//! let palette = StylePalette::default();
//! let period = palette.colors().len();
//!
//! assert_eq!(palette.color(0), palette.colors()[0]);
//! assert_eq!(palette.color(period + 1), palette.color(1));
//! assert!(matches!(palette.shape(2, false), SeriesShape::Marker(_)));
//! ```

use std::fmt;

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#rrggbb` form
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Line dash pattern
///
/// `dashes` alternates on and off lengths, in multiples of the line width; an empty
/// pattern is a solid line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub name: &'static str,
    pub dashes: &'static [f64],
}

impl LineStyle {
    pub fn is_solid(&self) -> bool {
        self.dashes.is_empty()
    }
}

/// Point marker shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    Point,
    Cross,
    ThinDiamond,
    Circle,
    Square,
    Plus,
    VerticalLine,
    TriangleDown,
    TriDown,
    TriangleUp,
    TriLeft,
    Star,
    TriUp,
    TriangleLeft,
    TriRight,
    TriangleRight,
}

impl Marker {
    /// Single-character code (`.`, `x`, `d`, ...), used in exports
    pub fn code(&self) -> &'static str {
        match self {
            Marker::Point => ".",
            Marker::Cross => "x",
            Marker::ThinDiamond => "d",
            Marker::Circle => "o",
            Marker::Square => "s",
            Marker::Plus => "+",
            Marker::VerticalLine => "|",
            Marker::TriangleDown => "v",
            Marker::TriDown => "1",
            Marker::TriangleUp => "^",
            Marker::TriLeft => "3",
            Marker::Star => "*",
            Marker::TriUp => "2",
            Marker::TriangleLeft => "<",
            Marker::TriRight => "4",
            Marker::TriangleRight => ">",
        }
    }
}

/// Built-in coefficient colors
pub const DEFAULT_COLORS: [Rgb; 9] = [
    Rgb(0x00, 0x00, 0x00),
    Rgb(0x3a, 0x66, 0xee),
    Rgb(0xeb, 0x9f, 0x2c),
    Rgb(0x46, 0xcd, 0x3b),
    Rgb(0x94, 0x8c, 0xa2),
    Rgb(0xd7, 0x5d, 0xdd),
    Rgb(0xa3, 0x1b, 0x44),
    Rgb(0xcf, 0xce, 0x1d),
    Rgb(0x0f, 0xa4, 0x84),
];

/// Built-in group linestyles (time axis)
pub const DEFAULT_LINE_STYLES: [LineStyle; 9] = [
    LineStyle { name: "solid", dashes: &[] },
    LineStyle { name: "dashed", dashes: &[3.7, 1.6] },
    LineStyle { name: "dotted", dashes: &[1.0, 1.65] },
    LineStyle { name: "dashdot", dashes: &[6.4, 1.6, 1.0, 1.6] },
    LineStyle { name: "dash-dash-dot", dashes: &[5.0, 2.0, 5.0, 2.0, 1.0, 2.0] },
    LineStyle { name: "loosely dotted", dashes: &[1.0, 5.0] },
    LineStyle { name: "dash-dot-dot", dashes: &[5.0, 2.0, 1.0, 2.0, 1.0, 2.0] },
    LineStyle { name: "long dash", dashes: &[10.0, 5.0] },
    LineStyle { name: "loosely dashed", dashes: &[5.0, 10.0] },
];

/// Built-in group markers (scalar axes)
pub const DEFAULT_MARKERS: [Marker; 16] = [
    Marker::Point,
    Marker::Cross,
    Marker::ThinDiamond,
    Marker::Circle,
    Marker::Square,
    Marker::Plus,
    Marker::VerticalLine,
    Marker::TriangleDown,
    Marker::TriDown,
    Marker::TriangleUp,
    Marker::TriLeft,
    Marker::Star,
    Marker::TriUp,
    Marker::TriangleLeft,
    Marker::TriRight,
    Marker::TriangleRight,
];

/// How a group is told apart: linestyle on the time axis, marker otherwise
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeriesShape {
    Line(LineStyle),
    Marker(Marker),
}

impl fmt::Display for SeriesShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesShape::Line(style) => f.write_str(style.name),
            SeriesShape::Marker(marker) => f.write_str(marker.code()),
        }
    }
}

// =================================================================================================
// Palettes
// =================================================================================================

/// Palettes used for style assignment
///
/// `Default` gives the built-in palettes. An empty override falls back to the
/// corresponding built-in palette.
#[derive(Debug, Clone, PartialEq)]
pub struct StylePalette {
    colors: Vec<Rgb>,
    line_styles: Vec<LineStyle>,
    markers: Vec<Marker>,
}

impl Default for StylePalette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.to_vec(),
            line_styles: DEFAULT_LINE_STYLES.to_vec(),
            markers: DEFAULT_MARKERS.to_vec(),
        }
    }
}

impl StylePalette {
    /// Builder pattern: replace the color palette
    pub fn with_colors(mut self, colors: Vec<Rgb>) -> Self {
        self.colors = colors;
        self
    }

    /// Builder pattern: replace the linestyle palette
    pub fn with_line_styles(mut self, line_styles: Vec<LineStyle>) -> Self {
        self.line_styles = line_styles;
        self
    }

    /// Builder pattern: replace the marker palette
    pub fn with_markers(mut self, markers: Vec<Marker>) -> Self {
        self.markers = markers;
        self
    }

    pub fn colors(&self) -> &[Rgb] {
        if self.colors.is_empty() {
            &DEFAULT_COLORS
        } else {
            &self.colors
        }
    }

    pub fn line_styles(&self) -> &[LineStyle] {
        if self.line_styles.is_empty() {
            &DEFAULT_LINE_STYLES
        } else {
            &self.line_styles
        }
    }

    pub fn markers(&self) -> &[Marker] {
        if self.markers.is_empty() {
            &DEFAULT_MARKERS
        } else {
            &self.markers
        }
    }

    /// Color of the key at first-appearance `index`
    ///
    /// Cycles with the palette length; the palette is never empty.
    pub fn color(&self, index: usize) -> Rgb {
        cycle(self.colors(), index)
    }

    /// Shape of the group at first-appearance `index`
    ///
    /// Linestyles for a time axis (`time_axis`), markers for a scalar axis.
    pub fn shape(&self, index: usize, time_axis: bool) -> SeriesShape {
        if time_axis {
            SeriesShape::Line(cycle(self.line_styles(), index))
        } else {
            SeriesShape::Marker(cycle(self.markers(), index))
        }
    }
}

fn cycle<T: Copy>(palette: &[T], index: usize) -> T {
    palette[index % palette.len()]
}

// =================================================================================================
// Tests
// =================================================================================================
