//! Plot configuration for the renderer
//!
//! Everything about the picture that is not data: size, colors, stroke widths,
//! grid and axis scales. Series colors and shapes are part of the
//! [`PlotSpec`](crate::pipeline::PlotSpec), not of this configuration.

use plotters::prelude::*;

/// Configuration for rendering a plot
///
/// # Fields
///
/// - `width`, `height`: Dimensions in pixels
/// - `title`: Caption override (the `PlotSpec` title is used when `None`)
/// - `background`: Background color
/// - `line_width`: Line thickness in pixels
/// - `marker_size`: Marker radius in pixels
/// - `show_grid`: Whether to show grid lines
/// - `log_x`, `log_y`, `log_y2`: Logarithmic x, left-y and right-y axes
///
/// # Example
///
/// ```rust
/// use diffplot::output::visualization::PlotConfig;
///
/// let config = PlotConfig::figure(8.0, 6.0)
///     .with_log_scales(false, true, false);
///
/// assert_eq!((config.width, config.height), (800, 600));
/// assert!(config.log_y);
/// ```
#[derive(Clone, Debug)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Caption override (default: None, use the `PlotSpec` title)
    pub title: Option<String>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Marker radius in pixels (default: 6)
    pub marker_size: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,

    /// Logarithmic x axis (default: false)
    pub log_x: bool,

    /// Logarithmic primary y axis (default: false)
    pub log_y: bool,

    /// Logarithmic secondary y axis (default: false)
    pub log_y2: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: None,
            background: WHITE,
            line_width: 2,
            marker_size: 6,
            show_grid: true,
            log_x: false,
            log_y: false,
            log_y2: false,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (the `PlotSpec` title will be used)
pub const NO_TITLE: Option<&str> = None;

/// Pixels per inch used by [`PlotConfig::figure`]
pub const PIXELS_PER_INCH: f64 = 100.0;

impl PlotConfig {
    /// Config with a caption override
    ///
    /// ```rust
    /// use diffplot::output::visualization::{PlotConfig, NO_TITLE};
    ///
    /// assert_eq!(PlotConfig::titled("Quenching sweep").title.as_deref(), Some("Quenching sweep"));
    /// assert_eq!(PlotConfig::titled(NO_TITLE).title, None);
    /// ```
    pub fn titled(title: impl IntoOptionalTitle) -> Self {
        Self {
            title: title.into_optional_title(),
            ..Self::default()
        }
    }

    /// Config for a figure size given in inches
    ///
    /// Non-positive sizes keep the default dimension.
    pub fn figure(width_in: f64, height_in: f64) -> Self {
        let defaults = Self::default();
        let to_pixels = |inches: f64, fallback: u32| {
            if inches > 0.0 {
                (inches * PIXELS_PER_INCH).round() as u32
            } else {
                log::warn!("Ignoring non-positive figure size {inches} in, using {fallback} px");
                fallback
            }
        };

        Self {
            width: to_pixels(width_in, defaults.width),
            height: to_pixels(height_in, defaults.height),
            ..defaults
        }
    }

    /// Builder pattern: set logarithmic axes (x, left y, right y)
    pub fn with_log_scales(mut self, log_x: bool, log_y: bool, log_y2: bool) -> Self {
        self.log_x = log_x;
        self.log_y = log_y;
        self.log_y2 = log_y2;
        self
    }

    /// Caption to draw: the override if any, else `fallback`
    pub(crate) fn caption<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.title.as_deref().unwrap_or(fallback)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_config_default() {
        let config = PlotConfig::default();
        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 768);
        assert!(config.show_grid);
        assert!(!config.log_x && !config.log_y && !config.log_y2);
    }

    #[test]
    fn test_titled_with_string() {
        let title = format!("T = {} K", 300);
        let config = PlotConfig::titled(title);
        assert_eq!(config.caption("ignored"), "T = 300 K");
    }

    #[test]
    fn test_caption_falls_back_to_spec_title() {
        let config = PlotConfig::titled(NO_TITLE);
        assert_eq!(config.caption("Diffusion"), "Diffusion");
    }

    #[test]
    fn test_figure_size_in_inches() {
        let config = PlotConfig::figure(6.4, 4.8);
        assert_eq!((config.width, config.height), (640, 480));

        let config = PlotConfig::figure(-1.0, 3.0);
        assert_eq!((config.width, config.height), (1024, 300));
    }
}
