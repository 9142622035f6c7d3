//! Rendering of assembled plots
//!
//! Draws a [`PlotSpec`] to PNG or SVG:
//!
//! - time plots: one line per series, dash pattern from the group linestyle
//! - scalar plots: one hollow marker per series, shape from the group marker
//! - a right-hand y axis when the plot has a secondary slot
//! - legends for coefficient colors and group shapes when more than one exists
//!
//! Logarithmic axes use the `plotters` log coordinates. Values that cannot be drawn
//! (non-finite, or non-positive on a log axis) are skipped and break lines.
//!
//! # Usage
//!
//! ```rust,ignore
//! use diffplot::output::visualization::{render_plot_spec, PlotConfig};
//!
//! let spec = PlotSpecAssembler::new().assemble(&request)?;
//! render_plot_spec(&spec, "diffusion.svg", None)?;
//! ```

use std::error::Error;
use std::ops::Range;
use std::path::Path;

use plotters::coord::Shift;
use plotters::coord::ranged1d::{AsRangedCoord, ValueFormatter};
use plotters::prelude::*;

use super::config::PlotConfig;
use crate::pipeline::{AxisSlot, Marker, PlotSpec, Rgb, Series, SeriesShape};

// =================================================================================================
// Axis ranges
// =================================================================================================

fn format_tick(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else if (1e-2..1e4).contains(&value.abs()) {
        format!("{:.2}", value)
    } else {
        format!("{:.1e}", value)
    }
}

/// Whether a value has a position on a linear or log axis
fn drawable(value: f64, log: bool) -> bool {
    value.is_finite() && (!log || value > 0.0)
}

/// Padded range covering all drawable values
///
/// Linear axes pad by 5% of the span, log axes by 5% of the decades spanned. Without
/// drawable values the range is `0..1` (linear) or `1..10` (log).
fn axis_range(values: impl Iterator<Item = f64>, log: bool) -> Range<f64> {
    let (min, max) = values
        .filter(|v| drawable(*v, log))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if min > max {
        return if log { 1.0..10.0 } else { 0.0..1.0 };
    }

    if log {
        let (lo, hi) = (min.log10(), max.log10());
        let pad = if hi > lo { (hi - lo) * 0.05 } else { 0.5 };
        let start = 10f64.powf(lo - pad).max(f64::MIN_POSITIVE);
        let end = 10f64.powf(hi + pad).min(f64::MAX);
        return start..end;
    }

    // A span below the normal range would map every point to one pixel
    let span = max - min;
    let pad = if span.is_normal() {
        span * 0.05
    } else if (min.abs() * 0.05).is_normal() {
        min.abs() * 0.05
    } else {
        0.5
    };

    (min - pad)..(max + pad)
}

// =================================================================================================
// Line dashes and marker outlines
// =================================================================================================

/// Split a pixel polyline into its visible dashes
///
/// `dashes` alternates on/off lengths in line widths; an empty pattern returns the
/// polyline unchanged. Segments of non-finite length are dropped and restart the line.
fn dash_runs(points: &[(f64, f64)], dashes: &[f64], line_width: f64) -> Vec<Vec<(f64, f64)>> {
    if dashes.is_empty() || points.len() < 2 {
        return vec![points.to_vec()];
    }

    let pattern: Vec<f64> = dashes.iter().map(|d| (d * line_width).max(0.5)).collect();
    let mut runs = Vec::new();
    let mut current = vec![points[0]];
    let mut phase = 0;
    let mut remaining = pattern[0];

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let length = (b.0 - a.0).hypot(b.1 - a.1);
        if !length.is_finite() {
            if phase % 2 == 0 && current.len() > 1 {
                runs.push(std::mem::take(&mut current));
            }
            current = vec![b];
            continue;
        }
        let mut travelled = 0.0;

        while length - travelled > remaining {
            travelled += remaining;
            let t = travelled / length;
            let split = (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t);

            if phase % 2 == 0 {
                current.push(split);
                runs.push(std::mem::take(&mut current));
            } else {
                current = vec![split];
            }

            phase = (phase + 1) % pattern.len();
            remaining = pattern[phase];
        }

        remaining -= length - travelled;
        if phase % 2 == 0 {
            current.push(b);
        }
    }

    if phase % 2 == 0 && current.len() > 1 {
        runs.push(current);
    }

    runs
}

/// Pixel direction of an angle in degrees (counter-clockwise, y grows downwards)
fn direction(degrees: f64, radius: f64) -> (i32, i32) {
    let rad = degrees.to_radians();
    (
        (radius * rad.cos()).round() as i32,
        (-radius * rad.sin()).round() as i32,
    )
}

fn closed(vertices: Vec<(i32, i32)>) -> Vec<(i32, i32)> {
    let mut path = vertices;
    if let Some(first) = path.first().copied() {
        path.push(first);
    }
    path
}

fn polygon(angles: &[f64], radius: f64) -> Vec<(i32, i32)> {
    closed(angles.iter().map(|a| direction(*a, radius)).collect())
}

fn spokes(angles: &[f64], radius: f64) -> Vec<(i32, i32)> {
    let mut path = vec![(0, 0)];
    for a in angles {
        path.push(direction(*a, radius));
        path.push((0, 0));
    }
    path
}

/// Marker outline as a single pixel-offset polyline around the data point
///
/// Open markers (cross, plus, tri) retrace their strokes through the center so
/// every shape is one path.
fn marker_path(marker: Marker, size: u32) -> Vec<(i32, i32)> {
    let r = f64::from(size.max(1));
    let ri = size.max(1) as i32;

    const UP: [f64; 3] = [90.0, 210.0, 330.0];
    const DOWN: [f64; 3] = [270.0, 30.0, 150.0];
    const LEFT: [f64; 3] = [180.0, 300.0, 60.0];
    const RIGHT: [f64; 3] = [0.0, 120.0, 240.0];

    match marker {
        Marker::Point => {
            let angles: Vec<f64> = (0..8_i32).map(|i| f64::from(i) * 45.0).collect();
            polygon(&angles, (r / 3.0).max(1.0))
        }
        Marker::Circle => {
            let angles: Vec<f64> = (0..16_i32).map(|i| f64::from(i) * 22.5).collect();
            polygon(&angles, r)
        }
        Marker::Cross => vec![(-ri, -ri), (ri, ri), (0, 0), (-ri, ri), (ri, -ri)],
        Marker::Plus => vec![(-ri, 0), (ri, 0), (0, 0), (0, -ri), (0, ri)],
        Marker::VerticalLine => vec![(0, -ri), (0, ri)],
        Marker::Square => {
            let h = (r * 0.8).round() as i32;
            closed(vec![(-h, -h), (h, -h), (h, h), (-h, h)])
        }
        Marker::ThinDiamond => {
            let w = (r * 0.6).round() as i32;
            closed(vec![(0, -ri), (w, 0), (0, ri), (-w, 0)])
        }
        Marker::Star => {
            let angles: Vec<f64> = (0..10_i32).map(|i| 90.0 + f64::from(i) * 36.0).collect();
            closed(
                angles
                    .iter()
                    .enumerate()
                    .map(|(i, a)| direction(*a, if i % 2 == 0 { r } else { r * 0.4 }))
                    .collect(),
            )
        }
        Marker::TriangleUp => polygon(&UP, r),
        Marker::TriangleDown => polygon(&DOWN, r),
        Marker::TriangleLeft => polygon(&LEFT, r),
        Marker::TriangleRight => polygon(&RIGHT, r),
        Marker::TriUp => spokes(&UP, r),
        Marker::TriDown => spokes(&DOWN, r),
        Marker::TriLeft => spokes(&LEFT, r),
        Marker::TriRight => spokes(&RIGHT, r),
    }
}

fn to_rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

fn to_pixel((x, y): (f64, f64)) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

// =================================================================================================
// Series elements
// =================================================================================================

/// Pixel paths of the series drawn against one chart's coordinates
///
/// `log` flags the x and y axes of that chart.
fn series_paths<DB, X, Y>(
    chart: &ChartContext<'_, DB, Cartesian2d<X, Y>>,
    series: &[&Series],
    log: (bool, bool),
    config: &PlotConfig,
) -> Vec<PathElement<(i32, i32)>>
where
    DB: DrawingBackend,
    X: Ranged<ValueType = f64>,
    Y: Ranged<ValueType = f64>,
{
    let mut elements = Vec::new();

    for s in series {
        let style = ShapeStyle::from(&to_rgb(s.color)).stroke_width(config.line_width);
        let points: Vec<Option<(i32, i32)>> = s
            .x
            .iter()
            .zip(&s.y)
            .map(|(x, y)| {
                let shown = drawable(*x, log.0) && drawable(*y, log.1);
                shown.then(|| chart.backend_coord(&(*x, *y)))
            })
            .collect();

        match s.shape {
            SeriesShape::Line(line) => {
                for run in points.split(|p| p.is_none()) {
                    let run: Vec<(f64, f64)> = run
                        .iter()
                        .flatten()
                        .map(|(x, y)| (f64::from(*x), f64::from(*y)))
                        .collect();
                    if run.len() < 2 {
                        continue;
                    }
                    for dash in dash_runs(&run, line.dashes, f64::from(config.line_width)) {
                        let path: Vec<(i32, i32)> = dash.into_iter().map(to_pixel).collect();
                        elements.push(PathElement::new(path, style));
                    }
                }
            }
            SeriesShape::Marker(marker) => {
                let outline = marker_path(marker, config.marker_size);
                for (px, py) in points.into_iter().flatten() {
                    let path: Vec<(i32, i32)> =
                        outline.iter().map(|(dx, dy)| (px + dx, py + dy)).collect();
                    elements.push(PathElement::new(path, style));
                }
            }
        }
    }

    elements
}

/// Legend entry: label plus a pixel path drawn next to it
struct LegendEntry {
    label: String,
    path: Vec<(i32, i32)>,
    style: ShapeStyle,
}

fn legend_entries(spec: &PlotSpec, config: &PlotConfig) -> Vec<LegendEntry> {
    let mut entries = Vec::new();

    if spec.color_legend.len() > 1 {
        for (coefficient, color) in &spec.color_legend {
            entries.push(LegendEntry {
                label: coefficient.name(),
                path: vec![(0, 0), (20, 0)],
                style: ShapeStyle::from(&to_rgb(*color)).stroke_width(config.line_width),
            });
        }
    }

    if spec.shape_legend.len() > 1 {
        let style = ShapeStyle::from(&BLACK).stroke_width(config.line_width);
        for (group, shape) in &spec.shape_legend {
            let (label, path) = match shape {
                SeriesShape::Line(line) => (
                    format!("{} [{}]", group.as_str().trim_end(), line.name),
                    vec![(0, 0), (20, 0)],
                ),
                SeriesShape::Marker(marker) => (
                    group.as_str().trim_end().to_string(),
                    marker_path(*marker, config.marker_size)
                        .into_iter()
                        .map(|(dx, dy)| (dx + 10, dy))
                        .collect(),
                ),
            };
            entries.push(LegendEntry { label, path, style });
        }
    }

    entries
}

// =================================================================================================
// Public API
// =================================================================================================

/// Render a plot to a file
///
/// The backend follows the file extension: `.svg` uses the SVG backend, anything else
/// the bitmap backend (PNG by default). Bitmap text is rasterized with system fonts,
/// which needs the `ttf` crate feature.
///
/// # Arguments
///
/// * `spec`        - Assembled plot
/// * `output_path` - Output file path (`.png` or `.svg`)
/// * `config`      - Optional plot configuration (uses default if None)
///
/// # Errors
///
/// Returns `Err` if the backend fails to draw or write the file, or for a bitmap
/// path when the crate is built without the `ttf` feature.
pub fn render_plot_spec(
    spec: &PlotSpec,
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let default_config = PlotConfig::default();
    let config = config.unwrap_or(&default_config);
    let path = output_path.as_ref();

    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    log::debug!(
        "Rendering '{}' ({} series) to {}",
        spec.title,
        spec.series.len(),
        path.display()
    );

    if ext.eq_ignore_ascii_case("svg") {
        let backend = SVGBackend::new(path, (config.width, config.height));
        render_impl(backend, spec, config)
    } else if cfg!(not(feature = "ttf")) {
        Err(format!(
            "cannot render {}: bitmap output needs the `ttf` feature, use an .svg path",
            path.display()
        )
        .into())
    } else {
        let backend = BitMapBackend::new(path, (config.width, config.height));
        render_impl(backend, spec, config)
    }
}

fn render_impl<DB: DrawingBackend>(
    backend: DB,
    spec: &PlotSpec,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let x_range = axis_range(
        spec.series.iter().flat_map(|s| s.x.iter().copied()),
        config.log_x,
    );
    let y_range = axis_range(
        spec.series_on(AxisSlot::Primary).flat_map(|s| s.y.iter().copied()),
        config.log_y,
    );

    match (config.log_x, config.log_y) {
        (false, false) => draw_chart(&root, spec, config, x_range, y_range)?,
        (false, true) => draw_chart(&root, spec, config, x_range, y_range.log_scale())?,
        (true, false) => draw_chart(&root, spec, config, x_range.log_scale(), y_range)?,
        (true, true) => {
            draw_chart(&root, spec, config, x_range.log_scale(), y_range.log_scale())?
        }
    }

    root.present()?;
    Ok(())
}

/// Chart on the primary axes, then the secondary axis when the plot has one
fn draw_chart<DB, X, Y>(
    root: &DrawingArea<DB, Shift>,
    spec: &PlotSpec,
    config: &PlotConfig,
    x_spec: X,
    y_spec: Y,
) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
    X: AsRangedCoord<Value = f64> + Clone,
    Y: AsRangedCoord<Value = f64>,
    X::CoordDescType: ValueFormatter<f64>,
    Y::CoordDescType: ValueFormatter<f64>,
{
    let primary: Vec<&Series> = spec.series_on(AxisSlot::Primary).collect();
    let secondary_axis = spec.y_axis(AxisSlot::Secondary);
    let fmt = |v: &f64| format_tick(*v);

    let mut builder = ChartBuilder::on(root);
    builder
        .caption(config.caption(&spec.title), ("sans-serif", 32).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70);
    if secondary_axis.is_some() {
        builder.right_y_label_area_size(70);
    }
    let mut chart = builder.build_cartesian_2d(x_spec.clone(), y_spec)?;

    {
        let primary_label = spec
            .y_axis(AxisSlot::Primary)
            .map(|a| a.label.clone())
            .unwrap_or_default();

        let mut mesh = chart.configure_mesh();
        mesh.x_desc(spec.x_label.as_str())
            .y_desc(primary_label)
            .x_label_formatter(&fmt)
            .y_label_formatter(&fmt);
        if !config.show_grid {
            mesh.disable_mesh();
        }
        mesh.draw()?;
    }

    for element in series_paths(&chart, &primary, (config.log_x, config.log_y), config) {
        root.draw(&element)?;
    }

    let legend = legend_entries(spec, config);
    for entry in &legend {
        let LegendEntry { path, style, .. } = entry;
        let (path, style) = (path.clone(), *style);
        chart
            .draw_series(std::iter::empty::<PathElement<(f64, f64)>>())?
            .label(entry.label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(
                    path.iter().map(|(dx, dy)| (x + dx, y + dy)).collect::<Vec<_>>(),
                    style,
                )
            });
    }

    match secondary_axis {
        Some(axis) => {
            let secondary: Vec<&Series> = spec.series_on(AxisSlot::Secondary).collect();
            let y2_range = axis_range(
                secondary.iter().flat_map(|s| s.y.iter().copied()),
                config.log_y2,
            );
            let layer = SecondaryLayer {
                series: &secondary,
                label: &axis.label,
                show_legend: !legend.is_empty(),
            };

            if config.log_y2 {
                draw_secondary(root, chart, layer, config, x_spec, y2_range.log_scale())
            } else {
                draw_secondary(root, chart, layer, config, x_spec, y2_range)
            }
        }
        None => {
            if !legend.is_empty() {
                chart
                    .configure_series_labels()
                    .background_style(&config.background.mix(0.8))
                    .border_style(&BLACK)
                    .draw()?;
            }
            Ok(())
        }
    }
}

/// What goes on the right-hand axis
struct SecondaryLayer<'s> {
    series: &'s [&'s Series],
    label: &'s str,
    show_legend: bool,
}

fn draw_secondary<'a, DB, XC, YC, SX, SY>(
    root: &DrawingArea<DB, Shift>,
    chart: ChartContext<'a, DB, Cartesian2d<XC, YC>>,
    layer: SecondaryLayer<'_>,
    config: &PlotConfig,
    x_spec: SX,
    y_spec: SY,
) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend + 'a,
    DB::ErrorType: 'static,
    XC: Ranged,
    YC: Ranged,
    SX: AsRangedCoord<Value = f64>,
    SY: AsRangedCoord<Value = f64>,
    SX::CoordDescType: ValueFormatter<f64>,
    SY::CoordDescType: ValueFormatter<f64>,
{
    let fmt = |v: &f64| format_tick(*v);

    let mut chart = chart.set_secondary_coord(x_spec, y_spec);
    chart
        .configure_secondary_axes()
        .y_desc(layer.label)
        .y_label_formatter(&fmt)
        .draw()?;

    let elements = series_paths(
        chart.borrow_secondary(),
        layer.series,
        (config.log_x, config.log_y2),
        config,
    );
    for element in elements {
        root.draw(&element)?;
    }

    if layer.show_legend {
        chart
            .configure_series_labels()
            .background_style(&config.background.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
