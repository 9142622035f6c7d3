//! CSV export of assembled plots
//!
//! Writes every point of every series of a [`PlotSpec`] in long format, one row per
//! point, so that the plot can be rebuilt or analysed with pandas, R or a spreadsheet.
//!
//! # Output
//!
//! ```csv
//! # Diffusion Plot Data
//! # Generated: 2026-10-19T09:30:00+00:00
//! # Title: Quenching sweep
//! # X axis: Quenching site density [proportion]
//! # Y axis (primary): Diffusion Tensor Element [m^2 / s]
//! #
//! series,source,group,coefficient,axis,x,y
//! 0,/runs/q0.001,temperature: 300 ,Dxx,primary,1.000000e-3,2.512000e-6
//! 1,/runs/q0.01,temperature: 300 ,Dxx,primary,1.000000e-2,1.904000e-6
//! ```
//!
//! Fields containing the delimiter (e.g. a chirality `(6,5)` in a group label) are
//! quoted.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use super::Exporter;
use crate::pipeline::PlotSpec;

/// CSV column headers, in order
pub const CSV_HEADER: [&str; 7] = ["series", "source", "group", "coefficient", "axis", "x", "y"];

// =================================================================================================
// Configuration Structures
// =================================================================================================

/// Configuration for CSV export
///
/// # Fields
///
/// - `delimiter`: Column separator (default: ',')
/// - `decimal_separator`: Decimal point character (default: '.')
/// - `precision`: Number of mantissa digits after the point (default: 6)
/// - `include_metadata`: Add header comments with plot info
/// - `metadata`: Plot metadata to include
///
/// # Example
///
/// ```rust
/// use diffplot::output::export::CsvConfig;
///
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     ..Default::default()
/// };
/// assert_eq!(config.decimal_separator, '.');
/// ```
#[derive(Clone, Debug)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places of the mantissa (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
        }
    }
}

impl CsvConfig {
    /// Create config with European CSV format (semicolon, comma for decimal)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// All fields are optional. Only non-None fields will be included in the CSV header.
#[derive(Clone, Debug, Default)]
pub struct CsvMetadata {
    /// Plot title
    pub title: Option<String>,

    /// X axis description
    pub x_axis: Option<String>,

    /// Y axis descriptions with their slot name
    pub y_axes: Vec<(String, String)>,

    /// Additional custom entries
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Create metadata describing a plot
    pub fn from_spec(spec: &PlotSpec) -> Self {
        Self {
            title: Some(spec.title.clone()),
            x_axis: Some(spec.x_label.clone()),
            y_axes: spec
                .y_axes
                .iter()
                .map(|a| (a.slot.name().to_string(), a.label.clone()))
                .collect(),
            custom: Vec::new(),
        }
    }

    /// Add custom entry
    pub fn add_custom(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.custom.push((key.into(), value.into()));
    }
}

/// Failure to export a plot to CSV
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("nothing to export: plot has no series")]
    EmptySpec,

    #[error("series {series} has a non-finite x value at point {index}")]
    NonFiniteX { series: usize, index: usize },

    #[error("delimiter '{0}' is not a single-byte character")]
    InvalidDelimiter(char),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),
}

// =================================================================================================
// Helper Functions
// =================================================================================================

/// Write metadata header comments
fn write_metadata_header<W: Write>(out: &mut W, metadata: &CsvMetadata) -> std::io::Result<()> {
    writeln!(out, "# Diffusion Plot Data")?;

    let now = chrono::Utc::now();
    writeln!(out, "# Generated: {}", now.to_rfc3339())?;

    if let Some(title) = &metadata.title {
        writeln!(out, "# Title: {}", title)?;
    }
    if let Some(x_axis) = &metadata.x_axis {
        writeln!(out, "# X axis: {}", x_axis)?;
    }
    for (slot, label) in &metadata.y_axes {
        writeln!(out, "# Y axis ({}): {}", slot, label)?;
    }

    for (key, value) in &metadata.custom {
        writeln!(out, "# {}: {}", key, value)?;
    }

    writeln!(out, "#")?;
    Ok(())
}

/// Format number in scientific notation with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$e}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

// =================================================================================================
// Exporter
// =================================================================================================

/// Long-format CSV exporter
///
/// # Example
///
/// ```rust,ignore
/// use diffplot::output::export::{CsvConfig, CsvExporter, CsvMetadata, Exporter};
///
/// let exporter = CsvExporter::new(
///     CsvConfig::default().with_metadata(CsvMetadata::from_spec(&spec)),
/// );
/// exporter.export(&spec, "diffusion.csv".as_ref())?;
/// ```
#[derive(Clone, Debug, Default)]
pub struct CsvExporter {
    config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CsvConfig {
        &self.config
    }

    /// Write a plot to any writer
    ///
    /// # Errors
    ///
    /// - [`CsvError::EmptySpec`] if the plot has no series
    /// - [`CsvError::NonFiniteX`] if an x value is NaN or infinite
    /// - [`CsvError::InvalidDelimiter`] for a multi-byte delimiter
    /// - I/O and CSV writer errors
    pub fn write_to<W: Write>(&self, spec: &PlotSpec, mut out: W) -> Result<(), CsvError> {
        // ============================= Validation =============================

        if spec.series.is_empty() {
            return Err(CsvError::EmptySpec);
        }

        for (series, s) in spec.series.iter().enumerate() {
            if let Some(index) = s.x.iter().position(|x| !x.is_finite()) {
                return Err(CsvError::NonFiniteX { series, index });
            }
        }

        let delimiter = u8::try_from(self.config.delimiter)
            .map_err(|_| CsvError::InvalidDelimiter(self.config.delimiter))?;

        // ============================= Write Metadata =========================

        if self.config.include_metadata
            && let Some(metadata) = &self.config.metadata
        {
            write_metadata_header(&mut out, metadata)?;
        }

        // ============================= Write Data =============================

        let mut writer = ::csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(out);

        writer.write_record(CSV_HEADER)?;

        for (index, s) in spec.series.iter().enumerate() {
            let series = index.to_string();
            let source = s.source.display().to_string();
            let coefficient = s.coefficient.name();

            for (x, y) in s.x.iter().zip(&s.y) {
                let x = format_number(*x, &self.config);
                let y = format_number(*y, &self.config);
                writer.write_record([
                    series.as_str(),
                    source.as_str(),
                    s.group.as_str(),
                    coefficient.as_str(),
                    s.slot.name(),
                    x.as_str(),
                    y.as_str(),
                ])?;
            }
        }

        writer.flush()?;
        Ok(())
    }
}

impl Exporter for CsvExporter {
    type Error = CsvError;

    fn export(&self, spec: &PlotSpec, path: &Path) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        self.write_to(spec, BufWriter::new(file))?;
        log::info!("Exported {} series to {}", spec.series.len(), path.display());
        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{AxisSelector, CoefficientId, Component, Quantity};
    use crate::pipeline::{AxisSlot, GroupLabel, Marker, Rgb, Series, SeriesShape, YAxis};
    use std::path::PathBuf;

    fn spec(x: Vec<f64>, y: Vec<f64>) -> PlotSpec {
        PlotSpec {
            title: "Sweep".into(),
            axis: AxisSelector::Temperature,
            x_label: AxisSelector::Temperature.label().into(),
            y_axes: vec![YAxis {
                slot: AxisSlot::Primary,
                quantity: Quantity::DiffusionTensor,
                label: Quantity::DiffusionTensor.axis_label().into(),
            }],
            series: vec![Series {
                source: PathBuf::from("/runs/a"),
                group: GroupLabel::default(),
                coefficient: CoefficientId::new(Quantity::DiffusionTensor, Component::Xx),
                x,
                y,
                color: Rgb(0, 0, 0),
                shape: SeriesShape::Marker(Marker::Point),
                slot: AxisSlot::Primary,
            }],
            color_legend: Vec::new(),
            shape_legend: Vec::new(),
        }
    }

    fn export_to_string(exporter: &CsvExporter, spec: &PlotSpec) -> String {
        let mut buffer = Vec::new();
        exporter.write_to(spec, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_format_number() {
        let config = CsvConfig::default();
        assert_eq!(format_number(1.5e-12, &config), "1.500000e-12");

        let european = CsvConfig::european().precision(2);
        assert_eq!(format_number(300.0, &european), "3,00e2");
    }

    #[test]
    fn test_write_rows() {
        let output = export_to_string(&CsvExporter::default(), &spec(vec![300.0], vec![2.0e-6]));
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "series,source,group,coefficient,axis,x,y");
        assert_eq!(lines[1], "0,/runs/a,,Dxx,primary,3.000000e2,2.000000e-6");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_metadata_header() {
        let data = spec(vec![300.0], vec![1.0]);
        let mut metadata = CsvMetadata::from_spec(&data);
        metadata.add_custom("Runs", "1");
        let exporter = CsvExporter::new(CsvConfig::default().with_metadata(metadata));

        let output = export_to_string(&exporter, &data);
        assert!(output.starts_with("# Diffusion Plot Data\n# Generated: "));
        assert!(output.contains("# Title: Sweep\n"));
        assert!(output.contains("# Y axis (primary): Diffusion Tensor Element [m^2 / s]\n"));
        assert!(output.contains("# Runs: 1\n#\nseries,"));
    }

    #[test]
    fn test_group_with_delimiter_is_quoted() {
        let mut data = spec(vec![1.0], vec![1.0]);
        data.series[0].group = crate::pipeline::GroupLabel::for_params(
            &crate::dataset::RunParameters {
                chirality: "(6,5)".into(),
                ..Default::default()
            },
            &[crate::dataset::Parameter::Chirality].into_iter().collect(),
        );

        let output = export_to_string(&CsvExporter::default(), &data);
        assert!(output.contains(",\"chirality: (6,5) \","));
    }

    #[test]
    fn test_rejects_empty_spec() {
        let mut data = spec(vec![], vec![]);
        data.series.clear();
        let err = CsvExporter::default().write_to(&data, Vec::new()).unwrap_err();
        assert!(matches!(err, CsvError::EmptySpec));
    }

    #[test]
    fn test_rejects_non_finite_x() {
        let data = spec(vec![0.0, f64::NAN], vec![1.0, 2.0]);
        let err = CsvExporter::default().write_to(&data, Vec::new()).unwrap_err();
        assert!(matches!(err, CsvError::NonFiniteX { series: 0, index: 1 }));
    }

    #[test]
    fn test_rejects_multibyte_delimiter() {
        let exporter = CsvExporter::new(CsvConfig::default().delimiter('→'));
        let err = exporter.write_to(&spec(vec![1.0], vec![1.0]), Vec::new()).unwrap_err();
        assert!(matches!(err, CsvError::InvalidDelimiter('→')));
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.csv");

        CsvExporter::default()
            .export(&spec(vec![300.0], vec![1.0]), &path)
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}
