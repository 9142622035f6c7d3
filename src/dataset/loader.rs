//! Loading simulation output directories
//!
//! A run directory written by the simulator contains:
//!
//! | File | Content |
//! |------|---------|
//! | `input.json` | run parameters (temperature, permittivity, quenching density) |
//! | `mesh_input.json` | mesh parameters (tube spacing, chirality, bundle, parallel) |
//! | `particle_displacement.avg.squared.dat` | `time,x,y,z` |
//! | `particle_diffusion_tensor.dat` | `time,Dxx,Dxy,Dxz,Dyy,Dyz,Dzz` |
//! | `particle_diffusion_length.dat` | `x,y,z` (one row per particle) |
//!
//! Tables are comma-separated with `#` comment lines before the header.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::params::RunParameters;
use super::selectors::{Component, Quantity};
use super::series::{ParticleTable, SampleValue, TimeSeriesTable};
use super::Dataset;

pub const RUN_INPUT_FILE: &str = "input.json";
pub const MESH_INPUT_FILE: &str = "mesh_input.json";
pub const DISPLACEMENT_FILE: &str = "particle_displacement.avg.squared.dat";
pub const TENSOR_FILE: &str = "particle_diffusion_tensor.dat";
pub const DIFFUSION_LENGTH_FILE: &str = "particle_diffusion_length.dat";

/// Failure to read a run directory
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("missing file {}", .path.display())]
    MissingFile { path: PathBuf },

    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid parameter file {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid table {}: {source}", .path.display())]
    Csv { path: PathBuf, source: csv::Error },

    #[error("table {} has no '{column}' column", .path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("row {row} of {} has a non-numeric time '{raw}'", .path.display())]
    NonNumericTime {
        path: PathBuf,
        row: usize,
        raw: String,
    },

    #[error(
        "time tables of {} disagree ({displacement_points} displacement points, {tensor_points} tensor points)",
        .path.display()
    )]
    TimeIndexMismatch {
        path: PathBuf,
        displacement_points: usize,
        tensor_points: usize,
    },
}

// =================================================================================================
// Parameter files
// =================================================================================================

#[derive(Debug, Deserialize)]
struct RunInput {
    #[serde(rename = "temperature [kelvin]")]
    temperature: f64,

    #[serde(rename = "relative permittivity")]
    relative_permittivity: f64,

    #[serde(rename = "density of quenching sites", default)]
    quenching_density: f64,
}

#[derive(Debug, Deserialize)]
struct MeshInput {
    #[serde(rename = "cnt intertube spacing [nm]")]
    tube_spacing: f64,

    #[serde(rename = "cnt chirality", default)]
    chirality: serde_json::Value,

    #[serde(default)]
    bundle: bool,

    #[serde(default)]
    parallel: bool,
}

/// Compact text form of a JSON value: arrays as `(n,m)`, strings unquoted
fn render_json_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(render_json_value).collect();
            format!("({})", inner.join(","))
        }
        other => other.to_string(),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let file = open(path)?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => LoadError::MissingFile {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Read both parameter files of a run directory
pub fn read_parameters(dir: &Path) -> Result<RunParameters, LoadError> {
    let run: RunInput = read_json(&dir.join(RUN_INPUT_FILE))?;
    let mesh: MeshInput = read_json(&dir.join(MESH_INPUT_FILE))?;

    Ok(RunParameters {
        temperature: run.temperature,
        relative_permittivity: run.relative_permittivity,
        quenching_density: run.quenching_density,
        tube_spacing: mesh.tube_spacing,
        chirality: render_json_value(&mesh.chirality),
        bundle: mesh.bundle,
        parallel: mesh.parallel,
    })
}

// =================================================================================================
// Tables
// =================================================================================================

/// Header and rows of a comma-separated table
struct RawTable {
    path: PathBuf,
    headers: csv::StringRecord,
    rows: Vec<csv::StringRecord>,
}

impl RawTable {
    fn read(path: &Path) -> Result<Self, LoadError> {
        let file = open(path)?;
        let csv_error = |source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .from_reader(BufReader::new(file));

        let headers = reader.headers().map_err(csv_error)?.clone();
        let rows = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(csv_error)?;

        Ok(Self {
            path: path.to_path_buf(),
            headers,
            rows,
        })
    }

    fn column(&self, name: &str) -> Result<Vec<&str>, LoadError> {
        let index = self
            .headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoadError::MissingColumn {
                path: self.path.clone(),
                column: name.to_string(),
            })?;

        Ok(self
            .rows
            .iter()
            .map(|row| row.get(index).unwrap_or(""))
            .collect())
    }

    fn samples(&self, name: &str) -> Result<Vec<SampleValue>, LoadError> {
        Ok(self
            .column(name)?
            .into_iter()
            .map(SampleValue::parse)
            .collect())
    }

    fn time(&self) -> Result<Vec<f64>, LoadError> {
        self.column("time")?
            .into_iter()
            .enumerate()
            .map(|(row, raw)| {
                raw.parse::<f64>().map_err(|_| LoadError::NonNumericTime {
                    path: self.path.clone(),
                    row,
                    raw: raw.to_string(),
                })
            })
            .collect()
    }
}

/// Column header of a coefficient in its source table
fn column_name(quantity: Quantity, component: Component) -> String {
    match quantity {
        Quantity::DiffusionTensor => format!("D{}", component.token()),
        Quantity::DisplacementSquared | Quantity::DiffusionLength => {
            component.token().to_string()
        }
    }
}

fn read_time_series(path: &Path, quantity: Quantity) -> Result<TimeSeriesTable, LoadError> {
    let raw = RawTable::read(path)?;
    let mut table = TimeSeriesTable::new(raw.time()?);

    for &component in quantity.components() {
        table = table.with_column(component, raw.samples(&column_name(quantity, component))?);
    }

    Ok(table)
}

fn read_particle_table(path: &Path) -> Result<ParticleTable, LoadError> {
    let raw = RawTable::read(path)?;
    let mut table = ParticleTable::new();

    for &component in Quantity::DiffusionLength.components() {
        let name = column_name(Quantity::DiffusionLength, component);
        table = table.with_column(component, raw.samples(&name)?);
    }

    Ok(table)
}

// =================================================================================================
// Datasets
// =================================================================================================

fn canonical(dir: &Path) -> Result<PathBuf, LoadError> {
    dir.canonicalize().map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => LoadError::MissingFile {
            path: dir.to_path_buf(),
        },
        _ => LoadError::Io {
            path: dir.to_path_buf(),
            source,
        },
    })
}

/// Load one run directory
///
/// The dataset source is the canonical directory path.
///
/// # Errors
///
/// Any [`LoadError`]; a directory is either loaded completely or not at all.
pub fn load_dataset(dir: impl AsRef<Path>) -> Result<Dataset, LoadError> {
    let dir = canonical(dir.as_ref())?;

    let params = read_parameters(&dir)?;
    let displacement = read_time_series(&dir.join(DISPLACEMENT_FILE), Quantity::DisplacementSquared)?;
    let tensor = read_time_series(&dir.join(TENSOR_FILE), Quantity::DiffusionTensor)?;
    let lengths = read_particle_table(&dir.join(DIFFUSION_LENGTH_FILE))?;

    log::info!(
        "Loaded dataset {} ({} time points, T = {} K)",
        dir.display(),
        tensor.len(),
        params.temperature
    );

    Dataset::new(dir, params, displacement, tensor, lengths)
}

/// Load several run directories, dropping repeats of the same directory
///
/// Datasets keep the order of first occurrence; two paths resolving to the same
/// canonical directory count as one.
pub fn load_datasets<I, P>(dirs: I) -> Result<Vec<Dataset>, LoadError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut seen = HashSet::new();
    let mut datasets = Vec::new();

    for dir in dirs {
        let path = canonical(dir.as_ref())?;
        if !seen.insert(path.clone()) {
            log::info!("Skipping duplicate dataset {}", path.display());
            continue;
        }
        datasets.push(load_dataset(&path)?);
    }

    Ok(datasets)
}

// =================================================================================================
// Tests
// =================================================================================================
