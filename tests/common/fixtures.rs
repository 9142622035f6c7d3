//! On-disk simulation output directories

use std::fs;
use std::path::Path;

use diffplot::dataset::loader::{
    DIFFUSION_LENGTH_FILE, DISPLACEMENT_FILE, MESH_INPUT_FILE, RUN_INPUT_FILE, TENSOR_FILE,
};

/// Parameters written to the JSON inputs of a fixture run
#[derive(Debug, Clone)]
pub struct RunFixture {
    pub temperature: f64,
    pub relative_permittivity: f64,
    pub quenching_density: f64,
    pub tube_spacing: f64,
    pub bundle: bool,

    /// Diffusion tensor `xx` values, one per time point
    pub tensor_xx: Vec<f64>,
}

impl Default for RunFixture {
    fn default() -> Self {
        Self {
            temperature: 300.0,
            relative_permittivity: 1.0,
            quenching_density: 0.0,
            tube_spacing: 1.5,
            bundle: false,
            tensor_xx: vec![1.0e-6, 2.0e-6, 3.0e-6, 4.0e-6],
        }
    }
}

fn sci(v: f64) -> String {
    if v.is_nan() {
        "nan".to_string()
    } else {
        format!("{:+e}", v)
    }
}

/// Write a complete run directory under `dir`
pub fn write_run(dir: &Path, run: &RunFixture) {
    fs::create_dir_all(dir).unwrap();

    fs::write(
        dir.join(RUN_INPUT_FILE),
        format!(
            r#"{{"temperature [kelvin]": {}, "relative permittivity": {},
                "density of quenching sites": {}, "number of particles": 1000}}"#,
            run.temperature, run.relative_permittivity, run.quenching_density
        ),
    )
    .unwrap();

    fs::write(
        dir.join(MESH_INPUT_FILE),
        format!(
            r#"{{"cnt intertube spacing [nm]": {}, "cnt chirality": [6, 5],
                "bundle": {}, "parallel": false}}"#,
            run.tube_spacing, run.bundle
        ),
    )
    .unwrap();

    let points = run.tensor_xx.len();
    let time: Vec<f64> = (0..points).map(|i| i as f64 * 1.0e-12).collect();

    let mut displacement = String::from(
        "# this file contains the average of dx^2, dy^2, and dz^2\n\ntime,x,y,z\n",
    );
    for (i, t) in time.iter().enumerate() {
        let d = (i as f64) * 1.0e-18;
        displacement.push_str(&format!("{},{},{},{}\n", sci(*t), sci(d), sci(d / 2.0), sci(d / 4.0)));
    }
    fs::write(dir.join(DISPLACEMENT_FILE), displacement).unwrap();

    let mut tensor = String::from("# diffusion tensor\n\ntime,Dxx,Dxy,Dxz,Dyy,Dyz,Dzz\n");
    for (t, xx) in time.iter().zip(&run.tensor_xx) {
        tensor.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            sci(*t),
            sci(*xx),
            sci(0.0),
            sci(0.0),
            sci(xx / 2.0),
            sci(0.0),
            sci(xx / 4.0)
        ));
    }
    fs::write(dir.join(TENSOR_FILE), tensor).unwrap();

    fs::write(
        dir.join(DIFFUSION_LENGTH_FILE),
        "# diffusion length\n\nx,y,z\n-1.0e-9,+2.0e-9,+3.0e-9\n+3.0e-9,-2.0e-9,-nan\n",
    )
    .unwrap();
}
