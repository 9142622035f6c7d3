//! Replay a recorded plot selection against simulation output directories
//!
//! Selections use the replay tokens: an x-axis index and, per y axis, a quantity
//! index followed by coefficient short forms.
//!
//! ```text
//! x-axis:    0 time | 1 tube spacing | 2 quenching density | 3 temperature | 4 permittivity
//! quantity:  0 displacement squared (x y z)
//!            1 diffusion tensor (xx xy xz yy yz zz)
//!            2 diffusion length (x y z)
//! ```
//!
//! # Usage
//!
//! ```bash
//! # Dxx and Dyy against temperature
//! cargo run --example replay_plot -- runs/T300 runs/T350 --x 3 --quantity 1:xx,yy
//!
//! # Displacement and Dxx over time, log scales, plus CSV data
//! cargo run --example replay_plot -- runs/* --x 0 -q 0:x -q 1:xx \
//!     --log-y --log-y2 --output time.svg --csv time.csv
//! ```

use clap::Parser;
use std::error::Error;
use std::path::{Path, PathBuf};

use diffplot::prelude::*;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
struct Args {
    /// Simulation output directories
    #[arg(value_name = "RUN_DIR", required = true)]
    dirs: Vec<PathBuf>,

    /// X-axis index (0-4)
    #[arg(long, default_value_t = 3)]
    x: usize,

    /// Quantity and coefficients as INDEX:TOKENS, e.g. `1:xx,yy` (at most twice)
    #[arg(short, long = "quantity", value_name = "INDEX:TOKENS", required = true)]
    quantities: Vec<String>,

    /// Plot title
    #[arg(long, default_value = "")]
    title: String,

    /// Output image (.svg, or .png with the `ttf` feature)
    #[arg(short, long, default_value = "diffusion.svg")]
    output: PathBuf,

    /// Logarithmic x axis
    #[arg(long, default_value_t = false)]
    log_x: bool,

    /// Logarithmic primary y axis
    #[arg(long, default_value_t = false)]
    log_y: bool,

    /// Logarithmic secondary y axis
    #[arg(long, default_value_t = false)]
    log_y2: bool,

    /// Also export the plotted points to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
}

fn parse_quantity(selection: QuantitySelection, raw: &str) -> Result<QuantitySelection, Box<dyn Error>> {
    let (index, tokens) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected INDEX:TOKENS, got '{raw}'"))?;
    let index: usize = index.trim().parse()?;
    let tokens: Vec<&str> = tokens.split(',').filter(|t| !t.trim().is_empty()).collect();

    Ok(selection.with_index_tokens(index, &tokens)?)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    println!("═══════════════════════════════════════════════════════");
    println!("  Diffusion plot replay");
    println!("═══════════════════════════════════════════════════════");

    let datasets = load_datasets(&args.dirs)?;
    println!("📂 Loaded {} dataset(s)", datasets.len());

    let axis = AxisSelector::from_index(args.x)?;
    let selection = args
        .quantities
        .iter()
        .try_fold(QuantitySelection::new(), |s, raw| parse_quantity(s, raw))?;

    let request = PlotRequest::new(&datasets, axis, selection, args.title.as_str());
    let spec = PlotSpecAssembler::new().assemble(&request)?;

    println!("   x axis : {}", spec.x_label);
    for y_axis in &spec.y_axes {
        println!("   y axis : {} ({})", y_axis.label, y_axis.slot.name());
    }
    for (group, shape) in &spec.shape_legend {
        let name = if group.is_empty() { "(all runs)" } else { group.as_str() };
        println!("   group  : {name} → {shape}");
    }

    let config = PlotConfig::default().with_log_scales(args.log_x, args.log_y, args.log_y2);
    render_plot_spec(&spec, &args.output, Some(&config))?;
    println!("📊 {} series rendered to {}", spec.series.len(), args.output.display());

    if let Some(csv) = &args.csv {
        CsvExporter::default().export(&spec, Path::new(csv))?;
        println!("💾 Data written to {}", csv.display());
    }

    Ok(())
}
