//! minbox CLI - principal-axis bounding boxes for STL solids
//!
//! Reads a closed mesh, finds its principal-axis oriented bounding box and
//! reports the box dimensions and axes.

use anyhow::Result;
use clap::{Parser, Subcommand};
use minbox_kernel::{
    minimum_bounding_box, physical_properties, present, CalculationAccuracy, MeshKernel,
};
use std::path::{Path, PathBuf};
use tracing::{debug, Level};

mod config;
mod presenter;
mod report;
mod stl;

use config::CliConfig;
use presenter::FilePresenter;
use report::{LengthUnit, Report, UnitsFormat};

#[derive(Parser)]
#[command(name = "minbox")]
#[command(about = "Principal-axis oriented bounding boxes for solid bodies", long_about = None)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Measure the oriented bounding box of an STL solid
    Measure {
        /// Input STL file (binary or ASCII)
        input: PathBuf,
        /// TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Mass-property accuracy
        #[arg(short, long, value_enum)]
        accuracy: Option<AccuracyArg>,
        /// Unit the STL coordinates are in
        #[arg(long, value_enum)]
        units: Option<LengthUnit>,
        /// Unit to report in
        #[arg(long, value_enum)]
        display_units: Option<LengthUnit>,
        /// Write a preview sidecar next to the input
        #[arg(long)]
        preview: bool,
        /// Keep the preview sidecar after exiting
        #[arg(long)]
        keep_preview: bool,
        /// Write the box as an STL solid
        #[arg(long)]
        solid: bool,
        /// Where to write the box solid (default: <input>.box.stl)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,
    },
    /// Display mesh and mass information about an STL file
    Info {
        /// Input STL file
        file: PathBuf,
    },
}

/// Command-line names for [`CalculationAccuracy`].
#[derive(Clone, Copy, clap::ValueEnum)]
enum AccuracyArg {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl From<AccuracyArg> for CalculationAccuracy {
    fn from(arg: AccuracyArg) -> Self {
        match arg {
            AccuracyArg::Low => Self::Low,
            AccuracyArg::Medium => Self::Medium,
            AccuracyArg::High => Self::High,
            AccuracyArg::VeryHigh => Self::VeryHigh,
        }
    }
}

struct MeasureArgs {
    input: PathBuf,
    config: Option<PathBuf>,
    accuracy: Option<AccuracyArg>,
    units: Option<LengthUnit>,
    display_units: Option<LengthUnit>,
    preview: bool,
    keep_preview: bool,
    solid: bool,
    output: Option<PathBuf>,
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Measure {
            input,
            config,
            accuracy,
            units,
            display_units,
            preview,
            keep_preview,
            solid,
            output,
            json,
        } => measure(MeasureArgs {
            input,
            config,
            accuracy,
            units,
            display_units,
            preview,
            keep_preview,
            solid,
            output,
            json,
        }),
        Commands::Info { file } => show_info(&file),
    }
}

fn sibling(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("body");
    input.with_file_name(format!("{stem}{suffix}"))
}

fn measure(args: MeasureArgs) -> Result<()> {
    let mut cfg = match &args.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    if let Some(accuracy) = args.accuracy {
        cfg.options.accuracy = accuracy.into();
    }
    if let Some(units) = args.units {
        cfg.units = units;
    }
    if let Some(display) = args.display_units {
        cfg.display_units = Some(display);
    }
    cfg.options.show_preview |= args.preview;
    cfg.options.create_solid |= args.solid || args.output.is_some();
    debug!(?cfg, "effective config");

    let body = stl::read_stl(&args.input)?;
    let result = minimum_bounding_box(&MeshKernel, &body, &cfg.options)?;

    let mut presenter = FilePresenter {
        preview_path: sibling(&args.input, ".preview.json"),
        solid_path: args
            .output
            .clone()
            .unwrap_or_else(|| sibling(&args.input, ".box.stl")),
        keep_preview: args.keep_preview,
    };
    // Held until the report is out, then dropped
    let preview = present(&MeshKernel, &mut presenter, &result, &cfg.options)?;

    let units = UnitsFormat {
        model: cfg.units,
        display: cfg.display_units.unwrap_or(cfg.units),
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&Report::new(&result, &units))?);
    } else {
        print!("{}", report::message(&result, &units));
    }
    if let Some(preview) = &preview {
        eprintln!("Preview at {}", preview.path().display());
    }
    if cfg.options.create_solid {
        eprintln!("Box solid written to {}", presenter.solid_path.display());
    }
    drop(preview);

    Ok(())
}

fn show_info(path: &Path) -> Result<()> {
    let mesh = stl::read_stl(path)?;
    let aabb = mesh.aabb();
    println!("File: {}", path.display());
    println!("Triangles: {}", mesh.num_triangles());
    println!("Vertices: {}", mesh.num_vertices());
    println!(
        "Bounds: {:.3} x {:.3} x {:.3}",
        aabb.length(),
        aabb.width(),
        aabb.height()
    );
    match physical_properties(&mesh, CalculationAccuracy::default()) {
        Ok(props) => {
            let c = props.center_of_mass;
            println!("Volume: {:.3}", props.volume);
            println!("Center of mass: {:.3}, {:.3}, {:.3}", c.x, c.y, c.z);
        }
        Err(e) => println!("Mass properties unavailable: {e}"),
    }
    Ok(())
}
