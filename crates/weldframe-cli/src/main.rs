//! weldframe CLI - table frame generator
//!
//! Loads a parameter file, builds the frame solid and prints its bill of
//! materials.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use weldframe::{Assembly, BomReport, DimensionSet, FrameParams};

#[derive(Parser)]
#[command(name = "weldframe")]
#[command(about = "Parametric welded table frame generator", long_about = None)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the solid and write it as an IR document
    Build {
        /// Parameter file (defaults when omitted)
        params: Option<PathBuf>,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Emit one root per subassembly instead of the composed solid
        #[arg(long)]
        scene: bool,
    },
    /// Print the bill of materials
    Bom {
        /// Parameter file (defaults when omitted)
        params: Option<PathBuf>,
        /// Report format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Validate parameters and print the resolved dimensions
    Check {
        /// Parameter file (defaults when omitted)
        params: Option<PathBuf>,
    },
    /// Print the default parameter file
    Defaults,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Build {
            params,
            output,
            scene,
        } => build(params.as_deref(), output.as_deref(), scene),
        Commands::Bom { params, format } => bom(params.as_deref(), format),
        Commands::Check { params } => check(params.as_deref()),
        Commands::Defaults => defaults(),
    }
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_params(path: Option<&Path>) -> Result<FrameParams> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading parameters");
            FrameParams::load(path)
                .with_context(|| format!("failed to load parameters from {}", path.display()))
        }
        None => Ok(FrameParams::default()),
    }
}

fn build(params: Option<&Path>, output: Option<&Path>, scene: bool) -> Result<()> {
    let params = load_params(params)?;
    let assembly = Assembly::from_params(&params).context("invalid frame parameters")?;
    let doc = if scene {
        assembly.to_scene_document()
    } else {
        assembly.to_document()
    };
    doc.validate().context("generated document is inconsistent")?;
    let json = doc.to_json()?;

    match output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(nodes = doc.nodes.len(), roots = doc.roots.len(), "wrote document");
            println!("Wrote {} ({} nodes)", path.display(), doc.nodes.len());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn bom(params: Option<&Path>, format: Format) -> Result<()> {
    let params = load_params(params)?;
    let report = BomReport::from_params(&params).context("invalid frame parameters")?;
    match format {
        Format::Text => {
            for line in report.lines() {
                println!("{line}");
            }
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn check(params: Option<&Path>) -> Result<()> {
    let params = load_params(params)?;
    let dims = DimensionSet::resolve(&params).context("invalid frame parameters")?;
    let u = dims.units.suffix();

    println!("Parameters OK");
    println!("  Units: {}", dims.units);
    println!("  Outer: {:.3} x {:.3} {u}", dims.outer_x, dims.outer_y);
    println!("  Inner: {:.3} x {:.3} {u}", dims.inner_x, dims.inner_y);
    println!(
        "  Tube: {:.3} {u} square, {:.3} {u} wall",
        dims.tube_od, dims.wall
    );
    match dims.leg_length {
        Some(length) => println!("  Legs: 4 x {length:.3} {u}"),
        None => println!("  Legs: none"),
    }
    match (
        dims.stretcher_length(weldframe::Axis::X),
        dims.stretcher_length(weldframe::Axis::Y),
        dims.stretcher_center_z(),
    ) {
        (Some(x), Some(y), Some(z)) => {
            println!("  Stretchers: 2 x {x:.3} {u}, 2 x {y:.3} {u}, center at z = {z:.3} {u}")
        }
        _ => println!("  Stretchers: none"),
    }
    match dims.tabs {
        Some(t) => println!(
            "  Tabs: 8, top at z = {:.3} {u}{}",
            dims.tab_top_z(),
            if t.hole.is_some() { ", drilled" } else { "" }
        ),
        None => println!("  Tabs: none"),
    }
    Ok(())
}

fn defaults() -> Result<()> {
    print!("{}", FrameParams::default().to_toml_string()?);
    Ok(())
}
