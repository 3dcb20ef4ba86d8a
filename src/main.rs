use anyhow::Context;
use clap::{Parser, Subcommand};
use gcodesplit::commands::{
    blocks_report, load_config, load_program, shift_program, split_program, ProgramStats,
};
use gcodesplit::{init_logging, Point, VERSION};
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Parser)]
#[command(
    name = "gcodesplit",
    version = VERSION,
    long_version = LONG_VERSION,
    about = "Split, segment and inspect G-code toolpath programs"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Split a program along a vertical plane into left and right programs
    Split {
        input: PathBuf,
        /// Plane origin X
        #[arg(long, allow_negative_numbers = true)]
        x: Option<f64>,
        /// Plane origin Y
        #[arg(long, allow_negative_numbers = true)]
        y: Option<f64>,
        /// Plane rotation in degrees
        #[arg(long, allow_negative_numbers = true)]
        angle: Option<f64>,
        /// Retract height for re-approaches and the final retract
        #[arg(long)]
        z_clearance: Option<f64>,
        /// Output path for the left half
        #[arg(long)]
        left: PathBuf,
        /// Output path for the right half
        #[arg(long)]
        right: PathBuf,
        /// Config file (.toml or .json)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Summarize the blocks of a program
    Blocks {
        input: PathBuf,
        /// Print the program bracketed with block markers instead
        #[arg(long)]
        pretty: bool,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Segment counts, path lengths and bounds
    Stats {
        input: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Translate every absolute coordinate
    Shift {
        input: PathBuf,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        dx: f64,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        dy: f64,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        dz: f64,
        #[arg(short, long)]
        output: PathBuf,
    },
}

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

fn write_output(path: &Path, text: &str) -> anyhow::Result<()> {
    std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    match cli.command {
        Command::Split {
            input,
            x,
            y,
            angle,
            z_clearance,
            left,
            right,
            config,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(x) = x {
                config.split.origin_x = x;
            }
            if let Some(y) = y {
                config.split.origin_y = y;
            }
            if let Some(angle) = angle {
                config.split.angle_degrees = angle;
            }
            if let Some(z) = z_clearance {
                config.split.z_clearance = z;
            }

            let program = load_program(&input)?;
            let output = split_program(&program, &config)?;
            for diagnostic in &output.diagnostics {
                warn!("{}", diagnostic);
            }
            write_output(&left, &output.left)?;
            write_output(&right, &output.right)?;
            println!(
                "{} -> {} / {} ({} diagnostics)",
                input.display(),
                left.display(),
                right.display(),
                output.diagnostics.len()
            );
        }
        Command::Blocks {
            input,
            pretty,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let program = load_program(&input)?;
            print!("{}", blocks_report(&program, &config.render, pretty)?);
        }
        Command::Stats {
            input,
            json,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let program = load_program(&input)?;
            let stats = ProgramStats::of(&program, &config.render);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print!("{}", stats);
            }
        }
        Command::Shift {
            input,
            dx,
            dy,
            dz,
            output,
        } => {
            let program = load_program(&input)?;
            let text = shift_program(&program, Point::new(dx, dy, dz))?;
            write_output(&output, &text)?;
        }
    }

    Ok(())
}
