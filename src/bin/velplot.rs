//! Quiver plot of a 2D velocity-bin averaging file: one arrow per occupied
//! bin, scaled by the mean velocity and colored by the mean temperature.

use clap::Parser;
use lmp_ave_post::colormap::Colormap;
use lmp_ave_post::errors::Result;
use lmp_ave_post::plot::plot_quiver;
use lmp_ave_post::report::Reporter;
use lmp_ave_post::series::read_velocity_bins;
use std::path::PathBuf;

/// Velocity-field quiver plot from 2D ave/chunk output
#[derive(Parser, Debug)]
#[command(name = "velplot", version, about = "Quiver plot of 2D velocity bins")]
struct Args {
    /// File to read
    #[arg(short, long, default_value = "vel.bin.ave")]
    file: PathBuf,

    /// Box length along x (bin coordinates are scaled by it)
    #[arg(long, default_value_t = 1.0)]
    lx: f64,

    /// Box length along y
    #[arg(long, default_value_t = 1.0)]
    ly: f64,

    /// The name of the colormap to use
    #[arg(short = 'c', long = "cm", default_value = "jet")]
    cmap: String,

    /// Output image
    #[arg(short, long, default_value = "velocity.png")]
    output: PathBuf,

    /// Display more information (repeat for debug output)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    let reporter = Reporter::from_flag_count(args.verbose);

    if let Err(error) = run(&args, &reporter) {
        reporter.error(error);
        std::process::exit(1);
    }
}

fn run(args: &Args, reporter: &Reporter) -> Result<()> {
    let colormap = Colormap::by_name(&args.cmap)?;
    let bins = read_velocity_bins(&args.file, reporter)?;
    reporter.info(format!("Averaged {} bins", bins.len()));

    plot_quiver(&bins, args.lx, args.ly, &colormap, &args.output)?;
    println!("✅ Saved quiver plot to {}", args.output.display());

    Ok(())
}
