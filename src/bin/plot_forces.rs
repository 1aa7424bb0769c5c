//! Plots LAMMPS tabulated force files (pair_style table) as energy and
//! force line charts, or extracts each section to its own file.

use clap::Parser;
use lmp_ave_post::errors::Result;
use lmp_ave_post::plot::{plot_force_tables, AxisRange, ForcePlotOptions};
use lmp_ave_post::report::Reporter;
use lmp_ave_post::series::{extract_force_table, read_force_tables};
use std::path::{Path, PathBuf};

/// Plots Lammps tabulated forces
#[derive(Parser, Debug)]
#[command(name = "plot-forces", version, about = "Plots LAMMPS tabulated forces")]
struct Args {
    /// File to read
    #[arg(short, long)]
    file: PathBuf,

    /// Output image
    #[arg(short, long, default_value = "forces.png")]
    output: PathBuf,

    /// xrange as lo:hi (for negative values: -x=-3:10)
    #[arg(short = 'x', value_parser = AxisRange::parse)]
    xrange: Option<AxisRange>,

    /// yrange as lo:hi, applied to the energy chart
    #[arg(short = 'y', value_parser = AxisRange::parse)]
    yrange: Option<AxisRange>,

    /// Temperature for kBT-scaled energies [default none]
    #[arg(short = 't', long)]
    temp: Option<f64>,

    /// Extract the forces in separate files instead of plotting
    #[arg(short, long)]
    extract: bool,

    /// Overlay energies rebuilt from the tabulated forces
    #[arg(long)]
    rebuilt: bool,

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
    let tables = read_force_tables(&args.file, reporter)?;
    reporter.info(format!("Read {} table section(s)", tables.len()));

    if args.extract {
        let dir = match args.file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        for table in &tables {
            extract_force_table(dir, table)?;
        }
        println!("✅ Extracted {} table(s) next to the input", tables.len());
        return Ok(());
    }

    let options = ForcePlotOptions {
        xrange: args.xrange,
        yrange: args.yrange,
        temperature: args.temp,
        rebuilt_energy: args.rebuilt,
    };
    plot_force_tables(&tables, &options, &args.output)?;
    println!("✅ Saved plot to {}", args.output.display());

    Ok(())
}
