//! Defines command-line interface options using `clap` for the averaging tool.

use clap::Parser;
use std::path::PathBuf;

/// A CLI tool for averaging LAMMPS `fix ave/*` output files
#[derive(Parser, Debug)]
#[command(
    name = "lmp-ave-post",
    version,
    about = "Computes time averages and standard errors from LAMMPS averaging output"
)]
pub struct Args {
    /// File to process
    #[arg(short, long)]
    pub file: PathBuf,

    /// Output file name
    #[arg(short, long, default_value = "output.mean")]
    pub output: PathBuf,

    /// Non standard LAMMPS headers
    #[arg(short, long)]
    pub non_standard: bool,

    /// Lowest timestep to retain (inclusive, 0 = unbounded)
    #[arg(long, default_value_t = 0)]
    pub smin: u64,

    /// First timestep to stop at (exclusive, 0 = unbounded)
    #[arg(long, default_value_t = 0)]
    pub smax: u64,

    /// Display more information (repeat for debug output)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
