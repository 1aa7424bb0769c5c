//! 3D voxel plots of a chunk-binned averaging file: one image per data
//! field, with sparsely occupied bins hidden.

use clap::Parser;
use lmp_ave_post::colormap::Colormap;
use lmp_ave_post::errors::Result;
use lmp_ave_post::plot::plot_voxels;
use lmp_ave_post::report::Reporter;
use lmp_ave_post::series::read_chunk_grid;
use std::path::PathBuf;

/// 3d plot from LAMMPS averaged bin output of ave/chunk
#[derive(Parser, Debug)]
#[command(name = "binplot", version, about = "3D voxel plots of chunk-binned output")]
struct Args {
    /// The file to be read
    #[arg(short, long, default_value = "bin.ave")]
    file: PathBuf,

    /// The name of the colormap to use
    #[arg(short = 'c', long = "cm", default_value = "coolwarm")]
    cmap: String,

    /// Average of atoms (Ncount) below which bins are not plotted
    #[arg(short = 't', long = "atom-threshold", default_value_t = 1.0)]
    threshold: f64,

    /// Output image prefix; each field goes to <prefix>_<field>.png
    #[arg(short, long, default_value = "voxels")]
    output: String,

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
    let grid = read_chunk_grid(&args.file, reporter)?;
    reporter.info(format!(
        "Grid dims {:?}, {} record(s)",
        grid.grid_dims(),
        grid.records
    ));

    let fields: Vec<String> = grid.value_fields().to_vec();
    for field in &fields {
        let path = PathBuf::from(format!("{}_{}.png", args.output, field));
        plot_voxels(&grid, field, args.threshold, &colormap, &path)?;
        println!("✅ Saved voxel plot to {}", path.display());
    }

    Ok(())
}
