//! Entry point for the averaging tool.
//! Handles CLI parsing, field extraction, the two-pass aggregation and the
//! table output, exiting with status 1 on any failure.

use clap::Parser;
use lmp_ave_post::aggregate::average_file;
use lmp_ave_post::blocks::StepRange;
use lmp_ave_post::cli::Args;
use lmp_ave_post::errors::Result;
use lmp_ave_post::header::read_fields;
use lmp_ave_post::report::Reporter;
use lmp_ave_post::table::write_profile;

fn main() {
    let args = Args::parse();
    let reporter = Reporter::from_flag_count(args.verbose);

    if let Err(error) = run(&args, &reporter) {
        reporter.error(error);
        std::process::exit(1);
    }
}

fn run(args: &Args, reporter: &Reporter) -> Result<()> {
    let fields = read_fields(&args.file, args.non_standard, reporter)?;
    let range = StepRange::new(args.smin, args.smax);

    let profile = average_file(&args.file, &fields, range, reporter)?;

    reporter.info("About to write output file.");
    write_profile(&args.output, &fields, &profile)?;
    println!(
        "✅ Averaged {} records into {}",
        profile.records,
        args.output.display()
    );
    reporter.info("DONE!");

    Ok(())
}
