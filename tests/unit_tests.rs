//! Unit tests for the header reader, table writer, colormaps and error types.

use lmp_ave_post::{
    aggregate::Profile,
    blocks::StepRange,
    colormap::Colormap,
    errors::{AvePostError, Result},
    header::read_fields,
    plot::AxisRange,
    report::{Reporter, Verbosity},
    table::{is_positional, render_profile, write_profile},
};
use ndarray::array;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn fields(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_error_types() {
    let io_err = AvePostError::IoError(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "missing",
    ));
    assert!(format!("{}", io_err).contains("I/O error"));

    let parse_err = AvePostError::ParseError {
        line: 7,
        message: "invalid numeric value 'x'".to_string(),
    };
    assert!(format!("{}", parse_err).contains("line 7"));

    let shape_err = AvePostError::RecordShapeChanged {
        step: 4200.0,
        expected: 10,
        found: 12,
    };
    let rendered = format!("{}", shape_err);
    assert!(rendered.contains("Entries number changed"));
    assert!(rendered.contains("4200.00"));

    let mismatch = AvePostError::RecordCountMismatch { pass1: 5, pass2: 4 };
    assert!(format!("{}", mismatch).contains("5 vs 4"));

    let generic = AvePostError::Generic("Test error".to_string());
    assert_eq!(format!("{}", generic), "Test error");
}

#[test]
fn test_verbosity_mapping() {
    assert_eq!(Verbosity::from_flag_count(0), Verbosity::Warn);
    assert_eq!(Verbosity::from_flag_count(1), Verbosity::Info);
    assert_eq!(Verbosity::from_flag_count(2), Verbosity::Debug);
    assert_eq!(Verbosity::from_flag_count(7), Verbosity::Debug);

    let reporter = Reporter::from_flag_count(1);
    assert_eq!(reporter.verbosity(), Verbosity::Info);

    // Emitting at every level must not panic.
    reporter.error("e");
    reporter.warn("w");
    reporter.info("i");
    reporter.debug("d");
}

#[test]
fn test_step_range() {
    let unbounded = StepRange::unbounded();
    assert!(!unbounded.is_below(0.0));
    assert!(!unbounded.is_past_end(1e12));

    let range = StepRange::new(100, 300);
    assert!(range.is_below(99.0));
    assert!(!range.is_below(100.0));
    assert!(!range.is_past_end(299.0));
    assert!(range.is_past_end(300.0));
    assert!(range.is_past_end(301.0));

    // max == 0 leaves the upper end open even with a lower bound set.
    let lower_only = StepRange::new(50, 0);
    assert!(!lower_only.is_past_end(1e9));
}

#[test]
fn test_read_fields_standard() -> Result<()> {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("profile.ave");
    fs::write(
        &path,
        "# Chunk-averaged data for fix prof\n\
         # Timestep Number-of-chunks Total-count\n\
         # Chunk Coord1 Ncount vx\n\
         0 2\n",
    )?;

    let reporter = Reporter::default();
    let names = read_fields(&path, false, &reporter)?;
    assert_eq!(names, fields(&["Chunk", "Coord1", "Ncount", "vx"]));
    Ok(())
}

#[test]
fn test_read_fields_non_standard() -> Result<()> {
    // The file is never opened, so a nonexistent path must succeed.
    let reporter = Reporter::default();
    let names = read_fields(Path::new("/definitely/not/there.ave"), true, &reporter)?;
    assert_eq!(names, vec![String::new()]);
    Ok(())
}

#[test]
fn test_read_fields_missing_file() {
    let reporter = Reporter::default();
    let result = read_fields(Path::new("/definitely/not/there.ave"), false, &reporter);
    match result {
        Err(AvePostError::IoError(_)) => {}
        other => panic!("Expected IoError, got {:?}", other),
    }
}

#[test]
fn test_read_fields_truncated_header() -> Result<()> {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("short.ave");
    fs::write(&path, "# only line\n")?;

    let reporter = Reporter::default();
    let result = read_fields(&path, false, &reporter);
    match result {
        Err(AvePostError::ParseError { line, .. }) => assert_eq!(line, 2),
        other => panic!("Expected ParseError, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_positional_fields() {
    for name in ["Chunk", "OrigID", "Coord1", "Coord2", "Coord3"] {
        assert!(is_positional(name));
    }
    assert!(!is_positional("vx"));
    assert!(!is_positional("Ncount"));
}

#[test]
fn test_table_rendering() {
    let names = fields(&["Chunk", "Coord1", "density"]);
    let profile = Profile {
        mean: array![[1.0, 0.25, 2.5], [2.0, 0.75, 3.5]],
        sem: array![[0.0, 0.125, 0.5], [0.0, 0.25, 1.5]],
        records: 4,
    };

    let table = render_profile(&names, &profile);
    let lines: Vec<&str> = table.split('\n').collect();
    // Header + two rows + trailing empty fragment after the final newline.
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[3], "");

    let expected_header = format!(
        "# {:^17} {:^17} {:^17} ",
        "Chunk", "Coord1", "density"
    );
    assert_eq!(lines[0], expected_header);

    // Chunk index is 1-based, centered, with no error term; the coordinate
    // carries a literal zero error regardless of its sem entry.
    let expected_row0 = format!(
        "{:^17} {:>8.3} {:>8.3} {:>8.3} {:>8.3} ",
        1, 0.25, 0.0, 2.5, 0.5
    );
    assert_eq!(lines[1], expected_row0);

    let expected_row1 = format!(
        "{:^17} {:>8.3} {:>8.3} {:>8.3} {:>8.3} ",
        2, 0.75, 0.0, 3.5, 1.5
    );
    assert_eq!(lines[2], expected_row1);
}

#[test]
fn test_table_without_positional_fields() {
    let names = fields(&["v_a", "v_b"]);
    let profile = Profile {
        mean: array![[1.0, 2.0]],
        sem: array![[0.5, 0.25]],
        records: 2,
    };

    let table = render_profile(&names, &profile);
    let row = table.lines().nth(1).expect("one data row");
    assert_eq!(
        row,
        format!("{:>8.3} {:>8.3} {:>8.3} {:>8.3} ", 1.0, 0.5, 2.0, 0.25)
    );
}

#[test]
fn test_write_profile() -> Result<()> {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("output.mean");

    let names = fields(&["Chunk", "density"]);
    let profile = Profile {
        mean: array![[1.0, 2.5]],
        sem: array![[0.0, 0.5]],
        records: 3,
    };
    write_profile(&path, &names, &profile)?;

    let written = fs::read_to_string(&path)?;
    assert_eq!(written, render_profile(&names, &profile));

    // No temp file may be left behind in the output directory.
    let leftovers = fs::read_dir(dir.path())?.count();
    assert_eq!(leftovers, 1);
    Ok(())
}

#[test]
fn test_colormap_lookup() {
    assert!(Colormap::by_name("viridis").is_ok());
    assert!(Colormap::by_name("coolwarm").is_ok());
    assert!(Colormap::by_name("jet").is_ok());
    assert!(Colormap::by_name("magma_nope").is_err());
}

#[test]
fn test_colormap_sampling() -> Result<()> {
    let map = Colormap::by_name("coolwarm")?;
    assert_eq!(map.name(), "coolwarm");

    let low = map.sample(0.0);
    let high = map.sample(1.0);
    assert_eq!((low.0, low.1, low.2), (59, 76, 192));
    assert_eq!((high.0, high.1, high.2), (180, 4, 38));

    // Out-of-range inputs clamp instead of panicking.
    let below = map.sample(-3.0);
    assert_eq!((below.0, below.1, below.2), (59, 76, 192));

    // Degenerate normalization ranges fall back to the midpoint.
    let mid = map.color_for(5.0, 5.0, 5.0);
    assert_eq!((mid.0, mid.1, mid.2), (221, 221, 221));
    Ok(())
}

#[test]
fn test_axis_range_parse() {
    let range = AxisRange::parse("1:2").expect("valid range");
    assert_eq!(range.lo, 1.0);
    assert_eq!(range.hi, 2.0);

    let negative = AxisRange::parse("-3:10").expect("negative lower bound");
    assert_eq!(negative.lo, -3.0);
    assert_eq!(negative.hi, 10.0);

    assert!(AxisRange::parse("5").is_err());
    assert!(AxisRange::parse("a:b").is_err());
    assert!(AxisRange::parse("2:1").is_err());
}
