//! Tests for the plot-input record formats: tabulated force files, 2D
//! velocity bins and 3D chunk grids.

use approx::assert_relative_eq;
use lmp_ave_post::{
    errors::{AvePostError, Result},
    report::Reporter,
    series::{
        extract_force_table, read_chunk_grid, read_force_tables, read_velocity_bins,
        rebuild_energy, ForceTable,
    },
};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_read_force_tables() -> Result<()> {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("pair.table");
    fs::write(
        &path,
        "# UNITS: real\n\
         \n\
         STAR_STAR\n\
         N 3 R 1.0 3.0\n\
         \n\
         1 1.0 5.0 2.0\n\
         2 2.0 3.0 1.0\n\
         3 3.0 0.0 0.5\n\
         \n\
         STAR_WALL # repulsive branch\n\
         N 2\n\
         \n\
         1 1.0 4.0 2.0\n\
         2 2.0 2.0 1.0\n",
    )?;

    let reporter = Reporter::default();
    let tables = read_force_tables(&path, &reporter)?;
    assert_eq!(tables.len(), 2);

    assert_eq!(tables[0].keyword, "STAR_STAR");
    assert_eq!(tables[0].len(), 3);
    assert_eq!(tables[0].r, vec![1.0, 2.0, 3.0]);
    assert_eq!(tables[0].energy, vec![5.0, 3.0, 0.0]);
    assert_eq!(tables[0].force, vec![2.0, 1.0, 0.5]);

    // Inline comments on the keyword line are stripped.
    assert_eq!(tables[1].keyword, "STAR_WALL");
    assert_eq!(tables[1].len(), 2);
    Ok(())
}

#[test]
fn test_read_force_tables_truncated_section() -> Result<()> {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.table");
    fs::write(&path, "ENTRY\nN 5\n\n1 1.0 2.0 3.0\n")?;

    let reporter = Reporter::default();
    let result = read_force_tables(&path, &reporter);
    assert!(matches!(result, Err(AvePostError::ParseError { .. })));
    Ok(())
}

#[test]
fn test_rebuild_energy() {
    let table = ForceTable {
        keyword: "ENTRY".to_string(),
        r: vec![1.0, 2.0, 3.0],
        energy: vec![0.0, 0.0, 0.0],
        force: vec![2.0, 1.0, 0.5],
    };

    // e[i] = e[i-1] - dr * f[i-1], shifted so the last point is zero.
    let energy = rebuild_energy(&table);
    assert_eq!(energy.len(), 3);
    assert_relative_eq!(energy[0], 3.0, epsilon = 1e-12);
    assert_relative_eq!(energy[1], 1.0, epsilon = 1e-12);
    assert_relative_eq!(energy[2], 0.0, epsilon = 1e-12);
}

#[test]
fn test_extract_force_table() -> Result<()> {
    let dir = tempdir().expect("Failed to create temp dir");
    let table = ForceTable {
        keyword: "STAR_STAR".to_string(),
        r: vec![1.0, 2.0],
        energy: vec![5.0, 3.0],
        force: vec![2.0, 1.0],
    };
    extract_force_table(dir.path(), &table)?;

    let written = fs::read_to_string(dir.path().join("STAR_STAR.table"))?;
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "# r energy force");
    assert_eq!(lines[1], "1 5 2");
    Ok(())
}

#[test]
fn test_read_velocity_bins() -> Result<()> {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("vel.bin.ave");
    fs::write(
        &path,
        "# Chunk-averaged data for fix vbins\n\
         # Timestep Number-of-chunks\n\
         # Chunk Coord1 Coord2 Ncount vx vy temp\n\
         0 2 24\n\
         1 0.25 0.5 10 1.0 0.5 1.5\n\
         2 0.75 0.5 14 -1.0 0.25 2.5\n\
         100 2 24\n\
         1 0.25 0.5 10 3.0 0.5 1.5\n\
         2 0.75 0.5 14 -3.0 0.75 3.5\n",
    )?;

    let reporter = Reporter::default();
    let bins = read_velocity_bins(&path, &reporter)?;
    assert_eq!(bins.len(), 2);

    assert_relative_eq!(bins[0].x, 0.25, epsilon = 1e-12);
    assert_relative_eq!(bins[0].y, 0.5, epsilon = 1e-12);
    assert_relative_eq!(bins[0].vx, 2.0, epsilon = 1e-12);
    assert_relative_eq!(bins[0].vy, 0.5, epsilon = 1e-12);
    assert_relative_eq!(bins[0].atoms, 10.0, epsilon = 1e-12);
    assert_relative_eq!(bins[0].temp, 1.5, epsilon = 1e-12);

    assert_relative_eq!(bins[1].vx, -2.0, epsilon = 1e-12);
    assert_relative_eq!(bins[1].vy, 0.5, epsilon = 1e-12);
    assert_relative_eq!(bins[1].temp, 3.0, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_read_chunk_grid() -> Result<()> {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("bin.ave");

    let mut text = String::from(
        "# Chunk-averaged data for fix stress\n\
         # Timestep Number-of-chunks Total-count\n\
         # Chunk Coord1 Coord2 Coord3 Ncount density\n",
    );
    // Two records over a 2x2x2 grid, densities 1.0 then 3.0 everywhere.
    for (step, density) in [(0, 1.0), (100, 3.0)] {
        text.push_str(&format!("{} 8 64\n", step));
        let mut chunk = 1;
        for x in 0..2 {
            for y in 0..2 {
                for z in 0..2 {
                    text.push_str(&format!(
                        "{} {}.25 {}.25 {}.25 5 {}\n",
                        chunk, x, y, z, density
                    ));
                    chunk += 1;
                }
            }
        }
    }
    fs::write(&path, text)?;

    let reporter = Reporter::default();
    let grid = read_chunk_grid(&path, &reporter)?;
    assert_eq!(grid.records, 2);
    assert_eq!(
        grid.fields,
        vec!["Chunk", "Coord1", "Coord2", "Coord3", "Ncount", "density"]
    );
    assert_eq!(grid.grid_dims(), vec![2, 2, 2]);
    assert_eq!(grid.value_fields().to_vec(), vec!["density".to_string()]);

    let density = grid.column("density").expect("density column");
    assert_eq!(density.len(), 8);
    for &value in density {
        assert_relative_eq!(value, 2.0, epsilon = 1e-12);
    }

    let ncount = grid.column("Ncount").expect("Ncount column");
    assert!(ncount.iter().all(|&n| n == 5.0));
    assert!(grid.column("missing").is_none());
    Ok(())
}

#[test]
fn test_read_chunk_grid_growing_record_is_rejected() -> Result<()> {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("grow.ave");
    fs::write(
        &path,
        "# Chunk-averaged data for fix stress\n\
         # Timestep Number-of-chunks Total-count\n\
         # Chunk Coord1 Ncount density\n\
         0 2 10\n\
         1 0.25 5 1.0\n\
         2 0.75 5 1.0\n\
         100 3 15\n\
         1 0.25 5 1.0\n\
         2 0.75 5 1.0\n\
         3 1.25 5 1.0\n",
    )?;

    let reporter = Reporter::default();
    let result = read_chunk_grid(&path, &reporter);
    assert!(matches!(
        result,
        Err(AvePostError::RecordShapeChanged {
            expected: 2,
            found: 3,
            ..
        })
    ));
    Ok(())
}

#[test]
fn test_read_chunk_grid_bad_record_header() -> Result<()> {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("badheader.ave");
    fs::write(
        &path,
        "# Chunk-averaged data for fix stress\n\
         # Timestep Number-of-chunks Total-count\n\
         # Chunk Coord1 Ncount density\n\
         0 oops\n\
         1 0.25 5 1.0\n",
    )?;

    let reporter = Reporter::default();
    let result = read_chunk_grid(&path, &reporter);
    assert!(matches!(result, Err(AvePostError::ParseError { .. })));
    Ok(())
}

#[test]
fn test_read_velocity_bins_discards_truncated_record() -> Result<()> {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("vel.bin.ave");
    // The second record ends mid-way; only the first one may contribute.
    fs::write(
        &path,
        "# Chunk-averaged data for fix vbins\n\
         # Timestep Number-of-chunks\n\
         # Chunk Coord1 Coord2 Ncount vx vy temp\n\
         0 2 24\n\
         1 0.25 0.5 10 1.0 0.5 1.5\n\
         2 0.75 0.5 14 -1.0 0.25 2.5\n\
         100 2 24\n\
         1 0.25 0.5 10 9.0 9.0 9.0\n",
    )?;

    let reporter = Reporter::default();
    let bins = read_velocity_bins(&path, &reporter)?;
    assert_eq!(bins.len(), 2);
    assert_relative_eq!(bins[0].vx, 1.0, epsilon = 1e-12);
    assert_relative_eq!(bins[0].temp, 1.5, epsilon = 1e-12);
    assert_relative_eq!(bins[1].vx, -1.0, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_read_chunk_grid_missing_file() {
    let reporter = Reporter::default();
    let result = read_chunk_grid(std::path::Path::new("/not/there/bin.ave"), &reporter);
    assert!(matches!(result, Err(AvePostError::IoError(_))));
}
