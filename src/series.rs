//! Readers for the related record formats consumed by the plot front-ends
//!
//! Three formats share the averaging files' general shape but are consumed
//! differently: tabulated pair-style force tables (sections of r / energy /
//! force points), 2D velocity-bin grids (per-bin running means for quiver
//! plots) and 3D chunk grids (columnwise means for voxel plots). None of
//! these reuse the two-pass aggregator; they are one-pass consumers.

use crate::errors::{AvePostError, Result};
use crate::report::Reporter;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

// ---------------------------------------------------------------------------
// Tabulated force files (pair_style table)
// ---------------------------------------------------------------------------

/// One keyword section of a tabulated force file.
#[derive(Debug, Clone)]
pub struct ForceTable {
    pub keyword: String,
    pub r: Vec<f64>,
    pub energy: Vec<f64>,
    pub force: Vec<f64>,
}

impl ForceTable {
    pub fn len(&self) -> usize {
        self.r.len()
    }

    pub fn is_empty(&self) -> bool {
        self.r.is_empty()
    }
}

/// Reads every section of a tabulated force file.
///
/// A section is a keyword line (inline `#` comments stripped), an info line
/// whose second token is the point count (`N <npoints> ...`), a separator
/// line, then `npoints` rows of `index r energy force`.
pub fn read_force_tables(path: &Path, reporter: &Reporter) -> Result<Vec<ForceTable>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines().enumerate();
    let mut tables = Vec::new();

    loop {
        // Find the next keyword line, skipping blanks and pure comments.
        let keyword = loop {
            match lines.next() {
                Some((_, line)) => {
                    let line = line?;
                    let bare = strip_comment(&line);
                    if !bare.is_empty() {
                        break bare.to_string();
                    }
                }
                None => return Ok(tables),
            }
        };
        reporter.info(format!("Found {} token", keyword));

        let (info_no, info_line) = lines.next().ok_or_else(|| AvePostError::ParseError {
            line: 0,
            message: format!("section '{}' has no info line", keyword),
        })?;
        let info_line = info_line?;
        let npoints_tok = info_line
            .split_whitespace()
            .nth(1)
            .ok_or_else(|| AvePostError::ParseError {
                line: info_no + 1,
                message: "info line needs an N <npoints> entry".to_string(),
            })?;
        let npoints: usize = npoints_tok.parse().map_err(|_| AvePostError::ParseError {
            line: info_no + 1,
            message: format!("invalid point count '{}'", npoints_tok),
        })?;

        // Separator line between the info line and the data.
        lines.next();

        let mut table = ForceTable {
            keyword,
            r: Vec::with_capacity(npoints),
            energy: Vec::with_capacity(npoints),
            force: Vec::with_capacity(npoints),
        };
        for _ in 0..npoints {
            let (data_no, data_line) = lines.next().ok_or_else(|| AvePostError::ParseError {
                line: 0,
                message: format!("section '{}' ended before {} points", table.keyword, npoints),
            })?;
            let data_line = data_line?;
            let values: Vec<f64> = data_line
                .split_whitespace()
                .map(str::parse)
                .collect::<std::result::Result<_, _>>()
                .map_err(|_| AvePostError::ParseError {
                    line: data_no + 1,
                    message: format!("invalid table row '{}'", data_line),
                })?;
            if values.len() < 4 {
                return Err(AvePostError::ParseError {
                    line: data_no + 1,
                    message: "table row needs index, r, energy and force".to_string(),
                });
            }
            table.r.push(values[1]);
            table.energy.push(values[2]);
            table.force.push(values[3]);
        }
        tables.push(table);

        // Trailing separator after a section, if any.
        if lines.next().is_none() {
            return Ok(tables);
        }
    }
}

/// Rebuilds the energy profile from the tabulated force by backward
/// integration, shifted so the last point is zero.
pub fn rebuild_energy(table: &ForceTable) -> Vec<f64> {
    let mut energy = vec![0.0; table.len()];
    for i in 1..table.len() {
        let dr = table.r[i] - table.r[i - 1];
        energy[i] = energy[i - 1] - dr * table.force[i - 1];
    }
    let offset = energy.last().copied().unwrap_or(0.0);
    for e in &mut energy {
        *e -= offset;
    }
    energy
}

/// Writes one table section to its own `<keyword>.table` file next to `dir`.
pub fn extract_force_table(dir: &Path, table: &ForceTable) -> Result<()> {
    let path = dir.join(format!("{}.table", table.keyword));
    let mut out = BufWriter::new(File::create(&path)?);
    writeln!(out, "# r energy force")?;
    for i in 0..table.len() {
        writeln!(out, "{} {} {}", table.r[i], table.energy[i], table.force[i])?;
    }
    out.flush()?;
    Ok(())
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => line[..pos].trim(),
        None => line.trim(),
    }
}

// ---------------------------------------------------------------------------
// 2D velocity-bin grids (ave/chunk over a 2D binning)
// ---------------------------------------------------------------------------

/// Per-bin running means of a 2D velocity grid.
#[derive(Debug, Clone, Default)]
pub struct VelocityBin {
    pub x: f64,
    pub y: f64,
    pub atoms: f64,
    pub vx: f64,
    pub vy: f64,
    pub temp: f64,
}

/// Reads a 2D velocity-bin file and averages each bin over every record.
///
/// Rows are `bin x y ncount vx vy temp` with a 1-based bin index; the bin
/// coordinates are captured from the first record that sets them.
pub fn read_velocity_bins(path: &Path, reporter: &Reporter) -> Result<Vec<VelocityBin>> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut line = String::new();

    // Three comment lines, then the first record header.
    for _ in 0..3 {
        line.clear();
        reader.read_line(&mut line)?;
    }
    line.clear();
    reader.read_line(&mut line)?;
    let nbins_tok = line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| AvePostError::ParseError {
            line: 4,
            message: "record header needs a timestep and a bin count".to_string(),
        })?;
    let nbins: usize = nbins_tok
        .parse::<f64>()
        .map_err(|_| AvePostError::ParseError {
            line: 4,
            message: format!("invalid bin count '{}'", nbins_tok),
        })? as usize;

    let mut bins = vec![VelocityBin::default(); nbins];
    let mut records = 0usize;
    loop {
        // A record truncated by EOF is discarded rather than averaged in.
        let mut record = vec![VelocityBin::default(); nbins];
        let mut complete = true;
        for _ in 0..nbins {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                complete = false;
                break;
            }
            let values: Vec<f64> = line
                .split_whitespace()
                .map(|tok| tok.parse().unwrap_or(f64::NAN))
                .collect();
            if values.len() < 7 {
                continue;
            }
            let index = values[0] as usize;
            if index == 0 || index > nbins {
                continue;
            }
            let bin = &mut record[index - 1];
            bin.x = values[1];
            bin.y = values[2];
            bin.atoms += values[3];
            bin.vx += values[4];
            bin.vy += values[5];
            bin.temp += values[6];
        }
        if !complete {
            break;
        }
        records += 1;
        for (bin, sample) in bins.iter_mut().zip(&record) {
            bin.atoms += sample.atoms;
            bin.vx += sample.vx;
            bin.vy += sample.vy;
            bin.temp += sample.temp;
            if bin.x == 0.0 {
                bin.x = sample.x;
            }
            if bin.y == 0.0 {
                bin.y = sample.y;
            }
        }
        line.clear();
        if reader.read_line(&mut line)? == 0 || line.trim().is_empty() {
            break;
        }
    }
    reporter.debug(format!("Averaged {} bins over {} records", nbins, records));

    if records == 0 {
        return Err(AvePostError::NoRecords);
    }
    for bin in &mut bins {
        bin.atoms /= records as f64;
        bin.vx /= records as f64;
        bin.vy /= records as f64;
        bin.temp /= records as f64;
    }
    Ok(bins)
}

// ---------------------------------------------------------------------------
// 3D chunk grids (ave/chunk over 3D bins)
// ---------------------------------------------------------------------------

/// Columnwise means of a 3D chunk-grid file, keyed by the header field list.
#[derive(Debug, Clone)]
pub struct ChunkGrid {
    pub fields: Vec<String>,
    pub columns: Vec<Vec<f64>>,
    pub records: usize,
}

impl ChunkGrid {
    /// The averaged column for a named field.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.fields
            .iter()
            .position(|f| f == name)
            .map(|i| self.columns[i].as_slice())
    }

    /// Grid dimensions: the unique-value count of each coordinate column
    /// present, in `Coord1`..`Coord3` order.
    pub fn grid_dims(&self) -> Vec<usize> {
        ["Coord1", "Coord2", "Coord3"]
            .into_iter()
            .filter_map(|name| self.column(name).map(count_unique))
            .collect()
    }

    /// The data fields past the chunk index, coordinates and atom count.
    pub fn value_fields(&self) -> &[String] {
        let to_skip = (self.grid_dims().len() + 2).min(self.fields.len());
        &self.fields[to_skip..]
    }
}

/// Reads a 3D chunk-grid file and averages every column over all records.
pub fn read_chunk_grid(path: &Path, reporter: &Reporter) -> Result<ChunkGrid> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut line = String::new();

    // Two junk lines, then the field names behind the comment marker.
    for _ in 0..2 {
        line.clear();
        reader.read_line(&mut line)?;
    }
    line.clear();
    reader.read_line(&mut line)?;
    let fields: Vec<String> = line
        .trim_start_matches('#')
        .split_whitespace()
        .map(str::to_string)
        .collect();
    if fields.is_empty() {
        return Err(AvePostError::ParseError {
            line: 3,
            message: "no field names found in the header".to_string(),
        });
    }

    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); fields.len()];
    let mut reference_rows: Option<usize> = None;
    let mut records = 0usize;
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 || line.trim().is_empty() {
            break;
        }
        let mut tokens = line.split_whitespace();
        let (step_tok, count_tok) = match (tokens.next(), tokens.next()) {
            (Some(step), Some(count)) => (step, count),
            _ => {
                return Err(AvePostError::ParseError {
                    line: 0,
                    message: "record header needs a timestep and a row count".to_string(),
                });
            }
        };
        let step: f64 = step_tok.parse().map_err(|_| AvePostError::ParseError {
            line: 0,
            message: format!("invalid timestep '{}'", step_tok),
        })?;
        let nrows = count_tok
            .parse::<f64>()
            .map_err(|_| AvePostError::ParseError {
                line: 0,
                message: format!("invalid row count '{}'", count_tok),
            })? as usize;
        match reference_rows {
            None => reference_rows = Some(nrows),
            Some(reference) if reference != nrows => {
                return Err(AvePostError::RecordShapeChanged {
                    step,
                    expected: reference,
                    found: nrows,
                });
            }
            Some(_) => {}
        }

        for row in 0..nrows {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                return Err(AvePostError::ParseError {
                    line: 0,
                    message: "file ended inside a record".to_string(),
                });
            }
            for (col, tok) in line.split_whitespace().take(fields.len()).enumerate() {
                let value: f64 = tok.parse().map_err(|_| AvePostError::ParseError {
                    line: 0,
                    message: format!("invalid numeric value '{}'", tok),
                })?;
                if records == 0 {
                    columns[col].push(value);
                } else {
                    columns[col][row] += value;
                }
            }
        }
        records += 1;
    }
    reporter.debug(format!(
        "Averaged {} columns over {} records",
        fields.len(),
        records
    ));

    if records == 0 {
        return Err(AvePostError::NoRecords);
    }
    for column in &mut columns {
        for value in column.iter_mut() {
            *value /= records as f64;
        }
    }

    Ok(ChunkGrid {
        fields,
        columns,
        records,
    })
}

fn count_unique(values: &[f64]) -> usize {
    let mut sorted: Vec<f64> = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted.dedup();
    sorted.len()
}
