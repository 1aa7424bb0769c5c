//! Field-name extraction from LAMMPS averaging file headers
//!
//! Standard `fix ave/*` output carries three comment lines; the third lists
//! the column names behind a `#` marker. Non-standard files keep their layout
//! out-of-band, so the caller gets a single empty placeholder instead.

use crate::errors::{AvePostError, Result};
use crate::report::Reporter;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads the ordered field-name list from the header of an averaging file.
///
/// In standard mode the first two lines are discarded and the third is split
/// on whitespace after stripping the leading comment marker. In non-standard
/// mode the file is not touched at all and a single empty name is returned.
pub fn read_fields(path: &Path, non_standard: bool, reporter: &Reporter) -> Result<Vec<String>> {
    if non_standard {
        let fields = vec![String::new()];
        reporter.debug(format!("{:?}", fields));
        return Ok(fields);
    }

    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let mut line = String::new();
    for line_no in 1..=3 {
        line.clear();
        let n = reader.read_line(&mut line)?;
        if n == 0 {
            return Err(AvePostError::ParseError {
                line: line_no,
                message: "file ended before the field-name header line".to_string(),
            });
        }
    }

    // Strip the single leading marker character, exactly like the header
    // convention writes it.
    let names = line.get(1..).unwrap_or("");
    let fields: Vec<String> = names.split_whitespace().map(str::to_string).collect();
    reporter.debug(format!("{:?}", fields));

    Ok(fields)
}
