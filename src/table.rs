//! Fixed-width text table output
//!
//! Renders the aggregated matrices as an annotated table: a comment header
//! with each field name centered in 17 columns, then one line per row with
//! `mean sem` pairs. Positional fields (chunk index, origin id, spatial
//! coordinates) carry no meaningful sampling error: the chunk index renders
//! as the 1-based row number with no error term, the others with a literal
//! zero error. The file is written through a temp file and persisted by
//! rename so an interrupted run never leaves a partial table behind.

use crate::aggregate::Profile;
use crate::errors::{AvePostError, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Output columns that are structural coordinates, not sampled quantities.
const POSITIONAL_FIELDS: [&str; 5] = ["Chunk", "OrigID", "Coord1", "Coord2", "Coord3"];

/// Column width for centered header names and the chunk index.
const NAME_WIDTH: usize = 17;

/// True for fields whose error column is always a literal zero.
pub fn is_positional(field: &str) -> bool {
    POSITIONAL_FIELDS.contains(&field)
}

/// Renders the whole table as a string.
pub fn render_profile(fields: &[String], profile: &Profile) -> String {
    let mut out = String::new();

    let mut header: Vec<String> = Vec::with_capacity(fields.len() + 2);
    header.push("#".to_string());
    for field in fields {
        header.push(format!("{:^width$}", field, width = NAME_WIDTH));
    }
    header.push("\n".to_string());
    out.push_str(&header.join(" "));

    for i in 0..profile.mean.nrows() {
        let mut elems: Vec<String> = Vec::with_capacity(fields.len() + 1);
        for (j, field) in fields.iter().enumerate() {
            if is_positional(field) {
                if field == "Chunk" {
                    elems.push(format!("{:^width$}", i + 1, width = NAME_WIDTH));
                } else {
                    elems.push(format!("{:>8.3} {:>8.3}", profile.mean[[i, j]], 0.0));
                }
            } else {
                elems.push(format!(
                    "{:>8.3} {:>8.3}",
                    profile.mean[[i, j]],
                    profile.sem[[i, j]]
                ));
            }
        }
        elems.push("\n".to_string());
        out.push_str(&elems.join(" "));
    }

    out
}

/// Writes the rendered table to `path`, all-or-nothing.
pub fn write_profile(path: &Path, fields: &[String], profile: &Profile) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(render_profile(fields, profile).as_bytes())?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| AvePostError::IoError(e.error))?;
    Ok(())
}
