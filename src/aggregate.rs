//! Two-pass mean / standard-error aggregation
//!
//! Pass 1 accumulates per-row, per-field sums over every retained block and
//! divides by the retained count to get the mean matrix. Pass 2 rewinds the
//! same reader and accumulates squared deviations from that mean, then
//! divides and takes the square root: a population-style standard error of
//! the mean (no `n-1` correction).

use crate::blocks::{BlockReader, StepRange};
use crate::errors::{AvePostError, Result};
use crate::report::Reporter;
use ndarray::Array2;
use std::path::Path;

/// Aggregated profile for one averaging file.
#[derive(Debug, Clone)]
pub struct Profile {
    /// Per-row, per-field arithmetic mean over the retained blocks.
    pub mean: Array2<f64>,
    /// Per-row, per-field standard error of the mean.
    pub sem: Array2<f64>,
    /// Number of retained blocks both passes agreed on.
    pub records: usize,
}

/// Computes the time-averaged profile of an averaging file.
///
/// The block sequence is traversed twice over the same handle; both passes
/// must retain the same number of blocks or the run fails with
/// [`AvePostError::RecordCountMismatch`]. Zero retained blocks is an explicit
/// [`AvePostError::NoRecords`] error rather than a NaN-filled matrix.
pub fn average_file(
    path: &Path,
    fields: &[String],
    range: StepRange,
    reporter: &Reporter,
) -> Result<Profile> {
    let nfields = fields.len();
    let mut blocks = BlockReader::open(path, nfields, range, *reporter)?;

    // Pass 1: running per-cell sums.
    let mut mean: Option<Array2<f64>> = None;
    while let Some(block) = blocks.next_block()? {
        if !block.retained {
            continue;
        }
        match mean.as_mut() {
            Some(sum) => *sum += &block.rows,
            None => mean = Some(block.rows),
        }
    }
    let pass1 = blocks.retained_count();
    let mut mean = match mean {
        Some(sum) if pass1 > 0 => sum,
        _ => return Err(AvePostError::NoRecords),
    };
    mean /= pass1 as f64;
    reporter.debug(format!("Computes average over {:<10} records.", pass1));

    // Pass 2: squared deviations from the pass-1 mean.
    reporter.info("Computing sem. Rereading file.");
    blocks.rewind()?;
    let mut sem = Array2::<f64>::zeros(mean.raw_dim());
    while let Some(block) = blocks.next_block()? {
        if !block.retained {
            continue;
        }
        let deviation = &block.rows - &mean;
        sem += &(&deviation * &deviation);
    }
    let pass2 = blocks.retained_count();
    if pass2 != pass1 {
        return Err(AvePostError::RecordCountMismatch { pass1, pass2 });
    }
    sem /= pass2 as f64;
    sem.mapv_inplace(f64::sqrt);

    Ok(Profile {
        mean,
        sem,
        records: pass1,
    })
}
