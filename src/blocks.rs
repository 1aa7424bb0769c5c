//! Record-block parsing for LAMMPS averaging output
//!
//! An averaging file is a comment preamble followed by repeating blocks: a
//! one-line header `<timestep> <row_count> [ignored...]` and exactly
//! `row_count` data lines. [`BlockReader`] is a restartable cursor over that
//! structure: it can be rewound to the start of the file so the aggregator
//! can traverse the same blocks twice.

use crate::errors::{AvePostError, Result};
use crate::report::Reporter;
use ndarray::Array2;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;

/// Progress is reported every this many retained records.
const PROGRESS_EVERY: usize = 1000;

/// Inclusive lower / exclusive upper timestep bounds; `0` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRange {
    pub min: u64,
    pub max: u64,
}

impl StepRange {
    pub fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    pub fn unbounded() -> Self {
        Self { min: 0, max: 0 }
    }

    /// True when `step` lies below the lower bound.
    pub fn is_below(&self, step: f64) -> bool {
        step < self.min as f64
    }

    /// True when `step` has reached the upper bound (never for `max == 0`).
    pub fn is_past_end(&self, step: f64) -> bool {
        self.max > 0 && step >= self.max as f64
    }
}

impl Default for StepRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// One timestep's worth of data.
#[derive(Debug, Clone)]
pub struct Block {
    /// Timestep, float-valued even when integral (LAMMPS may export floats
    /// to save space on big numbers).
    pub step: f64,
    /// `row_count x nfields` values in file order.
    pub rows: Array2<f64>,
    /// Whether the block passed the timestep filter.
    pub retained: bool,
}

/// Restartable cursor over the repeating block structure of one file.
pub struct BlockReader {
    reader: BufReader<File>,
    nfields: usize,
    range: StepRange,
    reporter: Reporter,
    /// First non-comment line, buffered by the preamble skip.
    pending: Option<String>,
    /// Row count declared by the very first block; all later blocks must match.
    reference_rows: Option<usize>,
    retained: usize,
    line_no: usize,
    finished: bool,
}

impl BlockReader {
    /// Opens `path` and positions the cursor on the first block header.
    pub fn open(path: &Path, nfields: usize, range: StepRange, reporter: Reporter) -> Result<Self> {
        let file = File::open(path)?;
        let mut parser = Self {
            reader: BufReader::new(file),
            nfields,
            range,
            reporter,
            pending: None,
            reference_rows: None,
            retained: 0,
            line_no: 0,
            finished: false,
        };
        parser.skip_preamble()?;
        Ok(parser)
    }

    /// Seeks back to the start of the file and re-skips the comment preamble,
    /// so the block sequence can be traversed again. The reference row count
    /// survives the rewind.
    pub fn rewind(&mut self) -> Result<()> {
        self.reader.seek(SeekFrom::Start(0))?;
        self.pending = None;
        self.retained = 0;
        self.line_no = 0;
        self.finished = false;
        self.skip_preamble()
    }

    /// Number of blocks retained by the filter so far.
    pub fn retained_count(&self) -> usize {
        self.retained
    }

    /// Row count established by the first block, once one has been parsed.
    pub fn reference_rows(&self) -> Option<usize> {
        self.reference_rows
    }

    /// Parses the next block, or `Ok(None)` at the end of the sequence.
    ///
    /// Blocks below the lower bound are fully read (the cursor must stay
    /// aligned) but flagged as not retained; the first block at or past the
    /// upper bound terminates the sequence without being read.
    pub fn next_block(&mut self) -> Result<Option<Block>> {
        if self.finished {
            return Ok(None);
        }

        let header = match self.take_line()? {
            Some(line) => line,
            None => {
                self.finished = true;
                return Ok(None);
            }
        };

        let mut tokens = header.split_whitespace();
        let step_tok = match tokens.next() {
            Some(tok) => tok,
            None => {
                // A blank line where a header should be ends the sequence.
                self.finished = true;
                return Ok(None);
            }
        };
        let count_tok = tokens.next().ok_or_else(|| AvePostError::ParseError {
            line: self.line_no,
            message: "block header needs a timestep and a row count".to_string(),
        })?;

        let step = self.parse_value(step_tok)?;
        let row_count = self.parse_value(count_tok)? as usize;

        if self.range.is_past_end(step) {
            self.finished = true;
            return Ok(None);
        }

        match self.reference_rows {
            None => self.reference_rows = Some(row_count),
            Some(reference) if reference != row_count => {
                return Err(AvePostError::RecordShapeChanged {
                    step,
                    expected: reference,
                    found: row_count,
                });
            }
            Some(_) => {}
        }
        let retained = !self.range.is_below(step);

        let mut rows = Array2::zeros((row_count, self.nfields));
        for i in 0..row_count {
            let data_line = self.take_line()?.ok_or_else(|| AvePostError::ParseError {
                line: self.line_no + 1,
                message: format!("file ended inside the record at t={}", step),
            })?;
            let mut values = data_line.split_whitespace();
            for j in 0..self.nfields {
                let tok = values.next().ok_or_else(|| AvePostError::ParseError {
                    line: self.line_no,
                    message: format!("expected {} values, found {}", self.nfields, j),
                })?;
                rows[[i, j]] = self.parse_value(tok)?;
            }
        }

        if retained {
            self.retained += 1;
            if self.retained % PROGRESS_EVERY == 0 {
                self.reporter.info(format!(
                    "Reading record number {:<10}, step {:<10.2}.",
                    self.retained, step
                ));
            }
        }

        Ok(Some(Block {
            step,
            rows,
            retained,
        }))
    }

    /// Discards leading comment lines and buffers the first block header.
    fn skip_preamble(&mut self) -> Result<()> {
        loop {
            match self.read_raw_line()? {
                Some(line) => {
                    if !line.starts_with('#') {
                        self.pending = Some(line);
                        return Ok(());
                    }
                }
                None => {
                    self.finished = true;
                    return Ok(());
                }
            }
        }
    }

    fn take_line(&mut self) -> Result<Option<String>> {
        if let Some(line) = self.pending.take() {
            return Ok(Some(line));
        }
        self.read_raw_line()
    }

    fn read_raw_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let n = self.reader.read_line(&mut line)?;
        if n == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    fn parse_value(&self, token: &str) -> Result<f64> {
        token.parse().map_err(|_| AvePostError::ParseError {
            line: self.line_no,
            message: format!("invalid numeric value '{}'", token),
        })
    }
}
