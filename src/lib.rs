//! lmp-ave-post: LAMMPS averaging-output post-processing
//!
//! A Rust toolkit for the time-series files produced by LAMMPS averaging
//! fixes (`fix ave/time`, `fix ave/chunk`). The core is a streaming two-pass
//! aggregator: one pass of running per-bin sums, a second pass of squared
//! deviations from the resulting mean, yielding a time-averaged profile with
//! per-field standard errors written as a fixed-width text table.
//!
//! ## Key Features
//!
//! - **Two-Pass Aggregation**: Single-allocation mean and standard-error
//!   matrices over files of unknown length
//! - **Timestep Filtering**: Optional inclusive/exclusive step bounds with a
//!   cursor that stays aligned across skipped blocks
//! - **Strict Structure Checking**: A changed per-block row count fails the
//!   run with the offending timestep
//! - **Atomic Table Output**: The result table is fully written or not
//!   written at all
//! - **Plot Front-Ends**: Force-table line charts, velocity-field quiver
//!   plots and 3D chunk voxel grids
//!
//! ## Module Organization
//!
//! - [`header`]: field-name extraction from the file header
//! - [`blocks`]: restartable block-structure parsing with step filtering
//! - [`aggregate`]: the two-pass mean / sem computation
//! - [`table`]: fixed-width table rendering and atomic output
//! - [`series`]: readers for the related plot-input record formats
//! - [`plot`] / [`colormap`]: chart rendering for the front-end binaries
//! - [`report`]: per-run verbosity-scoped diagnostics
//! - [`errors`]: centralized error handling
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use lmp_ave_post::prelude::*;
//! use std::path::Path;
//!
//! let reporter = Reporter::default();
//! let path = Path::new("density.profile");
//!
//! let fields = lmp_ave_post::header::read_fields(path, false, &reporter).unwrap();
//! let profile = lmp_ave_post::aggregate::average_file(
//!     path,
//!     &fields,
//!     StepRange::unbounded(),
//!     &reporter,
//! )
//! .unwrap();
//! lmp_ave_post::table::write_profile(Path::new("output.mean"), &fields, &profile).unwrap();
//! ```

// Core modules
pub mod aggregate;
pub mod blocks;
pub mod colormap;
pub mod errors;
pub mod header;
pub mod plot;
pub mod report;
pub mod series;
pub mod table;

// CLI surface shared with the binaries
pub mod cli;

// Direct re-exports for the public API
pub use aggregate::*;
pub use blocks::*;
pub use errors::*;
pub use report::*;

// High-level convenience API
pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::aggregate::{average_file, Profile};
    pub use crate::blocks::{Block, BlockReader, StepRange};
    pub use crate::colormap::Colormap;
    pub use crate::errors::{AvePostError, Result};
    pub use crate::header::read_fields;
    pub use crate::report::{Reporter, Verbosity};
    pub use crate::series::{ChunkGrid, ForceTable, VelocityBin};
    pub use crate::table::write_profile;
}
