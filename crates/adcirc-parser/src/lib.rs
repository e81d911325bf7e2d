//! Readers for ADCIRC simulation files.
//!
//! This crate parses the ASCII grid specification file (`fort.14`) into a
//! [`Mesh`] and the family of time-series output files (`fort.61`, `fort.63`,
//! `fort.64`, ...) into a [`TimeSeriesField`]. Both readers make a single
//! sequential pass, fail fast on the first malformed line and return fully
//! materialized, immutable results.
//!
//! # Example
//!
//! ```no_run
//! use adcirc_parser::{read_field, read_grid, FieldOptions};
//!
//! let mesh = read_grid("fort.14")?;
//! let elevation = read_field("fort.63", &FieldOptions::masked())?;
//! assert_eq!(elevation.num_nodes(), mesh.num_nodes());
//! # Ok::<(), adcirc_parser::AdcircError>(())
//! ```
//!
//! # Logging
//!
//! Progress is reported through `tracing`. Skipped boundary data at the end
//! of a grid file is reported at `warn` level and is never an error.

pub mod batch;
pub mod config;
pub mod error;
pub mod field;
pub mod grid;
pub mod lines;

pub use batch::{read_fields, read_grids};
pub use config::{FieldOptions, DEFAULT_DRY_VALUE, DEFAULT_FILL_VALUE};
pub use error::{AdcircError, AdcircResult};
pub use field::{
    compute_dry_mask, read_field, read_field_from, DryMask, FieldArray, FieldHeader, FieldShape,
    TimeSeriesField,
};
pub use grid::{read_grid, read_grid_from, Extent, Mesh};
pub use lines::count_lines;
