//! Shared test utilities for the adcirc workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Test data path helpers
//! - Skip macros for optional test data
//! - Synthetic grid and time-series file generators
//! - Temp-file fixtures
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{require_test_file, TempFixture};
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Resolve a sample file through [`find_test_file`], or end the test early.
///
/// Larger real-world meshes and output files (a full `fort.14` or a
/// multi-gigabyte `fort.63`) are not checked in. Tests that want them use this
/// macro so they pass as skipped on machines where `TEST_DATA_DIR` does not
/// point at a copy, instead of failing on a missing file.
///
/// Expands to the `PathBuf` of the file. Only usable in functions returning `()`.
///
/// ```ignore
/// use test_utils::require_test_file;
///
/// #[test]
/// fn test_full_mesh() {
///     let path = require_test_file!("fort.14");
///     let mesh = adcirc_parser::read_grid(&path).unwrap();
/// }
/// ```
#[macro_export]
macro_rules! require_test_file {
    ($name:expr) => {{
        let name: &str = $name;
        let Some(path) = $crate::find_test_file(name) else {
            eprintln!("SKIPPED: sample '{}' unavailable (searched TEST_DATA_DIR and testdata/)", name);
            return;
        };
        path
    }};
}

/// Assert that two numbers differ by at most `epsilon`.
///
/// Values read back from ADCIRC's `E` notation, or computed from them, are
/// not always bit-identical to a decimal literal in the test. Both sides are
/// widened to `f64` so `f32` and integer expressions can be compared too.
/// Exact comparisons (dry sentinels, mask checks) should keep using `assert_eq!`.
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(mesh.depths[3], 6.75, 1e-9);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let (left, right, epsilon) = ($left as f64, $right as f64, $epsilon as f64);
        let diff = (left - right).abs();
        assert!(
            diff <= epsilon,
            "assertion failed: {} ≈ {}\n  left: {:?}\n right: {:?}\n  |diff| {:?} exceeds {:?}",
            stringify!($left),
            stringify!($right),
            left,
            right,
            diff,
            epsilon
        );
    }};
}

/// Element-wise [`assert_approx_eq!`] over two `f64` slices.
///
/// Reports the first index that differs, which is usually enough to tell a
/// layout mistake (wrong axis order) from a precision one.
#[macro_export]
macro_rules! assert_slice_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: &[f64] = &$left;
        let right: &[f64] = &$right;
        let epsilon: f64 = $epsilon as f64;
        assert_eq!(left.len(), right.len(), "slice lengths differ");
        for (i, (l, r)) in left.iter().zip(right.iter()).enumerate() {
            if (l - r).abs() > epsilon {
                panic!(
                    "assertion failed at index {}: `{:?}` !≈ `{:?}` (epsilon {:?})",
                    i, l, r, epsilon
                );
            }
        }
    }};
}
