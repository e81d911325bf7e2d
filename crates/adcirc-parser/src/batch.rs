//! Parallel reading of independent files.
//!
//! Each read owns its file handle and buffers, so a set of files can be
//! parsed across the rayon pool with no coordination. Results come back in
//! input order and a failure in one file does not affect the others.

use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::FieldOptions;
use crate::error::AdcircResult;
use crate::field::{read_field, TimeSeriesField};
use crate::grid::{read_grid, Mesh};

/// Read several grid files in parallel.
pub fn read_grids<P>(paths: &[P]) -> Vec<AdcircResult<Mesh>>
where
    P: AsRef<Path> + Sync,
{
    debug!(files = paths.len(), threads = rayon::current_num_threads(), "Reading grids");
    let results: Vec<_> = paths.par_iter().map(read_grid).collect();
    log_failures(paths, &results);
    results
}

/// Read several time-series files in parallel with shared options.
pub fn read_fields<P>(paths: &[P], options: &FieldOptions) -> Vec<AdcircResult<TimeSeriesField>>
where
    P: AsRef<Path> + Sync,
{
    debug!(files = paths.len(), threads = rayon::current_num_threads(), "Reading fields");
    let results: Vec<_> = paths
        .par_iter()
        .map(|path| read_field(path, options))
        .collect();
    log_failures(paths, &results);
    results
}

fn log_failures<P: AsRef<Path>, T>(paths: &[P], results: &[AdcircResult<T>]) {
    for (path, result) in paths.iter().zip(results) {
        if let Err(e) = result {
            warn!(path = %path.as_ref().display(), error = %e, "Failed to read file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_grids_preserves_order_and_isolates_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.14");
        let bad = dir.path().join("bad.14");
        std::fs::write(&good, "g\n0 1\n1 2.0 3.0 4.0\n").unwrap();
        std::fs::write(&bad, "b\nnot a header\n").unwrap();
        let missing = dir.path().join("missing.14");

        let results = read_grids(&[good.clone(), bad, missing, good]);
        assert_eq!(results.len(), 4);
        assert_eq!(results[0].as_ref().unwrap().coordinates, vec![[2.0, 3.0]]);
        assert!(results[1].as_ref().unwrap_err().is_format());
        assert!(results[2].is_err());
        assert!(results[3].is_ok());
    }

    #[test]
    fn test_read_fields_shares_options() {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<_> = (0..3)
            .map(|k| {
                let path = dir.path().join(format!("fort.{}.63", k));
                let text = format!("f\n1 2 0.0 0 1\n{}.0\n1 -99999.0\n2 {}.5\n", k, k);
                std::fs::write(&path, text).unwrap();
                path
            })
            .collect();

        let results = read_fields(&paths, &FieldOptions::masked());
        for (k, result) in results.iter().enumerate() {
            let field = result.as_ref().unwrap();
            assert_eq!(field.times, vec![k as f64]);
            assert_eq!(field.dry_count(), 1);
            assert_eq!(field.value(1, 0, 0), Some(k as f64 + 0.5));
        }
    }
}
