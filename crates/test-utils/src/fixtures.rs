//! Temp-file fixtures and small hand-written sample files.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Smallest useful grid: one triangle over three nodes.
pub const MINIMAL_GRID: &str = "\
minimal grid
1 3
1 0.0 0.0 10.0
2 1.0 0.0 20.0
3 0.0 1.0 30.0
1 3 1 2 3
";

/// Scalar field over two nodes, two timesteps, one dry entry.
pub const MINIMAL_SCALAR_FIELD: &str = "\
minimal elevation
2 2 3600.0 36 1
3600.0 36
1 0.5
2 -99999.0
7200.0 72
1 0.75
2 1.25
";

/// A temporary directory holding files written by a test.
///
/// The directory and everything in it are removed on drop.
pub struct TempFixture {
    dir: TempDir,
}

impl TempFixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` to `name` inside the fixture directory.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("failed to write fixture file");
        path
    }
}

impl Default for TempFixture {
    fn default() -> Self {
        Self::new()
    }
}
