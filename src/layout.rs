//! Output directory layout for experiment artifacts
//!
//! Every experiment owns one output root holding its checkpoint files plus
//! two fixed subdirectories: `benchmarks/` for input artifacts (e.g. CNF
//! formulas) and `logs/` for per-run log output.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Directory layout under a configurable output root.
///
/// Creation is idempotent: existing directories are left as-is. Exactly one
/// live experiment instance may own a given (root, experiment name) pair;
/// there is no cross-process locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
    benchmark_dir: PathBuf,
    log_dir: PathBuf,
}

impl OutputLayout {
    /// Create the layout rooted at `root`, making directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if any directory cannot be created.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let benchmark_dir = root.join("benchmarks");
        let log_dir = root.join("logs");

        fs::create_dir_all(&root)?;
        fs::create_dir_all(&benchmark_dir)?;
        fs::create_dir_all(&log_dir)?;

        Ok(Self {
            root,
            benchmark_dir,
            log_dir,
        })
    }

    /// Get the output root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the benchmark artifact directory.
    #[must_use]
    pub fn benchmark_dir(&self) -> &Path {
        &self.benchmark_dir
    }

    /// Get the log directory.
    #[must_use]
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_create_makes_subdirectories() {
        let dir = tempdir().unwrap();
        let layout = OutputLayout::create(dir.path().join("out")).unwrap();

        assert!(layout.root().is_dir());
        assert!(layout.benchmark_dir().is_dir());
        assert!(layout.log_dir().is_dir());
        assert_eq!(layout.benchmark_dir(), layout.root().join("benchmarks"));
        assert_eq!(layout.log_dir(), layout.root().join("logs"));
    }

    #[test]
    fn test_create_is_idempotent() {
        let dir = tempdir().unwrap();
        let first = OutputLayout::create(dir.path()).unwrap();
        let second = OutputLayout::create(dir.path()).unwrap();
        assert_eq!(first, second);
    }
}
