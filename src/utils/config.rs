//! Application configuration constants.
//! Tuning and thresholds in one place.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived file names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    config_filename: String,
    work_suffix: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                config_filename: format!(".{pkg}.toml"),
                work_suffix: "tmp".to_string(),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    /// Per-directory config file (`.tocsv.toml`), read from the input root.
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }

    /// Extension appended to the output path for the in-progress work file.
    pub fn work_suffix(&self) -> &str {
        &self.work_suffix
    }

    /// The config file the CLI reads for `root`. Only this exact path is kept out of the walk;
    /// a file with the same name deeper in the tree is ordinary input.
    pub fn config_path_for(&self, root: &Path) -> PathBuf {
        root.join(&self.config_filename)
    }
}

// ---- Worker threads ----

/// Reader pool sizing.
/// Use [`WorkerThreadLimits::current()`] to fill `all_threads` from rayon; the rest are const.
#[derive(Clone, Copy, Debug)]
pub struct WorkerThreadLimits {
    /// Available threads (from rayon); set by [`WorkerThreadLimits::current()`].
    pub all_threads: usize,
    /// Never run fewer readers than this.
    pub floor: usize,
    /// Hard ceiling regardless of what the caller asks for.
    pub max: usize,
}

impl Default for WorkerThreadLimits {
    fn default() -> Self {
        Self {
            all_threads: 0, // use current() to set from rayon
            floor: Self::FLOOR_THREADS,
            max: Self::MAX_THREADS,
        }
    }
}

impl WorkerThreadLimits {
    pub const FLOOR_THREADS: usize = 1;
    pub const MAX_THREADS: usize = 512;

    /// Build limits with `all_threads` set from `rayon::current_num_threads()`.
    pub fn current() -> Self {
        Self {
            all_threads: rayon::current_num_threads(),
            ..Self::default()
        }
    }
}

// ---- Channel capacities ----

/// Capacities for the path and record channels.
pub struct ChannelCaps;

impl ChannelCaps {
    /// Paths are cheap and the walk is fast; a small buffer keeps readers fed.
    pub const PATHS: usize = 256;
    /// Records: large enough to absorb decode bursts while the single writer compresses.
    pub const RECORDS: usize = 10_000;
}

// ---- Output ----

/// Default gzip level (same as zlib's default).
pub const DEFAULT_GZIP_LEVEL: u32 = 6;

/// Highest accepted gzip level.
pub const MAX_GZIP_LEVEL: u32 = 9;

/// Buffer size between the gzip encoder and the output file (bytes).
pub const OUTPUT_BUFFER_SIZE: usize = 64 * 1024;

/// Buffer size for reading input files (bytes).
pub const INPUT_BUFFER_SIZE: usize = 64 * 1024;
