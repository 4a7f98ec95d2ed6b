//! Public and internal types for the tocsv API and pipeline.

use std::path::PathBuf;

use crate::utils::config::{ChannelCaps, DEFAULT_GZIP_LEVEL};

/// One validated row: repository, timestamp, star count.
///
/// `ts` and `stars` keep the exact source text; they are only checked to parse as `u64`,
/// never reformatted, so the CSV row is a verbatim copy of the input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub repo: String,
    pub ts: String,
    pub stars: String,
}

impl Record {
    /// Fields in CSV column order.
    pub fn fields(&self) -> [&str; 3] {
        [&self.repo, &self.ts, &self.stars]
    }
}

/// Options for [`convert_dir`](crate::convert_dir).
#[derive(Clone, Debug)]
pub struct ConvertOpts {
    /// Reader count. When None, derived from available parallelism and the FD limit.
    pub num_workers: Option<usize>,
    /// Follow symbolic links during the walk.
    pub follow_links: bool,
    /// Exclude patterns (glob syntax, e.g. `*.md`, `manifest*`).
    pub exclude: Vec<String>,
    /// Gzip level, 0..=9.
    pub level: u32,
    /// Path channel capacity.
    pub path_cap: usize,
    /// Record channel capacity.
    pub record_cap: usize,
    /// Show a files-processed counter.
    pub verbose: bool,
}

impl Default for ConvertOpts {
    fn default() -> Self {
        Self {
            num_workers: None,
            follow_links: false,
            exclude: Vec::new(),
            level: DEFAULT_GZIP_LEVEL,
            path_cap: ChannelCaps::PATHS,
            record_cap: ChannelCaps::RECORDS,
            verbose: false,
        }
    }
}

/// Outcome of a successful conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    /// Input files read.
    pub files: usize,
    /// CSV rows written.
    pub records: usize,
    /// Final output path.
    pub output: PathBuf,
}
