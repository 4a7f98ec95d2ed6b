//! tocsv: convert a directory of DynamoDB dump files into one gzip-compressed CSV.
//!
//! Walk → path channel → reader pool → record channel → single gzip CSV writer.

pub mod convert;
pub mod engine;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

pub use engine::decode::{decode_records, validate_uint};
pub use engine::tools::{glob_match, should_include_in_walk};
pub use pipeline::{CsvGzWriter, Halt};

use log::debug;
use std::path::Path;
use std::sync::Arc;

/// Result alias used by public tocsv API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Convert every file under `root` into the gzip CSV `output`.
///
/// Fails on the first walk, decode, validation or write error; on failure `output` is left
/// untouched. Row order across files is not deterministic when more than one worker runs.
pub fn convert_dir(root: &Path, output: &Path, opts: &ConvertOpts) -> Result<Summary> {
    convert_dir_with_halt(root, output, opts, Arc::new(Halt::new()))
}

/// Like [`convert_dir`], with a caller-owned [`Halt`] (e.g. tripped from a Ctrl-C handler).
pub fn convert_dir_with_halt(
    root: &Path,
    output: &Path,
    opts: &ConvertOpts,
    halt: Arc<Halt>,
) -> Result<Summary> {
    let config_str = format!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_string().to_uppercase(),
        opts
    );
    debug!("{}", config_str);
    convert::convert_dir_with_halt(root, output, opts, halt)
}
