//! Engine module: CLI surface and per-file operations

pub mod arg_parser;
pub mod cli;
pub mod decode;
pub mod progress;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use cli::{handle_run, setup_opts};
pub use decode::{decode_file, decode_records, validate_uint};
pub use tools::{glob_match, resolve_worker_count, should_include_in_walk};
