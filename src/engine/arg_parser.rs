use clap::Parser;
use std::path::PathBuf;

/// Convert a directory of DynamoDB dump files into one gzip-compressed CSV.
#[derive(Clone, Debug, Parser)]
#[command(name = "tocsv")]
#[command(about = "Convert a directory of DynamoDB dump files into one gzip-compressed CSV (repo,ts,stars).")]
pub struct Cli {
    /// Input directory (contains DynamoDB dump files).
    #[arg(long = "input-dir", short = 'i', visible_alias = "id", value_name = "DIR")]
    pub input_dir: PathBuf,

    /// Output file name (gzip-compressed CSV).
    #[arg(long = "output-file", short = 'o', visible_alias = "of", value_name = "FILE")]
    pub output_file: PathBuf,

    /// Number of workers to run to process files. Default: available parallelism.
    #[arg(long, short = 'w', visible_alias = "nw", value_parser = clap::value_parser!(usize))]
    pub workers: Option<usize>,

    /// Exclude patterns (glob syntax). Can specify multiple: -e pattern1 pattern2 pattern3
    #[arg(long, short = 'e', num_args = 1..)]
    pub exclude: Vec<String>,

    /// Follow symbolic links.
    #[arg(long, short = 'f', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub follow_links: Option<bool>,

    /// Gzip compression level (0-9).
    #[arg(long, short = 'l', value_parser = clap::value_parser!(u32).range(0..=9))]
    pub level: Option<u32>,

    /// Record channel capacity.
    #[arg(long, value_parser = clap::value_parser!(usize))]
    pub record_cap: Option<usize>,

    /// Path channel capacity.
    #[arg(long, value_parser = clap::value_parser!(usize))]
    pub path_cap: Option<usize>,

    /// Verbose output (debug logging and a files-processed counter).
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,
}
