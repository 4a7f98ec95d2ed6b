pub mod config;
pub mod fd_limit;
pub mod logger;
pub mod tempfiles;
pub mod tocsv_toml;

pub use config::*;
pub use fd_limit::max_workers_by_fd_limit;
pub use logger::setup_logging;
pub use tempfiles::{discard_work_file, prepare_work_path, rename_work_to_final, work_path_for};
