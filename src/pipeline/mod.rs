//! Pipeline components: context, walk, readers, writer, fail-fast handling.

pub mod context;
pub mod error_handler;
pub mod orchestrator;
pub mod reader;
pub mod walk;
pub mod writer;

pub use context::{
    PipelineChannels, PipelineContext, PipelineHandles, PipelineTuning, create_pipeline_channels,
};
pub use error_handler::{Halt, check_for_first_error};
pub use orchestrator::{join_pipeline, run_pipeline, setup_pipeline_root_and_tuning};
pub use reader::spawn_reader_workers;
pub use walk::{WalkOutcome, run_walk_loop, spawn_walk_thread, to_outcome_walkdir};
pub use writer::{CsvGzWriter, spawn_writer_thread, write_records_to_file};
