use anyhow::Result;
use log::debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::ConvertOpts;
use crate::engine::progress::ProgressBar;
use crate::engine::tools::{canonicalize_paths, resolve_worker_count};
use crate::pipeline::{self, Halt};
use crate::utils::config::{MAX_GZIP_LEVEL, WorkerThreadLimits};

/// Start walk → readers → writer. The writer writes to `work_path`; the caller joins the
/// handles (see [`join_pipeline`]) and decides what happens to the work file.
pub fn run_pipeline(
    root: &Path,
    output: &Path,
    work_path: &Path,
    opts: &ConvertOpts,
    halt: &Arc<Halt>,
    progress: Option<&ProgressBar>,
) -> Result<pipeline::PipelineHandles> {
    let (root, output_canonical, work_canonical, tuning) =
        setup_pipeline_root_and_tuning(root, output, work_path, opts)?;

    let channels = pipeline::create_pipeline_channels(
        &root,
        &output_canonical,
        &work_canonical,
        opts,
        &tuning,
        halt,
    );

    // Writer first so the work file exists before the walk can reach its directory.
    let writer_handle = pipeline::spawn_writer_thread(
        channels.record_rx,
        work_path.to_path_buf(),
        opts.level,
        halt,
    );

    let reader_handles = pipeline::spawn_reader_workers(
        channels.path_rx,
        &channels.record_tx,
        halt,
        progress,
        tuning.num_workers,
    );

    // Dropping the last sender closes the record channel once every reader has exited.
    drop(channels.record_tx);

    let walk_handle = pipeline::spawn_walk_thread(channels.path_tx, channels.ctx);

    Ok(pipeline::PipelineHandles {
        walk_handle,
        reader_handles,
        writer_handle,
        halt: Arc::clone(halt),
    })
}

/// Join every pipeline thread, then surface the first recorded error.
/// Returns `(files_read, rows_written)`.
pub fn join_pipeline(handles: pipeline::PipelineHandles) -> Result<(usize, usize)> {
    let pipeline::PipelineHandles {
        walk_handle,
        reader_handles,
        writer_handle,
        halt,
    } = handles;

    let mut panicked: Option<&'static str> = None;
    let path_count = walk_handle.join().unwrap_or_else(|_| {
        panicked.get_or_insert("walk thread panicked");
        0
    });
    let mut files = 0_usize;
    for h in reader_handles {
        match h.join() {
            Ok(n) => files += n,
            Err(_) => {
                panicked.get_or_insert("reader thread panicked");
            }
        }
    }
    let rows = writer_handle.join().unwrap_or_else(|_| {
        panicked.get_or_insert("writer thread panicked");
        0
    });
    debug!(
        "pipeline joined: {} paths walked, {} files read, {} rows written",
        path_count, files, rows
    );

    if let Some(msg) = panicked {
        halt.fail(anyhow::anyhow!(msg));
    }
    pipeline::check_for_first_error(&halt)?;
    Ok((files, rows))
}

/// Canonicalize root and output paths, validate options, size the reader pool.
pub fn setup_pipeline_root_and_tuning(
    root: &Path,
    output: &Path,
    work_path: &Path,
    opts: &ConvertOpts,
) -> Result<(
    PathBuf,
    Option<PathBuf>,
    Option<PathBuf>,
    pipeline::PipelineTuning,
)> {
    if opts.level > MAX_GZIP_LEVEL {
        anyhow::bail!(
            "gzip level must be between 0 and {}, got {}",
            MAX_GZIP_LEVEL,
            opts.level
        );
    }
    let (root, output_canonical, work_canonical) = canonicalize_paths(root, output, work_path)?;

    let num_workers = resolve_worker_count(opts.num_workers, WorkerThreadLimits::current());
    debug!("Using {} reader workers", num_workers);

    let tuning = pipeline::PipelineTuning {
        num_workers,
        path_cap: opts.path_cap,
        record_cap: opts.record_cap.max(1),
    };
    Ok((root, output_canonical, work_canonical, tuning))
}
