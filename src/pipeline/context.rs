//! Pipeline context and tuning: shared data passed into the walk thread and the sizing of the pool.

use crossbeam_channel::{Receiver, Sender, bounded};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::utils::config::PackagePaths;
use crate::{ConvertOpts, Record};

use super::Halt;

/// Reader count and channel capacities for one run.
#[derive(Clone, Debug)]
pub struct PipelineTuning {
    pub num_workers: usize,
    pub path_cap: usize,
    pub record_cap: usize,
}

/// Shared context for the walk thread: root, what to skip, and the fail-fast slot.
pub struct PipelineContext {
    pub root: PathBuf,
    /// Exact paths never emitted: output, work file, root config file.
    pub skip_paths: Vec<PathBuf>,
    pub exclude: Vec<String>,
    pub follow_links: bool,
    pub halt: Arc<Halt>,
}

/// Handles returned by [`run_pipeline`](super::run_pipeline). Join `writer_handle` for the row count,
/// then the walk and readers, then check `halt`.
pub struct PipelineHandles {
    pub walk_handle: JoinHandle<usize>,
    pub reader_handles: Vec<JoinHandle<usize>>,
    pub writer_handle: JoinHandle<usize>,
    pub halt: Arc<Halt>,
}

/// Channels for the pipeline. Walk gets path_tx and ctx; readers get path_rx and record_tx; writer gets record_rx.
pub struct PipelineChannels {
    pub path_tx: Sender<PathBuf>,
    pub path_rx: Receiver<PathBuf>,
    pub record_tx: Sender<Record>,
    pub record_rx: Receiver<Record>,
    pub ctx: PipelineContext,
}

pub fn create_pipeline_channels(
    root: &Path,
    output_canonical: &Option<PathBuf>,
    work_canonical: &Option<PathBuf>,
    opts: &ConvertOpts,
    tuning: &PipelineTuning,
    halt: &Arc<Halt>,
) -> PipelineChannels {
    let (path_tx, path_rx) = bounded::<PathBuf>(tuning.path_cap);
    let (record_tx, record_rx) = bounded::<Record>(tuning.record_cap);

    let skip_paths: Vec<PathBuf> = [output_canonical, work_canonical]
        .into_iter()
        .flatten()
        .cloned()
        .chain(std::iter::once(PackagePaths::get().config_path_for(root)))
        .collect();

    let ctx = PipelineContext {
        root: root.to_path_buf(),
        skip_paths,
        exclude: opts.exclude.clone(),
        follow_links: opts.follow_links,
        halt: Arc::clone(halt),
    };

    PipelineChannels {
        path_tx,
        path_rx,
        record_tx,
        record_rx,
        ctx,
    }
}
