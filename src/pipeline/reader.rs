use crossbeam_channel::{Receiver, Sender};
use log::debug;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::Record;
use crate::engine::decode::decode_file;
use crate::engine::progress::{ProgressBar, update_progress_bar};

use super::Halt;

/// Marker error: the record channel closed under us. Not a root cause; the writer already failed.
#[derive(Debug)]
struct RecordSinkClosed;

impl std::fmt::Display for RecordSinkClosed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("record channel closed")
    }
}

impl std::error::Error for RecordSinkClosed {}

/// Single reader: take paths from path_rx, decode each file, send records on record_tx.
/// Returns the number of files fully read.
fn reader_worker_loop(
    path_rx: Receiver<PathBuf>,
    record_tx: Sender<Record>,
    halt: Arc<Halt>,
    progress: Option<ProgressBar>,
) -> usize {
    let mut files = 0_usize;
    while let Ok(path) = path_rx.recv() {
        if halt.is_halted() {
            break;
        }
        debug!("Processing file {}", path.display());
        let result = decode_file(&path, |record| {
            if halt.is_halted() {
                anyhow::bail!(RecordSinkClosed);
            }
            record_tx
                .send(record)
                .map_err(|_| anyhow::Error::new(RecordSinkClosed))
        });
        match result {
            Ok(n) => {
                debug!("{}: {} records", path.display(), n);
                files += 1;
                if let Some(pb) = &progress {
                    update_progress_bar(pb, 1);
                }
            }
            Err(e) => {
                if e.downcast_ref::<RecordSinkClosed>().is_none() {
                    halt.fail(e);
                }
                break;
            }
        }
    }
    files
}

/// Spawn `num_workers` readers. Caller must drop its own record sender after this so the
/// record channel closes once every reader has exited.
pub fn spawn_reader_workers(
    path_rx: Receiver<PathBuf>,
    record_tx: &Sender<Record>,
    halt: &Arc<Halt>,
    progress: Option<&ProgressBar>,
    num_workers: usize,
) -> Vec<JoinHandle<usize>> {
    (0..num_workers)
        .map(|_| {
            let path_rx = path_rx.clone();
            let record_tx = record_tx.clone();
            let halt = Arc::clone(halt);
            let progress = progress.cloned();
            thread::spawn(move || reader_worker_loop(path_rx, record_tx, halt, progress))
        })
        .collect()
}
