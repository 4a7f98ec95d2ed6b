//! Path enumerator: walks the input tree and feeds file paths to the reader pool.

use anyhow::anyhow;
use crossbeam_channel::Sender;
use log::debug;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use walkdir::{DirEntry, WalkDir};

use crate::engine::tools::should_include_in_walk;

use super::context::PipelineContext;

/// One result from the walk: a file path to send, or an error with optional path.
pub enum WalkOutcome {
    Ok(PathBuf),
    Err { msg: String, path: Option<PathBuf> },
}

/// Convert a walkdir result into [`WalkOutcome`]. Directories are not emitted; other non-file
/// entries (sockets, dangling links) come back as `None`.
pub fn to_outcome_walkdir(r: Result<DirEntry, walkdir::Error>) -> Option<WalkOutcome> {
    match r {
        Ok(entry) => {
            let ft = entry.file_type();
            if ft.is_dir() {
                return None;
            }
            if ft.is_file() || (ft.is_symlink() && entry.path().is_file()) {
                return Some(WalkOutcome::Ok(entry.into_path()));
            }
            debug!("skipping non-regular file {}", entry.path().display());
            None
        }
        Err(err) => Some(WalkOutcome::Err {
            msg: format!("{}", err),
            path: err.path().map(PathBuf::from),
        }),
    }
}

/// Walk in file-name order so repeated runs over the same tree enumerate the same sequence.
fn walkdir_iter(ctx: &PipelineContext) -> impl Iterator<Item = WalkOutcome> + '_ {
    WalkDir::new(&ctx.root)
        .follow_links(ctx.follow_links)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            should_include_in_walk(e.path(), &ctx.root, &ctx.skip_paths, &ctx.exclude)
        })
        .filter_map(to_outcome_walkdir)
}

pub fn spawn_walk_thread(path_tx: Sender<PathBuf>, ctx: PipelineContext) -> JoinHandle<usize> {
    thread::spawn(move || {
        let iter = walkdir_iter(&ctx);
        run_walk_loop(&path_tx, &ctx, iter)
    })
}

/// Run the walk loop: send each path to `path_tx` until the walk ends, an error is hit, or the
/// pipeline halts. Any walk error is recorded in the halt slot. Returns the count of paths sent;
/// the caller drops `path_tx` afterwards, which closes the channel.
pub fn run_walk_loop<I>(path_tx: &Sender<PathBuf>, ctx: &PipelineContext, iter: I) -> usize
where
    I: Iterator<Item = WalkOutcome>,
{
    let mut count = 0_usize;
    for outcome in iter {
        if ctx.halt.is_halted() {
            break;
        }
        match outcome {
            WalkOutcome::Ok(path) => {
                // Disconnected means every reader is gone; the reason is already in the halt slot.
                if path_tx.send(path).is_err() {
                    break;
                }
                count += 1;
            }
            WalkOutcome::Err { msg, path } => {
                let err = match path {
                    Some(p) => anyhow!("walk {}: {}", p.display(), msg),
                    None => anyhow!("walk: {}", msg),
                };
                ctx.halt.fail(err);
                break;
            }
        }
    }
    debug!("walk: sent {} paths", count);
    count
}
