//! Directory conversion: input tree → one gzip CSV file.

use anyhow::Result;
use log::{debug, info};
use std::path::Path;
use std::sync::Arc;

use crate::engine::progress::{finish_counter, setup_progress};
use crate::pipeline::{Halt, join_pipeline, run_pipeline};
use crate::utils::{discard_work_file, prepare_work_path, rename_work_to_final};
use crate::{ConvertOpts, Summary};

/// Convert every file under `root` into `output`.
/// Rows go to `<output>.tmp` first; the work file is renamed onto `output` only when the whole
/// pipeline succeeded, and removed otherwise.
pub fn convert_dir_with_halt(
    root: &Path,
    output: &Path,
    opts: &ConvertOpts,
    halt: Arc<Halt>,
) -> Result<Summary> {
    let work_path = prepare_work_path(output)?;
    let progress = setup_progress(opts.verbose);

    let result = run_pipeline(root, output, &work_path, opts, &halt, progress.as_ref())
        .and_then(join_pipeline);

    let (files, records) = match result {
        Ok(counts) => counts,
        Err(e) => {
            debug!("conversion failed, discarding {}", work_path.display());
            discard_work_file(&work_path);
            return Err(e);
        }
    };
    if let Some(pb) = &progress {
        finish_counter(pb, files);
    }

    if let Err(e) = rename_work_to_final(&work_path, output) {
        discard_work_file(&work_path);
        return Err(e);
    }
    info!(
        "Wrote {} rows from {} files to {}",
        records,
        files,
        output.display()
    );
    Ok(Summary {
        files,
        records,
        output: output.to_path_buf(),
    })
}
