use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::config::PackagePaths;

/// Work path for the output: `<output>.tmp` in the same directory, so the final rename stays on one filesystem.
pub fn work_path_for(output: &Path) -> PathBuf {
    let mut name = output
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| PackagePaths::get().pkg_name().into());
    name.push(".");
    name.push(PackagePaths::get().work_suffix());
    output.parent().unwrap_or(Path::new(".")).join(name)
}

/// Remove a stale work file left by an earlier aborted run.
pub fn prepare_work_path(output: &Path) -> Result<PathBuf> {
    let work_path = work_path_for(output);
    if work_path.exists() {
        fs::remove_file(&work_path)
            .with_context(|| format!("remove stale work file {}", work_path.display()))?;
    }
    Ok(work_path)
}

pub fn rename_work_to_final(work_path: &Path, final_path: &Path) -> Result<()> {
    fs::rename(work_path, final_path).with_context(|| {
        format!(
            "rename work file to output ({} -> {})",
            work_path.display(),
            final_path.display()
        )
    })
}

/// Best-effort cleanup after a failed run.
pub fn discard_work_file(work_path: &Path) {
    if let Err(e) = fs::remove_file(work_path)
        && e.kind() != std::io::ErrorKind::NotFound
    {
        log::warn!("could not remove {}: {}", work_path.display(), e);
    }
}
