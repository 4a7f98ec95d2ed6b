//! Path, filter and sizing utilities

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::utils::config::WorkerThreadLimits;
use crate::utils::max_workers_by_fd_limit;

/// Path below `root` with `/` separators, so patterns behave the same on every platform.
pub fn path_relative_to(path: &Path, root: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    Some(rel.to_string_lossy().replace('\\', "/"))
}

/// Returns true if the walk should keep `path`: emit it if it is a file, descend if it is a dir.
/// The root is always kept. `skip_paths` (output, work file, root config) are dropped by exact path.
/// Exclude patterns see only the file name and the path relative to `root`, never the root itself.
pub fn should_include_in_walk(
    path: &Path,
    root: &Path,
    skip_paths: &[PathBuf],
    exclude_patterns: &[String],
) -> bool {
    if path == root {
        return true;
    }
    if skip_paths.iter().any(|p| p == path) {
        return false;
    }
    if exclude_patterns.is_empty() {
        return true;
    }
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(n) => n,
        None => return true,
    };
    let rel = path_relative_to(path, root).unwrap_or_else(|| name.to_string());
    !exclude_patterns
        .iter()
        .any(|pattern| glob_match(pattern, name) || glob_match(pattern, &rel))
}

/// Simple glob pattern matching (supports * and ?)
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let mut pattern_chars = pattern.chars().peekable();
    let mut text_chars = text.chars().peekable();

    while let Some(&p) = pattern_chars.peek() {
        match p {
            '*' => {
                pattern_chars.next();
                if pattern_chars.peek().is_none() {
                    return true; // trailing * matches everything
                }
                let rest: String = pattern_chars.collect();
                loop {
                    if glob_match(&rest, &text_chars.clone().collect::<String>()) {
                        return true;
                    }
                    if text_chars.next().is_none() {
                        return false;
                    }
                }
            }
            '?' => {
                pattern_chars.next();
                if text_chars.next().is_none() {
                    return false;
                }
            }
            _ => {
                pattern_chars.next();
                if text_chars.next() != Some(p) {
                    return false;
                }
            }
        }
    }

    text_chars.peek().is_none()
}

/// Canonicalize a path that may not exist yet: canonical parent joined with the file name.
pub fn canonicalize_maybe_missing(path: &Path) -> Option<PathBuf> {
    if let Ok(p) = path.canonicalize() {
        return Some(p);
    }
    let name = path.file_name()?;
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    parent.canonicalize().ok().map(|p| p.join(name))
}

/// Canonicalize the input root (must be an existing directory) plus the output and work paths.
pub fn canonicalize_paths(
    root: &Path,
    output: &Path,
    work_path: &Path,
) -> Result<(PathBuf, Option<PathBuf>, Option<PathBuf>)> {
    let root = root
        .canonicalize()
        .with_context(|| format!("input directory {}", root.display()))?;
    if !root.is_dir() {
        anyhow::bail!("input path is not a directory: {}", root.display());
    }
    Ok((
        root,
        canonicalize_maybe_missing(output),
        canonicalize_maybe_missing(work_path),
    ))
}

/// Reader count: the requested count (or available threads), clamped to `[floor, max]` and the FD budget.
pub fn resolve_worker_count(requested: Option<usize>, limits: WorkerThreadLimits) -> usize {
    let wanted = requested.unwrap_or(limits.all_threads);
    let mut n = wanted.clamp(limits.floor, limits.max);
    if let Some(fd_max) = max_workers_by_fd_limit() {
        n = n.min(fd_max.max(limits.floor));
    }
    n
}
