//! Open-file budget for the reader pool (Unix).
//!
//! Each reader keeps one input file open at a time; the walk holds directory handles and the
//! writer holds the output. The pool is capped so all of that stays inside the soft limit.

/// Descriptors budgeted per reader: its input file plus walk directory handles it may race with.
const FDS_PER_READER: usize = 4;

/// Descriptors kept back for the writer, stdio and the walk's own handles.
const RESERVED_FDS: u64 = 32;

/// Soft `RLIMIT_NOFILE`, or `None` when unlimited or unavailable.
#[cfg(unix)]
fn soft_fd_limit() -> Option<u64> {
    use std::mem::MaybeUninit;
    let mut rlim = MaybeUninit::<libc::rlimit>::uninit();
    if unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, rlim.as_mut_ptr()) } != 0 {
        return None;
    }
    let cur = unsafe { rlim.assume_init() }.rlim_cur;
    if cur == libc::RLIM_INFINITY || cur > i64::MAX as u64 {
        return None;
    }
    Some(cur)
}

#[cfg(not(unix))]
fn soft_fd_limit() -> Option<u64> {
    None
}

/// Readers that fit in `limit` descriptors; never below one.
fn readers_for_limit(limit: u64) -> usize {
    let usable = limit.saturating_sub(RESERVED_FDS) as usize;
    (usable / FDS_PER_READER).max(1)
}

/// Largest reader pool the process's open-file limit allows, or `None` when there is no limit.
pub fn max_workers_by_fd_limit() -> Option<usize> {
    soft_fd_limit().map(readers_for_limit)
}
