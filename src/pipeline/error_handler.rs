//! Fail-fast coordination: the first error any pipeline thread hits wins, and every thread stops early.

use anyhow::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

/// Shared first-error slot plus a halt flag, checked by the walk and readers between units of work.
#[derive(Debug, Default)]
pub struct Halt {
    halted: AtomicBool,
    first_error: Mutex<Option<Error>>,
}

impl Halt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `err` unless an earlier error is already held, and raise the halt flag.
    pub fn fail(&self, err: Error) {
        let mut slot = self
            .first_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            *slot = Some(err);
        }
        self.halted.store(true, Ordering::Release);
    }

    pub fn is_halted(&self) -> bool {
        self.halted.load(Ordering::Acquire)
    }

    /// Take the recorded error, if any.
    pub fn take_error(&self) -> Option<Error> {
        self.first_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

/// Check pipeline result after joining every thread: the first recorded error, if any, becomes the result.
pub fn check_for_first_error(halt: &Halt) -> anyhow::Result<()> {
    match halt.take_error() {
        Some(err) => Err(err),
        None if halt.is_halted() => Err(anyhow::anyhow!("pipeline halted")),
        None => Ok(()),
    }
}
