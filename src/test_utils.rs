//! Test utilities shared across unit test modules.
#![cfg(test)]

use std::sync::{
    Mutex,
    MutexGuard,
    PoisonError,
};

/// Serializes tests that mutate the process-wide translator.
///
/// The shared translator is last-write-wins across stores, so concurrent
/// test threads would clobber each other's active dictionary. Tests that
/// call `set_language` or read translated output hold this lock for their
/// duration.
static GLOBAL_TRANSLATOR_LOCK: Mutex<()> = Mutex::new(());

/// Acquires the global translator test lock.
pub(crate) fn lock_global_translator() -> MutexGuard<'static, ()> {
    GLOBAL_TRANSLATOR_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}
