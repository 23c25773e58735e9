//! Process-wide translation outside any provided scope.
//!
//! Exactly one [`Translator`] exists per process. Every store's
//! `set_language` activates its dictionary here, so the functions in this
//! module always reflect the language most recently activated by *any*
//! store — last write wins. This is deliberate shared mutable state: it is
//! what makes translation usable from code that has no handle to a store.
//! Concurrent stores in one process will clobber each other's active
//! dictionary; that hazard is part of the contract.

use std::sync::{
    LazyLock,
    PoisonError,
    RwLock,
    RwLockReadGuard,
    RwLockWriteGuard,
};

use crate::translator::{
    TranslateOptions,
    Translator,
};

/// The process-wide translator.
static TRANSLATOR: LazyLock<RwLock<Translator>> = LazyLock::new(|| RwLock::new(Translator::new()));

/// Read access to the shared translator. Poisoning is recovered; the
/// translator is plain data.
pub(crate) fn read() -> RwLockReadGuard<'static, Translator> {
    TRANSLATOR.read().unwrap_or_else(PoisonError::into_inner)
}

/// Write access to the shared translator. Poisoning is recovered; the
/// translator is plain data.
pub(crate) fn write() -> RwLockWriteGuard<'static, Translator> {
    TRANSLATOR.write().unwrap_or_else(PoisonError::into_inner)
}

/// Translates a key against the last activated dictionary.
///
/// Only translation is exposed here; mutating the shared translator goes
/// through a store's `set_language`.
#[must_use]
pub fn t(key: &str) -> String {
    read().t(key)
}

/// Translates a key with options against the last activated dictionary.
#[must_use]
pub fn t_with(key: &str, options: &TranslateOptions) -> String {
    read().t_with(key, options)
}
