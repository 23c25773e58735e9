//! Ambient store access: a task-scoped provider and a handle with an
//! unbound default.
//!
//! This is the dependency-injection rendition of subtree-scoped context:
//! [`provide`] installs a store for everything running inside a future, and
//! [`current`] looks up the innermost one. Code that runs outside any
//! provided scope gets the unbound handle, whose every operation fails with
//! [`LocalizeError::NoProvider`] — loudly, because a missing provider is a
//! programming error, not a runtime condition to translate around.

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::LocalizeError;
use crate::phrases::Phrases;
use crate::store::{
    LocalizeState,
    LocalizeStore,
};
use crate::translator::TranslateOptions;

tokio::task_local! {
    /// The innermost provided store for the current task.
    static CURRENT_STORE: LocalizeStore;
}

/// Runs a future with the store installed as the ambient store.
///
/// Nested calls shadow the outer scope for the inner future's duration.
pub async fn provide<F: Future>(store: LocalizeStore, future: F) -> F::Output {
    CURRENT_STORE.scope(store, future).await
}

/// Runs a closure with the store installed as the ambient store.
///
/// The synchronous counterpart of [`provide`], for call trees that never
/// suspend.
pub fn provide_sync<R>(store: LocalizeStore, f: impl FnOnce() -> R) -> R {
    CURRENT_STORE.sync_scope(store, f)
}

/// Returns a handle to the innermost provided store, or the unbound handle
/// when called outside any scope.
#[must_use]
pub fn current() -> LocalizeHandle {
    CURRENT_STORE.try_with(|store| LocalizeHandle::bound(store)).unwrap_or_default()
}

/// A handle to a store that may be unbound.
///
/// The `Default` handle is unbound: every operation returns
/// `Err(LocalizeError::NoProvider)`. A bound handle delegates to its store.
#[derive(Debug, Clone, Default)]
pub struct LocalizeHandle {
    /// The store, absent for the unbound handle.
    store: Option<LocalizeStore>,
}

impl LocalizeHandle {
    /// Returns the unbound handle.
    #[must_use]
    pub const fn unbound() -> Self {
        Self { store: None }
    }

    /// Returns a handle bound to the store.
    #[must_use]
    pub fn bound(store: &LocalizeStore) -> Self {
        Self { store: Some(store.clone()) }
    }

    /// Returns true if the handle is bound to a store.
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        self.store.is_some()
    }

    /// Returns the bound store or fails with `NoProvider`.
    fn store(&self) -> Result<&LocalizeStore, LocalizeError> {
        self.store.as_ref().ok_or(LocalizeError::NoProvider)
    }

    /// Switches the current language. See
    /// [`LocalizeStore::set_language`]; switch failures are reported
    /// through the store's state, not this result.
    pub async fn set_language(
        &self,
        language: &str,
        phrases: Option<Phrases>,
    ) -> Result<(), LocalizeError> {
        self.store()?.set_language(language, phrases).await;
        Ok(())
    }

    /// Returns true if a dictionary for the language is cached.
    pub fn is_language_cached(&self, language: &str) -> Result<bool, LocalizeError> {
        Ok(self.store()?.is_language_cached(language))
    }

    /// Removes one cache entry, or every entry when no language is given.
    pub fn clear_cache(&self, language: Option<&str>) -> Result<(), LocalizeError> {
        self.store()?.clear_cache(language);
        Ok(())
    }

    /// Translates a key.
    pub fn t(&self, key: &str) -> Result<String, LocalizeError> {
        Ok(self.store()?.t(key))
    }

    /// Translates a key with options.
    pub fn t_with(
        &self,
        key: &str,
        options: &TranslateOptions,
    ) -> Result<String, LocalizeError> {
        Ok(self.store()?.t_with(key, options))
    }

    /// Returns a snapshot of the store's state.
    pub fn state(&self) -> Result<LocalizeState, LocalizeError> {
        Ok(self.store()?.state())
    }

    /// Returns the most recent failure recorded by the store.
    pub fn error(&self) -> Result<Option<Arc<LocalizeError>>, LocalizeError> {
        Ok(self.store()?.error())
    }

    /// Subscribes to the store's state snapshots.
    pub fn subscribe(&self) -> Result<watch::Receiver<LocalizeState>, LocalizeError> {
        Ok(self.store()?.subscribe())
    }
}

impl From<LocalizeStore> for LocalizeHandle {
    fn from(store: LocalizeStore) -> Self {
        Self { store: Some(store) }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;

    use super::*;
    use crate::test_utils::lock_global_translator;

    #[googletest::test]
    fn unbound_handle_fails_every_operation() {
        let handle = LocalizeHandle::unbound();

        expect_that!(handle.is_bound(), eq(false));
        expect_that!(
            handle.t("key"),
            err(matches_pattern!(LocalizeError::NoProvider))
        );
        expect_that!(
            handle.t_with("key", &TranslateOptions::new()),
            err(matches_pattern!(LocalizeError::NoProvider))
        );
        expect_that!(
            handle.is_language_cached("en"),
            err(matches_pattern!(LocalizeError::NoProvider))
        );
        expect_that!(
            handle.clear_cache(None),
            err(matches_pattern!(LocalizeError::NoProvider))
        );
        expect_that!(handle.state(), err(matches_pattern!(LocalizeError::NoProvider)));
        expect_that!(handle.subscribe(), err(matches_pattern!(LocalizeError::NoProvider)));
    }

    #[tokio::test]
    async fn unbound_set_language_fails_synchronously() {
        let handle = LocalizeHandle::unbound();

        let result = handle.set_language("en", None).await;

        assert!(matches!(result, Err(LocalizeError::NoProvider)));
    }

    #[googletest::test]
    fn current_outside_a_scope_is_unbound() {
        expect_that!(current().is_bound(), eq(false));
    }

    #[tokio::test]
    async fn provide_installs_the_store() {
        let _guard = lock_global_translator();
        let store = LocalizeStore::new();

        provide(store, async {
            let handle = current();
            assert!(handle.is_bound());

            handle
                .set_language(
                    "en",
                    Some(Phrases::from_json_str(r#"{"hi": "Hi"}"#).unwrap()),
                )
                .await
                .unwrap();
            assert_eq!(handle.t("hi").unwrap(), "Hi");
        })
        .await;

        // Outside the scope the ambient handle is unbound again.
        assert!(!current().is_bound());
    }

    #[tokio::test]
    async fn nested_provide_shadows_the_outer_scope() {
        let outer = LocalizeStore::new();
        let inner = LocalizeStore::builder().no_cache().build();

        let seen = provide(outer, async {
            provide(inner, async { format!("{:?}", current()) }).await
        })
        .await;

        // The innermost store is the no_cache one.
        assert!(seen.contains("no_cache: true"), "unexpected ambient store: {seen}");
    }

    #[googletest::test]
    fn provide_sync_installs_the_store() {
        let store = LocalizeStore::new();

        let bound = provide_sync(store, || current().is_bound());

        expect_that!(bound, eq(true));
        expect_that!(current().is_bound(), eq(false));
    }

    #[googletest::test]
    fn handle_from_store_is_bound() {
        let store = LocalizeStore::new();

        let handle = LocalizeHandle::from(store);

        expect_that!(handle.is_bound(), eq(true));
    }
}
