//! Language switching, phrase caching, and status reporting.
//!
//! [`LocalizeStore`] owns the current language, an unbounded phrase cache,
//! and the loading/error status of the most recent switch. It is cheap to
//! clone; clones share state.
//!
//! # Lock order
//!
//! When both are taken, take them in this order:
//! 1. phrase cache
//! 2. shared translator

use std::collections::HashMap;
use std::fmt;
use std::sync::{
    Arc,
    PoisonError,
    RwLock,
    RwLockReadGuard,
    RwLockWriteGuard,
};

use futures::future::BoxFuture;
use tokio::sync::watch;

use crate::error::{
    BoxError,
    LocalizeError,
};
use crate::phrases::Phrases;
use crate::pseudo;
use crate::static_translate;
use crate::translator::TranslateOptions;

/// Caller-supplied capability that fetches the phrase dictionary for a
/// language. Any rejection is carried through unchanged into
/// [`LocalizeState::error`]; the store never inspects its shape.
pub type PhraseFetcher =
    Arc<dyn Fn(String) -> BoxFuture<'static, Result<Phrases, BoxError>> + Send + Sync>;

/// Lifecycle of the most recent [`LocalizeStore::set_language`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    /// No `set_language` call has been made yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The most recent call finished, successfully or not; only
    /// [`LocalizeState::error`] distinguishes the outcome.
    Loaded,
}

/// Snapshot of a store's status, broadcast after every mutation.
#[derive(Debug, Clone, Default)]
pub struct LocalizeState {
    /// Language most recently activated by a successful switch.
    pub current_language: Option<String>,
    /// Lifecycle of the most recent switch.
    pub status: Status,
    /// Most recent failure. Cleared when a new `set_language` call begins,
    /// so an error observed after a call completes belongs to that call.
    pub error: Option<Arc<LocalizeError>>,
}

impl LocalizeState {
    /// Returns true while a fetch is in flight.
    #[must_use]
    pub const fn loading(&self) -> bool {
        matches!(self.status, Status::Loading)
    }
}

/// Configures and builds a [`LocalizeStore`].
#[derive(Default)]
pub struct LocalizeStoreBuilder {
    /// Optional fetch capability for uncached languages.
    fetcher: Option<PhraseFetcher>,
    /// Disables caching of freshly supplied or fetched dictionaries.
    no_cache: bool,
    /// Pseudo-localizes every string this store translates.
    pseudolocalize: bool,
}

impl LocalizeStoreBuilder {
    /// Supplies the fetch capability used for languages that are neither
    /// explicitly supplied nor cached.
    #[must_use]
    pub fn fetcher<F, Fut>(mut self, fetch: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Phrases, BoxError>> + Send + 'static,
    {
        self.fetcher = Some(Arc::new(move |language| {
            Box::pin(fetch(language)) as BoxFuture<'static, Result<Phrases, BoxError>>
        }));
        self
    }

    /// Prevents the store from caching supplied or fetched dictionaries.
    #[must_use]
    pub const fn no_cache(mut self) -> Self {
        self.no_cache = true;
        self
    }

    /// Pseudo-localizes every string returned by this store's translate
    /// operations. Do not enable in production.
    #[must_use]
    pub const fn pseudolocalize(mut self) -> Self {
        self.pseudolocalize = true;
        self
    }

    /// Builds the store with an empty cache and `Idle` status.
    #[must_use]
    pub fn build(self) -> LocalizeStore {
        LocalizeStore {
            inner: Arc::new(StoreInner {
                state: watch::Sender::new(LocalizeState::default()),
                cache: RwLock::new(HashMap::new()),
                fetcher: self.fetcher,
                no_cache: self.no_cache,
                pseudolocalize: self.pseudolocalize,
            }),
        }
    }
}

impl fmt::Debug for LocalizeStoreBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalizeStoreBuilder")
            .field("fetcher", &self.fetcher.as_ref().map(|_| "<PhraseFetcher>"))
            .field("no_cache", &self.no_cache)
            .field("pseudolocalize", &self.pseudolocalize)
            .finish()
    }
}

/// State shared by all clones of one store.
struct StoreInner {
    /// Status channel. Holds the current state and broadcasts a snapshot to
    /// subscribers after every mutation.
    state: watch::Sender<LocalizeState>,
    /// Language token to phrase dictionary. Unbounded; entries leave only
    /// through [`LocalizeStore::clear_cache`].
    cache: RwLock<HashMap<String, Phrases>>,
    /// Optional fetch capability.
    fetcher: Option<PhraseFetcher>,
    /// Caching disabled for fresh dictionaries.
    no_cache: bool,
    /// Pseudo-localize translated output.
    pseudolocalize: bool,
}

/// Owns the current language, phrase cache, and switch status.
///
/// Translation delegates to the process-wide shared translator (see
/// [`static_translate`]); the dictionary activated by the last completed
/// `set_language` of *any* store in the process wins. Concurrent stores
/// therefore clobber each other's active dictionary.
#[derive(Clone)]
pub struct LocalizeStore {
    /// Shared state.
    inner: Arc<StoreInner>,
}

impl LocalizeStore {
    /// Creates a store with no fetcher and default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Returns a builder for configuring a store.
    #[must_use]
    pub fn builder() -> LocalizeStoreBuilder {
        LocalizeStoreBuilder::default()
    }

    /// Switches the current language.
    ///
    /// The dictionary to activate is resolved in order: an explicitly
    /// supplied `phrases` argument; the fetcher, for an uncached language;
    /// the cache entry. An uncached language with no supplied dictionary
    /// and no fetcher fails.
    ///
    /// Never fails outward: failures are recorded in
    /// [`LocalizeState::error`] and leave the current language and active
    /// dictionary untouched. Overlapping calls both run to completion and
    /// the last one to resolve wins.
    pub async fn set_language(&self, language: &str, phrases: Option<Phrases>) {
        tracing::debug!(language, "switching language");
        // A new switch owns the error field from here on.
        self.inner.state.send_modify(|state| state.error = None);

        let resolved = self.resolve(language, phrases).await;
        let outcome = resolved.and_then(|fresh| self.activate(language, fresh));

        match outcome {
            Ok(()) => {
                self.inner.state.send_modify(|state| {
                    state.current_language = Some(language.to_string());
                    state.status = Status::Loaded;
                    state.error = None;
                });
                tracing::debug!(language, "language activated");
            }
            Err(error) => {
                tracing::error!(language, %error, "language switch failed");
                self.inner.state.send_modify(|state| {
                    state.status = Status::Loaded;
                    state.error = Some(Arc::new(error));
                });
            }
        }
    }

    /// Resolves the dictionary for the switch.
    ///
    /// Returns `Ok(Some(_))` for a freshly supplied or fetched dictionary,
    /// `Ok(None)` when the cached entry should be used.
    async fn resolve(
        &self,
        language: &str,
        phrases: Option<Phrases>,
    ) -> Result<Option<Phrases>, LocalizeError> {
        if let Some(supplied) = phrases {
            return Ok(Some(supplied));
        }
        if self.is_language_cached(language) {
            return Ok(None);
        }
        let Some(fetcher) = self.inner.fetcher.clone() else {
            return Err(LocalizeError::MissingPhrases { language: language.to_string() });
        };

        // The fetch is the only suspension point; no lock is held across it.
        self.inner.state.send_modify(|state| state.status = Status::Loading);
        tracing::debug!(language, "fetching phrases");
        fetcher(language.to_string()).await.map(Some).map_err(|source| LocalizeError::Fetch {
            language: language.to_string(),
            source,
        })
    }

    /// Activates the dictionary in the shared translator and caches fresh
    /// ones. `fresh: None` activates the cached entry.
    fn activate(&self, language: &str, fresh: Option<Phrases>) -> Result<(), LocalizeError> {
        let mut cache = self.write_cache();

        let dictionary = match &fresh {
            Some(dictionary) => dictionary,
            // The entry can disappear between resolve and here if a
            // clear_cache races the switch; that is a failed switch.
            None => cache.get(language).ok_or_else(|| LocalizeError::MissingPhrases {
                language: language.to_string(),
            })?,
        };

        {
            let mut translator = static_translate::write();
            translator.clear();
            translator.extend(dictionary);
            translator.set_locale(language);
        }

        if let Some(fresh) = fresh
            && !self.inner.no_cache
        {
            cache.insert(language.to_string(), fresh);
        }
        Ok(())
    }

    /// Returns true if a dictionary for the language is cached.
    #[must_use]
    pub fn is_language_cached(&self, language: &str) -> bool {
        self.read_cache().contains_key(language)
    }

    /// Removes one cache entry, or every entry when no language is given.
    ///
    /// Never touches the current language or the active dictionary, even
    /// when the removed entry belongs to the current language.
    pub fn clear_cache(&self, language: Option<&str>) {
        let mut cache = self.write_cache();
        match language {
            Some(language) => {
                cache.remove(language);
            }
            None => cache.clear(),
        }
    }

    /// Translates a key against the most recently activated dictionary.
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.t_with(key, &TranslateOptions::default())
    }

    /// Translates a key with options against the most recently activated
    /// dictionary. Pseudo-localizes the result when the store was built
    /// with [`LocalizeStoreBuilder::pseudolocalize`].
    #[must_use]
    pub fn t_with(&self, key: &str, options: &TranslateOptions) -> String {
        let translated = static_translate::read().t_with(key, options);
        if self.inner.pseudolocalize {
            pseudo::pseudo_localize(&translated)
        } else {
            translated
        }
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> LocalizeState {
        self.inner.state.borrow().clone()
    }

    /// Returns the language most recently activated by a successful switch.
    #[must_use]
    pub fn current_language(&self) -> Option<String> {
        self.state().current_language
    }

    /// Returns true while a fetch is in flight.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.state().loading()
    }

    /// Returns the most recent failure, if the last switch failed.
    #[must_use]
    pub fn error(&self) -> Option<Arc<LocalizeError>> {
        self.state().error
    }

    /// Subscribes to state snapshots. The receiver observes the latest
    /// value after every mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LocalizeState> {
        self.inner.state.subscribe()
    }

    /// Read access to the cache. Poisoning is recovered; the map is plain
    /// data.
    fn read_cache(&self) -> RwLockReadGuard<'_, HashMap<String, Phrases>> {
        self.inner.cache.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write access to the cache. Poisoning is recovered; the map is plain
    /// data.
    fn write_cache(&self) -> RwLockWriteGuard<'_, HashMap<String, Phrases>> {
        self.inner.cache.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for LocalizeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LocalizeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalizeStore")
            .field("state", &self.state())
            .field("cached_languages", &self.read_cache().keys().collect::<Vec<_>>())
            .field("has_fetcher", &self.inner.fetcher.is_some())
            .field("no_cache", &self.inner.no_cache)
            .field("pseudolocalize", &self.inner.pseudolocalize)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
#[allow(clippy::panic)]
mod tests {
    use googletest::prelude::*;

    use super::*;
    use crate::test_utils::lock_global_translator;

    /// A dictionary with one interpolated phrase.
    fn by_name_phrases() -> Phrases {
        Phrases::from_json_str(r#"{"by_name": "By %{name}"}"#).unwrap()
    }

    #[googletest::test]
    fn initial_state_is_idle_without_error() {
        let store = LocalizeStore::new();
        let state = store.state();

        expect_that!(state.status, eq(Status::Idle));
        expect_that!(state.current_language, none());
        expect_that!(state.error, none());
        expect_that!(store.loading(), eq(false));
    }

    #[tokio::test]
    async fn set_language_with_supplied_phrases_succeeds() {
        let _guard = lock_global_translator();
        let store = LocalizeStore::new();

        store.set_language("en", Some(by_name_phrases())).await;

        assert_eq!(store.current_language().as_deref(), Some("en"));
        assert!(store.error().is_none());
        assert_eq!(store.state().status, Status::Loaded);

        let options = TranslateOptions::new().substitute("name", "John Doe");
        assert_eq!(store.t_with("by_name", &options), "By John Doe");
    }

    #[tokio::test]
    async fn set_language_is_idempotent() {
        let _guard = lock_global_translator();
        let store = LocalizeStore::new();
        let options = TranslateOptions::new().substitute("name", "John Doe");

        store.set_language("en", Some(by_name_phrases())).await;
        let first = store.t_with("by_name", &options);
        store.set_language("en", Some(by_name_phrases())).await;
        let second = store.t_with("by_name", &options);

        assert_eq!(first, second);
        assert_eq!(store.current_language().as_deref(), Some("en"));
    }

    #[tokio::test]
    async fn set_language_without_phrases_cache_or_fetcher_fails() {
        let _guard = lock_global_translator();
        let store = LocalizeStore::new();

        store.set_language("en", None).await;

        let state = store.state();
        assert_eq!(state.status, Status::Loaded);
        assert!(state.current_language.is_none());
        let error = state.error.unwrap();
        assert!(matches!(&*error, LocalizeError::MissingPhrases { language } if language == "en"));
    }

    #[tokio::test]
    async fn failed_switch_keeps_the_active_dictionary() {
        let _guard = lock_global_translator();
        let store = LocalizeStore::new();

        store.set_language("en", Some(by_name_phrases())).await;
        store.set_language("fr", None).await;

        // The failure is recorded but "en" stays active.
        assert!(store.error().is_some());
        assert_eq!(store.current_language().as_deref(), Some("en"));
        let options = TranslateOptions::new().substitute("name", "Jane");
        assert_eq!(store.t_with("by_name", &options), "By Jane");
    }

    #[tokio::test]
    async fn successful_switch_clears_a_previous_error() {
        let _guard = lock_global_translator();
        let store = LocalizeStore::new();

        store.set_language("fr", None).await;
        assert!(store.error().is_some());

        store.set_language("en", Some(by_name_phrases())).await;
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn supplied_phrases_are_cached_by_default() {
        let _guard = lock_global_translator();
        let store = LocalizeStore::new();

        store.set_language("en", Some(by_name_phrases())).await;

        assert!(store.is_language_cached("en"));
        assert!(!store.is_language_cached("fr"));
    }

    #[tokio::test]
    async fn no_cache_disables_caching() {
        let _guard = lock_global_translator();
        let store = LocalizeStore::builder().no_cache().build();

        store.set_language("en", Some(by_name_phrases())).await;

        assert!(!store.is_language_cached("en"));
    }

    #[tokio::test]
    async fn cached_dictionary_is_reused_without_a_fetcher() {
        let _guard = lock_global_translator();
        let store = LocalizeStore::new();
        let other = Phrases::from_json_str(r#"{"salut": "Salut"}"#).unwrap();

        store.set_language("en", Some(by_name_phrases())).await;
        store.set_language("fr", Some(other)).await;
        // Back to "en" with nothing supplied: resolved from the cache.
        store.set_language("en", None).await;

        assert!(store.error().is_none());
        assert_eq!(store.current_language().as_deref(), Some("en"));
        assert!(store.t("by_name").starts_with("By"));
    }

    #[tokio::test]
    async fn clear_cache_removes_a_single_entry() {
        let _guard = lock_global_translator();
        let store = LocalizeStore::new();
        let french = Phrases::from_json_str(r#"{"salut": "Salut"}"#).unwrap();

        store.set_language("en", Some(by_name_phrases())).await;
        store.set_language("fr", Some(french)).await;

        store.clear_cache(Some("en"));

        assert!(!store.is_language_cached("en"));
        assert!(store.is_language_cached("fr"));

        // Removing an absent entry is a no-op.
        store.clear_cache(Some("de"));
        assert!(store.is_language_cached("fr"));
    }

    #[tokio::test]
    async fn clear_cache_without_language_empties_everything() {
        let _guard = lock_global_translator();
        let store = LocalizeStore::new();
        let french = Phrases::from_json_str(r#"{"salut": "Salut"}"#).unwrap();

        store.set_language("en", Some(by_name_phrases())).await;
        store.set_language("fr", Some(french)).await;

        store.clear_cache(None);

        assert!(!store.is_language_cached("en"));
        assert!(!store.is_language_cached("fr"));
    }

    #[tokio::test]
    async fn clearing_the_active_language_keeps_it_usable() {
        let _guard = lock_global_translator();
        let store = LocalizeStore::new();

        store.set_language("fr", Some(Phrases::from_json_str(r#"{"salut": "Salut"}"#).unwrap()))
            .await;
        store.clear_cache(Some("fr"));

        assert_eq!(store.current_language().as_deref(), Some("fr"));
        assert_eq!(store.t("salut"), "Salut");
    }

    #[tokio::test]
    async fn fetcher_is_used_for_uncached_languages() {
        let _guard = lock_global_translator();
        let store = LocalizeStore::builder()
            .fetcher(|language: String| async move {
                assert_eq!(language, "en");
                Ok(Phrases::from_json_str(r#"{"hi": "Hi"}"#).unwrap())
            })
            .build();

        store.set_language("en", None).await;

        assert!(store.error().is_none());
        assert_eq!(store.current_language().as_deref(), Some("en"));
        assert_eq!(store.t("hi"), "Hi");
        assert!(store.is_language_cached("en"));
    }

    #[tokio::test]
    async fn fetcher_rejection_surfaces_as_fetch_error() {
        let _guard = lock_global_translator();
        let store = LocalizeStore::builder()
            .fetcher(|_language: String| async move { Err(BoxError::from("backend down")) })
            .build();

        store.set_language("en", None).await;

        let error = store.error().unwrap();
        match &*error {
            LocalizeError::Fetch { language, source } => {
                assert_eq!(language, "en");
                assert_eq!(source.to_string(), "backend down");
            }
            other => panic!("expected Fetch error, got {other:?}"),
        }
        assert!(store.current_language().is_none());
        assert!(!store.is_language_cached("en"));
    }

    #[tokio::test]
    async fn subscribers_observe_state_changes() {
        let _guard = lock_global_translator();
        let store = LocalizeStore::new();
        let mut receiver = store.subscribe();

        store.set_language("en", Some(by_name_phrases())).await;

        receiver.changed().await.unwrap();
        let state = receiver.borrow_and_update().clone();
        assert_eq!(state.current_language.as_deref(), Some("en"));
        assert_eq!(state.status, Status::Loaded);
    }

    #[tokio::test]
    async fn pseudolocalize_transforms_translated_output() {
        let _guard = lock_global_translator();
        let store = LocalizeStore::builder().pseudolocalize().build();

        store.set_language("en", Some(Phrases::from_json_str(r#"{"hi": "aB?"}"#).unwrap())).await;

        assert_eq!(store.t("hi"), "[ȧȧȧƁ?]");
    }

    #[googletest::test]
    fn debug_impl_hides_internals() {
        let store = LocalizeStore::builder().no_cache().build();

        let debug = format!("{store:?}");

        expect_that!(debug, contains_substring("LocalizeStore"));
        expect_that!(debug, contains_substring("no_cache"));
    }
}
