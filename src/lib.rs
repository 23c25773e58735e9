//! localize
//!
//! Language switching, phrase caching, and `%{token}` interpolation for
//! localized applications.
//!
//! A [`LocalizeStore`] owns the current language, a cache of phrase
//! dictionaries, and the loading/error status of the most recent switch.
//! Dictionaries are nested JSON-shaped [`Phrases`]; translation supports
//! `%{token}` interpolation and `||||`-separated plural variants keyed on a
//! `smart_count`. [`context::provide`] installs a store as the ambient one
//! for a call tree, and [`static_translate`] translates from code outside
//! any scope.
//!
//! ```
//! use localize::{LocalizeStore, Phrases, TranslateOptions};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let store = LocalizeStore::new();
//! let phrases = Phrases::from_json_str(r#"{"by_name": "By %{name}"}"#).unwrap();
//! store.set_language("en", Some(phrases)).await;
//!
//! let options = TranslateOptions::new().substitute("name", "John Doe");
//! assert_eq!(store.t_with("by_name", &options), "By John Doe");
//! # }
//! ```

/// Presentational binding rendering a key to a localized string.
pub mod binding;
/// Ambient store access: provider scope and handles.
pub mod context;
/// Failure taxonomy.
pub mod error;
/// Phrase dictionary definitions.
pub mod phrases;
/// Pseudo-localization transform.
pub mod pseudo;
/// Process-wide translation outside any provided scope.
pub mod static_translate;
/// Language switching, phrase caching, and status.
pub mod store;
/// The translation engine.
pub mod translator;

/// Test utilities shared across unit test modules.
mod test_utils;

pub use binding::Localize;
pub use context::{
    LocalizeHandle,
    current,
    provide,
    provide_sync,
};
pub use error::{
    BoxError,
    LocalizeError,
};
pub use phrases::{
    PhraseValue,
    Phrases,
};
pub use pseudo::pseudo_localize;
pub use store::{
    LocalizeState,
    LocalizeStore,
    LocalizeStoreBuilder,
    PhraseFetcher,
    Status,
};
pub use translator::{
    TranslateOptions,
    Translator,
};
