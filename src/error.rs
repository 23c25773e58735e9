//! Failure taxonomy for language switching and handle access.

use thiserror::Error;

/// Boxed error type carried through from the caller-supplied phrase fetcher.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Defines errors that may occur while switching languages or using handles.
#[derive(Error, Debug)]
pub enum LocalizeError {
    /// `set_language` was called for an uncached language with no phrase
    /// dictionary supplied and no fetcher configured.
    #[error(
        "no phrases provided, language \"{language}\" is not cached, and no fetcher is configured"
    )]
    MissingPhrases {
        /// The language token the switch was attempted for.
        language: String,
    },
    /// The phrase fetcher rejected. The original failure is carried
    /// unchanged as the source.
    #[error("failed to fetch phrases for language \"{language}\"")]
    Fetch {
        /// The language token the fetch was attempted for.
        language: String,
        /// The fetcher's rejection, passed through unchanged.
        #[source]
        source: BoxError,
    },
    /// A `LocalizeHandle` operation was invoked outside of a provided scope.
    #[error("localize handle used outside of a provided scope")]
    NoProvider,
}

impl LocalizeError {
    /// Returns true if this is a `NoProvider` programmer error.
    #[must_use]
    pub const fn is_no_provider(&self) -> bool {
        matches!(self, Self::NoProvider)
    }
}
