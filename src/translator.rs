//! The translation engine: one active dictionary, placeholder substitution,
//! and pluralization.
//!
//! A [`Translator`] holds the flattened phrases of exactly one language.
//! Switching languages replaces its contents wholesale; see
//! [`LocalizeStore::set_language`](crate::store::LocalizeStore::set_language).

/// `%{token}` placeholder substitution.
mod interpolate;
/// Plural variant selection.
mod plural;

use std::collections::HashMap;

use crate::phrases::Phrases;

/// Separator used when flattening nested dictionaries into lookup keys.
const KEY_SEPARATOR: &str = ".";

/// The reserved substitution token carrying the pluralization count.
const SMART_COUNT: &str = "smart_count";

/// Options for a single translation: a pluralization count and named
/// placeholder substitutions.
///
/// A plain number converts into options carrying only `smart_count`:
///
/// ```
/// use localize::TranslateOptions;
///
/// let options = TranslateOptions::from(4);
/// assert_eq!(options, TranslateOptions::new().smart_count(4));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Pluralization count, also substitutable as `%{smart_count}`.
    smart_count: Option<i64>,
    /// Named `%{token}` substitutions.
    substitutions: HashMap<String, String>,
}

impl TranslateOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pluralization count.
    #[must_use]
    pub const fn smart_count(mut self, count: i64) -> Self {
        self.smart_count = Some(count);
        self
    }

    /// Adds a named substitution for a `%{token}` placeholder.
    #[must_use]
    pub fn substitute(mut self, token: impl Into<String>, value: impl ToString) -> Self {
        self.substitutions.insert(token.into(), value.to_string());
        self
    }

    /// Returns the pluralization count, if set.
    #[must_use]
    pub(crate) const fn count(&self) -> Option<i64> {
        self.smart_count
    }

    /// Resolves the substitution value for a placeholder token.
    ///
    /// Named substitutions win over the reserved `smart_count` token.
    pub(crate) fn substitution_for(&self, token: &str) -> Option<String> {
        if let Some(value) = self.substitutions.get(token) {
            return Some(value.clone());
        }
        if token == SMART_COUNT {
            return self.smart_count.map(|count| count.to_string());
        }
        None
    }
}

impl From<i64> for TranslateOptions {
    fn from(count: i64) -> Self {
        Self::new().smart_count(count)
    }
}

/// Stores the flattened phrases of one language and answers translations.
///
/// Lookups use flattened keys (`"common.hello"`). A missing key logs a
/// warning and returns the key itself, so untranslated output is visible
/// rather than silently empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translator {
    /// Active locale token, drives plural variant selection.
    locale: String,
    /// Flattened key to template mapping.
    phrases: HashMap<String, String>,
}

impl Translator {
    /// Creates an empty translator with the `"en"` locale.
    #[must_use]
    pub fn new() -> Self {
        Self { locale: "en".to_string(), phrases: HashMap::new() }
    }

    /// Returns the active locale token.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Sets the active locale token.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    /// Merges a phrase dictionary into the active set, flattening nested
    /// keys. Existing entries with the same key are overwritten.
    pub fn extend(&mut self, phrases: &Phrases) {
        self.phrases.extend(phrases.flatten(KEY_SEPARATOR));
    }

    /// Removes all phrases. The locale is unchanged.
    pub fn clear(&mut self) {
        self.phrases.clear();
    }

    /// Returns true if a phrase exists for the flattened key.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.phrases.contains_key(key)
    }

    /// Translates a key with no options.
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.t_with(key, &TranslateOptions::default())
    }

    /// Translates a key, selecting a plural variant when a count is given
    /// and substituting `%{token}` placeholders.
    #[must_use]
    pub fn t_with(&self, key: &str, options: &TranslateOptions) -> String {
        let Some(template) = self.phrases.get(key) else {
            tracing::warn!(key, locale = %self.locale, "missing translation for key");
            return key.to_string();
        };

        let template = options
            .count()
            .map_or(template.as_str(), |count| {
                plural::choose_plural_form(template, &self.locale, count)
            });

        interpolate::interpolate(template, options)
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}
