//! Phrase dictionary definitions.
//!
//! A [`Phrases`] value is the unit handed to [`set_language`] or returned by
//! a fetcher: a recursive mapping from string keys to either a localized
//! template or a nested dictionary, mirroring the nested JSON layout of
//! translation files (`locales/en.json` and friends).
//!
//! [`set_language`]: crate::store::LocalizeStore::set_language

use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize,
};

/// A single entry in a phrase dictionary: a leaf template or a nested
/// dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PhraseValue {
    /// A localized template, possibly containing `%{token}` placeholders and
    /// `||||`-separated plural variants.
    Phrase(String),
    /// A nested dictionary.
    Nested(Phrases),
}

impl From<&str> for PhraseValue {
    fn from(phrase: &str) -> Self {
        Self::Phrase(phrase.to_string())
    }
}

impl From<String> for PhraseValue {
    fn from(phrase: String) -> Self {
        Self::Phrase(phrase)
    }
}

impl From<Phrases> for PhraseValue {
    fn from(nested: Phrases) -> Self {
        Self::Nested(nested)
    }
}

/// A phrase dictionary for one language.
///
/// Immutable once activated: a language switch replaces the active
/// dictionary wholesale rather than mutating it in place.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phrases(HashMap<String, PhraseValue>);

impl Phrases {
    /// Creates an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Parses a dictionary from a JSON object string.
    ///
    /// # Errors
    /// Returns an error if the text is not valid JSON or if any leaf is not
    /// a string or a nested object.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Inserts an entry, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PhraseValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns the entry for the key, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PhraseValue> {
        self.0.get(key)
    }

    /// Returns true if the dictionary has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Flattens the nested dictionary into a separator-joined key map.
    ///
    /// # Examples
    /// ```
    /// use localize::Phrases;
    ///
    /// let phrases = Phrases::from_json_str(
    ///     r#"{"common": {"hello": "Hello", "goodbye": "Goodbye"}}"#,
    /// )
    /// .unwrap();
    ///
    /// let flattened = phrases.flatten(".");
    /// assert_eq!(flattened.get("common.hello"), Some(&"Hello".to_string()));
    /// assert_eq!(flattened.get("common.goodbye"), Some(&"Goodbye".to_string()));
    /// ```
    #[must_use]
    pub fn flatten(&self, separator: &str) -> HashMap<String, String> {
        let mut result = HashMap::new();
        self.flatten_into(separator, None, &mut result);
        result
    }

    /// Recursive worker for [`Self::flatten`], threading the key prefix.
    fn flatten_into(
        &self,
        separator: &str,
        prefix: Option<&str>,
        result: &mut HashMap<String, String>,
    ) {
        for (key, value) in &self.0 {
            let full_key = prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
            match value {
                PhraseValue::Phrase(phrase) => {
                    result.insert(full_key, phrase.clone());
                }
                PhraseValue::Nested(nested) => {
                    nested.flatten_into(separator, Some(&full_key), result);
                }
            }
        }
    }
}

impl TryFrom<serde_json::Value> for Phrases {
    type Error = serde_json::Error;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value)
    }
}

impl<K: Into<String>, V: Into<PhraseValue>> FromIterator<(K, V)> for Phrases {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
