//! Presentational binding: a key plus options rendered to a localized
//! string.
//!
//! [`Localize`] is the leaf consumer: build one from a phrase key, attach
//! options and an optional transform, and render it against the ambient
//! handle (or an explicit one). It holds no state; after observing a store
//! update, render again for the new language.

use std::fmt;

use crate::context::{
    self,
    LocalizeHandle,
};
use crate::error::LocalizeError;
use crate::translator::TranslateOptions;

/// Pure transform applied to the translated string before it is returned.
type Transform = Box<dyn Fn(String) -> String + Send + Sync>;

/// A renderable localized string: key, options, optional transform.
///
/// ```no_run
/// use localize::Localize;
///
/// let greeting = Localize::new("by_name")
///     .options(localize::TranslateOptions::new().substitute("name", "John Doe"))
///     .uppercase()
///     .render()?;
/// # Ok::<(), localize::LocalizeError>(())
/// ```
pub struct Localize {
    /// The phrase key to translate.
    key: String,
    /// Options for the translation.
    options: TranslateOptions,
    /// Transform applied to the translated string.
    transform: Option<Transform>,
}

impl Localize {
    /// Creates a binding for the phrase key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into(), options: TranslateOptions::default(), transform: None }
    }

    /// Sets the translation options. A plain number becomes the
    /// pluralization count.
    #[must_use]
    pub fn options(mut self, options: impl Into<TranslateOptions>) -> Self {
        self.options = options.into();
        self
    }

    /// Sets a pure transform applied to the translated string, replacing
    /// any previous one.
    #[must_use]
    pub fn transform(
        mut self,
        transform: impl Fn(String) -> String + Send + Sync + 'static,
    ) -> Self {
        self.transform = Some(Box::new(transform));
        self
    }

    /// Upper-cases the translated string.
    #[must_use]
    pub fn uppercase(self) -> Self {
        self.transform(|translated| translated.to_uppercase())
    }

    /// Lower-cases the translated string.
    #[must_use]
    pub fn lowercase(self) -> Self {
        self.transform(|translated| translated.to_lowercase())
    }

    /// Renders against the ambient handle.
    ///
    /// # Errors
    /// Fails with [`LocalizeError::NoProvider`] outside a provided scope.
    pub fn render(&self) -> Result<String, LocalizeError> {
        self.render_with(&context::current())
    }

    /// Renders against an explicit handle.
    ///
    /// # Errors
    /// Fails with [`LocalizeError::NoProvider`] when the handle is unbound.
    pub fn render_with(&self, handle: &LocalizeHandle) -> Result<String, LocalizeError> {
        let translated = handle.t_with(&self.key, &self.options)?;
        Ok(match &self.transform {
            Some(transform) => transform(translated),
            None => translated,
        })
    }
}

impl fmt::Debug for Localize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Localize")
            .field("key", &self.key)
            .field("options", &self.options)
            .field("transform", &self.transform.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
