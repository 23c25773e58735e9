//! Pseudo-localization transform.
//!
//! Deterministic character substitution used to visually flag hardcoded or
//! untranslated strings during development: every Latin letter maps to an
//! accented look-alike, vowels are tripled to stretch layouts, and the
//! result is wrapped in `[...]` so truncation is obvious. Not meant for
//! production output.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Characters tripled by the transform.
const VOWELS: &[char] = &['a', 'A', 'e', 'E', 'i', 'I', 'o', 'O', 'u', 'U', 'y', 'Y'];

/// Accented look-alike substitution table.
/// Based on <https://hg.mozilla.org/mozreview/gecko/rev/a96cf6ff334617c3d51e325ece5f27eaa0fefac9#index_header>
static SUBSTITUTIONS: LazyLock<HashMap<char, char>> = LazyLock::new(|| {
    [
        ('a', 'ȧ'),
        ('A', 'Ȧ'),
        ('b', 'ƀ'),
        ('B', 'Ɓ'),
        ('c', 'ƈ'),
        ('C', 'Ƈ'),
        ('d', 'ḓ'),
        ('D', 'Ḓ'),
        ('e', 'ḗ'),
        ('E', 'Ḗ'),
        ('f', 'ƒ'),
        ('F', 'Ƒ'),
        ('g', 'ɠ'),
        ('G', 'Ɠ'),
        ('h', 'ħ'),
        ('H', 'Ħ'),
        ('i', 'ī'),
        ('I', 'Ī'),
        ('j', 'ĵ'),
        ('J', 'Ĵ'),
        ('k', 'ķ'),
        ('K', 'Ķ'),
        ('l', 'ŀ'),
        ('L', 'Ŀ'),
        ('m', 'ḿ'),
        ('M', 'Ḿ'),
        ('n', 'ƞ'),
        ('N', 'Ƞ'),
        ('o', 'ǿ'),
        ('O', 'Ǿ'),
        ('p', 'ƥ'),
        ('P', 'Ƥ'),
        ('q', 'ɋ'),
        ('Q', 'Ɋ'),
        ('r', 'ř'),
        ('R', 'Ř'),
        ('s', 'ş'),
        ('S', 'Ş'),
        ('t', 'ŧ'),
        ('T', 'Ŧ'),
        ('v', 'ŭ'),
        ('V', 'Ŭ'),
        ('u', 'ṽ'),
        ('U', 'Ṽ'),
        ('w', 'ẇ'),
        ('W', 'Ẇ'),
        ('x', 'ẋ'),
        ('X', 'Ẋ'),
        ('y', 'ẏ'),
        ('Y', 'Ẏ'),
        ('z', 'ẑ'),
        ('Z', 'Ẑ'),
    ]
    .into_iter()
    .collect()
});

/// Pseudo-localizes a string.
///
/// Characters without a substitution pass through unchanged.
///
/// ```
/// use localize::pseudo_localize;
///
/// assert_eq!(pseudo_localize("aB?"), "[ȧȧȧƁ?]");
/// ```
#[must_use]
pub fn pseudo_localize(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + 2);
    result.push('[');
    for ch in text.chars() {
        match SUBSTITUTIONS.get(&ch) {
            Some(substitute) if VOWELS.contains(&ch) => {
                for _ in 0..3 {
                    result.push(*substitute);
                }
            }
            Some(substitute) => result.push(*substitute),
            None => result.push(ch),
        }
    }
    result.push(']');
    result
}
