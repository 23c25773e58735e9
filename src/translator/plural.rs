//! Plural variant selection.
//!
//! A phrase template may carry several plural variants separated by
//! [`PLURAL_DELIMITER`]; the variant is chosen by the active locale's
//! plural-rule family and the `smart_count` option.

/// Separator between plural variants within one phrase template.
const PLURAL_DELIMITER: &str = "||||";

/// Plural-rule families, grouping locales that share a variant-index rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PluralFamily {
    /// Six-form rule (ar).
    Arabic,
    /// Single form regardless of count (id, ja, ko, lo, ms, th, zh).
    Chinese,
    /// Three-form rule keyed on the last digit (bs, hr, sr, ru, uk).
    Slavic,
    /// Three-form rule with a 2..=4 paucal (cs, sk).
    Czech,
    /// Two forms, plural from two upwards (fr, tl, pt-BR).
    French,
    /// Two forms, singular only at exactly one. The default family.
    German,
    /// Two forms keyed on the last digit (is).
    Icelandic,
    /// Three-form rule with a teens exception (pl).
    Polish,
}

/// Maps a locale token to its plural-rule family.
///
/// Matching is on the primary language subtag, case-insensitively, with
/// `pt-BR` special-cased ahead of it. Unknown locales fall back to the
/// default two-form family.
fn family_for_locale(locale: &str) -> PluralFamily {
    let normalized = locale.to_lowercase().replace('_', "-");
    if normalized == "pt-br" {
        return PluralFamily::French;
    }

    let primary = normalized.split('-').next().unwrap_or_default();
    match primary {
        "ar" => PluralFamily::Arabic,
        "id" | "ja" | "ko" | "lo" | "ms" | "th" | "zh" => PluralFamily::Chinese,
        "bs" | "hr" | "sr" | "srl" | "ru" | "uk" => PluralFamily::Slavic,
        "cs" | "sk" => PluralFamily::Czech,
        "fr" | "tl" => PluralFamily::French,
        "is" => PluralFamily::Icelandic,
        "pl" => PluralFamily::Polish,
        _ => PluralFamily::German,
    }
}

/// Returns the variant index for the family and count.
fn plural_index(family: PluralFamily, count: i64) -> usize {
    let last_two = count.rem_euclid(100);
    let last = count.rem_euclid(10);
    match family {
        PluralFamily::Arabic => match count {
            0..=2 => usize::try_from(count).unwrap_or(0),
            _ if (3..=10).contains(&last_two) => 3,
            _ if last_two >= 11 => 4,
            _ => 5,
        },
        PluralFamily::Chinese => 0,
        PluralFamily::Slavic => {
            if last == 1 && last_two != 11 {
                0
            } else if (2..=4).contains(&last) && !(12..=14).contains(&last_two) {
                1
            } else {
                2
            }
        }
        PluralFamily::Czech => match count {
            1 => 0,
            2..=4 => 1,
            _ => 2,
        },
        PluralFamily::French => usize::from(count > 1),
        PluralFamily::German => usize::from(count != 1),
        PluralFamily::Icelandic => usize::from(last != 1 || last_two == 11),
        PluralFamily::Polish => {
            if count == 1 {
                0
            } else if (2..=4).contains(&last) && !(12..=14).contains(&last_two) {
                1
            } else {
                2
            }
        }
    }
}

/// Picks the plural variant of the phrase for the locale and count.
///
/// A phrase without the delimiter is returned unchanged. Each variant is
/// trimmed of surrounding whitespace. An index past the available variants
/// falls back to the first one.
#[must_use]
pub(super) fn choose_plural_form<'a>(phrase: &'a str, locale: &str, count: i64) -> &'a str {
    if !phrase.contains(PLURAL_DELIMITER) {
        return phrase;
    }

    let variants: Vec<&str> = phrase.split(PLURAL_DELIMITER).map(str::trim).collect();
    let index = plural_index(family_for_locale(locale), count);
    variants
        .get(index)
        .or_else(|| variants.first())
        .copied()
        .unwrap_or(phrase)
}
