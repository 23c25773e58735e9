//! `%{token}` placeholder substitution.

use super::TranslateOptions;

/// Opening delimiter of a placeholder.
const OPEN: &str = "%{";
/// Closing delimiter of a placeholder.
const CLOSE: char = '}';

/// Substitutes `%{token}` placeholders in the template.
///
/// Tokens without a matching substitution are left verbatim, so a template
/// rendered with partial options still shows which placeholders were missed.
#[must_use]
pub(super) fn interpolate(template: &str, options: &TranslateOptions) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        let Some((head, tail)) = rest.split_at_checked(start) else {
            break;
        };
        result.push_str(head);

        // tail begins with the opening delimiter
        let Some(close) = tail.find(CLOSE) else {
            // Unterminated placeholder, keep the remainder as-is.
            result.push_str(tail);
            return result;
        };

        let token = tail.get(OPEN.len()..close).unwrap_or_default();
        match options.substitution_for(token) {
            Some(value) => result.push_str(&value),
            None => result.push_str(tail.get(..=close).unwrap_or_default()),
        }

        rest = tail.get(close + CLOSE.len_utf8()..).unwrap_or_default();
    }

    result.push_str(rest);
    result
}
