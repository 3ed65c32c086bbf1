//! Invisible-mark handling.
//!
//! WhatsApp sprinkles directional marks and zero-width characters through
//! exports, most visibly in front of iOS attachment lines and in the sender
//! field of anonymized participants. They have to go before grammar
//! matching and never end up in stored content.

use std::borrow::Cow;

/// Returns `true` for marks that carry no visible content.
///
/// Covers LRM/RLM, zero-width space/non-joiner/joiner, word joiner, BOM,
/// and the bidi embedding/override/isolate controls.
pub fn is_invisible_mark(c: char) -> bool {
    matches!(
        c,
        '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'
            | '\u{2066}'..='\u{2069}'
            | '\u{FEFF}'
    )
}

/// Removes every invisible mark from `line`.
///
/// Borrows when there is nothing to strip. Idempotent.
///
/// ```rust
/// use chatscope::parsing::text::strip_invisible;
///
/// assert_eq!(strip_invisible("\u{200e}[12/11/23, 9:45 pm]"), "[12/11/23, 9:45 pm]");
/// assert_eq!(strip_invisible("plain"), "plain");
/// ```
pub fn strip_invisible(line: &str) -> Cow<'_, str> {
    if line.chars().any(is_invisible_mark) {
        Cow::Owned(line.chars().filter(|c| !is_invisible_mark(*c)).collect())
    } else {
        Cow::Borrowed(line)
    }
}

/// Returns `true` if `text` is empty or made only of whitespace
/// (non-breaking spaces included) and invisible marks.
pub fn is_blank_or_invisible(text: &str) -> bool {
    text.chars()
        .all(|c| c.is_whitespace() || c == '\u{00A0}' || is_invisible_mark(c))
}
