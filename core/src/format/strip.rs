//! Removes transport envelope artifacts from raw webhook responses.
//!
//! The webhook occasionally wraps its payload in framing left over from the
//! upstream transport: an index-prefixed brace fragment at the start, bare
//! `$N` back-reference tokens, inline `$@N` tokens, and literal `\n` escape
//! sequences instead of real line breaks. Stripping is best-effort and never
//! fails; unrecognized input passes through with only a trim.

#![allow(clippy::expect_used)]

use lazy_static::lazy_static;
use regex_lite::Regex;

lazy_static! {
    /// Leading envelope such as `0:{"a":"b"} 1:T79e,`. The trailing
    /// numeric-colon segment and its tag are optional.
    static ref ENVELOPE_PREFIX: Regex =
        Regex::new(r#"^\d+:\s*\{[^}]*\}\s*(?:\d*:(?:\w+,)?)?"#).expect("valid regex");

    /// The whole text being a bare back-reference token like `$1`.
    static ref BARE_BACKREF: Regex = Regex::new(r"^\$\d+$").expect("valid regex");

    /// Inline back-reference tokens like `$@1`, anywhere in the text.
    static ref INLINE_BACKREF: Regex = Regex::new(r"\$@\d+").expect("valid regex");
}

/// Strip envelope markers and normalize escaped newlines. Idempotent.
pub fn strip_markers(text: &str) -> String {
    let text = ENVELOPE_PREFIX.replace(text, "");
    let text = BARE_BACKREF.replace(&text, "");
    let text = INLINE_BACKREF.replace_all(&text, "");
    text.replace("\\n", "\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strips_envelope_prefix_with_tag() {
        let raw = "0:{\"a\":\"b\"} 1:T79e,Sales Report";
        assert_eq!(strip_markers(raw), "Sales Report");
    }

    #[test]
    fn strips_envelope_prefix_without_trailing_segment() {
        let raw = "2:{\"x\":1} Total sales up";
        assert_eq!(strip_markers(raw), "Total sales up");
    }

    #[test]
    fn strips_bare_backref_token() {
        assert_eq!(strip_markers("$3"), "");
    }

    #[test]
    fn bare_backref_must_cover_whole_text() {
        assert_eq!(strip_markers("$3 remaining"), "$3 remaining");
    }

    #[test]
    fn strips_inline_backrefs_everywhere() {
        assert_eq!(strip_markers("before $@1 middle $@22 after"), "before  middle  after");
    }

    #[test]
    fn unescapes_newlines() {
        assert_eq!(strip_markers("line one\\nline two"), "line one\nline two");
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(strip_markers("  hello  "), "hello");
    }

    #[test]
    fn stripping_is_idempotent() {
        let raw = "0:{\"a\":\"b\"} 1:T79e,Report\\nwith $@4 tokens";
        let once = strip_markers(raw);
        assert_eq!(strip_markers(&once), once);
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(strip_markers("Note: figures are estimates"), "Note: figures are estimates");
    }
}
