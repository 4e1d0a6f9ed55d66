//! Text sanitization for content pulled out of detail pages
//!
//! Extracted blocks are stored as single-paragraph strings, so every run of
//! whitespace (including line breaks inside the markup) collapses to one
//! space. Paragraph breaks between blocks are added by the extractor.

use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Sanitize one block of extracted text
///
/// 1. Remove zero-width characters
/// 2. Remove control characters
/// 3. Collapse whitespace runs (non-breaking spaces included)
/// 4. Trim
///
/// # Examples
///
/// ```
/// use medscrape::parser::sanitize::sanitize_text;
///
/// let dirty = "Fever\u{200B} and\n\n   chills\u{a0}";
/// assert_eq!(sanitize_text(dirty), "Fever and chills");
/// ```
pub fn sanitize_text(text: &str) -> String {
    let result = remove_zero_width(text);
    let result = remove_control_chars(&result);
    collapse_whitespace(&result).trim().to_string()
}

/// Remove zero-width spaces and similar invisible characters
///
/// Removes:
/// - \u{200B}-\u{200F} Zero-width space, joiners and direction marks
/// - \u{2028}-\u{202F} Line/paragraph separators and formatting characters
/// - \u{FEFF} Byte order mark (BOM)
pub fn remove_zero_width(text: &str) -> String {
    text.chars()
        .filter(|c| {
            !matches!(*c,
                '\u{200B}'..='\u{200F}' |
                '\u{2028}'..='\u{202F}' |
                '\u{FEFF}'
            )
        })
        .collect()
}

/// Remove control characters except whitespace ones (`\n`, `\r`, `\t`)
pub fn remove_control_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || c.is_whitespace())
        .collect()
}

/// Collapse every whitespace run into a single space
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").to_string()
}

/// Check if text contains meaningful content
pub fn has_content(text: &str) -> bool {
    !text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_text_full() {
        let dirty = "\u{FEFF}  Headache\u{200B}   and\n\n\n\tnausea  ";
        assert_eq!(sanitize_text(dirty), "Headache and nausea");
    }

    #[test]
    fn test_remove_zero_width() {
        let text = "Test\u{200B}\u{200C}\u{200D}\u{200E}\u{200F}Complete";
        assert_eq!(remove_zero_width(text), "TestComplete");
    }

    #[test]
    fn test_line_separator_removal() {
        let text = "Line1\u{2028}Line2\u{2029}Line3";
        assert_eq!(remove_zero_width(text), "Line1Line2Line3");
    }

    #[test]
    fn test_remove_control_chars() {
        let text = "Hello\x00World\x07Test\nNewline";
        let clean = remove_control_chars(text);
        assert!(!clean.contains('\x00'));
        assert!(!clean.contains('\x07'));
        assert!(clean.contains('\n'));
    }

    #[test]
    fn test_nbsp_collapses() {
        assert_eq!(collapse_whitespace("a\u{a0}\u{a0}b"), "a b");
    }

    #[test]
    fn test_has_content() {
        assert!(has_content("Hello"));
        assert!(!has_content(""));
        assert!(!has_content("   \n\t  "));
    }
}
