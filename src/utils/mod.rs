//! Common utilities and helper functions
//!
//! This module provides shared utilities used across the application.

pub mod error;

/// Capitalize the first letter of each whitespace-separated word and
/// lowercase the rest, joining words with single spaces
///
/// # Examples
///
/// ```
/// use medscrape::utils::title_case;
///
/// assert_eq!(title_case("hay  FEVER"), "Hay Fever");
/// ```
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("common cold"), "Common Cold");
        assert_eq!(title_case("  covid 19 "), "Covid 19");
        assert_eq!(title_case("ÉCZEMA"), "Éczema");
        assert_eq!(title_case(""), "");
    }
}
