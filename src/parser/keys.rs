//! Heading text to field key normalization
//!
//! Headings on detail pages are free-form ("Symptoms of Migraine",
//! "What is it?"). They are reduced to stable snake_case keys and made
//! unique per record through a [`KeyRegistry`].

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Reserved key holding the display name
pub const CONDITION_KEY: &str = "condition";

/// Reserved key holding the source address
pub const URL_KEY: &str = "url";

/// Slot used when a heading has no alphanumeric content at all
pub const FALLBACK_KEY: &str = "section";

static OF_CLAUSE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+of\b").unwrap());

static NON_ALNUM_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^0-9a-z]+").unwrap());

/// Normalize heading text into a field key
///
/// 1. Trim and lowercase
/// 2. Drop a trailing clause starting at the word "of"
/// 3. Collapse non-alphanumeric runs into `_`, trim underscores
/// 4. If nothing is left, redo step 3 without dropping the clause
///
/// # Examples
///
/// ```
/// use medscrape::parser::keys::normalize_heading;
///
/// assert_eq!(normalize_heading("Symptoms of Migraine"), "symptoms");
/// assert_eq!(normalize_heading("  What Is It?  "), "what_is_it");
/// assert_eq!(normalize_heading(""), "");
/// ```
pub fn normalize_heading(text: &str) -> String {
    let text = text.trim().to_lowercase();

    let core = match OF_CLAUSE_REGEX.find(&text) {
        Some(m) => &text[..m.start()],
        None => text.as_str(),
    };

    let key = slugify(core);
    if key.is_empty() {
        slugify(&text)
    } else {
        key
    }
}

fn slugify(text: &str) -> String {
    NON_ALNUM_REGEX
        .replace_all(text, "_")
        .trim_matches('_')
        .to_string()
}

/// Per-record set of keys already in use
///
/// Seeded with [`CONDITION_KEY`] and [`URL_KEY`] so extracted headings can
/// never shadow them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRegistry {
    used: HashSet<String>,
}

impl KeyRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            used: [CONDITION_KEY, URL_KEY].into_iter().map(String::from).collect(),
        }
    }

    /// Claim `key`, or the first free `key_2`, `key_3`, ... variant.
    ///
    /// An empty key claims [`FALLBACK_KEY`] instead.
    pub fn reserve(&mut self, key: &str) -> String {
        let base = if key.is_empty() { FALLBACK_KEY } else { key };

        let mut candidate = base.to_string();
        let mut n = 2;
        while self.used.contains(&candidate) {
            candidate = format!("{base}_{n}");
            n += 1;
        }

        self.used.insert(candidate.clone());
        candidate
    }

    pub fn contains(&self, key: &str) -> bool {
        self.used.contains(key)
    }
}

impl Default for KeyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
