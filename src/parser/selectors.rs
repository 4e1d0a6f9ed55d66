//! CSS selectors shared by the frontier discoverer and the record extractor

use scraper::Selector;
use std::sync::LazyLock;

// Helper macro to parse hardcoded selectors
macro_rules! parse_selector {
    ($s:expr) => {
        Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s))
    };
}

/// Hyperlinks on the index page
pub static LINK: LazyLock<Selector> = LazyLock::new(|| parse_selector!("a[href]"));

/// Top-level heading holding the condition name
pub static PAGE_HEADING: LazyLock<Selector> = LazyLock::new(|| parse_selector!("h1"));

/// Document title, the first fallback for the condition name
pub static TITLE: LazyLock<Selector> = LazyLock::new(|| parse_selector!("title"));

/// Second-level headings delimiting fields
pub static SECTION_HEADING: LazyLock<Selector> = LazyLock::new(|| parse_selector!("h2"));

/// Tag name of [`SECTION_HEADING`], used when walking siblings
pub const SECTION_HEADING_TAG: &str = "h2";

/// Elements whose text is never visible
pub const INVISIBLE_TAGS: &[&str] = &["script", "style", "noscript", "template"];
