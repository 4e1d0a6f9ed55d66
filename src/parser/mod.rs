//! HTML parsing and data extraction
//!
//! This module turns condition detail pages into [`ConditionRecord`]s:
//!
//! - [`keys`] - heading text to field key normalization and collision handling
//! - [`rules`] - ordered content rules deciding which elements carry text
//! - [`extract`] - the heading/sibling traversal producing one record per page
//! - [`sanitize`] - text cleanup for extracted blocks
//! - [`selectors`] - shared CSS selectors
//!
//! [`ConditionRecord`]: crate::models::ConditionRecord

pub mod extract;
pub mod keys;
pub mod rules;
pub mod sanitize;
pub mod selectors;

// Re-export main extractor and public types
pub use extract::ConditionExtractor;
pub use keys::{normalize_heading, KeyRegistry};
pub use rules::{ContentRule, ContentRules};
