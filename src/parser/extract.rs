//! Detail page to [`ConditionRecord`] extraction
//!
//! Detail pages carry no stable ids, so fields are inferred from structure:
//! every `h2` opens a field named after its text, and the field's content is
//! whatever the [`ContentRules`] find in the sibling elements that follow it,
//! up to the next `h2`.

use scraper::{ElementRef, Html};
use url::Url;

use crate::models::ConditionRecord;
use crate::parser::keys::normalize_heading;
use crate::parser::rules::{visible_text, ContentRules};
use crate::parser::selectors::{PAGE_HEADING, SECTION_HEADING, SECTION_HEADING_TAG, TITLE};
use crate::utils::title_case;

/// Separator between content blocks of one field
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Name used when neither the page nor its URL yields one
pub const UNKNOWN_CONDITION: &str = "Unknown";

/// Heading/sibling-traversal extractor for condition detail pages
#[derive(Debug, Clone)]
pub struct ConditionExtractor {
    rules: ContentRules,
}

impl ConditionExtractor {
    /// Extractor using the default rules for `marker`
    pub fn new(marker: impl Into<String>) -> Self {
        Self::with_rules(ContentRules::new(marker))
    }

    pub fn with_rules(rules: ContentRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ContentRules {
        &self.rules
    }

    /// Extract one record from a detail page
    ///
    /// Never fails: markup that hides an expected element only degrades the
    /// result (fallback name, omitted field).
    pub fn extract(&self, html: &str, url: &str) -> ConditionRecord {
        let document = Html::parse_document(html);
        let mut record = ConditionRecord::new(resolve_name(&document, url), url);

        for heading in document.select(&SECTION_HEADING) {
            let heading_text = visible_text(heading).unwrap_or_default();
            let blocks = self.section_blocks(heading);

            if blocks.is_empty() {
                tracing::trace!(url, heading = %heading_text, "Heading has no content, skipping");
                continue;
            }

            let key = record.insert_field(
                &normalize_heading(&heading_text),
                blocks.join(BLOCK_SEPARATOR),
            );
            tracing::trace!(
                url,
                heading = %heading_text,
                key = %key,
                blocks = blocks.len(),
                "Extracted field"
            );
        }

        record
    }

    /// Content blocks in the siblings between `heading` and the next section heading
    ///
    /// A sibling that wraps the next heading ends the field as well.
    fn section_blocks(&self, heading: ElementRef<'_>) -> Vec<String> {
        heading
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .take_while(|sibling| !opens_section(*sibling))
            .flat_map(|sibling| self.rules.apply(sibling))
            .collect()
    }
}

fn opens_section(element: ElementRef<'_>) -> bool {
    element.value().name() == SECTION_HEADING_TAG
        || element.select(&SECTION_HEADING).next().is_some()
}

/// Condition name: first `h1`, else the `<title>` before `|`, else the URL slug
fn resolve_name(document: &Html, url: &str) -> String {
    if let Some(name) = document
        .select(&PAGE_HEADING)
        .next()
        .and_then(visible_text)
    {
        return name;
    }

    if let Some(name) = document
        .select(&TITLE)
        .next()
        .and_then(visible_text)
        .and_then(|title| {
            let first = title.split('|').next().unwrap_or_default().trim();
            (!first.is_empty()).then(|| first.to_string())
        })
    {
        return name;
    }

    name_from_url(url)
}

/// Derive a display name from the last path segment of a URL
///
/// # Examples
///
/// ```
/// use medscrape::parser::extract::name_from_url;
///
/// assert_eq!(name_from_url("https://x/conditions/chronic-kidney-disease/"), "Chronic Kidney Disease");
/// ```
pub fn name_from_url(url: &str) -> String {
    let segment = match Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .map(String::from),
        Err(_) => url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .map(String::from),
    };

    let name = title_case(&segment.unwrap_or_default().replace('-', " "));
    if name.is_empty() {
        UNKNOWN_CONDITION.to_string()
    } else {
        name
    }
}
