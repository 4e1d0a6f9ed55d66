//! Content rules applied to each sibling element under a section heading
//!
//! Which elements carry readable content depends on the site's current
//! markup. Each [`ContentRule`] pairs a predicate with an extractor; rules
//! are tried in order and the first one that yields text for an element
//! wins. New markup variants are handled by appending a rule.

use scraper::ElementRef;

use crate::parser::sanitize::{has_content, sanitize_text};
use crate::parser::selectors::INVISIBLE_TAGS;

/// Decides whether a rule is worth running on an element
pub type RulePredicate = fn(ElementRef<'_>, &str) -> bool;

/// Pulls text blocks out of an element
pub type RuleExtractor = fn(ElementRef<'_>, &str) -> Vec<String>;

/// A (predicate, extractor) pair evaluated against one sibling element
#[derive(Debug, Clone, Copy)]
pub struct ContentRule {
    pub name: &'static str,
    pub applies: RulePredicate,
    pub extract: RuleExtractor,
}

/// The sibling itself is a content block
pub const SELF_MARKER: ContentRule = ContentRule {
    name: "self-marker",
    applies: carries_marker,
    extract: own_text,
};

/// Content blocks are wrapped inside the sibling
pub const NESTED_MARKER: ContentRule = ContentRule {
    name: "nested-marker",
    applies: contains_marker,
    extract: outermost_marked_text,
};

/// Ordered rule list bound to one structural marker
#[derive(Debug, Clone)]
pub struct ContentRules {
    marker: String,
    rules: Vec<ContentRule>,
}

impl ContentRules {
    /// Default rules: [`SELF_MARKER`] then [`NESTED_MARKER`]
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            rules: vec![SELF_MARKER, NESTED_MARKER],
        }
    }

    /// Append a rule evaluated after the existing ones
    #[must_use]
    pub fn with_rule(mut self, rule: ContentRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn rules(&self) -> &[ContentRule] {
        &self.rules
    }

    /// Text blocks of the first rule that produces any for `element`
    pub fn apply(&self, element: ElementRef<'_>) -> Vec<String> {
        for rule in &self.rules {
            if !(rule.applies)(element, &self.marker) {
                continue;
            }
            let blocks = (rule.extract)(element, &self.marker);
            if !blocks.is_empty() {
                tracing::trace!(
                    rule = rule.name,
                    tag = element.value().name(),
                    blocks = blocks.len(),
                    "Content rule matched"
                );
                return blocks;
            }
        }
        Vec::new()
    }
}

/// Whether any class on the element contains the marker fragment
pub fn carries_marker(element: ElementRef<'_>, marker: &str) -> bool {
    element.value().classes().any(|class| class.contains(marker))
}

fn contains_marker(element: ElementRef<'_>, marker: &str) -> bool {
    element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .any(|el| carries_marker(el, marker))
}

fn own_text(element: ElementRef<'_>, _marker: &str) -> Vec<String> {
    visible_text(element).into_iter().collect()
}

fn outermost_marked_text(element: ElementRef<'_>, marker: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    collect_outermost(element, marker, &mut blocks);
    blocks
}

fn collect_outermost(element: ElementRef<'_>, marker: &str, out: &mut Vec<String>) {
    for child in element.children().filter_map(ElementRef::wrap) {
        if carries_marker(child, marker) {
            out.extend(visible_text(child));
        } else {
            collect_outermost(child, marker, out);
        }
    }
}

/// Visible text of an element as one sanitized line, if there is any
///
/// Text nodes are trimmed and joined with single spaces; anything inside
/// `script`, `style`, `noscript` or `template` is skipped.
pub fn visible_text(element: ElementRef<'_>) -> Option<String> {
    let mut pieces = Vec::new();
    push_visible(element, &mut pieces);

    let text = sanitize_text(&pieces.join(" "));
    has_content(&text).then_some(text)
}

fn push_visible<'a>(element: ElementRef<'a>, out: &mut Vec<&'a str>) {
    if INVISIBLE_TAGS.contains(&element.value().name()) {
        return;
    }
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                out.push(trimmed);
            }
        } else if let Some(child_el) = ElementRef::wrap(child) {
            push_visible(child_el, out);
        }
    }
}
