//! Ordered candidate locators for fields on unstable markup.
//!
//! The source site renders the same semantic field under several structural
//! shapes depending on rollout cohort and login state. Each field therefore
//! carries a fixed-priority list of CSS selectors; the first selector that
//! yields non-empty text wins, and exhausting the list is a recorded
//! absence rather than an error.

use scraper::{ElementRef, Selector};

/// A prioritized list of interchangeable selectors for one field.
pub struct LocatorSet {
    field: &'static str,
    selectors: Vec<Selector>,
}

impl LocatorSet {
    /// Builds a locator set from selector patterns in priority order.
    ///
    /// Patterns are compile-time constants; a malformed pattern is a
    /// programmer error.
    pub fn new(field: &'static str, patterns: &[&str]) -> Self {
        let selectors = patterns
            .iter()
            .map(|pattern| {
                Selector::parse(pattern)
                    .unwrap_or_else(|err| panic!("bad selector for {field}: {err:?}"))
            })
            .collect();
        Self { field, selectors }
    }

    /// Name of the field this set locates.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Resolves the field under `root`, first non-empty match wins.
    pub fn resolve(&self, root: ElementRef<'_>) -> Option<String> {
        self.resolve_where(root, |_| true)
    }

    /// Resolves the field, skipping matches rejected by `accept`.
    ///
    /// Used where a selector over-matches sibling chrome (e.g. the location
    /// line sharing a class with a "Contact info" link).
    pub fn resolve_where<F>(&self, root: ElementRef<'_>, accept: F) -> Option<String>
    where
        F: Fn(&str) -> bool,
    {
        for selector in &self.selectors {
            for element in root.select(selector) {
                let text = element_text(element);
                if !text.is_empty() && accept(&text) {
                    return Some(text);
                }
            }
        }
        None
    }

    /// Returns the elements matched by the first selector that matches at
    /// all, bounded by `limit`. Used for repeating containers.
    pub fn elements<'a>(&self, root: ElementRef<'a>, limit: usize) -> Vec<ElementRef<'a>> {
        for selector in &self.selectors {
            let matched: Vec<_> = root.select(selector).take(limit).collect();
            if !matched.is_empty() {
                return matched;
            }
        }
        Vec::new()
    }
}

impl std::fmt::Debug for LocatorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocatorSet")
            .field("field", &self.field)
            .field("selectors", &self.selectors.len())
            .finish()
    }
}

/// Collapses an element's text nodes into one trimmed string.
pub fn element_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    for piece in element.text() {
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(piece);
    }
    out
}

/// Walks ancestors of `element` until it finds an enclosing `<section>`.
///
/// Profile sections anchor an empty `div` with a stable id (`#experience`,
/// `#education`, ...) inside the section that actually holds the entries,
/// so entry lookups must scope to the section, not the anchor.
pub fn enclosing_section<'a>(element: ElementRef<'a>) -> Option<ElementRef<'a>> {
    let mut node = element.parent();
    while let Some(current) = node {
        if let Some(parent_el) = ElementRef::wrap(current) {
            if parent_el.value().name() == "section" {
                return Some(parent_el);
            }
        }
        node = current.parent();
    }
    None
}
