// src/extractors/section.rs

// --- Imports ---
use crate::extractors::tree::{NodeKind, NodeTree};
use indexmap::IndexMap;

// --- Constants ---
/// Title for paragraphs that appear before the first heading.
pub const INTRODUCTION_TITLE: &str = "Introduction";
/// Title of the single section used when nothing could be extracted.
pub const FULL_TEXT_TITLE: &str = "Full text";

// --- Data Structures ---
/// Section titles mapped to their bodies, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionSet {
    sections: IndexMap<String, String>,
}

impl SectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn get(&self, title: &str) -> Option<&str> {
        self.sections.get(title).map(String::as_str)
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// `(title, body)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sections.iter().map(|(t, b)| (t.as_str(), b.as_str()))
    }

    /// Inserts or replaces a section. A replaced title keeps its original position.
    pub fn insert(&mut self, title: impl Into<String>, body: impl Into<String>) {
        self.sections.insert(title.into(), body.into());
    }

    /// A set holding only the section at `index`, or `None` when out of range.
    pub fn only(&self, index: usize) -> Option<SectionSet> {
        self.sections.get_index(index).map(|(title, body)| {
            let mut single = SectionSet::new();
            single.insert(title.clone(), body.clone());
            single
        })
    }

    fn append(&mut self, title: &str, text: &str) {
        let body = self.sections.entry(title.to_string()).or_default();
        body.push(' ');
        body.push_str(text);
    }
}

impl<T: Into<String>, B: Into<String>> FromIterator<(T, B)> for SectionSet {
    fn from_iter<I: IntoIterator<Item = (T, B)>>(iter: I) -> Self {
        let mut set = SectionSet::new();
        for (title, body) in iter {
            set.insert(title, body);
        }
        set
    }
}

// --- Main Extractor Structure ---
#[derive(Debug, Default)]
pub struct SectionExtractor;

impl SectionExtractor {
    pub fn new() -> Self { Self {} }

    /// Partitions paragraph text under the heading that precedes it.
    ///
    /// Paragraphs before any heading, or after a heading with no text, go
    /// under "Introduction". Every paragraph
    /// is appended as `" " + text`. A heading whose title was already seen
    /// resets that section's body. Returns an empty set when the document has
    /// no headings and no paragraphs.
    pub fn extract(&self, tree: &NodeTree) -> SectionSet {
        let mut sections = SectionSet::new();
        let mut current_title: Option<String> = None;

        for node in tree.nodes() {
            match node.kind() {
                NodeKind::Heading(level) => {
                    let title = node.visible_text();
                    if sections.get(&title).is_some() {
                        // Earlier text under this title is discarded.
                        tracing::warn!("Heading '{}' repeats; its section body restarts here", title);
                    }
                    tracing::debug!("Section boundary at h{}: '{}'", level, title);
                    sections.insert(title.clone(), String::new());
                    current_title = Some(title);
                }
                NodeKind::Paragraph => {
                    let text = node.visible_text();
                    // An untitled heading still opens a section, but its text lands in the introduction.
                    let title = current_title
                        .as_deref()
                        .filter(|t| !t.is_empty())
                        .unwrap_or(INTRODUCTION_TITLE);
                    sections.append(title, &text);
                }
                NodeKind::Other => {}
            }
        }

        tracing::info!("Extracted {} sections", sections.len());
        sections
    }

    /// Fallback for pages [`extract`](Self::extract) finds nothing in: the
    /// whole page text as one "Full text" section.
    pub fn full_text(tree: &NodeTree) -> SectionSet {
        tracing::warn!("No headings or paragraphs found, falling back to the full page text");
        let mut fallback = SectionSet::new();
        fallback.insert(FULL_TEXT_TITLE, tree.visible_text());
        fallback
    }
}
