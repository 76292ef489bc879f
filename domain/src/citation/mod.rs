//! Grounding sources and search-result citations.
//!
//! The search tool renders every hit as a numbered block:
//!
//! ```text
//! [Source 1: report.pdf]
//! Revenue was $5M
//! ```
//!
//! Alongside that text it returns the same hits as typed [`Citation`]s, so
//! the agent never has to re-parse its own formatting. [`parse_source_markers`]
//! remains for tool output that only carries text.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Separator placed between formatted source blocks.
pub const SOURCE_BLOCK_SEPARATOR: &str = "\n\n---\n\n";

static SOURCE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[Source \d+: ([^\]]+)\]").expect("source marker pattern is valid")
});

/// A grounding source: a document that contributed to an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    /// Source document name (e.g. `report.pdf`)
    pub source: String,
    /// Relevant content snippet; blank when only the identifier is known
    #[serde(default)]
    pub content: String,
    /// Page number, when the search backend reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl SourceRef {
    pub fn new(source: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            content: content.into(),
            page: None,
        }
    }

    /// A source known only by name.
    pub fn named(source: impl Into<String>) -> Self {
        Self::new(source, "")
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}

/// One numbered hit inside a search tool result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// 1-based position in the result listing
    pub index: usize,
    /// Source document name
    pub source: String,
    /// Text of the matching section
    pub content: String,
}

impl Citation {
    pub fn new(index: usize, source: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            index,
            source: source.into(),
            content: content.into(),
        }
    }

    /// The `[Source i: name]` header that introduces this citation.
    pub fn marker(&self) -> String {
        format!("[Source {}: {}]", self.index, self.source)
    }

    /// Render as `[Source i: name]\ncontent`.
    pub fn to_block(&self) -> String {
        format!("{}\n{}", self.marker(), self.content)
    }
}

/// Number search hits starting at 1.
pub fn number_sources(sources: &[SourceRef]) -> Vec<Citation> {
    sources
        .iter()
        .enumerate()
        .map(|(i, s)| Citation::new(i + 1, &s.source, &s.content))
        .collect()
}

/// Render citations as the search tool's text output.
///
/// `Found N relevant sections:` followed by the numbered blocks joined by
/// [`SOURCE_BLOCK_SEPARATOR`].
pub fn format_citations(citations: &[Citation]) -> String {
    let blocks = citations
        .iter()
        .map(Citation::to_block)
        .collect::<Vec<_>>()
        .join(SOURCE_BLOCK_SEPARATOR);

    format!("Found {} relevant sections:\n\n{}", citations.len(), blocks)
}

/// Extract source names from `[Source N: name]` markers, in order of
/// appearance (duplicates included).
pub fn parse_source_markers(text: &str) -> Vec<String> {
    SOURCE_MARKER
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Ordered list of grounding sources, deduplicated by exact source name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceList(Vec<SourceRef>);

impl SourceList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append unconditionally.
    pub fn push(&mut self, source: SourceRef) {
        self.0.push(source);
    }

    /// Append a name-only source unless one with the same name is recorded.
    ///
    /// Returns `true` when the source was added.
    pub fn push_unique(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.0.push(SourceRef::named(name));
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|s| s.source == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceRef> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[SourceRef] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<SourceRef> {
        self.0
    }
}
