//! Append-only bibliography store.
//!
//! Citations are kept in insertion order and always presented sorted by plain
//! code-point comparison of the full reference line. This approximates APA
//! alphabetization by first author and misorders surnames that are not the
//! first token or that differ only by case or diacritics.

use crate::models::Citation;
use serde::{Deserialize, Serialize};

/// Ordered collection of formatted citations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bibliography {
    entries: Vec<Citation>,
}

impl Bibliography {
    /// Create an empty bibliography
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a citation at the end. No deduplication.
    pub fn append(&mut self, citation: Citation) {
        tracing::debug!(citation = %citation, "Appending citation");
        self.entries.push(citation);
    }

    /// Citations in insertion order
    pub fn entries(&self) -> &[Citation] {
        &self.entries
    }

    /// Number of citations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All citations in ascending code-point order
    pub fn sorted_view(&self) -> Vec<&Citation> {
        let mut sorted: Vec<&Citation> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        sorted
    }

    /// Sorted citations joined by newlines, for copying as one block
    pub fn render_as_block(&self) -> String {
        self.sorted_view()
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl FromIterator<Citation> for Bibliography {
    fn from_iter<I: IntoIterator<Item = Citation>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
