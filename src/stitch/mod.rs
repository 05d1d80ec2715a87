//! Detection of tables and paragraphs that continue across a page break.
//!
//! Every page is reduced to flat [`TableRecord`]s and [`ParagraphRecord`]s.
//! Records on adjacent pages are paired, and a pair counts as one entity
//! when the first sits in the lower part of its page, the second in the
//! upper part of the next page, and the kind-specific rule agrees.

mod metadata;
mod pairing;

pub use metadata::{paragraph_records, table_records, PageRecord, ParagraphRecord, TableRecord};
pub use pairing::{
    comparable_pairs, is_near_footer, is_near_header, is_same_paragraph, is_same_table,
    not_end_with_fullstop,
};

use crate::error::Result;
use crate::model::Page;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Options for multi-page entity detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StitchOptions {
    /// Fraction of the page height that splits header from footer region
    pub edge_threshold: f32,
}

impl StitchOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header/footer threshold.
    pub fn with_edge_threshold(mut self, threshold: f32) -> Self {
        self.edge_threshold = threshold.clamp(0.0, 1.0);
        self
    }
}

impl Default for StitchOptions {
    fn default() -> Self {
        Self {
            edge_threshold: 0.5,
        }
    }
}

/// Entities found on two adjacent pages, keyed by discovery index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiPageEntities {
    /// Tables continued on the next page
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub table: BTreeMap<usize, (TableRecord, TableRecord)>,

    /// Paragraphs continued on the next page
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub text: BTreeMap<usize, (ParagraphRecord, ParagraphRecord)>,
}

impl MultiPageEntities {
    /// Check if nothing was found.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty() && self.text.is_empty()
    }

    /// Number of detected entities of both kinds.
    pub fn len(&self) -> usize {
        self.table.len() + self.text.len()
    }
}

fn same_entities<R: PageRecord + Clone>(
    records: &[R],
    is_same: impl Fn(&R, &R) -> bool,
) -> BTreeMap<usize, (R, R)> {
    comparable_pairs(records)
        .into_iter()
        .filter(|(first, second)| is_same(*first, *second))
        .enumerate()
        .map(|(index, (first, second))| (index, (first.clone(), second.clone())))
        .collect()
}

/// Find multi-page tables and paragraphs.
pub fn detect(pages: &[Page], options: &StitchOptions) -> Result<MultiPageEntities> {
    let mut tables = Vec::new();
    let mut paragraphs = Vec::new();
    for page in pages {
        tables.extend(table_records(page)?);
        paragraphs.extend(paragraph_records(page)?);
    }

    let threshold = options.edge_threshold;
    let entities = MultiPageEntities {
        table: same_entities(&tables, |a, b| is_same_table(a, b, threshold)),
        text: same_entities(&paragraphs, |a, b| is_same_paragraph(a, b, threshold)),
    };

    log::debug!(
        "Multi-page detection: {} table and {} paragraph records, {} tables and {} paragraphs continued",
        tables.len(),
        paragraphs.len(),
        entities.table.len(),
        entities.text.len()
    );
    Ok(entities)
}
