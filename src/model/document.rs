//! Document-level types.

use super::page::Chunk;
use super::{Image, Page};
use crate::builder::{build_pages, BuildOptions};
use crate::error::Result;
use crate::stitch::{self, MultiPageEntities, StitchOptions};

/// An ordered sequence of built pages.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pages: Vec<Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from built pages, ordered by page number.
    pub fn from_pages(mut pages: Vec<Page>) -> Self {
        pages.sort_by_key(Page::page_number);
        Self { pages }
    }

    /// Build every page of a document from its snapshots.
    pub fn from_images(images: &[Image], options: &BuildOptions) -> Result<Self> {
        Ok(Self::from_pages(build_pages(images, options)?))
    }

    /// Pages in page-number order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Get a page by number (1-indexed, i.e. `page_number + 1`).
    pub fn get_page(&self, page_num: u32) -> Option<&Page> {
        let page_number = page_num.checked_sub(1)?;
        self.pages.iter().find(|page| page.page_number() == page_number)
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Document id of the first page that has one.
    pub fn document_id(&self) -> Option<&str> {
        self.pages.iter().find_map(Page::document_id)
    }

    /// Text of all pages.
    pub fn text(&self) -> String {
        self.pages
            .iter()
            .map(Page::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Chunks of all pages in page order.
    pub fn chunks(&self) -> Vec<Chunk> {
        self.pages.iter().flat_map(Page::chunks).collect()
    }

    /// Find tables and paragraphs continued across a page break.
    pub fn detect_multi_page_entities(&self) -> Result<MultiPageEntities> {
        self.detect_multi_page_entities_with(&StitchOptions::default())
    }

    /// Same as [`Document::detect_multi_page_entities`] with explicit options.
    pub fn detect_multi_page_entities_with(
        &self,
        options: &StitchOptions,
    ) -> Result<MultiPageEntities> {
        stitch::detect(&self.pages, options)
    }
}

impl From<Vec<Page>> for Document {
    fn from(pages: Vec<Page>) -> Self {
        Self::from_pages(pages)
    }
}
