//! Rendering options and configuration.

use crate::error::{Error, Result};
use std::ops::RangeInclusive;

/// Options for rendering document content.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Close every block with a line break (otherwise a space)
    pub line_breaks: bool,

    /// Separator placed between pages
    pub page_separator: String,

    /// Append the text of tables with a reading order after the blocks
    pub include_tables: bool,

    /// Page selection
    pub page_selection: PageSelection,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable line breaks between blocks.
    pub fn with_line_breaks(mut self, line_breaks: bool) -> Self {
        self.line_breaks = line_breaks;
        self
    }

    /// Set the page separator.
    pub fn with_page_separator(mut self, separator: impl Into<String>) -> Self {
        self.page_separator = separator.into();
        self
    }

    /// Enable or disable table text.
    pub fn with_tables(mut self, include: bool) -> Self {
        self.include_tables = include;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, selection: PageSelection) -> Self {
        self.page_selection = selection;
        self
    }

    /// Set specific page range.
    pub fn with_page_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.page_selection = PageSelection::Range(range);
        self
    }

    /// Set specific pages.
    pub fn with_page_list(mut self, pages: Vec<u32>) -> Self {
        self.page_selection = PageSelection::Pages(pages);
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            line_breaks: true,
            page_separator: "\n".to_string(),
            include_tables: false,
            page_selection: PageSelection::All,
        }
    }
}

/// Page selection for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Render all pages
    #[default]
    All,
    /// Render a range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Render specific pages (1-indexed)
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s == "all" {
            return Ok(PageSelection::All);
        }

        let number = |part: &str| -> Result<u32> {
            part.trim()
                .parse()
                .map_err(|_| Error::InvalidPageRange(format!("invalid page number '{}'", part)))
        };

        // Simple range (e.g., "1-10")
        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                return Ok(PageSelection::Range(number(start)?..=number(end)?));
            }
        }

        let mut pages = Vec::new();
        for part in s.split(',') {
            match part.split_once('-') {
                Some((start, end)) => pages.extend(number(start)?..=number(end)?),
                None => pages.push(number(part)?),
            }
        }
        pages.sort_unstable();
        pages.dedup();
        Ok(PageSelection::Pages(pages))
    }
}
