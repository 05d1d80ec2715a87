//! # docview
//!
//! Read-only document views over layout-analysis annotations.
//!
//! Upstream detectors and OCR engines describe a page as a flat set of
//! annotations: boxes with a category, typed sub-categories and `child`
//! relationships. This library turns that snapshot into typed views
//! (words, layout blocks, tables, cells) and assembles reading-ordered
//! text, retrieval chunks, table grids and html, and tables or paragraphs
//! that continue across a page break.
//!
//! ## Quick Start
//!
//! ```
//! use docview::model::{keys, Annotation, Image};
//! use docview::{Page, PageConfig};
//!
//! fn main() -> docview::Result<()> {
//!     let image = Image::new("page-0", 600.0, 800.0).with_annotations([
//!         Annotation::new("w1", "word")
//!             .with_value(keys::CHARACTERS, "Hello")
//!             .with_reading_order(1),
//!         Annotation::new("t1", "text")
//!             .with_child("w1")
//!             .with_reading_order(1),
//!     ]);
//!
//!     let page = Page::from_image(&image, &PageConfig::default())?;
//!     assert_eq!(page.text(), "Hello\n");
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Typed views**: words, layout blocks, tables and cells with validated attributes
//! - **Reading order**: page text, token lists and retrieval chunks
//! - **Tables**: row-major grids and html filled from cell text
//! - **Multi-page entities**: tables and paragraphs split by a page break
//! - **Parallel processing**: Uses Rayon for multi-page documents

pub mod builder;
pub mod error;
pub mod model;
pub mod render;
pub mod stitch;

// Re-export commonly used types
pub use builder::{BuildOptions, ErrorMode, PageBuilder, PageConfig};
pub use error::{Error, Result};
pub use model::{
    Annotation, AttributeKind, AttributeValue, BoundingBox, Category, Cell, Chunk, Collection,
    Document, Image, Page, Table, TextWithIds, Token, View, ViewKind,
};
pub use render::{JsonFormat, PageSelection, RenderOptions};
pub use stitch::{MultiPageEntities, StitchOptions};

/// Build a page with the default configuration.
///
/// # Example
///
/// ```
/// use docview::model::Image;
///
/// let page = docview::build_page(&Image::new("empty", 100.0, 100.0)).unwrap();
/// assert!(page.is_empty());
/// ```
pub fn build_page(image: &Image) -> Result<Page> {
    Page::from_image(image, &PageConfig::default())
}

/// Build a document with the default options.
pub fn build_document(images: &[Image]) -> Result<Document> {
    Document::from_images(images, &BuildOptions::default())
}

/// Build a document and return its plain text.
pub fn extract_text(images: &[Image]) -> Result<String> {
    let doc = build_document(images)?;
    render::to_text(&doc, &RenderOptions::default())
}

/// Build a document and return its chunks as JSON.
pub fn extract_chunks(images: &[Image], format: JsonFormat) -> Result<String> {
    let doc = build_document(images)?;
    render::chunks_to_json(&doc.chunks(), format)
}

/// Builder-style API.
///
/// # Example
///
/// ```
/// use docview::model::Image;
/// use docview::DocView;
///
/// let images = vec![Image::new("p0", 100.0, 100.0)];
/// let text = DocView::new()
///     .lenient()
///     .with_text_container("word")
///     .build(&images)?
///     .to_text()?;
/// assert!(text.is_empty());
/// # Ok::<(), docview::Error>(())
/// ```
pub struct DocView {
    build_options: BuildOptions,
    render_options: RenderOptions,
    stitch_options: StitchOptions,
}

impl DocView {
    /// Create a new DocView builder.
    pub fn new() -> Self {
        Self {
            build_options: BuildOptions::default(),
            render_options: RenderOptions::default(),
            stitch_options: StitchOptions::default(),
        }
    }

    /// Skip pages that fail to build instead of failing the document.
    pub fn lenient(mut self) -> Self {
        self.build_options = self.build_options.lenient();
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.build_options = self.build_options.sequential();
        self
    }

    /// Set the page configuration.
    pub fn with_page_config(mut self, config: PageConfig) -> Self {
        self.build_options = self.build_options.with_page_config(config);
        self
    }

    /// Set the text-container category.
    pub fn with_text_container(mut self, category: impl Into<Category>) -> Self {
        let config = self.build_options.page_config.clone().with_text_container(category);
        self.build_options = self.build_options.with_page_config(config);
        self
    }

    /// Render blocks separated by spaces instead of line breaks.
    pub fn without_line_breaks(mut self) -> Self {
        self.render_options = self.render_options.with_line_breaks(false);
        self
    }

    /// Include table text in rendered output.
    pub fn with_tables(mut self) -> Self {
        self.render_options = self.render_options.with_tables(true);
        self
    }

    /// Set page selection for rendering.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.render_options = self.render_options.with_pages(pages);
        self
    }

    /// Set the header/footer threshold for multi-page detection.
    pub fn with_edge_threshold(mut self, threshold: f32) -> Self {
        self.stitch_options = self.stitch_options.with_edge_threshold(threshold);
        self
    }

    /// Build the document and return a result wrapper.
    pub fn build(self, images: &[Image]) -> Result<DocViewResult> {
        let document = Document::from_images(images, &self.build_options)?;
        Ok(DocViewResult {
            document,
            render_options: self.render_options,
            stitch_options: self.stitch_options,
        })
    }
}

impl Default for DocView {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of building a document.
pub struct DocViewResult {
    /// The built document
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
    /// Multi-page detection options to use
    stitch_options: StitchOptions,
}

impl DocViewResult {
    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Chunks of all pages.
    pub fn chunks(&self) -> Vec<Chunk> {
        self.document.chunks()
    }

    /// Chunks of all pages as JSON.
    pub fn chunks_to_json(&self, format: JsonFormat) -> Result<String> {
        render::chunks_to_json(&self.chunks(), format)
    }

    /// Tables and paragraphs continued across a page break.
    pub fn multi_page_entities(&self) -> Result<MultiPageEntities> {
        self.document
            .detect_multi_page_entities_with(&self.stitch_options)
    }

    /// Multi-page entities as JSON.
    pub fn entities_to_json(&self, format: JsonFormat) -> Result<String> {
        render::entities_to_json(&self.multi_page_entities()?, format)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
