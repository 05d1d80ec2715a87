//! Error types for docview library.

use thiserror::Error;

/// Result type alias for docview operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building and querying document views.
#[derive(Error, Debug)]
pub enum Error {
    /// The attribute is not registered for this view or page.
    #[error("Attribute {attribute} is not supported for {owner}")]
    UnsupportedAttribute {
        /// Requested attribute name
        attribute: String,
        /// Description of the view or page that was asked
        owner: String,
    },

    /// The category has no view mapping.
    #[error("No view mapping for category: {0}")]
    UnknownCategory(String),

    /// No bounding box or backing raster is available.
    #[error("Missing geometry: {0}")]
    MissingGeometry(String),

    /// Layout context was requested for an element that is not an ordered floating block.
    #[error("Cannot get layout context for {annotation_id} (category {category}): not an ordered floating text block")]
    InvalidContext {
        /// Id of the central element
        annotation_id: String,
        /// Category of the central element
        category: String,
    },

    /// A sub-category that the operation relies on is absent.
    #[error("Annotation {annotation_id} has no sub category {key}")]
    MissingSubCategory {
        /// Annotation that was inspected
        annotation_id: String,
        /// Missing sub-category key
        key: String,
    },

    /// No active annotation with this id exists on the page.
    #[error("Annotation not found: {0}")]
    AnnotationNotFound(String),

    /// Table cells do not fit the declared row/column counts.
    #[error("Invalid table structure: {0}")]
    InvalidTableStructure(String),

    /// A page selection string could not be parsed.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Error during rendering (text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}
