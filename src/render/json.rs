//! JSON rendering for documents, chunks and multi-page entities.

use crate::error::{Error, Result};
use crate::model::{Chunk, Document, Page, Table};
use crate::stitch::MultiPageEntities;
use serde::Serialize;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize any value in the given format.
pub fn serialize<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[derive(Serialize)]
struct TableExport {
    annotation_id: String,
    reading_order: Option<i64>,
    number_of_rows: Option<usize>,
    number_of_columns: Option<usize>,
    html: String,
    csv: Option<Vec<Vec<String>>>,
}

impl TableExport {
    fn new(table: &Table<'_>) -> Self {
        Self {
            annotation_id: table.annotation_id().to_string(),
            reading_order: table.reading_order(),
            number_of_rows: table.number_of_rows(),
            number_of_columns: table.number_of_columns(),
            html: table.html(),
            csv: table.csv().ok(),
        }
    }
}

#[derive(Serialize)]
struct PageExport {
    image_id: String,
    page_number: u32,
    document_id: Option<String>,
    file_name: Option<String>,
    width: f32,
    height: f32,
    text: String,
    chunks: Vec<Chunk>,
    tables: Vec<TableExport>,
}

impl PageExport {
    fn new(page: &Page) -> Self {
        Self {
            image_id: page.image_id().to_string(),
            page_number: page.page_number(),
            document_id: page.document_id().map(str::to_string),
            file_name: page.file_name().map(str::to_string),
            width: page.width(),
            height: page.height(),
            text: page.text(),
            chunks: page.chunks(),
            tables: page.tables().iter().map(TableExport::new).collect(),
        }
    }
}

#[derive(Serialize)]
struct DocumentExport {
    document_id: Option<String>,
    page_count: usize,
    pages: Vec<PageExport>,
}

/// Convert a document to JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let export = DocumentExport {
        document_id: doc.document_id().map(str::to_string),
        page_count: doc.page_count(),
        pages: doc.pages().iter().map(PageExport::new).collect(),
    };
    serialize(&export, format)
}

/// Convert chunks to a JSON array.
pub fn chunks_to_json(chunks: &[Chunk], format: JsonFormat) -> Result<String> {
    serialize(chunks, format)
}

/// Convert detected multi-page entities to JSON.
pub fn entities_to_json(entities: &MultiPageEntities, format: JsonFormat) -> Result<String> {
    serialize(entities, format)
}
