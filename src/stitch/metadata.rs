//! Per-page records of tables and paragraphs.

use crate::error::Result;
use crate::model::{BoundingBox, Category, Page, Table};
use serde::{Deserialize, Serialize};

/// Common view of a record that takes part in page pairing.
pub trait PageRecord {
    /// One-based page number
    fn page_num(&self) -> u32;

    /// Absolute box of the entity
    fn bbox(&self) -> &BoundingBox;

    /// Height of the page the entity sits on
    fn page_height(&self) -> f32;
}

/// Position and shape of a table on its page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRecord {
    pub annotation_id: String,
    /// One-based page number
    pub page_num: u32,
    pub page_bbox: BoundingBox,
    pub page_height: f32,
    pub page_width: f32,
    pub table_bbox: BoundingBox,
    pub table_column_num: Option<usize>,
    pub document_id: Option<String>,
    pub file_name: Option<String>,
}

/// Position and text of a paragraph on its page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphRecord {
    pub annotation_id: String,
    /// One-based page number
    pub page_num: u32,
    pub page_bbox: BoundingBox,
    pub page_height: f32,
    pub page_width: f32,
    pub bbox: BoundingBox,
    pub text: String,
    pub reading_order: Option<i64>,
    pub document_id: Option<String>,
    pub file_name: Option<String>,
}

impl PageRecord for TableRecord {
    fn page_num(&self) -> u32 {
        self.page_num
    }

    fn bbox(&self) -> &BoundingBox {
        &self.table_bbox
    }

    fn page_height(&self) -> f32 {
        self.page_height
    }
}

impl PageRecord for ParagraphRecord {
    fn page_num(&self) -> u32 {
        self.page_num
    }

    fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    fn page_height(&self) -> f32 {
        self.page_height
    }
}

fn table_record(page: &Page, table: &Table<'_>) -> Result<TableRecord> {
    Ok(TableRecord {
        annotation_id: table.annotation_id().to_string(),
        page_num: page.page_number() + 1,
        page_bbox: page.page_bbox(),
        page_height: page.height(),
        page_width: page.width(),
        table_bbox: table.bbox()?,
        table_column_num: table.number_of_columns(),
        document_id: page.document_id().map(str::to_string),
        file_name: page.file_name().map(str::to_string),
    })
}

/// Records of every table on a page.
pub fn table_records(page: &Page) -> Result<Vec<TableRecord>> {
    page.tables()
        .iter()
        .map(|table| table_record(page, table))
        .collect()
}

/// Records of every `text` block on a page that is not inside a table.
pub fn paragraph_records(page: &Page) -> Result<Vec<ParagraphRecord>> {
    let table_boxes = page
        .tables()
        .iter()
        .map(|table| table.bbox())
        .collect::<Result<Vec<_>>>()?;

    let mut records = Vec::new();
    for layout in page.layouts() {
        if *layout.category() != Category::Text {
            continue;
        }
        let bbox = layout.bbox()?;
        if table_boxes.iter().any(|table| table.contains(&bbox)) {
            log::debug!(
                "Paragraph {} lies inside a table on page {}",
                layout.annotation_id(),
                page.page_number()
            );
            continue;
        }

        records.push(ParagraphRecord {
            annotation_id: layout.annotation_id().to_string(),
            page_num: page.page_number() + 1,
            page_bbox: page.page_bbox(),
            page_height: page.height(),
            page_width: page.width(),
            bbox,
            text: layout.text(),
            reading_order: layout.reading_order(),
            document_id: page.document_id().map(str::to_string),
            file_name: page.file_name().map(str::to_string),
        });
    }
    Ok(records)
}
