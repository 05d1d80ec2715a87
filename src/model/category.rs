//! Annotation categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of an annotation.
///
/// The built-in variants cover the layout and table-structure labels that
/// upstream detectors emit. Anything else is carried as [`Category::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Word,
    Line,
    Text,
    Title,
    Figure,
    List,
    Caption,
    Footnote,
    Formula,
    PageHeader,
    PageFooter,
    SectionHeader,
    Table,
    TableRotated,
    Row,
    Column,
    Cell,
    Header,
    Body,
    Spanning,
    RowHeader,
    ColumnHeader,
    ProjectedRowHeader,
    /// A category without a built-in variant
    Other(String),
}

/// Categories that [`crate::model::Table::cells`] collects.
pub const CELL_CATEGORIES: [Category; 7] = [
    Category::Cell,
    Category::Header,
    Category::Body,
    Category::ProjectedRowHeader,
    Category::Spanning,
    Category::RowHeader,
    Category::ColumnHeader,
];

/// Categories that count as tables on a page.
pub const TABLE_CATEGORIES: [Category; 2] = [Category::Table, Category::TableRotated];

impl Category {
    /// The canonical snake_case name.
    pub fn as_str(&self) -> &str {
        match self {
            Category::Word => "word",
            Category::Line => "line",
            Category::Text => "text",
            Category::Title => "title",
            Category::Figure => "figure",
            Category::List => "list",
            Category::Caption => "caption",
            Category::Footnote => "footnote",
            Category::Formula => "formula",
            Category::PageHeader => "page_header",
            Category::PageFooter => "page_footer",
            Category::SectionHeader => "section_header",
            Category::Table => "table",
            Category::TableRotated => "table_rotated",
            Category::Row => "row",
            Category::Column => "column",
            Category::Cell => "cell",
            Category::Header => "header",
            Category::Body => "body",
            Category::Spanning => "spanning",
            Category::RowHeader => "row_header",
            Category::ColumnHeader => "column_header",
            Category::ProjectedRowHeader => "projected_row_header",
            Category::Other(name) => name,
        }
    }

    /// Check if this is a table category.
    pub fn is_table(&self) -> bool {
        TABLE_CATEGORIES.contains(self)
    }

    /// Check if this is one of the table-cell categories.
    pub fn is_cell(&self) -> bool {
        CELL_CATEGORIES.contains(self)
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        match name {
            "word" => Category::Word,
            "line" => Category::Line,
            "text" => Category::Text,
            "title" => Category::Title,
            "figure" => Category::Figure,
            "list" => Category::List,
            "caption" => Category::Caption,
            "footnote" => Category::Footnote,
            "formula" => Category::Formula,
            "page_header" => Category::PageHeader,
            "page_footer" => Category::PageFooter,
            "section_header" => Category::SectionHeader,
            "table" => Category::Table,
            "table_rotated" => Category::TableRotated,
            "row" => Category::Row,
            "column" => Category::Column,
            "cell" => Category::Cell,
            "header" => Category::Header,
            "body" => Category::Body,
            "spanning" => Category::Spanning,
            "row_header" => Category::RowHeader,
            "column_header" => Category::ColumnHeader,
            "projected_row_header" => Category::ProjectedRowHeader,
            other => Category::Other(other.to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(name: String) -> Self {
        Category::from(name.as_str())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
