//! Well-known sub-category and relationship keys.

/// Reading order of a word or block.
pub const READING_ORDER: &str = "reading_order";

/// Relationship key linking a parent to its children.
pub const CHILD: &str = "child";

pub const CHARACTERS: &str = "characters";
pub const BLOCK: &str = "block";
pub const TEXT_LINE: &str = "text_line";
pub const TOKEN_CLASS: &str = "token_class";
pub const TAG: &str = "tag";
pub const TOKEN_TAG: &str = "token_tag";
pub const CHARACTER_TYPE: &str = "character_type";
pub const PRINTED: &str = "printed";
pub const HANDWRITTEN: &str = "handwritten";

/// Keys registered on word views.
pub const WORD_KEYS: &[&str] = &[
    CHARACTERS,
    BLOCK,
    TEXT_LINE,
    TOKEN_CLASS,
    TAG,
    TOKEN_TAG,
    CHARACTER_TYPE,
    PRINTED,
    HANDWRITTEN,
];

pub const HEADER: &str = "header";
pub const BODY: &str = "body";
pub const ROW_NUMBER: &str = "row_number";
pub const COLUMN_NUMBER: &str = "column_number";
pub const ROW_SPAN: &str = "row_span";
pub const COLUMN_SPAN: &str = "column_span";
pub const SPANNING: &str = "spanning";
pub const ROW_HEADER: &str = "row_header";
pub const COLUMN_HEADER: &str = "column_header";
pub const PROJECTED_ROW_HEADER: &str = "projected_row_header";

/// Keys registered on cell views.
pub const CELL_KEYS: &[&str] = &[
    HEADER,
    BODY,
    ROW_NUMBER,
    COLUMN_NUMBER,
    ROW_SPAN,
    COLUMN_SPAN,
    SPANNING,
    ROW_HEADER,
    COLUMN_HEADER,
    PROJECTED_ROW_HEADER,
];

pub const ITEM: &str = "item";
pub const NUMBER_OF_ROWS: &str = "number_of_rows";
pub const NUMBER_OF_COLUMNS: &str = "number_of_columns";
pub const MAX_ROW_SPAN: &str = "max_row_span";
pub const MAX_COL_SPAN: &str = "max_col_span";
/// Ordered html template of a table.
pub const HTML: &str = "html";

/// Keys registered on table views.
pub const TABLE_KEYS: &[&str] = &[
    ITEM,
    NUMBER_OF_ROWS,
    NUMBER_OF_COLUMNS,
    MAX_ROW_SPAN,
    MAX_COL_SPAN,
    HTML,
];

pub const DOCUMENT_TYPE: &str = "document_type";
pub const LANGUAGE: &str = "language";

/// Summary keys registered on pages.
pub const PAGE_KEYS: &[&str] = &[DOCUMENT_TYPE, LANGUAGE];

/// Token class that marks a word as not belonging to any entity.
pub const DEFAULT_TOKEN_CLASS: &str = "other";
