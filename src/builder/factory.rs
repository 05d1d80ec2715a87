//! Category to view-kind mapping.

use crate::error::{Error, Result};
use crate::model::{Category, ViewKind};

/// Select the view kind for an annotation category.
///
/// The text-container category always yields a word view; everything else
/// goes through the fixed category table. Categories without an entry are
/// refused.
pub fn view_kind(category: &Category, text_container: &Category) -> Result<ViewKind> {
    if category == text_container {
        return Ok(ViewKind::Word);
    }

    let kind = match category {
        Category::Table | Category::TableRotated => ViewKind::Table,
        Category::Cell
        | Category::Header
        | Category::Body
        | Category::Spanning
        | Category::RowHeader
        | Category::ColumnHeader
        | Category::ProjectedRowHeader => ViewKind::Cell,
        Category::Word => ViewKind::Word,
        Category::Line
        | Category::Text
        | Category::Title
        | Category::Figure
        | Category::List
        | Category::Caption
        | Category::Footnote
        | Category::Formula
        | Category::PageHeader
        | Category::PageFooter
        | Category::SectionHeader
        | Category::Row
        | Category::Column => ViewKind::Layout,
        Category::Other(name) => return Err(Error::UnknownCategory(name.clone())),
    };
    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_mapping() {
        let word = Category::Word;
        assert_eq!(view_kind(&Category::Table, &word).unwrap(), ViewKind::Table);
        assert_eq!(
            view_kind(&Category::TableRotated, &word).unwrap(),
            ViewKind::Table
        );
        assert_eq!(view_kind(&Category::Spanning, &word).unwrap(), ViewKind::Cell);
        assert_eq!(view_kind(&Category::Header, &word).unwrap(), ViewKind::Cell);
        assert_eq!(view_kind(&Category::Word, &word).unwrap(), ViewKind::Word);
        assert_eq!(view_kind(&Category::Text, &word).unwrap(), ViewKind::Layout);
        assert_eq!(view_kind(&Category::Row, &word).unwrap(), ViewKind::Layout);
    }

    #[test]
    fn test_text_container_is_word() {
        let line = Category::Line;
        assert_eq!(view_kind(&Category::Line, &line).unwrap(), ViewKind::Word);

        let custom = Category::from("token");
        assert_eq!(view_kind(&custom, &custom).unwrap(), ViewKind::Word);
    }

    #[test]
    fn test_unknown_category() {
        let result = view_kind(&Category::from("signature"), &Category::Word);
        assert!(matches!(result, Err(Error::UnknownCategory(name)) if name == "signature"));
    }
}
