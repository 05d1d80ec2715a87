//! Table and cell views.
//!
//! Tables reconstruct their content from cell views: a row-major grid
//! (`csv`), an html string filled from a stored template, and text that
//! falls back to plain word order when the grid cannot be built.

use super::category::CELL_CATEGORIES;
use super::keys;
use super::view::{ids_of, order_by_reading, AttributeValue, TextWithIds, View};
use super::{Category, SubCategory, Value};
use crate::error::{Error, Result};
use std::fmt;
use std::ops::Deref;

/// Upper bound on `rows * columns` accepted by [`Table::csv`].
pub const MAX_GRID_TILES: usize = 1 << 20;

/// A table view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Table<'p> {
    view: View<'p>,
}

impl<'p> Deref for Table<'p> {
    type Target = View<'p>;

    fn deref(&self) -> &View<'p> {
        &self.view
    }
}

impl<'p> Table<'p> {
    pub(crate) fn new(view: View<'p>) -> Self {
        Self { view }
    }

    /// The plain view behind this table.
    pub fn view(&self) -> View<'p> {
        self.view
    }

    /// Child cells of any cell category.
    pub fn cells(&self) -> Vec<Cell<'p>> {
        self.view
            .children(&CELL_CATEGORIES)
            .into_iter()
            .map(Cell::new)
            .collect()
    }

    /// Child rows.
    pub fn rows(&self) -> Vec<View<'p>> {
        self.view.children(&[Category::Row])
    }

    /// Child columns.
    pub fn columns(&self) -> Vec<View<'p>> {
        self.view.children(&[Category::Column])
    }

    /// Declared number of rows.
    pub fn number_of_rows(&self) -> Option<usize> {
        self.view.lookup_usize(keys::NUMBER_OF_ROWS)
    }

    /// Declared number of columns.
    pub fn number_of_columns(&self) -> Option<usize> {
        self.view.lookup_usize(keys::NUMBER_OF_COLUMNS)
    }

    fn require_count(&self, key: &str) -> Result<usize> {
        self.view
            .lookup_usize(key)
            .ok_or_else(|| Error::MissingSubCategory {
                annotation_id: self.annotation_id().to_string(),
                key: key.to_string(),
            })
    }

    /// Row-major grid of cell texts.
    ///
    /// Each cell's text plus a trailing space is appended to the tile at
    /// its (row, column) anchor, so spanning cells show up once at their
    /// upper-left tile. Covered tiles stay empty.
    pub fn csv(&self) -> Result<Vec<Vec<String>>> {
        let n_rows = self.require_count(keys::NUMBER_OF_ROWS)?;
        let n_cols = self.require_count(keys::NUMBER_OF_COLUMNS)?;
        let tiles = n_rows.checked_mul(n_cols).filter(|n| *n <= MAX_GRID_TILES);
        if tiles.is_none() {
            return Err(Error::InvalidTableStructure(format!(
                "{}x{} grid of table {} exceeds {} tiles",
                n_rows,
                n_cols,
                self.annotation_id(),
                MAX_GRID_TILES
            )));
        }
        let mut grid = vec![vec![String::new(); n_cols]; n_rows];

        for cell in self.cells() {
            let (row, col) = cell.position().ok_or_else(|| {
                Error::InvalidTableStructure(format!(
                    "cell {} has no row or column number",
                    cell.annotation_id()
                ))
            })?;
            let tile = row
                .checked_sub(1)
                .zip(col.checked_sub(1))
                .and_then(|(r, c)| grid.get_mut(r)?.get_mut(c))
                .ok_or_else(|| {
                    Error::InvalidTableStructure(format!(
                        "cell {} at ({}, {}) outside {}x{} table {}",
                        cell.annotation_id(),
                        row,
                        col,
                        n_rows,
                        n_cols,
                        self.annotation_id()
                    ))
                })?;
            tile.push_str(&cell.text());
            tile.push(' ');
        }

        Ok(grid)
    }

    /// Flatten the grid into one string: tiles joined by a space, each row
    /// closed by a newline token.
    pub fn to_grid_string(&self) -> Result<String> {
        let rows: Vec<String> = self
            .csv()?
            .into_iter()
            .map(|mut row| {
                row.push("\n".to_string());
                row.join(" ")
            })
            .collect();
        Ok(rows.join(" "))
    }

    /// Html of the table.
    ///
    /// Entries of the stored template that equal a cell id are replaced by
    /// that cell's text. Without a template the result is empty.
    pub fn html(&self) -> String {
        let mut template: Vec<String> = match self.annotation().sub_category(keys::HTML) {
            Some(SubCategory::Container {
                value: Value::List(items),
                ..
            }) => items.clone(),
            _ => Vec::new(),
        };

        for cell in self.cells() {
            match template.iter().position(|entry| entry == cell.annotation_id()) {
                Some(index) => template[index] = cell.text(),
                None => log::warn!(
                    "html construction not possible: cell {} missing from template of table {}",
                    cell.annotation_id(),
                    self.annotation_id()
                ),
            }
        }

        template.concat()
    }

    /// Words of all cells, or of the table itself when it has no cells.
    pub fn words(&self) -> Vec<View<'p>> {
        let cells = self.cells();
        if cells.is_empty() {
            return self.view.layout_words();
        }
        cells.iter().flat_map(|cell| cell.layout_words()).collect()
    }

    /// Words ordered cell by cell (row, then column), and by reading order
    /// inside each cell.
    ///
    /// Falls back to the reading order of all cell words when a cell lacks
    /// its position.
    pub fn ordered_words(&self) -> Vec<View<'p>> {
        let cells = self.cells();
        if cells.is_empty() {
            return self.view.layout_ordered_words();
        }

        let mut positioned = Vec::with_capacity(cells.len());
        for cell in cells {
            match cell.position() {
                Some(position) => positioned.push((position, cell)),
                None => {
                    log::debug!(
                        "table {}: cell {} has no position, using reading order",
                        self.annotation_id(),
                        cell.annotation_id()
                    );
                    return order_by_reading(self.words());
                }
            }
        }
        positioned.sort_by_key(|(position, _)| *position);

        positioned
            .into_iter()
            .flat_map(|(_, cell)| cell.layout_ordered_words())
            .collect()
    }

    /// Text of the table: the flattened grid, or the cell words in reading
    /// order when the grid cannot be built.
    pub fn text(&self) -> String {
        if self.cells().is_empty() {
            return self.view.layout_text();
        }
        match self.to_grid_string() {
            Ok(text) => text,
            Err(e) => {
                log::debug!(
                    "table {}: using word text ({})",
                    self.annotation_id(),
                    e
                );
                order_by_reading(self.words())
                    .iter()
                    .map(|word| word.characters().unwrap_or_default())
                    .collect::<Vec<_>>()
                    .join(" ")
            }
        }
    }

    /// Cell texts joined by a space, with every cell's words and ids.
    pub fn text_with_ids(&self) -> TextWithIds {
        let cells = self.cells();
        if cells.is_empty() {
            return self.view.layout_text_with_ids();
        }

        let mut texts = Vec::with_capacity(cells.len());
        let mut result = TextWithIds::default();
        for cell in &cells {
            let part = cell.layout_text_with_ids();
            texts.push(part.text);
            result.words.extend(part.words);
            result.annotation_ids.extend(part.annotation_ids);
        }
        result.text = texts.join(" ");
        result
    }

    pub(crate) fn structural(&self, name: &str) -> Result<AttributeValue> {
        match name {
            "cells" => Ok(AttributeValue::Ids(
                self.cells()
                    .iter()
                    .map(|cell| cell.annotation_id().to_string())
                    .collect(),
            )),
            "rows" => Ok(AttributeValue::Ids(ids_of(&self.rows()))),
            "columns" => Ok(AttributeValue::Ids(ids_of(&self.columns()))),
            "html" => Ok(AttributeValue::Text(self.html())),
            "csv" => Ok(AttributeValue::Grid(self.csv()?)),
            _ => Err(Error::UnsupportedAttribute {
                attribute: name.to_string(),
                owner: format!("Table({})", self.category()),
            }),
        }
    }
}

impl fmt::Display for Table<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// A table cell view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell<'p> {
    view: View<'p>,
}

impl<'p> Deref for Cell<'p> {
    type Target = View<'p>;

    fn deref(&self) -> &View<'p> {
        &self.view
    }
}

impl<'p> Cell<'p> {
    pub(crate) fn new(view: View<'p>) -> Self {
        Self { view }
    }

    /// The plain view behind this cell.
    pub fn view(&self) -> View<'p> {
        self.view
    }

    /// One-based row number.
    pub fn row_number(&self) -> Option<usize> {
        self.view.lookup_usize(keys::ROW_NUMBER)
    }

    /// One-based column number.
    pub fn column_number(&self) -> Option<usize> {
        self.view.lookup_usize(keys::COLUMN_NUMBER)
    }

    /// Number of rows the cell covers.
    pub fn row_span(&self) -> Option<usize> {
        self.view.lookup_usize(keys::ROW_SPAN)
    }

    /// Number of columns the cell covers.
    pub fn column_span(&self) -> Option<usize> {
        self.view.lookup_usize(keys::COLUMN_SPAN)
    }

    /// `(row, column)` anchor of the cell.
    pub fn position(&self) -> Option<(usize, usize)> {
        Some((self.row_number()?, self.column_number()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::PageConfig;
    use crate::model::{Annotation, BoundingBox, Image, Page};

    fn word(id: &str, text: &str, order: i64) -> Annotation {
        Annotation::new(id, "word")
            .with_bbox(BoundingBox::absolute(0.0, 0.0, 1.0, 1.0))
            .with_value(keys::CHARACTERS, text)
            .with_reading_order(order)
    }

    fn cell(id: &str, row: i64, col: i64, words: &[&str]) -> Annotation {
        Annotation::new(id, "cell")
            .with_number(keys::ROW_NUMBER, row)
            .with_number(keys::COLUMN_NUMBER, col)
            .with_children(words.iter().copied())
    }

    fn table_image(table: Annotation, cells: Vec<Annotation>) -> Image {
        Image::new("img", 100.0, 100.0)
            .with_annotations([
                word("w1", "a", 1),
                word("w2", "b", 1),
                word("w3", "c", 1),
                word("w4", "d", 1),
            ])
            .with_annotations(cells)
            .with_annotation(table)
    }

    fn two_by_two() -> Image {
        let table = Annotation::new("t", "table")
            .with_number(keys::NUMBER_OF_ROWS, 2)
            .with_number(keys::NUMBER_OF_COLUMNS, 2)
            .with_value(
                keys::HTML,
                vec![
                    "<table><tr><td>".to_string(),
                    "c4".to_string(),
                    "</td><td>".to_string(),
                    "c2".to_string(),
                    "</td></tr></table>".to_string(),
                ],
            )
            .with_children(["c1", "c2", "c3", "c4"]);
        table_image(
            table,
            vec![
                cell("c1", 2, 2, &["w4"]),
                cell("c2", 1, 2, &["w2"]),
                cell("c3", 2, 1, &["w3"]),
                cell("c4", 1, 1, &["w1"]),
            ],
        )
    }

    #[test]
    fn test_csv_grid() {
        let page = Page::from_image(&two_by_two(), &PageConfig::default()).unwrap();
        let table = page.tables()[0];
        assert_eq!(table.number_of_rows(), Some(2));
        assert_eq!(
            table.csv().unwrap(),
            vec![vec!["a ", "b "], vec!["c ", "d "]]
        );
    }

    #[test]
    fn test_text_is_flattened_grid() {
        let page = Page::from_image(&two_by_two(), &PageConfig::default()).unwrap();
        let table = page.tables()[0];
        assert_eq!(table.text(), "a  b  \n c  d  \n");
        assert_eq!(table.to_string(), table.text());
    }

    #[test]
    fn test_html_template() {
        let page = Page::from_image(&two_by_two(), &PageConfig::default()).unwrap();
        let table = page.tables()[0];
        assert_eq!(
            table.html(),
            "<table><tr><td>a</td><td>b</td></tr></table>"
        );
    }

    #[test]
    fn test_ordered_words_by_cell_position() {
        let page = Page::from_image(&two_by_two(), &PageConfig::default()).unwrap();
        let table = page.tables()[0];
        assert_eq!(ids_of(&table.ordered_words()), vec!["w1", "w2", "w3", "w4"]);
        let with_ids = table.text_with_ids();
        assert_eq!(with_ids.text, "d b c a");
        assert_eq!(with_ids.annotation_ids, vec!["w4", "w2", "w3", "w1"]);
    }

    #[test]
    fn test_csv_missing_counts() {
        let table = Annotation::new("t", "table").with_children(["c1"]);
        let image = table_image(table, vec![cell("c1", 1, 1, &["w1"])]);
        let page = Page::from_image(&image, &PageConfig::default()).unwrap();
        let table = page.tables()[0];
        assert!(matches!(
            table.csv(),
            Err(Error::MissingSubCategory { ref key, .. }) if key == keys::NUMBER_OF_ROWS
        ));
        // Text falls back to the cell words
        assert_eq!(table.text(), "a");
    }

    #[test]
    fn test_ordered_words_cell_without_position() {
        let table = Annotation::new("t", "table").with_children(["c1", "c2"]);
        let image = Image::new("img", 100.0, 100.0).with_annotations([
            word("w1", "alpha", 2),
            word("w2", "beta", 1),
            Annotation::new("c1", "cell")
                .with_number(keys::ROW_NUMBER, 1)
                .with_child("w1"),
            cell("c2", 1, 2, &["w2"]),
            table,
        ]);
        let page = Page::from_image(&image, &PageConfig::default()).unwrap();
        let table = page.tables()[0];

        assert_eq!(ids_of(&table.words()), vec!["w1", "w2"]);
        assert_eq!(ids_of(&table.ordered_words()), vec!["w2", "w1"]);
        assert_eq!(table.text(), "beta alpha");
    }

    #[test]
    fn test_csv_oversized_counts() {
        let table = Annotation::new("t", "table")
            .with_number(keys::NUMBER_OF_ROWS, i64::MAX)
            .with_number(keys::NUMBER_OF_COLUMNS, 1)
            .with_children(["c1"]);
        let image = table_image(table, vec![cell("c1", 1, 1, &["w1"])]);
        let page = Page::from_image(&image, &PageConfig::default()).unwrap();
        let table = page.tables()[0];

        assert!(matches!(table.csv(), Err(Error::InvalidTableStructure(_))));
        assert_eq!(table.text(), "a");

        let page = Page::from_image(
            &table_image(
                Annotation::new("t", "table")
                    .with_number(keys::NUMBER_OF_ROWS, 4096)
                    .with_number(keys::NUMBER_OF_COLUMNS, 4096)
                    .with_children(["c1"]),
                vec![cell("c1", 1, 1, &["w1"])],
            ),
            &PageConfig::default(),
        )
        .unwrap();
        assert!(matches!(
            page.tables()[0].csv(),
            Err(Error::InvalidTableStructure(_))
        ));
    }

    #[test]
    fn test_csv_cell_out_of_range() {
        let table = Annotation::new("t", "table")
            .with_number(keys::NUMBER_OF_ROWS, 1)
            .with_number(keys::NUMBER_OF_COLUMNS, 1)
            .with_children(["c1", "w1"]);
        let image = table_image(table, vec![cell("c1", 3, 1, &["w2"])]);
        let page = Page::from_image(&image, &PageConfig::default()).unwrap();
        let table = page.tables()[0];
        assert!(matches!(table.csv(), Err(Error::InvalidTableStructure(_))));
        // only cell words count, not the table's direct child
        assert_eq!(table.text(), "b");
    }

    #[test]
    fn test_table_without_cells_uses_layout_words() {
        let table = Annotation::new("t", "table").with_children(["w1", "w2"]);
        let image = table_image(table, Vec::new());
        let page = Page::from_image(&image, &PageConfig::default()).unwrap();
        let table = page.tables()[0];
        assert!(table.cells().is_empty());
        assert_eq!(ids_of(&table.words()), vec!["w1", "w2"]);
        assert_eq!(table.text(), "a b");
    }

    #[test]
    fn test_cell_attributes() {
        let page = Page::from_image(&two_by_two(), &PageConfig::default()).unwrap();
        let c = page.get_view("c3").unwrap().as_cell().unwrap();
        assert_eq!(c.position(), Some((2, 1)));
        assert_eq!(c.row_span(), None);
        assert_eq!(
            c.attribute(keys::ROW_NUMBER).unwrap(),
            Some(AttributeValue::Id(2))
        );
        assert_eq!(c.attribute(keys::ROW_SPAN).unwrap(), None);
    }

    #[test]
    fn test_table_structural_attributes() {
        let page = Page::from_image(&two_by_two(), &PageConfig::default()).unwrap();
        let table = page.tables()[0];
        assert_eq!(
            table.attribute("cells").unwrap(),
            Some(AttributeValue::Ids(vec![
                "c1".to_string(),
                "c2".to_string(),
                "c3".to_string(),
                "c4".to_string()
            ]))
        );
        assert!(matches!(
            table.attribute("csv").unwrap(),
            Some(AttributeValue::Grid(_))
        ));
    }
}
