//! Shared annotation fixtures for integration tests.

#![allow(dead_code)]

use docview::model::{keys, Annotation, BoundingBox, Image, SubCategory};

/// A word with characters and an optional reading order.
pub fn word(id: &str, text: &str, order: Option<i64>) -> Annotation {
    let ann = Annotation::new(id, "word")
        .with_bbox(BoundingBox::absolute(0.0, 0.0, 5.0, 5.0))
        .with_value(keys::CHARACTERS, text);
    match order {
        Some(order) => ann.with_reading_order(order),
        None => ann,
    }
}

/// A word carrying a token tag.
pub fn tagged_word(id: &str, text: &str, order: i64, tag: &str) -> Annotation {
    word(id, text, Some(order)).with_sub_category(keys::TOKEN_TAG, SubCategory::reference(tag, 1))
}

/// A block of any category with children.
pub fn block(
    id: &str,
    category: &str,
    bbox: BoundingBox,
    order: Option<i64>,
    children: &[&str],
) -> Annotation {
    let ann = Annotation::new(id, category)
        .with_bbox(bbox)
        .with_children(children.iter().copied());
    match order {
        Some(order) => ann.with_reading_order(order),
        None => ann,
    }
}

/// A table cell at a one-based position.
pub fn cell(id: &str, row: i64, col: i64, children: &[&str]) -> Annotation {
    Annotation::new(id, "cell")
        .with_number(keys::ROW_NUMBER, row)
        .with_number(keys::COLUMN_NUMBER, col)
        .with_number(keys::ROW_SPAN, 1)
        .with_number(keys::COLUMN_SPAN, 1)
        .with_children(children.iter().copied())
}

/// A single invoice page.
///
/// Reading order: title (1), text (2), table (3), residual line (4).
/// The figure has no reading order.
pub fn invoice_page() -> Image {
    let table = Annotation::new("table", "table")
        .with_bbox(BoundingBox::relative(0.0, 0.5, 1.0, 0.75))
        .with_reading_order(3)
        .with_number(keys::NUMBER_OF_ROWS, 2)
        .with_number(keys::NUMBER_OF_COLUMNS, 2)
        .with_value(
            keys::HTML,
            [
                "<table>", "<tr>", "<td>", "c11", "</td>", "<td>", "c12", "</td>", "</tr>",
                "<tr>", "<td>", "c21", "</td>", "<td>", "c22", "</td>", "</tr>", "</table>",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>(),
        )
        .with_children(["c11", "c12", "c21", "c22"]);

    Image::new("invoice-0", 800.0, 1000.0)
        .with_document_id("invoice")
        .with_file_name("invoice.pdf")
        .with_location("/data/invoice.pdf")
        .with_annotations([
            tagged_word("w-title", "Invoice", 1, "B-header"),
            word("w-please", "Please", Some(1)),
            word("w-pay", "pay", Some(2)),
            tagged_word("w-amount", "42", 3, "B-amount"),
            word("w-stray", "stray", None),
            tagged_word("w-other", "below", 4, "other"),
            word("w-item", "Item", Some(1)),
            word("w-price", "Price", Some(1)),
            word("w-pen", "Pen", Some(1)),
            word("w-cost", "3", Some(1)),
            word("w-thank", "Thank", Some(1)),
            word("w-you", "you", Some(2)),
            block(
                "title",
                "title",
                BoundingBox::absolute(40.0, 20.0, 760.0, 80.0),
                Some(1),
                &["w-title"],
            ),
            block(
                "text",
                "text",
                BoundingBox::absolute(40.0, 100.0, 760.0, 200.0),
                Some(2),
                &["w-pay", "w-please", "w-amount", "w-stray", "w-other"],
            ),
            block(
                "figure",
                "figure",
                BoundingBox::absolute(40.0, 220.0, 400.0, 450.0),
                None,
                &[],
            ),
            block(
                "line",
                "line",
                BoundingBox::absolute(40.0, 900.0, 760.0, 950.0),
                Some(4),
                &["w-thank", "w-you"],
            ),
            cell("c11", 1, 1, &["w-item"]),
            cell("c12", 1, 2, &["w-price"]),
            cell("c21", 2, 1, &["w-pen"]),
            cell("c22", 2, 2, &["w-cost"]),
            table,
        ])
}

fn page_words(prefix: &str, text: &str) -> (Vec<Annotation>, Vec<String>) {
    let mut annotations = Vec::new();
    let mut ids = Vec::new();
    for (i, token) in text.split(' ').enumerate() {
        let id = format!("{}-w{}", prefix, i);
        annotations.push(word(&id, token, Some(i as i64 + 1)));
        ids.push(id);
    }
    (annotations, ids)
}

/// A page with one paragraph and, optionally, one table.
///
/// Pages are 600 x 1000; boxes are given as `(y1, y2)`.
pub fn stitch_page(
    page_number: u32,
    paragraph: Option<(&str, f32, f32)>,
    table: Option<(f32, f32, i64)>,
) -> Image {
    let prefix = format!("p{}", page_number);
    let mut image = Image::new(prefix.clone(), 600.0, 1000.0)
        .with_page_number(page_number)
        .with_document_id("report")
        .with_file_name("report.pdf");

    if let Some((text, y1, y2)) = paragraph {
        let (words, ids) = page_words(&prefix, text);
        image = image.with_annotations(words).with_annotation(
            Annotation::new(format!("{}-text", prefix), "text")
                .with_bbox(BoundingBox::absolute(320.0, y1, 580.0, y2))
                .with_children(ids)
                .with_reading_order(1),
        );
    }

    if let Some((y1, y2, columns)) = table {
        image = image.with_annotation(
            Annotation::new(format!("{}-table", prefix), "table")
                .with_bbox(BoundingBox::absolute(0.0, y1, 300.0, y2))
                .with_number(keys::NUMBER_OF_COLUMNS, columns)
                .with_reading_order(2),
        );
    }

    image
}
