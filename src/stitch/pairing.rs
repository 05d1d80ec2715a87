//! Adjacent-page pairing and equivalence rules.

use super::metadata::{PageRecord, ParagraphRecord, TableRecord};

/// Pair records of adjacent pages.
///
/// Repeatedly takes the lowest remaining page number `n`, pairs the first
/// record on `n` with the first record on `n + 1` (if there is one), then
/// drops every record on `n`.
pub fn comparable_pairs<R: PageRecord>(records: &[R]) -> Vec<(&R, &R)> {
    let mut remaining: Vec<&R> = records.iter().collect();
    let mut pairs = Vec::new();

    while let Some(lowest) = remaining.iter().map(|r| r.page_num()).min() {
        let first = remaining.iter().find(|r| r.page_num() == lowest);
        let next = remaining.iter().find(|r| r.page_num() == lowest + 1);
        if let (Some(first), Some(next)) = (first, next) {
            pairs.push((*first, *next));
        }
        remaining.retain(|r| r.page_num() != lowest);
    }

    pairs
}

/// The entity's upper edge lies below `threshold` of the page height.
pub fn is_near_footer<R: PageRecord>(record: &R, threshold: f32) -> bool {
    record.bbox().uly > threshold * record.page_height()
}

/// The entity's lower edge lies above `threshold` of the page height.
pub fn is_near_header<R: PageRecord>(record: &R, threshold: f32) -> bool {
    record.bbox().lry < threshold * record.page_height()
}

/// Text that looks unfinished: more than one character and no closing `.`.
pub fn not_end_with_fullstop(text: &str) -> bool {
    text.chars().nth(1).is_some() && !text.ends_with('.')
}

fn crosses_page_break<R: PageRecord>(first: &R, second: &R, threshold: f32) -> bool {
    is_near_footer(first, threshold) && is_near_header(second, threshold)
}

/// A table that runs off the bottom of one page and continues at the top
/// of the next with the same number of columns.
pub fn is_same_table(first: &TableRecord, second: &TableRecord, threshold: f32) -> bool {
    if !crosses_page_break(first, second, threshold) {
        return false;
    }
    matches!(
        (first.table_column_num, second.table_column_num),
        (Some(a), Some(b)) if a == b
    )
}

/// A paragraph that runs off the bottom of one page without a closing full
/// stop and continues at the top of the next.
pub fn is_same_paragraph(
    first: &ParagraphRecord,
    second: &ParagraphRecord,
    threshold: f32,
) -> bool {
    crosses_page_break(first, second, threshold) && not_end_with_fullstop(&first.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BoundingBox;

    fn paragraph(page_num: u32, id: &str, uly: f32, lry: f32, text: &str) -> ParagraphRecord {
        ParagraphRecord {
            annotation_id: id.to_string(),
            page_num,
            page_bbox: BoundingBox::absolute(0.0, 0.0, 100.0, 100.0),
            page_height: 100.0,
            page_width: 100.0,
            bbox: BoundingBox::absolute(0.0, uly, 100.0, lry),
            text: text.to_string(),
            reading_order: Some(1),
            document_id: None,
            file_name: None,
        }
    }

    fn ids<'a>(pairs: &[(&'a ParagraphRecord, &'a ParagraphRecord)]) -> Vec<(&'a str, &'a str)> {
        pairs
            .iter()
            .map(|(a, b)| (a.annotation_id.as_str(), b.annotation_id.as_str()))
            .collect()
    }

    #[test]
    fn test_pairs_adjacent_pages() {
        let records = vec![
            paragraph(1, "a1", 0.0, 1.0, ""),
            paragraph(1, "a2", 0.0, 1.0, ""),
            paragraph(2, "b1", 0.0, 1.0, ""),
            paragraph(2, "b2", 0.0, 1.0, ""),
            paragraph(3, "c1", 0.0, 1.0, ""),
        ];
        let pairs = comparable_pairs(&records);
        assert_eq!(ids(&pairs), vec![("a1", "b1"), ("b1", "c1")]);
    }

    #[test]
    fn test_pairs_skip_gaps() {
        let records = vec![
            paragraph(1, "a", 0.0, 1.0, ""),
            paragraph(3, "c", 0.0, 1.0, ""),
            paragraph(5, "e", 0.0, 1.0, ""),
            paragraph(6, "f", 0.0, 1.0, ""),
        ];
        let pairs = comparable_pairs(&records);
        assert_eq!(ids(&pairs), vec![("e", "f")]);
    }

    #[test]
    fn test_pairs_unsorted_input() {
        let records = vec![
            paragraph(2, "b", 0.0, 1.0, ""),
            paragraph(1, "a", 0.0, 1.0, ""),
        ];
        assert_eq!(ids(&comparable_pairs(&records)), vec![("a", "b")]);
        assert!(comparable_pairs::<ParagraphRecord>(&[]).is_empty());
    }

    #[test]
    fn test_footer_and_header() {
        let low = paragraph(1, "low", 80.0, 95.0, "");
        let high = paragraph(2, "high", 5.0, 20.0, "");
        assert!(is_near_footer(&low, 0.5));
        assert!(!is_near_footer(&high, 0.5));
        assert!(is_near_header(&high, 0.5));
        assert!(!is_near_header(&low, 0.5));
        // Strict comparison at the threshold
        assert!(!is_near_footer(&paragraph(1, "mid", 50.0, 60.0, ""), 0.5));
    }

    #[test]
    fn test_not_end_with_fullstop() {
        assert!(not_end_with_fullstop("continues on the next"));
        assert!(!not_end_with_fullstop("ends here."));
        assert!(!not_end_with_fullstop(""));
        assert!(!not_end_with_fullstop("x"));
    }

    #[test]
    fn test_is_same_paragraph() {
        let first = paragraph(1, "a", 80.0, 95.0, "continues");
        let second = paragraph(2, "b", 5.0, 20.0, "here.");
        assert!(is_same_paragraph(&first, &second, 0.5));

        let closed = paragraph(1, "a", 80.0, 95.0, "finished.");
        assert!(!is_same_paragraph(&closed, &second, 0.5));

        let top = paragraph(1, "a", 10.0, 20.0, "continues");
        assert!(!is_same_paragraph(&top, &second, 0.5));
    }

    #[test]
    fn test_is_same_table() {
        let table = |page_num: u32, uly: f32, lry: f32, columns: Option<usize>| TableRecord {
            annotation_id: format!("t{}", page_num),
            page_num,
            page_bbox: BoundingBox::absolute(0.0, 0.0, 100.0, 100.0),
            page_height: 100.0,
            page_width: 100.0,
            table_bbox: BoundingBox::absolute(0.0, uly, 100.0, lry),
            table_column_num: columns,
            document_id: None,
            file_name: None,
        };

        assert!(is_same_table(
            &table(1, 60.0, 99.0, Some(4)),
            &table(2, 1.0, 40.0, Some(4)),
            0.5
        ));
        assert!(!is_same_table(
            &table(1, 60.0, 99.0, Some(4)),
            &table(2, 1.0, 40.0, Some(3)),
            0.5
        ));
        assert!(!is_same_table(
            &table(1, 60.0, 99.0, None),
            &table(2, 1.0, 40.0, None),
            0.5
        ));
    }
}
