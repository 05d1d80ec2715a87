//! Plain text rendering.

use crate::error::Result;
use crate::model::{Collection, Document, Page};

use super::RenderOptions;

fn page_text(page: &Page, options: &RenderOptions) -> String {
    let mut text = if options.line_breaks {
        page.text()
    } else {
        page.text_no_line_break()
    };

    if options.include_tables {
        let separator = if options.line_breaks { '\n' } else { ' ' };
        for table in page.ordered(Collection::Tables) {
            text.push_str(&table.text());
            text.push(separator);
        }
    }
    text
}

/// Convert a document to plain text.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    let pages: Vec<String> = doc
        .pages()
        .iter()
        .filter(|page| options.page_selection.includes(page.page_number() + 1))
        .map(|page| page_text(page, options))
        .collect();

    log::debug!(
        "Rendered {} of {} pages as text",
        pages.len(),
        doc.page_count()
    );
    Ok(pages.join(&options.page_separator).trim().to_string())
}
