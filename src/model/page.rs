//! Page type.

use super::category::TABLE_CATEGORIES;
use super::keys;
use super::table::Table;
use super::view::{
    ids_of, order_by_reading, resolve_sub_category, AttributeValue, TextWithIds, View, ViewId,
    ViewRecord,
};
use super::{BoundingBox, Category, Image, Raster, Summary, Value};
use crate::builder::{PageBuilder, PageConfig};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Names computed by the page itself.
const PAGE_NAMES: &[&str] = &[
    "text",
    "chunks",
    "tables",
    "layouts",
    "words",
    "file_name",
    "location",
    "document_id",
    "page_number",
];

/// A page of a document with every view built from its annotations.
#[derive(Debug, Clone)]
pub struct Page {
    pub(crate) image_id: String,
    pub(crate) file_name: Option<String>,
    pub(crate) location: Option<String>,
    pub(crate) document_id: Option<String>,
    pub(crate) page_number: u32,
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) summary: Option<Summary>,
    pub(crate) embeddings: BTreeMap<String, BoundingBox>,
    pub(crate) raster: Option<Raster>,
    pub(crate) config: PageConfig,
    pub(crate) views: Vec<ViewRecord>,
    pub(crate) index: HashMap<String, ViewId>,
}

/// Collections of views that can be put into reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    /// Floating text blocks
    Layouts,
    /// Tables
    Tables,
    /// Text-container elements
    Words,
}

/// One ordered block of a page, flattened for downstream consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub document_id: Option<String>,
    pub image_id: String,
    /// Zero-based page number
    pub page_number: u32,
    pub annotation_id: String,
    pub reading_order: i64,
    pub category: String,
    pub text: String,
}

/// A word with its entity tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub word: String,
    pub entity: String,
}

impl Page {
    /// Build a page from an annotation snapshot.
    pub fn from_image(image: &Image, config: &PageConfig) -> Result<Self> {
        PageBuilder::new(config.clone()).build(image)
    }

    /// Empty page carrying the snapshot's metadata.
    pub(crate) fn from_snapshot(image: &Image, config: PageConfig) -> Self {
        Self {
            image_id: image.image_id.clone(),
            file_name: image.file_name.clone(),
            location: image.location.clone(),
            document_id: image.document_id.clone(),
            page_number: image.page_number,
            width: image.width,
            height: image.height,
            summary: image.summary.clone(),
            embeddings: image.embeddings.clone(),
            raster: image.raster.clone(),
            config,
            views: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a view. Returns false if the id is already taken.
    pub(crate) fn register(&mut self, record: ViewRecord) -> bool {
        if self.index.contains_key(&record.annotation.id) {
            return false;
        }
        let id = ViewId(self.views.len());
        self.index.insert(record.annotation.id.clone(), id);
        self.views.push(record);
        true
    }

    pub(crate) fn record(&self, id: ViewId) -> &ViewRecord {
        &self.views[id.0]
    }

    /// Image id of the page.
    pub fn image_id(&self) -> &str {
        &self.image_id
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn document_id(&self) -> Option<&str> {
        self.document_id.as_deref()
    }

    /// Zero-based page number.
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Page summary, if any.
    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    /// Backing pixels, if loaded.
    pub fn raster(&self) -> Option<&Raster> {
        self.raster.as_ref()
    }

    /// Configuration the page was built with.
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Box of the page in absolute coordinates.
    ///
    /// Uses the page's embedding under its own image id, else the full page.
    pub fn page_bbox(&self) -> BoundingBox {
        self.embeddings
            .get(&self.image_id)
            .map(|bbox| bbox.transform(self.width, self.height, true))
            .unwrap_or_else(|| BoundingBox::absolute(0.0, 0.0, self.width, self.height))
    }

    /// Number of registered views.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Check if the page has no views.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Every view in registration order.
    pub fn views(&self) -> impl Iterator<Item = View<'_>> + '_ {
        (0..self.views.len()).map(move |i| View::new(self, ViewId(i)))
    }

    /// View of an annotation id.
    pub fn get_view(&self, annotation_id: &str) -> Option<View<'_>> {
        self.index
            .get(annotation_id)
            .map(|id| View::new(self, *id))
    }

    /// Views filtered by category and/or annotation id, in registration order.
    pub fn get_annotation(
        &self,
        categories: Option<&[Category]>,
        ids: Option<&[String]>,
    ) -> Vec<View<'_>> {
        let in_categories = |category: &Category| categories.map_or(true, |c| c.contains(category));

        match ids {
            Some(ids) => {
                let mut found: Vec<ViewId> = ids
                    .iter()
                    .filter_map(|id| self.index.get(id).copied())
                    .collect();
                found.sort_unstable();
                found.dedup();
                found
                    .into_iter()
                    .map(|id| View::new(self, id))
                    .filter(|view| in_categories(view.category()))
                    .collect()
            }
            None => self
                .views()
                .filter(|view| in_categories(view.category()))
                .collect(),
        }
    }

    /// Floating text blocks.
    pub fn layouts(&self) -> Vec<View<'_>> {
        let categories = self.config.floating_categories();
        self.get_annotation(Some(categories.as_slice()), None)
    }

    /// Tables.
    pub fn tables(&self) -> Vec<Table<'_>> {
        self.get_annotation(Some(&TABLE_CATEGORIES[..]), None)
            .iter()
            .filter_map(View::as_table)
            .collect()
    }

    /// Text-container elements.
    pub fn words(&self) -> Vec<View<'_>> {
        self.get_annotation(Some(std::slice::from_ref(&self.config.text_container)), None)
    }

    /// Elements of a collection that carry a reading order, sorted by it.
    pub fn ordered(&self, collection: Collection) -> Vec<View<'_>> {
        let views = match collection {
            Collection::Layouts => self.layouts(),
            Collection::Tables => self.tables().iter().map(Table::view).collect(),
            Collection::Words => self.words(),
        };
        order_by_reading(views)
    }

    fn make_text(&self, separator: char) -> String {
        let mut text = String::new();
        for block in self.ordered(Collection::Layouts) {
            text.push_str(&block.text());
            text.push(separator);
        }
        text
    }

    /// Ordered block texts, each followed by a line break.
    pub fn text(&self) -> String {
        self.make_text('\n')
    }

    /// Ordered block texts, each followed by a space.
    pub fn text_no_line_break(&self) -> String {
        self.make_text(' ')
    }

    /// Page text plus the words and ids of every ordered block.
    pub fn text_with_ids(&self) -> TextWithIds {
        let mut result = TextWithIds {
            text: self.text(),
            ..TextWithIds::default()
        };
        for block in self.ordered(Collection::Layouts) {
            let part = block.text_with_ids();
            result.words.extend(part.words);
            result.annotation_ids.extend(part.annotation_ids);
        }
        result
    }

    /// Ordered blocks followed by every table with a reading order.
    pub fn chunks(&self) -> Vec<Chunk> {
        let mut blocks = self.ordered(Collection::Layouts);
        blocks.extend(
            self.tables()
                .iter()
                .filter(|table| table.reading_order().is_some())
                .map(Table::view),
        );

        blocks
            .into_iter()
            .filter_map(|block| {
                Some(Chunk {
                    document_id: self.document_id.clone(),
                    image_id: self.image_id.clone(),
                    page_number: self.page_number,
                    annotation_id: block.annotation_id().to_string(),
                    reading_order: block.reading_order()?,
                    category: block.category().to_string(),
                    text: block.text(),
                })
            })
            .collect()
    }

    /// Ordered floating blocks around `annotation_id`, `context_size` on
    /// each side, clipped to the page.
    pub fn get_layout_context(
        &self,
        annotation_id: &str,
        context_size: usize,
    ) -> Result<Vec<View<'_>>> {
        let view = self
            .get_view(annotation_id)
            .ok_or_else(|| Error::AnnotationNotFound(annotation_id.to_string()))?;
        let invalid = || Error::InvalidContext {
            annotation_id: annotation_id.to_string(),
            category: view.category().to_string(),
        };

        if !self.config.is_floating(view.category()) {
            return Err(invalid());
        }

        let blocks = self.ordered(Collection::Layouts);
        let position = blocks
            .iter()
            .position(|block| *block == view)
            .ok_or_else(invalid)?;
        let start = position.saturating_sub(context_size);
        let end = position
            .saturating_add(context_size)
            .saturating_add(1)
            .min(blocks.len());
        Ok(blocks[start..end].to_vec())
    }

    /// Tagged words of every ordered block, skipping untagged words and the
    /// default class.
    pub fn get_token(&self) -> Vec<Token> {
        self.ordered(Collection::Layouts)
            .iter()
            .flat_map(|block| block.ordered_words())
            .filter_map(|word| {
                let entity = word.token_tag()?;
                if entity == keys::DEFAULT_TOKEN_CLASS {
                    return None;
                }
                Some(Token {
                    word: word.characters().unwrap_or_default(),
                    entity,
                })
            })
            .collect()
    }

    /// Cut a view's region out of the page raster.
    pub fn crop(&self, view: &View<'_>) -> Result<Raster> {
        view.np_image()
    }

    /// Every attribute name the page accepts.
    pub fn attribute_names(&self) -> BTreeSet<&str> {
        let mut names: BTreeSet<&str> = PAGE_NAMES.iter().copied().collect();
        names.extend(keys::PAGE_KEYS.iter().copied());
        names.extend(self.config.extra_attribute_names.iter().map(String::as_str));
        names
    }

    /// Read a page attribute.
    pub fn attribute(&self, name: &str) -> Result<Option<AttributeValue>> {
        if !self.attribute_names().contains(name) {
            return Err(Error::UnsupportedAttribute {
                attribute: name.to_string(),
                owner: format!("Page({})", self.image_id),
            });
        }

        let value = match name {
            "text" => Some(AttributeValue::Text(self.text())),
            "chunks" => Some(AttributeValue::Chunks(self.chunks())),
            "tables" => Some(AttributeValue::Ids(
                self.tables()
                    .iter()
                    .map(|table| table.annotation_id().to_string())
                    .collect(),
            )),
            "layouts" => Some(AttributeValue::Ids(ids_of(&self.layouts()))),
            "words" => Some(AttributeValue::Ids(ids_of(&self.words()))),
            "file_name" => self.file_name.clone().map(AttributeValue::Text),
            "location" => self.location.clone().map(AttributeValue::Text),
            "document_id" => self.document_id.clone().map(AttributeValue::Text),
            "page_number" => Some(AttributeValue::Value(Value::Int(i64::from(
                self.page_number,
            )))),
            _ => self
                .summary
                .as_ref()
                .and_then(|summary| summary.get(name))
                .map(|sub| resolve_sub_category(name, sub)),
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Annotation, SubCategory};

    fn word(id: &str, text: &str, order: i64) -> Annotation {
        Annotation::new(id, "word")
            .with_bbox(BoundingBox::absolute(0.0, 0.0, 1.0, 1.0))
            .with_value(keys::CHARACTERS, text)
            .with_reading_order(order)
    }

    fn block(id: &str, category: &str, order: Option<i64>, words: &[&str]) -> Annotation {
        let ann = Annotation::new(id, category)
            .with_bbox(BoundingBox::absolute(0.0, 0.0, 10.0, 10.0))
            .with_children(words.iter().copied());
        match order {
            Some(order) => ann.with_reading_order(order),
            None => ann,
        }
    }

    fn sample_image() -> Image {
        Image::new("page-1", 600.0, 800.0)
            .with_document_id("doc")
            .with_page_number(2)
            .with_annotations([
                word("w1", "Title", 1),
                word("w2", "Body", 1),
                word("w3", "text", 2),
                word("w4", "note", 1),
                block("b1", "text", Some(2), &["w2", "w3"]),
                block("b2", "title", Some(1), &["w1"]),
                block("b3", "figure", None, &["w4"]),
                block("tab", "table", Some(3), &[]),
            ])
    }

    fn sample_page() -> Page {
        Page::from_image(&sample_image(), &PageConfig::default()).unwrap()
    }

    #[test]
    fn test_collections() {
        let page = sample_page();
        assert_eq!(page.words().len(), 4);
        assert_eq!(ids_of(&page.layouts()), vec!["b1", "b2", "b3"]);
        assert_eq!(page.tables().len(), 1);
        assert_eq!(ids_of(&page.ordered(Collection::Layouts)), vec!["b2", "b1"]);
    }

    #[test]
    fn test_text() {
        let page = sample_page();
        assert_eq!(page.text(), "Title\nBody text\n");
        assert_eq!(page.text_no_line_break(), "Title Body text ");

        let with_ids = page.text_with_ids();
        assert_eq!(with_ids.annotation_ids, vec!["w1", "w2", "w3"]);
    }

    #[test]
    fn test_chunks() {
        let page = sample_page();
        let chunks = page.chunks();
        let ids: Vec<&str> = chunks.iter().map(|c| c.annotation_id.as_str()).collect();
        assert_eq!(ids, vec!["b2", "b1", "tab"]);
        assert_eq!(chunks[0].document_id.as_deref(), Some("doc"));
        assert_eq!(chunks[0].page_number, 2);
        assert_eq!(chunks[0].category, "title");
        assert_eq!(chunks[1].text, "Body text");
        assert_eq!(chunks[2].reading_order, 3);
    }

    #[test]
    fn test_layout_context() {
        let page = sample_page();
        let context = page.get_layout_context("b1", 1).unwrap();
        assert_eq!(ids_of(&context), vec!["b2", "b1"]);

        let context = page.get_layout_context("b2", 0).unwrap();
        assert_eq!(ids_of(&context), vec!["b2"]);

        let context = page.get_layout_context("b2", usize::MAX).unwrap();
        assert_eq!(ids_of(&context), vec!["b2", "b1"]);
    }

    #[test]
    fn test_layout_context_errors() {
        let page = sample_page();
        assert!(matches!(
            page.get_layout_context("missing", 1),
            Err(Error::AnnotationNotFound(_))
        ));
        assert!(matches!(
            page.get_layout_context("tab", 1),
            Err(Error::InvalidContext { .. })
        ));
        // Floating but without reading order
        assert!(matches!(
            page.get_layout_context("b3", 1),
            Err(Error::InvalidContext { .. })
        ));
    }

    #[test]
    fn test_get_token() {
        let image = Image::new("p", 10.0, 10.0).with_annotations([
            word("w1", "Invoice", 1)
                .with_sub_category(keys::TOKEN_TAG, SubCategory::reference("B-header", 1)),
            word("w2", "number", 2)
                .with_sub_category(keys::TOKEN_TAG, SubCategory::reference("other", 0)),
            word("w3", "42", 3),
            block("b1", "text", Some(1), &["w1", "w2", "w3"]),
        ]);
        let page = Page::from_image(&image, &PageConfig::default()).unwrap();
        assert_eq!(
            page.get_token(),
            vec![Token {
                word: "Invoice".to_string(),
                entity: "B-header".to_string()
            }]
        );
    }

    #[test]
    fn test_page_attributes() {
        let image = sample_image().with_summary(Summary::new().with_sub_category(
            keys::DOCUMENT_TYPE,
            SubCategory::reference("invoice", 3),
        ));
        let page = Page::from_image(&image, &PageConfig::default()).unwrap();

        assert_eq!(
            page.attribute(keys::DOCUMENT_TYPE).unwrap(),
            Some(AttributeValue::Name("invoice".to_string()))
        );
        assert_eq!(page.attribute(keys::LANGUAGE).unwrap(), None);
        assert_eq!(
            page.attribute("page_number").unwrap(),
            Some(AttributeValue::Value(Value::Int(2)))
        );
        assert!(matches!(
            page.attribute("author"),
            Err(Error::UnsupportedAttribute { .. })
        ));
    }

    #[test]
    fn test_extra_attribute_names() {
        let config = PageConfig::default().with_extra_attribute_name("author");
        let page = Page::from_image(&sample_image(), &config).unwrap();
        assert_eq!(page.attribute("author").unwrap(), None);
    }

    #[test]
    fn test_page_bbox() {
        let page = sample_page();
        assert_eq!(
            page.page_bbox(),
            BoundingBox::absolute(0.0, 0.0, 600.0, 800.0)
        );

        let image = sample_image()
            .with_embedding("page-1", BoundingBox::absolute(10.0, 10.0, 590.0, 790.0));
        let page = Page::from_image(&image, &PageConfig::default()).unwrap();
        assert_eq!(page.page_bbox().to_xyxy(), [10.0, 10.0, 590.0, 790.0]);
    }
}
