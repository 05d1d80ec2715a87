//! Typed views over raw annotations.
//!
//! A [`View`] is a read-only projection of one annotation registered on a
//! [`Page`]. It borrows the page it belongs to, which is how relationship
//! lookups and coordinate normalization reach the rest of the page without
//! any owning back-pointer.

use super::keys;
use super::page::Chunk;
use super::table::{Cell, Table};
use super::{Annotation, BoundingBox, Category, Page, Raster, SubCategory, Summary, Value};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Index of a view in its page's registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub(crate) usize);

impl ViewId {
    /// Position of the view in registration order.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// The closed set of view variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    /// Leaf text-bearing element
    Word,
    /// Non-table block (paragraph, title, figure, list, line, ...)
    Layout,
    /// Table cell
    Cell,
    /// Table
    Table,
}

const BASE_NAMES: &[&str] = &["bbox", "np_image"];
const LAYOUT_NAMES: &[&str] = &["bbox", "np_image", "words", "text"];
const TABLE_NAMES: &[&str] = &[
    "bbox", "np_image", "words", "text", "cells", "rows", "columns", "html", "csv",
];

impl ViewKind {
    /// Display name of the variant.
    pub fn name(&self) -> &'static str {
        match self {
            ViewKind::Word => "Word",
            ViewKind::Layout => "Layout",
            ViewKind::Cell => "Cell",
            ViewKind::Table => "Table",
        }
    }

    /// Attribute names computed by the view itself.
    pub fn structural_names(&self) -> &'static [&'static str] {
        match self {
            ViewKind::Word => BASE_NAMES,
            ViewKind::Layout | ViewKind::Cell => LAYOUT_NAMES,
            ViewKind::Table => TABLE_NAMES,
        }
    }

    /// Sub-category keys registered for the variant.
    pub fn category_keys(&self) -> &'static [&'static str] {
        match self {
            ViewKind::Word => keys::WORD_KEYS,
            ViewKind::Layout => &[],
            ViewKind::Cell => keys::CELL_KEYS,
            ViewKind::Table => keys::TABLE_KEYS,
        }
    }
}

/// One registered view: the annotation snapshot and its selected variant.
#[derive(Debug, Clone)]
pub(crate) struct ViewRecord {
    pub(crate) annotation: Annotation,
    pub(crate) kind: ViewKind,
    /// Nesting level; 0 for annotations placed directly on the page
    pub(crate) depth: usize,
    /// Summary of the annotation's nested image, if it had one
    pub(crate) nested_summary: Option<Summary>,
}

/// Where a registered attribute gets its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// Computed by the view (`bbox`, `text`, `csv`, ...)
    Structural,
    /// A sub-category of the annotation
    SubCategory,
    /// A sub-category of a summary
    Summary,
    /// Registered but without a value
    Unset,
}

/// Resolved value of an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Aliased category name (sub-category name differs from the key)
    Name(String),
    /// Numeric id of a category reference
    Id(i64),
    /// Container value
    Value(Value),
    /// Computed text
    Text(String),
    /// Absolute bounding box
    BoundingBox(BoundingBox),
    /// Annotation ids of related views
    Ids(Vec<String>),
    /// Table grid
    Grid(Vec<Vec<String>>),
    /// Cropped pixels
    Raster(Raster),
    /// Page chunks
    Chunks(Vec<Chunk>),
}

impl AttributeValue {
    /// Integer form of ids and integer containers.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttributeValue::Id(id) => Some(*id),
            AttributeValue::Value(value) => value.as_i64(),
            _ => None,
        }
    }

    /// String form of scalar values.
    pub fn as_text(&self) -> Option<String> {
        match self {
            AttributeValue::Name(s) | AttributeValue::Text(s) => Some(s.clone()),
            AttributeValue::Id(id) => Some(id.to_string()),
            AttributeValue::Value(value) => Some(value.to_string()),
            _ => None,
        }
    }
}

/// Resolve a sub-category stored under `key`.
///
/// A sub-category whose own name differs from the key is an alias and
/// resolves to that name. Otherwise containers yield their value and
/// references their id.
pub(crate) fn resolve_sub_category(key: &str, sub: &SubCategory) -> AttributeValue {
    if sub.name() != key {
        return AttributeValue::Name(sub.name().to_string());
    }
    match sub {
        SubCategory::Container { value, .. } => AttributeValue::Value(value.clone()),
        SubCategory::Reference { id, .. } => AttributeValue::Id(*id),
    }
}

/// Keep views with a reading order and sort them by it (stable).
pub(crate) fn order_by_reading(views: Vec<View<'_>>) -> Vec<View<'_>> {
    let mut ordered: Vec<(i64, View<'_>)> = views
        .into_iter()
        .filter_map(|view| view.reading_order().map(|order| (order, view)))
        .collect();
    ordered.sort_by_key(|(order, _)| *order);
    ordered.into_iter().map(|(_, view)| view).collect()
}

/// Text of a block together with its words and their ids, index-aligned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextWithIds {
    /// Space-joined text
    pub text: String,
    /// Single words
    pub words: Vec<String>,
    /// Annotation ids of the words
    pub annotation_ids: Vec<String>,
}

/// A read-only view of one annotation on a page.
#[derive(Clone, Copy)]
pub struct View<'p> {
    page: &'p Page,
    id: ViewId,
}

impl<'p> View<'p> {
    pub(crate) fn new(page: &'p Page, id: ViewId) -> Self {
        Self { page, id }
    }

    fn record(&self) -> &'p ViewRecord {
        self.page.record(self.id)
    }

    /// Registry id of this view.
    pub fn id(&self) -> ViewId {
        self.id
    }

    /// Variant of this view.
    pub fn kind(&self) -> ViewKind {
        self.record().kind
    }

    /// The underlying annotation.
    pub fn annotation(&self) -> &'p Annotation {
        &self.record().annotation
    }

    /// Id of the underlying annotation.
    pub fn annotation_id(&self) -> &'p str {
        &self.annotation().id
    }

    /// Category of the underlying annotation.
    pub fn category(&self) -> &'p Category {
        &self.annotation().category
    }

    /// The outermost page this view belongs to.
    pub fn base_page(&self) -> &'p Page {
        self.page
    }

    /// Table form of this view, if it is a table.
    pub fn as_table(&self) -> Option<Table<'p>> {
        (self.kind() == ViewKind::Table).then(|| Table::new(*self))
    }

    /// Cell form of this view, if it is a cell.
    pub fn as_cell(&self) -> Option<Cell<'p>> {
        (self.kind() == ViewKind::Cell).then(|| Cell::new(*self))
    }

    fn owner_label(&self) -> String {
        format!("{}({})", self.kind().name(), self.category())
    }

    fn summaries(&self) -> impl Iterator<Item = &'p Summary> {
        self.record()
            .nested_summary
            .as_ref()
            .into_iter()
            .chain(self.page.summary())
    }

    /// Every attribute name this view accepts.
    pub fn attribute_names(&self) -> BTreeSet<&'p str> {
        let kind = self.kind();
        let mut names: BTreeSet<&'p str> = kind.structural_names().iter().copied().collect();
        names.extend(kind.category_keys().iter().copied());
        names.insert(keys::READING_ORDER);
        names.extend(self.annotation().sub_categories.keys().map(String::as_str));
        for summary in self.summaries() {
            names.extend(summary.sub_categories.keys().map(String::as_str));
        }
        names
    }

    /// Classify a registered attribute name.
    pub fn attribute_kind(&self, name: &str) -> Result<AttributeKind> {
        if !self.attribute_names().contains(name) {
            return Err(Error::UnsupportedAttribute {
                attribute: name.to_string(),
                owner: self.owner_label(),
            });
        }

        let kind = if self.kind().structural_names().contains(&name) {
            AttributeKind::Structural
        } else if self.annotation().sub_categories.contains_key(name) {
            AttributeKind::SubCategory
        } else if self.summaries().any(|s| s.get(name).is_some()) {
            AttributeKind::Summary
        } else {
            AttributeKind::Unset
        };
        Ok(kind)
    }

    /// Read an attribute.
    ///
    /// Unregistered names fail with [`Error::UnsupportedAttribute`];
    /// registered names without a value give `Ok(None)`.
    pub fn attribute(&self, name: &str) -> Result<Option<AttributeValue>> {
        match self.attribute_kind(name)? {
            AttributeKind::Structural => self.structural(name).map(Some),
            AttributeKind::SubCategory | AttributeKind::Summary => Ok(self.lookup(name)),
            AttributeKind::Unset => Ok(None),
        }
    }

    fn structural(&self, name: &str) -> Result<AttributeValue> {
        match name {
            "bbox" => Ok(AttributeValue::BoundingBox(self.bbox()?)),
            "np_image" => Ok(AttributeValue::Raster(self.np_image()?)),
            "words" => Ok(AttributeValue::Ids(ids_of(&self.words()))),
            "text" => Ok(AttributeValue::Text(self.text())),
            _ => match self.as_table() {
                Some(table) => table.structural(name),
                None => Err(Error::UnsupportedAttribute {
                    attribute: name.to_string(),
                    owner: self.owner_label(),
                }),
            },
        }
    }

    /// Look a key up in the sub-categories, then in the summaries.
    ///
    /// Unlike [`View::attribute`] this does not check registration.
    pub fn lookup(&self, key: &str) -> Option<AttributeValue> {
        if let Some(sub) = self.annotation().sub_category(key) {
            return Some(resolve_sub_category(key, sub));
        }
        self.summaries()
            .find_map(|summary| summary.get(key))
            .map(|sub| resolve_sub_category(key, sub))
    }

    pub(crate) fn lookup_usize(&self, key: &str) -> Option<usize> {
        self.lookup(key)?
            .as_i64()
            .and_then(|n| usize::try_from(n).ok())
    }

    /// Reading order, if assigned.
    pub fn reading_order(&self) -> Option<i64> {
        self.lookup(keys::READING_ORDER)?.as_i64()
    }

    /// Characters of a word.
    pub fn characters(&self) -> Option<String> {
        self.lookup(keys::CHARACTERS)?.as_text()
    }

    /// Token tag of a word (e.g. `B-header`).
    pub fn token_tag(&self) -> Option<String> {
        self.lookup(keys::TOKEN_TAG)?.as_text()
    }

    /// Token class of a word.
    pub fn token_class(&self) -> Option<String> {
        self.lookup(keys::TOKEN_CLASS)?.as_text()
    }

    /// Bounding box in absolute coordinates of the base page.
    ///
    /// Views from nested images only have a box through their embedding
    /// under the page's image id; their own box lives in the nested image.
    pub fn bbox(&self) -> Result<BoundingBox> {
        let annotation = self.annotation();
        let own = match self.record().depth {
            0 => annotation.bounding_box.as_ref(),
            _ => None,
        };
        let bbox = annotation
            .embeddings
            .get(self.page.image_id())
            .or(own)
            .copied()
            .ok_or_else(|| {
                Error::MissingGeometry(format!("no bounding box for annotation {}", annotation.id))
            })?;
        Ok(bbox.transform(self.page.width(), self.page.height(), true))
    }

    /// Pixels of the base page under this view.
    pub fn np_image(&self) -> Result<Raster> {
        let raster = self.page.raster().ok_or_else(|| {
            Error::MissingGeometry(format!(
                "page {} has no raster for annotation {}",
                self.page.image_id(),
                self.annotation_id()
            ))
        })?;
        raster.crop(&self.bbox()?)
    }

    /// Child views in the given categories.
    pub fn children(&self, categories: &[Category]) -> Vec<View<'p>> {
        self.page.get_annotation(
            Some(categories),
            Some(self.annotation().relationship(keys::CHILD)),
        )
    }

    /// Words of this view.
    pub fn words(&self) -> Vec<View<'p>> {
        match self.as_table() {
            Some(table) => table.words(),
            None => self.layout_words(),
        }
    }

    /// Words with a reading order, sorted by it.
    pub fn ordered_words(&self) -> Vec<View<'p>> {
        match self.as_table() {
            Some(table) => table.ordered_words(),
            None => self.layout_ordered_words(),
        }
    }

    /// Text of this view.
    pub fn text(&self) -> String {
        match self.as_table() {
            Some(table) => table.text(),
            None => self.layout_text(),
        }
    }

    /// Text plus the words and word ids it was built from.
    pub fn text_with_ids(&self) -> TextWithIds {
        match self.as_table() {
            Some(table) => table.text_with_ids(),
            None => self.layout_text_with_ids(),
        }
    }

    /// Number of characters of [`View::text`].
    pub fn text_len(&self) -> usize {
        self.text().chars().count()
    }

    pub(crate) fn layout_words(&self) -> Vec<View<'p>> {
        let container = &self.page.config().text_container;
        if self.category() == container {
            return vec![*self];
        }
        self.children(std::slice::from_ref(container))
    }

    pub(crate) fn layout_ordered_words(&self) -> Vec<View<'p>> {
        order_by_reading(self.layout_words())
    }

    pub(crate) fn layout_text(&self) -> String {
        self.layout_ordered_words()
            .iter()
            .map(|word| word.characters().unwrap_or_default())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub(crate) fn layout_text_with_ids(&self) -> TextWithIds {
        let words = self.layout_ordered_words();
        let texts: Vec<String> = words
            .iter()
            .map(|word| word.characters().unwrap_or_default())
            .collect();
        TextWithIds {
            text: texts.join(" "),
            words: texts,
            annotation_ids: ids_of(&words),
        }
    }
}

pub(crate) fn ids_of(views: &[View<'_>]) -> Vec<String> {
    views
        .iter()
        .map(|view| view.annotation_id().to_string())
        .collect()
}

impl PartialEq for View<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.page, other.page) && self.id == other.id
    }
}

impl fmt::Debug for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("kind", &self.kind())
            .field("annotation_id", &self.annotation_id())
            .field("category", self.category())
            .finish()
    }
}
