//! Raw annotation snapshots as handed over by upstream producers.
//!
//! These types are the input side of the crate. Detectors, OCR engines and
//! language models fill an [`Image`] with [`Annotation`]s; the builder turns
//! that snapshot into a [`crate::model::Page`] without mutating it.

use super::{BoundingBox, Category};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A typed value stored in a container sub-category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    Str(String),
    /// List of strings (e.g. an html template)
    List(Vec<String>),
}

impl Value {
    /// Get the value as an integer, if it is one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a string slice, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as a list, if it is one.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => f.write_str(&items.join(" ")),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Value::List(value)
    }
}

/// A named attribute attached to an annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SubCategory {
    /// A category reference with its own name and numeric id
    Reference {
        /// Resolved category name
        name: String,
        /// Numeric category id
        id: i64,
    },
    /// A container holding an arbitrary typed value
    Container {
        /// Category name (normally equal to the key it is stored under)
        name: String,
        /// Stored value
        value: Value,
    },
}

impl SubCategory {
    /// Create a category reference.
    pub fn reference(name: impl Into<String>, id: i64) -> Self {
        SubCategory::Reference {
            name: name.into(),
            id,
        }
    }

    /// Create a container.
    pub fn container(name: impl Into<String>, value: impl Into<Value>) -> Self {
        SubCategory::Container {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The category name of this sub-category.
    pub fn name(&self) -> &str {
        match self {
            SubCategory::Reference { name, .. } | SubCategory::Container { name, .. } => name,
        }
    }
}

/// Page- or object-level summary values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Summary sub-categories by key
    pub sub_categories: BTreeMap<String, SubCategory>,
}

impl Summary {
    /// Create an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sub-category and return self.
    pub fn with_sub_category(mut self, key: impl Into<String>, sub: SubCategory) -> Self {
        self.sub_categories.insert(key.into(), sub);
        self
    }

    /// Get a sub-category by key.
    pub fn get(&self, key: &str) -> Option<&SubCategory> {
        self.sub_categories.get(key)
    }
}

/// A labeled region produced upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Unique annotation id
    pub id: String,

    /// Category label
    pub category: Category,

    /// Soft-delete flag
    #[serde(default = "default_active")]
    pub active: bool,

    /// Box in the coordinates of the image that directly contains the annotation
    pub bounding_box: Option<BoundingBox>,

    /// Boxes of this annotation in other images, keyed by image id
    #[serde(default)]
    pub embeddings: BTreeMap<String, BoundingBox>,

    /// Sub-categories by key
    #[serde(default)]
    pub sub_categories: BTreeMap<String, SubCategory>,

    /// Relationship edges by key (e.g. "child")
    #[serde(default)]
    pub relationships: BTreeMap<String, Vec<String>>,

    /// Nested image of a composite object such as a table
    pub image: Option<Box<Image>>,
}

fn default_active() -> bool {
    true
}

impl Annotation {
    /// Create an active annotation without geometry or attributes.
    pub fn new(id: impl Into<String>, category: impl Into<Category>) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            active: true,
            bounding_box: None,
            embeddings: BTreeMap::new(),
            sub_categories: BTreeMap::new(),
            relationships: BTreeMap::new(),
            image: None,
        }
    }

    /// Set the bounding box and return self.
    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.bounding_box = Some(bbox);
        self
    }

    /// Add an embedding for another image and return self.
    pub fn with_embedding(mut self, image_id: impl Into<String>, bbox: BoundingBox) -> Self {
        self.embeddings.insert(image_id.into(), bbox);
        self
    }

    /// Add a sub-category and return self.
    pub fn with_sub_category(mut self, key: impl Into<String>, sub: SubCategory) -> Self {
        self.sub_categories.insert(key.into(), sub);
        self
    }

    /// Add a container sub-category named after its key.
    pub fn with_value(self, key: &str, value: impl Into<Value>) -> Self {
        self.with_sub_category(key, SubCategory::container(key, value))
    }

    /// Add a category reference named after its key.
    pub fn with_number(self, key: &str, id: i64) -> Self {
        self.with_sub_category(key, SubCategory::reference(key, id))
    }

    /// Set the reading order.
    pub fn with_reading_order(self, order: i64) -> Self {
        self.with_number(super::keys::READING_ORDER, order)
    }

    /// Add a child relationship.
    pub fn with_child(mut self, child_id: impl Into<String>) -> Self {
        self.relationships
            .entry(super::keys::CHILD.to_string())
            .or_default()
            .push(child_id.into());
        self
    }

    /// Add several child relationships.
    pub fn with_children<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        for id in ids {
            self = self.with_child(id);
        }
        self
    }

    /// Attach a nested image.
    pub fn with_image(mut self, image: Image) -> Self {
        self.image = Some(Box::new(image));
        self
    }

    /// Mark the annotation as soft-deleted.
    pub fn deactivated(mut self) -> Self {
        self.active = false;
        self
    }

    /// Get a sub-category by key.
    pub fn sub_category(&self, key: &str) -> Option<&SubCategory> {
        self.sub_categories.get(key)
    }

    /// Get a sub-category that must be present.
    pub fn require_sub_category(&self, key: &str) -> Result<&SubCategory> {
        self.sub_categories
            .get(key)
            .ok_or_else(|| Error::MissingSubCategory {
                annotation_id: self.id.clone(),
                key: key.to_string(),
            })
    }

    /// Ids related to this annotation under `key`.
    pub fn relationship(&self, key: &str) -> &[String] {
        self.relationships
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Copy of this annotation without its nested image.
    pub(crate) fn without_image(&self) -> Self {
        Self {
            id: self.id.clone(),
            category: self.category.clone(),
            active: self.active,
            bounding_box: self.bounding_box,
            embeddings: self.embeddings.clone(),
            sub_categories: self.sub_categories.clone(),
            relationships: self.relationships.clone(),
            image: None,
        }
    }
}

/// A page snapshot: page metadata plus every annotation found on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Image id
    pub image_id: String,

    /// Source file name
    pub file_name: Option<String>,

    /// Source location
    pub location: Option<String>,

    /// Id of the document this page belongs to
    pub document_id: Option<String>,

    /// Zero-based position of the page in its document
    #[serde(default)]
    pub page_number: u32,

    /// Width in pixels
    pub width: f32,

    /// Height in pixels
    pub height: f32,

    /// Annotations on this image
    #[serde(default)]
    pub annotations: Vec<Annotation>,

    /// Page summary
    pub summary: Option<Summary>,

    /// Boxes of this image in other images (an entry under its own id is the page box)
    #[serde(default)]
    pub embeddings: BTreeMap<String, BoundingBox>,

    /// Backing pixels, if loaded
    #[serde(skip)]
    pub raster: Option<Raster>,
}

impl Image {
    /// Create an empty image of the given size.
    pub fn new(image_id: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            image_id: image_id.into(),
            file_name: None,
            location: None,
            document_id: None,
            page_number: 0,
            width,
            height,
            annotations: Vec::new(),
            summary: None,
            embeddings: BTreeMap::new(),
            raster: None,
        }
    }

    /// Set the page number and return self.
    pub fn with_page_number(mut self, page_number: u32) -> Self {
        self.page_number = page_number;
        self
    }

    /// Set the document id and return self.
    pub fn with_document_id(mut self, document_id: impl Into<String>) -> Self {
        self.document_id = Some(document_id.into());
        self
    }

    /// Set the file name and return self.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Set the location and return self.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Add an annotation and return self.
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Add several annotations and return self.
    pub fn with_annotations(mut self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.annotations.extend(annotations);
        self
    }

    /// Set the summary and return self.
    pub fn with_summary(mut self, summary: Summary) -> Self {
        self.summary = Some(summary);
        self
    }

    /// Add an embedding and return self.
    pub fn with_embedding(mut self, image_id: impl Into<String>, bbox: BoundingBox) -> Self {
        self.embeddings.insert(image_id.into(), bbox);
        self
    }

    /// Attach backing pixels and return self.
    pub fn with_raster(mut self, raster: Raster) -> Self {
        self.raster = Some(raster);
        self
    }
}

/// Row-major pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Bytes per pixel
    pub channels: u8,
    /// Pixel data, `width * height * channels` bytes
    pub data: Vec<u8>,
}

impl Raster {
    /// Create a raster, checking that the buffer matches the dimensions.
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(Error::MissingGeometry(format!(
                "raster buffer has {} bytes, expected {}",
                data.len(),
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Cut out the region under an absolute box, clipped to the raster.
    pub fn crop(&self, bbox: &BoundingBox) -> Result<Raster> {
        let x0 = (bbox.ulx.max(0.0).floor() as u32).min(self.width);
        let y0 = (bbox.uly.max(0.0).floor() as u32).min(self.height);
        let x1 = (bbox.lrx.max(0.0).ceil() as u32).min(self.width);
        let y1 = (bbox.lry.max(0.0).ceil() as u32).min(self.height);

        if x1 <= x0 || y1 <= y0 {
            return Err(Error::MissingGeometry(format!(
                "box {:?} does not intersect the raster",
                bbox.to_xyxy()
            )));
        }

        let channels = self.channels as usize;
        let row_len = self.width as usize * channels;
        let mut data = Vec::with_capacity((x1 - x0) as usize * (y1 - y0) as usize * channels);
        for y in y0..y1 {
            let start = y as usize * row_len + x0 as usize * channels;
            let end = y as usize * row_len + x1 as usize * channels;
            let row = self.data.get(start..end).ok_or_else(|| {
                Error::MissingGeometry(format!(
                    "raster buffer of {} bytes too short for a {}x{}x{} image",
                    self.data.len(),
                    self.width,
                    self.height,
                    self.channels
                ))
            })?;
            data.extend_from_slice(row);
        }

        Ok(Raster {
            width: x1 - x0,
            height: y1 - y0,
            channels: self.channels,
            data,
        })
    }
}
