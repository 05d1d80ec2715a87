//! Document model types.
//!
//! The input side ([`Image`], [`Annotation`]) is the raw snapshot produced
//! upstream. The output side ([`Page`], [`View`], [`Table`], [`Document`])
//! is the read-only view layer built over it.

mod annotation;
mod category;
mod document;
mod geometry;
pub mod keys;
mod page;
mod table;
mod view;

pub use annotation::{Annotation, Image, Raster, SubCategory, Summary, Value};
pub use category::{Category, CELL_CATEGORIES, TABLE_CATEGORIES};
pub use document::Document;
pub use geometry::BoundingBox;
pub use page::{Chunk, Collection, Page, Token};
pub use table::{Cell, Table, MAX_GRID_TILES};
pub use view::{AttributeKind, AttributeValue, TextWithIds, View, ViewId, ViewKind};

pub(crate) use view::ViewRecord;
