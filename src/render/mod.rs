//! Rendering module for converting documents to text and JSON.

mod json;
mod options;
mod text;

pub use json::{chunks_to_json, entities_to_json, serialize, to_json, JsonFormat};
pub use options::{PageSelection, RenderOptions};
pub use text::to_text;
