//! Building pages and documents from annotation snapshots.
//!
//! The builder walks an [`Image`] and registers one view per active
//! annotation on a fresh [`Page`]. Annotations of nested images (a table's
//! own image holding its cells, for instance) are registered on the same
//! outer page, after the level that contains them.

mod factory;
mod options;

pub use factory::view_kind;
pub use options::{BuildOptions, ErrorMode, PageConfig};

use crate::error::Result;
use crate::model::{Annotation, Image, Page, ViewRecord};
use rayon::prelude::*;

/// Builds pages with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct PageBuilder {
    config: PageConfig,
}

impl PageBuilder {
    /// Create a builder for the given configuration.
    pub fn new(config: PageConfig) -> Self {
        Self { config }
    }

    /// Build a page from a snapshot.
    pub fn build(&self, image: &Image) -> Result<Page> {
        let mut page = Page::from_snapshot(image, self.config.clone());
        self.register_level(&mut page, &image.annotations, 0)?;

        log::debug!(
            "Built page {} ({}): {} views",
            image.page_number,
            image.image_id,
            page.len()
        );
        Ok(page)
    }

    /// Register one level of annotations, then descend into nested images.
    ///
    /// `depth` is 0 for annotations placed directly on the page.
    fn register_level(
        &self,
        page: &mut Page,
        annotations: &[Annotation],
        depth: usize,
    ) -> Result<()> {
        let mut nested = Vec::new();

        for annotation in annotations {
            if !annotation.active {
                log::debug!("Skipping inactive annotation {}", annotation.id);
                continue;
            }

            let kind = view_kind(&annotation.category, &self.config.text_container)?;
            let record = ViewRecord {
                annotation: annotation.without_image(),
                kind,
                depth,
                nested_summary: annotation
                    .image
                    .as_ref()
                    .and_then(|image| image.summary.clone()),
            };
            if !page.register(record) {
                log::debug!("Annotation {} already registered", annotation.id);
            }

            if let Some(image) = &annotation.image {
                nested.push(image.as_ref());
            }
        }

        for image in nested {
            self.register_level(page, &image.annotations, depth + 1)?;
        }
        Ok(())
    }
}

/// Build pages from snapshots.
///
/// In strict mode the first failing page fails the whole call; in lenient
/// mode failing pages are logged and left out.
pub fn build_pages(images: &[Image], options: &BuildOptions) -> Result<Vec<Page>> {
    let builder = PageBuilder::new(options.page_config.clone());

    let results: Vec<Result<Page>> = if options.parallel {
        images.par_iter().map(|image| builder.build(image)).collect()
    } else {
        images.iter().map(|image| builder.build(image)).collect()
    };

    let mut pages = Vec::with_capacity(results.len());
    for (image, result) in images.iter().zip(results) {
        match result {
            Ok(page) => pages.push(page),
            Err(e) if options.error_mode == ErrorMode::Lenient => {
                log::warn!(
                    "Skipping page {} ({}): {}",
                    image.page_number,
                    image.image_id,
                    e
                );
            }
            Err(e) => return Err(e),
        }
    }
    Ok(pages)
}
