//! Page and document build options.

use crate::model::Category;

/// Per-page configuration, fixed when the page is built.
#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    /// Category treated as the word-level text container
    pub text_container: Category,

    /// Top-level layout categories used to assemble page text
    pub floating_text_block_categories: Vec<Category>,

    /// Treat residual `line` annotations as floating blocks as well
    pub include_residual_text_container: bool,

    /// Additional page attribute names
    pub extra_attribute_names: Vec<String>,
}

impl PageConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text-container category.
    pub fn with_text_container(mut self, category: impl Into<Category>) -> Self {
        self.text_container = category.into();
        self
    }

    /// Set the floating text-block categories. An empty list keeps the defaults.
    pub fn with_floating_categories<C: Into<Category>>(
        mut self,
        categories: impl IntoIterator<Item = C>,
    ) -> Self {
        let categories: Vec<Category> = categories.into_iter().map(Into::into).collect();
        if !categories.is_empty() {
            self.floating_text_block_categories = categories;
        }
        self
    }

    /// Enable or disable residual `line` blocks.
    pub fn with_residual_text_container(mut self, include: bool) -> Self {
        self.include_residual_text_container = include;
        self
    }

    /// Register an additional page attribute name.
    pub fn with_extra_attribute_name(mut self, name: impl Into<String>) -> Self {
        self.extra_attribute_names.push(name.into());
        self
    }

    /// Effective floating categories, including `line` when residual text
    /// containers are on.
    pub fn floating_categories(&self) -> Vec<Category> {
        let mut categories = self.floating_text_block_categories.clone();
        if self.include_residual_text_container && !categories.contains(&Category::Line) {
            categories.push(Category::Line);
        }
        categories
    }

    /// Check if a category is a floating text block.
    pub fn is_floating(&self, category: &Category) -> bool {
        self.floating_text_block_categories.contains(category)
            || (self.include_residual_text_container && *category == Category::Line)
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            text_container: Category::Word,
            floating_text_block_categories: vec![
                Category::Text,
                Category::Title,
                Category::Figure,
                Category::List,
            ],
            include_residual_text_container: true,
            extra_attribute_names: Vec::new(),
        }
    }
}

/// Options for building the pages of a document.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Configuration applied to every page
    pub page_config: PageConfig,

    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Whether to build pages in parallel
    pub parallel: bool,
}

impl BuildOptions {
    /// Create new build options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page configuration.
    pub fn with_page_config(mut self, config: PageConfig) -> Self {
        self.page_config = config;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip pages that fail to build).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            page_config: PageConfig::default(),
            error_mode: ErrorMode::Strict,
            parallel: true,
        }
    }
}

/// Error handling mode while building a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on the first page that cannot be built
    #[default]
    Strict,
    /// Log and skip pages that cannot be built
    Lenient,
}
