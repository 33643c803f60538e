//! Fixtures
//!
//! YAML-backed pricing templates for examples and tests, loaded from
//! `./fixtures` by default: `templates/<name>.yml` for template
//! configuration and `grids/<name>.csv` for any pricing grid a template
//! references. String heading names are mapped to generated
//! [`HeadingKey`]s at load time.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{grid::GridParseError, rates::HeadingKey, template::PricingTemplate};

pub mod templates;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between rates in one template
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No money value parsed yet; grid currency unknown
    #[error("No rates parsed yet; currency unknown")]
    NoCurrency,

    /// The referenced grid CSV failed to parse
    #[error(transparent)]
    Grid(#[from] GridParseError),

    /// Heading style not found
    #[error("Heading style not found: {0}")]
    HeadingNotFound(String),
}

/// A template loaded from fixture files, with its heading-name map.
#[derive(Debug)]
pub struct LoadedTemplate {
    template: PricingTemplate<'static>,
    heading_keys: FxHashMap<String, HeadingKey>,
}

impl LoadedTemplate {
    pub(crate) fn new(
        template: PricingTemplate<'static>,
        heading_keys: FxHashMap<String, HeadingKey>,
    ) -> Self {
        Self {
            template,
            heading_keys,
        }
    }

    /// The loaded pricing template.
    pub fn template(&self) -> &PricingTemplate<'static> {
        &self.template
    }

    /// Resolve a heading style by its fixture name.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::HeadingNotFound`] if the template defines no
    /// heading with that name.
    pub fn heading_key(&self, name: &str) -> Result<HeadingKey, FixtureError> {
        self.heading_keys
            .get(name)
            .copied()
            .ok_or_else(|| FixtureError::HeadingNotFound(name.to_string()))
    }

    /// Names of the heading styles the template defines.
    pub fn heading_names(&self) -> impl Iterator<Item = &str> {
        self.heading_keys.keys().map(String::as_str)
    }
}

/// Loader for template fixture sets.
#[derive(Debug)]
pub struct TemplateLibrary {
    /// Base path for fixture files
    base_path: PathBuf,
}

impl TemplateLibrary {
    /// Create a library reading from the default `./fixtures` path.
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a library reading from a custom base path.
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Load a template fixture by name, including any grid it references.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read, the YAML or grid CSV fails
    /// to parse, or the configuration's money values are inconsistent.
    pub fn load_template(&self, name: &str) -> Result<LoadedTemplate, FixtureError> {
        let file_path = self.base_path.join("templates").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: templates::TemplateFixture = serde_norway::from_str(&contents)?;

        let grid_csv = match &fixture.template.grid {
            Some(grid_name) => {
                let grid_path = self.base_path.join("grids").join(format!("{grid_name}.csv"));

                Some(fs::read_to_string(&grid_path)?)
            }
            None => None,
        };

        templates::build_template(fixture.template, grid_csv.as_deref())
    }
}

impl Default for TemplateLibrary {
    fn default() -> Self {
        Self::new()
    }
}
