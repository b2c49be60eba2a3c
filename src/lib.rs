//! Structured recipe extraction from recipe-publisher HTML.
//!
//! A [`ParserRegistry`] picks the parser for a page's publisher. Each site
//! parser reads schema.org JSON-LD when the page has it and falls back to
//! DOM selectors, then enforces its own completeness contract. The
//! [`validation`] module checks any recipe before it is stored.

pub mod capture;
pub mod config;
pub mod error;
pub mod extractors;
pub mod model;
pub mod parsers;
pub mod validation;

pub use crate::capture::{capture, Capture, CaptureOutcome};
pub use crate::config::{EngineConfig, SitesConfig};
pub use crate::error::ExtractError;
pub use crate::model::{Ingredient, Instruction, Recipe, Reviews};
pub use crate::parsers::{ParserRegistry, SiteParser};
pub use crate::validation::{
    validate_recipe, validate_recipe_with, validate_value, ValidationOptions, ValidationResult,
};

/// Parses `html` with the default registry.
///
/// Returns `Ok(None)` when no parser handles `url`.
pub fn parse_recipe(html: &str, url: &str) -> Result<Option<Recipe>, ExtractError> {
    ParserRegistry::new().parse_recipe(html, url)
}
