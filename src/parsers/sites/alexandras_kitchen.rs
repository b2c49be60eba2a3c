use crate::error::ExtractError;
use crate::model::Recipe;
use crate::parsers::{named_json_ld, recipe_from_json_ld, SelectorSet, SiteParser};
use log::warn;
use scraper::Html;

const DEFAULT_AUTHOR: &str = "Alexandra Stafford";

// Tasty Recipes plugin markup
const SELECTORS: SelectorSet = SelectorSet {
    title: &["h1.entry-title", "h1.post-title", ".recipe-title h1", "h1"],
    description: &[".tasty-recipes-description"],
    ingredients: &[
        ".tasty-recipes-ingredients li",
        ".recipe-ingredients li",
        ".ingredients li",
    ],
    instructions: &[
        ".tasty-recipes-instructions li",
        ".recipe-instructions li",
        ".instructions li",
    ],
    images: &[".tasty-recipes-image img", ".recipe-image img", ".entry-content img"],
    prep_time: &[".tasty-recipes-prep-time", ".recipe-prep-time"],
    cook_time: &[".tasty-recipes-cook-time", ".recipe-cook-time"],
    total_time: &[".tasty-recipes-total-time", ".recipe-total-time"],
    servings: &[".tasty-recipes-yield", ".recipe-servings"],
    categories: &[".tasty-recipes-category"],
    ..SelectorSet::EMPTY
};

pub struct AlexandrasKitchenParser;

impl SiteParser for AlexandrasKitchenParser {
    fn name(&self) -> &'static str {
        "alexandras-kitchen"
    }

    fn domains(&self) -> &'static [&'static str] {
        &["alexandracooks.com"]
    }

    fn parse(&self, html: &str, url: &str) -> Result<Recipe, ExtractError> {
        let document = Html::parse_document(html);

        if let Some(data) = named_json_ld(&document, self.name()) {
            return Ok(recipe_from_json_ld(&data, url, Some(DEFAULT_AUTHOR)));
        }

        let mut recipe = SELECTORS.scrape(&document, url);
        if recipe.title.is_empty() {
            warn!("[{}] No recipe title found for {}", self.name(), url);
            return Err(ExtractError::MissingTitle { site: self.name() });
        }
        recipe.author = DEFAULT_AUTHOR.to_string();

        Ok(recipe)
    }
}
