use crate::error::ExtractError;
use crate::extractors::selectors::meta_content;
use crate::model::Recipe;
use crate::parsers::{named_json_ld, recipe_from_json_ld, SelectorSet, SiteParser};
use log::debug;
use scraper::Html;

const ERROR_PAGE_MARKER: &str = "Page Not Found | Epicurious";

const SELECTORS: SelectorSet = SelectorSet {
    title: &["h1.recipe-hed", "h1"],
    author: &[".author-name", ".by-author", "[data-testid=\"BylineWrapper\"]"],
    ingredients: &[
        "[data-testid=\"IngredientList\"] li",
        "[data-testid=\"IngredientList\"] .ingredient-description",
        ".recipe-ingredients li",
        ".ingredients li",
        ".ingredient",
    ],
    instructions: &[
        "[data-testid=\"InstructionsWrapper\"] li",
        ".recipe-instructions li",
        ".instructions li",
        ".preparation li",
        "ol li",
    ],
    images: &[".recipe-header-image img", ".recipe-image img", ".hero-image img"],
    prep_time: &[".prep-time", "[data-testid=\"PrepTime\"]"],
    cook_time: &[".cook-time", "[data-testid=\"CookTime\"]"],
    total_time: &[".total-time", "[data-testid=\"TotalTime\"]"],
    servings: &[".servings", ".recipe-yield", "[data-testid=\"Yield\"]"],
    categories: &["[data-testid=\"TagCloudWrapper\"] a", ".tags a"],
    ..SelectorSet::EMPTY
};

pub struct EpicuriousParser;

impl SiteParser for EpicuriousParser {
    fn name(&self) -> &'static str {
        "epicurious"
    }

    fn domains(&self) -> &'static [&'static str] {
        &["epicurious.com"]
    }

    /// Best effort: no contract is enforced on either path.
    fn parse(&self, html: &str, url: &str) -> Result<Recipe, ExtractError> {
        if html.contains(ERROR_PAGE_MARKER) {
            debug!("[{}] Error page detected for {}", self.name(), url);
            return Ok(Recipe::sentinel());
        }

        let document = Html::parse_document(html);

        let recipe = match named_json_ld(&document, self.name()) {
            Some(data) => recipe_from_json_ld(&data, url, None),
            None => {
                let mut recipe = SELECTORS.scrape(&document, url);
                recipe.description = meta_content(&document, "description").unwrap_or_default();
                recipe
            }
        };

        Ok(recipe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_page_returns_sentinel() {
        let html = "<html><head><title>Page Not Found | Epicurious</title></head><body></body></html>";
        let recipe = EpicuriousParser
            .parse(html, "https://www.epicurious.com/recipes/food/views/gone")
            .unwrap();
        assert!(recipe.is_sentinel());
    }

    #[test]
    fn test_partial_fallback_is_returned() {
        let html = r#"<html><body>
            <h1 class="recipe-hed">Shrimp Scampi</h1>
            <div data-testid="BylineWrapper">By Chef Ana</div>
            <div data-testid="IngredientList"><ul><li>1 lb shrimp</li></ul></div>
            </body></html>"#;
        let recipe = EpicuriousParser
            .parse(html, "https://www.epicurious.com/recipes/food/views/shrimp-scampi")
            .unwrap();
        assert_eq!(recipe.title, "Shrimp Scampi");
        assert_eq!(recipe.author, "Chef Ana");
        assert_eq!(recipe.ingredients.len(), 1);
        assert!(recipe.instructions.is_empty());
        assert!(recipe.image_url.is_empty());
    }
}
