use crate::error::ExtractError;
use crate::extractors::selectors::meta_content;
use crate::model::{Recipe, SITE_CONTRACT};
use crate::parsers::{enforce_contract, named_json_ld, recipe_from_json_ld, SelectorSet, SiteParser};
use scraper::Html;
use std::collections::BTreeSet;

const DEFAULT_AUTHOR: &str = "NYT Cooking";
const DEFAULT_CATEGORY: &str = "Uncategorized";
const NUTRITION_PLACEHOLDER: &str = "See original recipe for nutrition info.";

const SELECTORS: SelectorSet = SelectorSet {
    title: &[
        "h1.recipe-title",
        "h1[data-testid=\"recipe-title\"]",
        "h1.pantry-recipe-title",
        "h1",
    ],
    author: &[
        ".recipe-author",
        "[data-testid=\"recipe-author\"]",
        ".byline-author",
        ".author",
    ],
    ingredients: &[
        "[data-testid=\"IngredientList\"] li",
        ".recipe-ingredients li",
        ".ingredients-section li",
        "[data-module=\"Ingredients\"] li",
        "ul[data-testid=\"ingredients\"] li",
    ],
    instructions: &[
        "[data-testid=\"MethodList\"] li",
        ".recipe-instructions li",
        ".instructions-section li",
        "[data-module=\"Instructions\"] li",
        "ol[data-testid=\"instructions\"] li",
    ],
    images: &[".recipe-photo img", "[data-testid=\"recipe-image\"] img", "img"],
    servings: &["[data-testid=\"recipe-yield\"]", ".recipe-yield-value"],
    ..SelectorSet::EMPTY
};

pub struct NytCookingParser;

impl NytCookingParser {
    fn scrape(&self, document: &Html, url: &str) -> Recipe {
        let mut recipe = SELECTORS.scrape(document, url);

        if recipe.author.is_empty() {
            recipe.author = DEFAULT_AUTHOR.to_string();
        }
        recipe.description = meta_content(document, "description").unwrap_or_default();
        recipe.categories = BTreeSet::from([DEFAULT_CATEGORY.to_string()]);
        recipe.nutrition = NUTRITION_PLACEHOLDER.to_string();

        recipe
    }
}

impl SiteParser for NytCookingParser {
    fn name(&self) -> &'static str {
        "nyt-cooking"
    }

    fn domains(&self) -> &'static [&'static str] {
        &["cooking.nytimes.com"]
    }

    fn parse(&self, html: &str, url: &str) -> Result<Recipe, ExtractError> {
        let document = Html::parse_document(html);

        let recipe = match named_json_ld(&document, self.name()) {
            Some(data) => recipe_from_json_ld(&data, url, Some(DEFAULT_AUTHOR)),
            None => self.scrape(&document, url),
        };

        enforce_contract(self.name(), recipe, SITE_CONTRACT)
    }
}
