use crate::error::ExtractError;
use crate::extractors::selectors::{
    body_text, extract_elements_where, lists_after_heading, meta_content, page_title,
};
use crate::model::{Ingredient, Instruction, Recipe, SITE_CONTRACT};
use crate::parsers::{enforce_contract, named_json_ld, recipe_from_json_ld, SelectorSet, SiteParser};
use log::debug;
use scraper::Html;

const DEFAULT_AUTHOR: &str = "Food Network";

const ERROR_PAGE_TITLE: &str = "Page Not Found | Food Network";
const ERROR_PAGE_MESSAGE: &str = "The page you're looking for seems to have disappeared!";

const INGREDIENTS: &[&str] = &[
    ".o-Ingredients__a-Ingredient--CheckboxLabel",
    ".o-Ingredients__a-Ingredient",
    ".ingredients-list__item",
    ".recipe-ingredients li",
];

const SELECTORS: SelectorSet = SelectorSet {
    title: &["h1.o-AssetTitle__a-HeadlineText", "h1.recipe-title", "h1"],
    author: &[".o-Attribution__a-Name", ".recipe-author", ".chef-name"],
    instructions: &[
        ".o-Method__m-Step",
        ".instructions-list__item",
        ".recipe-instructions li",
        ".recipe-directions li",
    ],
    total_time: &[".o-RecipeInfo__a-Description.m-RecipeInfo__a-Description--Total"],
    servings: &[".o-RecipeInfo__m-Yield .o-RecipeInfo__a-Description"],
    categories: &[".o-Capsule__a-Tag"],
    ..SelectorSet::EMPTY
};

pub struct FoodNetworkParser;

impl FoodNetworkParser {
    fn is_error_page(document: &Html) -> bool {
        page_title(document).is_some_and(|title| title.contains(ERROR_PAGE_TITLE))
            || body_text(document).contains(ERROR_PAGE_MESSAGE)
    }

    fn scrape(&self, document: &Html, url: &str) -> Recipe {
        let mut recipe = SELECTORS.scrape(document, url);

        // The ingredient list starts with a "Deselect All" checkbox
        let mut ingredients = extract_elements_where(document, INGREDIENTS, |text| {
            !text.eq_ignore_ascii_case("deselect all")
        });
        if ingredients.is_empty() {
            ingredients = lists_after_heading(document, "h2, h3", "ingredients", "ul");
        }
        recipe.ingredients = ingredients.into_iter().map(Ingredient::new).collect();

        if recipe.instructions.is_empty() {
            recipe.instructions =
                Instruction::numbered(lists_after_heading(document, "h2, h3", "directions", "ol"));
        }

        if recipe.author.is_empty() {
            recipe.author = DEFAULT_AUTHOR.to_string();
        }
        recipe.description = meta_content(document, "description").unwrap_or_default();

        recipe
    }
}

impl SiteParser for FoodNetworkParser {
    fn name(&self) -> &'static str {
        "food-network"
    }

    fn domains(&self) -> &'static [&'static str] {
        &["foodnetwork.com"]
    }

    fn parse(&self, html: &str, url: &str) -> Result<Recipe, ExtractError> {
        let document = Html::parse_document(html);

        if Self::is_error_page(&document) {
            debug!("[{}] Error page detected for {}", self.name(), url);
            return Ok(Recipe::sentinel());
        }

        let recipe = match named_json_ld(&document, self.name()) {
            Some(data) => recipe_from_json_ld(&data, url, Some(DEFAULT_AUTHOR)),
            None => self.scrape(&document, url),
        };

        enforce_contract(self.name(), recipe, SITE_CONTRACT)
    }
}
