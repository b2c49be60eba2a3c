use crate::error::ExtractError;
use crate::extractors::selectors::extract_elements;
use crate::model::{Instruction, Recipe, SITE_CONTRACT};
use crate::parsers::{
    enforce_contract, is_not_found_page, named_json_ld, recipe_from_json_ld, SelectorSet,
    SiteParser,
};
use log::debug;
use scraper::Html;

const SELECTORS: SelectorSet = SelectorSet {
    title: &["h1.heading-1", "h1.heading__title", "h1.recipe-title", "h1"],
    author: &[".recipe-author", ".author-name", "[data-author]", ".by-author", ".mntl-attribution__item-name"],
    description: &[".heading__subtitle", ".recipe-description"],
    ingredients: &[
        ".structured-ingredients__list-item",
        ".recipe-ingredients li",
        ".ingredients li",
        ".mntl-structured-ingredients__list-item",
        "section[data-module=\"StructuredIngredients\"] li",
        ".recipe-ingredient-group li",
    ],
    instructions: &[
        ".structured-instructions__list-item",
        ".recipe-instructions li",
        ".instructions li",
        ".mntl-sc-block-group--LI .mntl-sc-block",
        "section[data-module=\"StructuredInstructions\"] li",
        ".recipe-instruction-group li",
    ],
    images: &[".recipe-image img", ".primary-image img", ".hero-image img"],
    prep_time: &[".recipe-prep-time", ".prep-time", "[data-prep-time]", "[itemprop=\"prepTime\"]"],
    cook_time: &[".recipe-cook-time", ".cook-time", "[data-cook-time]", "[itemprop=\"cookTime\"]"],
    total_time: &[".recipe-total-time", ".total-time", "[data-total-time]", "[itemprop=\"totalTime\"]"],
    servings: &[".recipe-servings", ".servings", ".recipe-yield", "[data-servings]", "[itemprop=\"recipeYield\"]"],
    categories: &[".tag-nav__link", ".breadcrumbs__link"],
    notes: &[".recipe-notes li", ".chef-note", ".recipe-tips li"],
};

/// Free-form HTML blocks shorter than this are captions, not steps.
const MIN_BLOCK_STEP_LEN: usize = 10;

pub struct SeriousEatsParser;

impl SeriousEatsParser {
    fn scrape(&self, document: &Html, url: &str) -> Recipe {
        let mut recipe = SELECTORS.scrape(document, url);

        // Long-form recipes put each step in its own HTML block
        if recipe.instructions.is_empty() {
            let steps = extract_elements(document, &[".mntl-sc-block-html"])
                .into_iter()
                .filter(|text| text.chars().count() > MIN_BLOCK_STEP_LEN);
            recipe.instructions = Instruction::numbered(steps);
        }

        recipe
    }
}

impl SiteParser for SeriousEatsParser {
    fn name(&self) -> &'static str {
        "serious-eats"
    }

    fn domains(&self) -> &'static [&'static str] {
        &["seriouseats.com"]
    }

    fn parse(&self, html: &str, url: &str) -> Result<Recipe, ExtractError> {
        let document = Html::parse_document(html);

        if is_not_found_page(&document) {
            debug!("[{}] Error page detected for {}", self.name(), url);
            return Ok(Recipe::sentinel());
        }

        let recipe = match named_json_ld(&document, self.name()) {
            Some(data) => {
                let mut recipe = recipe_from_json_ld(&data, url, None);
                let keywords = data.keywords();
                if !keywords.is_empty() {
                    recipe.categories = keywords;
                }
                recipe
            }
            None => self.scrape(&document, url),
        };

        enforce_contract(self.name(), recipe, SITE_CONTRACT)
    }
}
