use crate::error::ExtractError;
use crate::extractors::selectors::meta_content;
use crate::model::{Recipe, SITE_CONTRACT};
use crate::parsers::{enforce_contract, named_json_ld, recipe_from_json_ld, SelectorSet, SiteParser};
use scraper::Html;

const DEFAULT_AUTHOR: &str = "Chungah Rhee";

const SELECTORS: SelectorSet = SelectorSet {
    title: &["h1.entry-title", "h1.post-title", "h1"],
    ingredients: &[".wprm-recipe-ingredient", ".recipe-ingredients li", ".ingredients li"],
    instructions: &[
        ".wprm-recipe-instruction-text",
        ".recipe-instructions li",
        ".instructions li",
    ],
    servings: &[".wprm-recipe-servings", ".recipe-yield"],
    categories: &[".wprm-recipe-keyword", ".wprm-recipe-course"],
    ..SelectorSet::EMPTY
};

pub struct DamnDeliciousParser;

impl SiteParser for DamnDeliciousParser {
    fn name(&self) -> &'static str {
        "damn-delicious"
    }

    fn domains(&self) -> &'static [&'static str] {
        &["damndelicious.net"]
    }

    fn parse(&self, html: &str, url: &str) -> Result<Recipe, ExtractError> {
        let document = Html::parse_document(html);

        let recipe = match named_json_ld(&document, self.name()) {
            Some(data) => {
                let mut recipe = recipe_from_json_ld(&data, url, Some(DEFAULT_AUTHOR));
                // Keywords are the finer-grained tags on this site
                let keywords = data.keywords();
                if !keywords.is_empty() {
                    recipe.categories = keywords;
                }
                recipe
            }
            None => {
                let mut recipe = SELECTORS.scrape(&document, url);
                recipe.author = DEFAULT_AUTHOR.to_string();
                recipe.description = meta_content(&document, "description").unwrap_or_default();
                recipe
            }
        };

        enforce_contract(self.name(), recipe, SITE_CONTRACT)
    }
}
