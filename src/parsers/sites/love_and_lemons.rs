use crate::error::ExtractError;
use crate::extractors::selectors::{body_text, meta_content, page_title};
use crate::extractors::text::{sanitize_text, strip_tags};
use crate::model::{Recipe, SITE_CONTRACT};
use crate::parsers::{enforce_contract, named_json_ld, recipe_from_json_ld, SelectorSet, SiteParser};
use log::debug;
use scraper::Html;

const DEFAULT_AUTHOR: &str = "Jeanine Donofrio";

const SELECTORS: SelectorSet = SelectorSet {
    title: &["h1.entry-title", "h1"],
    author: &[".author"],
    description: &[".first-sentence", ".entry-content p"],
    ingredients: &[".wprm-recipe-ingredient", ".recipe-ingredients li"],
    instructions: &[".wprm-recipe-instruction-text", ".recipe-instructions li"],
    images: &[".post-thumbnail img"],
    servings: &[".wprm-recipe-servings-with-unit", ".wprm-recipe-servings"],
    categories: &[".wprm-recipe-course", ".wprm-recipe-cuisine"],
    ..SelectorSet::EMPTY
};

fn is_error_page(document: &Html) -> bool {
    let mentions = |text: Option<String>, needle: &str| {
        text.is_some_and(|t| t.to_lowercase().contains(needle))
    };
    let title = page_title(document);

    mentions(title.clone(), "page not found")
        || mentions(title, "404")
        || mentions(meta_content(document, "og:title"), "page not found")
        || mentions(Some(body_text(document)), "page not found")
}

/// The feed embeds markup inside JSON-LD strings.
fn clean(text: &str) -> String {
    sanitize_text(&strip_tags(text))
}

pub struct LoveAndLemonsParser;

impl LoveAndLemonsParser {
    fn scrape(&self, document: &Html, url: &str) -> Recipe {
        let mut recipe = SELECTORS.scrape(document, url);

        if recipe.title.is_empty() {
            recipe.title = meta_content(document, "og:title").unwrap_or_default();
        }
        if recipe.author.is_empty() {
            recipe.author = meta_content(document, "author")
                .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());
        }
        if let Some(description) = meta_content(document, "description") {
            recipe.description = description;
        }

        recipe
    }
}

impl SiteParser for LoveAndLemonsParser {
    fn name(&self) -> &'static str {
        "love-and-lemons"
    }

    fn domains(&self) -> &'static [&'static str] {
        &["loveandlemons.com"]
    }

    fn parse(&self, html: &str, url: &str) -> Result<Recipe, ExtractError> {
        let document = Html::parse_document(html);

        if is_error_page(&document) {
            debug!("[{}] Error page detected for {}", self.name(), url);
            return Ok(Recipe::sentinel());
        }

        let recipe = match named_json_ld(&document, self.name()) {
            Some(data) => {
                let mut recipe = recipe_from_json_ld(&data, url, Some(DEFAULT_AUTHOR));
                recipe.title = clean(&recipe.title);
                recipe.description = clean(&recipe.description);
                for ingredient in &mut recipe.ingredients {
                    ingredient.text = clean(&ingredient.text);
                }
                for step in &mut recipe.instructions {
                    step.text = clean(&step.text);
                }
                recipe
            }
            None => self.scrape(&document, url),
        };

        enforce_contract(self.name(), recipe, SITE_CONTRACT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_page_variants() {
        for html in [
            "<html><head><title>Page not found - Love and Lemons</title></head></html>",
            "<html><head><title>404</title></head></html>",
            "<html><head><meta property=\"og:title\" content=\"Page Not Found\"></head></html>",
            "<html><body><p>Sorry, page not found.</p></body></html>",
        ] {
            let recipe = LoveAndLemonsParser
                .parse(html, "https://www.loveandlemons.com/missing/")
                .unwrap();
            assert!(recipe.is_sentinel(), "html: {html}");
        }
    }

    #[test]
    fn test_json_ld_markup_is_stripped() {
        let html = r#"<html><head><title>Best Guacamole Recipe</title>
            <script type="application/ld+json">{"@context": "https://schema.org", "@graph": [
                {"@type": "WebPage"},
                {"@type": "Recipe",
                 "name": "Best Guacamole",
                 "description": "My <em>favorite</em> dip.",
                 "image": ["https://www.loveandlemons.com/guac.jpg"],
                 "recipeIngredient": ["3 <strong>ripe</strong> avocados", "1 lime"],
                 "recipeInstructions": [{"@type": "HowToStep", "text": "Mash everything."}],
                 "recipeYield": ["4"],
                 "recipeCategory": ["Appetizer"],
                 "nutrition": {"calories": "180"}}
            ]}</script></head><body></body></html>"#;

        let recipe = LoveAndLemonsParser
            .parse(html, "https://www.loveandlemons.com/guacamole-recipe/")
            .unwrap();
        assert_eq!(recipe.description, "My favorite dip.");
        assert_eq!(recipe.ingredients[0].text, "3 ripe avocados");
        assert_eq!(recipe.author, DEFAULT_AUTHOR);
    }
}
