use crate::error::ExtractError;
use crate::extractors::selectors::{lists_after_heading, meta_content};
use crate::model::{Ingredient, Instruction, Recipe, SITE_CONTRACT};
use crate::parsers::{enforce_contract, named_json_ld, recipe_from_json_ld, SelectorSet, SiteParser};
use scraper::Html;

const DEFAULT_AUTHOR: &str = "Deb Perelman";

// Recipe cards on the blog carry no nutrition block
const NUTRITION_PLACEHOLDER: &str = "See original recipe for nutrition info.";

// Jetpack recipe-card markup first, then older post layouts.
const SELECTORS: SelectorSet = SelectorSet {
    title: &[".jetpack-recipe-title", "h1.entry-title", "h1.post-title", "h1"],
    author: &[".jetpack-recipe-source", ".author-meta", ".author"],
    description: &[".jetpack-recipe-notes", ".entry-content p"],
    ingredients: &[
        ".jetpack-recipe-ingredient",
        ".recipe-ingredients li",
        ".ingredients li",
        ".wprm-recipe-ingredient",
    ],
    instructions: &[
        ".jetpack-recipe-directions li",
        ".jetpack-recipe-directions p",
        ".jetpack-recipe-directions",
        ".instructions li",
        ".wprm-recipe-instruction-text",
        ".entry-content ol li",
    ],
    images: &[".recipe-photo img", ".entry-content img"],
    total_time: &[".jetpack-recipe-time time", ".jetpack-recipe-time"],
    servings: &[".jetpack-recipe-servings"],
    categories: &["a[rel~=\"category\"]", ".cat-links a"],
    ..SelectorSet::EMPTY
};

pub struct SmittenKitchenParser;

impl SmittenKitchenParser {
    fn scrape(&self, document: &Html, url: &str) -> Recipe {
        let mut recipe = SELECTORS.scrape(document, url);

        // og:image is the hero shot; inline images are often process photos
        if let Some(og_image) = meta_content(document, "og:image") {
            recipe.image_url = og_image;
        }

        if recipe.ingredients.is_empty() {
            recipe.ingredients = lists_after_heading(document, "h2", "ingredients", "ul")
                .into_iter()
                .map(Ingredient::new)
                .collect();
        }

        if recipe.instructions.is_empty() {
            let steps = ["directions", "instructions"]
                .into_iter()
                .map(|keyword| lists_after_heading(document, "h2", keyword, "ul"))
                .find(|steps| !steps.is_empty())
                .unwrap_or_default();
            recipe.instructions = Instruction::numbered(steps);
        }

        if recipe.author.is_empty() {
            recipe.author = DEFAULT_AUTHOR.to_string();
        }
        if recipe.description.is_empty() {
            recipe.description = meta_content(document, "description").unwrap_or_default();
        }
        recipe.nutrition = NUTRITION_PLACEHOLDER.to_string();

        recipe
    }
}

impl SiteParser for SmittenKitchenParser {
    fn name(&self) -> &'static str {
        "smitten-kitchen"
    }

    fn domains(&self) -> &'static [&'static str] {
        &["smittenkitchen.com"]
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

#[cfg(test)]
mod tests {
    use super::*;

    const JETPACK_PAGE: &str = r#"<html><head>
        <title>Perfect Margaritas | smitten kitchen</title>
        <meta property="og:image" content="https://smittenkitchen.com/wp-content/margarita.jpg">
        </head><body>
        <div class="entry-content">
          <div class="jetpack-recipe">
            <h3 class="jetpack-recipe-title">Perfect Margaritas</h3>
            <div class="jetpack-recipe-meta">
              <div class="jetpack-recipe-servings">Servings: 2</div>
              <div class="jetpack-recipe-time"><time>Time: 10 minutes</time></div>
              <div class="jetpack-recipe-source">Source: Adapted from a bar</div>
            </div>
            <div class="jetpack-recipe-notes">Bright, tart and not too sweet.</div>
            <ul>
              <li class="jetpack-recipe-ingredient">2 ounces tequila</li>
              <li class="jetpack-recipe-ingredient">1 ounce lime juice</li>
            </ul>
            <div class="jetpack-recipe-directions"><p>Shake with ice.</p><p>Strain and serve.</p></div>
          </div>
          <p>Filed under <a rel="category tag" href="/cocktails">Cocktails</a></p>
        </div>
        </body></html>"#;

    #[test]
    fn test_jetpack_card_fallback() {
        let recipe = SmittenKitchenParser
            .parse(JETPACK_PAGE, "https://smittenkitchen.com/2020/05/margaritas/")
            .unwrap();

        assert_eq!(recipe.title, "Perfect Margaritas");
        assert_eq!(recipe.author, "Adapted from a bar");
        assert_eq!(recipe.servings, "2");
        assert_eq!(recipe.total_time, "10 minutes");
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.instructions.len(), 2);
        assert_eq!(recipe.instructions[1].text, "Strain and serve.");
        assert_eq!(
            recipe.image_url,
            "https://smittenkitchen.com/wp-content/margarita.jpg"
        );
        assert!(recipe.categories.contains("Cocktails"));
        assert_eq!(recipe.nutrition, NUTRITION_PLACEHOLDER);
    }

    #[test]
    fn test_json_ld_defaults_author() {
        let html = r#"<html><head><script type="application/ld+json">{
            "@type": "Recipe",
            "name": "Everyday Chocolate Cake",
            "description": "A one-bowl cake.",
            "image": "https://smittenkitchen.com/cake.jpg",
            "recipeIngredient": ["1 cup sugar", "1 cup flour"],
            "recipeInstructions": [{"@type": "HowToStep", "text": "Mix."}, {"@type": "HowToStep", "text": "Bake."}],
            "recipeYield": "8",
            "recipeCategory": "Cake",
            "nutrition": {"calories": "300"}
        }</script></head><body></body></html>"#;

        let recipe = SmittenKitchenParser
            .parse(html, "https://smittenkitchen.com/cake/")
            .unwrap();
        assert_eq!(recipe.author, DEFAULT_AUTHOR);
        assert_eq!(recipe.instructions[0].step_number, 1);
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        let html = "<html><body><h1>Just a post</h1></body></html>";
        let err = SmittenKitchenParser
            .parse(html, "https://smittenkitchen.com/post/")
            .unwrap_err();
        assert!(matches!(err, ExtractError::MissingRequiredFields { .. }));
    }
}
