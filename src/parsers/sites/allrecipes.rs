use crate::error::ExtractError;
use crate::extractors::selectors::{extract_elements, first_text, meta_content, page_title};
use crate::extractors::JsonLdRecipe;
use crate::model::{Ingredient, Instruction, Recipe, SITE_CONTRACT};
use crate::parsers::{enforce_contract, is_not_found_page, SiteParser};
use log::debug;
use scraper::Html;
use serde_json::Value;

const DEFAULT_AUTHOR: &str = "Allrecipes";

const INGREDIENTS: &[&str] = &[
    ".recipe-ingredients li",
    ".mntl-structured-ingredients__list-item",
    ".ingredients li",
    "[data-ingredient] li",
];

const INSTRUCTIONS: &[&str] = &[
    ".recipe-instructions li",
    ".mntl-sc-block-group--LI .mntl-sc-block",
    ".instructions li",
    "[data-instruction] li",
    "ol li",
];

pub struct AllrecipesParser;

/// Nutrition facts as "calories: 210 kcal; fatContent: 9 g".
fn format_nutrition(nutrition: &Value) -> String {
    match nutrition {
        Value::Object(facts) => facts
            .iter()
            .filter(|(key, _)| !key.starts_with('@'))
            .map(|(key, value)| match value {
                Value::String(text) => format!("{key}: {text}"),
                other => format!("{key}: {other}"),
            })
            .collect::<Vec<_>>()
            .join("; "),
        _ => String::new(),
    }
}

fn first_non_empty(candidates: impl IntoIterator<Item = Option<String>>) -> String {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

impl SiteParser for AllrecipesParser {
    fn name(&self) -> &'static str {
        "allrecipes"
    }

    fn domains(&self) -> &'static [&'static str] {
        &["allrecipes.com"]
    }

    /// Each field falls back on its own: JSON-LD, then page metadata, then
    /// the recipe markup.
    fn parse(&self, html: &str, url: &str) -> Result<Recipe, ExtractError> {
        let document = Html::parse_document(html);

        if is_not_found_page(&document) {
            debug!("[{}] Error page detected for {}", self.name(), url);
            return Ok(Recipe::sentinel());
        }

        let data = JsonLdRecipe::extract(&document).unwrap_or_default();

        let title = first_non_empty([
            Some(data.title()),
            Some(data.headline()),
            meta_content(&document, "og:title"),
            page_title(&document),
        ]);

        let description = first_non_empty([
            Some(data.description()),
            meta_content(&document, "description"),
            meta_content(&document, "og:description"),
        ]);

        let image_url = first_non_empty([
            data.image_url(),
            meta_content(&document, "og:image"),
            meta_content(&document, "twitter:image"),
        ]);

        let author = first_non_empty([
            data.author_name(),
            meta_content(&document, "article:author"),
            Some(DEFAULT_AUTHOR.to_string()),
        ]);

        let mut ingredients = data.ingredients();
        if ingredients.is_empty() {
            ingredients = extract_elements(&document, INGREDIENTS)
                .into_iter()
                .map(Ingredient::new)
                .collect();
        }

        let mut instructions = data.instructions();
        if instructions.is_empty() {
            instructions = Instruction::numbered(extract_elements(&document, INSTRUCTIONS));
        }

        let mut categories = data.categories();
        if categories.is_empty() {
            if let Some(tags) = meta_content(&document, "parsely-tags") {
                categories = tags
                    .split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_string)
                    .collect();
            }
        }

        let servings = first_non_empty([
            Some(data.yield_text()),
            Some(first_text(&document, &[".recipe-yield", ".recipe-servings", ".servings"])),
        ]);

        let recipe = Recipe {
            title,
            source: url.to_string(),
            author,
            ingredients,
            instructions,
            image_url,
            prep_time: data.prep_time(),
            cook_time: data.cook_time(),
            total_time: data.total_time(),
            servings,
            categories,
            description,
            reviews: data.reviews(),
            nutrition: data.nutrition_value().map(format_nutrition).unwrap_or_default(),
            notes: Vec::new(),
        };

        enforce_contract(self.name(), recipe, SITE_CONTRACT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_not_found_page_returns_sentinel() {
        let html = r#"<html><head>
            <link rel="canonical" href="https://www.allrecipes.com/404">
            <title>Page Not Found</title>
            </head><body></body></html>"#;
        let recipe = AllrecipesParser
            .parse(html, "https://www.allrecipes.com/recipe/0/gone/")
            .unwrap();
        assert!(recipe.is_sentinel());
    }

    #[test]
    fn test_nutrition_is_flattened() {
        let nutrition = json!({
            "@type": "NutritionInformation",
            "calories": "210 kcal",
            "fatContent": "9 g"
        });
        assert_eq!(format_nutrition(&nutrition), "calories: 210 kcal; fatContent: 9 g");
        assert_eq!(format_nutrition(&json!("n/a")), "");
    }

    #[test]
    fn test_meta_fills_gaps_in_json_ld() {
        let html = r#"<html><head>
            <meta property="og:image" content="https://www.allrecipes.com/thumbnail.jpg">
            <meta name="description" content="Easy banana bread.">
            <meta name="parsely-tags" content="Bread, Quick Bread">
            <script type="application/ld+json">[{"@type": ["Recipe"],
                "headline": "Banana Banana Bread",
                "author": [{"@type": "Person", "name": "Shelley Albeluhn"}],
                "recipeIngredient": ["2 cups flour", "3 bananas"],
                "recipeInstructions": [{"@type": "HowToStep", "text": "Mash bananas."}],
                "recipeYield": ["12", "1 loaf"],
                "nutrition": {"@type": "NutritionInformation", "calories": "229 kcal"}
            }]</script>
            </head><body></body></html>"#;

        let recipe = AllrecipesParser
            .parse(html, "https://www.allrecipes.com/recipe/20144/banana-banana-bread/")
            .unwrap();
        assert_eq!(recipe.title, "Banana Banana Bread");
        assert_eq!(recipe.author, "Shelley Albeluhn");
        assert_eq!(recipe.description, "Easy banana bread.");
        assert_eq!(recipe.image_url, "https://www.allrecipes.com/thumbnail.jpg");
        assert_eq!(recipe.servings, "12, 1 loaf");
        assert_eq!(recipe.nutrition, "calories: 229 kcal");
        assert!(recipe.categories.contains("Quick Bread"));
    }
}
