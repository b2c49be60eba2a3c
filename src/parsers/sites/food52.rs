use crate::error::ExtractError;
use crate::extractors::selectors::{
    element_text, extract_elements, first_attr, first_text, meta_content, parse_selector,
};
use crate::extractors::JsonLdRecipe;
use crate::model::{Ingredient, Instruction, Recipe};
use crate::parsers::SiteParser;
use log::debug;
use scraper::{ElementRef, Html};

const ERROR_PAGE_MARKER: &str = "Apologies, that page cannot be found.";

const AUTHORS: &[&str] = &["a[href*=\"/author/\"]", ".byline", ".entry-author", "[class*=\"author\"]"];
const INGREDIENTS: &[&str] = &[".recipe__ingredient", ".ingredients li", ".recipe__list--ingredients li"];
const INSTRUCTIONS: &[&str] = &[".recipe__instruction", ".instructions li", ".recipe__list--steps li"];
const IMAGES: &[&str] = &["img.recipe__image", ".main-image"];
const SERVINGS: &[&str] = &[".recipe__servings", "[class*=\"servings\"]"];
const TAGS: &[&str] = &[".recipe__tag", ".tags li"];
const NOTES: &[&str] = &[".recipe__note", ".notes li"];

/// The `<dd>` following a `<dt>` whose text mentions `term`.
fn definition_for(document: &Html, term: &str) -> String {
    let Some(dt) = parse_selector("dt") else {
        return String::new();
    };
    let term = term.to_lowercase();

    document
        .select(&dt)
        .filter(|el| element_text(*el).to_lowercase().contains(&term))
        .find_map(|el| {
            el.next_siblings()
                .find_map(ElementRef::wrap)
                .filter(|next| next.value().name() == "dd")
                .map(element_text)
        })
        .unwrap_or_default()
}

fn itemprop(document: &Html, prop: &str) -> Option<String> {
    first_attr(document, &[&format!("meta[itemprop=\"{prop}\"]")], "content")
}

fn non_empty_or(value: String, fallback: impl FnOnce() -> String) -> String {
    if value.is_empty() {
        fallback()
    } else {
        value
    }
}

pub struct Food52Parser;

impl SiteParser for Food52Parser {
    fn name(&self) -> &'static str {
        "food52"
    }

    fn domains(&self) -> &'static [&'static str] {
        &["food52.com"]
    }

    /// Best effort: returns whatever could be found without enforcing a contract.
    fn parse(&self, html: &str, url: &str) -> Result<Recipe, ExtractError> {
        if html.contains(ERROR_PAGE_MARKER) {
            debug!("[{}] Error page detected for {}", self.name(), url);
            return Ok(Recipe::sentinel());
        }

        let document = Html::parse_document(html);
        let data = JsonLdRecipe::extract(&document).unwrap_or_default();

        let title = non_empty_or(first_text(&document, &["h1"]), || {
            meta_content(&document, "og:title").unwrap_or_default()
        });

        let author = data
            .author_name()
            .or_else(|| Some(first_text(&document, AUTHORS)).filter(|a| !a.is_empty()))
            .or_else(|| meta_content(&document, "author"))
            .unwrap_or_default();

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

        let image_url = data
            .image_url()
            .or_else(|| meta_content(&document, "og:image"))
            .or_else(|| first_attr(&document, IMAGES, "src"))
            .unwrap_or_default();

        let prep_time = non_empty_or(data.prep_time(), || {
            itemprop(&document, "prepTime").unwrap_or_else(|| definition_for(&document, "prep time"))
        });
        let cook_time = non_empty_or(data.cook_time(), || {
            itemprop(&document, "cookTime").unwrap_or_else(|| definition_for(&document, "cook time"))
        });
        let total_time = non_empty_or(data.total_time(), || {
            itemprop(&document, "totalTime").unwrap_or_default()
        });
        let servings = non_empty_or(data.yield_text(), || {
            non_empty_or(first_text(&document, SERVINGS), || definition_for(&document, "serves"))
        });

        // Categories, keywords and page tags all describe the recipe here
        let mut categories = data.categories();
        categories.extend(data.keywords());
        categories.extend(extract_elements(&document, TAGS));

        let description = meta_content(&document, "description").unwrap_or_else(|| data.description());

        Ok(Recipe {
            title,
            source: url.to_string(),
            author,
            ingredients,
            instructions,
            image_url,
            prep_time,
            cook_time,
            total_time,
            servings,
            categories,
            description,
            reviews: data.reviews(),
            nutrition: data.nutrition(),
            notes: extract_elements(&document, NOTES),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_page_returns_sentinel() {
        let html = "<html><body><h2>Apologies, that page cannot be found.</h2></body></html>";
        let recipe = Food52Parser
            .parse(html, "https://food52.com/recipes/00000-missing")
            .unwrap();
        assert!(recipe.is_sentinel());
    }

    #[test]
    fn test_best_effort_merges_tags() {
        let html = r#"<html><head>
            <meta name="description" content="A simple weeknight pasta.">
            <script type="application/ld+json">{"@type": "Recipe", "name": "Pasta",
                "author": {"@type": "Person", "name": "null"},
                "recipeCategory": "Dinner", "keywords": "pasta, quick"}</script>
            </head><body>
            <h1>Marcella's Tomato Sauce</h1>
            <a href="/author/jane">Jane Cook</a>
            <ul class="ingredients"><li>28 ounces tomatoes</li><li>5 tablespoons butter</li></ul>
            <dl><dt>Prep Time</dt><dd>5 minutes</dd><dt>Serves</dt><dd>4</dd></dl>
            <ul class="tags"><li>Vegetarian</li></ul>
            </body></html>"#;

        let recipe = Food52Parser
            .parse(html, "https://food52.com/recipes/1-tomato-sauce")
            .unwrap();
        assert_eq!(recipe.title, "Marcella's Tomato Sauce");
        assert_eq!(recipe.author, "Jane Cook");
        assert_eq!(recipe.ingredients.len(), 2);
        assert!(recipe.instructions.is_empty());
        assert_eq!(recipe.prep_time, "5 minutes");
        assert_eq!(recipe.servings, "4");
        for tag in ["Dinner", "pasta", "quick", "Vegetarian"] {
            assert!(recipe.categories.contains(tag), "missing {tag}");
        }
        assert_eq!(recipe.description, "A simple weeknight pasta.");
    }
}
