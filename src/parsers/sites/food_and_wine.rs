use crate::error::ExtractError;
use crate::model::Recipe;
use crate::parsers::{named_json_ld, recipe_from_json_ld, SelectorSet, SiteParser};
use scraper::Html;

const SELECTORS: SelectorSet = SelectorSet {
    title: &["h1.headline", "h1.recipe-title", "h1"],
    author: &[".author-name", ".by-author", ".recipe-author", "[rel=\"author\"]"],
    description: &[".article-subheading", ".recipe-summary"],
    ingredients: &[
        ".recipe-ingredients li",
        ".ingredients li",
        ".recipe-ingredient",
        ".mntl-structured-ingredients__list-item",
        ".structured-ingredients li",
    ],
    instructions: &[
        ".recipe-instructions li",
        ".instructions li",
        ".recipe-instruction",
        ".mntl-sc-block-group--LI .mntl-sc-block",
        ".recipe-directions li",
    ],
    images: &[".recipe-image img", ".hero-image img", ".primary-image img"],
    prep_time: &[".prep-time", ".recipe-prep-time", "[itemprop=\"prepTime\"]"],
    cook_time: &[".cook-time", ".recipe-cook-time", "[itemprop=\"cookTime\"]"],
    total_time: &[".total-time", ".recipe-total-time", "[itemprop=\"totalTime\"]"],
    servings: &[".servings", ".recipe-servings", ".recipe-yield", "[itemprop=\"recipeYield\"]"],
    ..SelectorSet::EMPTY
};

pub struct FoodAndWineParser;

impl SiteParser for FoodAndWineParser {
    fn name(&self) -> &'static str {
        "food-and-wine"
    }

    fn domains(&self) -> &'static [&'static str] {
        &["foodandwine.com"]
    }

    fn parse(&self, html: &str, url: &str) -> Result<Recipe, ExtractError> {
        let document = Html::parse_document(html);

        Ok(match named_json_ld(&document, self.name()) {
            Some(data) => recipe_from_json_ld(&data, url, None),
            None => SELECTORS.scrape(&document, url),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mntl_markup_fallback() {
        let html = r#"<html><head><meta property="og:image" content="https://www.foodandwine.com/img.jpg"></head>
            <body>
            <h1 class="headline">Grilled Corn</h1>
            <ul><li class="mntl-structured-ingredients__list-item">4 ears corn</li></ul>
            <ol class="mntl-sc-block-group--LI"><li class="mntl-sc-block">Grill the corn.</li></ol>
            <span class="recipe-yield">Serves 4</span>
            </body></html>"#;
        let recipe = FoodAndWineParser
            .parse(html, "https://www.foodandwine.com/recipes/grilled-corn")
            .unwrap();
        assert_eq!(recipe.title, "Grilled Corn");
        assert_eq!(recipe.ingredients[0].text, "4 ears corn");
        assert_eq!(recipe.instructions[0].text, "Grill the corn.");
        assert_eq!(recipe.servings, "Serves 4");
        assert_eq!(recipe.image_url, "https://www.foodandwine.com/img.jpg");
        assert!(recipe.author.is_empty());
    }
}
