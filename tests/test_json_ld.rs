use recipe_extract::extractors::json_ld::{extract_json_ld, is_recipe_type};
use recipe_extract::extractors::JsonLdRecipe;
use scraper::Html;
use serde_json::json;

fn create_recipe_html(json_ld: &str) -> String {
    format!(
        r#"
        <!DOCTYPE html>
        <html>
        <head>
            <title>Recipe Page</title>
            <script type="application/ld+json">
                {json_ld}
            </script>
        </head>
        <body>
            <h1>Recipe</h1>
        </body>
        </html>
        "#
    )
}

fn parse(json_ld: &str) -> JsonLdRecipe {
    let html = create_recipe_html(json_ld);
    JsonLdRecipe::extract(&Html::parse_document(&html)).expect("recipe node")
}

#[test]
fn test_recipe_inside_graph() {
    let html = create_recipe_html(
        r#"{
            "@context": "https://schema.org",
            "@graph": [
                {"@type": "Organization", "name": "Publisher"},
                {"@type": "BreadcrumbList"},
                {"@type": "Recipe", "name": "Lentil Soup"}
            ]
        }"#,
    );
    let node = extract_json_ld(&html).unwrap();
    assert_eq!(node["name"], "Lentil Soup");
}

#[test]
fn test_recipe_in_top_level_array() {
    let html = create_recipe_html(
        r#"[
            {"@type": "WebPage", "name": "Page"},
            {"@type": "Recipe", "name": "Pancakes"}
        ]"#,
    );
    assert_eq!(extract_json_ld(&html).unwrap()["name"], "Pancakes");
}

#[test]
fn test_type_arrays_and_case() {
    assert!(is_recipe_type(&json!({"@type": ["NewsArticle", "Recipe"]})));
    assert!(is_recipe_type(&json!({"@type": "recipe"})));
    assert!(!is_recipe_type(&json!({"@type": "Article"})));
    assert!(!is_recipe_type(&json!({"name": "No type"})));
}

#[test]
fn test_no_recipe_node() {
    let html = create_recipe_html(r#"{"@type": "Article", "headline": "News"}"#);
    assert!(extract_json_ld(&html).is_none());
    assert!(extract_json_ld("<html><body>No scripts</body></html>").is_none());
}

#[test]
fn test_malformed_script_is_skipped() {
    let html = r#"<html><head>
        <script type="application/ld+json">{ "@type": "Recipe", "name": </script>
        <script type="application/ld+json">{"@type": "Recipe", "name": "Second Try"}</script>
        </head></html>"#;
    assert_eq!(extract_json_ld(html).unwrap()["name"], "Second Try");
}

#[test]
fn test_author_shapes() {
    let single = parse(r#"{"@type": "Recipe", "name": "A", "author": {"@type": "Person", "name": "Chef Maria"}}"#);
    assert_eq!(single.author_name().as_deref(), Some("Chef Maria"));

    let many = parse(
        r#"{"@type": "Recipe", "name": "A", "author": [{"name": "Chef One"}, {"name": "Chef Two"}]}"#,
    );
    assert_eq!(many.author_name().as_deref(), Some("Chef One, Chef Two"));

    let id_only = parse(r#"{"@type": "Recipe", "name": "A", "author": {"@id": "https://example.com/#author"}}"#);
    assert_eq!(id_only.author_name(), None);
}

#[test]
fn test_instruction_shapes() {
    let sections = parse(
        r#"{
            "@type": "Recipe",
            "name": "Layer Cake",
            "recipeInstructions": [
                {
                    "@type": "HowToSection",
                    "name": "Cake",
                    "itemListElement": [
                        {"@type": "HowToStep", "text": "Bake the layers."},
                        {"@type": "HowToStep", "text": "Cool completely."}
                    ]
                },
                {
                    "@type": "HowToSection",
                    "name": "Frosting",
                    "itemListElement": [{"@type": "HowToStep", "text": "Whip the frosting."}]
                }
            ]
        }"#,
    );
    let steps = sections.instructions();
    assert_eq!(steps.len(), 3);
    assert_eq!(steps[2].step_number, 3);
    assert_eq!(steps[2].text, "Whip the frosting.");

    let text_block = parse(
        r#"{"@type": "Recipe", "name": "Toast", "recipeInstructions": "Toast the bread.\nButter it."}"#,
    );
    assert_eq!(text_block.instructions().len(), 2);
}

#[test]
fn test_entities_and_whitespace_are_cleaned() {
    let recipe = parse(
        r#"{
            "@type": "Recipe",
            "name": "Mac &amp;amp; Cheese",
            "recipeIngredient": ["  2 cups   macaroni ", "1 cup cheddar &amp; jack"]
        }"#,
    );
    assert_eq!(recipe.title(), "Mac & Cheese");
    let ingredients = recipe.ingredients();
    assert_eq!(ingredients[0].text, "2 cups macaroni");
    assert_eq!(ingredients[1].text, "1 cup cheddar & jack");
}

#[test]
fn test_image_and_yield_shapes() {
    let recipe = parse(
        r#"{
            "@type": "Recipe",
            "name": "Salad",
            "image": [{"@type": "ImageObject", "url": "https://example.com/salad.jpg"}, "https://example.com/other.jpg"],
            "recipeYield": 4
        }"#,
    );
    assert_eq!(recipe.image_url().as_deref(), Some("https://example.com/salad.jpg"));
    assert_eq!(recipe.yield_text(), "4");
}
