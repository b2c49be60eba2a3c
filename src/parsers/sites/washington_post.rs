use crate::error::ExtractError;
use crate::extractors::selectors::{
    element_text, extract_elements_where, meta_content, parse_selector,
};
use crate::model::{ContractField, Ingredient, Instruction, Recipe};
use crate::parsers::{
    enforce_contract, host_matches, named_json_ld, parse_url, recipe_from_json_ld, SelectorSet,
    SiteParser,
};
use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

/// Articles credit a byline that is rarely the recipe author, so it is not required.
const CONTRACT: &[ContractField] = &[
    ContractField::Title,
    ContractField::Description,
    ContractField::Image,
    ContractField::Ingredients,
    ContractField::Instructions,
    ContractField::Yield,
    ContractField::Categories,
    ContractField::Nutrition,
];

const INGREDIENTS: &[&str] = &[
    ".recipe-ingredients li",
    ".ingredients-section li",
    ".ingredient-list li",
    "ul[data-qa=\"ingredients\"] li",
    ".wpds-box ul li",
    "li[data-ingredient]",
];

const INSTRUCTIONS: &[&str] = &[
    ".recipe-instructions li",
    ".instructions-section li",
    ".method-steps li",
    "ol[data-qa=\"instructions\"] li",
    ".recipe-method li",
    ".directions li",
];

const IMAGES: &[&str] = &[
    ".recipe-hero img",
    ".lead-image img",
    ".featured-image img",
    "img[data-qa=\"hero-image\"]",
    ".wpds-image img",
];

const SELECTORS: SelectorSet = SelectorSet {
    title: &[
        "h1[data-qa=\"headline\"]",
        "h1.headline",
        "h1.font--headline",
        "h1",
        "[data-qa=\"headline\"]",
    ],
    description: &[".recipe-description", ".article-summary", ".dek"],
    prep_time: &["[data-qa=\"prep-time\"]", ".prep-time"],
    cook_time: &["[data-qa=\"cook-time\"]", ".cook-time"],
    total_time: &["[data-qa=\"total-time\"]", ".total-time"],
    servings: &["[data-qa=\"servings\"]", ".servings", ".yield"],
    ..SelectorSet::EMPTY
};

const INGREDIENT_HEADERS: &[&str] = &["ingredients", "for the", "you will need", "shopping list"];
const INSTRUCTION_HEADERS: &[&str] = &["instructions", "method", "directions", "steps"];

static INGREDIENT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\d+.*(?:cup|tablespoon|teaspoon|pound|ounce|gram|kg|lb)",
        r"(?i)\b(?:salt|pepper|oil|butter|flour|sugar|egg|milk|water|onion|garlic)\b",
        r"^\d+(?:\s*-\s*\d+)?\s+",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("Invalid ingredient pattern"))
    .collect()
});

static INSTRUCTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)^(?:heat|cook|add|mix|stir|bake|roast|grill|sauté|simmer|boil)",
        r"(?i)(?:minutes?|hours?|until|degrees?|°[CF])",
        r"(?i)\b(?:oven|pan|skillet|pot|bowl|plate)\b",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("Invalid instruction pattern"))
    .collect()
});

fn is_header(text: &str, headers: &[&str]) -> bool {
    let lower = text.to_lowercase();
    headers.iter().any(|header| lower.contains(header))
}

fn looks_like_ingredient(text: &str) -> bool {
    text.chars().count() < 200 && INGREDIENT_PATTERNS.iter().any(|re| re.is_match(text))
}

fn looks_like_instruction(text: &str) -> bool {
    let len = text.chars().count();
    len > 20 && len < 500 && INSTRUCTION_PATTERNS.iter().any(|re| re.is_match(text))
}

/// Paragraph texts accepted by `keep`, for articles without recipe markup.
fn paragraphs_where(document: &Html, keep: fn(&str) -> bool) -> Vec<String> {
    let Some(p) = parse_selector("p") else {
        return Vec::new();
    };
    document
        .select(&p)
        .map(element_text)
        .filter(|text| !text.is_empty() && keep(text.as_str()))
        .collect()
}

/// Hero image `src` or `data-src`, resolved against the page URL.
fn hero_image(document: &Html, url: &str) -> Option<String> {
    let src = IMAGES
        .iter()
        .filter_map(|s| parse_selector(s))
        .find_map(|selector| {
            let img = document.select(&selector).next()?;
            img.value()
                .attr("src")
                .or_else(|| img.value().attr("data-src"))
                .map(str::trim)
                .filter(|src| !src.is_empty())
                .map(str::to_string)
        })?;

    if src.starts_with("http") {
        return Some(src);
    }
    parse_url(url)
        .and_then(|base| base.join(&src).ok())
        .map(|resolved| resolved.to_string())
}

pub struct WashingtonPostParser;

impl WashingtonPostParser {
    fn scrape(&self, document: &Html, url: &str) -> Recipe {
        let mut recipe = SELECTORS.scrape(document, url);

        let mut ingredients = extract_elements_where(document, INGREDIENTS, |text| {
            !is_header(text, INGREDIENT_HEADERS)
        });
        if ingredients.is_empty() {
            ingredients = paragraphs_where(document, looks_like_ingredient);
        }
        recipe.ingredients = ingredients.into_iter().map(Ingredient::new).collect();

        let mut steps = extract_elements_where(document, INSTRUCTIONS, |text| {
            !is_header(text, INSTRUCTION_HEADERS)
        });
        if steps.is_empty() {
            steps = paragraphs_where(document, looks_like_instruction);
        }
        recipe.instructions = Instruction::numbered(steps);

        recipe.image_url = hero_image(document, url)
            .or_else(|| meta_content(document, "og:image"))
            .unwrap_or_default();

        recipe
    }
}

impl SiteParser for WashingtonPostParser {
    fn name(&self) -> &'static str {
        "washington-post"
    }

    fn domains(&self) -> &'static [&'static str] {
        &["washingtonpost.com"]
    }

    /// Only food-section pages and recipe URLs; news articles are skipped.
    fn can_parse(&self, url: &str) -> bool {
        if !host_matches(url, "washingtonpost.com") {
            return false;
        }
        let in_food_section = parse_url(url).is_some_and(|parsed| parsed.path().starts_with("/food"));
        in_food_section || url.to_lowercase().contains("recipe")
    }

    fn parse(&self, html: &str, url: &str) -> Result<Recipe, ExtractError> {
        let document = Html::parse_document(html);

        let recipe = match named_json_ld(&document, self.name()) {
            Some(data) => recipe_from_json_ld(&data, url, None),
            None => self.scrape(&document, url),
        };

        enforce_contract(self.name(), recipe, CONTRACT)
    }
}
