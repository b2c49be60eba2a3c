use crate::extractors::selectors::{
    extract_elements, first_attr, first_text, link_href, meta_content, page_title,
};
use crate::model::{Ingredient, Instruction, Recipe};
use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

static LABEL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:by\s+|(?:source|author|time|servings|yield)\s*:\s*)")
        .expect("Invalid label regex")
});

/// Drops a leading "By " or "Source:"-style label from scraped text.
pub(crate) fn strip_label(text: &str) -> String {
    LABEL_REGEX.replace(text, "").trim().to_string()
}

/// Canonical or `og:url` pointing at `/404`, or a bare "Page Not Found" title.
pub(crate) fn is_not_found_page(document: &Html) -> bool {
    let points_to_404 = |target: Option<String>| target.is_some_and(|t| t.contains("/404"));

    points_to_404(link_href(document, "canonical"))
        || points_to_404(meta_content(document, "og:url"))
        || page_title(document).is_some_and(|title| title == "Page Not Found")
}

/// Selector chains for one site's DOM fallback path.
///
/// Each chain is tried in order and the first selector with content wins.
/// Images read the `src` attribute and fall back to `og:image`.
pub(crate) struct SelectorSet {
    pub title: &'static [&'static str],
    pub author: &'static [&'static str],
    pub description: &'static [&'static str],
    pub ingredients: &'static [&'static str],
    pub instructions: &'static [&'static str],
    pub images: &'static [&'static str],
    pub prep_time: &'static [&'static str],
    pub cook_time: &'static [&'static str],
    pub total_time: &'static [&'static str],
    pub servings: &'static [&'static str],
    pub categories: &'static [&'static str],
    pub notes: &'static [&'static str],
}

impl SelectorSet {
    pub const EMPTY: SelectorSet = SelectorSet {
        title: &[],
        author: &[],
        description: &[],
        ingredients: &[],
        instructions: &[],
        images: &[],
        prep_time: &[],
        cook_time: &[],
        total_time: &[],
        servings: &[],
        categories: &[],
        notes: &[],
    };

    pub fn scrape(&self, document: &Html, url: &str) -> Recipe {
        let labelled = |chain: &[&str]| strip_label(&first_text(document, chain));

        let image_url = first_attr(document, self.images, "src")
            .or_else(|| meta_content(document, "og:image"))
            .unwrap_or_default();

        Recipe {
            title: first_text(document, self.title),
            source: url.to_string(),
            author: labelled(self.author),
            ingredients: extract_elements(document, self.ingredients)
                .into_iter()
                .map(Ingredient::new)
                .collect(),
            instructions: Instruction::numbered(extract_elements(document, self.instructions)),
            image_url,
            prep_time: labelled(self.prep_time),
            cook_time: labelled(self.cook_time),
            total_time: labelled(self.total_time),
            servings: labelled(self.servings),
            categories: extract_elements(document, self.categories)
                .into_iter()
                .collect(),
            description: first_text(document, self.description),
            reviews: None,
            nutrition: String::new(),
            notes: extract_elements(document, self.notes),
        }
    }
}
