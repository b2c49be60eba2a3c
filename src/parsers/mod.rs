use crate::error::ExtractError;
use crate::extractors::JsonLdRecipe;
use crate::model::{ContractField, Recipe};
use log::{debug, warn};
use url::Url;

mod fallback;
pub mod registry;
pub mod sites;

pub(crate) use self::fallback::{is_not_found_page, SelectorSet};
pub use self::registry::ParserRegistry;

/// A parser for one recipe publisher.
///
/// Implementations hold no per-call state and can be shared across threads.
pub trait SiteParser: Send + Sync {
    /// Short identifier used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Registrable domains this parser serves, without `www.`.
    fn domains(&self) -> &'static [&'static str];

    /// True when the URL's host is one of [`domains`](SiteParser::domains) or
    /// a subdomain of one.
    fn can_parse(&self, url: &str) -> bool {
        self.domains().iter().any(|domain| host_matches(url, domain))
    }

    /// Extracts a recipe from the page.
    ///
    /// Publisher error pages yield [`Recipe::sentinel`], never an error.
    fn parse(&self, html: &str, url: &str) -> Result<Recipe, ExtractError>;
}

pub(crate) fn parse_url(url: &str) -> Option<Url> {
    Url::parse(url)
        .or_else(|_| Url::parse(&format!("https://{url}")))
        .ok()
}

/// Lowercased host of `url` with any leading `www.` removed.
pub fn normalized_host(url: &str) -> Option<String> {
    let host = parse_url(url)?.host_str()?.to_ascii_lowercase();
    match host.strip_prefix("www.") {
        Some(bare) => Some(bare.to_string()),
        None => Some(host),
    }
}

/// Exact host or subdomain match; `notsmittenkitchen.com` does not match
/// `smittenkitchen.com`.
pub fn host_matches(url: &str, domain: &str) -> bool {
    normalized_host(url).is_some_and(|host| {
        host == domain
            || host
                .strip_suffix(domain)
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}

/// Maps structured data onto a [`Recipe`] with the shared schema.org coercions.
///
/// `default_author` fills in when the node names no author.
pub(crate) fn recipe_from_json_ld(
    data: &JsonLdRecipe,
    url: &str,
    default_author: Option<&str>,
) -> Recipe {
    Recipe {
        title: data.title(),
        source: url.to_string(),
        author: data
            .author_name()
            .or_else(|| default_author.map(str::to_string))
            .unwrap_or_default(),
        ingredients: data.ingredients(),
        instructions: data.instructions(),
        image_url: data.image_url().unwrap_or_default(),
        prep_time: data.prep_time(),
        cook_time: data.cook_time(),
        total_time: data.total_time(),
        servings: data.yield_text(),
        categories: data.categories(),
        description: data.description(),
        reviews: data.reviews(),
        nutrition: data.nutrition(),
        notes: Vec::new(),
    }
}

/// Structured data worth using: a Recipe node that carries a name.
pub(crate) fn named_json_ld(document: &scraper::Html, site: &str) -> Option<JsonLdRecipe> {
    let data = JsonLdRecipe::extract(document).filter(JsonLdRecipe::has_name);
    match &data {
        Some(_) => debug!("[{}] Using JSON-LD", site),
        None => debug!("[{}] No usable JSON-LD, falling back to selectors", site),
    }
    data
}

/// Rejects a recipe that leaves any `contract` field empty.
pub(crate) fn enforce_contract(
    site: &'static str,
    recipe: Recipe,
    contract: &[ContractField],
) -> Result<Recipe, ExtractError> {
    let fields = recipe.missing_contract_fields(contract);
    if fields.is_empty() {
        return Ok(recipe);
    }

    warn!("[{}] Missing required recipe fields: {}", site, fields.join(", "));
    Err(ExtractError::MissingRequiredFields { site, fields })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SITE_CONTRACT;

    #[test]
    fn test_normalized_host() {
        assert_eq!(
            normalized_host("https://WWW.SmittenKitchen.com/2020/01/soup/").as_deref(),
            Some("smittenkitchen.com")
        );
        assert_eq!(
            normalized_host("smittenkitchen.com/recipes").as_deref(),
            Some("smittenkitchen.com")
        );
        assert_eq!(normalized_host("not a url at all"), None);
    }

    #[test]
    fn test_host_matches_subdomains_only() {
        assert!(host_matches("https://smittenkitchen.com/x", "smittenkitchen.com"));
        assert!(host_matches("https://blog.smittenkitchen.com/x", "smittenkitchen.com"));
        assert!(!host_matches("https://notsmittenkitchen.com/x", "smittenkitchen.com"));
        assert!(!host_matches(
            "https://example.com/?ref=smittenkitchen.com",
            "smittenkitchen.com"
        ));
    }

    #[test]
    fn test_enforce_contract_lists_missing_fields() {
        let recipe = Recipe {
            title: "Soup".to_string(),
            ..Recipe::default()
        };
        match enforce_contract("test", recipe, SITE_CONTRACT) {
            Err(ExtractError::MissingRequiredFields { site, fields }) => {
                assert_eq!(site, "test");
                assert!(!fields.contains(&"title"));
                assert!(fields.contains(&"nutrition"));
            }
            other => panic!("expected contract failure, got {other:?}"),
        }
    }
}
