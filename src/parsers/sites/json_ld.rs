use crate::error::ExtractError;
use crate::extractors::JsonLdRecipe;
use crate::model::Recipe;
use crate::parsers::{parse_url, recipe_from_json_ld, SiteParser};
use scraper::Html;

/// Publisher-agnostic parser that relies only on schema.org structured data.
///
/// Registered only when enabled in configuration, and consulted after every
/// site parser has declined the URL.
pub struct JsonLdParser;

impl SiteParser for JsonLdParser {
    fn name(&self) -> &'static str {
        "json-ld"
    }

    fn domains(&self) -> &'static [&'static str] {
        &[]
    }

    fn can_parse(&self, url: &str) -> bool {
        parse_url(url).is_some_and(|parsed| matches!(parsed.scheme(), "http" | "https"))
    }

    fn parse(&self, html: &str, url: &str) -> Result<Recipe, ExtractError> {
        let document = Html::parse_document(html);
        let data = JsonLdRecipe::extract(&document).ok_or(ExtractError::NoStructuredData)?;
        Ok(recipe_from_json_ld(&data, url, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_structured_data() {
        let err = JsonLdParser
            .parse("<html><body><h1>Soup</h1></body></html>", "https://example.com/soup")
            .unwrap_err();
        assert!(matches!(err, ExtractError::NoStructuredData));
    }

    #[test]
    fn test_accepts_any_web_url() {
        assert!(JsonLdParser.can_parse("https://example.org/recipes/1"));
        assert!(JsonLdParser.can_parse("example.org/recipes/1"));
        assert!(!JsonLdParser.can_parse("ftp://example.org/recipe.txt"));
    }
}
