use crate::extractors::selectors::page_title;
use crate::model::Recipe;
use crate::parsers::ParserRegistry;
use log::{debug, warn};
use scraper::Html;
use serde::Serialize;

/// Category recorded on a placeholder when no parser handles the page.
pub const NO_PARSER_TAG: &str = "no-parser-available";
/// Category recorded on a placeholder when the selected parser failed.
pub const PARSER_ERROR_TAG: &str = "parser-error";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "kebab-case")]
pub enum CaptureOutcome {
    Parsed,
    /// The publisher served its "not found" page
    ErrorPage,
    NoParserAvailable,
    ParserError(String),
}

/// A recipe ready to hand to storage, plus how it was obtained.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Capture {
    pub recipe: Recipe,
    pub outcome: CaptureOutcome,
}

/// Extracts the recipe on a page and never fails.
///
/// When no parser handles the URL, or the parser rejects the page, the
/// recipe is a placeholder titled after the page `<title>` (or the URL) and
/// tagged with [`NO_PARSER_TAG`] or [`PARSER_ERROR_TAG`].
pub fn capture(registry: &ParserRegistry, html: &str, url: &str) -> Capture {
    match registry.parse_recipe(html, url) {
        Ok(Some(recipe)) if recipe.is_sentinel() => {
            debug!("Error page captured for {}", url);
            Capture {
                recipe,
                outcome: CaptureOutcome::ErrorPage,
            }
        }
        Ok(Some(recipe)) => Capture {
            recipe,
            outcome: CaptureOutcome::Parsed,
        },
        Ok(None) => Capture {
            recipe: placeholder(html, url, NO_PARSER_TAG),
            outcome: CaptureOutcome::NoParserAvailable,
        },
        Err(err) => {
            warn!("Parser failed for {}: {}", url, err);
            Capture {
                recipe: placeholder(html, url, PARSER_ERROR_TAG),
                outcome: CaptureOutcome::ParserError(err.to_string()),
            }
        }
    }
}

fn placeholder(html: &str, url: &str, tag: &str) -> Recipe {
    let document = Html::parse_document(html);
    Recipe::fallback(page_title(&document).as_deref(), url, tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_site_gets_placeholder() {
        let html = "<html><head><title>Grandma's Stew</title></head><body></body></html>";
        let captured = capture(&ParserRegistry::new(), html, "https://example.com/stew");
        assert_eq!(captured.outcome, CaptureOutcome::NoParserAvailable);
        assert_eq!(captured.recipe.title, "Grandma's Stew");
        assert!(captured.recipe.categories.contains(NO_PARSER_TAG));
    }

    #[test]
    fn test_parser_error_gets_placeholder() {
        let html = "<html><body><h1>Soup</h1></body></html>";
        let captured = capture(&ParserRegistry::new(), html, "https://smittenkitchen.com/soup/");
        assert!(matches!(captured.outcome, CaptureOutcome::ParserError(_)));
        assert_eq!(captured.recipe.title, "https://smittenkitchen.com/soup/");
        assert!(captured.recipe.categories.contains(PARSER_ERROR_TAG));
    }

    #[test]
    fn test_error_page_outcome() {
        let html = "<html><head><title>Page Not Found | Food Network</title></head></html>";
        let captured = capture(&ParserRegistry::new(), html, "https://www.foodnetwork.com/gone");
        assert_eq!(captured.outcome, CaptureOutcome::ErrorPage);
        assert!(captured.recipe.is_sentinel());
    }

    #[test]
    fn test_empty_best_effort_result_is_parsed() {
        let html = "<html><head><title>About Us | Epicurious</title></head>\
                    <body><p>Our editors cook every recipe.</p></body></html>";
        let url = "https://www.epicurious.com/about";
        let captured = capture(&ParserRegistry::new(), html, url);
        assert_eq!(captured.outcome, CaptureOutcome::Parsed);
        assert!(!captured.recipe.is_sentinel());
        assert_eq!(captured.recipe.source, url);
        assert!(captured.recipe.ingredients.is_empty());
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(CaptureOutcome::ParserError("boom".to_string())).unwrap();
        assert_eq!(json["status"], "parser-error");
        assert_eq!(json["message"], "boom");
    }
}
