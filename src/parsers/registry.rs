use super::sites::{self, JsonLdParser};
use super::{normalized_host, SiteParser};
use crate::config::SitesConfig;
use crate::error::ExtractError;
use crate::model::Recipe;
use log::{debug, info};
use std::collections::HashMap;

/// Routes a page URL to the parser for its publisher.
///
/// Immutable once built, so one registry can serve any number of threads.
pub struct ParserRegistry {
    parsers: Vec<Box<dyn SiteParser>>,
    /// Registered domain -> indexes into `parsers`, in registration order
    by_domain: HashMap<&'static str, Vec<usize>>,
    /// Consulted when no site parser claims the URL
    generic: Option<Box<dyn SiteParser>>,
}

impl ParserRegistry {
    /// A registry with every site parser and no generic fallback.
    pub fn new() -> Self {
        Self::with_parsers(sites::all(), None)
    }

    /// A registry restricted to the sites enabled in `config`.
    pub fn from_config(config: &SitesConfig) -> Self {
        let parsers = sites::all()
            .into_iter()
            .filter(|parser| config.is_enabled(parser.name()))
            .collect();
        let generic: Option<Box<dyn SiteParser>> = if config.generic_fallback {
            Some(Box::new(JsonLdParser))
        } else {
            None
        };
        Self::with_parsers(parsers, generic)
    }

    fn with_parsers(
        parsers: Vec<Box<dyn SiteParser>>,
        generic: Option<Box<dyn SiteParser>>,
    ) -> Self {
        let mut by_domain: HashMap<&'static str, Vec<usize>> = HashMap::new();
        for (idx, parser) in parsers.iter().enumerate() {
            for domain in parser.domains() {
                by_domain.entry(*domain).or_default().push(idx);
            }
        }

        info!(
            "Registered {} site parsers{}",
            parsers.len(),
            if generic.is_some() {
                " with JSON-LD fallback"
            } else {
                ""
            }
        );

        ParserRegistry {
            parsers,
            by_domain,
            generic,
        }
    }

    /// The parser that should handle `url`, if any.
    ///
    /// The host and each of its parent domains are looked up from the most
    /// specific down, so `cooking.nytimes.com` finds the NYT Cooking parser
    /// before anything registered for `nytimes.com`. Each candidate still
    /// gets the final say through [`SiteParser::can_parse`].
    pub fn find_parser(&self, url: &str) -> Option<&dyn SiteParser> {
        let host = normalized_host(url)?;

        let mut suffix = host.as_str();
        loop {
            if let Some(indexes) = self.by_domain.get(suffix) {
                let found = indexes
                    .iter()
                    .map(|idx| self.parsers[*idx].as_ref())
                    .find(|parser| parser.can_parse(url));
                if let Some(parser) = found {
                    debug!("Selected {} parser for {}", parser.name(), url);
                    return Some(parser);
                }
            }
            match suffix.split_once('.') {
                Some((_, parent)) if parent.contains('.') => suffix = parent,
                _ => break,
            }
        }

        self.generic
            .as_deref()
            .filter(|parser| parser.can_parse(url))
            .inspect(|parser| debug!("Falling back to {} parser for {}", parser.name(), url))
    }

    pub fn can_parse(&self, url: &str) -> bool {
        self.find_parser(url).is_some()
    }

    /// Parses `html` with the parser selected for `url`.
    ///
    /// `Ok(None)` means no parser handles the URL. Parser failures are
    /// returned as they are.
    pub fn parse_recipe(&self, html: &str, url: &str) -> Result<Option<Recipe>, ExtractError> {
        let Some(parser) = self.find_parser(url) else {
            debug!("No parser available for {}", url);
            return Ok(None);
        };
        parser.parse(html, url).map(Some)
    }

    /// Names of the registered parsers, in registration order.
    pub fn parser_names(&self) -> Vec<&'static str> {
        self.parsers
            .iter()
            .chain(self.generic.iter())
            .map(|parser| parser.name())
            .collect()
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_by_host() {
        let registry = ParserRegistry::new();
        let cases = [
            ("https://smittenkitchen.com/2024/01/soup/", "smitten-kitchen"),
            ("https://www.foodnetwork.com/recipes/a-1", "food-network"),
            ("https://cooking.nytimes.com/recipes/1", "nyt-cooking"),
            ("https://www.allrecipes.com/recipe/10813/", "allrecipes"),
            ("https://www.washingtonpost.com/recipes/soup/", "washington-post"),
        ];
        for (url, name) in cases {
            assert_eq!(registry.find_parser(url).map(|p| p.name()), Some(name), "{url}");
        }
    }

    #[test]
    fn test_subdomains_and_lookalikes() {
        let registry = ParserRegistry::new();
        assert_eq!(
            registry.find_parser("https://blog.food52.com/recipes/1").map(|p| p.name()),
            Some("food52")
        );
        assert!(registry.find_parser("https://notsmittenkitchen.com/soup").is_none());
        assert!(registry.find_parser("https://nytimes.com/recipes/1").is_none());
        assert!(registry.find_parser("not a url at all").is_none());
    }

    #[test]
    fn test_candidate_can_decline() {
        let registry = ParserRegistry::new();
        assert!(!registry.can_parse("https://www.washingtonpost.com/politics/2024/story/"));
    }

    #[test]
    fn test_unknown_site_without_fallback() {
        let registry = ParserRegistry::new();
        let result = registry
            .parse_recipe("<html></html>", "https://example.com/recipe")
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_from_config() {
        let config = SitesConfig {
            enabled: vec!["allrecipes".to_string()],
            generic_fallback: true,
        };
        let registry = ParserRegistry::from_config(&config);
        assert_eq!(registry.parser_names(), vec!["allrecipes", "json-ld"]);
        assert_eq!(
            registry.find_parser("https://www.allrecipes.com/recipe/1").map(|p| p.name()),
            Some("allrecipes")
        );
        // Disabled sites fall through to the generic parser
        assert_eq!(
            registry.find_parser("https://smittenkitchen.com/soup/").map(|p| p.name()),
            Some("json-ld")
        );
    }

    #[test]
    fn test_default_registers_every_site() {
        assert_eq!(ParserRegistry::default().parser_names().len(), 12);
    }
}
