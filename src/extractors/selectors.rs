use super::text::sanitize_text;
use log::{debug, warn};
use scraper::{ElementRef, Html, Selector};

/// Parses a CSS selector, logging and discarding invalid ones.
pub fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            warn!("Error with selector \"{}\": {:?}", selector, err);
            None
        }
    }
}

/// Concatenated, sanitized text content of an element.
pub fn element_text(element: ElementRef) -> String {
    sanitize_text(&element.text().collect::<String>())
}

/// Runs a selector chain over the document.
///
/// Selectors are tried in order; the first one that matches at least one
/// element with non-empty text wins, and the sanitized texts of all its
/// non-empty matches are returned.
pub fn extract_elements(document: &Html, selectors: &[&str]) -> Vec<String> {
    extract_elements_where(document, selectors, |_| true)
}

/// Like [`extract_elements`], but only texts accepted by `keep` count as
/// matches, so a selector whose matches are all rejected falls through to
/// the next one.
pub fn extract_elements_where<F>(document: &Html, selectors: &[&str], keep: F) -> Vec<String>
where
    F: Fn(&str) -> bool,
{
    for selector_str in selectors {
        let Some(selector) = parse_selector(selector_str) else {
            continue;
        };

        let texts: Vec<String> = document
            .select(&selector)
            .map(element_text)
            .filter(|text| !text.is_empty() && keep(text.as_str()))
            .collect();

        if !texts.is_empty() {
            debug!("Selector \"{}\" matched {} elements", selector_str, texts.len());
            return texts;
        }
    }

    Vec::new()
}

/// Text of the first match of a selector chain, or an empty string.
pub fn first_text(document: &Html, selectors: &[&str]) -> String {
    extract_elements(document, selectors)
        .into_iter()
        .next()
        .unwrap_or_default()
}

/// First non-empty value of `attr` on any element matched by the chain.
pub fn first_attr(document: &Html, selectors: &[&str], attr: &str) -> Option<String> {
    selectors
        .iter()
        .filter_map(|s| parse_selector(s))
        .find_map(|selector| {
            document
                .select(&selector)
                .filter_map(|el| el.value().attr(attr))
                .map(str::trim)
                .find(|value| !value.is_empty())
                .map(str::to_string)
        })
}

/// Content of `<meta property=key>` or `<meta name=key>`.
pub fn meta_content(document: &Html, key: &str) -> Option<String> {
    let by_property = format!("meta[property=\"{key}\"]");
    let by_name = format!("meta[name=\"{key}\"]");
    first_attr(document, &[&by_property, &by_name], "content")
}

/// `href` of `<link rel=rel>`.
pub fn link_href(document: &Html, rel: &str) -> Option<String> {
    first_attr(document, &[&format!("link[rel=\"{rel}\"]")], "href")
}

/// Sanitized `<title>` text, if the document has a non-empty one.
pub fn page_title(document: &Html) -> Option<String> {
    Some(first_text(document, &["title"])).filter(|t| !t.is_empty())
}

/// Sanitized text of the whole `<body>`.
pub fn body_text(document: &Html) -> String {
    first_text(document, &["body"])
}

fn heading_matches(heading: &ElementRef, keyword: &str) -> bool {
    element_text(*heading)
        .to_lowercase()
        .contains(&keyword.to_lowercase())
}

fn list_items(list: ElementRef) -> impl Iterator<Item = String> + '_ {
    let li = parse_selector("li");
    li.into_iter()
        .flat_map(move |selector| list.select(&selector).map(element_text).collect::<Vec<_>>())
        .filter(|text| !text.is_empty())
}

/// Items of every `list_tag` sibling that follows a heading mentioning
/// `keyword`, up to the next heading of the same tag.
///
/// CSS has no text predicate, so headings are filtered by their content
/// after selection.
pub fn lists_after_heading(
    document: &Html,
    heading: &str,
    keyword: &str,
    list_tag: &str,
) -> Vec<String> {
    let Some(heading_selector) = parse_selector(heading) else {
        return Vec::new();
    };

    document
        .select(&heading_selector)
        .filter(|h| heading_matches(h, keyword))
        .flat_map(|h| {
            let heading_tag = h.value().name();
            h.next_siblings()
                .filter_map(ElementRef::wrap)
                .take_while(|sibling| sibling.value().name() != heading_tag)
                .filter(|sibling| sibling.value().name() == list_tag)
                .collect::<Vec<_>>()
        })
        .flat_map(list_items)
        .collect()
}
