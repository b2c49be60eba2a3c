use regex::Regex;
use std::sync::LazyLock;

static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));

static EMOJI_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{1F300}-\x{1F9FF}]").expect("Invalid emoji regex"));

fn is_zero_width(c: char) -> bool {
    matches!(c, '\u{200B}'..='\u{200D}' | '\u{FEFF}')
}

/// Normalizes scraped text: drops zero-width characters, collapses runs of
/// whitespace to a single space and trims both ends.
///
/// Zero-width characters are removed without leaving a space behind, so
/// `"a\u{200B}b"` becomes `"ab"`.
pub fn sanitize_text(text: &str) -> String {
    let visible: String = text.chars().filter(|c| !is_zero_width(*c)).collect();
    visible.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Removes anything that looks like an HTML tag.
pub fn strip_tags(text: &str) -> String {
    TAG_REGEX.replace_all(text, "").into_owned()
}

pub fn contains_markup(text: &str) -> bool {
    TAG_REGEX.is_match(text)
}

pub fn contains_emoji(text: &str) -> bool {
    EMOJI_REGEX.is_match(text)
}
