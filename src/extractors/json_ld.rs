use super::text::sanitize_text;
use crate::model::{Ingredient, Instruction, Reviews};
use html_escape::decode_html_entities;
use log::{debug, warn};
use scraper::{Html, Selector};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

static SCRIPT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("script[type='application/ld+json']").expect("Invalid JSON-LD selector")
});

/// Typed view of a schema.org Recipe node.
///
/// Publishers disagree wildly on field shapes, so each field is read on its
/// own: a field with an unexpected shape is dropped instead of failing the
/// whole node.
#[derive(Debug, Default, Deserialize)]
pub struct JsonLdRecipe {
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    headline: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    description: Option<TextValue>,
    #[serde(default, deserialize_with = "lenient")]
    author: Option<Author>,
    #[serde(rename = "recipeIngredient", default, deserialize_with = "lenient")]
    recipe_ingredient: Option<Vec<IngredientEntry>>,
    #[serde(rename = "recipeInstructions", default, deserialize_with = "lenient")]
    recipe_instructions: Option<InstructionEntry>,
    #[serde(default, deserialize_with = "lenient")]
    image: Option<Vec<ImageRef>>,
    #[serde(rename = "prepTime", default, deserialize_with = "lenient")]
    prep_time: Option<String>,
    #[serde(rename = "cookTime", default, deserialize_with = "lenient")]
    cook_time: Option<String>,
    #[serde(rename = "totalTime", default, deserialize_with = "lenient")]
    total_time: Option<String>,
    #[serde(rename = "recipeYield", default, deserialize_with = "lenient")]
    recipe_yield: Option<Vec<Scalar>>,
    #[serde(rename = "recipeCategory", default, deserialize_with = "lenient")]
    recipe_category: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    keywords: Option<Vec<String>>,
    #[serde(rename = "aggregateRating", default, deserialize_with = "lenient")]
    aggregate_rating: Option<AggregateRating>,
    #[serde(default)]
    nutrition: Option<Value>,
}

/// Shape-checked read of a raw JSON-LD value. `None` means the value has a
/// shape the field does not take.
trait FromJson: Sized {
    fn from_json(value: Value) -> Option<Self>;
}

/// Reads a derived struct from a JSON object only, since derived impls also
/// accept arrays positionally.
fn object<T: DeserializeOwned>(value: Value) -> Option<T> {
    match value {
        Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    }
}

impl FromJson for String {
    fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(text),
            _ => None,
        }
    }
}

/// A single value reads as a one-item list. Unreadable list items are
/// skipped on their own.
impl<T: FromJson> FromJson for Vec<T> {
    fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(items.into_iter().filter_map(T::from_json).collect()),
            other => T::from_json(other).map(|item| vec![item]),
        }
    }
}

#[derive(Debug)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl FromJson for Scalar {
    fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(Scalar::Text(text)),
            Value::Number(n) => Some(Scalar::Number(n)),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Number(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TextObject {
    text: String,
}

#[derive(Debug)]
enum TextValue {
    String(String),
    Object(TextObject),
}

impl FromJson for TextValue {
    fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(TextValue::String(text)),
            other => object(other).map(TextValue::Object),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AuthorObject {
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
}

#[derive(Debug)]
enum Author {
    Name(String),
    Multiple(Vec<Author>),
    Object(AuthorObject),
}

impl FromJson for Author {
    fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::String(name) => Some(Author::Name(name)),
            Value::Array(items) => Some(Author::Multiple(
                items.into_iter().filter_map(Author::from_json).collect(),
            )),
            other => object(other).map(Author::Object),
        }
    }
}

#[derive(Debug, Deserialize)]
struct IngredientObject {
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    amount: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    text: Option<String>,
}

#[derive(Debug)]
enum IngredientEntry {
    String(String),
    Object(IngredientObject),
}

impl FromJson for IngredientEntry {
    fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(IngredientEntry::String(text)),
            other => object(other).map(IngredientEntry::Object),
        }
    }
}

#[derive(Debug, Deserialize)]
struct HowToStep {
    #[serde(default, deserialize_with = "lenient")]
    text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    description: Option<String>,
}

#[derive(Debug)]
enum InstructionEntry {
    String(String),
    Multiple(Vec<InstructionEntry>),
    /// `itemListElement` of a `HowToSection`
    Section(Vec<InstructionEntry>),
    Step(HowToStep),
}

impl FromJson for InstructionEntry {
    fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(InstructionEntry::String(text)),
            Value::Array(items) => Some(InstructionEntry::Multiple(
                items.into_iter().filter_map(InstructionEntry::from_json).collect(),
            )),
            Value::Object(mut map) => match map.remove("itemListElement") {
                // one step may stand alone instead of in an array
                Some(items) => Some(InstructionEntry::Section(
                    Vec::from_json(items).unwrap_or_default(),
                )),
                None => object(Value::Object(map)).map(InstructionEntry::Step),
            },
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ImageObject {
    #[serde(default, deserialize_with = "lenient")]
    url: Option<String>,
    #[serde(rename = "contentUrl", default, deserialize_with = "lenient")]
    content_url: Option<String>,
}

#[derive(Debug)]
enum ImageRef {
    Url(String),
    Object(ImageObject),
}

impl FromJson for ImageRef {
    fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::String(url) => Some(ImageRef::Url(url)),
            other => object(other).map(ImageRef::Object),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AggregateRating {
    #[serde(rename = "ratingValue", default, deserialize_with = "lenient")]
    rating_value: Option<Scalar>,
    #[serde(rename = "reviewCount", default, deserialize_with = "lenient")]
    review_count: Option<Scalar>,
}

impl FromJson for AggregateRating {
    fn from_json(value: Value) -> Option<Self> {
        object(value)
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromJson,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::from_json(value))
}

impl TryFrom<&Value> for JsonLdRecipe {
    type Error = serde_json::Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value.clone())
    }
}

fn decode_html_symbols(text: &str) -> String {
    // some publishers double-encode entities
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

/// Entity-decoded, sanitized text.
fn clean(text: &str) -> String {
    sanitize_text(&decode_html_symbols(text))
}

fn split_terms(terms: &[String]) -> BTreeSet<String> {
    terms
        .iter()
        .flat_map(|term| term.split([',', ';']))
        .map(clean)
        .filter(|term| !term.is_empty())
        .collect()
}

impl Author {
    fn name(&self) -> Option<String> {
        let name = match self {
            Author::Name(name) => Some(clean(name)),
            Author::Object(obj) => obj.name.as_deref().map(clean),
            Author::Multiple(authors) => {
                let names: Vec<String> = authors.iter().filter_map(Author::name).collect();
                Some(names.join(", "))
            }
        };
        name.filter(|name| !name.is_empty() && name != "null")
    }
}

impl IngredientEntry {
    fn text(&self) -> String {
        match self {
            IngredientEntry::String(text) => clean(text),
            IngredientEntry::Object(obj) => {
                if let Some(text) = &obj.text {
                    return clean(text);
                }
                let name = obj.name.as_deref().map(clean).unwrap_or_default();
                match obj.amount.as_deref().map(clean) {
                    Some(amount) if !amount.is_empty() && !name.is_empty() => {
                        format!("{amount} {name}")
                    }
                    _ => name,
                }
            }
        }
    }
}

impl InstructionEntry {
    fn collect_steps(&self, steps: &mut Vec<String>) {
        match self {
            InstructionEntry::String(text) => {
                // a single blob with line breaks is one step per line
                steps.extend(text.lines().map(clean));
            }
            InstructionEntry::Multiple(entries) => {
                for entry in entries {
                    entry.collect_steps(steps);
                }
            }
            InstructionEntry::Section(entries) => {
                for entry in entries {
                    entry.collect_steps(steps);
                }
            }
            InstructionEntry::Step(step) => {
                let text = step
                    .text
                    .as_deref()
                    .or(step.name.as_deref())
                    .or(step.description.as_deref())
                    .unwrap_or_default();
                steps.push(clean(text));
            }
        }
    }
}

impl ImageRef {
    fn url(&self) -> Option<String> {
        let url = match self {
            ImageRef::Url(url) => Some(url.as_str()),
            ImageRef::Object(obj) => obj.url.as_deref().or(obj.content_url.as_deref()),
        };
        url.map(|u| decode_html_symbols(u).trim().to_string())
            .filter(|u| !u.is_empty())
    }
}

impl JsonLdRecipe {
    /// Finds and reads the first Recipe node in the document's JSON-LD.
    pub fn extract(document: &Html) -> Option<JsonLdRecipe> {
        let node = find_recipe_node(document)?;
        match JsonLdRecipe::try_from(&node) {
            Ok(recipe) => Some(recipe),
            Err(err) => {
                warn!("JSON-LD Recipe node could not be read: {}", err);
                None
            }
        }
    }

    pub fn has_name(&self) -> bool {
        self.name.as_deref().map(clean).is_some_and(|n| !n.is_empty())
    }

    pub fn title(&self) -> String {
        self.name.as_deref().map(clean).unwrap_or_default()
    }

    pub fn headline(&self) -> String {
        self.headline.as_deref().map(clean).unwrap_or_default()
    }

    /// Author name from a string, a `{name}` object or a list of either.
    pub fn author_name(&self) -> Option<String> {
        self.author.as_ref().and_then(Author::name)
    }

    pub fn description(&self) -> String {
        match &self.description {
            Some(TextValue::String(text)) => clean(text),
            Some(TextValue::Object(obj)) => clean(&obj.text),
            None => String::new(),
        }
    }

    /// Non-blank ingredient lines.
    pub fn ingredients(&self) -> Vec<Ingredient> {
        self.recipe_ingredient
            .iter()
            .flatten()
            .map(IngredientEntry::text)
            .filter(|text| !text.is_empty())
            .map(Ingredient::new)
            .collect()
    }

    /// Non-blank steps, flattened out of any `HowToSection`s and numbered from 1.
    pub fn instructions(&self) -> Vec<Instruction> {
        let mut steps = Vec::new();
        if let Some(entry) = &self.recipe_instructions {
            entry.collect_steps(&mut steps);
        }
        steps.retain(|step| !step.is_empty());
        Instruction::numbered(steps)
    }

    /// First resolvable image URL.
    pub fn image_url(&self) -> Option<String> {
        self.image.as_ref()?.iter().find_map(ImageRef::url)
    }

    pub fn prep_time(&self) -> String {
        self.prep_time.as_deref().map(str::trim).unwrap_or_default().to_string()
    }

    pub fn cook_time(&self) -> String {
        self.cook_time.as_deref().map(str::trim).unwrap_or_default().to_string()
    }

    pub fn total_time(&self) -> String {
        self.total_time.as_deref().map(str::trim).unwrap_or_default().to_string()
    }

    /// `recipeYield` as display text; lists are joined with ", ".
    pub fn yield_text(&self) -> String {
        self.recipe_yield
            .as_ref()
            .map(|y| {
                y.iter()
                    .map(|part| clean(&part.to_string()))
                    .filter(|part| !part.is_empty())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default()
    }

    /// `recipeCategory` terms, splitting delimited strings.
    pub fn categories(&self) -> BTreeSet<String> {
        self.recipe_category.as_deref().map(split_terms).unwrap_or_default()
    }

    /// `keywords` terms, splitting delimited strings.
    pub fn keywords(&self) -> BTreeSet<String> {
        self.keywords.as_deref().map(split_terms).unwrap_or_default()
    }

    /// `aggregateRating.ratingValue`, else `aggregateRating.reviewCount`.
    pub fn reviews(&self) -> Option<Reviews> {
        let rating = self.aggregate_rating.as_ref()?;
        let to_reviews = |scalar: &Scalar| match scalar {
            Scalar::Number(n) => Some(Reviews::Number(n.clone())),
            Scalar::Text(s) if !s.trim().is_empty() => Some(Reviews::Text(s.trim().to_string())),
            Scalar::Text(_) => None,
        };
        rating
            .rating_value
            .as_ref()
            .and_then(to_reviews)
            .or_else(|| rating.review_count.as_ref().and_then(to_reviews))
    }

    pub fn nutrition_value(&self) -> Option<&Value> {
        self.nutrition.as_ref().filter(|value| !value.is_null())
    }

    /// The raw nutrition node serialized as an opaque string.
    pub fn nutrition(&self) -> String {
        match &self.nutrition {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => clean(text),
            Some(Value::Object(map)) if map.is_empty() => String::new(),
            Some(value) => serde_json::to_string(value).unwrap_or_default(),
        }
    }
}

/// Cleans up a JSON-LD script body before parsing.
fn sanitize_json(json_str: &str) -> String {
    let mut cleaned = json_str.trim();

    // Some CMSes wrap the payload in an HTML comment
    cleaned = cleaned.strip_prefix("<!--").unwrap_or(cleaned);
    cleaned = cleaned.strip_suffix("-->").unwrap_or(cleaned);

    // Raw control characters are invalid inside JSON strings
    cleaned
        .trim()
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// `@type` is "Recipe", or a list that includes "Recipe".
pub fn is_recipe_type(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(t)) => t.eq_ignore_ascii_case("recipe"),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| t.eq_ignore_ascii_case("recipe")),
        _ => false,
    }
}

fn find_recipe_in(json: &Value) -> Option<&Value> {
    if is_recipe_type(json) {
        return Some(json);
    }

    if let Some(items) = json.as_array() {
        if let Some(recipe) = items.iter().find(|item| is_recipe_type(item)) {
            return Some(recipe);
        }
    }

    json.get("@graph")
        .and_then(Value::as_array)
        .and_then(|graph| graph.iter().find(|item| is_recipe_type(item)))
}

/// First Recipe node across all JSON-LD scripts, in document order.
///
/// Scripts that fail to parse are logged and skipped.
pub fn find_recipe_node(document: &Html) -> Option<Value> {
    for (idx, script) in document.select(&SCRIPT_SELECTOR).enumerate() {
        let cleaned_json = sanitize_json(&script.text().collect::<String>());

        match serde_json::from_str::<Value>(&cleaned_json) {
            Ok(json_ld) => {
                if let Some(recipe) = find_recipe_in(&json_ld) {
                    debug!("Found Recipe node in JSON-LD script #{}", idx);
                    return Some(recipe.clone());
                }
            }
            Err(err) => warn!("Error parsing JSON-LD script #{}: {}", idx, err),
        }
    }

    None
}

/// Parses `html` and returns its first JSON-LD Recipe node, if any.
pub fn extract_json_ld(html: &str) -> Option<Value> {
    find_recipe_node(&Html::parse_document(html))
}
