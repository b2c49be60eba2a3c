use crate::extractors::text::{contains_emoji, contains_markup, strip_tags};
use crate::model::Recipe;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::LazyLock;

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://.+").expect("Invalid URL regex"));

static JAVASCRIPT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^javascript:").expect("Invalid protocol regex"));

const REQUIRED_FIELDS: [&str; 4] = ["title", "source", "ingredients", "instructions"];

/// Knobs for the validation engine
#[derive(Debug, Deserialize, Clone)]
pub struct ValidationOptions {
    /// Report `[]` ingredients or instructions as missing rather than `EMPTY_ARRAY`
    #[serde(default = "default_true")]
    pub empty_collections_are_missing: bool,
    /// Warn about a missing image, timing or servings
    #[serde(default = "default_true")]
    pub optional_field_warnings: bool,
    /// Warn about emoji or HTML anywhere in the recipe
    #[serde(default = "default_true")]
    pub content_warnings: bool,
    #[serde(default = "default_max_title_length")]
    pub max_title_length: usize,
    #[serde(default = "default_max_instruction_length")]
    pub max_instruction_length: usize,
}

fn default_true() -> bool {
    true
}

fn default_max_title_length() -> usize {
    200
}

fn default_max_instruction_length() -> usize {
    5000
}

impl Default for ValidationOptions {
    fn default() -> Self {
        ValidationOptions {
            empty_collections_are_missing: default_true(),
            optional_field_warnings: default_true(),
            content_warnings: default_true(),
            max_title_length: default_max_title_length(),
            max_instruction_length: default_max_instruction_length(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    TooLong,
    InvalidFormat,
    InvalidProtocol,
    InvalidType,
    EmptyArray,
    InvalidContent,
    ContentTooLong,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::TooLong => "TOO_LONG",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::InvalidProtocol => "INVALID_PROTOCOL",
            ErrorCode::InvalidType => "INVALID_TYPE",
            ErrorCode::EmptyArray => "EMPTY_ARRAY",
            ErrorCode::InvalidContent => "INVALID_CONTENT",
            ErrorCode::ContentTooLong => "CONTENT_TOO_LONG",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub code: ErrorCode,
    pub message: String,
    /// The offending value, or the offending items for collection checks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// Outcome of validating one recipe. Every collection is always serialized,
/// empty or not.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub missing_fields: Vec<String>,
    pub invalid_fields: Vec<String>,
    pub warnings: Vec<String>,
    pub field_errors: BTreeMap<String, FieldError>,
}

impl ValidationResult {
    fn missing(&mut self, field: &str) {
        if !self.missing_fields.iter().any(|f| f == field) {
            self.missing_fields.push(field.to_string());
        }
        self.is_valid = false;
    }

    /// Records a field error; a later error on the same field replaces the earlier one.
    fn invalid(&mut self, field: &str, code: ErrorCode, message: String, value: Option<Value>) {
        if !self.invalid_fields.iter().any(|f| f == field) {
            self.invalid_fields.push(field.to_string());
        }
        self.field_errors.insert(
            field.to_string(),
            FieldError {
                code,
                message,
                value,
            },
        );
        self.is_valid = false;
    }

    fn warn(&mut self, warning: &str) {
        self.warnings.push(warning.to_string());
    }
}

/// Validates a recipe with the default options.
///
/// A title containing HTML tags is rewritten in place with the tags removed.
pub fn validate_recipe(recipe: &mut Recipe) -> ValidationResult {
    validate_recipe_with(recipe, &ValidationOptions::default())
}

pub fn validate_recipe_with(recipe: &mut Recipe, options: &ValidationOptions) -> ValidationResult {
    let mut value = serde_json::to_value(&*recipe).unwrap_or_default();
    let result = validate_value_with(&mut value, options);

    if let Some(title) = value.get("title").and_then(Value::as_str) {
        if title != recipe.title {
            recipe.title = title.to_string();
        }
    }

    result
}

/// Validates an untyped recipe object, such as one received from another
/// boundary, with the default options.
pub fn validate_value(recipe: &mut Value) -> ValidationResult {
    validate_value_with(recipe, &ValidationOptions::default())
}

pub fn validate_value_with(recipe: &mut Value, options: &ValidationOptions) -> ValidationResult {
    let mut result = ValidationResult {
        is_valid: true,
        ..ValidationResult::default()
    };

    let mut empty = Map::new();
    let fields = recipe.as_object_mut().unwrap_or(&mut empty);

    for field in REQUIRED_FIELDS {
        if !is_present(fields.get(field), options) {
            result.missing(field);
        }
    }

    check_title(fields, options, &mut result);
    check_source(fields, &mut result);
    check_items(fields, "ingredients", "ingredient", None, options, &mut result);
    check_items(
        fields,
        "instructions",
        "instruction",
        Some(options.max_instruction_length),
        options,
        &mut result,
    );

    if options.optional_field_warnings {
        check_optional_fields(fields, &mut result);
    }

    if options.content_warnings {
        let serialized = serde_json::to_string(&*recipe).unwrap_or_default();
        if contains_emoji(&serialized) {
            result.warn("Recipe contains emoji characters");
        }
        if contains_markup(&serialized) {
            result.warn("Content contained potentially unsafe HTML");
        }
    }

    debug!(
        "Validation finished: valid={} missing={:?} invalid={:?}",
        result.is_valid, result.missing_fields, result.invalid_fields
    );

    result
}

fn is_present(value: Option<&Value>, options: &ValidationOptions) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Bool(b)) => *b,
        Some(Value::Array(items)) => !(items.is_empty() && options.empty_collections_are_missing),
        Some(_) => true,
    }
}

fn non_empty_str<'a>(fields: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    fields
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn check_title(
    fields: &mut Map<String, Value>,
    options: &ValidationOptions,
    result: &mut ValidationResult,
) {
    let Some(title) = non_empty_str(fields, "title").map(str::to_string) else {
        return;
    };

    if title.chars().count() > options.max_title_length {
        result.invalid(
            "title",
            ErrorCode::TooLong,
            format!(
                "Title must be {} characters or less",
                options.max_title_length
            ),
            Some(Value::String(title.clone())),
        );
    }

    if contains_markup(&title) {
        fields.insert("title".to_string(), Value::String(strip_tags(&title)));
        result.warn("Title contained HTML that was removed");
    }
}

fn check_source(fields: &Map<String, Value>, result: &mut ValidationResult) {
    let Some(source) = non_empty_str(fields, "source") else {
        return;
    };

    if JAVASCRIPT_REGEX.is_match(source) {
        result.invalid(
            "source",
            ErrorCode::InvalidProtocol,
            "Invalid URL protocol".to_string(),
            Some(Value::String(source.to_string())),
        );
    } else if !URL_REGEX.is_match(source) {
        result.invalid(
            "source",
            ErrorCode::InvalidFormat,
            "Source must be a valid HTTP(S) URL".to_string(),
            Some(Value::String(source.to_string())),
        );
    }
}

/// Text of a collection item: a bare string, or the `text` of an object entry.
fn item_text(item: &Value) -> Option<&str> {
    match item {
        Value::String(s) => Some(s.as_str()),
        Value::Object(map) => map.get("text").and_then(Value::as_str),
        _ => None,
    }
}

fn check_items(
    fields: &Map<String, Value>,
    field: &str,
    singular: &str,
    max_len: Option<usize>,
    options: &ValidationOptions,
    result: &mut ValidationResult,
) {
    let Some(value) = fields.get(field).filter(|v| is_present(Some(*v), options)) else {
        return;
    };

    let Some(items) = value.as_array() else {
        result.invalid(
            field,
            ErrorCode::InvalidType,
            format!("{} must be an array", capitalize(field)),
            Some(value.clone()),
        );
        return;
    };

    if items.is_empty() {
        result.invalid(
            field,
            ErrorCode::EmptyArray,
            format!("At least one {singular} is required"),
            None,
        );
        return;
    }

    let blank: Vec<Value> = items
        .iter()
        .filter(|item| item_text(item).map_or(true, |text| text.trim().is_empty()))
        .cloned()
        .collect();
    if !blank.is_empty() {
        result.invalid(
            field,
            ErrorCode::InvalidContent,
            format!("Each {singular} must have content"),
            Some(Value::Array(blank)),
        );
    }

    if let Some(max_len) = max_len {
        let long: Vec<Value> = items
            .iter()
            .filter(|item| item_text(item).is_some_and(|text| text.chars().count() > max_len))
            .cloned()
            .collect();
        if !long.is_empty() {
            result.invalid(
                field,
                ErrorCode::ContentTooLong,
                format!("{} must be {max_len} characters or less", capitalize(field)),
                Some(Value::Array(long)),
            );
        }
    }
}

fn check_optional_fields(fields: &Map<String, Value>, result: &mut ValidationResult) {
    if non_empty_str(fields, "imageUrl").is_none() {
        result.warn("Recipe has no image");
    }

    let has_timing = ["prepTime", "cookTime", "totalTime"]
        .iter()
        .any(|field| non_empty_str(fields, field).is_some());
    if !has_timing {
        result.warn("Recipe has no timing information");
    }

    let has_servings = non_empty_str(fields, "servings").is_some()
        || non_empty_str(fields, "yield").is_some();
    if !has_servings {
        result.warn("Recipe has no servings information");
    }
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
