use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub text: String,
}

impl Ingredient {
    pub fn new(text: impl Into<String>) -> Self {
        Ingredient { text: text.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instruction {
    /// 1-based position in the recipe
    pub step_number: usize,
    pub text: String,
}

impl Instruction {
    /// Numbers the given step texts sequentially starting at 1.
    pub fn numbered<I, S>(texts: I) -> Vec<Instruction>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts
            .into_iter()
            .enumerate()
            .map(|(idx, text)| Instruction {
                step_number: idx + 1,
                text: text.into(),
            })
            .collect()
    }
}

/// Rating or review count, kept in whichever form the publisher used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reviews {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Reviews {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reviews::Number(n) => write!(f, "{n}"),
            Reviews::Text(s) => f.write_str(s),
        }
    }
}

/// A recipe as extracted from a single page.
///
/// Optional text fields are empty strings rather than absent so every recipe
/// serializes to the same shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Recipe {
    pub title: String,
    pub source: String,
    pub author: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<Instruction>,
    pub image_url: String,
    pub prep_time: String,
    pub cook_time: String,
    pub total_time: String,
    #[serde(alias = "yield")]
    pub servings: String,
    pub categories: BTreeSet<String>,
    pub description: String,
    pub reviews: Option<Reviews>,
    pub nutrition: String,
    pub notes: Vec<String>,
}

/// Fields checked by a site parser's strict contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractField {
    Title,
    Description,
    Image,
    Author,
    Ingredients,
    Instructions,
    Yield,
    Categories,
    Nutrition,
}

impl ContractField {
    pub fn name(self) -> &'static str {
        match self {
            ContractField::Title => "title",
            ContractField::Description => "description",
            ContractField::Image => "image",
            ContractField::Author => "author",
            ContractField::Ingredients => "ingredients",
            ContractField::Instructions => "instructions",
            ContractField::Yield => "yield",
            ContractField::Categories => "categories",
            ContractField::Nutrition => "nutrition",
        }
    }
}

/// The full contract enforced by most site parsers.
pub const SITE_CONTRACT: &[ContractField] = &[
    ContractField::Title,
    ContractField::Description,
    ContractField::Image,
    ContractField::Author,
    ContractField::Ingredients,
    ContractField::Instructions,
    ContractField::Yield,
    ContractField::Categories,
    ContractField::Nutrition,
];

impl Recipe {
    /// The empty recipe returned for publisher error pages.
    pub fn sentinel() -> Self {
        Recipe::default()
    }

    /// Placeholder recipe handed to storage when extraction could not run.
    ///
    /// `outcome` is recorded as the only category so the capture can be
    /// told apart from a real one downstream.
    pub fn fallback(page_title: Option<&str>, url: &str, outcome: &str) -> Self {
        let title = page_title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(url)
            .to_string();

        Recipe {
            title,
            source: url.to_string(),
            categories: BTreeSet::from([outcome.to_string()]),
            ..Recipe::default()
        }
    }

    /// True only for [`Recipe::sentinel`] itself. A scrape that found nothing
    /// still carries its source URL and is not a sentinel.
    pub fn is_sentinel(&self) -> bool {
        *self == Recipe::sentinel()
    }

    /// Title, source, ingredients and instructions are all present.
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty()
            && !self.source.is_empty()
            && !self.ingredients.is_empty()
            && !self.instructions.is_empty()
    }

    fn field_is_empty(&self, field: ContractField) -> bool {
        match field {
            ContractField::Title => self.title.is_empty(),
            ContractField::Description => self.description.is_empty(),
            ContractField::Image => self.image_url.is_empty(),
            ContractField::Author => self.author.is_empty(),
            ContractField::Ingredients => self.ingredients.is_empty(),
            ContractField::Instructions => self.instructions.is_empty(),
            ContractField::Yield => self.servings.is_empty(),
            ContractField::Categories => self.categories.is_empty(),
            ContractField::Nutrition => self.nutrition.is_empty(),
        }
    }

    /// Names of the contract fields this recipe leaves empty.
    pub fn missing_contract_fields(&self, contract: &[ContractField]) -> Vec<&'static str> {
        contract
            .iter()
            .filter(|field| self.field_is_empty(**field))
            .map(|field| field.name())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_is_empty() {
        let recipe = Recipe::sentinel();
        assert!(recipe.is_sentinel());
        assert!(!recipe.is_complete());
        assert_eq!(recipe.missing_contract_fields(SITE_CONTRACT).len(), 9);

        let empty_scrape = Recipe {
            source: "https://www.epicurious.com/about".to_string(),
            ..Recipe::default()
        };
        assert!(!empty_scrape.is_sentinel());
    }

    #[test]
    fn test_fallback_prefers_page_title() {
        let recipe = Recipe::fallback(Some("  Soup  "), "https://example.com/soup", "parser-error");
        assert_eq!(recipe.title, "Soup");
        assert_eq!(recipe.source, "https://example.com/soup");
        assert!(recipe.categories.contains("parser-error"));
        assert!(recipe.ingredients.is_empty());

        let recipe = Recipe::fallback(Some(""), "https://example.com/soup", "parser-error");
        assert_eq!(recipe.title, "https://example.com/soup");
    }

    #[test]
    fn test_numbered_instructions() {
        let steps = Instruction::numbered(["Mix", "Bake"]);
        assert_eq!(steps[0].step_number, 1);
        assert_eq!(steps[1].step_number, 2);
        assert_eq!(steps[1].text, "Bake");
    }

    #[test]
    fn test_serializes_camel_case() {
        let recipe = Recipe {
            image_url: "https://example.com/a.jpg".to_string(),
            instructions: Instruction::numbered(["Stir"]),
            ..Recipe::default()
        };
        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json["imageUrl"], "https://example.com/a.jpg");
        assert_eq!(json["instructions"][0]["stepNumber"], 1);
        assert!(json["reviews"].is_null());
    }
}
