pub mod json_ld;
pub mod selectors;
pub mod text;

pub use self::json_ld::{extract_json_ld, JsonLdRecipe};
pub use self::selectors::extract_elements;
pub use self::text::sanitize_text;
