use thiserror::Error;

/// Errors that can occur while extracting a recipe
#[derive(Error, Debug)]
pub enum ExtractError {
    /// A site parser's strict contract was not satisfied by either extraction path
    #[error("[{site}] Missing required recipe fields: {}", .fields.join(", "))]
    MissingRequiredFields {
        site: &'static str,
        fields: Vec<&'static str>,
    },

    /// No JSON-LD Recipe node was present where one is mandatory
    #[error("No valid JSON-LD recipe found")]
    NoStructuredData,

    /// The selector fallback could not find a recipe title
    #[error("[{site}] No recipe title found")]
    MissingTitle { site: &'static str },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Failed to read input
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to serialize output
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
