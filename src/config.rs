use crate::validation::ValidationOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

/// Engine configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct EngineConfig {
    /// Which parsers the registry is built with
    #[serde(default)]
    pub sites: SitesConfig,
    /// Validation behaviour
    #[serde(default)]
    pub validation: ValidationOptions,
}

/// Configuration for the parser registry
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SitesConfig {
    /// Site parser names to register; empty registers all of them
    #[serde(default)]
    pub enabled: Vec<String>,
    /// Register the schema.org-only parser for sites without a dedicated one
    #[serde(default)]
    pub generic_fallback: bool,
}

impl SitesConfig {
    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled.is_empty() || self.enabled.iter().any(|enabled| enabled == name)
    }
}

impl EngineConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_EXTRACT__ prefix
    /// 2. recipe_extract.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_EXTRACT__SITES__GENERIC_FALLBACK=true
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Configuration from TOML text, still overridable from the environment.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        with_environment(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }
}

fn with_environment(builder: ConfigBuilder<DefaultState>) -> Result<EngineConfig, ConfigError> {
    let settings = builder
        // Use double underscore for nested: RECIPE_EXTRACT__VALIDATION__MAX_TITLE_LENGTH
        .add_source(
            Environment::with_prefix("RECIPE_EXTRACT")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("sites.enabled"),
        )
        .build()?;

    settings.try_deserialize()
}

/// Load configuration from `recipe_extract.toml` (optional) and the environment
pub fn load_config() -> Result<EngineConfig, ConfigError> {
    with_environment(
        Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("recipe_extract").required(false)),
    )
}
