use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

use crate::recipe::DEFAULT_SERVINGS;

/// Top-level browser configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct BrowserConfig {
    /// Remote catalog settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Where likes are persisted
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub recipe: RecipeConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Configuration for the recipe catalog API
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the catalog, without a trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding persisted likes
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecipeConfig {
    /// Serving count assigned to freshly fetched recipes
    #[serde(default = "default_servings")]
    pub default_servings: u32,
}

impl Default for RecipeConfig {
    fn default() -> Self {
        Self {
            default_servings: default_servings(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    /// Maximum title length shown in search results
    #[serde(default = "default_title_limit")]
    pub title_limit: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title_limit: default_title_limit(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://forkify-api.herokuapp.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".recipe-browser")
}

fn default_servings() -> u32 {
    DEFAULT_SERVINGS
}

fn default_title_limit() -> usize {
    18
}

impl BrowserConfig {
    /// Load configuration from file and environment variables
    ///
    /// See [`load_config`] for the source priority.
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// Configuration is loaded with the following priority (highest to lowest):
/// 1. Environment variables with RECIPE_BROWSER__ prefix
/// 2. config.toml file in current directory
/// 3. Default values
///
/// Environment variable format: RECIPE_BROWSER__API__BASE_URL
pub fn load_config() -> Result<BrowserConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        .add_source(
            Environment::with_prefix("RECIPE_BROWSER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_default_values() {
        let config = BrowserConfig::default();
        assert_eq!(config.api.base_url, "https://forkify-api.herokuapp.com");
        assert_eq!(config.api.timeout, 30);
        assert_eq!(config.storage.dir, PathBuf::from(".recipe-browser"));
        assert_eq!(config.recipe.default_servings, 4);
        assert_eq!(config.display.title_limit, 18);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let toml = r#"
            [api]
            base_url = "http://localhost:9000"

            [recipe]
            default_servings = 2
        "#;

        let config: BrowserConfig = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.api.base_url, "http://localhost:9000");
        assert_eq!(config.api.timeout, 30);
        assert_eq!(config.recipe.default_servings, 2);
        assert_eq!(config.display.title_limit, 18);
    }

    #[test]
    fn test_empty_sources_deserialize_to_defaults() {
        let config: BrowserConfig = Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.recipe.default_servings, DEFAULT_SERVINGS);
    }
}
