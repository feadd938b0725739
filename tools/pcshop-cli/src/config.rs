//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pcshop_commerce::search::CategoryFilter;
use serde::{Deserialize, Serialize};

/// File names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["pcshop.toml", ".pcshop.toml", "pcshop.json"];

/// Overrides `api.base_url`.
pub const API_URL_ENV: &str = "PCSHOP_API_URL";

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

impl CliConfig {
    /// Load config from a file; `.json` files are JSON, anything else TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Replace the API URL with an environment-provided one.
    pub fn apply_env_override(&mut self, api_url: Option<String>) {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url;
        }
    }

    /// Problems that make the config unusable, then ones worth a warning.
    pub fn check(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            errors.push(format!(
                "api.base_url must be an http(s) URL, got '{}'",
                self.api.base_url
            ));
        }

        match CategoryFilter::from_str(&self.catalog.default_category) {
            None => errors.push(format!(
                "catalog.default_category '{}' is not a known category",
                self.catalog.default_category
            )),
            Some(CategoryFilter::Build) => {
                warnings.push("catalog.default_category 'build' lists no products".to_string())
            }
            Some(_) => {}
        }

        if let Some(file) = &self.catalog.file {
            if !is_json(Path::new(file)) {
                warnings.push(format!("catalog.file '{}' is expected to be JSON", file));
            }
        }

        if self.display.max_rows == 0 {
            warnings.push("display.max_rows is 0; listings will be empty".to_string());
        }

        (errors, warnings)
    }

    pub fn default_category(&self) -> CategoryFilter {
        CategoryFilter::from_str(&self.catalog.default_category).unwrap_or_default()
    }
}

/// Product API connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token for admin endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Local product dump used instead of the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    #[serde(default = "default_category")]
    pub default_category: String,
}

fn default_category() -> String {
    "laptop".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            file: None,
            default_category: default_category(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
}

fn default_max_rows() -> usize {
    50
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_rows: default_max_rows(),
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Walk up from `start` looking for a config file.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

/// Generate a default pcshop.toml.
pub fn generate_default_config() -> String {
    r#"# PCShop CLI configuration

[api]
base_url = "http://localhost:5000/api"
# token = "..."

[catalog]
# file = "products.json"
default_category = "laptop"

[display]
max_rows = 50
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses_to_defaults() {
        let parsed: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(parsed, CliConfig::default());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let parsed: CliConfig = toml::from_str("[catalog]\nfile = \"dump.json\"\n").unwrap();
        assert_eq!(parsed.catalog.file.as_deref(), Some("dump.json"));
        assert_eq!(parsed.catalog.default_category, "laptop");
        assert_eq!(parsed.display.max_rows, 50);
    }

    #[test]
    fn test_load_json_and_toml() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("pcshop.json");
        std::fs::write(&json, r#"{"display":{"max_rows":5}}"#).unwrap();
        assert_eq!(CliConfig::load(&json).unwrap().display.max_rows, 5);

        let toml_path = dir.path().join("pcshop.toml");
        std::fs::write(&toml_path, "[api]\nbase_url = \"https://shop.test/api\"\n").unwrap();
        assert_eq!(
            CliConfig::load(&toml_path).unwrap().api.base_url,
            "https://shop.test/api"
        );
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".pcshop.toml"), "").unwrap();

        assert_eq!(find_config(&nested), Some(dir.path().join(".pcshop.toml")));
    }

    #[test]
    fn test_env_override() {
        let mut config = CliConfig::default();
        config.apply_env_override(Some("   ".into()));
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        config.apply_env_override(Some("https://api.pcshop.vn".into()));
        assert_eq!(config.api.base_url, "https://api.pcshop.vn");
    }

    #[test]
    fn test_check() {
        let (errors, warnings) = CliConfig::default().check();
        assert!(errors.is_empty());
        assert!(warnings.is_empty());

        let mut config = CliConfig::default();
        config.api.base_url = "localhost".into();
        config.catalog.default_category = "phones".into();
        let (errors, _) = config.check();
        assert_eq!(errors.len(), 2);
    }
}
