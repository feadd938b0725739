//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context as _, Result};
use pcshop_commerce::catalog::{Category, PartKind, Product};
use pcshop_commerce::search::CategoryFilter;
use pcshop_data::{ProductApi, ReqwestTransport};
use tracing::debug;

use crate::commands::SourceArgs;
use crate::config::{find_config, CliConfig, API_URL_ENV};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    pub config: CliConfig,
    /// Where the config came from; `None` when running on defaults.
    pub config_path: Option<PathBuf>,
    pub output: Output,
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from an explicit config file or the nearest one found
    /// walking up from the working directory.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(PathBuf::from(path)),
            None => find_config(&cwd),
        };
        let mut config = match &config_path {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };
        config.apply_env_override(std::env::var(API_URL_ENV).ok());
        debug!(path = ?config_path, api = %config.api.base_url, "configuration loaded");

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let path = PathBuf::from(path);
        if path.is_absolute() {
            path
        } else {
            self.cwd.join(path)
        }
    }

    pub fn api(&self) -> Result<ProductApi<ReqwestTransport>> {
        let api = ProductApi::new(ReqwestTransport::new(), &self.config.api.base_url)
            .with_context(|| format!("Invalid API URL: {}", self.config.api.base_url))?;
        Ok(match &self.config.api.token {
            Some(token) => api.with_token(token.clone()),
            None => api,
        })
    }

    /// Product source: an explicit `--file`, else the configured dump unless
    /// `--api` is given.
    pub fn product_file(&self, source: &SourceArgs) -> Option<PathBuf> {
        match (&source.file, source.api) {
            (Some(file), _) => Some(self.resolve_path(file)),
            (None, false) => self.config.catalog.file.as_deref().map(|f| self.resolve_path(f)),
            (None, true) => None,
        }
    }

    /// Load the products a listing needs.
    ///
    /// A local dump is returned whole; the caller's filter narrows it. The API
    /// is queried per category, so `All` fans out and `Build` asks for nothing.
    pub async fn fetch_products(
        &self,
        source: &SourceArgs,
        category: CategoryFilter,
        part_kind: Option<PartKind>,
    ) -> Result<Vec<Product>> {
        if let Some(path) = self.product_file(source) {
            self.output
                .debug(&format!("Reading products from {}", path.display()));
            return read_products(&path);
        }

        let categories: Vec<Category> = match category {
            CategoryFilter::All => Category::ALL.to_vec(),
            CategoryFilter::Build => Vec::new(),
            CategoryFilter::Only(category) => vec![category],
        };

        let api = self.api()?;
        let spinner = self.output.spinner("Loading products...");
        let mut products = Vec::new();
        for category in categories {
            let part = if category == Category::Parts { part_kind } else { None };
            match api.list_products(category, part).await {
                Ok(mut batch) => products.append(&mut batch),
                Err(e) => {
                    spinner.finish_and_clear();
                    debug!(error = %e, %category, "listing failed");
                    return Err(anyhow!(e.user_message()));
                }
            }
        }
        spinner.finish_and_clear();
        Ok(products)
    }
}

/// Parse a JSON array of products.
pub fn read_products(path: &Path) -> Result<Vec<Product>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read product file: {}", path.display()))?;
    let values: Vec<serde_json::Value> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse product file: {}", path.display()))?;
    Ok(Product::from_values(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_products_tolerates_loose_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(
            &path,
            r#"[
                {"_id":"1","name":"Swift 3","category":"laptop","price":"15990000","images":"a.jpg"},
                {"id":"2","name":"DDR5 32GB","category":"Linh Kien","type":"ram","stock":"7"},
                {"_id":"3","id":3,"name":"VG27","category":"monitor"},
                null
            ]"#,
        )
        .unwrap();

        let products = read_products(&path).unwrap();
        assert_eq!(products.len(), 3);
        assert_eq!(products[0].price, Some(15_990_000));
        assert_eq!(products[1].part_kind(), Some(PartKind::Ram));
        assert_eq!(products[1].stock, 7);
        assert_eq!(products[2].id.as_str(), "3");
    }

    #[test]
    fn test_read_products_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_products(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read product file"));
    }
}
