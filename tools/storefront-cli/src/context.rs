//! CLI execution context.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context as _, Result};
use storefront_cache::Cache;
use storefront_commerce::cart::Cart;
use storefront_commerce::catalog::{HttpCatalogSource, ProductCatalog};
use storefront_data::FetchClient;

use crate::config::StorefrontConfig;
use crate::output::Output;

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: StorefrontConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (mut config, config_path) = match config_path {
            Some(path) => {
                let path = PathBuf::from(path);
                (StorefrontConfig::load(&path)?, Some(path))
            }
            // Try to find config in current directory or parent directories
            None => match find_config(&cwd) {
                Some(path) => (StorefrontConfig::load(&path)?, Some(path)),
                None => (StorefrontConfig::default(), None),
            },
        };
        config.apply_env_overrides();
        tracing::debug!(config = ?config_path, catalog = %config.catalog.url, "configuration loaded");

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Directory holding the cart snapshot.
    pub fn storage_dir(&self) -> PathBuf {
        match &self.config.storage.dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => self.cwd.join(dir),
            None => data_dir().join("storefront"),
        }
    }

    /// Catalog reading from the configured endpoint.
    pub fn catalog(&self) -> ProductCatalog {
        let mut client = FetchClient::new();
        if let Some(secs) = self.config.catalog.timeout_secs {
            client = client.with_timeout(Duration::from_secs(secs));
        }
        ProductCatalog::new(HttpCatalogSource::with_client(
            client,
            self.config.catalog.url.clone(),
        ))
    }

    /// Cart restored from the snapshot store.
    pub fn cart(&self) -> Result<Cart> {
        let dir = self.storage_dir();
        let cache = Cache::open(&dir)
            .with_context(|| format!("Failed to open cart storage at {}", dir.display()))?;
        Ok(Cart::load_with_key(cache, self.config.storage.cart_key.clone()))
    }
}

/// Find a config file in the directory tree.
fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

/// Get the platform-specific data directory.
fn data_dir() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        std::env::temp_dir()
    }
}
