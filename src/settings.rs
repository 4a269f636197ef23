use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use config::Config;
use serde::Deserialize;

use crate::fetch::FixedPacer;
use crate::listing::DEFAULT_TARGET;
use crate::recipe::Category;
use crate::site::DEFAULT_BASE_URL;

pub const JSON_FILE: &str = "recipes.json";
pub const DB_FILE: &str = "recipes.db";
const CONFIG_FILE: &str = "recipes.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub per_category: usize,
    pub timeout_secs: u64,
    pub listing_delay_ms: u64,
    pub detail_delay_ms: u64,
    pub output_dir: Option<PathBuf>,
    /// Crawled in this order.
    pub categories: Vec<Category>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            per_category: DEFAULT_TARGET,
            timeout_secs: 5,
            listing_delay_ms: 300,
            detail_delay_ms: 500,
            output_dir: None,
            categories: default_categories(),
        }
    }
}

pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("밑반찬", 63),
        Category::new("메인반찬", 56),
        Category::new("국/탕", 54),
        Category::new("찌개", 55),
        Category::new("양식", 65),
        Category::new("디저트", 60),
        Category::new("퓨전", 61),
        Category::new("빵", 66),
    ]
}

impl Settings {
    /// Defaults, then an optional `recipes.toml`, then `RECIPES_*` variables.
    pub fn load() -> Result<Self> {
        Config::builder()
            .add_source(config::File::new(CONFIG_FILE, config::FileFormat::Toml).required(false))
            .add_source(config::Environment::with_prefix("RECIPES").try_parsing(true))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn pacer(&self) -> FixedPacer {
        FixedPacer {
            listing: Duration::from_millis(self.listing_delay_ms),
            detail: Duration::from_millis(self.detail_delay_ms),
        }
    }

    /// `--out-dir`, then `output_dir`, then the executable's own directory.
    pub fn output_dir(&self, cli: Option<&Path>) -> PathBuf {
        if let Some(dir) = cli.or(self.output_dir.as_deref()) {
            return dir.to_path_buf();
        }
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
