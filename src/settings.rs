use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::{Path, PathBuf}};

use crate::page::PageLayout;

const PAGE_ENV: &str = "STOCK_CHART_PAGE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub layout: PageLayout,
    /// Page snapshot used when none is given on the command line
    pub page: Option<PathBuf>,
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("stock-chart").join("settings.json"))
    }

    /// Loads the user settings file if there is one, then applies `STOCK_CHART_PAGE`.
    pub fn load() -> Result<Self> {
        let mut settings = match Self::config_path().filter(|p| p.exists()) {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        if let Ok(page) = env::var(PAGE_ENV) {
            settings.page = Some(PathBuf::from(page));
        }
        Ok(settings)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("invalid settings in {}", path.display()))
    }

    /// Command-line page first, then the configured one.
    pub fn page_path(&self, from_cli: Option<PathBuf>) -> Result<PathBuf> {
        from_cli
            .or_else(|| self.page.clone())
            .ok_or_else(|| anyhow!("no page snapshot given (pass a path or set {PAGE_ENV})"))
    }
}
