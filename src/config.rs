// src/config.rs
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::data_types::DataSource;
use crate::error::Result;

pub const DEFAULT_HOST: &str = "docs.google.com";
pub const DEFAULT_SHEET_ID: &str = "1AFPONiNdDpSnEulMG2v43t86H4icpQ2DUs_-nffFUvA";
pub const DEFAULT_GID: &str = "0";
pub const DEFAULT_FALLBACK_LABEL: &str = "Other";
pub const ENV_PREFIX: &str = "MENU_";

/// Header names of the menu sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub name: String,
    pub ingredient: String,
    pub price: String,
    pub photo_url: String,
    pub category: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        ColumnMap {
            name: "Producto".to_string(),
            ingredient: "Ingrediente".to_string(),
            price: "Precio".to_string(),
            photo_url: "Foto".to_string(),
            category: "Categoria".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub source: DataSource,
    pub columns: ColumnMap,
    /// Section id for rows without a category
    pub fallback_label: String,
    /// `None` picks `,` or `;` from the header line
    pub delimiter: Option<char>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        MenuConfig {
            source: DataSource::Sheet {
                host: DEFAULT_HOST.to_string(),
                sheet_id: DEFAULT_SHEET_ID.to_string(),
                gid: DEFAULT_GID.to_string(),
            },
            columns: ColumnMap::default(),
            fallback_label: DEFAULT_FALLBACK_LABEL.to_string(),
            delimiter: None,
        }
    }
}

impl MenuConfig {
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(MenuConfig::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Defaults, then the TOML file if given, then `MENU_*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config: MenuConfig = Self::figment(path).extract()?;
        Ok(config)
    }

    pub fn with_source(mut self, source: DataSource) -> Self {
        self.source = source;
        self
    }

    pub fn category_column(&self) -> &str {
        &self.columns.category
    }
}
