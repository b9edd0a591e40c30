// src/menu_loader.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::cloud_handler::{looks_like_html, CloudHandler};
use crate::config::MenuConfig;
use crate::csv_handler::CsvHandler;
use crate::data_types::{export_url, CellValue, DataSource, Row, Section};
use crate::diagnostics::Diagnostic;
use crate::error::Result;

/// Where the raw CSV text comes from.
#[async_trait]
pub trait CsvSource: Send + Sync {
    async fn fetch(&self) -> Result<String>;

    /// Human readable location, used in diagnostics.
    fn describe(&self) -> String;
}

pub struct SheetSource {
    handler: OnceCell<CloudHandler>,
    url: String,
}

impl SheetSource {
    /// The HTTP client is built on first fetch.
    pub fn new(url: impl Into<String>) -> Self {
        SheetSource {
            handler: OnceCell::new(),
            url: url.into(),
        }
    }

    pub fn with_client(url: impl Into<String>, client: reqwest::Client) -> Self {
        SheetSource {
            handler: OnceCell::with_value(CloudHandler::with_client(client)),
            url: url.into(),
        }
    }
}

#[async_trait]
impl CsvSource for SheetSource {
    async fn fetch(&self) -> Result<String> {
        let handler = self.handler.get_or_try_init(CloudHandler::new)?;
        handler.fetch_csv(&self.url).await
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

pub struct LocalSource {
    path: PathBuf,
}

impl LocalSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LocalSource { path: path.into() }
    }
}

#[async_trait]
impl CsvSource for LocalSource {
    async fn fetch(&self) -> Result<String> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// CSV text already in memory.
pub struct StaticSource {
    body: String,
}

impl StaticSource {
    pub fn new(body: impl Into<String>) -> Self {
        StaticSource { body: body.into() }
    }
}

#[async_trait]
impl CsvSource for StaticSource {
    async fn fetch(&self) -> Result<String> {
        Ok(self.body.clone())
    }

    fn describe(&self) -> String {
        "in-memory CSV".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MenuReport {
    pub sections: Vec<Section>,
    pub diagnostics: Vec<Diagnostic>,
    pub loaded_at: DateTime<Utc>,
}

pub struct MenuLoader {
    config: MenuConfig,
    source: Box<dyn CsvSource>,
    parser: CsvHandler,
}

impl MenuLoader {
    pub fn new(config: MenuConfig) -> Self {
        let source: Box<dyn CsvSource> = match &config.source {
            DataSource::Sheet { host, sheet_id, gid } => {
                Box::new(SheetSource::new(export_url(host, sheet_id, gid)))
            }
            DataSource::Local { path } => Box::new(LocalSource::new(path.clone())),
        };
        Self::with_source(config, source)
    }

    pub fn with_source(config: MenuConfig, source: Box<dyn CsvSource>) -> Self {
        let parser = CsvHandler::new().with_delimiter(config.delimiter);
        MenuLoader {
            config,
            source,
            parser,
        }
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// Fetch the sheet and group it into sections. Any failure is logged and
    /// yields an empty menu.
    pub async fn load_menu(&self) -> Vec<Section> {
        self.load_report().await.sections
    }

    /// Same as [`MenuLoader::load_menu`] but keeps the diagnostics.
    pub async fn load_report(&self) -> MenuReport {
        let mut diagnostics = Vec::new();

        let sections = match self.try_load(&mut diagnostics).await {
            Ok(sections) => sections,
            Err(err) => {
                record(
                    &mut diagnostics,
                    Diagnostic::Unexpected {
                        message: err.to_string(),
                    },
                );
                Vec::new()
            }
        };

        MenuReport {
            sections,
            diagnostics,
            loaded_at: Utc::now(),
        }
    }

    async fn try_load(&self, diagnostics: &mut Vec<Diagnostic>) -> Result<Vec<Section>> {
        let body = self.source.fetch().await?;

        if looks_like_html(&body) {
            record(
                diagnostics,
                Diagnostic::AccessDenied {
                    source: self.source.describe(),
                },
            );
            return Ok(Vec::new());
        }

        let rows = self.parser.parse(&body)?;
        debug!(rows = rows.len(), "Parsed menu rows");

        let Some(first) = rows.first() else {
            record(diagnostics, Diagnostic::EmptyData);
            return Ok(Vec::new());
        };

        let category = self.config.category_column();
        if !first.contains(category) {
            record(
                diagnostics,
                Diagnostic::MissingCategoryColumn {
                    expected: category.to_string(),
                    found: first.keys().map(str::to_string).collect(),
                },
            );
        }

        let sections = group_rows(rows, category, &self.config.fallback_label);
        info!(
            source = %self.source.describe(),
            sections = sections.len(),
            "Menu loaded"
        );
        Ok(sections)
    }
}

fn record(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    diagnostic.emit();
    diagnostics.push(diagnostic);
}

/// Group rows by their category cell, keeping the order in which each
/// category first appears. Rows with no usable category go to `fallback`.
pub fn group_rows(rows: Vec<Row>, category: &str, fallback: &str) -> Vec<Section> {
    let mut grouped: IndexMap<String, Vec<Row>> = IndexMap::new();

    for row in rows {
        let label = row
            .get(category)
            .and_then(CellValue::label)
            .unwrap_or_else(|| fallback.to_string());
        grouped.entry(label).or_default().push(row);
    }

    grouped
        .into_iter()
        .map(|(id, products)| Section { id, products })
        .collect()
}
