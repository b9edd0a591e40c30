// src/data_types.rs
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::config::ColumnMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSource {
    /// Published Google Sheet, fetched through the CSV export endpoint
    Sheet {
        host: String,
        sheet_id: String,
        gid: String,
    },
    Local { path: PathBuf },
}

impl DataSource {
    pub fn export_url(&self) -> Option<String> {
        match self {
            DataSource::Sheet { host, sheet_id, gid } => Some(export_url(host, sheet_id, gid)),
            DataSource::Local { .. } => None,
        }
    }
}

pub fn export_url(host: &str, sheet_id: &str, gid: &str) -> String {
    format!(
        "https://{}/spreadsheets/d/{}/export?format=csv&gid={}",
        host, sheet_id, gid
    )
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Sheet { sheet_id, gid, .. } => write!(f, "sheet {} (gid {})", sheet_id, gid),
            DataSource::Local { path } => write!(f, "{}", path.display()),
        }
    }
}

/// A single spreadsheet cell after type coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Text used when the cell labels something, e.g. a section.
    /// Null and blank text have no label.
    pub fn label(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::Text(s) if s.trim().is_empty() => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

/// One data line of the sheet, keyed by header text in column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: IndexMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Row::default()
    }

    pub fn insert(&mut self, header: impl Into<String>, value: CellValue) {
        self.fields.insert(header.into(), value);
    }

    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.fields.get(header)
    }

    pub fn contains(&self, header: &str) -> bool {
        self.fields.contains_key(header)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn product(&self, columns: &ColumnMap) -> Product {
        let text = |header: &str| self.get(header).and_then(CellValue::label);

        Product {
            name: text(columns.name.as_str()),
            ingredient: text(columns.ingredient.as_str()),
            price: self.get(&columns.price).and_then(CellValue::as_f64),
            photo_url: text(columns.photo_url.as_str()),
            category: text(columns.category.as_str()),
        }
    }
}

impl FromIterator<(String, CellValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, CellValue)>>(iter: I) -> Self {
        Row {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Typed view of a row for renderers that want named fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: Option<String>,
    pub ingredient: Option<String>,
    pub price: Option<f64>,
    pub photo_url: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub products: Vec<Row>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_url_uses_sheet_and_gid() {
        let source = DataSource::Sheet {
            host: "docs.google.com".to_string(),
            sheet_id: "abc".to_string(),
            gid: "7".to_string(),
        };
        assert_eq!(
            source.export_url().as_deref(),
            Some("https://docs.google.com/spreadsheets/d/abc/export?format=csv&gid=7")
        );
        assert_eq!(DataSource::Local { path: "menu.csv".into() }.export_url(), None);
    }

    #[test]
    fn labels_skip_null_and_blank_text() {
        assert_eq!(CellValue::Null.label(), None);
        assert_eq!(CellValue::Text("  ".to_string()).label(), None);
        assert_eq!(CellValue::Text("Comida".to_string()).label().as_deref(), Some("Comida"));
        assert_eq!(CellValue::Number(2024.0).label().as_deref(), Some("2024"));
        assert_eq!(CellValue::Bool(false).label().as_deref(), Some("false"));
    }

    #[test]
    fn row_serializes_as_ordered_object() {
        let row: Row = vec![
            ("Producto".to_string(), CellValue::Text("Taco".to_string())),
            ("Precio".to_string(), CellValue::Number(3.5)),
            ("Foto".to_string(), CellValue::Null),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"Producto":"Taco","Precio":3.5,"Foto":null}"#);
    }

    #[test]
    fn product_view_reads_configured_columns() {
        let row: Row = vec![
            ("Producto".to_string(), CellValue::Text("Taco".to_string())),
            ("Ingrediente".to_string(), CellValue::Text("Carne".to_string())),
            ("Precio".to_string(), CellValue::Number(3.5)),
            ("Foto".to_string(), CellValue::Null),
            ("Categoria".to_string(), CellValue::Text("Comida".to_string())),
        ]
        .into_iter()
        .collect();

        let product = row.product(&ColumnMap::default());
        assert_eq!(product.name.as_deref(), Some("Taco"));
        assert_eq!(product.ingredient.as_deref(), Some("Carne"));
        assert_eq!(product.price, Some(3.5));
        assert_eq!(product.photo_url, None);
        assert_eq!(product.category.as_deref(), Some("Comida"));
    }
}
