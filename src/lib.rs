// src/lib.rs
//! Loads a restaurant menu published as a Google Sheet and groups its
//! products into sections by category.
//!
//! ```no_run
//! use menu_loader::{MenuConfig, MenuLoader};
//!
//! # async fn run() {
//! let loader = MenuLoader::new(MenuConfig::default());
//! for section in loader.load_menu().await {
//!     println!("{}: {} products", section.id, section.products.len());
//! }
//! # }
//! ```

pub mod cloud_handler;
pub mod config;
pub mod csv_handler;
pub mod data_types;
pub mod diagnostics;
pub mod error;
pub mod menu_loader;

pub use config::{ColumnMap, MenuConfig};
pub use data_types::{CellValue, DataSource, Product, Row, Section};
pub use diagnostics::Diagnostic;
pub use error::{MenuError, Result};
pub use menu_loader::{group_rows, CsvSource, LocalSource, MenuLoader, MenuReport, SheetSource, StaticSource};
