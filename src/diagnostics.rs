// src/diagnostics.rs
use serde::Serialize;
use std::fmt;
use tracing::{error, warn, Level};

/// Something that went wrong while loading the menu.
///
/// None of these reach the caller as an error; the loader records them next
/// to the (possibly empty) sections and mirrors each one to the log.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The sheet answered with an HTML page, usually the sign-in screen.
    AccessDenied { source: String },
    EmptyData,
    /// Rows are still grouped, all under the fallback label.
    MissingCategoryColumn { expected: String, found: Vec<String> },
    Unexpected { message: String },
}

impl Diagnostic {
    pub fn level(&self) -> Level {
        match self {
            Diagnostic::AccessDenied { .. } | Diagnostic::Unexpected { .. } => Level::ERROR,
            Diagnostic::EmptyData | Diagnostic::MissingCategoryColumn { .. } => Level::WARN,
        }
    }

    pub fn emit(&self) {
        match self {
            Diagnostic::AccessDenied { source } => error!(
                source = %source,
                "Spreadsheet is not public. Share it as 'Anyone with the link' and try again"
            ),
            Diagnostic::EmptyData => warn!("No products found in the spreadsheet"),
            Diagnostic::MissingCategoryColumn { expected, found } => warn!(
                expected = %expected,
                found = ?found,
                "Category column not found, grouping every row under the fallback section"
            ),
            Diagnostic::Unexpected { message } => error!(error = %message, "Failed to load menu"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::AccessDenied { source } => write!(f, "{} is not publicly accessible", source),
            Diagnostic::EmptyData => write!(f, "no products found"),
            Diagnostic::MissingCategoryColumn { expected, found } => write!(
                f,
                "column \"{}\" not found, columns: [{}]",
                expected,
                found.join(", ")
            ),
            Diagnostic::Unexpected { message } => write!(f, "{}", message),
        }
    }
}
