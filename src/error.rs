// src/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<figment::Error> for MenuError {
    fn from(err: figment::Error) -> Self {
        MenuError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MenuError>;
