// src/cloud_handler.rs
use tracing::debug;

use crate::error::{MenuError, Result};

pub struct CloudHandler {
    client: reqwest::Client,
}

impl CloudHandler {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(CloudHandler { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        CloudHandler { client }
    }

    /// GET the export URL and return the body text.
    ///
    /// An HTML body is returned even with an error status so the caller can
    /// report it as a login page rather than a transport failure.
    pub async fn fetch_csv(&self, url: &str) -> Result<String> {
        debug!(url, "Fetching sheet export");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() && !looks_like_html(&body) {
            return Err(MenuError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        debug!(url, status = status.as_u16(), bytes = body.len(), "Sheet export received");
        Ok(body)
    }
}

/// Google answers a private sheet with its sign-in page instead of CSV.
pub fn looks_like_html(body: &str) -> bool {
    let head = body.trim_start();
    let doctype = head
        .get(..9)
        .map_or(false, |prefix| prefix.eq_ignore_ascii_case("<!DOCTYPE"));

    doctype || body.contains("<html")
}
