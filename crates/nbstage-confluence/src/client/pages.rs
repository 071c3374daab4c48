//! Page operations for the Confluence API.

use serde_json::json;
use tracing::info;

use super::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::types::Page;

impl ConfluenceClient {
    /// Get a page by ID.
    ///
    /// A 404 is fatal: pages are never created by this tool.
    pub(crate) fn get_page(&self, page_id: u64) -> Result<Page, ConfluenceError> {
        let url = format!("{}/content/{}", self.api_url(), page_id);

        info!("Getting page {}", page_id);

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();
        Self::error_for_status(status, &mut body_reader)?;

        Ok(body_reader.read_json()?)
    }

    /// Update an existing page body in storage format.
    ///
    /// Requests `version + 1` relative to the version just read from the
    /// server; a stale version is rejected by the server's optimistic
    /// concurrency check and surfaced as
    /// [`ConfluenceError::ConcurrentModification`].
    pub(crate) fn update_page(
        &self,
        page_id: u64,
        title: &str,
        body: &str,
        version: u32,
    ) -> Result<(), ConfluenceError> {
        let url = format!("{}/content/{}", self.api_url(), page_id);

        let payload = json!({
            "type": "page",
            "title": title,
            "body": {
                "storage": {
                    "value": body,
                    "representation": "storage"
                }
            },
            "version": {"number": version + 1}
        });

        info!(
            "Updating page {} from version {} to {}",
            page_id,
            version,
            version + 1
        );

        let response = self
            .agent
            .put(&url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send_json(&payload)?;

        let status = response.status().as_u16();
        if status == 409 {
            return Err(ConfluenceError::ConcurrentModification { page_id, version });
        }
        let mut body_reader = response.into_body();
        Self::error_for_status(status, &mut body_reader)?;

        Ok(())
    }
}
