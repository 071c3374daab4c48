//! Label operations for the Confluence API.

use serde_json::json;
use tracing::info;

use super::ConfluenceClient;
use crate::error::ConfluenceError;

impl ConfluenceClient {
    /// Add a global-prefix label to a page.
    ///
    /// Adding a label that already exists is a server-side no-op.
    pub(crate) fn add_label(&self, page_id: u64, label: &str) -> Result<(), ConfluenceError> {
        let url = format!("{}/content/{}/label", self.api_url(), page_id);

        let payload = json!([{"prefix": "global", "name": label}]);

        info!("Adding label '{}' to page {}", label, page_id);

        let response = self
            .agent
            .post(&url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send_json(&payload)?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();
        Self::error_for_status(status, &mut body_reader)?;

        Ok(())
    }
}
