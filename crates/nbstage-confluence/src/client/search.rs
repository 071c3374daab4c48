//! Content search operations for the Confluence API.

use tracing::info;

use super::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::types::SearchResponse;

impl ConfluenceClient {
    /// Search for content matching a title within a space.
    ///
    /// `title` is passed in its URL-encoded form, exactly as carried in the
    /// human-facing page URL.
    pub(crate) fn find_page_by_title(
        &self,
        space_key: &str,
        title: &str,
    ) -> Result<SearchResponse, ConfluenceError> {
        let url = format!(
            "{}/content?title={}&spaceKey={}",
            self.api_url(),
            title,
            space_key
        );

        info!("Looking up page '{}' in space '{}'", title, space_key);

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
}
