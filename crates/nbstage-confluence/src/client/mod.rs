//! Confluence REST API client.
//!
//! Sync HTTP client for the Confluence Server/Data Center REST API with
//! basic authentication. Calls block until the server responds; an embedding
//! host applies its own timeout or cancellation around the publish run.

mod attachments;
mod labels;
mod pages;
mod search;

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use ureq::Agent;

use nbstage_config::Credentials;

use crate::error::ConfluenceError;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Confluence REST API client.
pub struct ConfluenceClient {
    agent: Agent,
    base_url: String,
    auth_header: String,
}

impl ConfluenceClient {
    /// Create a client for the given server base URL with basic auth.
    #[must_use]
    pub fn new(base_url: &str, credentials: &Credentials) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        let token = BASE64.encode(format!(
            "{}:{}",
            credentials.username, credentials.password
        ));

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header: format!("Basic {token}"),
        }
    }

    /// Get the API base URL.
    fn api_url(&self) -> String {
        format!("{}/rest/api", self.base_url)
    }

    /// Get the server base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Map a non-2xx response to [`ConfluenceError::Server`], surfacing the
    /// raw status and body.
    fn error_for_status(
        status: u16,
        body_reader: &mut ureq::Body,
    ) -> Result<(), ConfluenceError> {
        if (200..=299).contains(&status) {
            return Ok(());
        }
        let error_body = body_reader
            .read_to_string()
            .unwrap_or_else(|_| "(unable to read error body)".to_string());
        Err(ConfluenceError::Server {
            status,
            body: error_body,
        })
    }
}
