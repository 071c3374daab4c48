//! Error types for Confluence operations.

/// Error from Confluence API operations and page reference resolution.
///
/// All variants are fatal: no call is retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum ConfluenceError {
    /// Page URL shape not recognized.
    #[error("Unknown page URL format: {0}")]
    UnresolvedReference(String),

    /// Title/space lookup returned no results.
    #[error(
        "Could not locate '{title}' in space '{space}'. \
         Ensure the page exists: nbstage will not create it"
    )]
    NotFound {
        /// Page title searched for.
        title: String,
        /// Space key searched in.
        space: String,
    },

    /// Non-2xx HTTP response, raw status and body surfaced.
    #[error("HTTP error: {status} - {body}")]
    Server {
        /// HTTP status code (0 when the request never reached the server).
        status: u16,
        /// Response body, or transport error description.
        body: String,
    },

    /// Page update rejected because another writer won the race.
    #[error("page {page_id} was modified concurrently (stale version {version}); re-run to publish")]
    ConcurrentModification {
        /// Page that was being updated.
        page_id: u64,
        /// Version number the rejected update was based on.
        version: u32,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ConfluenceError {
    fn from(e: serde_json::Error) -> Self {
        ConfluenceError::Json(e.to_string())
    }
}

impl From<ureq::Error> for ConfluenceError {
    fn from(e: ureq::Error) -> Self {
        ConfluenceError::Server {
            status: 0,
            body: e.to_string(),
        }
    }
}
