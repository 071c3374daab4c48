//! Confluence page types.

use serde::Deserialize;

use super::ContentId;

/// Confluence page, as returned by the content-by-id endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    /// Page ID.
    #[serde(default)]
    pub id: Option<ContentId>,
    /// Page title. Echoed back verbatim on update.
    pub title: String,
    /// Current version information.
    pub version: Version,
}

/// Page or attachment version.
#[derive(Debug, Clone, Deserialize)]
pub struct Version {
    /// Version number.
    pub number: u32,
}
