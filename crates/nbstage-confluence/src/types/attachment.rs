//! Confluence attachment listing types.

use serde::Deserialize;

use super::page::Version;

/// One attachment entry from the paginated listing.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteAttachment {
    /// Attachment ID.
    pub id: String,
    /// Attachment filename.
    pub title: String,
    /// Current version. Absent when the listing was not expanded.
    #[serde(default)]
    pub version: Option<Version>,
}

/// One page of the attachment listing.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentsPage {
    /// Attachments on this page of results.
    pub results: Vec<RemoteAttachment>,
    /// Pagination links.
    #[serde(rename = "_links", default)]
    pub links: PaginationLinks,
}

/// Hypermedia pagination links.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationLinks {
    /// Server-relative path of the next page of results.
    ///
    /// Absent on the last page; this is the loop termination condition.
    #[serde(default)]
    pub next: Option<String>,
}
