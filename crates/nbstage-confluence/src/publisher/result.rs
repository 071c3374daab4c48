//! Result types for publish operations.

use crate::resolver::PageRef;

/// Outcome of a successful publish run.
#[derive(Debug)]
pub struct PublishResult {
    /// The page that was updated.
    pub page: PageRef,
    /// The sanitized markup that was written as the page body.
    pub markup: String,
    /// Page version after the update.
    pub new_version: u32,
    /// Number of labels added (provenance label included).
    pub labels_added: usize,
    /// Number of attachments uploaded.
    pub attachments_uploaded: usize,
}
