//! Page-scoped attachment version tracking.
//!
//! Before a publish run uploads anything, the registry walks the server's
//! paginated attachment listing for the page and reconciles it against the
//! set of names about to be uploaded. Each entry then carries the download
//! link the renderer must embed — anticipating the version the attachment
//! will have once this run's upload succeeds — and the endpoint the upload
//! step must POST to.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use crate::client::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::resolver::PageRef;

/// One attachment tracked for the current publish run.
///
/// Built during prefetch and never mutated afterwards; each run builds a
/// fresh set and the server remains the durable store.
#[derive(Debug, Clone)]
pub struct AttachmentRef {
    /// Attachment filename, unique within the page.
    pub name: String,
    /// Remote attachment ID. Absent when the attachment does not exist yet.
    pub remote_id: Option<String>,
    /// Current remote version, 0 when new.
    pub version: u32,
    /// Download link referencing `version + 1`, for embedding in the page.
    pub download_url: String,
    /// Create or update endpoint for this run's upload.
    pub upload_url: String,
}

/// Registry of attachments for one page, keyed by name.
#[derive(Debug, Default)]
pub struct AttachmentRegistry {
    entries: BTreeMap<String, AttachmentRef>,
}

impl AttachmentRegistry {
    /// Build the registry for a publish run.
    ///
    /// Walks the paginated attachment listing, following the server's
    /// continuation path until none is returned, then reconciles the
    /// accumulated name → (id, version) map against `names`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::Server`] when any listing call fails.
    pub fn prefetch(
        client: &ConfluenceClient,
        page: &PageRef,
        names: &BTreeSet<String>,
    ) -> Result<Self, ConfluenceError> {
        // Step 1: enumerate existing attachments across all listing pages.
        let mut existing: HashMap<String, (String, u32)> = HashMap::new();
        let mut path = Some(format!(
            "/rest/api/content/{}/child/attachment?expand=version",
            page.page_id
        ));
        while let Some(p) = path {
            let listing = client.list_attachments(&p)?;
            for result in listing.results {
                let version = result.version.map_or(0, |v| v.number);
                existing.insert(result.title, (result.id, version));
            }
            path = listing.links.next;
        }
        debug!(
            "Found {} existing attachments on page {}",
            existing.len(),
            page.page_id
        );

        // Step 2: reconcile against the names to be uploaded.
        let mut entries = BTreeMap::new();
        for name in names {
            let (remote_id, version) = existing
                .get(name)
                .map_or((None, 0), |(id, v)| (Some(id.clone()), *v));

            let upload_url = match &remote_id {
                Some(id) => format!(
                    "{}/rest/api/content/{}/child/attachment/{}/data",
                    page.server_base, page.page_id, id
                ),
                None => format!(
                    "{}/rest/api/content/{}/child/attachment",
                    page.server_base, page.page_id
                ),
            };

            // The link the renderer embeds: the version this attachment will
            // have immediately after this run's upload.
            let download_url = format!(
                "{}/download/attachments/{}/{}?version={}",
                page.server_base,
                page.page_id,
                name,
                version + 1
            );

            entries.insert(
                name.clone(),
                AttachmentRef {
                    name: name.clone(),
                    remote_id,
                    version,
                    download_url,
                    upload_url,
                },
            );
        }

        Ok(Self { entries })
    }

    /// Look up an attachment by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttachmentRef> {
        self.entries.get(name)
    }

    /// Iterate entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = &AttachmentRef> {
        self.entries.values()
    }

    /// Number of tracked attachments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
