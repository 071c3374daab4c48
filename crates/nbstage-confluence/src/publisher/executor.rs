//! Publish orchestrator implementation.

use std::collections::BTreeSet;

use tracing::{debug, info};

use nbstage_config::{Credentials, PublishOptions};
use nbstage_sanitize::sanitize;

use crate::client::ConfluenceClient;
use crate::registry::AttachmentRegistry;
use crate::renderer::{DocumentRenderer, RenderContext};
use crate::resolver::resolve;

use super::PROVENANCE_LABEL;
use super::error::PublishError;
use super::result::PublishResult;

/// Publishes rendered documents to existing Confluence pages.
pub struct Publisher {
    credentials: Credentials,
    options: PublishOptions,
}

impl Publisher {
    /// Create a publisher with the given credentials and options.
    #[must_use]
    pub fn new(credentials: Credentials, options: PublishOptions) -> Self {
        Self {
            credentials,
            options,
        }
    }

    /// Publish a rendered document to the page named by `url`.
    ///
    /// Stages run strictly in sequence: resolve, prefetch attachment
    /// versions, render, sanitize, update page, add labels, upload
    /// attachments. The page update is optimistic: the body is PUT with
    /// `version + 1` relative to the version just fetched, and a concurrent
    /// writer causes the whole run to fail with
    /// [`ConfluenceError::ConcurrentModification`](crate::ConfluenceError::ConcurrentModification).
    ///
    /// No stage is rolled back on failure. If an attachment upload fails
    /// after the page update succeeded, the page body keeps links that
    /// anticipate versions not yet uploaded; re-running the publish heals
    /// this.
    ///
    /// # Errors
    ///
    /// Returns an error when URL resolution, rendering, sanitization, or any
    /// server call fails.
    pub fn publish(
        &self,
        url: &str,
        renderer: &dyn DocumentRenderer,
    ) -> Result<PublishResult, PublishError> {
        let page = resolve(url, &self.credentials)?;
        let client = ConfluenceClient::new(&page.server_base, &self.credentials);

        // Every name uploaded in this run must be in the registry, including
        // the source document when it is to be attached.
        let mut names: BTreeSet<String> = renderer.outputs().keys().cloned().collect();
        let source = if self.options.attach_source {
            renderer.source_document()
        } else {
            None
        };
        if let Some((name, _)) = &source {
            names.insert(name.clone());
        }

        let registry = AttachmentRegistry::prefetch(&client, &page, &names)?;

        let ctx = RenderContext {
            page: &page,
            attachments: &registry,
            options: &self.options,
        };
        let markup = renderer.render(&ctx)?;
        let markup = sanitize(&markup)?;

        // Fetch-version, increment, write. A 404 here is fatal: the page
        // must already exist.
        let current = client.get_page(page.page_id)?;
        client.update_page(page.page_id, &current.title, &markup, current.version.number)?;
        let new_version = current.version.number + 1;

        client.add_label(page.page_id, PROVENANCE_LABEL)?;
        let mut labels_added = 1;
        for label in &self.options.extra_labels {
            client.add_label(page.page_id, label)?;
            labels_added += 1;
        }

        let mut attachments_uploaded = 0;
        for (name, data) in renderer.outputs() {
            let Some(entry) = registry.get(name) else {
                // Reconciliation covered this name set; an absent entry is
                // skipped rather than failing the run.
                debug!("No registry entry for '{}', skipping upload", name);
                continue;
            };
            client.upload_attachment(&entry.upload_url, name, data)?;
            attachments_uploaded += 1;
        }

        if let Some((name, data)) = source {
            if let Some(entry) = registry.get(&name) {
                client.upload_attachment(&entry.upload_url, &name, &data)?;
                attachments_uploaded += 1;
            }
        }

        info!(
            "Published page {} at version {} with {} attachments",
            page.page_id, new_version, attachments_uploaded
        );

        Ok(PublishResult {
            page,
            markup,
            new_version,
            labels_added,
            attachments_uploaded,
        })
    }
}
