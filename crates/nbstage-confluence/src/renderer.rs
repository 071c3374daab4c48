//! Seam between the publish pipeline and the external document renderer.
//!
//! The pipeline does not understand the source document format. It hands the
//! renderer a [`RenderContext`] with everything needed to produce raw
//! storage-format markup — most importantly the versioned download links
//! from the attachment registry — and gets back a single markup string to
//! sanitize and publish.

use std::collections::BTreeMap;

use nbstage_config::PublishOptions;

use crate::registry::AttachmentRegistry;
use crate::resolver::PageRef;

/// Context handed to the renderer for one publish run.
pub struct RenderContext<'a> {
    /// The page being published to.
    pub page: &'a PageRef,
    /// Resolved attachment records; `download_url` fields are the stable
    /// links to embed in the markup.
    pub attachments: &'a AttachmentRegistry,
    /// Options for this run.
    pub options: &'a PublishOptions,
}

/// External document renderer.
///
/// Implementations own parsing of the source format and production of
/// intermediate markup; the pipeline only consumes their outputs.
pub trait DocumentRenderer {
    /// Binary artifacts extracted from the document, keyed by the attachment
    /// name they will be stored under.
    fn outputs(&self) -> &BTreeMap<String, Vec<u8>>;

    /// The source document itself as (name, bytes), attached to the page
    /// when [`PublishOptions::attach_source`] is set.
    fn source_document(&self) -> Option<(String, Vec<u8>)>;

    /// Render the document to raw storage-format markup.
    ///
    /// The result is sanitized before being sent to the server, so the
    /// renderer may emit markup freely.
    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, RenderError>;
}

/// Error reported by a document renderer.
#[derive(Debug, thiserror::Error)]
#[error("render error: {0}")]
pub struct RenderError(pub String);

impl RenderError {
    /// Create a render error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
