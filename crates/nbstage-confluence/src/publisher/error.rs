//! Error types for publish operations.

use nbstage_sanitize::SanitizeError;

use crate::error::ConfluenceError;
use crate::renderer::RenderError;

/// Error during a publish run.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// Confluence API or page resolution error.
    #[error("Confluence API error: {0}")]
    Confluence(#[from] ConfluenceError),

    /// Markup sanitization error.
    #[error("Sanitize error: {0}")]
    Sanitize(#[from] SanitizeError),

    /// External renderer error.
    #[error(transparent)]
    Render(#[from] RenderError),
}
