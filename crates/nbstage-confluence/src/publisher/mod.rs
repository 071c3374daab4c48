//! Publish orchestrator.
//!
//! This module provides the [`Publisher`] struct that sequences the entire
//! pipeline for publishing a rendered document to an existing page:
//!
//! 1. Resolve the page URL to a page ID
//! 2. Prefetch attachment versions for stable links
//! 3. Render the document (external)
//! 4. Sanitize the markup
//! 5. Update the page (fetch version, increment, write)
//! 6. Add labels
//! 7. Upload attachments
//!
//! Stages run strictly in sequence; a failure in any stage aborts the run
//! with no rollback of earlier stages.
//!
//! # Example
//!
//! ```ignore
//! use nbstage_config::{Credentials, PublishOptions};
//! use nbstage_confluence::Publisher;
//!
//! let publisher = Publisher::new(
//!     Credentials::new("user", "pass"),
//!     PublishOptions::default(),
//! );
//! let result = publisher.publish(
//!     "https://confluence.example.com/display/SPACE/My+Page",
//!     &renderer,
//! )?;
//! println!("Published version {}", result.new_version);
//! ```

mod error;
mod executor;
mod result;

pub use error::PublishError;
pub use executor::Publisher;
pub use result::PublishResult;

/// Provenance label added to every page published by this tool.
pub const PROVENANCE_LABEL: &str = "nbstage";
