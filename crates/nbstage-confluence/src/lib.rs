//! Confluence publishing pipeline for nbstage.
//!
//! Publishes rendered documents to existing Confluence pages as sanitized
//! storage-format markup, with versioned attachments whose embedded links
//! stay stable across repeated publications:
//!
//! - [`resolve`]: human-facing page URL → [`PageRef`]
//! - [`AttachmentRegistry`]: attachment name → remote id/version/links
//! - [`Publisher`]: the sequential publish pipeline
//! - [`ConfluenceClient`]: REST API client with basic authentication
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
//! let result = publisher.publish(page_url, &renderer)?;
//! ```

// API client
mod client;
pub use client::ConfluenceClient;

// Errors
pub mod error;
pub use error::ConfluenceError;

// Publish orchestrator
pub mod publisher;
pub use publisher::{PublishError, PublishResult, Publisher};

// Attachment version tracking
mod registry;
pub use registry::{AttachmentRef, AttachmentRegistry};

// Renderer seam
pub mod renderer;
pub use renderer::{DocumentRenderer, RenderContext, RenderError};

// Page reference resolution
mod resolver;
pub use resolver::{PageRef, resolve};

// Types (exposed via result structs)
mod types;
pub use types::{ContentId, Page, Version};
