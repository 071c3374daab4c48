//! Typed Confluence API responses.
//!
//! One result structure per endpoint, with explicit absent-field handling
//! instead of dynamic key lookup.

mod attachment;
mod page;
mod search;

pub use attachment::AttachmentsPage;
pub use page::{Page, Version};
pub use search::{ContentId, SearchResponse};
