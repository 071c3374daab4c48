//! Content search types.

use serde::Deserialize;

/// Content ID.
///
/// Confluence Server returns ids as strings, some deployments as numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ContentId {
    /// Numeric id.
    Number(u64),
    /// String-encoded id.
    Text(String),
}

impl ContentId {
    /// Numeric value of the id, if it is one.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.parse().ok(),
        }
    }
}

/// Response from the content-by-title-and-space search.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    /// Matching content, best match first.
    pub results: Vec<SearchResult>,
}

/// One search result.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    /// Content ID of the match.
    pub id: ContentId,
}
