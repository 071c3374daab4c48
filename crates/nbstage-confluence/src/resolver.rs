//! Page reference resolution.
//!
//! Turns a human-shareable page URL (copied from the browser address bar)
//! into the server base URL and programmatic page ID used by the REST API.
//!
//! Three URL shapes are supported, tried in order:
//!
//! 1. `.../pages/viewpage.action?pageId=123456` — page ID as a query
//!    parameter, no network call.
//! 2. `.../spaces/ASPACE/pages/123456/Page+Title` — page ID in the path
//!    under a space, no network call.
//! 3. `.../display/ASPACE/Page+Title` — space and title, resolved with one
//!    authenticated content search.
//!
//! The no-network shapes are tried first to avoid unnecessary authenticated
//! calls.

use percent_encoding::percent_decode_str;
use tracing::debug;

use nbstage_config::Credentials;

use crate::client::ConfluenceClient;
use crate::error::ConfluenceError;

/// Path segments marking the start of the wiki path on the server.
const WIKI_PATH_MARKERS: &[&str] = &["display", "spaces"];

/// A resolved page reference. Immutable once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRef {
    /// Base URL of the server, without a trailing slash.
    pub server_base: String,
    /// Programmatic page ID.
    pub page_id: u64,
}

/// Outcome of parsing a page URL, before any network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParsedUrl {
    /// The URL carried the page ID directly.
    Resolved(PageRef),
    /// The URL named a space and title that must be looked up.
    TitleLookup {
        server_base: String,
        space: String,
        /// Title in its URL-encoded form, as carried in the URL.
        title: String,
    },
}

/// Resolve a human-facing page URL into a [`PageRef`].
///
/// # Errors
///
/// - [`ConfluenceError::UnresolvedReference`] when the URL shape is
///   unrecognized.
/// - [`ConfluenceError::NotFound`] when a title/space lookup returns zero
///   results; the page must be created manually first.
/// - [`ConfluenceError::Server`] on any non-2xx lookup response.
pub fn resolve(url: &str, credentials: &Credentials) -> Result<PageRef, ConfluenceError> {
    match parse_page_url(url)? {
        ParsedUrl::Resolved(page) => {
            debug!("Resolved {} to page {} without lookup", url, page.page_id);
            Ok(page)
        }
        ParsedUrl::TitleLookup {
            server_base,
            space,
            title,
        } => {
            let client = ConfluenceClient::new(&server_base, credentials);
            let response = client.find_page_by_title(&space, &title)?;
            let first = response.results.into_iter().next().ok_or_else(|| {
                ConfluenceError::NotFound {
                    title: decode_segment(&title),
                    space: space.clone(),
                }
            })?;
            let page_id = first.id.as_u64().ok_or_else(|| {
                ConfluenceError::Json(format!("non-numeric content id for '{title}'"))
            })?;
            debug!("Resolved '{}' in '{}' to page {}", title, space, page_id);
            Ok(PageRef {
                server_base,
                page_id,
            })
        }
    }
}

/// Parse a page URL without performing any network call.
pub(crate) fn parse_page_url(url: &str) -> Result<ParsedUrl, ConfluenceError> {
    let unresolved = || ConfluenceError::UnresolvedReference(url.to_owned());

    let uri: ureq::http::Uri = url.parse().map_err(|_| unresolved())?;
    let scheme = uri.scheme_str().ok_or_else(unresolved)?;
    let authority = uri.authority().ok_or_else(unresolved)?.as_str();
    let segments: Vec<&str> = uri.path().split('/').collect();

    // Server base: everything before the first wiki-path marker, or just
    // scheme and host when no marker is present.
    let server_base = segments
        .iter()
        .position(|seg| WIKI_PATH_MARKERS.contains(seg))
        .map_or_else(
            || format!("{scheme}://{authority}"),
            |i| format!("{scheme}://{authority}{}", segments[..i].join("/")),
        );

    // Page ID as a query parameter.
    if let Some(value) = query_param(uri.query().unwrap_or(""), "pageId") {
        let page_id = value.parse().map_err(|_| unresolved())?;
        return Ok(ParsedUrl::Resolved(PageRef {
            server_base,
            page_id,
        }));
    }

    // Page ID as a path segment following "pages".
    if let Some(i) = segments.iter().position(|seg| *seg == "pages") {
        if let Some(page_id) = segments.get(i + 1).and_then(|seg| seg.parse().ok()) {
            return Ok(ParsedUrl::Resolved(PageRef {
                server_base,
                page_id,
            }));
        }
    }

    // Space and title following "display", requiring a lookup.
    if let Some(i) = segments.iter().position(|seg| *seg == "display") {
        if let (Some(space), Some(title)) = (segments.get(i + 1), segments.get(i + 2)) {
            return Ok(ParsedUrl::TitleLookup {
                server_base,
                space: (*space).to_owned(),
                title: (*title).to_owned(),
            });
        }
    }

    Err(unresolved())
}

/// First value of a query parameter, if present.
fn query_param<'a>(query: &'a str, name: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// Decode a URL path segment for human-readable error messages.
fn decode_segment(segment: &str) -> String {
    percent_decode_str(&segment.replace('+', " "))
        .decode_utf8_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_page_id_query_shape() {
        let parsed =
            parse_page_url("https://somewhere.com/pages/viewpage.action?pageId=123456").unwrap();
        assert_eq!(
            parsed,
            ParsedUrl::Resolved(PageRef {
                server_base: "https://somewhere.com".to_owned(),
                page_id: 123_456,
            })
        );
    }

    #[test]
    fn test_cloud_pages_path_shape() {
        let parsed = parse_page_url(
            "https://somewhere.atlassian.net/wiki/spaces/ASPACE/pages/123456/Page+Title",
        )
        .unwrap();
        assert_eq!(
            parsed,
            ParsedUrl::Resolved(PageRef {
                server_base: "https://somewhere.atlassian.net/wiki".to_owned(),
                page_id: 123_456,
            })
        );
    }

    #[test]
    fn test_display_shape_requires_lookup() {
        let parsed =
            parse_page_url("http://confluence.localhost/display/SPACE/Some+Page+Name").unwrap();
        assert_eq!(
            parsed,
            ParsedUrl::TitleLookup {
                server_base: "http://confluence.localhost".to_owned(),
                space: "SPACE".to_owned(),
                title: "Some+Page+Name".to_owned(),
            }
        );
    }

    #[test]
    fn test_display_under_context_path() {
        let parsed =
            parse_page_url("https://somewhere.com/wiki/display/SPACE/Title").unwrap();
        assert_eq!(
            parsed,
            ParsedUrl::TitleLookup {
                server_base: "https://somewhere.com/wiki".to_owned(),
                space: "SPACE".to_owned(),
                title: "Title".to_owned(),
            }
        );
    }

    #[test]
    fn test_equivalent_inputs_resolve_identically() {
        let a = parse_page_url("https://h.example/pages/viewpage.action?pageId=42").unwrap();
        let b = parse_page_url("https://h.example/pages/viewpage.action?pageId=42&x=1").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_shape() {
        let err = parse_page_url("https://somewhere.com/not/a/wiki/url").unwrap_err();
        assert!(matches!(err, ConfluenceError::UnresolvedReference(_)));
    }

    #[test]
    fn test_non_numeric_page_id_rejected() {
        let err =
            parse_page_url("https://somewhere.com/pages/viewpage.action?pageId=abc").unwrap_err();
        assert!(matches!(err, ConfluenceError::UnresolvedReference(_)));
    }

    #[test]
    fn test_relative_url_rejected() {
        let err = parse_page_url("/display/SPACE/Title").unwrap_err();
        assert!(matches!(err, ConfluenceError::UnresolvedReference(_)));
    }

    #[test]
    fn test_decode_segment() {
        assert_eq!(decode_segment("Some+Page+Name"), "Some Page Name");
        assert_eq!(decode_segment("50%25+Done"), "50% Done");
    }
}
