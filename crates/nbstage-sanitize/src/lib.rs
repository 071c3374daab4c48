//! Storage-format markup sanitizer.
//!
//! Filters renderer-produced markup down to the tags, attributes, and inline
//! styles that the Confluence storage format accepts. Disallowed tags are
//! unwrapped (their text content is kept) except for the removal tags in
//! [`policy::REMOVED_TAGS`], whose entire subtree is discarded. HTML comments
//! are always stripped.
//!
//! Empty elements (`<br>`, `<hr>`) are written in the self-closed form
//! required by the storage format, whether or not the input closed them.
//!
//! Sanitization is idempotent: running it over its own output is a no-op.

pub mod policy;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::reader::Reader;

use policy::{attr_allowed, style_allowed, tag_allowed, tag_removed, tag_void};

/// Error during markup sanitization.
#[derive(Debug, thiserror::Error)]
pub enum SanitizeError {
    /// XML parsing error.
    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    /// XML attribute error.
    #[error("XML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    /// IO error while writing filtered output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Sanitize markup against the storage-format allowlists.
///
/// Pure function, no I/O.
///
/// # Errors
///
/// Returns an error only when the input markup is malformed.
pub fn sanitize(markup: &str) -> Result<String, SanitizeError> {
    let mut reader = Reader::from_str(markup);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;

    let mut writer = Writer::new(Vec::new());
    // Stack of currently-open removal tags. While it is non-empty, every
    // token is suppressed regardless of type, which removes nested and
    // repeated instances at any depth.
    let mut removal_stack: Vec<String> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let tag = decode_name(e.name().as_ref());
                if tag_removed(&tag) {
                    removal_stack.push(tag);
                } else if removal_stack.is_empty() && tag_allowed(&tag) {
                    // Unclosed void tags arrive as Start events; write them
                    // self-closed so the output stays well-formed.
                    if tag_void(&tag) {
                        writer.write_event(Event::Empty(filter_element(&tag, &e)))?;
                    } else {
                        writer.write_event(Event::Start(filter_element(&tag, &e)))?;
                    }
                }
                // Disallowed tags are unwrapped: the tag itself is dropped
                // and its content keeps flowing through.
            }
            Event::End(e) => {
                let tag = decode_name(e.name().as_ref());
                if tag_removed(&tag) {
                    removal_stack.pop();
                } else if removal_stack.is_empty() && tag_allowed(&tag) && !tag_void(&tag) {
                    writer.write_event(Event::End(BytesEnd::new(tag)))?;
                }
            }
            Event::Empty(e) => {
                let tag = decode_name(e.name().as_ref());
                if removal_stack.is_empty() && !tag_removed(&tag) && tag_allowed(&tag) {
                    writer.write_event(Event::Empty(filter_element(&tag, &e)))?;
                }
            }
            ev @ (Event::Text(_) | Event::CData(_) | Event::GeneralRef(_)) => {
                if removal_stack.is_empty() {
                    writer.write_event(ev)?;
                }
            }
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}

/// Rebuild an element keeping only allowlisted attributes.
fn filter_element(tag: &str, e: &BytesStart<'_>) -> BytesStart<'static> {
    let mut element = BytesStart::new(tag.to_owned());

    for attr in e.attributes().flatten() {
        let key = decode_name(attr.key.as_ref());
        if !attr_allowed(tag, &key) {
            continue;
        }

        let value = attr.unescape_value().map_or_else(
            |_| String::from_utf8_lossy(&attr.value).into_owned(),
            std::borrow::Cow::into_owned,
        );

        if key.eq_ignore_ascii_case("style") {
            if let Some(kept) = filter_style(&value) {
                element.push_attribute((key.as_str(), kept.as_str()));
            }
        } else {
            element.push_attribute((key.as_str(), value.as_str()));
        }
    }

    element
}

/// Keep only allowlisted properties of a `style` attribute value.
///
/// Returns `None` when no property survives, dropping the attribute entirely.
fn filter_style(value: &str) -> Option<String> {
    let kept: Vec<String> = value
        .split(';')
        .filter_map(|declaration| {
            let (property, prop_value) = declaration.split_once(':')?;
            let property = property.trim();
            if style_allowed(property) {
                Some(format!("{property}: {}", prop_value.trim()))
            } else {
                None
            }
        })
        .collect();

    if kept.is_empty() {
        None
    } else {
        Some(kept.join("; "))
    }
}

fn decode_name(name: &[u8]) -> String {
    String::from_utf8_lossy(name).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_allowed_markup_passes_through() {
        let html = r#"<p class="lead">Hello <strong>world</strong></p>"#;
        assert_eq!(sanitize(html).unwrap(), html);
    }

    #[test]
    fn test_disallowed_tag_unwrapped() {
        let html = "<p><font>styled</font> text</p>";
        assert_eq!(sanitize(html).unwrap(), "<p>styled text</p>");
    }

    #[test]
    fn test_disallowed_attribute_dropped() {
        let html = r#"<a href="https://example.com" onclick="evil()">link</a>"#;
        assert_eq!(
            sanitize(html).unwrap(),
            r#"<a href="https://example.com">link</a>"#
        );
    }

    #[test]
    fn test_comments_stripped() {
        let html = "<p>before<!-- hidden -->after</p>";
        assert_eq!(sanitize(html).unwrap(), "<p>beforeafter</p>");
    }

    #[test]
    fn test_style_subtree_removed() {
        let html = "<div><style>.cell { color: red; }</style><p>kept</p></div>";
        assert_eq!(sanitize(html).unwrap(), "<div><p>kept</p></div>");
    }

    #[test]
    fn test_script_subtree_removed() {
        let html = "<p>a</p><script>alert('x')</script><p>b</p>";
        assert_eq!(sanitize(html).unwrap(), "<p>a</p><p>b</p>");
    }

    #[test]
    fn test_nested_removal_tags() {
        let html = "<div><style>outer<style>inner</style>tail</style><p>kept</p></div>";
        assert_eq!(sanitize(html).unwrap(), "<div><p>kept</p></div>");
    }

    #[test]
    fn test_sibling_removal_tags() {
        let html = "<style>a</style><p>one</p><style>b</style><p>two</p>";
        assert_eq!(sanitize(html).unwrap(), "<p>one</p><p>two</p>");
    }

    #[test]
    fn test_removal_suppresses_nested_allowed_tags() {
        let html = "<style><p>never shown</p></style><p>shown</p>";
        assert_eq!(sanitize(html).unwrap(), "<p>shown</p>");
    }

    #[test]
    fn test_style_properties_filtered() {
        let html = r#"<span style="color: red; position: absolute">x</span>"#;
        assert_eq!(
            sanitize(html).unwrap(),
            r#"<span style="color: red">x</span>"#
        );
    }

    #[test]
    fn test_style_attribute_dropped_when_empty() {
        let html = r#"<span style="position: absolute">x</span>"#;
        assert_eq!(sanitize(html).unwrap(), "<span>x</span>");
    }

    #[test]
    fn test_style_attribute_only_on_span() {
        let html = r#"<div style="color: red">x</div>"#;
        assert_eq!(sanitize(html).unwrap(), "<div>x</div>");
    }

    #[test]
    fn test_confluence_tags_preserved() {
        let html = r#"<ac:image ac:alt="Logo"><ri:url ri:value="https://example.com/logo.svg" /></ac:image>"#;
        assert_eq!(
            sanitize(html).unwrap(),
            r#"<ac:image ac:alt="Logo"><ri:url ri:value="https://example.com/logo.svg"/></ac:image>"#
        );
    }

    #[test]
    fn test_structured_macro_preserved() {
        let html = r#"<ac:structured-macro ac:name="toc" ac:schema-version="1"></ac:structured-macro>"#;
        assert_eq!(sanitize(html).unwrap(), html);
    }

    #[test]
    fn test_void_tags_self_closed() {
        assert_eq!(sanitize("<p>a<br>b</p>").unwrap(), "<p>a<br/>b</p>");
        assert_eq!(sanitize("<p>a</p><hr><p>b</p>").unwrap(), "<p>a</p><hr/><p>b</p>");
        // Already self-closed input passes through unchanged.
        assert_eq!(sanitize("<p>a<br/>b</p>").unwrap(), "<p>a<br/>b</p>");
    }

    #[test]
    fn test_void_tag_with_class() {
        assert_eq!(
            sanitize(r#"<p>a<br class="soft">b</p>"#).unwrap(),
            r#"<p>a<br class="soft"/>b</p>"#
        );
    }

    #[test]
    fn test_void_tag_with_slash_in_attribute_value() {
        assert_eq!(
            sanitize(r#"<p>a<br class="a/b">b</p>"#).unwrap(),
            r#"<p>a<br class="a/b"/>b</p>"#
        );
    }

    #[test]
    fn test_entities_preserved() {
        let html = "<p>a &amp; b &lt;tag&gt;</p>";
        assert_eq!(sanitize(html).unwrap(), html);
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            r#"<p>a<br>b</p><style>gone</style><span style="color: red; float: left">x</span>"#,
            r#"<ac:image><ri:url ri:value="https://h/download/attachments/12345/o.png?version=6" /></ac:image>"#,
            "<div><font size=\"2\">text</font><!-- c --><hr></div>",
        ];
        for input in inputs {
            let once = sanitize(input).unwrap();
            let twice = sanitize(&once).unwrap();
            assert_eq!(twice, once, "sanitize not idempotent for {input}");
        }
    }

    #[test]
    fn test_output_never_contains_disallowed_tags() {
        let html = "<html><body><iframe src=\"x\"></iframe><p>ok</p><img src=\"y\"></body></html>";
        let out = sanitize(html).unwrap();
        assert!(!out.contains("iframe"));
        assert!(!out.contains("img"));
        assert!(!out.contains("body"));
        assert!(out.contains("<p>ok</p>"));
    }
}
