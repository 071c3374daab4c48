//! Allowlists for Confluence storage format.
//!
//! Tags, attributes, and styles permitted by the storage format according to
//! <https://confluence.atlassian.com/doc/confluence-storage-format-790796544.html>.

/// Tags permitted in sanitized output.
pub const ALLOWED_TAGS: &[&str] = &[
    "a",
    "ac:image",
    "ac:layout",
    "ac:layout-cell",
    "ac:layout-section",
    "ac:link",
    "ac:parameter",
    "ac:plain-text-body",
    "ac:plain-text-link-body",
    "ac:rich-text-body",
    "ac:structured-macro",
    "ac:task-list",
    "big",
    "blockquote",
    "br",
    "code",
    "div",
    "em",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "hr",
    "i",
    "li",
    "ol",
    "p",
    "pre",
    "ri:attachment",
    "ri:page",
    "ri:url",
    "small",
    "span",
    "strong",
    "sub",
    "sup",
    "table",
    "tbody",
    "td",
    "tfoot",
    "th",
    "thead",
    "tr",
    "tt",
    "u",
    "ul",
];

/// Attributes permitted on every tag.
pub const WILDCARD_ATTRS: &[&str] = &["class"];

/// Attributes permitted per tag, in addition to [`WILDCARD_ATTRS`].
pub const ALLOWED_ATTRS: &[(&str, &[&str])] = &[
    ("a", &["href", "title"]),
    ("ac:image", &["ac:alt", "ac:title", "ac:width"]),
    ("ac:layout-section", &["ac:type"]),
    ("ac:link", &["ac:anchor"]),
    ("ac:parameter", &["ac:name"]),
    ("ac:structured-macro", &["ac:name", "ac:schema-version"]),
    ("ri:attachment", &["ri:filename"]),
    ("ri:page", &["ri:content-title"]),
    ("ri:url", &["ri:value"]),
    ("span", &["style"]),
];

/// Inline style properties permitted in `style` attribute values.
pub const ALLOWED_STYLES: &[&str] = &["color", "text-align", "text-decoration"];

/// Tags removed along with all of their descendants.
pub const REMOVED_TAGS: &[&str] = &["style", "script"];

/// Empty-element tags always written in self-closed form.
pub const VOID_TAGS: &[&str] = &["br", "hr"];

/// Check whether a tag is permitted in output.
pub fn tag_allowed(tag: &str) -> bool {
    ALLOWED_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag))
}

/// Check whether a tag's entire subtree must be removed.
pub fn tag_removed(tag: &str) -> bool {
    REMOVED_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag))
}

/// Check whether an attribute is permitted on the given tag.
pub fn attr_allowed(tag: &str, attr: &str) -> bool {
    if WILDCARD_ATTRS.iter().any(|a| a.eq_ignore_ascii_case(attr)) {
        return true;
    }
    ALLOWED_ATTRS
        .iter()
        .find(|(t, _)| t.eq_ignore_ascii_case(tag))
        .is_some_and(|(_, attrs)| attrs.iter().any(|a| a.eq_ignore_ascii_case(attr)))
}

/// Check whether a tag is an empty element written in self-closed form.
pub fn tag_void(tag: &str) -> bool {
    VOID_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag))
}

/// Check whether an inline style property is permitted.
pub fn style_allowed(property: &str) -> bool {
    ALLOWED_STYLES
        .iter()
        .any(|s| s.eq_ignore_ascii_case(property))
}
