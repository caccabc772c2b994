//! Minimal HTML document model for page assembly.
//!
//! The storefront assembles pages from static HTML partials and then patches
//! a per-request copy: replacing the content of an element by id, toggling
//! classes, and setting attributes. This module provides exactly those
//! operations over the raw markup, without building a full DOM tree.
//!
//! Start tags are located with a regex scanner; the matching end tag of an
//! element is found by counting nested tags of the same name. Comments and
//! the contents of `script` and `style` elements are skipped, and quoted
//! attribute values may contain `>`.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Regex for matching comments, start tags and end tags.
///
/// Captures: 1 = `/` for end tags, 2 = tag name, 3 = attribute text,
/// 4 = `/` for self-closing tags. Comments match with no captures.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)<!--.*?-->|<(/)?([A-Za-z][A-Za-z0-9-]*)((?:[^>"']|"[^"]*"|'[^']*')*?)(/)?>"#,
    )
    .expect("Invalid regex")
});

/// Regex for extracting `key="value"`, `key='value'`, `key=value` and bare attributes.
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][A-Za-z0-9_:.-]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .expect("Invalid regex")
});

/// Elements that never have content or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose content is text, not markup.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Errors from document patching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// No element carries the requested id.
    #[error("no element with id '{0}'")]
    NotFound(String),
    /// The element is void, self-closing, or unterminated and has no content range.
    #[error("element '{0}' has no content to replace")]
    NoContent(String),
}

/// A tag found by the scanner.
#[derive(Debug, Clone)]
struct RawTag {
    name: String,
    closing: bool,
    self_closing: bool,
    span: Range<usize>,
    attrs: Vec<(String, String)>,
}

/// A start tag together with the location of its content.
#[derive(Debug, Clone)]
pub struct Element {
    /// Lowercased tag name.
    pub name: String,
    /// Attributes in source order. Bare attributes have an empty value.
    pub attrs: Vec<(String, String)>,
    self_closing: bool,
    open: Range<usize>,
    inner: Option<Range<usize>>,
}

impl Element {
    /// Value of an attribute, if present.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The `id` attribute.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Value of a `data-*` attribute, e.g. `data("stage")` for `data-stage`.
    #[must_use]
    pub fn data(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(name, _)| {
                name.strip_prefix("data-")
                    .is_some_and(|rest| rest.eq_ignore_ascii_case(key))
            })
            .map(|(_, value)| value.as_str())
    }

    /// Whitespace-separated entries of the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or_default().split_whitespace()
    }

    /// Whether the `class` attribute contains `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    fn with_classes(&self, classes: &[&str]) -> String {
        let mut attrs = self.attrs.clone();
        let joined = classes.join(" ");
        match attrs.iter_mut().find(|(key, _)| key.eq_ignore_ascii_case("class")) {
            Some((_, value)) => *value = joined,
            None => attrs.push(("class".to_string(), joined)),
        }
        render_start_tag(&self.name, &attrs, self.self_closing)
    }
}

/// An HTML document that can be queried and patched in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    html: String,
}

impl Document {
    /// Wrap raw markup.
    #[must_use]
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    /// The current markup.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.html
    }

    /// Consume the document and return its markup.
    #[must_use]
    pub fn into_html(self) -> String {
        self.html
    }

    /// All elements in document order.
    #[must_use]
    pub fn elements(&self) -> Vec<Element> {
        let tags = scan(&self.html);
        tags.iter()
            .enumerate()
            .filter(|(_, tag)| !tag.closing)
            .map(|(index, tag)| Element {
                name: tag.name.clone(),
                attrs: tag.attrs.clone(),
                self_closing: tag.self_closing,
                open: tag.span.clone(),
                inner: matching_inner(&tags, index),
            })
            .collect()
    }

    /// The first element with the given id.
    #[must_use]
    pub fn get_element_by_id(&self, id: &str) -> Option<Element> {
        self.elements().into_iter().find(|e| e.id() == Some(id))
    }

    /// Whether an element with the given id exists.
    #[must_use]
    pub fn contains_id(&self, id: &str) -> bool {
        self.get_element_by_id(id).is_some()
    }

    /// All elements carrying `class`.
    #[must_use]
    pub fn elements_with_class(&self, class: &str) -> Vec<Element> {
        self.elements()
            .into_iter()
            .filter(|e| e.has_class(class))
            .collect()
    }

    /// All elements with the given tag name.
    #[must_use]
    pub fn elements_by_tag(&self, name: &str) -> Vec<Element> {
        self.elements()
            .into_iter()
            .filter(|e| e.name.eq_ignore_ascii_case(name))
            .collect()
    }

    /// The content between an element's start and end tags.
    #[must_use]
    pub fn inner_html(&self, element: &Element) -> Option<&str> {
        element
            .inner
            .as_ref()
            .and_then(|range| self.html.get(range.clone()))
    }

    /// The content of the element with the given id.
    #[must_use]
    pub fn inner_html_by_id(&self, id: &str) -> Option<&str> {
        let element = self.get_element_by_id(id)?;
        let range = element.inner?;
        self.html.get(range)
    }

    /// Replace the content of the element with the given id.
    ///
    /// # Errors
    ///
    /// Returns `DomError::NotFound` if no element has the id, or
    /// `DomError::NoContent` if the element cannot hold content.
    pub fn set_inner_html(&mut self, id: &str, html: &str) -> Result<(), DomError> {
        let element = self.require(id)?;
        let inner = element
            .inner
            .ok_or_else(|| DomError::NoContent(id.to_string()))?;
        self.html.replace_range(inner, html);
        Ok(())
    }

    /// Set (or add) an attribute on the element with the given id.
    ///
    /// The value is escaped for use inside a double-quoted attribute.
    ///
    /// # Errors
    ///
    /// Returns `DomError::NotFound` if no element has the id.
    pub fn set_attribute(&mut self, id: &str, name: &str, value: &str) -> Result<(), DomError> {
        let element = self.require(id)?;
        let mut attrs = element.attrs.clone();
        let escaped = escape_attr(value);
        match attrs.iter_mut().find(|(key, _)| key.eq_ignore_ascii_case(name)) {
            Some((_, existing)) => *existing = escaped,
            None => attrs.push((name.to_string(), escaped)),
        }
        let tag = render_start_tag(&element.name, &attrs, element.self_closing);
        self.html.replace_range(element.open, &tag);
        Ok(())
    }

    /// Add a class to the element with the given id (no-op if present).
    ///
    /// # Errors
    ///
    /// Returns `DomError::NotFound` if no element has the id.
    pub fn add_class(&mut self, id: &str, class: &str) -> Result<(), DomError> {
        self.set_class(id, class, true)
    }

    /// Remove a class from the element with the given id (no-op if absent).
    ///
    /// # Errors
    ///
    /// Returns `DomError::NotFound` if no element has the id.
    pub fn remove_class(&mut self, id: &str, class: &str) -> Result<(), DomError> {
        self.set_class(id, class, false)
    }

    /// Add or remove a class on the element with the given id.
    ///
    /// # Errors
    ///
    /// Returns `DomError::NotFound` if no element has the id.
    pub fn set_class(&mut self, id: &str, class: &str, present: bool) -> Result<(), DomError> {
        let element = self.require(id)?;
        if let Some(tag) = class_edit(&element, class, present) {
            self.html.replace_range(element.open, &tag);
        }
        Ok(())
    }

    /// Add or remove `class` on every element for which `decide` returns a
    /// value (`Some(true)` adds, `Some(false)` removes, `None` leaves alone).
    ///
    /// Returns the number of elements `decide` selected.
    pub fn set_class_where<F>(&mut self, class: &str, mut decide: F) -> usize
    where
        F: FnMut(&Element) -> Option<bool>,
    {
        let mut selected = 0;
        let mut edits = Vec::new();
        for element in self.elements() {
            if let Some(present) = decide(&element) {
                selected += 1;
                if let Some(tag) = class_edit(&element, class, present) {
                    edits.push((element.open, tag));
                }
            }
        }

        // Apply back to front so earlier spans stay valid.
        edits.sort_by(|(a, _), (b, _)| b.start.cmp(&a.start));
        for (span, tag) in edits {
            self.html.replace_range(span, &tag);
        }
        selected
    }

    fn require(&self, id: &str) -> Result<Element, DomError> {
        self.get_element_by_id(id)
            .ok_or_else(|| DomError::NotFound(id.to_string()))
    }
}

/// Escape text for a double-quoted attribute value or element content.
#[must_use]
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// The rewritten start tag for a class change, or `None` if nothing changes.
fn class_edit(element: &Element, class: &str, present: bool) -> Option<String> {
    let has = element.has_class(class);
    if has == present {
        return None;
    }
    let classes: Vec<&str> = if present {
        element.classes().chain(std::iter::once(class)).collect()
    } else {
        element.classes().filter(|c| *c != class).collect()
    };
    Some(element.with_classes(&classes))
}

fn scan(html: &str) -> Vec<RawTag> {
    let mut tags = Vec::new();
    // Name of the open raw-text element, if any.
    let mut raw_text: Option<String> = None;

    for caps in TAG_RE.captures_iter(html) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(2)) else {
            continue;
        };
        let name = name.as_str().to_ascii_lowercase();
        let closing = caps.get(1).is_some();

        if let Some(open) = &raw_text {
            if !(closing && *open == name) {
                continue;
            }
            raw_text = None;
        } else if !closing && RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
            raw_text = Some(name.clone());
        }

        let attr_text = caps.get(3).map_or("", |m| m.as_str());
        tags.push(RawTag {
            name,
            closing,
            self_closing: caps.get(4).is_some(),
            span: whole.range(),
            attrs: parse_attrs(attr_text),
        });
    }
    tags
}

fn parse_attrs(text: &str) -> Vec<(String, String)> {
    ATTR_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str().to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or_else(String::new, |m| m.as_str().to_string());
            Some((name, value))
        })
        .collect()
}

fn matching_inner(tags: &[RawTag], index: usize) -> Option<Range<usize>> {
    let open = tags.get(index)?;
    if open.self_closing || VOID_ELEMENTS.contains(&open.name.as_str()) {
        return None;
    }

    let mut depth = 0usize;
    for tag in tags.iter().skip(index + 1) {
        if tag.name != open.name {
            continue;
        }
        if tag.closing {
            if depth == 0 {
                return Some(open.span.end..tag.span.start);
            }
            depth -= 1;
        } else if !tag.self_closing {
            depth += 1;
        }
    }
    None
}

fn render_start_tag(name: &str, attrs: &[(String, String)], self_closing: bool) -> String {
    let mut tag = format!("<{name}");
    for (key, value) in attrs {
        tag.push(' ');
        tag.push_str(key);
        tag.push_str("=\"");
        tag.push_str(&value.replace('"', "&quot;"));
        tag.push('"');
    }
    if self_closing {
        tag.push_str(" /");
    }
    tag.push('>');
    tag
}
