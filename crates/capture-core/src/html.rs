// File: crates/capture-core/src/html.rs
// Summary: Minimal markup tree (tag name, attributes, children) and a pre-escaped HTML newtype.

use std::fmt;

/// Already-escaped markup. Embed verbatim; escaping it again double-encodes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Html(String);

impl Html {
    /// Wrap markup the caller vouches is already escaped.
    pub fn new_unchecked(markup: impl Into<String>) -> Self {
        Html(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Html {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Escape text for use in element content or a double-quoted attribute.
pub fn escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

const VOID_ELEMENTS: &[&str] = &["img", "br", "hr", "input", "meta", "link", "source"];

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Tag(Tag),
    Text(String),
    Html(Html),
}

/// A markup element. Attribute order is insertion order.
#[derive(Clone, Debug, PartialEq)]
pub struct Tag {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), attrs: Vec::new(), children: Vec::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add an attribute. A repeated name is merged into the existing entry,
    /// values joined by a space.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_attr(name, value);
        self
    }

    pub fn push_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == name) {
            Some((_, existing)) => {
                existing.push(' ');
                existing.push_str(&value);
            }
            None => self.attrs.push((name, value)),
        }
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn child(mut self, node: Node) -> Self {
        self.children.push(node);
        self
    }

    /// Render to markup, escaping attribute values and text children once.
    pub fn to_html(&self) -> Html {
        let mut out = String::new();
        self.write_into(&mut out);
        Html(out)
    }

    fn write_into(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (k, v) in &self.attrs {
            out.push(' ');
            out.push_str(k);
            out.push_str("=\"");
            out.push_str(&escape(v));
            out.push('"');
        }
        out.push('>');
        if VOID_ELEMENTS.contains(&self.name.as_str()) && self.children.is_empty() {
            return;
        }
        for child in &self.children {
            match child {
                Node::Tag(t) => t.write_into(out),
                Node::Text(s) => out.push_str(&escape(s)),
                Node::Html(h) => out.push_str(h.as_str()),
            }
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_html().as_str())
    }
}

impl From<Tag> for Html {
    fn from(tag: Tag) -> Self {
        tag.to_html()
    }
}
