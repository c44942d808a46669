//! Tag tree and markup serializer
//!
//! Inputs are built as a small tree of [`Node`]s and serialized with
//! `Display`. Attributes live in a `BTreeMap`, so they always come out in
//! alphabetical order and two renders of the same tree are byte-identical.

use std::collections::BTreeMap;
use std::fmt;

/// Attributes of a tag
pub type Attrs = BTreeMap<String, String>;

const VOID_ELEMENTS: &[&str] = &["input", "br", "hr", "img", "meta", "link"];

/// An element with attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Element name
    pub name: String,
    /// Attributes, serialized alphabetically
    pub attrs: Attrs,
    /// Child nodes
    pub children: Vec<Node>,
}

impl Tag {
    /// Create an element without attributes or children
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Attrs::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Set an attribute when `value` is present
    #[must_use]
    pub fn attr_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Set a boolean attribute (`checked="checked"`) when `on` is true
    #[must_use]
    pub fn flag(self, name: &str, on: bool) -> Self {
        if on {
            self.attr(name, name)
        } else {
            self
        }
    }

    /// Append a child
    #[must_use]
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Append several children
    #[must_use]
    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.name.as_str())
    }
}

/// A piece of markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element
    Element(Tag),
    /// Escaped text
    Text(String),
    /// Siblings without a surrounding element
    Fragment(Vec<Node>),
}

impl Node {
    /// Build an element node
    #[must_use]
    pub fn tag(name: impl Into<String>, attrs: Attrs, children: Vec<Self>) -> Self {
        Self::Element(Tag {
            name: name.into(),
            attrs,
            children,
        })
    }

    /// Build a text node
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Whether the node renders to nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Element(_) => false,
            Self::Text(text) => text.is_empty(),
            Self::Fragment(nodes) => nodes.iter().all(Self::is_empty),
        }
    }
}

impl From<Tag> for Node {
    fn from(tag: Tag) -> Self {
        Self::Element(tag)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for (name, value) in &self.attrs {
            write!(f, " {name}=\"{}\"", escape_attr(value))?;
        }
        if self.is_void() {
            return f.write_str("/>");
        }
        f.write_str(">")?;
        for child in &self.children {
            write!(f, "{child}")?;
        }
        write!(f, "</{}>", self.name)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(tag) => write!(f, "{tag}"),
            Self::Text(text) => f.write_str(&escape_html(text)),
            Self::Fragment(nodes) => nodes.iter().try_for_each(|node| write!(f, "{node}")),
        }
    }
}

/// Escape a string for use in HTML attribute values
#[must_use]
pub fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape a string for use in HTML content
#[must_use]
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_are_alphabetical() {
        let input = Tag::new("input")
            .attr("value", "b")
            .attr("type", "text")
            .attr("name", "album[name]")
            .attr("id", "album_name");
        assert_eq!(
            input.to_string(),
            r#"<input id="album_name" name="album[name]" type="text" value="b"/>"#
        );
    }

    #[test]
    fn test_nested_elements_and_text() {
        let label = Tag::new("label")
            .child("Name: ")
            .child(Tag::new("textarea").attr("id", "x").child("b"));
        assert_eq!(
            label.to_string(),
            r#"<label>Name: <textarea id="x">b</textarea></label>"#
        );
    }

    #[test]
    fn test_flags_and_optional_attrs() {
        let checked = Tag::new("input").flag("checked", true).flag("disabled", false);
        assert_eq!(checked.to_string(), r#"<input checked="checked"/>"#);

        let none = Tag::new("input").attr_opt("value", None::<String>);
        assert_eq!(none.to_string(), "<input/>");
    }

    #[test]
    fn test_fragment_has_no_wrapper() {
        let fragment = Node::Fragment(vec![
            Node::text("Artist: "),
            Tag::new("label").child(" a").into(),
        ]);
        assert_eq!(fragment.to_string(), "Artist: <label> a</label>");
        assert!(Node::Fragment(vec![Node::text("")]).is_empty());
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(Node::text("\"q\"").to_string(), "\"q\"");
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr("\"test\""), "&quot;test&quot;");
        assert_eq!(
            Tag::new("option").attr("value", "a&b").to_string(),
            r#"<option value="a&amp;b"></option>"#
        );
    }
}
