//! Owned XML element tree.
//!
//! `roxmltree` documents borrow their input text, so the subtrees we keep
//! around (a library's `<library>` node, a schematic's `<part>` nodes) are
//! copied into this small owned form. Only element names, attributes and
//! element children are retained; text and comments are dropped.

use std::borrow::Cow;

use super::{EagleError, EagleResult};

/// An XML element with its attributes and element children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
}

impl Element {
    /// Creates an element with no attributes or children.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Copies a `roxmltree` node and all of its element descendants.
    #[must_use]
    pub fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
        Self {
            name: node.tag_name().name().to_string(),
            attributes: node
                .attributes()
                .map(|a| (a.name().to_string(), a.value().to_string()))
                .collect(),
            children: node
                .children()
                .filter(roxmltree::Node::is_element)
                .map(Self::from_node)
                .collect(),
        }
    }

    /// Returns the tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns an attribute value, if present.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns an attribute value, failing with `MissingAttribute` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the attribute is not present.
    pub fn required_attr(&self, name: &str) -> EagleResult<&str> {
        self.attr(name)
            .ok_or_else(|| EagleError::missing_attribute(&self.name, name))
    }

    /// Returns all element children in document order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Returns the children with the given tag name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Self> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Returns the first child with the given tag name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Returns the first child with the given tag name, failing with
    /// `MissingElement` if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if no such child exists.
    pub fn required_child(&self, name: &str) -> EagleResult<&Self> {
        self.child(name)
            .ok_or_else(|| EagleError::missing_element(&self.name, name))
    }
}

/// Decodes file bytes as UTF-8, falling back to Windows-1252 (a superset of
/// ISO-8859-1) for libraries saved by older EAGLE releases.
#[must_use]
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    std::str::from_utf8(bytes).map_or_else(
        |_| {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded
        },
        Cow::Borrowed,
    )
}

/// Parses XML text, accepting the `<!DOCTYPE eagle SYSTEM "eagle.dtd">`
/// declaration EAGLE writes at the top of every file.
///
/// # Errors
///
/// Returns `Xml` if the text is not well-formed.
pub fn parse_document<'input>(
    location: &str,
    text: &'input str,
) -> EagleResult<roxmltree::Document<'input>> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    roxmltree::Document::parse_with_options(text, options)
        .map_err(|e| EagleError::xml(location, e))
}

/// Walks `path` from `node` through first-matching element children.
///
/// # Errors
///
/// Returns `MissingElement` naming the first step that could not be taken.
pub fn descend<'a, 'input>(
    node: roxmltree::Node<'a, 'input>,
    path: &[&str],
) -> EagleResult<roxmltree::Node<'a, 'input>> {
    let mut current = node;
    for step in path {
        current = current
            .children()
            .find(|c| c.is_element() && c.tag_name().name() == *step)
            .ok_or_else(|| EagleError::missing_element(current.tag_name().name(), *step))?;
    }
    Ok(current)
}
