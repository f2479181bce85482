// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt;

pub(crate) const SVG_NS: &str = "http://www.w3.org/2000/svg";
pub(crate) const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
pub(crate) const XML_NAMESPACE_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// An SVG document.
///
/// Always has exactly one root element.
#[derive(Clone, PartialEq, Debug)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Creates a new document from a root element.
    #[inline]
    pub fn new(root: Element) -> Self {
        Document { root }
    }

    /// Returns the root element.
    #[inline]
    pub fn root_element(&self) -> &Element {
        &self.root
    }

    /// Returns the root element, consuming the document.
    #[inline]
    pub fn into_root_element(self) -> Element {
        self.root
    }
}

/// A qualified XML name, like `svg` or `xlink:href`.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct QName {
    /// Namespace prefix.
    pub prefix: Option<String>,
    /// Local name.
    pub local: String,
}

impl QName {
    /// Creates a name without a prefix.
    pub fn new(local: &str) -> Self {
        QName {
            prefix: None,
            local: local.to_string(),
        }
    }

    /// Creates a prefixed name.
    pub fn prefixed(prefix: &str, local: &str) -> Self {
        QName {
            prefix: Some(prefix.to_string()),
            local: local.to_string(),
        }
    }

    /// Checks that the name equals to a qualified name string.
    pub fn matches(&self, name: &str) -> bool {
        match (self.prefix.as_deref(), name.split_once(':')) {
            (None, None) => self.local == name,
            (Some(prefix), Some((p, local))) => prefix == p && self.local == local,
            _ => false,
        }
    }
}

impl From<&str> for QName {
    fn from(name: &str) -> Self {
        match name.split_once(':') {
            Some((prefix, local)) => QName::prefixed(prefix, local),
            None => QName::new(name),
        }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.prefix {
            Some(ref prefix) => write!(f, "{}:{}", prefix, self.local),
            None => write!(f, "{}", self.local),
        }
    }
}

/// A namespace declaration, like `xmlns:xlink="http://www.w3.org/1999/xlink"`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Namespace {
    /// Declared prefix. `None` for the default namespace.
    pub prefix: Option<String>,
    /// Namespace URI.
    pub uri: String,
}

/// An attribute.
#[derive(Clone, PartialEq, Debug)]
pub struct Attribute {
    /// Attribute's name.
    pub name: QName,
    /// Attribute's value.
    pub value: String,
}

/// A document node.
#[derive(Clone, PartialEq, Debug)]
pub enum Node {
    /// An element.
    Element(Element),
    /// A text node.
    Text(String),
    /// A comment.
    Comment(String),
}

impl From<Element> for Node {
    #[inline]
    fn from(e: Element) -> Self {
        Node::Element(e)
    }
}

/// An element that owns its attributes and children.
#[derive(Clone, PartialEq, Debug)]
pub struct Element {
    name: QName,
    namespaces: Vec<Namespace>,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
}

impl Element {
    /// Creates a new element without attributes and children.
    ///
    /// `name` can be prefixed, like `svg:g`.
    pub fn new(name: &str) -> Self {
        Element {
            name: QName::from(name),
            namespaces: Vec::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Declares a namespace on this element.
    pub fn with_namespace(mut self, prefix: Option<&str>, uri: &str) -> Self {
        self.add_namespace(prefix, uri);
        self
    }

    /// Sets an attribute.
    pub fn with_attribute<V: Into<String>>(mut self, name: &str, value: V) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Appends a child.
    pub fn with_child<N: Into<Node>>(mut self, child: N) -> Self {
        self.append_child(child);
        self
    }

    /// Declares a namespace on this element.
    ///
    /// Replaces an existing declaration with the same prefix.
    pub fn add_namespace(&mut self, prefix: Option<&str>, uri: &str) {
        let ns = Namespace {
            prefix: prefix.map(str::to_string),
            uri: uri.to_string(),
        };

        match self.namespaces.iter_mut().find(|n| n.prefix == ns.prefix) {
            Some(existing) => *existing = ns,
            None => self.namespaces.push(ns),
        }
    }

    /// Sets an attribute.
    ///
    /// Replaces the value of an existing attribute with the same name
    /// and keeps its position.
    pub fn set_attribute<V: Into<String>>(&mut self, name: &str, value: V) {
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name.matches(name)) {
            Some(attr) => attr.value = value,
            None => self.attributes.push(Attribute {
                name: QName::from(name),
                value,
            }),
        }
    }

    /// Removes an attribute and returns its value.
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let idx = self.attributes.iter().position(|a| a.name.matches(name))?;
        Some(self.attributes.remove(idx).value)
    }

    /// Appends a child.
    #[inline]
    pub fn append_child<N: Into<Node>>(&mut self, child: N) {
        self.children.push(child.into());
    }

    /// Returns element's name.
    #[inline]
    pub fn name(&self) -> &QName {
        &self.name
    }

    /// Returns an attribute value.
    ///
    /// `name` is a qualified name, like `width` or `xlink:href`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.matches(name))
            .map(|a| a.value.as_str())
    }

    /// Checks if an attribute is present.
    #[inline]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name.matches(name))
    }

    /// Returns a list of all element's attributes.
    #[inline]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Returns namespaces declared on this element.
    #[inline]
    pub fn namespaces(&self) -> &[Namespace] {
        &self.namespaces
    }

    /// Returns element's children.
    #[inline]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Returns an iterator over child elements.
    pub fn child_elements(&self) -> impl DoubleEndedIterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(ref e) => Some(e),
            _ => None,
        })
    }

    /// Returns an iterator over this element and all its descendant elements
    /// in document order.
    pub fn descendants(&self) -> Descendants {
        Descendants { stack: vec![self] }
    }

    /// Checks that element is a text content element.
    ///
    /// Whitespaces inside such elements are rendered.
    pub(crate) fn is_text_content(&self) -> bool {
        matches!(
            self.name.local.as_str(),
            "text" | "tspan" | "textPath" | "tref"
        )
    }

    /// Checks that element has a text child.
    pub(crate) fn has_text_children(&self) -> bool {
        self.children.iter().any(|n| matches!(n, Node::Text(_)))
    }
}

/// An iterator over descendant elements.
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.child_elements().rev());
        Some(element)
    }
}
