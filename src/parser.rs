// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::tree::{QName, XML_NAMESPACE_NS};
use crate::{Document, Element, Error, Node};

const NESTING_LIMIT: u32 = 1024;

impl Document {
    /// Parses `Document` from an SVG data.
    ///
    /// Can contain an SVG string or a gzip compressed data.
    pub fn from_data(data: &[u8]) -> Result<Self, Error> {
        if data.starts_with(&[0x1f, 0x8b]) {
            let data = decompress_svgz(data)?;
            let text = std::str::from_utf8(&data).map_err(|_| Error::NotAnUtf8Str)?;
            Self::from_str(text)
        } else {
            let text = std::str::from_utf8(data).map_err(|_| Error::NotAnUtf8Str)?;
            Self::from_str(text)
        }
    }

    /// Parses `Document` from an SVG string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Result<Self, Error> {
        let xml_opt = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };

        let doc =
            roxmltree::Document::parse_with_options(text, xml_opt).map_err(Error::ParsingFailed)?;

        Self::from_xmltree(&doc)
    }

    /// Parses `Document` from `roxmltree::Document`.
    pub fn from_xmltree(doc: &roxmltree::Document) -> Result<Self, Error> {
        let root = doc.root_element();
        if root.tag_name().name() != "svg" {
            return Err(Error::NotAnSvg);
        }

        let root = parse_element(root, false, false, 0)?;
        Ok(Document::new(root))
    }
}

/// Decompresses an SVGZ file.
pub fn decompress_svgz(data: &[u8]) -> Result<Vec<u8>, Error> {
    use std::io::Read;

    let mut decoder = flate2::read::GzDecoder::new(data);
    let mut decoded = Vec::with_capacity(data.len() * 2);
    decoder
        .read_to_end(&mut decoded)
        .map_err(|_| Error::MalformedGZip)?;
    Ok(decoded)
}

fn parse_element(
    node: roxmltree::Node,
    preserve_space: bool,
    in_text: bool,
    depth: u32,
) -> Result<Element, Error> {
    if depth > NESTING_LIMIT {
        return Err(Error::ElementsLimitReached);
    }

    let name = QName {
        prefix: element_prefix(node),
        local: node.tag_name().name().to_string(),
    };
    let mut element = Element::new(&name.to_string());

    for ns in declared_namespaces(node) {
        element.add_namespace(ns.name(), ns.uri());
    }

    for attr in node.attributes() {
        let name = QName {
            prefix: attribute_prefix(node, attr.namespace()),
            local: attr.name().to_string(),
        };
        element.set_attribute(&name.to_string(), attr.value());
    }

    let preserve_space = match node.attribute((XML_NAMESPACE_NS, "space")) {
        Some("preserve") => true,
        Some("default") => false,
        _ => preserve_space,
    };

    // Inside `text` any whitespace is a content.
    let in_text = in_text || element.is_text_content();

    // Whitespaces between elements are formatting, unless the element has a mixed content.
    let keep_text = preserve_space
        || in_text
        || node
            .children()
            .any(|c| c.is_text() && !c.text().unwrap_or("").trim().is_empty());

    for child in node.children() {
        if child.is_element() {
            let child = parse_element(child, preserve_space, in_text, depth + 1)?;
            element.append_child(child);
        } else if child.is_text() {
            if keep_text {
                if let Some(text) = child.text() {
                    element.append_child(Node::Text(text.to_string()));
                }
            }
        } else if child.is_comment() {
            if let Some(text) = child.text() {
                element.append_child(Node::Comment(text.to_string()));
            }
        } else {
            log::debug!("A processing instruction inside '{}' is skipped.", name);
        }
    }

    Ok(element)
}

/// Returns namespaces that are declared on the element itself
/// and not inherited from the parent.
fn declared_namespaces<'a, 'input>(
    node: roxmltree::Node<'a, 'input>,
) -> Vec<&'a roxmltree::Namespace<'input>> {
    let parent = node.parent_element();
    node.namespaces()
        .filter(|ns| ns.uri() != XML_NAMESPACE_NS)
        .filter(|ns| match parent {
            Some(parent) => !parent
                .namespaces()
                .any(|p| p.name() == ns.name() && p.uri() == ns.uri()),
            None => true,
        })
        .collect()
}

fn element_prefix(node: roxmltree::Node) -> Option<String> {
    let uri = node.tag_name().namespace()?;

    // The default namespace wins, so the element keeps its unprefixed name.
    if node
        .namespaces()
        .any(|ns| ns.name().is_none() && ns.uri() == uri)
    {
        return None;
    }

    node.namespaces()
        .find(|ns| ns.uri() == uri)
        .and_then(|ns| ns.name())
        .map(str::to_string)
}

fn attribute_prefix(node: roxmltree::Node, uri: Option<&str>) -> Option<String> {
    let uri = uri?;
    if uri == XML_NAMESPACE_NS {
        return Some("xml".to_string());
    }

    // Attributes are never in the default namespace.
    node.namespaces()
        .find(|ns| ns.name().is_some() && ns.uri() == uri)
        .and_then(|ns| ns.name())
        .map(str::to_string)
}
