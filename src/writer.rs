// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::Write;
use std::path::{Path, PathBuf};

use xmlwriter::XmlWriter;

use crate::tree::Namespace;
use crate::{Document, Element, Error, Node};

pub use xmlwriter::Indent;

/// XML writing options.
#[derive(Clone, Debug)]
pub struct WriteOptions {
    /// Use single quote marks instead of double quote.
    ///
    /// # Examples
    ///
    /// Before:
    ///
    /// ```text
    /// <rect fill="red"/>
    /// ```
    ///
    /// After:
    ///
    /// ```text
    /// <rect fill='red'/>
    /// ```
    ///
    /// Default: disabled
    pub use_single_quote: bool,

    /// Set XML nodes indention.
    ///
    /// Elements with a text content are never indented.
    ///
    /// Default: 4 spaces
    pub indent: Indent,

    /// Set XML attributes indention.
    ///
    /// Default: `None`
    pub attributes_indent: Indent,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            use_single_quote: false,
            indent: Indent::Spaces(4),
            attributes_indent: Indent::None,
        }
    }
}

impl Document {
    /// Writes `Document` to an SVG string.
    #[allow(clippy::inherent_to_string)]
    pub fn to_string(&self, opt: &WriteOptions) -> String {
        let mut xml = XmlWriter::new(xmlwriter::Options {
            use_single_quote: opt.use_single_quote,
            indent: opt.indent,
            attributes_indent: opt.attributes_indent,
        });

        let mut scope = Vec::new();
        write_element(self.root_element(), &mut scope, false, opt, &mut xml);
        xml.end_document()
    }

    /// Writes `Document` into a byte stream.
    pub fn write_to<W: Write>(&self, mut writer: W, opt: &WriteOptions) -> std::io::Result<()> {
        writer.write_all(self.to_string(opt).as_bytes())?;
        writer.flush()
    }

    /// Saves `Document` as a new `<prefix>XXXXXX.svg` file inside `dir`.
    ///
    /// The file is kept only when it was completely written.
    /// Otherwise it will be removed and an error returned.
    pub fn save_in(&self, dir: &Path, prefix: &str, opt: &WriteOptions) -> Result<PathBuf, Error> {
        let mut file = tempfile::Builder::new()
            .prefix(prefix)
            .suffix(".svg")
            .tempfile_in(dir)
            .map_err(Error::WritingFailed)?;

        self.write_to(&mut file, opt).map_err(Error::WritingFailed)?;
        file.as_file().sync_all().map_err(Error::WritingFailed)?;

        let (_, path) = file.keep().map_err(|e| Error::WritingFailed(e.error))?;
        Ok(path)
    }
}

fn write_element<'a>(
    element: &'a Element,
    scope: &mut Vec<&'a Namespace>,
    preserve_whitespaces: bool,
    opt: &WriteOptions,
    xml: &mut XmlWriter,
) {
    xml.start_element(&element.name().to_string());

    let scope_len = scope.len();
    for ns in element.namespaces() {
        let bound = scope
            .iter()
            .rev()
            .find(|n| n.prefix == ns.prefix)
            .map(|n| n.uri.as_str());

        if bound == Some(ns.uri.as_str()) {
            continue;
        }

        let name = match ns.prefix {
            Some(ref prefix) => format!("xmlns:{}", prefix),
            None => "xmlns".to_string(),
        };
        write_attribute(&name, &ns.uri, opt, xml);
        scope.push(ns);
    }

    for attr in element.attributes() {
        write_attribute(&attr.name.to_string(), &attr.value, opt, xml);
    }

    // Indention would alter a mixed content and a text layout.
    let preserve = !preserve_whitespaces
        && (element.has_text_children() || element.is_text_content());
    if preserve {
        xml.set_preserve_whitespaces(true);
    }

    for child in element.children() {
        match child {
            Node::Element(ref e) => {
                write_element(e, scope, preserve_whitespaces || preserve, opt, xml);
            }
            Node::Text(ref text) => xml.write_text(&text.replace('&', "&amp;")),
            Node::Comment(ref text) => xml.write_comment(text),
        }
    }

    xml.end_element();

    if preserve {
        xml.set_preserve_whitespaces(false);
    }

    scope.truncate(scope_len);
}

fn write_attribute(name: &str, value: &str, opt: &WriteOptions, xml: &mut XmlWriter) {
    let quote = if opt.use_single_quote { '\'' } else { '"' };
    xml.write_attribute_raw(name, |buf| {
        let mut tmp = [0; 4];
        for c in value.chars() {
            match c {
                '&' => buf.extend_from_slice(b"&amp;"),
                '<' => buf.extend_from_slice(b"&lt;"),
                '"' if quote == '"' => buf.extend_from_slice(b"&quot;"),
                '\'' if quote == '\'' => buf.extend_from_slice(b"&apos;"),
                // Otherwise will be normalized into spaces during parsing.
                '\n' => buf.extend_from_slice(b"&#10;"),
                '\r' => buf.extend_from_slice(b"&#13;"),
                '\t' => buf.extend_from_slice(b"&#9;"),
                _ => buf.extend_from_slice(c.encode_utf8(&mut tmp).as_bytes()),
            }
        }
    });
}
