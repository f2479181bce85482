// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`northarrow` builds north-arrow graphics for map rendering.

Given a source graphic, a target size and a rotation angle it produces a new SVG file
of exactly the requested size, with the source scaled to fill the canvas and rotated
clockwise around the canvas center.

SVG sources are embedded as is, without rasterization. Raster sources (PNG, JPEG, GIF
and WebP) are embedded as an `image` element.

## Example

```no_run
let size = northarrow::Size::new(300, 300).unwrap();
let rotation = northarrow::Rotation::from_degrees(90.0).unwrap();
let opt = northarrow::Options {
    resources_dir: Some("symbols".into()),
    ..northarrow::Options::default()
};

let path = northarrow::create(
    size,
    "arrow.svg",
    rotation,
    std::path::Path::new("/tmp"),
    &opt,
    &northarrow::NoNetwork,
)
.unwrap();
println!("{}", path.display());
```
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(missing_copy_implementations)]

use std::path::{Path, PathBuf};

mod acquire;
mod compose;
mod error;
mod geom;
mod options;
mod parser;
pub mod raster;
mod tree;
mod units;
mod writer;

#[cfg(feature = "http")]
pub use acquire::ReqwestClient;
pub use acquire::{fetch, HttpClient, NoNetwork};
pub use compose::{compose, Sizing};
pub use error::{AcquisitionError, Error};
pub use geom::{Rotation, Size};
pub use options::Options;
pub use parser::decompress_svgz;
pub use tree::{Attribute, Descendants, Document, Element, Namespace, Node, QName};
pub use writer::{Indent, WriteOptions};

pub use roxmltree;
pub use svgtypes;
pub use url::Url;

/// A source graphic format.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GraphicFormat {
    /// SVG or SVGZ.
    Vector,
    /// Any other image.
    Raster,
}

impl GraphicFormat {
    /// Detects a graphic format by a file name or URL.
    ///
    /// Only the URL path is checked, so query and fragment are ignored.
    pub fn from_reference(reference: &str) -> Self {
        let reference = reference.trim();
        let name = match Url::parse(reference) {
            Ok(url) => url.path().to_lowercase(),
            Err(_) => reference.to_lowercase(),
        };

        if name.ends_with("svg") || name.ends_with("svgz") {
            GraphicFormat::Vector
        } else {
            GraphicFormat::Raster
        }
    }
}

/// Creates a north-arrow graphic.
///
/// Loads the graphic referenced by `reference` (see [`fetch`]), scales it to `size`,
/// rotates it by `rotation` and saves the result as a new SVG file inside `working_dir`.
///
/// Returns the path to the created file. No file is created on error.
pub fn create(
    size: Size,
    reference: &str,
    rotation: Rotation,
    working_dir: &Path,
    opt: &Options,
    http: &dyn HttpClient,
) -> Result<PathBuf, Error> {
    let format = GraphicFormat::from_reference(reference);
    let data = fetch(reference, opt, http)?;
    let doc = compose_data(&data, format, size, rotation, opt)?;
    let path = doc.save_in(working_dir, &opt.file_prefix, &opt.write)?;
    log::debug!("'{}' saved to '{}'.", reference.trim(), path.display());
    Ok(path)
}

/// Creates a north-arrow document from an already loaded graphic.
pub fn compose_data(
    data: &[u8],
    format: GraphicFormat,
    size: Size,
    rotation: Rotation,
    opt: &Options,
) -> Result<Document, Error> {
    match format {
        GraphicFormat::Vector => {
            let source = Document::from_data(data)?;
            compose(&source, size, rotation, opt)
        }
        GraphicFormat::Raster => raster::compose(data, size, rotation),
    }
}
