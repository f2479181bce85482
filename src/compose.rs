// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Embedding of an SVG graphic into a new canvas.

The requested size is set on the outermost `svg`, the rotation is applied to a `g`
container and the scaling depends on how the source is sized.

When the source has `width` and `height`, it's wrapped into a nested `svg` that
fills the whole canvas and maps the source size via `viewBox`:

```text
<svg width="300" height="300">
    <g transform="rotate(90.0 150 150)">
        <svg width="100%" height="100%" viewBox="0 0 100 100">
            <svg width="100" height="100"/>
        </svg>
    </g>
</svg>
```

Otherwise the source already sizes itself to its container:

```text
<svg width="300" height="300">
    <g transform="rotate(90.0 150 150)">
        <svg viewBox="0 0 61.06 91.83"/>
    </g>
</svg>
```
*/

use std::str::FromStr;

use crate::tree::SVG_NS;
use crate::{units, Document, Element, Error, Options, Rotation, Size};

/// A source graphic sizing.
#[derive(Clone, PartialEq, Debug)]
pub enum Sizing {
    /// The root element has a usable `width` and `height`.
    ///
    /// Values are unitless numbers ready to be used in a `viewBox`.
    Explicit {
        /// Source width.
        width: String,
        /// Source height.
        height: String,
    },
    /// The root element is sized by its container.
    Intrinsic {
        /// The root element has a valid `viewBox`.
        has_view_box: bool,
    },
}

impl Sizing {
    /// Detects how an SVG root element is sized.
    pub fn detect(root: &Element, opt: &Options) -> Self {
        let width = root.attribute("width").filter(|v| !v.trim().is_empty());
        let height = root.attribute("height").filter(|v| !v.trim().is_empty());

        if let (Some(w), Some(h)) = (width, height) {
            match (units::convert_extent(w, opt), units::convert_extent(h, opt)) {
                (Some(width), Some(height)) => return Sizing::Explicit { width, height },
                _ => {
                    log::warn!(
                        "Invalid graphic size: '{}' x '{}'. Falling back to the container size.",
                        w,
                        h
                    );
                }
            }
        }

        let has_view_box = root
            .attribute("viewBox")
            .and_then(|v| svgtypes::ViewBox::from_str(v).ok())
            .map_or(false, |vb| vb.w > 0.0 && vb.h > 0.0);

        Sizing::Intrinsic { has_view_box }
    }
}

/// Embeds an SVG graphic into a new document of the specified size
/// and rotates it around the canvas center.
///
/// `source` is not modified. Its root element is copied with all descendants.
pub fn compose(
    source: &Document,
    size: Size,
    rotation: Rotation,
    opt: &Options,
) -> Result<Document, Error> {
    let root = source.root_element();
    if root.name().local != "svg" {
        return Err(Error::InvalidRootElement(root.name().to_string()));
    }

    let content = match Sizing::detect(root, opt) {
        Sizing::Explicit { width, height } => {
            log::debug!("Scaling a {}x{} graphic to {}.", width, height, size);
            Element::new("svg")
                .with_attribute("width", "100%")
                .with_attribute("height", "100%")
                .with_attribute("viewBox", format!("0 0 {} {}", width, height))
                .with_child(root.clone())
        }
        Sizing::Intrinsic { has_view_box } => {
            if !has_view_box {
                log::debug!("Graphic has neither a size nor a viewBox.");
            }

            root.clone()
        }
    };

    let canvas = canvas(size).with_child(rotation_group(size, rotation).with_child(content));
    Ok(Document::new(canvas))
}

/// Creates an outermost `svg` element of the specified size.
pub(crate) fn canvas(size: Size) -> Element {
    Element::new("svg")
        .with_namespace(None, SVG_NS)
        .with_attribute("width", size.width().to_string())
        .with_attribute("height", size.height().to_string())
}

/// Creates a `g` element that rotates its content around the canvas center.
pub(crate) fn rotation_group(size: Size, rotation: Rotation) -> Element {
    let (cx, cy) = size.center();
    Element::new("g").with_attribute("transform", format!("rotate({} {} {})", rotation, cx, cy))
}
