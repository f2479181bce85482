// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Raster images embedding.

use base64::Engine;

use crate::compose::{canvas, rotation_group};
use crate::tree::XLINK_NS;
use crate::{Document, Element, Error, Rotation, Size};

/// Embeds a raster image into a new SVG document of the specified size
/// and rotates it around the canvas center.
///
/// The image is stretched to fill the whole canvas, just like an SVG graphic
/// with an explicit size.
///
/// Supports PNG, JPEG, GIF and WebP.
pub fn compose(data: &[u8], size: Size, rotation: Rotation) -> Result<Document, Error> {
    let mime = match imagesize::image_type(data).map_err(|_| Error::UnsupportedImage)? {
        imagesize::ImageType::Png => "png",
        imagesize::ImageType::Jpeg => "jpeg",
        imagesize::ImageType::Gif => "gif",
        imagesize::ImageType::Webp => "webp",
        _ => return Err(Error::UnsupportedImage),
    };

    let image_size = imagesize::blob_size(data).map_err(|_| Error::UnsupportedImage)?;
    if image_size.width == 0 || image_size.height == 0 {
        return Err(Error::UnsupportedImage);
    }

    log::debug!(
        "Scaling a {}x{} {} image to {}.",
        image_size.width,
        image_size.height,
        mime,
        size
    );

    let href = format!(
        "data:image/{};base64,{}",
        mime,
        base64::engine::general_purpose::STANDARD.encode(data)
    );

    let image = Element::new("image")
        .with_attribute("width", size.width().to_string())
        .with_attribute("height", size.height().to_string())
        .with_attribute("preserveAspectRatio", "none")
        .with_attribute("xlink:href", href);

    let root = canvas(size)
        .with_namespace(Some("xlink"), XLINK_NS)
        .with_child(rotation_group(size, rotation).with_child(image));

    Ok(Document::new(root))
}
