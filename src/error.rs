// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

/// List of all errors.
#[derive(Debug)]
pub enum Error {
    /// A graphic cannot be resolved or loaded.
    AcquisitionFailed(AcquisitionError),

    /// Only UTF-8 content are supported.
    NotAnUtf8Str,

    /// Compressed SVG must use the GZip algorithm.
    MalformedGZip,

    /// We do not allow SVG with more than 1024 nested elements.
    ElementsLimitReached,

    /// Failed to parse an SVG data.
    ParsingFailed(roxmltree::Error),

    /// The root element of the parsed document is not `svg`.
    NotAnSvg,

    /// Raster data is not a PNG, JPEG, GIF or WebP image
    /// or its dimensions cannot be read.
    UnsupportedImage,

    /// The source tree cannot be embedded because its root element is not `svg`.
    ///
    /// The parser never produces such a tree.
    InvalidRootElement(String),

    /// Failed to write the output file.
    WritingFailed(std::io::Error),
}

impl From<AcquisitionError> for Error {
    fn from(e: AcquisitionError) -> Self {
        Error::AcquisitionFailed(e)
    }
}

impl From<roxmltree::Error> for Error {
    fn from(e: roxmltree::Error) -> Self {
        Error::ParsingFailed(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::AcquisitionFailed(ref e) => {
                write!(f, "failed to load the graphic cause {}", e)
            }
            Error::NotAnUtf8Str => {
                write!(f, "provided data has not an UTF-8 encoding")
            }
            Error::MalformedGZip => {
                write!(f, "provided data has a malformed GZip content")
            }
            Error::ElementsLimitReached => {
                write!(f, "the maximum SVG elements nesting has been reached")
            }
            Error::ParsingFailed(ref e) => {
                write!(f, "SVG data parsing failed cause {}", e)
            }
            Error::NotAnSvg => {
                write!(f, "the root element is not 'svg'")
            }
            Error::UnsupportedImage => {
                write!(f, "provided data is not a PNG, JPEG, GIF or WebP image")
            }
            Error::InvalidRootElement(ref name) => {
                write!(f, "'{}' cannot be embedded, an 'svg' element is expected", name)
            }
            Error::WritingFailed(ref e) => {
                write!(f, "failed to write the output file cause {}", e)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::AcquisitionFailed(ref e) => Some(e),
            Error::ParsingFailed(ref e) => Some(e),
            Error::WritingFailed(ref e) => Some(e),
            _ => None,
        }
    }
}

/// Graphic loading errors.
#[derive(Debug)]
pub enum AcquisitionError {
    /// A reference is neither an accessible resource nor an absolute URL.
    InvalidReference(String),

    /// Only `http` and `https` URLs can be fetched.
    UnsupportedScheme(String),

    /// Failed to read a file from the resources directory.
    ReadFailed(PathBuf, std::io::Error),

    /// An HTTP request cannot be completed.
    RequestFailed(String),

    /// A server responded with a non-success status code.
    HttpStatus(u16),
}

impl std::fmt::Display for AcquisitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            AcquisitionError::InvalidReference(ref s) => {
                write!(f, "'{}' is neither an accessible file nor an absolute URL", s)
            }
            AcquisitionError::UnsupportedScheme(ref s) => {
                write!(f, "'{}' URLs are not supported", s)
            }
            AcquisitionError::ReadFailed(ref path, ref e) => {
                write!(f, "failed to read '{}' cause {}", path.display(), e)
            }
            AcquisitionError::RequestFailed(ref s) => {
                write!(f, "HTTP request failed cause {}", s)
            }
            AcquisitionError::HttpStatus(code) => {
                write!(f, "server responded with status {}", code)
            }
        }
    }
}

impl std::error::Error for AcquisitionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            AcquisitionError::ReadFailed(_, ref e) => Some(e),
            _ => None,
        }
    }
}
