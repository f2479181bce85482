// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::WriteOptions;

/// Processing options.
#[derive(Clone, Debug)]
pub struct Options {
    /// A trusted directory to load graphics from.
    ///
    /// References that resolve to a file inside this directory are read from disk.
    /// Everything else must be an absolute `http`/`https` URL.
    ///
    /// Default: `None`
    pub resources_dir: Option<std::path::PathBuf>,

    /// Target DPI.
    ///
    /// Impacts units conversion of the source `width` and `height`.
    ///
    /// Default: 96.0
    pub dpi: f64,

    /// A default font size.
    ///
    /// Used to convert `em` and `ex` units of the source `width` and `height`.
    ///
    /// Default: 12
    pub font_size: f64,

    /// Output file name prefix.
    ///
    /// Default: `north-arrow-`
    pub file_prefix: String,

    /// XML writing options.
    pub write: WriteOptions,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            resources_dir: None,
            dpi: 96.0,
            font_size: 12.0,
            file_prefix: "north-arrow-".to_string(),
            write: WriteOptions::default(),
        }
    }
}
