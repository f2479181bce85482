// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use svgtypes::{Length, LengthUnit as Unit};

use crate::Options;

/// Converts a raw `width`/`height` attribute value into a unitless number
/// suitable for a `viewBox`.
///
/// Plain numbers are returned verbatim. Returns `None` for invalid,
/// zero or negative values.
pub(crate) fn convert_extent(value: &str, opt: &Options) -> Option<String> {
    let value = value.trim();
    let length = Length::from_str(value).ok()?;
    let n = length.number;
    if !(n.is_finite() && n > 0.0) {
        return None;
    }

    let n = match length.unit {
        Unit::None => return Some(value.to_string()),
        Unit::Px => n,
        Unit::Em => n * opt.font_size,
        Unit::Ex => n * opt.font_size / 2.0,
        Unit::In => n * opt.dpi,
        Unit::Cm => n * opt.dpi / 2.54,
        Unit::Mm => n * opt.dpi / 25.4,
        Unit::Pt => n * opt.dpi / 72.0,
        Unit::Pc => n * opt.dpi / 6.0,
        // The source will be sized relative to the wrapper viewport,
        // so `100%` has to cover exactly `100` user units.
        Unit::Percent => n,
    };

    if n.is_finite() && n > 0.0 {
        Some(format_number(n))
    } else {
        None
    }
}

fn format_number(n: f64) -> String {
    let mut s = format!("{:.6}", n);
    while s.ends_with('0') {
        s.pop();
    }

    if s.ends_with('.') {
        s.pop();
    }

    s
}
