// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt;

/// A target canvas size in pixels.
///
/// Width and height are guaranteed to be > 0.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    width: u32,
    height: u32,
}

impl Size {
    /// Creates a new `Size` from values.
    #[inline]
    pub fn new(width: u32, height: u32) -> Option<Self> {
        if width > 0 && height > 0 {
            Some(Size { width, height })
        } else {
            None
        }
    }

    /// Returns width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns width and height as a tuple.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the canvas center used as a rotation pivot.
    ///
    /// Uses integer division, so odd sizes are truncated: `301x301` gives `(150, 150)`.
    #[inline]
    pub fn center(&self) -> (u32, u32) {
        (self.width / 2, self.height / 2)
    }
}

impl fmt::Debug for Size {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Size({} {})", self.width, self.height)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A clockwise rotation angle in degrees.
///
/// Any finite value is valid. Values outside of `[0, 360)` are kept as is.
#[derive(Clone, Copy, PartialEq, Default)]
pub struct Rotation(f64);

impl Rotation {
    /// Creates a new `Rotation` from degrees.
    ///
    /// Returns `None` for NaN and infinity.
    #[inline]
    pub fn from_degrees(degrees: f64) -> Option<Self> {
        if degrees.is_finite() {
            Some(Rotation(degrees))
        } else {
            None
        }
    }

    /// Returns the angle in degrees.
    #[inline]
    pub fn degrees(&self) -> f64 {
        self.0
    }
}

impl fmt::Debug for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Rotation({})", self)
    }
}

/// Integral values always have a fractional part: `90` is written as `90.0`.
impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_must_be_positive() {
        assert!(Size::new(0, 10).is_none());
        assert!(Size::new(10, 0).is_none());
        assert_eq!(Size::new(300, 200).unwrap().dimensions(), (300, 200));
    }

    #[test]
    fn center_is_truncated() {
        assert_eq!(Size::new(300, 300).unwrap().center(), (150, 150));
        assert_eq!(Size::new(301, 301).unwrap().center(), (150, 150));
        assert_eq!(Size::new(1, 3).unwrap().center(), (0, 1));
    }

    #[test]
    fn rotation_rejects_non_finite() {
        assert!(Rotation::from_degrees(f64::NAN).is_none());
        assert!(Rotation::from_degrees(f64::INFINITY).is_none());
        assert!(Rotation::from_degrees(-720.0).is_some());
    }

    #[test]
    fn rotation_display() {
        let fmt = |d: f64| Rotation::from_degrees(d).unwrap().to_string();
        assert_eq!(fmt(90.0), "90.0");
        assert_eq!(fmt(0.0), "0.0");
        assert_eq!(fmt(-45.5), "-45.5");
        assert_eq!(fmt(450.0), "450.0");
        assert_eq!(fmt(12.25), "12.25");
        assert_eq!(fmt(1e15), "1000000000000000.0");
        assert_eq!(fmt(-3e16), "-30000000000000000.0");
    }
}
