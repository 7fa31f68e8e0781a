//! CIE L\*a\*b\* conversion
//!
//! The conversion math is delegated to the `palette` crate. This module only
//! fixes the conventions used throughout the crate:
//!
//! - D65 reference white
//! - gamma-encoded sRGB on the RGB side, channels in `0.0..=1.0`
//! - all three Lab components divided by 100, so lightness spans `0.0..=1.0`
//!   and the `a`/`b` axes stay (for in-gamut colors) within `-1.0..=1.0`
//!
//! # References
//!
//! CIE 15:2004, "Colorimetry", section 8.2.1

use palette::white_point::D65;
use palette::{FromColor, IntoColor, LinSrgb, Srgb};

use super::{Color, Rgba64};

/// Divisor between `palette`'s CIE units and ours.
const CIE_SCALE: f64 = 100.0;

type CieLab = palette::Lab<D65, f64>;

/// A single color in (scaled) CIE L\*a\*b\* space.
///
/// # Components
///
/// - `l`: lightness, 0.0 (black) to 1.0 (white)
/// - `a`: green (negative) to red (positive)
/// - `b`: blue (negative) to yellow (positive)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    #[inline]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Convert gamma-encoded sRGB (`0.0..=1.0` per channel) to Lab.
    ///
    /// # Example
    ///
    /// ```
    /// use accumcolor::Lab;
    ///
    /// let white = Lab::from_rgb(1.0, 1.0, 1.0);
    /// assert!((white.l - 1.0).abs() < 1e-6);
    /// assert!(white.a.abs() < 1e-3);
    /// ```
    pub fn from_rgb(r: f64, g: f64, b: f64) -> Self {
        let linear: LinSrgb<f64> = Srgb::new(r, g, b).into_linear();
        let lab = CieLab::from_color(linear);
        Self {
            l: lab.l / CIE_SCALE,
            a: lab.a / CIE_SCALE,
            b: lab.b / CIE_SCALE,
        }
    }

    /// Convert any [`Color`] to Lab, returning the color and its 8-bit alpha.
    ///
    /// The premultiplied input is un-premultiplied with integer arithmetic
    /// first. A fully transparent color carries no recoverable hue and maps
    /// to black (`Lab::default()`).
    pub fn from_color<C: Color + ?Sized>(c: &C) -> (Self, u8) {
        let premultiplied = c.rgba();
        let alpha = (premultiplied.a >> 8) as u8;
        if premultiplied.a == 0 {
            return (Self::default(), alpha);
        }
        let [r, g, b, _] = premultiplied.unpremultiplied();
        let unit = |v: u32| f64::from(v) / 65535.0;
        (Self::from_rgb(unit(r), unit(g), unit(b)), alpha)
    }

    /// Convert back to gamma-encoded sRGB, clamped into `0.0..=1.0`.
    ///
    /// Lab colors outside the sRGB gamut (including averages of extreme
    /// colors) are pulled onto the nearest displayable value per channel.
    pub fn to_rgb(self) -> [f64; 3] {
        let lab = CieLab::new(self.l * CIE_SCALE, self.a * CIE_SCALE, self.b * CIE_SCALE);
        let linear: LinSrgb<f64> = lab.into_color();
        let srgb: Srgb<f64> = Srgb::from_linear(linear);
        [srgb.red, srgb.green, srgb.blue].map(|v| v.clamp(0.0, 1.0))
    }
}

impl Color for Lab {
    /// A plain `Lab` has no alpha; it is reported fully opaque.
    fn rgba(&self) -> Rgba64 {
        let [r, g, b] = self.to_rgb().map(|v| (v * 65535.0 + 0.5) as u16);
        Rgba64::new(r, g, b, 0xffff)
    }
}
