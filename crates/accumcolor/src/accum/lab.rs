//! Accumulation in CIE L\*a\*b\* space

use std::ops::AddAssign;

use super::{AccumRgba, Accumulate, IntoAccum};
use crate::color::{Color, Lab, Nrgba, Rgba64};

/// A running sum of CIE L\*a\*b\* + alpha samples.
///
/// Lightness and the two chroma axes are summed as `f64` in the scaled units
/// of [`Lab`]; alpha is summed as an 8-bit `u64` like [`AccumRgba`].
///
/// Either all fields are zero, or:
///
/// | field | per-sample range |
/// |-------|------------------|
/// | `l / tally` | `0.0..=1.0` |
/// | `a / tally` | `-1.0..=1.0` |
/// | `b / tally` | `-1.0..=1.0` |
/// | `alpha / tally` | `0..=255` (integer division) |
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccumLab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
    pub alpha: u64,
    pub tally: u64,
}

impl AccumLab {
    /// A single sample (tally 1) of a Lab color with the given alpha.
    #[inline]
    pub const fn sample(lab: Lab, alpha: u8) -> Self {
        Self {
            l: lab.l,
            a: lab.a,
            b: lab.b,
            alpha: alpha as u64,
            tally: 1,
        }
    }

    /// Accumulate a color of any kind.
    ///
    /// Plain colors are converted to Lab and count once; an `AccumLab`
    /// contributes its full tally.
    #[inline]
    pub fn add<S: IntoAccum<Self>>(&mut self, sample: S) {
        self.accumulate(sample.into_accum());
    }

    /// Multiply every component by `weight` (see [`Accumulate::scale`]).
    #[inline]
    pub fn scale(&mut self, weight: u64) {
        Accumulate::scale(self, weight);
    }

    /// See [`Accumulate::is_valid`].
    #[inline]
    pub fn is_valid(&self) -> bool {
        Accumulate::is_valid(self)
    }

    /// Average of all samples with a tally of 1, or zero when empty.
    #[inline]
    pub fn average(&self) -> Self {
        Accumulate::average(self)
    }

    /// The averaged color as a plain [`Lab`], dropping alpha.
    pub fn lab(&self) -> Lab {
        let avg = self.average();
        Lab::new(avg.l, avg.a, avg.b)
    }
}

impl Accumulate for AccumLab {
    fn accumulate(&mut self, other: Self) {
        self.l += other.l;
        self.a += other.a;
        self.b += other.b;
        self.alpha += other.alpha;
        self.tally += other.tally;
    }

    /// # Panics
    ///
    /// In debug builds, panics if `alpha` or `tally` overflows `u64`.
    fn scale(&mut self, weight: u64) {
        let w = weight as f64;
        self.l *= w;
        self.a *= w;
        self.b *= w;
        self.alpha *= weight;
        self.tally *= weight;
    }

    #[inline]
    fn tally(&self) -> u64 {
        self.tally
    }

    fn is_valid(&self) -> bool {
        if self.tally == 0 {
            return *self == Self::default();
        }
        let tally = self.tally as f64;
        (0.0..=1.0).contains(&(self.l / tally))
            && (-1.0..=1.0).contains(&(self.a / tally))
            && (-1.0..=1.0).contains(&(self.b / tally))
            && self.alpha / self.tally <= 255
    }

    fn is_opaque(&self) -> bool {
        self.tally != 0 && self.alpha == 0xff * self.tally
    }

    fn average(&self) -> Self {
        if self.tally == 0 {
            return Self::default();
        }
        let tally = self.tally as f64;
        Self {
            l: self.l / tally,
            a: self.a / tally,
            b: self.b / tally,
            alpha: self.alpha / self.tally,
            tally: 1,
        }
    }

    /// Un-premultiplies in floating point. A transparent input is stored as
    /// an empty black sample that still counts toward the tally.
    fn from_rgba64(c: Rgba64) -> Self {
        if c.a == 0 {
            return Self {
                tally: 1,
                ..Self::default()
            };
        }
        let alpha = f64::from(c.a);
        let lab = Lab::from_rgb(
            f64::from(c.r) / alpha,
            f64::from(c.g) / alpha,
            f64::from(c.b) / alpha,
        );
        Self::sample(lab, (c.a >> 8) as u8)
    }
}

impl Color for AccumLab {
    /// Convert the averaged Lab color back to sRGB, clamp it, and
    /// premultiply by the averaged alpha, rounding half up.
    fn rgba(&self) -> Rgba64 {
        if self.tally == 0 {
            return Rgba64::default();
        }
        let tally = self.tally as f64;
        let rgb = Lab::new(self.l / tally, self.a / tally, self.b / tally).to_rgb();
        let alpha = self.alpha as f64 / tally / 255.0;
        let [r, g, b] = rgb.map(|v| (v * alpha * 65535.0 + 0.5) as u16);
        Rgba64::new(r, g, b, (alpha * 65535.0 + 0.5) as u16)
    }
}

impl IntoAccum<AccumLab> for AccumLab {
    #[inline]
    fn into_accum(self) -> AccumLab {
        self
    }
}

impl IntoAccum<AccumLab> for Lab {
    /// A plain Lab color is taken as-is and fully opaque.
    #[inline]
    fn into_accum(self) -> AccumLab {
        AccumLab::sample(self, 0xff)
    }
}

impl IntoAccum<AccumLab> for Nrgba {
    fn into_accum(self) -> AccumLab {
        let (lab, alpha) = Lab::from_color(&self);
        AccumLab::sample(lab, alpha)
    }
}

impl IntoAccum<AccumLab> for image::Rgba<u8> {
    fn into_accum(self) -> AccumLab {
        Nrgba::from(self).into_accum()
    }
}

impl IntoAccum<AccumLab> for AccumRgba {
    /// The RGBA average becomes one Lab sample; its tally does not carry
    /// over between color spaces.
    fn into_accum(self) -> AccumLab {
        let (lab, alpha) = Lab::from_color(&self);
        AccumLab::sample(lab, alpha)
    }
}

impl<S: IntoAccum<AccumLab>> AddAssign<S> for AccumLab {
    #[inline]
    fn add_assign(&mut self, sample: S) {
        self.add(sample);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MAX_DIFF: f64 = 1e-5;

    fn assert_close(name: &str, actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= MAX_DIFF,
            "expected {name} = {expected} but saw {actual}"
        );
    }

    #[test]
    fn test_valid() {
        let mut c = AccumLab::default();
        assert!(c.is_valid(), "{c:?} should be valid");

        c.a = 0.5;
        assert!(!c.is_valid(), "{c:?} should be invalid");

        c.tally = 1;
        assert!(c.is_valid(), "{c:?} should be valid");

        c = AccumLab {
            l: 1.0,
            a: -1.0,
            b: 1.0,
            alpha: 255,
            tally: 1,
        };
        assert!(c.is_valid(), "{c:?} should be valid");

        c.b += 0.25;
        assert!(!c.is_valid(), "{c:?} should be invalid");

        c.b = 1.0;
        c.a *= 2.0;
        assert!(!c.is_valid(), "{c:?} should be invalid");

        c.tally = 2;
        assert!(c.is_valid(), "{c:?} should be valid");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "overflow")]
    fn test_scale_overflow_panics_in_debug() {
        let mut c = AccumLab::sample(Lab::new(0.5, 0.0, 0.0), 255);
        c.scale(u64::MAX);
    }

    #[test]
    fn test_valid_large_tally() {
        const BIG: u64 = 34_359_738_641;
        let c = AccumLab {
            l: BIG as f64,
            a: BIG as f64,
            b: -(BIG as f64),
            alpha: 255 * BIG,
            tally: BIG,
        };
        assert!(c.is_valid());
    }

    #[test]
    fn test_valid_rejects_alpha_overflow() {
        let c = AccumLab {
            alpha: 256,
            tally: 1,
            ..Default::default()
        };
        assert!(!c.is_valid());
    }

    #[test]
    fn test_add_totals() {
        const N: u64 = 5;
        let mut acc = AccumLab::default();
        let mut expected = 0.0;
        for i in 0..N {
            let v = i as f64 / (N * 2) as f64;
            acc.add(Lab::new(v, v, -v));
            expected += v;
        }
        assert_close("L", acc.l, expected);
        assert_close("a", acc.a, expected);
        assert_close("b", acc.b, -expected);
        assert_eq!(acc.alpha, N * 255);
        assert_eq!(acc.tally, N);
    }

    #[test]
    fn test_average() {
        let expected = AccumLab {
            l: 0.25,
            a: -0.75,
            b: 0.50,
            alpha: 250,
            tally: 1,
        };
        let mut sum = AccumLab::default();
        for _ in 0..10 {
            sum.add(expected);
        }
        let actual = sum.average();
        assert_close("L", actual.l, expected.l);
        assert_close("a", actual.a, expected.a);
        assert_close("b", actual.b, expected.b);
        assert_eq!(actual.alpha, expected.alpha);
        assert_eq!(actual.tally, 1);
    }

    #[test]
    fn test_empty_average_and_rgba() {
        let c = AccumLab::default();
        assert_eq!(c.average(), AccumLab::default());
        assert_eq!(c.rgba(), Rgba64::default());
    }

    /// An 8-bit premultiplied color survives Lab and back exactly.
    #[test]
    fn test_convert_round_trip() {
        let widen = |v: u16| v | v << 8;
        let original = Rgba64::new(widen(0x22), widen(0x44), widen(0x66), widen(0x88));

        let via_rgba64: AccumLab = original.into_accum();
        let (lab, alpha) = Lab::from_color(&original);
        let via_model = AccumLab::sample(lab, alpha);

        for c in [via_rgba64, via_model] {
            let back = c.rgba();
            assert_eq!(
                [back.r >> 8, back.g >> 8, back.b >> 8, back.a >> 8],
                [0x22, 0x44, 0x66, 0x88],
                "round trip through {c:?}"
            );
        }
    }

    #[test]
    fn test_from_rgba64_transparent() {
        let c = AccumLab::from_rgba64(Rgba64::new(0x1000, 0x2000, 0x3000, 0));
        assert_eq!(
            c,
            AccumLab {
                tally: 1,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_from_rgba64_matches_plain_conversion() {
        let c = Nrgba::new(0x80, 0x40, 0xc0, 0xff);
        let via_rgba64 = AccumLab::from_rgba64(c.rgba());
        let via_model: AccumLab = c.into_accum();
        assert_close("L", via_rgba64.l, via_model.l);
        assert_close("a", via_rgba64.a, via_model.a);
        assert_close("b", via_rgba64.b, via_model.b);
        assert_eq!(via_rgba64.alpha, via_model.alpha);
    }

    #[test]
    fn test_opaque() {
        assert!(!AccumLab::default().is_opaque());
        let mut c: AccumLab = Nrgba::opaque(10, 20, 30).into_accum();
        assert!(c.is_opaque());
        c += Nrgba::new(10, 20, 30, 0);
        assert!(!c.is_opaque());
    }

    #[test]
    fn test_lab_drops_alpha() {
        let mut c = AccumLab::default();
        c.add(AccumLab::sample(Lab::new(0.2, 0.1, -0.1), 10));
        c.add(AccumLab::sample(Lab::new(0.4, 0.3, 0.1), 20));
        let lab = c.lab();
        assert_close("L", lab.l, 0.3);
        assert_close("a", lab.a, 0.2);
        assert_close("b", lab.b, 0.0);
    }
}
