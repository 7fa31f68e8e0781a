//! Accumulation of non-premultiplied RGBA

use std::ops::AddAssign;

use super::{AccumLab, Accumulate, IntoAccum};
use crate::color::{Color, Lab, Nrgba, Rgba64};

/// A running sum of non-alpha-premultiplied 8-bit RGBA samples.
///
/// Either all fields are zero, or each of `r`, `g`, `b` and `a` divided by
/// `tally` lies in `0..=255`. Averages truncate: the mean of 100 and 201 is
/// 150, not 151.
///
/// # Example
///
/// ```
/// use accumcolor::{AccumRgba, Nrgba};
///
/// let mut acc = AccumRgba::default();
/// acc.add(Nrgba::new(100, 110, 120, 130));
/// acc.add(Nrgba::new(201, 211, 221, 231));
/// assert_eq!(acc.nrgba(), Nrgba::new(150, 160, 170, 180));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccumRgba {
    pub r: u64,
    pub g: u64,
    pub b: u64,
    pub a: u64,
    pub tally: u64,
}

impl AccumRgba {
    /// A single sample (tally 1) of the given color.
    #[inline]
    pub const fn sample(c: Nrgba) -> Self {
        Self {
            r: c.r as u64,
            g: c.g as u64,
            b: c.b as u64,
            a: c.a as u64,
            tally: 1,
        }
    }

    /// Accumulate a color of any kind.
    ///
    /// Plain colors count once; an `AccumRgba` contributes its full tally.
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

    /// The average of all accumulated samples.
    ///
    /// Each channel is divided by the tally with truncation. An empty
    /// accumulator averages to `Nrgba::default()`.
    pub fn nrgba(&self) -> Nrgba {
        if self.tally == 0 {
            return Nrgba::default();
        }
        let avg = |v: u64| (v / self.tally) as u8;
        Nrgba::new(avg(self.r), avg(self.g), avg(self.b), avg(self.a))
    }
}

impl Accumulate for AccumRgba {
    fn accumulate(&mut self, other: Self) {
        self.r += other.r;
        self.g += other.g;
        self.b += other.b;
        self.a += other.a;
        self.tally += other.tally;
    }

    /// # Panics
    ///
    /// In debug builds, panics if any field overflows `u64`.
    fn scale(&mut self, weight: u64) {
        self.r *= weight;
        self.g *= weight;
        self.b *= weight;
        self.a *= weight;
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
        [self.r, self.g, self.b, self.a]
            .iter()
            .all(|&v| v / self.tally <= 255)
    }

    fn is_opaque(&self) -> bool {
        self.tally != 0 && self.a == 0xff * self.tally
    }

    fn average(&self) -> Self {
        if self.tally == 0 {
            return Self::default();
        }
        Self::sample(AccumRgba::nrgba(self))
    }

    /// Narrows through [`Nrgba`], so a malformed input whose channels
    /// exceed its alpha still yields a valid sample.
    #[inline]
    fn from_rgba64(c: Rgba64) -> Self {
        Self::sample(Nrgba::from(c))
    }

    #[inline]
    fn nrgba(&self) -> Nrgba {
        AccumRgba::nrgba(self)
    }
}

impl Color for AccumRgba {
    /// The average color, alpha-premultiplied. Zero when empty.
    fn rgba(&self) -> Rgba64 {
        if self.tally == 0 {
            return Rgba64::default();
        }
        AccumRgba::nrgba(self).rgba()
    }
}

impl From<Nrgba> for AccumRgba {
    #[inline]
    fn from(c: Nrgba) -> Self {
        Self::sample(c)
    }
}

impl IntoAccum<AccumRgba> for AccumRgba {
    #[inline]
    fn into_accum(self) -> AccumRgba {
        self
    }
}

impl IntoAccum<AccumRgba> for Nrgba {
    #[inline]
    fn into_accum(self) -> AccumRgba {
        AccumRgba::sample(self)
    }
}

impl IntoAccum<AccumRgba> for image::Rgba<u8> {
    #[inline]
    fn into_accum(self) -> AccumRgba {
        AccumRgba::sample(Nrgba::from(self))
    }
}

impl IntoAccum<AccumRgba> for Lab {
    fn into_accum(self) -> AccumRgba {
        AccumRgba::sample(Nrgba::from(self.rgba()))
    }
}

impl IntoAccum<AccumRgba> for AccumLab {
    /// The Lab average becomes one RGBA sample; its tally does not carry
    /// over between color spaces.
    fn into_accum(self) -> AccumRgba {
        AccumRgba::sample(Nrgba::from(self.rgba()))
    }
}

impl<S: IntoAccum<AccumRgba>> AddAssign<S> for AccumRgba {
    #[inline]
    fn add_assign(&mut self, sample: S) {
        self.add(sample);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_valid() {
        let mut c = AccumRgba::default();
        assert!(c.is_valid(), "{c:?} should be valid");

        c.g = 123;
        assert!(!c.is_valid(), "{c:?} should be invalid");

        c.tally = 1;
        assert!(c.is_valid(), "{c:?} should be valid");

        c = AccumRgba {
            r: 255,
            g: 255,
            b: 255,
            a: 255,
            tally: 1,
        };
        assert!(c.is_valid(), "{c:?} should be valid");

        c.b += 1;
        assert!(!c.is_valid(), "{c:?} should be invalid");

        c.r *= 2;
        assert!(!c.is_valid(), "{c:?} should be invalid");

        c.tally = 2;
        assert!(c.is_valid(), "{c:?} should be valid");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "overflow")]
    fn test_scale_overflow_panics_in_debug() {
        let mut c = AccumRgba::sample(Nrgba::opaque(1, 1, 1));
        c.scale(u64::MAX);
    }

    #[test]
    fn test_valid_large_tally() {
        const BIG: u64 = 34_359_738_641; // larger than 2^32
        let c = AccumRgba {
            r: 255 * BIG,
            g: 255 * BIG,
            b: 255 * BIG,
            a: 255 * BIG,
            tally: BIG,
        };
        assert!(c.is_valid());
    }

    #[test]
    fn test_valid_examples() {
        let cases = [
            (AccumRgba::default(), true),
            (AccumRgba { tally: 1, ..Default::default() }, true),
            (AccumRgba { r: 255, g: 255, b: 255, a: 255, tally: 1 }, true),
            (AccumRgba { r: 255, g: 255, b: 255, a: 255, tally: 0 }, false),
            (AccumRgba { r: 2550, g: 1280, b: 640, a: 2550, tally: 1 }, false),
            (AccumRgba { r: 2550, g: 1280, b: 640, a: 2550, tally: 10 }, true),
        ];
        for (c, expected) in cases {
            assert_eq!(c.is_valid(), expected, "validity of {c:?}");
        }
    }

    #[test]
    fn test_add_totals() {
        let mut acc = AccumRgba::default();
        for r in 0..=1u8 {
            acc.add(Nrgba::new(r, r + 1, r + 2, r + 3));
        }
        assert_eq!(
            acc,
            AccumRgba {
                r: 1,
                g: 3,
                b: 5,
                a: 7,
                tally: 2
            }
        );
    }

    #[test]
    fn test_average_of_three() {
        let mut acc = AccumRgba::default();
        acc += Nrgba::opaque(150, 100, 40);
        acc += Nrgba::opaque(50, 40, 80);
        assert_eq!(acc.nrgba(), Nrgba::opaque(100, 70, 60));

        acc += Nrgba::opaque(75, 32, 220);
        assert_eq!(acc.nrgba(), Nrgba::opaque(91, 57, 113));
    }

    #[test]
    fn test_empty_averages_to_zero() {
        let acc = AccumRgba::default();
        assert_eq!(acc.nrgba(), Nrgba::default());
        assert_eq!(acc.rgba(), Rgba64::default());
        assert_eq!(acc.average(), AccumRgba::default());
    }

    #[test]
    fn test_average_has_tally_one() {
        let mut acc = AccumRgba::default();
        acc.add(Nrgba::new(10, 20, 30, 40));
        acc.add(Nrgba::new(20, 30, 40, 50));
        assert_eq!(
            Accumulate::average(&acc),
            AccumRgba {
                r: 15,
                g: 25,
                b: 35,
                a: 45,
                tally: 1
            }
        );
    }

    #[test]
    fn test_rgba_round_trip() {
        let acc1 = AccumRgba {
            r: 99,
            g: 100,
            b: 101,
            a: 255,
            tally: 1,
        };
        let rgba = acc1.rgba();
        // Narrow to 8-bit premultiplied and widen again, as an 8-bit
        // premultiplied sink would.
        let widen = |v: u16| {
            let v = v >> 8;
            v | v << 8
        };
        let narrowed = Rgba64::new(widen(rgba.r), widen(rgba.g), widen(rgba.b), widen(rgba.a));
        let acc2: AccumRgba = narrowed.into_accum();
        assert_eq!(acc2, acc1);
    }

    #[test]
    fn test_from_rgba64_transparent_drops_color() {
        let c = AccumRgba::from_rgba64(Rgba64::new(0x1234, 0x5678, 0x9abc, 0));
        assert_eq!(
            c,
            AccumRgba {
                tally: 1,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_from_rgba64_unpremultiplies() {
        let c = AccumRgba::from_rgba64(Nrgba::new(200, 100, 50, 128).rgba());
        assert_eq!(c.nrgba(), Nrgba::new(200, 100, 50, 128));
    }

    #[test]
    fn test_from_rgba64_narrows_malformed_input() {
        // red channel larger than alpha: not a valid premultiplied color
        let c = Rgba64::new(0xffff, 0, 0, 0x0100);
        let acc: AccumRgba = c.into_accum();
        assert!(acc.is_valid(), "{acc:?} should be valid");
        assert_eq!(acc, AccumRgba::sample(Nrgba::from(c)));
        assert_eq!(acc.r, 254);
        assert_eq!(acc.a, 1);
    }

    #[test]
    fn test_opaque() {
        assert!(!AccumRgba::default().is_opaque());
        let mut c = AccumRgba::sample(Nrgba::opaque(1, 2, 3));
        assert!(c.is_opaque());
        c.scale(7);
        assert!(c.is_opaque());
        c.add(Nrgba::new(1, 2, 3, 254));
        assert!(!c.is_opaque());
    }

    #[test]
    fn test_accumulating_lab_counts_once() {
        let mut lab = AccumLab::default();
        for _ in 0..4 {
            lab.add(Nrgba::opaque(255, 255, 255));
        }
        let mut acc = AccumRgba::default();
        acc.add(lab);
        assert_eq!(acc.tally, 1);
        assert_eq!(acc.nrgba(), Nrgba::opaque(255, 255, 255));
    }
}
