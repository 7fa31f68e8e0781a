//! Accumulating color types
//!
//! Both accumulators implement [`Accumulate`], the capability the image
//! buffers are generic over, and [`Color`] so an accumulator can be handed to
//! anything that only understands plain colors.

mod lab;
mod rgba;

pub use lab::AccumLab;
pub use rgba::AccumRgba;

use crate::color::{Color, Nrgba, Rgba64};

/// A color that keeps a running sum of samples and a tally of how many
/// samples went into it.
///
/// Implementations maintain one invariant (see [`is_valid`](Self::is_valid)):
/// either everything is zero, or every channel divided by the tally lies in
/// that channel's range.
///
/// Every accumulator converts to itself through [`IntoAccum`], keeping its
/// tally, so generic code can hand one accumulator to anything that takes a
/// sample.
pub trait Accumulate: Copy + Default + PartialEq + Color + IntoAccum<Self> {
    /// Field-wise sum of `other` into `self`, tally included.
    ///
    /// # Panics
    ///
    /// Integer fields use plain addition, so debug builds panic on `u64`
    /// overflow.
    fn accumulate(&mut self, other: Self);

    /// Multiply every field, tally included, by `weight`.
    ///
    /// The averaged color does not change (unless `weight` is 0, which
    /// empties the accumulator), but the sample now counts `weight` times
    /// when merged into another accumulator.
    ///
    /// # Panics
    ///
    /// Integer fields use plain multiplication, so debug builds panic on
    /// `u64` overflow.
    fn scale(&mut self, weight: u64);

    /// Number of samples accumulated so far (after any scaling).
    fn tally(&self) -> u64;

    /// Whether the accumulator satisfies its invariant.
    fn is_valid(&self) -> bool;

    /// True if every contributing sample was fully opaque.
    ///
    /// An empty accumulator holds no color at all and is *not* opaque.
    fn is_opaque(&self) -> bool;

    /// The normalized single-sample form (tally 1), or zero when empty.
    fn average(&self) -> Self;

    /// Build a tally-1 sample from a premultiplied 16-bit color.
    ///
    /// Channels are left at zero when alpha is zero.
    fn from_rgba64(c: Rgba64) -> Self;

    /// The averaged color as 8-bit non-premultiplied RGBA.
    fn nrgba(&self) -> Nrgba {
        Nrgba::from(self.rgba())
    }
}

/// Conversion of a sample into an accumulator's native form.
///
/// Plain colors become a tally-1 accumulator. An accumulator of the target
/// type converts to itself, so a running sum keeps its tally when it is
/// merged into another one.
///
/// # Example
///
/// ```
/// use accumcolor::{AccumRgba, IntoAccum, Nrgba};
///
/// let single: AccumRgba = Nrgba::opaque(1, 2, 3).into_accum();
/// assert_eq!(single.tally, 1);
///
/// let mut many = single;
/// many.scale(5);
/// let same: AccumRgba = many.into_accum();
/// assert_eq!(same.tally, 5);
/// ```
pub trait IntoAccum<A> {
    fn into_accum(self) -> A;
}

impl<A: Accumulate> IntoAccum<A> for Rgba64 {
    #[inline]
    fn into_accum(self) -> A {
        A::from_rgba64(self)
    }
}

impl<A: Accumulate> IntoAccum<A> for image::Rgba<u16> {
    #[inline]
    fn into_accum(self) -> A {
        A::from_rgba64(self.rgba())
    }
}

impl<A, T> IntoAccum<A> for &T
where
    T: IntoAccum<A> + Copy,
{
    #[inline]
    fn into_accum(self) -> A {
        (*self).into_accum()
    }
}
