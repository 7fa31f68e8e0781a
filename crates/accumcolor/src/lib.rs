//! accumcolor: colors that can be accumulated and averaged
//!
//! An ordinary color type answers one question: "what color is this?". The
//! accumulator types in this crate answer a slightly different one: "what is
//! the average of every color that has been added here so far?". Each
//! accumulator keeps a running sum of its channels together with a *tally*,
//! the number of samples that contributed to the sum.
//!
//! # Quick Start
//!
//! ```
//! use accumcolor::{AccumRgba, Nrgba};
//!
//! let mut acc = AccumRgba::default();
//! acc.add(Nrgba::new(150, 100, 40, 255));
//! acc.add(Nrgba::new(50, 40, 80, 255));
//!
//! assert_eq!(acc.tally, 2);
//! assert_eq!(acc.nrgba(), Nrgba::new(100, 70, 60, 255));
//! ```
//!
//! # Color Spaces
//!
//! Two accumulators share the same shape (see [`Accumulate`]):
//!
//! | Accumulator | Channels | Averaging |
//! |-------------|----------|-----------|
//! | [`AccumRgba`] | non-premultiplied 8-bit R, G, B, A summed as `u64` | integer division, truncating |
//! | [`AccumLab`] | CIE L\*, a\*, b\* as `f64`, alpha as `u64` | float division (alpha: integer) |
//!
//! Averaging in gamma-encoded RGBA is cheap and byte-exact. Averaging in
//! L\*a\*b\* is perceptually more uniform: the mean of red and green is a
//! warm orange rather than a muddy olive.
//!
//! # Plain Colors
//!
//! The non-accumulating types used for interop are [`Nrgba`] (8-bit,
//! non-premultiplied) and [`Rgba64`] (16-bit, alpha-premultiplied). The
//! [`Color`] trait is the common denominator: everything that can report
//! itself as a premultiplied [`Rgba64`] is a color, including
//! `image::Rgba<u8>` and `image::Rgba<u16>`.
//!
//! # Native Samples vs. Plain Samples
//!
//! Adding a plain color contributes exactly one sample (tally 1). Adding an
//! accumulator of the *same* type contributes its whole running sum, tally
//! included. Both paths go through [`IntoAccum`], which is resolved at compile
//! time:
//!
//! ```
//! use accumcolor::{AccumRgba, Nrgba};
//!
//! let mut partial = AccumRgba::default();
//! for _ in 0..3 {
//!     partial.add(Nrgba::new(10, 20, 30, 255));
//! }
//!
//! let mut total = AccumRgba::default();
//! total.add(partial); // tally 3 is kept, not collapsed to 1
//! assert_eq!(total.tally, 3);
//! ```
//!
//! # Weighted Averages
//!
//! [`Accumulate::scale`] multiplies every field, tally included. The
//! averaged color is unchanged, but the sample now counts `weight` times when
//! merged into another accumulator. A weight of zero removes the sample
//! entirely.

pub mod accum;
pub mod color;


pub use accum::{AccumLab, AccumRgba, Accumulate, IntoAccum};
pub use color::{Color, Lab, Nrgba, Rgba64};
