//! accumimage - images that accumulate colors
//!
//! An ordinary image stores one color per pixel and a write replaces it. An
//! accumulation image stores a running sum and a tally per pixel, so writing
//! the same pixel several times yields the *average* of everything written
//! there. This makes it a natural target for downscaling, blending, and
//! Monte-Carlo style rendering where many samples land on one pixel.
//!
//! Two pixel types come from the [`accumcolor`] crate:
//!
//! - [`AccumRgbaImage`]: averages in non-premultiplied 8-bit RGBA.
//! - [`AccumLabImage`]: averages in CIE L\*a\*b\*, which blends colors the
//!   way the eye expects.
//!
//! # Example
//!
//! ```
//! use accumimage::{AccumLabImage, AccumRgbaImage, Nrgba, Rectangle};
//!
//! let bounds = Rectangle::new(0, 0, 1, 1);
//! let mut rgba = AccumRgbaImage::new(bounds);
//! let mut lab = AccumLabImage::new(bounds);
//! for c in [Nrgba::opaque(255, 0, 0), Nrgba::opaque(0, 255, 0)] {
//!     rgba.add(0, 0, c);
//!     lab.add(0, 0, c);
//! }
//!
//! assert_eq!(rgba.nrgba_at(0, 0), Nrgba::opaque(127, 127, 0));
//! assert!(lab.nrgba_at(0, 0).r > 127); // a brighter yellow
//! ```
//!
//! # Sub-images
//!
//! [`AccumImage::sub_image`] and [`AccumImage::sub_image_mut`] return views
//! that borrow the parent's pixels. Writes through a mutable view show up in
//! the parent, and only inside the intersection of the two rectangles.
//!
//! # Logging
//!
//! The crate logs through [`tracing`] and never installs a subscriber.
//! Allocation and whole-image operations log at `debug`, sub-image creation
//! at `trace`, and rejected allocations at `warn`.

pub mod buffer;
pub mod error;
pub mod geom;
pub mod ops;
pub mod source;

pub use accumcolor;
pub use accumcolor::{AccumLab, AccumRgba, Accumulate, Color, IntoAccum, Lab, Nrgba, Rgba64};
pub use buffer::AccumImage;
pub use error::AllocError;
pub use geom::{Point, Rectangle};
pub use ops::{blend, downscale, BlendOptions, Layer};
pub use source::ImageSource;

/// An image that averages in non-premultiplied RGBA.
pub type AccumRgbaImage<C = Vec<AccumRgba>> = AccumImage<AccumRgba, C>;

/// An image that averages in CIE L\*a\*b\*.
pub type AccumLabImage<C = Vec<AccumLab>> = AccumImage<AccumLab, C>;
