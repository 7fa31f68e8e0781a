//! Accumulation image buffers.
//!
//! [`AccumImage`] is a rectangular grid of accumulators stored flat in
//! row-major order. The container is generic so the same type describes an
//! owned image (`Vec<A>`), a read-only view (`&[A]`) and a writable view
//! (`&mut [A]`) into another image's storage.

use std::marker::PhantomData;
use std::ops::{Deref, DerefMut, Range};

use accumcolor::{AccumLab, Accumulate, IntoAccum, Lab, Nrgba, Rgba64};
use image::RgbaImage;

use crate::error::AllocError;
use crate::geom::{Point, Rectangle};

/// A grid of accumulators covering `bounds()`.
///
/// Pixel `(x, y)` lives at flat offset
/// `(y - bounds.min.y) * stride + (x - bounds.min.x)`. The stride is counted
/// in pixels and may exceed the width: a sub-image keeps its parent's stride
/// and shares its parent's storage.
///
/// Reads outside the bounds return the zero accumulator and writes outside
/// the bounds are ignored.
///
/// # Example
///
/// ```
/// use accumimage::{AccumRgbaImage, Nrgba, Rectangle};
///
/// let mut img = AccumRgbaImage::new(Rectangle::new(0, 0, 2, 2));
/// img.add(0, 0, Nrgba::opaque(200, 0, 0));
/// img.add(0, 0, Nrgba::opaque(100, 50, 0));
///
/// assert_eq!(img.at(0, 0).tally, 2);
/// assert_eq!(img.nrgba_at(0, 0), Nrgba::opaque(150, 25, 0));
/// assert_eq!(img.at(5, 5).tally, 0); // out of bounds
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AccumImage<A, C = Vec<A>> {
    pix: C,
    stride: usize,
    rect: Rectangle,
    _pixel: PhantomData<A>,
}

/// Number of pixels needed for `rect`, or an error when the dimensions are
/// negative or the buffer would not fit in memory.
fn pixel_buffer_len<A>(rect: Rectangle) -> Result<usize, AllocError> {
    let error = AllocError::HugeOrNegative {
        width: rect.dx(),
        height: rect.dy(),
    };
    let width = rect.max.x.checked_sub(rect.min.x);
    let height = rect.max.y.checked_sub(rect.min.y);
    let (Some(width), Some(height)) = (width, height) else {
        return Err(error);
    };
    let (Ok(width), Ok(height)) = (usize::try_from(width), usize::try_from(height)) else {
        return Err(error);
    };
    let pixels = width.checked_mul(height).ok_or(error.clone())?;
    match pixels.checked_mul(std::mem::size_of::<A>()) {
        Some(bytes) if bytes <= isize::MAX as usize => Ok(pixels),
        _ => Err(error),
    }
}

impl<A: Accumulate> AccumImage<A> {
    /// Allocate a zeroed image covering `rect`.
    ///
    /// # Panics
    ///
    /// Panics if `rect` has negative dimensions or is too large to allocate.
    /// Use [`try_new`](Self::try_new) to handle that case instead.
    pub fn new(rect: Rectangle) -> Self {
        match Self::try_new(rect) {
            Ok(img) => img,
            Err(e) => panic!("{e}"),
        }
    }

    /// Allocate a zeroed image covering `rect`, reporting bad dimensions as
    /// an error.
    pub fn try_new(rect: Rectangle) -> Result<Self, AllocError> {
        let len = pixel_buffer_len::<A>(rect).inspect_err(|e| {
            tracing::warn!(?rect, error = %e, "Rejected accumulation image dimensions");
        })?;
        tracing::debug!(
            width = rect.dx(),
            height = rect.dy(),
            pixels = len,
            "Allocated accumulation image"
        );
        Ok(Self {
            pix: vec![A::default(); len],
            stride: rect.dx() as usize,
            rect,
            _pixel: PhantomData,
        })
    }

    /// Consume the image, returning its flat pixel storage.
    pub fn into_pixels(self) -> Vec<A> {
        self.pix
    }
}

impl<A, C> AccumImage<A, C>
where
    A: Accumulate,
    C: Deref<Target = [A]>,
{
    #[inline]
    pub fn bounds(&self) -> Rectangle {
        self.rect
    }

    /// Distance in pixels between vertically adjacent rows.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The underlying storage. For a sub-image this starts at the view's
    /// top-left pixel and may contain pixels outside the view.
    #[inline]
    pub fn pixels(&self) -> &[A] {
        &self.pix
    }

    /// Offset of `(x, y)` into [`pixels`](Self::pixels), or `None` when the
    /// point lies outside the bounds.
    #[inline]
    pub fn pix_offset(&self, x: i32, y: i32) -> Option<usize> {
        if !self.rect.contains(Point::new(x, y)) {
            return None;
        }
        let row = (y - self.rect.min.y) as usize;
        let col = (x - self.rect.min.x) as usize;
        Some(row * self.stride + col)
    }

    /// The accumulator at `(x, y)`, or the zero accumulator out of bounds.
    #[inline]
    pub fn at(&self, x: i32, y: i32) -> A {
        match self.pix_offset(x, y) {
            Some(i) => self.pixels()[i],
            None => A::default(),
        }
    }

    /// The averaged color at `(x, y)` as premultiplied 16-bit RGBA.
    #[inline]
    pub fn rgba64_at(&self, x: i32, y: i32) -> Rgba64 {
        self.at(x, y).rgba()
    }

    /// The averaged color at `(x, y)` as 8-bit non-premultiplied RGBA.
    #[inline]
    pub fn nrgba_at(&self, x: i32, y: i32) -> Nrgba {
        self.at(x, y).nrgba()
    }

    /// True if every pixel holds at least one sample and every sample was
    /// fully opaque. An empty image is opaque.
    pub fn is_opaque(&self) -> bool {
        if self.rect.is_empty() {
            return true;
        }
        let width = self.rect.dx() as usize;
        (self.rect.min.y..self.rect.max.y).all(|y| {
            let start = (y - self.rect.min.y) as usize * self.stride;
            self.pixels()[start..start + width]
                .iter()
                .all(Accumulate::is_opaque)
        })
    }

    /// The part of the image visible through `r`, sharing this image's
    /// storage.
    ///
    /// An empty intersection yields an empty image with zero bounds.
    ///
    /// # Example
    ///
    /// ```
    /// use accumimage::{AccumRgbaImage, Nrgba, Rectangle};
    ///
    /// let mut img = AccumRgbaImage::new(Rectangle::new(0, 0, 4, 4));
    /// img.add(2, 2, Nrgba::opaque(9, 9, 9));
    ///
    /// let view = img.sub_image(Rectangle::new(2, 2, 10, 10));
    /// assert_eq!(view.bounds(), Rectangle::new(2, 2, 4, 4));
    /// assert_eq!(view.at(2, 2).tally, 1);
    /// ```
    pub fn sub_image(&self, r: Rectangle) -> AccumImage<A, &[A]> {
        let rect = r.intersect(self.rect);
        tracing::trace!(requested = ?r, bounds = ?rect, "Created sub-image");
        match self.view_range(rect) {
            Some(range) => AccumImage {
                pix: &self.pixels()[range],
                stride: self.stride,
                rect,
                _pixel: PhantomData,
            },
            None => AccumImage::empty(),
        }
    }

    /// Export the averaged colors as a non-premultiplied 8-bit image.
    ///
    /// Pixel `(0, 0)` of the result is `bounds().min`.
    pub fn to_rgba8(&self) -> RgbaImage {
        let min = self.rect.min;
        let width = self.rect.dx().max(0) as u32;
        let height = self.rect.dy().max(0) as u32;
        RgbaImage::from_fn(width, height, |x, y| {
            self.nrgba_at(min.x + x as i32, min.y + y as i32).into()
        })
    }

    /// Storage range covering every pixel of `rect`, which must lie inside
    /// the bounds.
    fn view_range(&self, rect: Rectangle) -> Option<Range<usize>> {
        if rect.is_empty() {
            return None;
        }
        let start = self.pix_offset(rect.min.x, rect.min.y)?;
        let end = self.pix_offset(rect.max.x - 1, rect.max.y - 1)? + 1;
        Some(start..end)
    }
}

impl<A, C> AccumImage<A, C>
where
    A: Accumulate,
    C: DerefMut<Target = [A]>,
{
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [A] {
        &mut self.pix
    }

    /// Replace the pixel at `(x, y)` with `sample`. Out of bounds is a no-op.
    ///
    /// A plain color is stored as a single sample; an accumulator of the
    /// image's own type is stored with its tally.
    pub fn set<S: IntoAccum<A>>(&mut self, x: i32, y: i32, sample: S) {
        if let Some(i) = self.pix_offset(x, y) {
            self.pixels_mut()[i] = sample.into_accum();
        }
    }

    /// Accumulate `sample` into the pixel at `(x, y)`. Out of bounds is a
    /// no-op.
    pub fn add<S: IntoAccum<A>>(&mut self, x: i32, y: i32, sample: S) {
        if let Some(i) = self.pix_offset(x, y) {
            self.pixels_mut()[i].accumulate(sample.into_accum());
        }
    }

    /// Store a premultiplied 16-bit color as a single sample.
    ///
    /// The color is un-premultiplied first; when its alpha is zero the
    /// channels are stored as zero.
    #[inline]
    pub fn set_rgba64(&mut self, x: i32, y: i32, c: Rgba64) {
        self.set(x, y, c);
    }

    /// Accumulate a premultiplied 16-bit color as a single sample.
    #[inline]
    pub fn add_rgba64(&mut self, x: i32, y: i32, c: Rgba64) {
        self.add(x, y, c);
    }

    /// Writable counterpart of [`sub_image`](Self::sub_image). Writes through
    /// the view land in this image.
    pub fn sub_image_mut(&mut self, r: Rectangle) -> AccumImage<A, &mut [A]> {
        let rect = r.intersect(self.rect);
        tracing::trace!(requested = ?r, bounds = ?rect, "Created mutable sub-image");
        let stride = self.stride;
        match self.view_range(rect) {
            Some(range) => AccumImage {
                pix: &mut self.pixels_mut()[range],
                stride,
                rect,
                _pixel: PhantomData,
            },
            None => AccumImage::empty(),
        }
    }
}

impl<A, C: Default> AccumImage<A, C> {
    fn empty() -> Self {
        Self {
            pix: C::default(),
            stride: 0,
            rect: Rectangle::default(),
            _pixel: PhantomData,
        }
    }
}

impl<C: Deref<Target = [AccumLab]>> AccumImage<AccumLab, C> {
    /// The averaged color at `(x, y)` as plain Lab, without alpha.
    #[inline]
    pub fn lab_at(&self, x: i32, y: i32) -> Lab {
        self.at(x, y).lab()
    }
}
