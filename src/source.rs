//! Read access to anything that can feed pixels into an accumulation image.

use std::ops::Deref;

use accumcolor::{Accumulate, Color, Rgba64};
use image::{ImageBuffer, Rgba};

use crate::buffer::AccumImage;
use crate::geom::Rectangle;

/// A rectangular source of pixels.
///
/// Accumulation images report their native accumulators, so feeding one
/// image into another of the same kind keeps every pixel's tally. Plain
/// `image` buffers report their pixels and count once per pixel.
pub trait ImageSource {
    type Pixel;

    fn bounds(&self) -> Rectangle;

    /// The pixel at `(x, y)`. Points outside [`bounds`](Self::bounds) give
    /// an empty or transparent pixel.
    fn pixel_at(&self, x: i32, y: i32) -> Self::Pixel;

    /// The pixel at `(x, y)` as premultiplied 16-bit RGBA.
    fn color_at(&self, x: i32, y: i32) -> Rgba64
    where
        Self::Pixel: Color,
    {
        self.pixel_at(x, y).rgba()
    }
}

impl<A, C> ImageSource for AccumImage<A, C>
where
    A: Accumulate,
    C: Deref<Target = [A]>,
{
    type Pixel = A;

    #[inline]
    fn bounds(&self) -> Rectangle {
        AccumImage::bounds(self)
    }

    #[inline]
    fn pixel_at(&self, x: i32, y: i32) -> A {
        self.at(x, y)
    }
}

/// `image` buffers start at the origin. Out-of-range reads give a
/// transparent pixel.
impl<C> ImageSource for ImageBuffer<Rgba<u8>, C>
where
    C: Deref<Target = [u8]>,
{
    type Pixel = Rgba<u8>;

    fn bounds(&self) -> Rectangle {
        buffer_bounds(self.dimensions())
    }

    fn pixel_at(&self, x: i32, y: i32) -> Rgba<u8> {
        checked_pixel(self, x, y)
    }
}

impl<C> ImageSource for ImageBuffer<Rgba<u16>, C>
where
    C: Deref<Target = [u16]>,
{
    type Pixel = Rgba<u16>;

    fn bounds(&self) -> Rectangle {
        buffer_bounds(self.dimensions())
    }

    fn pixel_at(&self, x: i32, y: i32) -> Rgba<u16> {
        checked_pixel(self, x, y)
    }
}

fn buffer_bounds((width, height): (u32, u32)) -> Rectangle {
    let clamp = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
    Rectangle::new(0, 0, clamp(width), clamp(height))
}

fn checked_pixel<T, C>(buf: &ImageBuffer<Rgba<T>, C>, x: i32, y: i32) -> Rgba<T>
where
    T: image::Primitive,
    Rgba<T>: image::Pixel<Subpixel = T>,
    C: Deref<Target = [T]>,
{
    let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
        return Rgba([T::DEFAULT_MIN_VALUE; 4]);
    };
    buf.get_pixel_checked(x, y)
        .copied()
        .unwrap_or(Rgba([T::DEFAULT_MIN_VALUE; 4]))
}
