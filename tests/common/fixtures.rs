//! Test images and colors.

use accumimage::{AccumImage, Accumulate, Nrgba, Rectangle};
use image::{Rgba, RgbaImage};

/// Colors used across tests
pub mod colors {
    use accumimage::Nrgba;

    pub const RED: Nrgba = Nrgba::opaque(255, 0, 0);
    pub const GREEN: Nrgba = Nrgba::opaque(0, 255, 0);
    pub const BLUE: Nrgba = Nrgba::opaque(0, 0, 255);
    pub const BLACK: Nrgba = Nrgba::opaque(0, 0, 0);
    pub const WHITE: Nrgba = Nrgba::opaque(255, 255, 255);
    pub const CLEAR: Nrgba = Nrgba::new(0, 0, 0, 0);
}

/// An accumulation image with one sample of `c` in every pixel.
pub fn solid<A: Accumulate>(rect: Rectangle, c: Nrgba) -> AccumImage<A>
where
    Nrgba: accumimage::IntoAccum<A>,
{
    let mut img = AccumImage::new(rect);
    for p in rect.points() {
        img.set(p.x, p.y, c);
    }
    img
}

/// A black and white checkerboard with `cell`-pixel squares.
pub fn checkerboard(width: u32, height: u32, cell: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            Rgba([0, 0, 0, 255])
        } else {
            Rgba([255, 255, 255, 255])
        }
    })
}

/// A horizontal gray ramp: column `x` has value `x * step`.
pub fn ramp(width: u32, height: u32, step: u8) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, _| {
        let v = (x as u8).wrapping_mul(step);
        Rgba([v, v, v, 255])
    })
}
