//! Plain (non-accumulating) color types
//!
//! These are the boundary types through which samples enter and averaged
//! colors leave the accumulators.
//!
//! - [`Nrgba`]: 8-bit, non-alpha-premultiplied RGBA
//! - [`Rgba64`]: 16-bit, alpha-premultiplied RGBA
//! - [`Lab`]: a single CIE L\*a\*b\* color, scaled to `L ∈ [0, 1]`
//!
//! Any type implementing [`Color`] can be accumulated.

mod lab;
mod nrgba;
mod rgba64;

pub use lab::Lab;
pub use nrgba::Nrgba;
pub use rgba64::Rgba64;

/// A color that can report itself as alpha-premultiplied 16-bit RGBA.
///
/// This is the lowest common denominator between color representations:
/// every conversion that does not have a more direct path goes through it.
///
/// # Example
///
/// ```
/// use accumcolor::{Color, Nrgba, Rgba64};
///
/// let half_red = Nrgba::new(255, 0, 0, 128);
/// let Rgba64 { r, a, .. } = half_red.rgba();
/// assert_eq!(a, 0x8080);
/// assert_eq!(r, a); // premultiplied: full red scaled by alpha
/// ```
pub trait Color {
    /// The alpha-premultiplied red, green, blue and alpha values, each
    /// in `0..=0xffff`, with every color channel `<= a`.
    fn rgba(&self) -> Rgba64;
}

impl Color for image::Rgba<u8> {
    fn rgba(&self) -> Rgba64 {
        let [r, g, b, a] = self.0;
        Nrgba::new(r, g, b, a).rgba()
    }
}

impl Color for image::Rgba<u16> {
    /// `image` pixels are non-premultiplied, so the channels are scaled by
    /// alpha here.
    fn rgba(&self) -> Rgba64 {
        let [r, g, b, a] = self.0.map(u32::from);
        Rgba64 {
            r: (r * a / 0xffff) as u16,
            g: (g * a / 0xffff) as u16,
            b: (b * a / 0xffff) as u16,
            a: a as u16,
        }
    }
}
