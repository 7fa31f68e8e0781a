//! 16-bit alpha-premultiplied RGBA

use super::Color;

/// A 16-bit color whose channels are premultiplied by alpha.
///
/// Well-formed values satisfy `r, g, b <= a`. This is the representation
/// returned by [`Color::rgba`] and accepted by the `*_rgba64` pixel setters
/// of the image buffers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba64 {
    pub r: u16,
    pub g: u16,
    pub b: u16,
    pub a: u16,
}

impl Rgba64 {
    #[inline]
    pub const fn new(r: u16, g: u16, b: u16, a: u16) -> Self {
        Self { r, g, b, a }
    }

    /// Undo alpha premultiplication, keeping 16 bits of precision.
    ///
    /// Returns `[r, g, b, a]`. Channels are left at zero when alpha is zero,
    /// and passed through untouched when alpha is `0xffff`.
    pub fn unpremultiplied(self) -> [u32; 4] {
        let [r, g, b, a] = [self.r, self.g, self.b, self.a].map(u32::from);
        match a {
            0 => [0, 0, 0, 0],
            0xffff => [r, g, b, a],
            _ => [r * 0xffff / a, g * 0xffff / a, b * 0xffff / a, a],
        }
    }
}

impl Color for Rgba64 {
    #[inline]
    fn rgba(&self) -> Rgba64 {
        *self
    }
}
