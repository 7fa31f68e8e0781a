//! 8-bit non-alpha-premultiplied RGBA

use super::{Color, Rgba64};

/// An 8-bit color whose channels are *not* premultiplied by alpha.
///
/// This is the representation accumulated by
/// [`AccumRgba`](crate::AccumRgba) and the one an average is reported in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nrgba {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
    /// Alpha channel (0 = transparent, 255 = opaque)
    pub a: u8,
}

impl Nrgba {
    /// Create a new color from its four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color.
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Channels as `[R, G, B, A]`.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Color for Nrgba {
    /// Widen each channel to 16 bits (`v | v << 8`) and premultiply by alpha.
    fn rgba(&self) -> Rgba64 {
        let a = u32::from(self.a);
        let premultiply = |v: u8| {
            let v = u32::from(v);
            ((v | v << 8) * a / 0xff) as u16
        };
        Rgba64 {
            r: premultiply(self.r),
            g: premultiply(self.g),
            b: premultiply(self.b),
            a: (a | a << 8) as u16,
        }
    }
}

impl From<Rgba64> for Nrgba {
    /// Un-premultiply and narrow to 8 bits.
    ///
    /// A fully transparent input yields `Nrgba::default()`: the color hidden
    /// behind zero alpha cannot be recovered.
    fn from(c: Rgba64) -> Self {
        let [r, g, b, a] = [c.r, c.g, c.b, c.a].map(u32::from);
        match a {
            0xffff => Self::new((r >> 8) as u8, (g >> 8) as u8, (b >> 8) as u8, 0xff),
            0 => Self::default(),
            _ => {
                let unpremultiply = |v: u32| ((v * 0xffff / a) >> 8) as u8;
                Self::new(
                    unpremultiply(r),
                    unpremultiply(g),
                    unpremultiply(b),
                    (a >> 8) as u8,
                )
            }
        }
    }
}

impl From<image::Rgba<u8>> for Nrgba {
    #[inline]
    fn from(px: image::Rgba<u8>) -> Self {
        let [r, g, b, a] = px.0;
        Self::new(r, g, b, a)
    }
}

impl From<Nrgba> for image::Rgba<u8> {
    #[inline]
    fn from(c: Nrgba) -> Self {
        image::Rgba(c.to_bytes())
    }
}
