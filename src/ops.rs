//! Whole-image operations built on accumulation: downscaling and blending.

use accumcolor::{Accumulate, IntoAccum};

use crate::buffer::AccumImage;
use crate::error::AllocError;
use crate::geom::Rectangle;
use crate::source::ImageSource;

/// Shrink `src` onto a new image covering `bounds`.
///
/// Source pixel `(x, y)` lands on
/// `(nw * (x - min.x) / w + bounds.min.x, nh * (y - min.y) / h + bounds.min.y)`
/// and is *added* there, so every target pixel is the average of all source
/// pixels that map onto it. Target pixels nothing maps onto stay empty.
///
/// # Errors
///
/// Returns [`AllocError`] when `bounds` cannot be allocated.
///
/// # Example
///
/// ```
/// use accumimage::{downscale, AccumRgba, AccumImage, Rectangle};
/// use image::{Rgba, RgbaImage};
///
/// let src = RgbaImage::from_fn(4, 1, |x, _| Rgba([x as u8 * 10, 0, 0, 255]));
/// let small: AccumImage<AccumRgba> = downscale(&src, Rectangle::new(0, 0, 2, 1)).unwrap();
///
/// assert_eq!(small.nrgba_at(0, 0).r, 5); // (0 + 10) / 2
/// assert_eq!(small.nrgba_at(1, 0).r, 25); // (20 + 30) / 2
/// ```
pub fn downscale<A, S>(src: &S, bounds: Rectangle) -> Result<AccumImage<A>, AllocError>
where
    A: Accumulate,
    S: ImageSource + ?Sized,
    S::Pixel: IntoAccum<A>,
{
    let mut out: AccumImage<A> = AccumImage::try_new(bounds)?;
    let sb = src.bounds();
    tracing::debug!(source = ?sb, target = ?bounds, "Downscaling image");
    if sb.is_empty() {
        return Ok(out);
    }

    let (w, h) = (i64::from(sb.dx()), i64::from(sb.dy()));
    let (nw, nh) = (i64::from(bounds.dx()), i64::from(bounds.dy()));
    let map = |v: i32, min: i32, size: i64, new_size: i64, new_min: i32| {
        (new_size * (i64::from(v) - i64::from(min)) / size + i64::from(new_min)) as i32
    };
    for y in sb.min.y..sb.max.y {
        let ny = map(y, sb.min.y, h, nh, bounds.min.y);
        for x in sb.min.x..sb.max.x {
            let nx = map(x, sb.min.x, w, nw, bounds.min.x);
            out.add(nx, ny, src.pixel_at(x, y));
        }
    }
    Ok(out)
}

/// One input to [`blend`]: a source and how many times each of its pixels
/// counts.
#[derive(Debug)]
pub struct Layer<'a, S: ?Sized> {
    pub source: &'a S,
    pub weight: u64,
}

impl<S: ?Sized> Clone for Layer<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized> Copy for Layer<'_, S> {}

impl<'a, S: ?Sized> Layer<'a, S> {
    /// A layer with weight 1.
    #[inline]
    pub fn new(source: &'a S) -> Self {
        Self { source, weight: 1 }
    }

    /// Set the layer weight. Weight 0 leaves the layer out.
    #[inline]
    pub fn weight(mut self, weight: u64) -> Self {
        self.weight = weight;
        self
    }
}

/// Configuration for [`blend`].
///
/// # Example
///
/// ```
/// use accumimage::{BlendOptions, Rectangle};
///
/// let opts = BlendOptions::new().bounds(Rectangle::new(0, 0, 64, 64));
/// assert_eq!(opts.bounds, Some(Rectangle::new(0, 0, 64, 64)));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlendOptions {
    /// Bounds of the blended image.
    ///
    /// Default: `None`, the union of all layer bounds.
    pub bounds: Option<Rectangle>,
}

impl BlendOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the bounds of the blended image. Layer pixels outside them
    /// are dropped.
    #[inline]
    pub fn bounds(mut self, bounds: Rectangle) -> Self {
        self.bounds = Some(bounds);
        self
    }
}

/// Blend layers into a new image by accumulating every layer pixel.
///
/// Each pixel of a layer is converted to `A`, scaled by the layer's weight
/// and added at the same coordinates. Where layers overlap the result is
/// their weighted average; elsewhere it is the single covering layer.
///
/// # Errors
///
/// Returns [`AllocError`] when the target bounds cannot be allocated.
///
/// # Example
///
/// ```
/// use accumimage::{blend, AccumRgba, AccumImage, BlendOptions, Layer, Nrgba, Rectangle};
///
/// let mut red: AccumImage<AccumRgba> = AccumImage::new(Rectangle::new(0, 0, 2, 1));
/// let mut blue: AccumImage<AccumRgba> = AccumImage::new(Rectangle::new(1, 0, 3, 1));
/// for x in 0..3 {
///     red.set(x, 0, Nrgba::opaque(255, 0, 0));
///     blue.set(x, 0, Nrgba::opaque(0, 0, 255));
/// }
///
/// let out: AccumImage<AccumRgba> =
///     blend(&[Layer::new(&red), Layer::new(&blue)], BlendOptions::new()).unwrap();
///
/// assert_eq!(out.bounds(), Rectangle::new(0, 0, 3, 1));
/// assert_eq!(out.nrgba_at(0, 0), Nrgba::opaque(255, 0, 0));
/// assert_eq!(out.nrgba_at(1, 0), Nrgba::opaque(127, 0, 127));
/// assert_eq!(out.nrgba_at(2, 0), Nrgba::opaque(0, 0, 255));
/// ```
pub fn blend<A, S>(
    layers: &[Layer<'_, S>],
    options: BlendOptions,
) -> Result<AccumImage<A>, AllocError>
where
    A: Accumulate,
    S: ImageSource + ?Sized,
    S::Pixel: IntoAccum<A>,
{
    let bounds = options.bounds.unwrap_or_else(|| {
        layers
            .iter()
            .fold(Rectangle::default(), |acc, layer| acc.union(layer.source.bounds()))
    });
    tracing::debug!(layers = layers.len(), ?bounds, "Blending layers");

    let mut out: AccumImage<A> = AccumImage::try_new(bounds)?;
    for layer in layers.iter().filter(|layer| layer.weight > 0) {
        let lb = layer.source.bounds().intersect(bounds);
        for p in lb.points() {
            let mut sample: A = layer.source.pixel_at(p.x, p.y).into_accum();
            sample.scale(layer.weight);
            out.add(p.x, p.y, sample);
        }
    }
    Ok(out)
}
