//! Type-safe pixel format definitions for GPU textures.
//!
//! Pixel formats are zero-sized types rather than enum variants so that the
//! pixel layout travels in the type system: an
//! [`ImageData`](crate::bindings::software::image::ImageData) of a given
//! format can only be uploaded into a texture of the same format, checked at
//! compile time.
//!
//! Each format names a concrete `CPixel` type with guaranteed C-compatible
//! layout; that type is what you actually read and write when touching pixel
//! rows.

pub(crate) mod png_support;

use crate::pixel_formats::sealed::{PixelFormat, ReprC};

/// Sealed traits for pixel format type safety.
///
/// Only formats defined in this crate can be used with texture APIs; this
/// prevents incompatible pixel layouts from sneaking in from outside.
pub(crate) mod sealed {
    use std::fmt::Debug;

    /// Core trait for pixel format types.
    ///
    /// Sealed; each format specifies its memory layout and pixel type here.
    pub trait PixelFormat:
        std::fmt::Debug + Send + Sync + 'static + crate::imp::PixelFormat
    {
        /// Number of bytes per pixel for this format.
        const BYTES_PER_PIXEL: u8;

        /// Runtime tag identifying the format.
        const TAG: super::PixelFormatTag;

        /// The concrete pixel type with guaranteed C-compatible memory layout.
        type CPixel: Clone + Debug + Send + ReprC;
    }

    /// Marker trait indicating C-compatible memory layout.
    ///
    /// # Safety
    ///
    /// Implementors promise no padding, no uninitialized bytes, and stable
    /// field ordering; violating that makes byte-slice casts UB.
    pub unsafe trait ReprC {}
}

/// Convert a slice of C-compatible pixels to raw bytes.
pub(crate) fn pixel_as_bytes<T: ReprC>(t: &[T]) -> &[u8] {
    //safe because ReprC guarantees the layout
    unsafe { std::slice::from_raw_parts(t.as_ptr() as *const u8, std::mem::size_of_val(t)) }
}

/// Runtime identification of a pixel format.
///
/// The compile-time format types are the source of truth; this tag is what
/// texture accessors hand back when callers ask a finalized texture what it
/// holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PixelFormatTag {
    R8UNorm,
    RGBA8UNorm,
    RGBA8UnormSRGB,
    BGRA8UNormSRGB,
}

/// 8-bit normalized unsigned integer format with a single red channel.
///
/// Values are stored as 0-255 and interpreted as 0.0-1.0 when sampled.
/// Commonly used for grayscale images and alpha masks.
#[derive(Debug, Clone)]
pub struct R8UNorm;
impl PixelFormat for R8UNorm {
    const BYTES_PER_PIXEL: u8 = 1;
    const TAG: PixelFormatTag = PixelFormatTag::R8UNorm;
    type CPixel = u8;
}
unsafe impl ReprC for u8 {}

/// C-compatible RGBA pixel with 8-bit normalized unsigned values.
///
/// This is the pixel type for [`RGBA8UNorm`]. Values range from 0-255 and
/// are interpreted as 0.0-1.0 in shaders.
#[repr(C)]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Unorm4 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}
unsafe impl ReprC for Unorm4 {}
impl Unorm4 {
    /// Convert from normalized float values (0.0-1.0) to 8-bit values (0-255).
    ///
    /// Values are clamped to the valid range and rounded to nearest integer.
    pub fn from_floats(float4: Float4) -> Self {
        Unorm4 {
            r: (float4.r * 255.0).round().clamp(0.0, 255.0) as u8,
            g: (float4.g * 255.0).round().clamp(0.0, 255.0) as u8,
            b: (float4.b * 255.0).round().clamp(0.0, 255.0) as u8,
            a: (float4.a * 255.0).round().clamp(0.0, 255.0) as u8,
        }
    }
}

/// 8-bit normalized unsigned integer format with RGBA channels.
///
/// The most common texture format for color images. Total size is 4 bytes
/// per pixel.
#[derive(Debug, Clone)]
pub struct RGBA8UNorm;
impl PixelFormat for RGBA8UNorm {
    const BYTES_PER_PIXEL: u8 = 4;
    const TAG: PixelFormatTag = PixelFormatTag::RGBA8UNorm;
    type CPixel = Unorm4;
}

/// 8-bit normalized unsigned integer format with RGBA channel order and sRGB
/// encoding.
///
/// This is the format image decoders produce: PNG and JPEG files store RGBA
/// (or RGB) order with gamma-encoded values, and sampling hardware converts
/// to linear automatically.
#[derive(Debug, Clone)]
pub struct RGBA8UnormSRGB;
impl PixelFormat for RGBA8UnormSRGB {
    const BYTES_PER_PIXEL: u8 = 4;
    const TAG: PixelFormatTag = PixelFormatTag::RGBA8UnormSRGB;
    type CPixel = RGBA8UnormSRGBPixel;
}

/// Pixel type for [`RGBA8UnormSRGB`] format.
#[repr(C)]
#[derive(Debug, Clone, PartialEq)]
pub struct RGBA8UnormSRGBPixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}
unsafe impl ReprC for RGBA8UnormSRGBPixel {}

impl RGBA8UnormSRGBPixel {
    /// Transparent black constant.
    pub const ZERO: RGBA8UnormSRGBPixel = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };
}

impl From<RGBA8UnormSRGBPixel> for BGRA8UnormPixelSRGB {
    fn from(f: RGBA8UnormSRGBPixel) -> Self {
        Self {
            r: f.r,
            g: f.g,
            b: f.b,
            a: f.a,
        }
    }
}

/// 8-bit normalized unsigned integer format with BGRA channel order and sRGB
/// encoding.
///
/// The preferred swapchain format on many platforms; BGRA order is optimal
/// for several GPUs and display systems.
#[derive(Debug, Copy, Clone)]
pub struct BGRA8UNormSRGB;
impl PixelFormat for BGRA8UNormSRGB {
    const BYTES_PER_PIXEL: u8 = 4;
    const TAG: PixelFormatTag = PixelFormatTag::BGRA8UNormSRGB;
    type CPixel = BGRA8UnormPixelSRGB;
}

/// Pixel type for [`BGRA8UNormSRGB`] format.
///
/// Stores color values in sRGB space with BGRA channel order. The GPU
/// converts between linear and sRGB automatically when sampling or writing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct BGRA8UnormPixelSRGB {
    pub b: u8,
    pub g: u8,
    pub r: u8,
    pub a: u8,
}
unsafe impl ReprC for BGRA8UnormPixelSRGB {}
impl BGRA8UnormPixelSRGB {
    /// Transparent black constant.
    pub const ZERO: BGRA8UnormPixelSRGB = Self {
        b: 0,
        g: 0,
        r: 0,
        a: 0,
    };

    /// Create from sRGB gamma-corrected float values (0.0-1.0).
    ///
    /// Input values are already in sRGB space and are simply scaled to 0-255.
    #[inline]
    pub fn from_srgb_gamma_floats(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: (255.0 * r).round() as u8,
            g: (255.0 * g).round() as u8,
            b: (255.0 * b).round() as u8,
            a: (255.0 * a).round() as u8,
        }
    }
}

impl From<Float4> for BGRA8UnormPixelSRGB {
    /// Convert from linear to sRGB color space.
    fn from(color: Float4) -> Self {
        let r = if color.r < 0.0031308 {
            12.92 * color.r
        } else {
            1.055 * color.r.powf(1.0 / 2.4) - 0.055
        };
        let g = if color.g < 0.0031308 {
            12.92 * color.g
        } else {
            1.055 * color.g.powf(1.0 / 2.4) - 0.055
        };
        let b = if color.b < 0.0031308 {
            12.92 * color.b
        } else {
            1.055 * color.b.powf(1.0 / 2.4) - 0.055
        };
        let a = color.a;
        Self {
            b: (b * 255.0).round() as u8,
            g: (g * 255.0).round() as u8,
            r: (r * 255.0).round() as u8,
            a: (a * 255.0).round() as u8,
        }
    }
}

/// Four-channel floating point color in linear (not gamma corrected) space.
///
/// Intermediate type for converting between sRGB pixel formats.
#[repr(C)]
#[derive(Clone, Debug, Default)]
pub struct Float4 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}
unsafe impl ReprC for Float4 {}

impl From<BGRA8UnormPixelSRGB> for Float4 {
    /// Convert from sRGB to linear color space.
    fn from(c: BGRA8UnormPixelSRGB) -> Self {
        let r_s = c.r as f32 / 255.0;
        let g_s = c.g as f32 / 255.0;
        let b_s = c.b as f32 / 255.0;
        let a_s = c.a as f32 / 255.0;
        let r = if r_s <= 0.04045 {
            r_s / 12.92
        } else {
            ((r_s + 0.055) / 1.055).powf(2.4)
        };
        let g = if g_s <= 0.04045 {
            g_s / 12.92
        } else {
            ((g_s + 0.055) / 1.055).powf(2.4)
        };
        let b = if b_s <= 0.04045 {
            b_s / 12.92
        } else {
            ((b_s + 0.055) / 1.055).powf(2.4)
        };
        let a = if a_s <= 0.04045 {
            a_s / 12.92
        } else {
            ((a_s + 0.055) / 1.055).powf(2.4)
        };
        Self { r, g, b, a }
    }
}
