use crate::pixel_formats::RGBA8UnormSRGB;
use png::{BitDepth, ColorType};

/// Maps a pixel format onto the PNG color type / bit depth it can be decoded
/// from directly, without channel conversion.
///
/// # Safety
///
/// Implementors promise that a decoded PNG row of the declared color type and
/// bit depth has exactly the memory layout of `Format::CPixel`.
pub unsafe trait PngPixelFormat {
    fn png_color_type() -> png::ColorType;
    fn png_bit_depth() -> png::BitDepth;
}

unsafe impl PngPixelFormat for RGBA8UnormSRGB {
    fn png_color_type() -> ColorType {
        ColorType::Rgba
    }

    fn png_bit_depth() -> BitDepth {
        BitDepth::Eight
    }
}
