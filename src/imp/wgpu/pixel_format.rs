use crate::pixel_formats::{BGRA8UNormSRGB, R8UNorm, RGBA8UNorm, RGBA8UnormSRGB};

pub trait PixelFormat {
    const WGPU_FORMAT: wgpu::TextureFormat;
}

impl PixelFormat for R8UNorm {
    const WGPU_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::R8Unorm;
}
impl PixelFormat for RGBA8UNorm {
    const WGPU_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
}
impl PixelFormat for RGBA8UnormSRGB {
    const WGPU_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;
}
impl PixelFormat for BGRA8UNormSRGB {
    const WGPU_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Bgra8UnormSrgb;
}
