use crate::imp::Error;
use crate::pixel_formats::pixel_as_bytes;
use crate::pixel_formats::sealed::PixelFormat;
use crate::render::device::BoundDevice;
use std::marker::PhantomData;
use std::sync::Arc;
use wgpu::util::{DeviceExt, TextureDataOrder};

/**
A static 2D texture holding a single GPU resource, populated at creation.

Data travels through `create_texture_with_data`, which stages and schedules
the upload itself — no separate staging buffer to manage for data that
never changes after creation.
*/
#[derive(Debug)]
pub struct Texture<Format> {
    format: PhantomData<Format>,
    #[allow(dead_code)] //held for its Drop; the view below is what renders
    gpu_texture: wgpu::Texture,
    view: wgpu::TextureView,
    width: u16,
    height: u16,
}

impl<Format: PixelFormat> Texture<Format> {
    pub fn new(
        device: &Arc<BoundDevice>,
        width: u16,
        height: u16,
        data: &[Format::CPixel],
        flip: bool,
        debug_name: &str,
    ) -> Result<Self, Error> {
        let max = device.0.max_texture_dimension_2d();
        if width as u32 > max || height as u32 > max {
            return Err(Error::TextureTooLarge {
                width: width as u32,
                height: height as u32,
                max,
            });
        }

        let bytes = pixel_as_bytes(data);
        let bytes_per_row = width as usize * Format::BYTES_PER_PIXEL as usize;
        let upload;
        let upload_bytes = if flip {
            //rows arrive bottom-up; reverse them so the GPU texture is
            //top-down
            let mut reversed = Vec::with_capacity(bytes.len());
            for row in bytes.chunks_exact(bytes_per_row).rev() {
                reversed.extend_from_slice(row);
            }
            upload = reversed;
            upload.as_slice()
        } else {
            bytes
        };

        let descriptor = wgpu::TextureDescriptor {
            label: Some(debug_name),
            size: wgpu::Extent3d {
                width: width.into(),
                height: height.into(),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Format::WGPU_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        };
        let gpu_texture = device.0.device.create_texture_with_data(
            &device.0.queue,
            &descriptor,
            TextureDataOrder::default(),
            upload_bytes,
        );
        logwise::trace_sync!(
            "uploaded texture {name} {w}x{h}",
            name = logwise::privacy::LogIt(debug_name),
            w = width,
            h = height
        );
        let view = gpu_texture.create_view(&wgpu::TextureViewDescriptor::default());
        Ok(Self {
            format: PhantomData,
            gpu_texture,
            view,
            width,
            height,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn render_side(&self) -> TextureRenderSide {
        TextureRenderSide {
            view: self.view.clone(),
        }
    }
}

/// Cloneable handle to a texture view for the command stream.
#[derive(Debug, Clone)]
pub struct TextureRenderSide {
    pub(super) view: wgpu::TextureView,
}
