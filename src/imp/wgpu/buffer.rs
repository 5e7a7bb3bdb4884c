use crate::imp::Error;
use crate::render::device::BoundDevice;
use std::sync::Arc;
use wgpu::util::DeviceExt;

/// A static vertex buffer uploaded once at creation.
#[derive(Debug)]
pub struct Buffer {
    buffer: wgpu::Buffer,
}

impl Buffer {
    pub fn new(
        device: &Arc<BoundDevice>,
        contents: &[u8],
        debug_name: &str,
    ) -> Result<Self, Error> {
        let buffer = device
            .0
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(debug_name),
                contents,
                usage: wgpu::BufferUsages::VERTEX,
            });
        Ok(Self { buffer })
    }

    pub fn render_side(&self) -> BufferRenderSide {
        BufferRenderSide {
            buffer: self.buffer.clone(),
        }
    }
}

/// Cloneable handle to a buffer for the command stream.
#[derive(Debug, Clone)]
pub struct BufferRenderSide {
    pub(super) buffer: wgpu::Buffer,
}
