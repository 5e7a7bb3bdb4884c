/*! No-op backend.

Stands in when `backend_wgpu` is off: every operation succeeds, nothing is
allocated, and nothing draws. Command lists still record, which is enough
to run the crate's state machines (and their tests) on machines with no
GPU.
*/

use crate::pixel_formats::{BGRA8UNormSRGB, R8UNorm, RGBA8UNorm, RGBA8UnormSRGB};
use crate::render::command_list::CommandList;
use std::marker::PhantomData;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
#[error("no-op backend error")]
pub(crate) struct Error;

pub trait PixelFormat {}
impl PixelFormat for R8UNorm {}
impl PixelFormat for RGBA8UNorm {}
impl PixelFormat for RGBA8UnormSRGB {}
impl PixelFormat for BGRA8UNormSRGB {}

#[derive(Debug, Clone)]
pub struct EntryPoint;
impl EntryPoint {
    pub async fn new() -> Result<Self, Error> {
        Ok(EntryPoint)
    }
}

pub struct UnboundDevice;

impl UnboundDevice {
    pub async fn pick(
        _entry_point: &crate::entry_point::EntryPoint,
    ) -> Result<UnboundDevice, Error> {
        Ok(UnboundDevice)
    }
}

#[derive(Debug)]
pub struct BoundDevice;

impl BoundDevice {
    pub(crate) async fn bind(
        _unbound_device: crate::render::device::UnboundDevice,
        _entry_point: Arc<crate::entry_point::EntryPoint>,
    ) -> Result<Self, Error> {
        Ok(BoundDevice)
    }
}

#[derive(Debug)]
pub struct Buffer;

impl Buffer {
    pub fn new(
        _device: &Arc<crate::render::device::BoundDevice>,
        _contents: &[u8],
        _debug_name: &str,
    ) -> Result<Self, Error> {
        Ok(Buffer)
    }

    pub fn render_side(&self) -> BufferRenderSide {
        BufferRenderSide
    }
}

#[derive(Debug, Clone)]
pub struct BufferRenderSide;

#[derive(Debug)]
pub struct Texture<Format> {
    format: PhantomData<Format>,
    width: u16,
    height: u16,
}

impl<Format: crate::pixel_formats::sealed::PixelFormat> Texture<Format> {
    pub fn new(
        _device: &Arc<crate::render::device::BoundDevice>,
        width: u16,
        height: u16,
        _data: &[Format::CPixel],
        _flip: bool,
        _debug_name: &str,
    ) -> Result<Self, Error> {
        Ok(Self {
            format: PhantomData,
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
        TextureRenderSide
    }
}

#[derive(Debug, Clone)]
pub struct TextureRenderSide;

#[derive(Debug)]
pub struct QuadPipeline;

impl QuadPipeline {
    pub fn new(_device: &Arc<crate::render::device::BoundDevice>) -> Result<Self, Error> {
        Ok(QuadPipeline)
    }

    pub fn submit(
        &self,
        _device: &Arc<crate::render::device::BoundDevice>,
        _list: &CommandList,
        _target: &RenderTarget,
    ) -> Result<(), Error> {
        Ok(())
    }
}

#[derive(Debug)]
pub struct RenderTarget;

impl RenderTarget {
    pub fn offscreen(
        _device: &Arc<crate::render::device::BoundDevice>,
        _width: u32,
        _height: u32,
        _debug_name: &str,
    ) -> Result<Self, Error> {
        Ok(RenderTarget)
    }
}

