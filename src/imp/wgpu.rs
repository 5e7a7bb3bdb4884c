mod bound_device;
mod buffer;
mod entry_point;
mod error;
mod pipeline;
mod pixel_format;
mod sampler;
mod texture;
mod unbound_device;

pub use bound_device::BoundDevice;
pub use buffer::{Buffer, BufferRenderSide};
pub use entry_point::EntryPoint;
pub(crate) use error::Error;
pub use pipeline::{QuadPipeline, RenderTarget};
pub use pixel_format::PixelFormat;
pub use texture::{Texture, TextureRenderSide};
pub use unbound_device::UnboundDevice;
