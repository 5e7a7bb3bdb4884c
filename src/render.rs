/*! The rendering component of billboard */

pub mod command_list;
pub mod coordinates;
pub mod device;
pub mod quad;
pub mod renderer;
pub mod shader;
pub mod textured_quad;
pub mod transform;

pub use device::BoundDevice;
pub use textured_quad::TexturedQuad;
