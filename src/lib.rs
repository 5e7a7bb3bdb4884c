/*! billboard is GPU middleware for the oldest trick in real-time graphics:
load an image, upload it to a texture, and draw the texture on a quad.

Most renderers reimplement this plumbing from scratch — an image decoder
feeding a texture upload, a unit quad with texture coordinates, a transform
that places the quad under the current aspect ratio, and the glue that
binds all three into a draw call. billboard packages that plumbing as a
small set of composable objects:

| Component | Role |
|-----------|------|
| [`bindings::software::image::ImageData`] | decoded CPU-side pixels plus orientation metadata |
| [`bindings::texture::QuadTexture`] | one-shot upload into a GPU-resident 2D texture |
| [`render::quad::Quad`] | unit-quad geometry, slot table, bounds and aspect |
| [`render::textured_quad::TexturedQuad`] | facade composing texture + quad + transform behind a single `encode` |
| [`render::renderer::QuadRenderer`] | pipeline owner that replays encoded commands into a render target |

# Encoding model

`encode` never talks to the GPU directly. It appends typed bind/draw
commands to a [`render::command_list::CommandList`], and the renderer
replays the list against the backend at present time. This keeps the
facade deterministic and testable: a facade that failed to initialize
encodes nothing, and a test can count draw commands without a device.

# Backends

Current development targets [wgpu](https://wgpu.rs) behind the
`backend_wgpu` feature (on by default), inheriting its support for DX12,
Vulkan, Metal and friends. With the feature off, a no-op backend stands in:
every operation succeeds, nothing is allocated, and command lists are still
recorded — which is how the state-machine tests run on machines with no GPU
at all.

# Threading

All operations run on the caller's thread and never suspend internally
(image loads await file IO only). Objects here are not safe for concurrent
mutation; serialize `set_bounds` and `encode` on whatever thread owns
command submission.
*/

logwise::declare_logging_domain!();

pub mod bindings;
pub mod entry_point;
mod imp;
pub mod pixel_formats;
pub mod render;

pub use glam;
