/*! Unit-quad geometry and its bind points. */

use crate::bindings::slot::{SlotKey, SlotTable};
use crate::imp;
use crate::render::command_list::{Command, CommandList};
use crate::render::coordinates::{Rect, Size};
use crate::render::device::BoundDevice;
use std::fmt::Formatter;
use std::sync::Arc;

/// Normalized unit-square positions, triangle-strip order
/// (bottom-left, bottom-right, top-left, top-right).
const QUAD_POSITIONS: [[f32; 2]; 4] = [[-0.5, -0.5], [0.5, -0.5], [-0.5, 0.5], [0.5, 0.5]];

/// Texture coordinates matching [`QUAD_POSITIONS`]; v runs downward so a
/// top-down texture appears upright.
const QUAD_TEXCOORDS: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [0.0, 0.0], [1.0, 0.0]];

/// Vertices in the strip draw.
pub(crate) const QUAD_VERTEX_COUNT: u32 = 4;

#[derive(Debug)]
pub struct CreateError(imp::Error);
impl std::fmt::Display for CreateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
impl std::error::Error for CreateError {}
impl From<imp::Error> for CreateError {
    fn from(e: imp::Error) -> Self {
        Self(e)
    }
}

/// A screen-aligned quad: two GPU vertex buffers plus CPU-side placement
/// state.
///
/// The geometry is a normalized unit square and never changes; `bounds` and
/// `size` describe where the quad should appear, and positioning is
/// delegated to whoever computes the transform (see
/// [`TexturedQuad`](crate::render::textured_quad::TexturedQuad)). Setting
/// bounds therefore never touches a GPU resource.
#[derive(Debug)]
pub struct Quad {
    vertex_buffer: imp::Buffer,
    texcoord_buffer: imp::Buffer,
    slots: SlotTable,
    size: Size,
    bounds: Rect,
}

impl Quad {
    /// Uploads the unit-quad position and texcoord buffers to `device`.
    pub fn new(device: &Arc<BoundDevice>, debug_name: &str) -> Result<Self, CreateError> {
        let vertex_buffer = imp::Buffer::new(
            device,
            bytemuck::cast_slice(&QUAD_POSITIONS),
            &format!("{debug_name}_positions"),
        )?;
        let texcoord_buffer = imp::Buffer::new(
            device,
            bytemuck::cast_slice(&QUAD_TEXCOORDS),
            &format!("{debug_name}_texcoords"),
        )?;
        Ok(Self {
            vertex_buffer,
            texcoord_buffer,
            slots: SlotTable::new(),
            size: Size::new(1.0, 1.0),
            bounds: Rect::ZERO,
        })
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Width over height of the current bounds, guarded against a zero
    /// height so the result is always finite.
    pub fn aspect(&self) -> f32 {
        self.bounds.width / self.bounds.height.max(f32::EPSILON)
    }

    /// Slot currently assigned to a bind point.
    pub fn index(&self, key: SlotKey) -> u32 {
        self.slots.index(key)
    }

    /// Reassigns a bind point's slot.
    ///
    /// All three assignments are optional; the defaults are `Vertex = 0`,
    /// `TexCoord = 1`, `Sampler = 0`.
    pub fn set_index(&mut self, key: SlotKey, slot: u32) {
        self.slots.set_index(key, slot);
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Updates the bounding view rectangle.
    ///
    /// CPU-side state only; the transform consumer reads the new aspect.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Records this quad's binds and its strip draw.
    pub fn encode(&self, list: &mut CommandList) {
        list.push(Command::VertexBuffer {
            slot: self.slots.index(SlotKey::Vertex),
            buffer: self.vertex_buffer.render_side(),
        });
        list.push(Command::VertexBuffer {
            slot: self.slots.index(SlotKey::TexCoord),
            buffer: self.texcoord_buffer.render_side(),
        });
        list.push(Command::DrawStrip {
            vertex_count: QUAD_VERTEX_COUNT,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_order_covers_the_unit_square() {
        //bottom-left, bottom-right, top-left, top-right
        assert_eq!(QUAD_POSITIONS[0], [-0.5, -0.5]);
        assert_eq!(QUAD_POSITIONS[3], [0.5, 0.5]);
        //v points down: the first vertex samples the bottom row
        assert_eq!(QUAD_TEXCOORDS[0], [0.0, 1.0]);
        assert_eq!(QUAD_TEXCOORDS[3], [1.0, 0.0]);
    }
}

//these need a device, which only the no-op backend can conjure without a GPU
#[cfg(all(test, not(feature = "backend_wgpu")))]
mod nop_tests {
    use super::*;

    fn quad() -> Quad {
        let device = test_executors::spin_on(BoundDevice::system_default()).unwrap();
        Quad::new(&device, "test_quad").unwrap()
    }

    #[test]
    fn aspect_of_wide_bounds() {
        let mut quad = quad();
        quad.set_bounds(Rect::new(0.0, 0.0, 200.0, 100.0));
        assert_eq!(quad.aspect(), 2.0);
    }

    #[test]
    fn aspect_of_zero_height_is_finite() {
        let mut quad = quad();
        quad.set_bounds(Rect::new(0.0, 0.0, 100.0, 0.0));
        let aspect = quad.aspect();
        assert!(aspect.is_finite());
        assert!(!aspect.is_nan());
    }

    #[test]
    fn default_indices() {
        let quad = quad();
        assert_eq!(quad.index(SlotKey::Vertex), 0);
        assert_eq!(quad.index(SlotKey::TexCoord), 1);
        assert_eq!(quad.index(SlotKey::Sampler), 0);
    }

    #[test]
    fn set_index_is_isolated() {
        let mut quad = quad();
        quad.set_index(SlotKey::Sampler, 3);
        assert_eq!(quad.index(SlotKey::Sampler), 3);
        assert_eq!(quad.index(SlotKey::Vertex), 0);
        assert_eq!(quad.index(SlotKey::TexCoord), 1);
    }

    #[test]
    fn encode_records_two_binds_and_a_draw() {
        let quad = quad();
        let mut list = CommandList::new();
        quad.encode(&mut list);
        assert_eq!(list.len(), 3);
        assert_eq!(list.draw_count(), 1);
    }
}
