/*! Typed draw-command recording.

Encoding in billboard never talks to the GPU. [`Quad::encode`] and
[`TexturedQuad::encode`] append typed commands to a [`CommandList`]; the
renderer replays the list against the backend when presenting. Resources
are not bound when a command is recorded — the list is a description, in
the same spirit as a bind-style object that a backend consumes later.

Because the list is plain data, tests can assert on it directly: an
invalid facade encodes nothing, which shows up here as
[`CommandList::draw_count`] staying at zero.

[`Quad::encode`]: crate::render::quad::Quad::encode
[`TexturedQuad::encode`]: crate::render::textured_quad::TexturedQuad::encode
*/

use crate::bindings::sampler::SamplerType;
use crate::imp;

/// One recorded bind or draw.
#[derive(Debug, Clone)]
pub(crate) enum Command {
    ///Bind a vertex buffer at a numbered slot.
    VertexBuffer {
        slot: u32,
        buffer: imp::BufferRenderSide,
    },
    ///Bind the quad's texture for the fragment stage.
    Texture { texture: imp::TextureRenderSide },
    ///Bind a sampler at a numbered slot.
    Sampler { slot: u32, sampler: SamplerType },
    ///Bind the MVP transform as a uniform.
    Transform { matrix: [[f32; 4]; 4] },
    ///Draw a triangle strip.
    DrawStrip { vertex_count: u32 },
}

/// An append-only list of recorded commands.
#[derive(Debug, Clone, Default)]
pub struct CommandList {
    commands: Vec<Command>,
}

impl CommandList {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub(crate) fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Number of recorded commands of any kind.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of recorded draw commands.
    pub fn draw_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::DrawStrip { .. }))
            .count()
    }

    /// Discards all recorded commands, keeping the allocation.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_has_no_draws() {
        let list = CommandList::new();
        assert!(list.is_empty());
        assert_eq!(list.draw_count(), 0);
    }

    #[test]
    fn draw_count_counts_only_draws() {
        let mut list = CommandList::new();
        list.push(Command::Transform {
            matrix: [[0.0; 4]; 4],
        });
        list.push(Command::DrawStrip { vertex_count: 4 });
        assert_eq!(list.len(), 2);
        assert_eq!(list.draw_count(), 1);
        list.clear();
        assert_eq!(list.draw_count(), 0);
    }
}
