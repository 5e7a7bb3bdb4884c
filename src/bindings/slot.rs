//! Bind-point bookkeeping for quad geometry.
//!
//! A quad owns three bind points: the position buffer, the texture-coordinate
//! buffer, and the sampler. Each is identified by a [`SlotKey`] and resolves
//! to a numeric slot in the command stream. The keys are a closed enum so a
//! typo'd bind point is a compile error, not a silent mis-bind.

/// Identifies one of a quad's bind points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKey {
    /// The position vertex buffer.
    Vertex,
    /// The texture-coordinate vertex buffer.
    TexCoord,
    /// The texture sampler.
    Sampler,
}

/// Maps each [`SlotKey`] to its numeric slot.
///
/// Defaults are `Vertex = 0`, `TexCoord = 1`, `Sampler = 0`. Vertex and
/// texcoord slots index the backend's vertex-buffer table; the sampler slot
/// is carried in the command stream for the consumer of the encoded list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotTable {
    vertex: u32,
    texcoord: u32,
    sampler: u32,
}

impl SlotTable {
    pub fn new() -> Self {
        Self {
            vertex: 0,
            texcoord: 1,
            sampler: 0,
        }
    }

    /// Returns the slot currently assigned to `key`.
    pub fn index(&self, key: SlotKey) -> u32 {
        match key {
            SlotKey::Vertex => self.vertex,
            SlotKey::TexCoord => self.texcoord,
            SlotKey::Sampler => self.sampler,
        }
    }

    /// Reassigns the slot for `key`, leaving the other bind points unchanged.
    pub fn set_index(&mut self, key: SlotKey, slot: u32) {
        match key {
            SlotKey::Vertex => self.vertex = slot,
            SlotKey::TexCoord => self.texcoord = slot,
            SlotKey::Sampler => self.sampler = slot,
        }
    }
}

impl Default for SlotTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_slots() {
        let table = SlotTable::new();
        assert_eq!(table.index(SlotKey::Vertex), 0);
        assert_eq!(table.index(SlotKey::TexCoord), 1);
        assert_eq!(table.index(SlotKey::Sampler), 0);
    }

    #[test]
    fn set_index_leaves_others_unchanged() {
        let mut table = SlotTable::new();
        table.set_index(SlotKey::Sampler, 3);
        assert_eq!(table.index(SlotKey::Sampler), 3);
        assert_eq!(table.index(SlotKey::Vertex), 0);
        assert_eq!(table.index(SlotKey::TexCoord), 1);
    }
}
