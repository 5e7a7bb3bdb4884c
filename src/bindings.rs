/*! Defines binding types */

pub mod sampler;
pub mod slot;
pub mod software;
pub mod texture;

pub use slot::{SlotKey, SlotTable};
