//! Field storage.
//!
//! - [`FieldBuffer`]: owned per-field arrays for a grid or a chunk
//! - [`FieldSliceMut`]: disjoint mutable window used while merging chunks

mod field_buffer;

pub use field_buffer::{FieldBuffer, FieldSliceMut};
