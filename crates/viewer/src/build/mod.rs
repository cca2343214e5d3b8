//! Segment geometry compilation and the per-segment list cache.

mod cache;
mod primitives;

pub use cache::GeometryCache;
pub use primitives::{apply_step, emit_primitive, emit_shape};
