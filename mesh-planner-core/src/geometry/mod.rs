//! Pure numeric kernels shared by the graph preparation pipeline and the
//! edge-weight engine: distance, angle, traversal angle, and normalization.
//! No state, no I/O; every function is total over its documented domain.

mod primitives;

pub use primitives::{angle, distance, normalize, traversal_angle};
