//! WebGPU rendering module
//!
//! Reads a [`Snapshot`](crate::sim::Snapshot) each frame, builds flat-colored
//! triangles in world space and draws them through the camera.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState, world_to_ndc};
pub use shapes::scene;
pub use vertex::Vertex;
