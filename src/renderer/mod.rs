//! WebGPU rendering module
//!
//! The scene is built on the CPU as a triangle list in canvas pixels and
//! uploaded once per frame.

pub mod color;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, needs_reconfigure};
pub use scene::{SceneOptions, build_scene};
pub use vertex::Vertex;
