//! Rendering subsystem: the OpenGL renderer and its GPU resources

pub mod framebuffer;
pub mod mesh;
pub mod renderer;
pub mod shader;
pub mod texture;
pub mod vertex_buffer;

pub use renderer::{RenderError, Renderer};
