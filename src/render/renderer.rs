//! OpenGL renderer
//!
//! Owns the GL context and every GPU resource: off-screen framebuffer,
//! texture, vertex buffer and shader program. Each frame is drawn into the
//! framebuffer and blitted to the screen.

use crate::config::AssetPaths;
use crate::render::framebuffer::{Framebuffer, FramebufferError};
use crate::render::mesh::Mesh;
use crate::render::shader::{ShaderError, ShaderProgram};
use crate::render::texture::{Texture, TextureError};
use crate::render::vertex_buffer::{VertexBuffer, VertexBufferError};
use glow::HasContext;
use thiserror::Error;

/// Minimum OpenGL version this renderer requires.
const REQUIRED_GL_VERSION: (u32, u32) = (4, 6);

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("OpenGL {}.{} required, context reports {major}.{minor}", REQUIRED_GL_VERSION.0, REQUIRED_GL_VERSION.1)]
    VersionUnsupported { major: u32, minor: u32 },

    #[error("framebuffer init failed: {0}")]
    Framebuffer(#[from] FramebufferError),

    #[error("texture loading failed: {0}")]
    Texture(#[from] TextureError),

    #[error("vertex buffer creation failed: {0}")]
    VertexBuffer(#[from] VertexBufferError),

    #[error("shader loading failed: {0}")]
    Shader(#[from] ShaderError),
}

pub struct Renderer {
    gl: glow::Context,
    framebuffer: Framebuffer,
    texture: Texture,
    vertex_buffer: VertexBuffer,
    shader: ShaderProgram,
    triangle_count: usize,
    width: u32,
    height: u32,
}

fn is_minimized(width: u32, height: u32) -> bool {
    width == 0 || height == 0
}

impl Renderer {
    /// Validate the context version, then bring up framebuffer, texture,
    /// vertex buffer and shader program, in that order. Any sub-step failure
    /// short-circuits.
    pub fn new(
        gl: glow::Context,
        width: u32,
        height: u32,
        assets: &AssetPaths,
    ) -> Result<Self, RenderError> {
        let version = gl.version();
        let (major, minor) = (version.major, version.minor);
        if (major, minor) < REQUIRED_GL_VERSION || version.is_embedded {
            return Err(RenderError::VersionUnsupported { major, minor });
        }
        log::info!("OpenGL {}.{} initialized", major, minor);

        let framebuffer = Framebuffer::new(&gl, width, height)?;
        log::info!("framebuffer successfully initialized");

        let texture = Texture::load(&gl, &assets.texture)?;
        log::info!("texture successfully loaded");

        let vertex_buffer = VertexBuffer::new(&gl)?;
        log::info!("vertex buffer successfully created");

        let shader = ShaderProgram::load(&gl, &assets.vertex_shader, &assets.fragment_shader)?;
        log::info!("shaders successfully loaded");

        unsafe {
            gl.viewport(0, 0, width as i32, height as i32);
        }

        Ok(Self {
            gl,
            framebuffer,
            texture,
            vertex_buffer,
            shader,
            triangle_count: 0,
            width,
            height,
        })
    }

    /// Resize framebuffer and viewport. A zero dimension means the window is
    /// minimized; everything stays untouched.
    pub fn set_size(&mut self, width: u32, height: u32) {
        if is_minimized(width, height) {
            return;
        }

        self.framebuffer.resize(&self.gl, width, height);
        unsafe {
            self.gl.viewport(0, 0, width as i32, height as i32);
        }
        self.width = width;
        self.height = height;
        log::info!("resized renderer to {}x{}", width, height);
    }

    #[allow(dead_code)]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Replace the vertex buffer contents and recompute the triangle count.
    pub fn upload_data(&mut self, mesh: Mesh) {
        self.triangle_count = mesh.triangle_count();
        self.vertex_buffer.upload(&self.gl, &mesh);
    }

    #[allow(dead_code)]
    pub fn triangle_count(&self) -> usize {
        self.triangle_count
    }

    /// Draw one frame into the framebuffer and blit it to the screen.
    pub fn draw(&mut self) {
        let gl = &self.gl;

        self.framebuffer.bind(gl);
        unsafe {
            gl.clear_color(0.06, 0.46, 0.95, 1.0);
            gl.clear_depth_f32(1.0);
            gl.enable(glow::DEPTH_TEST);
            gl.enable(glow::CULL_FACE);
            gl.cull_face(glow::BACK);
            gl.front_face(glow::CCW);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        self.shader.bind(gl);
        self.texture.bind(gl);
        self.vertex_buffer.bind(gl);
        self.vertex_buffer.draw(gl, self.triangle_count * 3);
        self.vertex_buffer.unbind(gl);
        self.texture.unbind(gl);

        self.framebuffer.unbind(gl);
        self.framebuffer.draw_to_screen(gl);
    }

    /// Release GPU resources: shader, texture, vertex buffer, framebuffer.
    pub fn cleanup(&mut self) {
        self.shader.cleanup(&self.gl);
        self.texture.cleanup(&self.gl);
        self.vertex_buffer.cleanup(&self.gl);
        self.framebuffer.cleanup(&self.gl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimized_guard() {
        assert!(is_minimized(0, 480));
        assert!(is_minimized(640, 0));
        assert!(is_minimized(0, 0));
        assert!(!is_minimized(640, 480));
        assert!(!is_minimized(1, 1));
    }
}
