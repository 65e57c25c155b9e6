//! Vertex array/buffer pair for the textured-vertex layout

use crate::render::mesh::{Mesh, Vertex};
use glow::HasContext;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VertexBufferError {
    #[error("could not create vertex buffer: {0}")]
    Create(String),
}

pub struct VertexBuffer {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
}

impl VertexBuffer {
    /// Create the VAO/VBO and declare the vertex layout
    /// (location 0: position vec3, location 1: uv vec2).
    pub fn new(gl: &glow::Context) -> Result<Self, VertexBufferError> {
        let stride = std::mem::size_of::<Vertex>() as i32;
        let uv_offset = std::mem::size_of::<[f32; 3]>() as i32;

        unsafe {
            let vao = gl.create_vertex_array().map_err(VertexBufferError::Create)?;
            let vbo = gl.create_buffer().map_err(VertexBufferError::Create)?;

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));

            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(1, 2, glow::FLOAT, false, stride, uv_offset);

            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_vertex_array(None);

            Ok(Self { vao, vbo })
        }
    }

    /// Replace the buffer contents with the given mesh.
    pub fn upload(&self, gl: &glow::Context, mesh: &Mesh) {
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, mesh.as_bytes(), glow::DYNAMIC_DRAW);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_vertex_array(None);
        }
    }

    pub fn bind(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
        }
    }

    pub fn unbind(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_vertex_array(None);
        }
    }

    /// Issue a triangle draw of `vertex_count` vertices.
    pub fn draw(&self, gl: &glow::Context, vertex_count: usize) {
        unsafe {
            gl.draw_arrays(glow::TRIANGLES, 0, vertex_count as i32);
        }
    }

    pub fn cleanup(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_buffer(self.vbo);
            gl.delete_vertex_array(self.vao);
        }
    }
}
