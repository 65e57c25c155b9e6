//! Vertex data handed from the model to the renderer

use bytemuck::{Pod, Zeroable};

/// A single textured vertex: position in NDC plus texture coordinates.
///
/// `#[repr(C)]` keeps the memory layout stable so the whole vertex slice can
/// be uploaded to the GPU as raw bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub fn new(position: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, uv }
    }
}

/// An ordered sequence of vertices, drawn as a triangle list.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self { vertices }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of complete triangles in the mesh. A vertex count that is not
    /// a multiple of 3 truncates; the remainder is never drawn.
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Raw bytes of the vertex data, suitable for a GPU buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex() -> Vertex {
        Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0])
    }

    #[test]
    fn test_triangle_count_exact_multiple() {
        let mesh = Mesh::new(vec![vertex(); 6]);
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_triangle_count_truncates() {
        let mesh = Mesh::new(vec![vertex(); 7]);
        assert_eq!(mesh.triangle_count(), 2);

        let mesh = Mesh::new(vec![vertex(); 2]);
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = Mesh::default();
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.as_bytes().is_empty());
    }

    #[test]
    fn test_byte_size_matches_layout() {
        // position (3 floats) + uv (2 floats) = 20 bytes per vertex
        assert_eq!(std::mem::size_of::<Vertex>(), 20);

        let mesh = Mesh::new(vec![vertex(); 3]);
        assert_eq!(mesh.as_bytes().len(), 3 * 20);
    }
}
