//! Static mesh supplier
//!
//! Provides the hard-coded geometry drawn by the renderer. There is no file
//! parsing in this version; the data is a mockup quad built at startup.

use crate::render::mesh::{Mesh, Vertex};

/// Holds the vertex data consumed once by the renderer.
///
/// The mesh is populated at construction and read-only afterwards.
pub struct Model {
    vertex_data: Mesh,
}

impl Model {
    /// Build the mockup mesh: a textured quad made of two CCW triangles.
    pub fn new() -> Self {
        let vertices = vec![
            Vertex::new([-0.5, -0.5, 0.5], [0.0, 0.0]),
            Vertex::new([0.5, 0.5, 0.5], [1.0, 1.0]),
            Vertex::new([-0.5, 0.5, 0.5], [0.0, 1.0]),
            Vertex::new([-0.5, -0.5, 0.5], [0.0, 0.0]),
            Vertex::new([0.5, -0.5, 0.5], [1.0, 0.0]),
            Vertex::new([0.5, 0.5, 0.5], [1.0, 1.0]),
        ];

        Self {
            vertex_data: Mesh::new(vertices),
        }
    }

    /// Snapshot of the mesh; the model never mutates it after construction.
    pub fn vertex_data(&self) -> Mesh {
        self.vertex_data.clone()
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_is_whole_triangles() {
        let model = Model::new();
        let mesh = model.vertex_data();

        assert_eq!(mesh.vertex_count() % 3, 0);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_vertices_are_in_ndc_range() {
        let mesh = Model::new().vertex_data();

        for vertex in &mesh.vertices {
            for coord in vertex.position {
                assert!((-1.0..=1.0).contains(&coord));
            }
            for coord in vertex.uv {
                assert!((0.0..=1.0).contains(&coord));
            }
        }
    }

    #[test]
    fn test_vertex_data_is_stable() {
        let model = Model::new();
        let first = model.vertex_data();
        let second = model.vertex_data();

        assert_eq!(first.vertices, second.vertices);
    }
}
