//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct for managing mesh data on the GPU side.
//! Vertices should implement the [`Vertex`] trait. Draw calls go through a
//! [`VertexArrayBinding`], which rebinds the previously bound vertex array when dropped.

use std::{fmt, mem::offset_of, sync::Arc};

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use super::gl::GlBackend;

/// Trait that defines the necessary methods for a vertex.
pub trait Vertex: Pod {
    /// Sets up the vertex attribute pointers for the vertex.
    fn vertex_attribs<G: GlBackend>(gl: &G);
}

/// A vertex with only a position, at attribute location 0.
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct PositionVertex {
    pub position: Vec3,
}

impl PositionVertex {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
        }
    }
}

impl Vertex for PositionVertex {
    fn vertex_attribs<G: GlBackend>(gl: &G) {
        let stride = size_of::<PositionVertex>() as i32;

        gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
        gl.enable_vertex_attrib_array(0);
    }
}

/// A vertex with a position (location 0) and an RGB color (location 1).
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct ColorVertex {
    pub position: Vec3,
    pub color: Vec3,
}

impl ColorVertex {
    pub const fn new(position: Vec3, color: Vec3) -> Self {
        Self { position, color }
    }
}

impl Vertex for ColorVertex {
    fn vertex_attribs<G: GlBackend>(gl: &G) {
        let stride = size_of::<ColorVertex>() as i32;

        // Position attribute
        gl.vertex_attrib_pointer_f32(
            0,
            3,
            glow::FLOAT,
            false,
            stride,
            offset_of!(ColorVertex, position) as i32,
        );
        gl.enable_vertex_attrib_array(0);

        // Color attribute
        gl.vertex_attrib_pointer_f32(
            1,
            3,
            glow::FLOAT,
            false,
            stride,
            offset_of!(ColorVertex, color) as i32,
        );
        gl.enable_vertex_attrib_array(1);
    }
}

/// Errors raised while creating or drawing a [`Mesh`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// The driver refused to create a vertex array or buffer.
    Allocation(String),
    /// A draw range reaches past the last vertex.
    RangeOutOfBounds {
        first: usize,
        count: usize,
        vertex_count: usize,
    },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocation(msg) => write!(f, "failed to create mesh object: {msg}"),
            Self::RangeOutOfBounds {
                first,
                count,
                vertex_count,
            } => write!(
                f,
                "cannot draw {count} vertices from {first}: mesh has {vertex_count} vertices"
            ),
        }
    }
}

impl std::error::Error for MeshError {}

/// Represents a mesh stored on the GPU side.
pub struct Mesh<G: GlBackend = glow::Context> {
    gl: Arc<G>,
    draw_mode: u32,
    vao: G::VertexArray,
    vbo: G::Buffer,
    ebo: Option<G::Buffer>,
    vertex_count: usize,
    index_count: usize,
}

impl<G: GlBackend> Mesh<G> {
    /// Creates a new mesh drawn straight from its vertices.
    pub fn new<V: Vertex>(
        gl: &Arc<G>,
        vertices: &[V],
        draw_mode: u32,
    ) -> Result<Self, MeshError> {
        Self::upload(gl, vertices, None, draw_mode)
    }

    /// Creates a new mesh drawn through an index buffer.
    pub fn indexed<V: Vertex>(
        gl: &Arc<G>,
        vertices: &[V],
        indices: &[u32],
        draw_mode: u32,
    ) -> Result<Self, MeshError> {
        Self::upload(gl, vertices, Some(indices), draw_mode)
    }

    fn upload<V: Vertex>(
        gl: &Arc<G>,
        vertices: &[V],
        indices: Option<&[u32]>,
        draw_mode: u32,
    ) -> Result<Self, MeshError> {
        let vao = gl.create_vertex_array().map_err(MeshError::Allocation)?;
        let vbo = match gl.create_buffer() {
            Ok(vbo) => vbo,
            Err(e) => {
                gl.delete_vertex_array(vao);
                return Err(MeshError::Allocation(e));
            }
        };

        // From here on a failure drops `mesh`, which releases whatever was created.
        let mut mesh = Self {
            gl: Arc::clone(gl),
            draw_mode,
            vao,
            vbo,
            ebo: None,
            vertex_count: vertices.len(),
            index_count: indices.map_or(0, <[u32]>::len),
        };
        if indices.is_some() {
            mesh.ebo = Some(gl.create_buffer().map_err(MeshError::Allocation)?);
        }

        let binding = mesh.bind();

        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(vertices),
            glow::STATIC_DRAW,
        );

        if let (Some(ebo), Some(indices)) = (mesh.ebo, indices) {
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(indices),
                glow::STATIC_DRAW,
            );
        }

        V::vertex_attribs(&**gl);

        // The element buffer binding is vertex array state and has to stay.
        gl.bind_buffer(glow::ARRAY_BUFFER, None);
        drop(binding);

        log::debug!(
            "uploaded mesh {:?} ({} vertices, {} indices)",
            mesh.vao,
            mesh.vertex_count,
            mesh.index_count
        );

        Ok(mesh)
    }

    /// Binds the vertex array until the returned guard is dropped.
    ///
    /// The vertex array bound before is bound again when the guard drops.
    pub fn bind(&self) -> VertexArrayBinding<'_, G> {
        let previous = self.gl.current_vertex_array();
        self.gl.bind_vertex_array(Some(self.vao));
        VertexArrayBinding {
            mesh: self,
            previous,
        }
    }

    /// Draws the whole mesh.
    pub fn draw(&self) {
        self.bind().draw();
    }
}

impl<G: GlBackend> Drop for Mesh<G> {
    fn drop(&mut self) {
        self.gl.delete_buffer(self.vbo);
        if let Some(ebo) = self.ebo {
            self.gl.delete_buffer(ebo);
        }
        self.gl.delete_vertex_array(self.vao);
    }
}

/// Keeps a [`Mesh`]'s vertex array bound. Dropping it restores the previous binding.
pub struct VertexArrayBinding<'a, G: GlBackend = glow::Context> {
    mesh: &'a Mesh<G>,
    previous: Option<G::VertexArray>,
}

impl<G: GlBackend> VertexArrayBinding<'_, G> {
    /// Draws every vertex, or every index for indexed meshes.
    pub fn draw(&self) {
        let mesh = self.mesh;
        if mesh.ebo.is_some() {
            mesh.gl.draw_elements(
                mesh.draw_mode,
                mesh.index_count as i32,
                glow::UNSIGNED_INT,
                0,
            );
        } else {
            mesh.gl
                .draw_arrays(mesh.draw_mode, 0, mesh.vertex_count as i32);
        }
    }

    /// Draws `count` vertices starting at `first`, ignoring any index buffer.
    pub fn draw_range(&self, first: usize, count: usize) -> Result<(), MeshError> {
        let mesh = self.mesh;
        if first
            .checked_add(count)
            .is_none_or(|end| end > mesh.vertex_count)
        {
            return Err(MeshError::RangeOutOfBounds {
                first,
                count,
                vertex_count: mesh.vertex_count,
            });
        }
        mesh.gl
            .draw_arrays(mesh.draw_mode, first as i32, count as i32);
        Ok(())
    }
}

impl<G: GlBackend> Drop for VertexArrayBinding<'_, G> {
    fn drop(&mut self) {
        self.mesh.gl.bind_vertex_array(self.previous);
    }
}
