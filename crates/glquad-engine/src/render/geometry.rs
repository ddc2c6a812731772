use bytemuck::{Pod, Zeroable};

use super::api::GlApi;
use super::error::RenderError;

// ── vertex format ─────────────────────────────────────────────────────────

/// One quad corner in normalized device coordinates.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 3],
}

impl QuadVertex {
    /// Attribute slot read by `layout (location = 0)` in the vertex shader.
    pub const POSITION_SLOT: u32 = 0;
    pub const POSITION_COMPONENTS: i32 = 3;
    pub const STRIDE: i32 = std::mem::size_of::<QuadVertex>() as i32;
}

pub const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { position: [0.5, 0.5, 0.0] },   // top right
    QuadVertex { position: [0.5, -0.5, 0.0] },  // bottom right
    QuadVertex { position: [-0.5, -0.5, 0.0] }, // bottom left
    QuadVertex { position: [-0.5, 0.5, 0.0] },  // top left
];

/// Two triangles sharing the top-left/bottom-right diagonal.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

// ── mesh ──────────────────────────────────────────────────────────────────

/// GPU-side quad: vertex array, vertex buffer and index buffer.
///
/// The three objects are created and released together. The type is neither
/// `Clone` nor `Copy`, so a handle cannot outlive its siblings; call
/// [`QuadMesh::release`] while the owning context is still current.
pub struct QuadMesh<G: GlApi> {
    vao: G::VertexArray,
    vbo: G::Buffer,
    ibo: G::Buffer,
}

impl<G: GlApi> QuadMesh<G> {
    /// Allocates the three objects and uploads [`QUAD_VERTICES`] / [`QUAD_INDICES`].
    ///
    /// Leaves no vertex array and no `ARRAY_BUFFER` bound on return.
    pub fn upload(gl: &G) -> Result<Self, RenderError> {
        let vao = gl
            .create_vertex_array()
            .map_err(|reason| RenderError::create("vertex array", reason))?;

        let vbo = match gl.create_buffer() {
            Ok(b) => b,
            Err(reason) => {
                gl.delete_vertex_array(vao);
                return Err(RenderError::create("vertex buffer", reason));
            }
        };

        let ibo = match gl.create_buffer() {
            Ok(b) => b,
            Err(reason) => {
                gl.delete_buffer(vbo);
                gl.delete_vertex_array(vao);
                return Err(RenderError::create("index buffer", reason));
            }
        };

        gl.bind_vertex_array(Some(vao));

        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(&QUAD_VERTICES),
            glow::STATIC_DRAW,
        );

        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ibo));
        gl.buffer_data(
            glow::ELEMENT_ARRAY_BUFFER,
            bytemuck::cast_slice(&QUAD_INDICES),
            glow::STATIC_DRAW,
        );

        gl.vertex_attrib_pointer_f32(
            QuadVertex::POSITION_SLOT,
            QuadVertex::POSITION_COMPONENTS,
            false,
            QuadVertex::STRIDE,
            0,
        );
        gl.enable_vertex_attrib_array(QuadVertex::POSITION_SLOT);

        // The attribute pointer captured the vertex buffer.
        gl.bind_buffer(glow::ARRAY_BUFFER, None);

        // The element buffer binding is VAO state: unbinding it here would
        // detach the indices. Unbind the VAO instead.
        gl.bind_vertex_array(None);

        log::debug!(
            "quad mesh uploaded: {} vertices, {} indices (vao={vao:?}, vbo={vbo:?}, ibo={ibo:?})",
            QUAD_VERTICES.len(),
            QUAD_INDICES.len()
        );

        Ok(Self { vao, vbo, ibo })
    }

    #[inline]
    pub fn index_count(&self) -> i32 {
        QUAD_INDICES.len() as i32
    }

    #[inline]
    pub fn vertex_array(&self) -> G::VertexArray {
        self.vao
    }

    #[inline]
    pub fn vertex_buffer(&self) -> G::Buffer {
        self.vbo
    }

    #[inline]
    pub fn index_buffer(&self) -> G::Buffer {
        self.ibo
    }

    /// Binds the vertex array (and with it the index buffer).
    pub fn bind(&self, gl: &G) {
        gl.bind_vertex_array(Some(self.vao));
    }

    /// Deletes all three objects.
    pub fn release(self, gl: &G) {
        gl.delete_vertex_array(self.vao);
        gl.delete_buffer(self.vbo);
        gl.delete_buffer(self.ibo);
    }
}
