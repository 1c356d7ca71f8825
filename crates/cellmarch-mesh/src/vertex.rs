/// Vertex emitted by isosurface extraction, laid out for direct GPU upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub colour: [f32; 4],
}

impl MeshVertex {
    pub fn new(position: [f32; 3], colour: [f32; 4]) -> Self {
        Self { position, colour }
    }
}

/// View a vertex slice as raw bytes for a vertex buffer upload.
pub fn as_bytes(vertices: &[MeshVertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}
