use glium::backend::Facade;
use glium::index::PrimitiveType;
use glium::{implement_vertex, IndexBuffer, VertexBuffer};

use crate::buffer::AttributeBuffer;
use crate::float::IntoArray;
use crate::geometry::{Geometry, Topology};

/// Vertex for GL usage. Channels the source buffer does not carry are
/// filled with neutral values.
#[derive(Copy, Clone, Debug, Default)]
pub struct RawVertex {
    pub pos: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
    pub color: [f32; 4],
}

implement_vertex!(RawVertex, pos, normal, tex_coords, color);

/// A geometry uploaded to the GPU.
pub struct GpuGeometry {
    pub vertex_buffer: VertexBuffer<RawVertex>,
    pub index_buffer: IndexBuffer<u32>,
}

impl GpuGeometry {
    pub fn new<F: Facade>(facade: &F, geometry: &Geometry) -> GpuGeometry {
        let buffer = geometry.buffer();
        let vertices: Vec<RawVertex> = (0..buffer.vertex_count())
            .map(|i| raw_vertex(buffer, i))
            .collect();
        let indices = index_vec(geometry);
        log::debug!(
            "Uploading geometry with {} vertices and {} indices",
            vertices.len(),
            indices.len()
        );
        let vertex_buffer =
            VertexBuffer::new(facade, &vertices).expect("Failed to create vertex buffer!");
        let index_buffer = IndexBuffer::new(facade, primitive_type(geometry.topology()), &indices)
            .expect("Failed to create index buffer!");
        GpuGeometry {
            vertex_buffer,
            index_buffer,
        }
    }
}

impl Geometry {
    /// Uploads the geometry so it can be drawn.
    pub fn upload<F: Facade>(&self, facade: &F) -> GpuGeometry {
        GpuGeometry::new(facade, self)
    }
}

fn raw_vertex(buffer: &AttributeBuffer, i: usize) -> RawVertex {
    let normal = if buffer.format().normals {
        buffer.normal(i).into_array()
    } else {
        [0.0; 3]
    };
    let t = buffer.tex_coord(i);
    let tex_coords = if t.len() >= 2 {
        [t[0] as f32, t[1] as f32]
    } else {
        [0.0; 2]
    };
    let c = buffer.color(i);
    let color = match c.len() {
        3 => [c[0] as f32, c[1] as f32, c[2] as f32, 1.0],
        4 => [c[0] as f32, c[1] as f32, c[2] as f32, c[3] as f32],
        _ => [1.0; 4],
    };
    RawVertex {
        pos: buffer.vertex(i).into_array(),
        normal,
        tex_coords,
        color,
    }
}

/// GL has no quad primitive, so quad faces are split into two
/// triangles; the other topologies upload their elements as they are.
fn index_vec(geometry: &Geometry) -> Vec<u32> {
    let buffer = geometry.buffer();
    match geometry.topology() {
        Topology::Quads => {
            let mut indices = Vec::with_capacity(geometry.face_count() * 6);
            for face in 0..geometry.face_count() {
                let base = 4 * face;
                for &corner in &[0, 1, 2, 0, 2, 3] {
                    indices.push(buffer.element_index(base + corner) as u32);
                }
            }
            indices
        }
        Topology::Triangles => (0..geometry.face_count() * 3)
            .map(|i| buffer.element_index(i) as u32)
            .collect(),
        _ => (0..buffer.size())
            .map(|i| buffer.element_index(i) as u32)
            .collect(),
    }
}

fn primitive_type(topology: Topology) -> PrimitiveType {
    match topology {
        Topology::TriangleFan => PrimitiveType::TriangleFan,
        Topology::TriangleStrip => PrimitiveType::TriangleStrip,
        Topology::Triangles | Topology::Quads => PrimitiveType::TrianglesList,
    }
}
