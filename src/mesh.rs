// mesh.rs — UV sphere the panorama is painted on, seen from the inside

#[cfg(test)]
#[path = "mesh_test.rs"]
mod mesh_test;

pub const WIDTH_SEGMENTS: usize = 60;
pub const HEIGHT_SEGMENTS: usize = 40;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SphereVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl SphereVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SphereVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SphereMesh {
    pub vertices: Vec<SphereVertex>,
    pub indices: Vec<u32>,
}

/// Sphere whose triangles wind counter-clockwise when seen from the centre.
///
/// `u` runs with the azimuth (0 at +X, growing toward +Z) and `v` runs from the
/// north pole (0, top image row) to the south pole (1), so an equirectangular
/// image maps unmirrored onto the inside.
pub fn build_sphere(radius: f32, width_segments: usize, height_segments: usize) -> SphereMesh {
    let mut vertices = Vec::with_capacity((height_segments + 1) * (width_segments + 1));
    let mut indices = Vec::with_capacity(height_segments * width_segments * 6);

    for i in 0..=height_segments {
        let v = i as f32 / height_segments as f32;
        let polar = std::f32::consts::PI * v;
        let y = radius * polar.cos();
        let ring = radius * polar.sin();

        for j in 0..=width_segments {
            let u = j as f32 / width_segments as f32;
            let azimuth = 2.0 * std::f32::consts::PI * u;
            vertices.push(SphereVertex {
                position: [ring * azimuth.cos(), y, ring * azimuth.sin()],
                uv: [u, v],
            });
        }
    }

    let stride = (width_segments + 1) as u32;
    for i in 0..height_segments as u32 {
        for j in 0..width_segments as u32 {
            let a = i * stride + j;
            let b = a + stride;

            // The pole rows collapse to a point; skip their zero-area halves.
            if i != 0 {
                indices.extend_from_slice(&[a, b, a + 1]);
            }
            if i != height_segments as u32 - 1 {
                indices.extend_from_slice(&[b, b + 1, a + 1]);
            }
        }
    }

    SphereMesh { vertices, indices }
}
