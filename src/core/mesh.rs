use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Indexed triangle list in object space.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// UV sphere centred on the origin.
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Mesh {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let mut mesh = Mesh::default();
    mesh.vertices.reserve(((ws + 1) * (hs + 1)) as usize);
    for y in 0..=hs {
        let v = y as f32 / hs as f32;
        let theta = v * PI;
        for x in 0..=ws {
            let u = x as f32 / ws as f32;
            let phi = u * TAU;
            let n = [
                -phi.cos() * theta.sin(),
                theta.cos(),
                phi.sin() * theta.sin(),
            ];
            mesh.vertices.push(Vertex {
                position: [n[0] * radius, n[1] * radius, n[2] * radius],
                normal: n,
            });
        }
    }
    let row = ws + 1;
    for y in 0..hs {
        for x in 0..ws {
            let a = y * row + x + 1;
            let b = y * row + x;
            let c = (y + 1) * row + x;
            let d = (y + 1) * row + x + 1;
            // poles collapse to a single triangle
            if y != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if y != hs - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

/// Flat annulus in the XY plane facing +Z.
pub fn ring(inner: f32, outer: f32, segments: u32) -> Mesh {
    let segs = segments.max(3);
    let mut mesh = Mesh::default();
    for i in 0..=segs {
        let a = i as f32 / segs as f32 * TAU;
        let (s, c) = a.sin_cos();
        for r in [inner, outer] {
            mesh.vertices.push(Vertex {
                position: [c * r, s * r, 0.0],
                normal: [0.0, 0.0, 1.0],
            });
        }
    }
    for i in 0..segs {
        let i0 = i * 2;
        let o0 = i0 + 1;
        let i1 = i0 + 2;
        let o1 = i0 + 3;
        mesh.indices.extend_from_slice(&[i0, o0, o1, i0, o1, i1]);
    }
    mesh
}

/// Axis-aligned quad in the XY plane facing +Z.
pub fn plane(width: f32, height: f32) -> Mesh {
    let hw = width * 0.5;
    let hh = height * 0.5;
    let n = [0.0, 0.0, 1.0];
    Mesh {
        vertices: vec![
            Vertex { position: [-hw, -hh, 0.0], normal: n },
            Vertex { position: [hw, -hh, 0.0], normal: n },
            Vertex { position: [hw, hh, 0.0], normal: n },
            Vertex { position: [-hw, hh, 0.0], normal: n },
        ],
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}
