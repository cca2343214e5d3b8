use glam::{Mat3, Mat4, Vec3};

/// CPU-side mesh data: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z, r, g, b]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    /// 9 floats per vertex: position(3) + normal(3) + color(3)
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 9
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn position(&self, i: usize) -> Vec3 {
        let b = i * 9;
        Vec3::new(self.vertices[b], self.vertices[b + 1], self.vertices[b + 2])
    }

    /// Copy of this mesh with positions moved by `m` and normals re-oriented
    pub fn transformed(&self, m: Mat4) -> MeshData {
        let normal_m = Mat3::from_mat4(m).inverse().transpose();
        let mut vertices = Vec::with_capacity(self.vertices.len());
        for v in self.vertices.chunks_exact(9) {
            let p = m.transform_point3(Vec3::new(v[0], v[1], v[2]));
            let n = (normal_m * Vec3::new(v[3], v[4], v[5])).normalize_or_zero();
            vertices.extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z, v[6], v[7], v[8]]);
        }
        MeshData {
            vertices,
            indices: self.indices.clone(),
        }
    }

    /// Append `other`, re-basing its indices
    pub fn append(&mut self, other: &MeshData) {
        let base = self.vertex_count() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }
}

// ── Primitive generation ─────────────────────────────────────

pub fn sphere(radius: f32, rings: u32, sectors: u32, color: [f32; 3]) -> MeshData {
    let rings = rings.max(2);
    let sectors = sectors.max(3);
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for r in 0..=rings {
        let phi = std::f32::consts::PI * r as f32 / rings as f32;
        let sp = phi.sin();
        let cp = phi.cos();

        for s in 0..=sectors {
            let theta = std::f32::consts::TAU * s as f32 / sectors as f32;
            let st = theta.sin();
            let ct = theta.cos();

            let x = sp * ct;
            let y = cp;
            let z = sp * st;

            let n = Vec3::new(x, y, z);
            push_vert(&mut vertices, radius * x, radius * y, radius * z, n, color);
        }
    }

    for r in 0..rings {
        for s in 0..sectors {
            let i0 = r * (sectors + 1) + s;
            let i1 = i0 + 1;
            let i2 = i0 + sectors + 1;
            let i3 = i2 + 1;
            indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
        }
    }

    MeshData { vertices, indices }
}

/// Teapot body profile as (radius, height) pairs, bottom to lid knob
const TEAPOT_PROFILE: [(f32, f32); 9] = [
    (0.0, 0.0),
    (1.0, 0.0),
    (1.3, 0.25),
    (1.45, 0.6),
    (1.35, 1.0),
    (1.1, 1.3),
    (0.7, 1.45),
    (0.2, 1.55),
    (0.0, 1.8),
];

/// Lathed stand-in for the teapot primitive: a body of revolution of the
/// classic profile, centred on the origin and scaled by `size`
pub fn teapot(size: f32, sectors: u32, color: [f32; 3]) -> MeshData {
    let half_height = TEAPOT_PROFILE[TEAPOT_PROFILE.len() - 1].1 * 0.5;
    let profile: Vec<(f32, f32)> = TEAPOT_PROFILE
        .iter()
        .map(|(r, y)| (r * size, (y - half_height) * size))
        .collect();
    lathe(&profile, sectors, color)
}

/// Revolve a (radius, y) profile around the Y axis
pub fn lathe(profile: &[(f32, f32)], sectors: u32, color: [f32; 3]) -> MeshData {
    let sectors = sectors.max(3);
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for (k, &(r, y)) in profile.iter().enumerate() {
        // profile tangent -> outward normal in the (r, y) plane
        let prev = profile[k.saturating_sub(1)];
        let next = profile[(k + 1).min(profile.len() - 1)];
        let (dr, dy) = (next.0 - prev.0, next.1 - prev.1);
        let (nr, ny) = (dy, -dr);

        for s in 0..=sectors {
            let theta = std::f32::consts::TAU * s as f32 / sectors as f32;
            let (st, ct) = theta.sin_cos();
            let n = Vec3::new(nr * ct, ny, nr * st).normalize_or_zero();
            push_vert(&mut vertices, r * ct, y, r * st, n, color);
        }
    }

    for k in 0..profile.len().saturating_sub(1) as u32 {
        for s in 0..sectors {
            let i0 = k * (sectors + 1) + s;
            let i1 = i0 + 1;
            let i2 = i0 + sectors + 1;
            let i3 = i2 + 1;
            indices.extend_from_slice(&[i0, i1, i2, i1, i3, i2]);
        }
    }

    MeshData { vertices, indices }
}

// ── Helpers ──────────────────────────────────────────────────

fn push_vert(v: &mut Vec<f32>, px: f32, py: f32, pz: f32, n: Vec3, c: [f32; 3]) {
    v.extend_from_slice(&[px, py, pz, n.x, n.y, n.z, c[0], c[1], c[2]]);
}
