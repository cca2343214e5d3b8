//! Sanity checks on the meshes a frame produces.
//!
//! `SegmentCheck` inspects one drawn segment; `validate_frame` checks a whole
//! frame: every segment drawn once, in the model colour, with sound geometry.

use shared::Segment;

use crate::viewport::bounds::Aabb;
use crate::viewport::mesh::MeshData;

const STRIDE: usize = 9;

/// Smallest extent a drawn segment may have on any axis
const MIN_EXTENT: f32 = 1e-4;

/// Checks on the world-space mesh of one segment
pub struct SegmentCheck<'a> {
    segment: Segment,
    mesh: &'a MeshData,
}

impl<'a> SegmentCheck<'a> {
    pub fn new(segment: Segment, mesh: &'a MeshData) -> Self {
        Self { segment, mesh }
    }

    pub fn segment(&self) -> Segment {
        self.segment
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_mesh(self.mesh)
    }

    /// Triangles referencing a vertex that does not exist, plus a dangling
    /// partial triangle if the index buffer is ragged
    pub fn broken_triangles(&self) -> usize {
        let vertex_count = (self.mesh.vertices.len() / STRIDE) as u32;
        let chunks = self.mesh.indices.chunks(3);
        chunks
            .filter(|tri| tri.len() < 3 || tri.iter().any(|&i| i >= vertex_count))
            .count()
    }

    /// Vertices with a NaN or infinite position or normal
    pub fn non_finite_vertices(&self) -> usize {
        self.mesh
            .vertices
            .chunks_exact(STRIDE)
            .filter(|v| v[..6].iter().any(|c| !c.is_finite()))
            .count()
    }

    /// Vertices whose normal length is off by more than `epsilon`
    pub fn skewed_normals(&self, epsilon: f32) -> usize {
        self.mesh
            .vertices
            .chunks_exact(STRIDE)
            .filter(|v| {
                let len = (v[3] * v[3] + v[4] * v[4] + v[5] * v[5]).sqrt();
                (len - 1.0).abs() > epsilon
            })
            .count()
    }

    /// True when the segment collapsed to a point, line or plane
    pub fn is_degenerate(&self) -> bool {
        let bounds = self.bounds();
        !bounds.is_valid() || bounds.size().min_element() < MIN_EXTENT
    }

    /// Largest per-channel distance of any vertex colour from `rgb`
    pub fn color_spread(&self, rgb: [f32; 3]) -> f32 {
        self.mesh
            .vertices
            .chunks_exact(STRIDE)
            .flat_map(|v| (0..3).map(move |c| (v[6 + c] - rgb[c]).abs()))
            .fold(0.0, f32::max)
    }

    /// Everything wrong with this segment, as readable messages
    pub fn issues(&self) -> Vec<String> {
        let name = self.segment.name();
        let mut issues = Vec::new();
        if self.mesh.vertices.len() % STRIDE != 0 {
            issues.push(format!("{name}: ragged vertex buffer"));
        }
        if self.triangle_count() == 0 {
            issues.push(format!("{name}: no triangles"));
        }
        let broken = self.broken_triangles();
        if broken > 0 {
            issues.push(format!("{name}: {broken} broken triangles"));
        }
        let non_finite = self.non_finite_vertices();
        if non_finite > 0 {
            issues.push(format!("{name}: {non_finite} non-finite vertices"));
        } else if self.is_degenerate() {
            issues.push(format!("{name}: degenerate bounds"));
        }
        let skewed = self.skewed_normals(0.1);
        if skewed > 0 {
            issues.push(format!("{name}: {skewed} normals not unit length"));
        }
        issues
    }
}

/// Check one drawn frame against the rig's fixed topology.
///
/// Every segment must appear exactly once and every vertex must carry
/// `model_color`, which the body list sets and the others inherit.
pub fn validate_frame(drawn: &[(Segment, &MeshData)], model_color: [f32; 3]) -> Vec<String> {
    let mut issues = Vec::new();
    let mut seen = [0usize; Segment::COUNT];
    for (segment, _) in drawn {
        seen[segment.index()] += 1;
    }
    for segment in Segment::ALL {
        match seen[segment.index()] {
            1 => {}
            0 => issues.push(format!("{}: not drawn", segment.name())),
            n => issues.push(format!("{}: drawn {n} times", segment.name())),
        }
    }

    for (segment, mesh) in drawn {
        let check = SegmentCheck::new(*segment, mesh);
        issues.extend(check.issues());
        let spread = check.color_spread(model_color);
        if spread > 1e-3 {
            issues.push(format!(
                "{}: colour off the model colour by {spread:.3}",
                segment.name()
            ));
        }
    }
    issues
}
