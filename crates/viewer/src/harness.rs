//! Headless test harness for programmatic rig manipulation.
//!
//! Wraps a `RigSession` on the software backend so tests and scripts can
//! drive the rig and inspect the meshes each frame produces.

use shared::{Axis, BodyPart, JointTier, Pose, Segment};

use crate::export::build_glb;
use crate::session::{FrameStats, RigSession};
use crate::state::{JointRig, RigOp, RigSnapshot, ViewerSettings};
use crate::validation::{validate_frame, SegmentCheck};
use crate::viewport::bounds::Aabb;
use crate::viewport::mesh::MeshData;
use crate::viewport::SoftwareBackend;

/// Headless test harness: rig, geometry cache and a CPU backend
pub struct TestHarness {
    session: RigSession<SoftwareBackend>,
}

impl TestHarness {
    /// Create a harness with default settings.
    pub fn new() -> Self {
        Self::with_settings(ViewerSettings::default())
    }

    pub fn with_settings(settings: ViewerSettings) -> Self {
        Self {
            session: RigSession::init(SoftwareBackend::new(), settings),
        }
    }

    pub fn rig(&self) -> &JointRig {
        self.session.rig()
    }

    pub fn session(&self) -> &RigSession<SoftwareBackend> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut RigSession<SoftwareBackend> {
        &mut self.session
    }

    // ── Rig control ───────────────────────────────────────────

    pub fn apply(&mut self, op: RigOp) {
        self.session.rig_mut().apply(op);
    }

    pub fn select_tier(&mut self, tier: JointTier) {
        self.session.rig_mut().select_tier(tier);
    }

    pub fn select_axis(&mut self, axis: Axis) {
        self.session.rig_mut().select_axis(axis);
    }

    /// Toggle a part and return whether it is now active
    pub fn toggle(&mut self, part: BodyPart) -> bool {
        self.session.rig_mut().toggle_part(part)
    }

    /// Select exactly one part on `tier`/`axis`, clearing any other toggles
    pub fn focus(&mut self, part: BodyPart, tier: JointTier, axis: Axis) {
        let active: Vec<BodyPart> = self.rig().selection().parts().parts().collect();
        for p in active {
            if p != part {
                self.toggle(p);
            }
        }
        if !self.rig().selection().is_toggled(part) {
            self.toggle(part);
        }
        self.select_tier(tier);
        self.select_axis(axis);
    }

    pub fn step_forward(&mut self, times: u32) {
        for _ in 0..times {
            self.session.rig_mut().step_forward();
        }
    }

    pub fn step_backward(&mut self, times: u32) {
        for _ in 0..times {
            self.session.rig_mut().step_backward();
        }
    }

    pub fn apply_pose(&mut self, index: u64) -> Pose {
        self.session.rig_mut().apply_pose(index)
    }

    pub fn next_pose(&mut self) -> Pose {
        self.session.rig_mut().apply_next_pose()
    }

    pub fn reset(&mut self) {
        self.session.rig_mut().reset();
    }

    pub fn angle(&self, segment: Segment, axis: Axis) -> i32 {
        self.rig().angle(segment, axis)
    }

    // ── State import/export ───────────────────────────────────

    /// Export the rig state as pretty JSON
    pub fn export_state_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(&self.rig().snapshot()).map_err(|e| e.to_string())
    }

    /// Load rig state from JSON (replaces current)
    pub fn load_state_json(&mut self, json: &str) -> Result<(), String> {
        let snapshot: RigSnapshot =
            serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))?;
        self.load_state(&snapshot)
    }

    pub fn load_state(&mut self, snapshot: &RigSnapshot) -> Result<(), String> {
        self.session
            .rig_mut()
            .restore(snapshot)
            .map_err(|e| e.to_string())
    }

    // ── Frame + inspection ────────────────────────────────────

    /// Rebuild if dirty and draw one frame
    pub fn frame(&mut self) -> FrameStats {
        self.session.frame()
    }

    pub fn rebuild_count(&self) -> u64 {
        self.session.cache().rebuild_count()
    }

    /// Segment meshes of the last frame, in draw order
    pub fn drawn_segments(&self) -> Vec<(Segment, &MeshData)> {
        let cache = self.session.cache();
        self.session
            .backend()
            .drawn()
            .iter()
            .filter_map(|d| {
                let segment = cache.segment_for(d.list?)?;
                Some((segment, &d.mesh))
            })
            .collect()
    }

    /// Number of segment meshes in the last frame
    pub fn drawn_count(&self) -> usize {
        self.drawn_segments().len()
    }

    /// World-space mesh of `segment` in the last frame
    pub fn mesh_of(&self, segment: Segment) -> Option<&MeshData> {
        self.drawn_segments()
            .into_iter()
            .find(|(s, _)| *s == segment)
            .map(|(_, m)| m)
    }

    /// Checks on a segment's mesh from the last frame
    pub fn validate_segment(&self, segment: Segment) -> Option<SegmentCheck<'_>> {
        self.mesh_of(segment).map(|m| SegmentCheck::new(segment, m))
    }

    /// Problems with the last frame as a whole; empty when it is sound
    pub fn validate_frame(&self) -> Vec<String> {
        validate_frame(&self.drawn_segments(), self.session.settings().body_color)
    }

    /// Bounds of everything drawn in the last frame
    pub fn model_bounds(&self) -> Option<Aabb> {
        self.drawn_segments()
            .iter()
            .map(|(_, m)| Aabb::from_mesh(m))
            .filter(Aabb::is_valid)
            .reduce(|a, b| a.union(&b))
    }

    /// GLB of the last frame, one node per segment
    pub fn export_glb(&self) -> Result<Vec<u8>, String> {
        let named: Vec<(String, &MeshData)> = self
            .drawn_segments()
            .into_iter()
            .map(|(s, m)| (s.name().to_string(), m))
            .collect();
        build_glb(&named)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
