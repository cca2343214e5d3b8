//! Cached segment geometry

use glam::Vec3;
use shared::{shape_of, Axis, Segment};

use super::primitives::emit_shape;
use crate::state::{JointRig, Tessellation};
use crate::viewport::{ListHandle, RenderBackend};

/// One compiled display list per segment, recompiled when the rig changes
pub struct GeometryCache {
    handles: Vec<ListHandle>,
    tessellation: Tessellation,
    body_color: [f32; 3],
    version: u64,
    rebuild_count: u64,
}

impl GeometryCache {
    /// Allocate one list handle per segment. Nothing is compiled yet.
    pub fn init<B: RenderBackend + ?Sized>(
        backend: &mut B,
        tessellation: Tessellation,
        body_color: [f32; 3],
    ) -> Self {
        let handles = Segment::ALL.iter().map(|_| backend.gen_list()).collect();
        Self {
            handles,
            tessellation,
            body_color,
            version: u64::MAX, // force first rebuild
            rebuild_count: 0,
        }
    }

    pub fn handle(&self, segment: Segment) -> ListHandle {
        self.handles[segment.index()]
    }

    /// Segment whose geometry lives in `handle`
    pub fn segment_for(&self, handle: ListHandle) -> Option<Segment> {
        self.handles
            .iter()
            .position(|h| *h == handle)
            .map(|i| Segment::ALL[i])
    }

    /// True when the cached lists were built from an older rig version
    pub fn is_stale(&self, rig: &JointRig) -> bool {
        self.version != rig.version()
    }

    /// Rig version the lists were last compiled from
    pub fn built_version(&self) -> Option<u64> {
        (self.version != u64::MAX).then_some(self.version)
    }

    /// Rebuild counter
    pub fn rebuild_count(&self) -> u64 {
        self.rebuild_count
    }

    pub fn tessellation(&self) -> Tessellation {
        self.tessellation
    }

    /// Change sphere resolution; the next `rebuild_if_dirty` recompiles
    pub fn set_tessellation(&mut self, tessellation: Tessellation) {
        if tessellation != self.tessellation {
            self.tessellation = tessellation;
            self.invalidate();
        }
    }

    pub fn set_body_color(&mut self, rgb: [f32; 3]) {
        if rgb != self.body_color {
            self.body_color = rgb;
            self.invalidate();
        }
    }

    pub fn invalidate(&mut self) {
        self.version = u64::MAX;
    }

    /// Recompile every segment list if the rig changed since the last build.
    ///
    /// Returns whether a rebuild happened.
    pub fn rebuild_if_dirty<B: RenderBackend + ?Sized>(
        &mut self,
        rig: &JointRig,
        backend: &mut B,
    ) -> bool {
        if !self.is_stale(rig) {
            return false;
        }
        self.rebuild(rig, backend);
        true
    }

    /// Recompile every segment list unconditionally
    pub fn rebuild<B: RenderBackend + ?Sized>(&mut self, rig: &JointRig, backend: &mut B) {
        for segment in Segment::ALL {
            let handle = self.handle(segment);
            backend.begin_list(handle);
            emit_shape(
                backend,
                shape_of(segment),
                self.tessellation,
                self.body_color,
            );
            backend.end_list();
        }
        self.version = rig.version();
        self.rebuild_count += 1;
        tracing::debug!(
            "Rebuilt {} segment lists at rig version {}",
            self.handles.len(),
            self.version
        );
    }

    /// Draw every segment under its current rotation and offset
    pub fn draw<B: RenderBackend + ?Sized>(&self, rig: &JointRig, backend: &mut B) {
        backend.begin_frame();
        for segment in Segment::ALL {
            backend.push_matrix();
            for axis in Axis::ALL {
                backend.rotate(rig.angle(segment, axis) as f32, Vec3::from(axis.unit()));
            }
            if let Some([x, y]) = rig.segment_offset(segment) {
                backend.translate(Vec3::new(x, y, 0.0));
            }
            backend.call_list(self.handle(segment));
            backend.pop_matrix();
        }
    }
}
