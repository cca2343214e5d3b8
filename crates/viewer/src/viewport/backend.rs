//! Render backend seam.
//!
//! The rig never talks to a graphics API directly. It issues the small set of
//! fixed-function calls below: compile a display list once, then replay it
//! under a fresh transform every frame.

use glam::Vec3;
use serde::Serialize;

/// Opaque handle to a compiled display list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ListHandle(pub u32);

/// A single backend call, as recorded into a display list or a frame log
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    PushMatrix,
    PopMatrix,
    Rotate { degrees: f32, axis: [f32; 3] },
    Translate { offset: [f32; 3] },
    Scale { factors: [f32; 3] },
    Color { rgb: [f32; 3] },
    Sphere { radius: f32, slices: u32, stacks: u32 },
    Teapot { size: f32 },
    CallList { handle: ListHandle },
}

/// Fixed-function drawing API consumed by the geometry cache
pub trait RenderBackend {
    /// Called once before the first draw call of every frame
    fn begin_frame(&mut self) {}

    /// Allocate a new, empty display list
    fn gen_list(&mut self) -> ListHandle;

    /// Start compiling `handle`, discarding its previous contents.
    /// Subsequent calls are recorded instead of executed until `end_list`.
    fn begin_list(&mut self, handle: ListHandle);

    fn end_list(&mut self);

    fn call_list(&mut self, handle: ListHandle);

    fn push_matrix(&mut self);

    fn pop_matrix(&mut self);

    /// Rotate by `degrees` around `axis`
    fn rotate(&mut self, degrees: f32, axis: Vec3);

    fn translate(&mut self, offset: Vec3);

    fn scale(&mut self, factors: Vec3);

    fn color(&mut self, rgb: [f32; 3]);

    fn solid_sphere(&mut self, radius: f32, slices: u32, stacks: u32);

    fn solid_teapot(&mut self, size: f32);

    /// Route a recorded op back through the trait
    fn replay(&mut self, op: &DrawOp) {
        match *op {
            DrawOp::PushMatrix => self.push_matrix(),
            DrawOp::PopMatrix => self.pop_matrix(),
            DrawOp::Rotate { degrees, axis } => self.rotate(degrees, Vec3::from(axis)),
            DrawOp::Translate { offset } => self.translate(Vec3::from(offset)),
            DrawOp::Scale { factors } => self.scale(Vec3::from(factors)),
            DrawOp::Color { rgb } => self.color(rgb),
            DrawOp::Sphere {
                radius,
                slices,
                stacks,
            } => self.solid_sphere(radius, slices, stacks),
            DrawOp::Teapot { size } => self.solid_teapot(size),
            DrawOp::CallList { handle } => self.call_list(handle),
        }
    }
}

/// Display-list bookkeeping shared by the CPU backends.
///
/// While a list is being compiled, ops are appended to it instead of being
/// handed back for immediate execution.
#[derive(Debug, Default, Clone)]
pub struct ListStore {
    lists: Vec<Vec<DrawOp>>,
    compiling: Option<usize>,
    compile_count: u64,
}

impl ListStore {
    pub fn gen(&mut self) -> ListHandle {
        self.lists.push(Vec::new());
        ListHandle(self.lists.len() as u32)
    }

    fn slot(&self, handle: ListHandle) -> Option<usize> {
        let idx = (handle.0 as usize).checked_sub(1)?;
        (idx < self.lists.len()).then_some(idx)
    }

    pub fn begin(&mut self, handle: ListHandle) {
        match self.slot(handle) {
            Some(idx) => {
                self.lists[idx].clear();
                self.compiling = Some(idx);
            }
            None => tracing::warn!("begin_list on unknown handle {}", handle.0),
        }
    }

    pub fn end(&mut self) {
        if self.compiling.take().is_some() {
            self.compile_count += 1;
        }
    }

    /// Append `op` to the list being compiled, or hand it back for execution
    pub fn record(&mut self, op: DrawOp) -> Option<DrawOp> {
        match self.compiling {
            Some(idx) => {
                self.lists[idx].push(op);
                None
            }
            None => Some(op),
        }
    }

    pub fn get(&self, handle: ListHandle) -> Option<&[DrawOp]> {
        self.slot(handle).map(|idx| self.lists[idx].as_slice())
    }

    pub fn is_compiling(&self) -> bool {
        self.compiling.is_some()
    }

    /// Number of lists allocated so far
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Number of completed `begin`/`end` compilations
    pub fn compile_count(&self) -> u64 {
        self.compile_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_start_at_one() {
        let mut store = ListStore::default();
        assert_eq!(store.gen(), ListHandle(1));
        assert_eq!(store.gen(), ListHandle(2));
        assert!(store.get(ListHandle(0)).is_none());
        assert!(store.get(ListHandle(3)).is_none());
    }

    #[test]
    fn test_record_only_while_compiling() {
        let mut store = ListStore::default();
        let h = store.gen();
        assert_eq!(store.record(DrawOp::PushMatrix), Some(DrawOp::PushMatrix));
        store.begin(h);
        assert_eq!(store.record(DrawOp::PopMatrix), None);
        store.end();
        assert_eq!(store.get(h).unwrap(), &[DrawOp::PopMatrix]);
        assert_eq!(store.compile_count(), 1);
    }

    #[test]
    fn test_recompile_replaces_contents() {
        let mut store = ListStore::default();
        let h = store.gen();
        store.begin(h);
        store.record(DrawOp::PushMatrix);
        store.end();
        store.begin(h);
        store.record(DrawOp::Teapot { size: 0.4 });
        store.end();
        assert_eq!(store.get(h).unwrap(), &[DrawOp::Teapot { size: 0.4 }]);
    }
}
