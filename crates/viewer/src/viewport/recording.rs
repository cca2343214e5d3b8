//! Backend that records every call instead of drawing

use glam::Vec3;

use super::backend::{DrawOp, ListHandle, ListStore, RenderBackend};

/// Records compiled lists and the immediate ops of the current frame
#[derive(Debug, Default, Clone)]
pub struct RecordingBackend {
    store: ListStore,
    frame: Vec<DrawOp>,
    frames: u64,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Immediate ops issued since the last `begin_frame`
    pub fn frame_log(&self) -> &[DrawOp] {
        &self.frame
    }

    /// Frame log with every `CallList` replaced by the list's contents
    pub fn expanded_frame(&self) -> Vec<DrawOp> {
        let mut out = Vec::with_capacity(self.frame.len() * 4);
        for op in &self.frame {
            self.expand_into(op, &mut out, 0);
        }
        out
    }

    fn expand_into(&self, op: &DrawOp, out: &mut Vec<DrawOp>, depth: usize) {
        match op {
            // GL caps list nesting at 64 levels
            DrawOp::CallList { handle } if depth < 64 => {
                for inner in self.store.get(*handle).unwrap_or_default() {
                    self.expand_into(inner, out, depth + 1);
                }
            }
            other => out.push(other.clone()),
        }
    }

    pub fn list(&self, handle: ListHandle) -> Option<&[DrawOp]> {
        self.store.get(handle)
    }

    pub fn list_count(&self) -> usize {
        self.store.len()
    }

    pub fn compile_count(&self) -> u64 {
        self.store.compile_count()
    }

    /// Number of frames begun
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(op) = self.store.record(op) {
            self.frame.push(op);
        }
    }
}

impl RenderBackend for RecordingBackend {
    fn begin_frame(&mut self) {
        self.frame.clear();
        self.frames += 1;
    }

    fn gen_list(&mut self) -> ListHandle {
        self.store.gen()
    }

    fn begin_list(&mut self, handle: ListHandle) {
        self.store.begin(handle);
    }

    fn end_list(&mut self) {
        self.store.end();
    }

    fn call_list(&mut self, handle: ListHandle) {
        self.push(DrawOp::CallList { handle });
    }

    fn push_matrix(&mut self) {
        self.push(DrawOp::PushMatrix);
    }

    fn pop_matrix(&mut self) {
        self.push(DrawOp::PopMatrix);
    }

    fn rotate(&mut self, degrees: f32, axis: Vec3) {
        self.push(DrawOp::Rotate {
            degrees,
            axis: axis.to_array(),
        });
    }

    fn translate(&mut self, offset: Vec3) {
        self.push(DrawOp::Translate {
            offset: offset.to_array(),
        });
    }

    fn scale(&mut self, factors: Vec3) {
        self.push(DrawOp::Scale {
            factors: factors.to_array(),
        });
    }

    fn color(&mut self, rgb: [f32; 3]) {
        self.push(DrawOp::Color { rgb });
    }

    fn solid_sphere(&mut self, radius: f32, slices: u32, stacks: u32) {
        self.push(DrawOp::Sphere {
            radius,
            slices,
            stacks,
        });
    }

    fn solid_teapot(&mut self, size: f32) {
        self.push(DrawOp::Teapot { size });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiled_ops_stay_out_of_frame() {
        let mut rec = RecordingBackend::new();
        let h = rec.gen_list();
        rec.begin_list(h);
        rec.solid_teapot(0.4);
        rec.end_list();
        rec.begin_frame();
        rec.push_matrix();
        rec.call_list(h);
        rec.pop_matrix();

        assert_eq!(
            rec.frame_log(),
            &[
                DrawOp::PushMatrix,
                DrawOp::CallList { handle: h },
                DrawOp::PopMatrix
            ]
        );
        assert_eq!(
            rec.expanded_frame(),
            vec![
                DrawOp::PushMatrix,
                DrawOp::Teapot { size: 0.4 },
                DrawOp::PopMatrix
            ]
        );
    }

    #[test]
    fn test_begin_frame_clears_log() {
        let mut rec = RecordingBackend::new();
        rec.begin_frame();
        rec.color([1.0, 0.0, 0.0]);
        rec.begin_frame();
        assert!(rec.frame_log().is_empty());
        assert_eq!(rec.frame_count(), 2);
    }
}
