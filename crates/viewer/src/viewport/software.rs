//! CPU backend that tessellates every drawn primitive into world-space meshes

use glam::{Mat4, Vec3};

use super::backend::{DrawOp, ListHandle, ListStore, RenderBackend};
use super::mesh::{self, MeshData};

const MAX_LIST_NESTING: usize = 64;
const TEAPOT_SECTORS: u32 = 24;

/// Geometry produced by one top-level `call_list`, or by a primitive drawn
/// outside any list
#[derive(Clone, Debug)]
pub struct DrawnMesh {
    pub list: Option<ListHandle>,
    pub mesh: MeshData,
}

/// Executes display lists on a matrix stack and keeps the resulting meshes
pub struct SoftwareBackend {
    store: ListStore,
    stack: Vec<Mat4>,
    current: Mat4,
    color: [f32; 3],
    depth: usize,
    drawn: Vec<DrawnMesh>,
}

impl Default for SoftwareBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SoftwareBackend {
    pub fn new() -> Self {
        Self {
            store: ListStore::default(),
            stack: Vec::new(),
            current: Mat4::IDENTITY,
            color: [1.0, 1.0, 1.0],
            depth: 0,
            drawn: Vec::new(),
        }
    }

    /// Meshes drawn since the last `begin_frame`, in draw order
    pub fn drawn(&self) -> &[DrawnMesh] {
        &self.drawn
    }

    pub fn take_drawn(&mut self) -> Vec<DrawnMesh> {
        std::mem::take(&mut self.drawn)
    }

    /// Everything drawn this frame merged into one mesh
    pub fn combined(&self) -> MeshData {
        let mut out = MeshData::default();
        for d in &self.drawn {
            out.append(&d.mesh);
        }
        out
    }

    pub fn current_matrix(&self) -> Mat4 {
        self.current
    }

    /// Matrices pushed and not yet popped
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn compile_count(&self) -> u64 {
        self.store.compile_count()
    }

    fn dispatch(&mut self, op: DrawOp) {
        if let Some(op) = self.store.record(op) {
            self.execute(&op);
        }
    }

    fn execute(&mut self, op: &DrawOp) {
        match *op {
            DrawOp::PushMatrix => self.stack.push(self.current),
            DrawOp::PopMatrix => match self.stack.pop() {
                Some(m) => self.current = m,
                None => tracing::warn!("pop_matrix on empty stack"),
            },
            DrawOp::Rotate { degrees, axis } => {
                let axis = Vec3::from(axis).normalize_or_zero();
                if axis != Vec3::ZERO {
                    self.current *= Mat4::from_axis_angle(axis, degrees.to_radians());
                }
            }
            DrawOp::Translate { offset } => {
                self.current *= Mat4::from_translation(Vec3::from(offset));
            }
            DrawOp::Scale { factors } => {
                self.current *= Mat4::from_scale(Vec3::from(factors));
            }
            DrawOp::Color { rgb } => self.color = rgb,
            DrawOp::Sphere {
                radius,
                slices,
                stacks,
            } => {
                let m = mesh::sphere(radius, stacks, slices, self.color);
                self.emit(&m);
            }
            DrawOp::Teapot { size } => {
                let m = mesh::teapot(size, TEAPOT_SECTORS, self.color);
                self.emit(&m);
            }
            DrawOp::CallList { handle } => self.run_list(handle),
        }
    }

    fn run_list(&mut self, handle: ListHandle) {
        if self.depth >= MAX_LIST_NESTING {
            tracing::warn!("list {} nested too deeply", handle.0);
            return;
        }
        let Some(ops) = self.store.get(handle).map(<[DrawOp]>::to_vec) else {
            tracing::warn!("call_list on unknown handle {}", handle.0);
            return;
        };
        if self.depth == 0 {
            self.drawn.push(DrawnMesh {
                list: Some(handle),
                mesh: MeshData::default(),
            });
        }
        self.depth += 1;
        for op in &ops {
            self.execute(op);
        }
        self.depth -= 1;
    }

    fn emit(&mut self, local: &MeshData) {
        let world = local.transformed(self.current);
        if self.depth > 0 {
            if let Some(target) = self.drawn.last_mut() {
                target.mesh.append(&world);
                return;
            }
        }
        self.drawn.push(DrawnMesh {
            list: None,
            mesh: world,
        });
    }
}

impl RenderBackend for SoftwareBackend {
    fn begin_frame(&mut self) {
        self.drawn.clear();
        self.stack.clear();
        self.current = Mat4::IDENTITY;
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
        self.dispatch(DrawOp::CallList { handle });
    }

    fn push_matrix(&mut self) {
        self.dispatch(DrawOp::PushMatrix);
    }

    fn pop_matrix(&mut self) {
        self.dispatch(DrawOp::PopMatrix);
    }

    fn rotate(&mut self, degrees: f32, axis: Vec3) {
        self.dispatch(DrawOp::Rotate {
            degrees,
            axis: axis.to_array(),
        });
    }

    fn translate(&mut self, offset: Vec3) {
        self.dispatch(DrawOp::Translate {
            offset: offset.to_array(),
        });
    }

    fn scale(&mut self, factors: Vec3) {
        self.dispatch(DrawOp::Scale {
            factors: factors.to_array(),
        });
    }

    fn color(&mut self, rgb: [f32; 3]) {
        self.dispatch(DrawOp::Color { rgb });
    }

    fn solid_sphere(&mut self, radius: f32, slices: u32, stacks: u32) {
        self.dispatch(DrawOp::Sphere {
            radius,
            slices,
            stacks,
        });
    }

    fn solid_teapot(&mut self, size: f32) {
        self.dispatch(DrawOp::Teapot { size });
    }
}
