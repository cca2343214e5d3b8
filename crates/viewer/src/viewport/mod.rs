pub mod backend;
pub mod bounds;
pub mod mesh;
pub mod recording;
pub mod software;

pub use backend::{DrawOp, ListHandle, RenderBackend};
pub use bounds::Aabb;
pub use mesh::MeshData;
pub use recording::RecordingBackend;
pub use software::{DrawnMesh, SoftwareBackend};
