pub mod queue;
pub mod rig;
pub mod selection;
pub mod settings;

pub use queue::{rig_channel, RigOpInbox, RigOpSender};
pub use rig::{JointRig, RigOp, RigSnapshot};
pub use selection::Selection;
pub use settings::{CompatMode, Tessellation, ViewerSettings};
