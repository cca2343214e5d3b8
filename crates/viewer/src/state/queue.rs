//! Single-writer queue for rig mutations coming from other threads
//!
//! Input threads hold a [`RigOpSender`]; the thread that owns the rig drains
//! the matching [`RigOpInbox`] once per frame, before rebuilding geometry.

use std::sync::mpsc;

use super::rig::{JointRig, RigOp};

/// Cloneable sending half
#[derive(Debug, Clone)]
pub struct RigOpSender {
    tx: mpsc::Sender<RigOp>,
}

impl RigOpSender {
    /// Queue `op`. Returns false once the inbox has been dropped.
    pub fn send(&self, op: RigOp) -> bool {
        self.tx.send(op).is_ok()
    }
}

/// Receiving half, owned by the render thread
#[derive(Debug)]
pub struct RigOpInbox {
    rx: mpsc::Receiver<RigOp>,
}

impl RigOpInbox {
    /// Apply every queued op to `rig` in arrival order, returning how many ran
    pub fn drain_into(&self, rig: &mut JointRig) -> usize {
        let mut applied = 0;
        for op in self.rx.try_iter() {
            rig.apply(op);
            applied += 1;
        }
        if applied > 0 {
            tracing::debug!("Applied {applied} queued rig ops");
        }
        applied
    }
}

pub fn rig_channel() -> (RigOpSender, RigOpInbox) {
    let (tx, rx) = mpsc::channel();
    (RigOpSender { tx }, RigOpInbox { rx })
}
