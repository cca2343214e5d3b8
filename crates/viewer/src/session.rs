//! Owned rig + geometry cache + backend, driven one frame at a time.

use serde::Serialize;

use crate::build::GeometryCache;
use crate::state::{rig_channel, JointRig, RigOpInbox, RigOpSender, ViewerSettings};
use crate::viewport::RenderBackend;

/// What happened during one `frame()` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameStats {
    /// Ops drained from the queue before drawing
    pub queued_ops: usize,
    /// Whether the segment lists were recompiled
    pub rebuilt: bool,
    /// Rig version that was drawn
    pub version: u64,
}

/// A running viewer: one rig, its cached geometry, and the backend it draws to
pub struct RigSession<B: RenderBackend> {
    rig: JointRig,
    cache: GeometryCache,
    backend: B,
    settings: ViewerSettings,
    inbox: Option<RigOpInbox>,
    sender: Option<RigOpSender>,
}

impl<B: RenderBackend> RigSession<B> {
    /// Allocate geometry handles on `backend`. The first frame compiles them.
    pub fn init(mut backend: B, settings: ViewerSettings) -> Self {
        let cache = GeometryCache::init(&mut backend, settings.tessellation, settings.body_color);
        tracing::info!(
            "Rig session ready ({} mode, {}x{} spheres)",
            settings.compat.display_name(),
            settings.tessellation.slices,
            settings.tessellation.stacks
        );
        Self {
            rig: JointRig::new(settings.compat),
            cache,
            backend,
            settings,
            inbox: None,
            sender: None,
        }
    }

    pub fn rig(&self) -> &JointRig {
        &self.rig
    }

    pub fn rig_mut(&mut self) -> &mut JointRig {
        &mut self.rig
    }

    pub fn cache(&self) -> &GeometryCache {
        &self.cache
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    /// Swap settings in place; geometry is recompiled on the next frame if needed
    pub fn apply_settings(&mut self, settings: ViewerSettings) {
        self.rig.set_compat(settings.compat);
        self.cache.set_tessellation(settings.tessellation);
        self.cache.set_body_color(settings.body_color);
        self.settings = settings;
    }

    /// Sender for queueing rig ops from other threads.
    ///
    /// All senders feed the same inbox, drained at the start of each frame.
    pub fn sender(&mut self) -> RigOpSender {
        if let Some(tx) = &self.sender {
            return tx.clone();
        }
        let (tx, inbox) = rig_channel();
        self.inbox = Some(inbox);
        self.sender = Some(tx.clone());
        tx
    }

    pub fn rebuild_if_dirty(&mut self) -> bool {
        self.cache.rebuild_if_dirty(&self.rig, &mut self.backend)
    }

    pub fn draw(&mut self) {
        self.cache.draw(&self.rig, &mut self.backend);
    }

    /// Drain queued ops, rebuild if dirty, then draw
    pub fn frame(&mut self) -> FrameStats {
        let queued_ops = match &self.inbox {
            Some(inbox) => inbox.drain_into(&mut self.rig),
            None => 0,
        };
        let rebuilt = self.rebuild_if_dirty();
        self.draw();
        FrameStats {
            queued_ops,
            rebuilt,
            version: self.rig.version(),
        }
    }

    /// Tear down and hand back the backend
    pub fn into_backend(self) -> B {
        self.backend
    }
}
