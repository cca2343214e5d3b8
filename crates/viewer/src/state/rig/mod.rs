//! Joint rig state
//!
//! The rig owns every segment's X/Y/Z angle, the shared translation offsets,
//! the active selection and the pose counter. Every accepted mutation bumps
//! `version`, which the geometry cache compares against the version it last
//! built from.

mod persistence;
mod pose_ops;
mod stepping;

pub use persistence::RigSnapshot;

use serde::{Deserialize, Serialize};
use shared::{Axis, BodyPart, JointTier, OffsetSlot, Segment};

use super::selection::Selection;
use super::settings::CompatMode;

/// A decoded control operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RigOp {
    SelectTier { tier: JointTier },
    SelectAxis { axis: Axis },
    TogglePart { part: BodyPart },
    StepForward,
    StepBackward,
    ApplyPose { index: u64 },
    NextPose,
    Reset,
}

/// Articulated quadruped state
#[derive(Debug, Clone)]
pub struct JointRig {
    pub(crate) angles: [[i32; 3]; Segment::COUNT],
    pub(crate) offsets: [[f32; 2]; OffsetSlot::COUNT],
    pub(crate) selection: Selection,
    pub(crate) compat: CompatMode,
    pub(crate) pose_counter: u64,
    /// Monotonically increasing version counter for cache invalidation
    pub(crate) version: u64,
}

impl Default for JointRig {
    fn default() -> Self {
        Self::new(CompatMode::default())
    }
}

impl JointRig {
    pub fn new(compat: CompatMode) -> Self {
        Self {
            angles: [[0; 3]; Segment::COUNT],
            offsets: [[0.0; 2]; OffsetSlot::COUNT],
            selection: Selection::default(),
            compat,
            pose_counter: 0,
            version: 0,
        }
    }

    /// Current rig version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Bump version without changing state
    pub fn notify_mutated(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    pub fn angle(&self, segment: Segment, axis: Axis) -> i32 {
        self.angles[segment.index()][axis.index()]
    }

    /// X, Y, Z angles of `segment`
    pub fn angles(&self, segment: Segment) -> [i32; 3] {
        self.angles[segment.index()]
    }

    pub fn offset(&self, slot: OffsetSlot) -> [f32; 2] {
        self.offsets[slot.index()]
    }

    /// Translation applied to `segment` after rotation, if it has a slot
    pub fn segment_offset(&self, segment: Segment) -> Option<[f32; 2]> {
        segment.offset_slot().map(|slot| self.offset(slot))
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn compat(&self) -> CompatMode {
        self.compat
    }

    pub fn set_compat(&mut self, compat: CompatMode) {
        self.compat = compat;
    }

    /// Number of pose commands issued so far
    pub fn pose_counter(&self) -> u64 {
        self.pose_counter
    }

    /// True when every angle and offset is zero
    pub fn is_neutral(&self) -> bool {
        self.angles.iter().flatten().all(|a| *a == 0)
            && self.offsets.iter().flatten().all(|o| *o == 0.0)
    }

    pub fn select_tier(&mut self, tier: JointTier) {
        self.selection.set_tier(tier);
        self.notify_mutated();
        tracing::info!("{} chosen", capitalize(&tier.to_string()));
    }

    pub fn select_axis(&mut self, axis: Axis) {
        self.selection.set_axis(axis);
        self.notify_mutated();
        tracing::info!("{}-axis chosen", axis.to_string().to_ascii_uppercase());
    }

    /// Flip `part` in the toggled set, returning whether it is now toggled
    pub fn toggle_part(&mut self, part: BodyPart) -> bool {
        let on = self.selection.toggle(part);
        self.notify_mutated();
        tracing::info!("Toggling {} {}", part.label(), if on { "on" } else { "off" });
        on
    }

    /// Apply a decoded operation
    pub fn apply(&mut self, op: RigOp) {
        match op {
            RigOp::SelectTier { tier } => self.select_tier(tier),
            RigOp::SelectAxis { axis } => self.select_axis(axis),
            RigOp::TogglePart { part } => {
                self.toggle_part(part);
            }
            RigOp::StepForward => self.step_forward(),
            RigOp::StepBackward => self.step_backward(),
            RigOp::ApplyPose { index } => {
                self.apply_pose(index);
            }
            RigOp::NextPose => {
                self.apply_next_pose();
            }
            RigOp::Reset => self.reset(),
        }
    }

    pub(crate) fn zero(&mut self) {
        self.angles = [[0; 3]; Segment::COUNT];
        self.offsets = [[0.0; 2]; OffsetSlot::COUNT];
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rig_is_neutral() {
        let rig = JointRig::default();
        assert!(rig.is_neutral());
        assert_eq!(rig.version(), 0);
        assert_eq!(rig.pose_counter(), 0);
    }

    #[test]
    fn test_selection_mutations_bump_version() {
        let mut rig = JointRig::default();
        rig.select_tier(JointTier::Upper);
        rig.select_axis(Axis::Z);
        rig.toggle_part(BodyPart::Tail);
        assert_eq!(rig.version(), 3);
        assert_eq!(rig.selection().tier(), JointTier::Upper);
        assert_eq!(rig.selection().axis(), Axis::Z);
        assert!(rig.selection().is_toggled(BodyPart::Tail));
    }

    #[test]
    fn test_segment_offset_follows_slot() {
        let mut rig = JointRig::default();
        rig.offsets[OffsetSlot::RearLower.index()] = [1.35, 0.0];
        assert_eq!(rig.segment_offset(Segment::RearLeftLower), Some([1.35, 0.0]));
        assert_eq!(rig.segment_offset(Segment::RearRightLower), Some([1.35, 0.0]));
        assert_eq!(rig.segment_offset(Segment::Tail), None);
    }

    #[test]
    fn test_apply_dispatches() {
        let mut rig = JointRig::default();
        rig.apply(RigOp::TogglePart {
            part: BodyPart::Neck,
        });
        rig.apply(RigOp::StepBackward);
        assert_eq!(rig.angle(Segment::Neck, Axis::X), 1);
        rig.apply(RigOp::ApplyPose { index: 1 });
        assert_eq!(rig.angle(Segment::Body, Axis::Z), 180);
        rig.apply(RigOp::Reset);
        assert!(rig.is_neutral());
    }

    #[test]
    fn test_rig_op_json_shape() {
        let op: RigOp = serde_json::from_str(r#"{"op":"select_axis","axis":"y"}"#).unwrap();
        assert_eq!(op, RigOp::SelectAxis { axis: Axis::Y });
        assert!(serde_json::from_str::<RigOp>(r#"{"op":"select_axis","axis":"w"}"#).is_err());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("upper"), "Upper");
        assert_eq!(capitalize(""), "");
    }
}
