//! Snapshot/restore of the rig

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shared::{Axis, BodyPart, JointTier, OffsetSlot, RigError, Segment};

use super::JointRig;
use crate::state::selection::Selection;

/// Serializable copy of everything that shapes the rig
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigSnapshot {
    /// X/Y/Z angles keyed by segment name; missing segments are zero
    pub angles: BTreeMap<String, [i32; 3]>,
    /// Offsets keyed by slot name; missing slots are zero
    #[serde(default)]
    pub offsets: BTreeMap<String, [f32; 2]>,
    #[serde(default)]
    pub selected: Vec<BodyPart>,
    pub tier: JointTier,
    pub axis: Axis,
    #[serde(default)]
    pub pose_counter: u64,
}

fn slot_name(slot: OffsetSlot) -> &'static str {
    match slot {
        OffsetSlot::Head => "head",
        OffsetSlot::FrontUpper => "front_upper",
        OffsetSlot::FrontLower => "front_lower",
        OffsetSlot::FrontPaw => "front_paw",
        OffsetSlot::RearUpper => "rear_upper",
        OffsetSlot::RearLower => "rear_lower",
        OffsetSlot::RearPaw => "rear_paw",
    }
}

impl JointRig {
    pub fn snapshot(&self) -> RigSnapshot {
        RigSnapshot {
            angles: Segment::ALL
                .iter()
                .map(|seg| (seg.name().to_string(), self.angles(*seg)))
                .collect(),
            offsets: OffsetSlot::ALL
                .iter()
                .map(|slot| (slot_name(*slot).to_string(), self.offset(*slot)))
                .collect(),
            selected: self.selection.parts().parts().collect(),
            tier: self.selection.tier(),
            axis: self.selection.axis(),
            pose_counter: self.pose_counter,
        }
    }

    /// Replace the rig state with `snapshot`.
    ///
    /// Nothing changes unless every name in the snapshot is known.
    pub fn restore(&mut self, snapshot: &RigSnapshot) -> shared::Result<()> {
        let mut angles = [[0; 3]; Segment::COUNT];
        for (name, value) in &snapshot.angles {
            let segment: Segment = name
                .parse()
                .map_err(|_| RigError::InvalidSnapshot(format!("unknown segment '{name}'")))?;
            angles[segment.index()] = *value;
        }

        let mut offsets = [[0.0; 2]; OffsetSlot::COUNT];
        for (name, value) in &snapshot.offsets {
            let slot = OffsetSlot::ALL
                .into_iter()
                .find(|s| slot_name(*s) == name.as_str())
                .ok_or_else(|| RigError::InvalidSnapshot(format!("unknown offset slot '{name}'")))?;
            offsets[slot.index()] = *value;
        }

        self.angles = angles;
        self.offsets = offsets;
        self.selection = Selection::new(
            snapshot.selected.iter().copied().collect(),
            snapshot.tier,
            snapshot.axis,
        );
        self.pose_counter = snapshot.pose_counter;
        self.notify_mutated();
        tracing::info!("Restored rig snapshot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_restore_preserves_state() {
        let mut rig = JointRig::default();
        rig.apply_pose(2);
        rig.toggle_part(BodyPart::RearLeftLeg);
        rig.select_axis(Axis::Y);
        let snap = rig.snapshot();

        let mut other = JointRig::default();
        other.restore(&snap).unwrap();
        assert_eq!(other.snapshot(), snap);
        assert_eq!(other.angle(Segment::FrontRightPaw, Axis::Z), 45);
        assert!(other.selection().is_toggled(BodyPart::RearLeftLeg));
    }

    #[test]
    fn test_snapshot_json_keys() {
        let json = serde_json::to_value(JointRig::default().snapshot()).unwrap();
        assert!(json["angles"]["rear_left_upper"].is_array());
        assert!(json["offsets"]["front_paw"].is_array());
        assert_eq!(json["tier"], "paw");
    }

    #[test]
    fn test_unknown_segment_rejected_without_change() {
        let mut rig = JointRig::default();
        rig.apply_pose(0);
        let before = rig.snapshot();
        let version = rig.version();

        let mut snap = before.clone();
        snap.angles.insert("wing".into(), [1, 2, 3]);
        let err = rig.restore(&snap).unwrap_err();
        assert!(matches!(err, RigError::InvalidSnapshot(_)));
        assert_eq!(rig.snapshot(), before);
        assert_eq!(rig.version(), version);
    }

    #[test]
    fn test_missing_entries_are_zero() {
        let snap: RigSnapshot = serde_json::from_str(
            r#"{"angles":{"tail":[0,0,15]},"tier":"upper","axis":"z"}"#,
        )
        .unwrap();
        let mut rig = JointRig::default();
        rig.apply_pose(1);
        rig.restore(&snap).unwrap();
        assert_eq!(rig.angles(Segment::Tail), [0, 0, 15]);
        assert_eq!(rig.angle(Segment::Body, Axis::Z), 0);
        assert_eq!(rig.selection().tier(), JointTier::Upper);
    }
}
