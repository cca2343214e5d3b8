//! Factory functions for creating test data.
//!
//! Provides convenient helpers to construct rigs, snapshots, settings and
//! command scripts used in tests and by the CLI.

use shared::{Axis, BodyPart, JointTier, Segment};

use crate::harness::TestHarness;
use crate::state::{CompatMode, JointRig, RigSnapshot, Tessellation, ViewerSettings};

// ── Settings factories ──────────────────────────────────────────

/// Default settings with a coarse sphere so frames stay cheap.
pub fn light_settings() -> ViewerSettings {
    ViewerSettings {
        tessellation: Tessellation {
            slices: 8,
            stacks: 4,
        },
        ..ViewerSettings::default()
    }
}

/// Coarse settings with the legacy front-left behaviour.
pub fn legacy_settings() -> ViewerSettings {
    ViewerSettings {
        compat: CompatMode::Legacy,
        ..light_settings()
    }
}

/// Harness on `light_settings()`.
pub fn light_harness() -> TestHarness {
    TestHarness::with_settings(light_settings())
}

// ── Rig factories ───────────────────────────────────────────────

/// Rig with exactly `part` toggled on `tier` and `axis`.
pub fn focused_rig(part: BodyPart, tier: JointTier, axis: Axis) -> JointRig {
    let mut rig = JointRig::default();
    rig.toggle_part(part);
    rig.select_tier(tier);
    rig.select_axis(axis);
    rig
}

/// Rear left leg, upper tier, Z axis.
pub fn rear_left_upper_z_rig() -> JointRig {
    focused_rig(BodyPart::RearLeftLeg, JointTier::Upper, Axis::Z)
}

/// Rig with every part toggled.
pub fn all_parts_rig(tier: JointTier, axis: Axis) -> JointRig {
    let mut rig = JointRig::default();
    for part in BodyPart::ALL {
        rig.toggle_part(part);
    }
    rig.select_tier(tier);
    rig.select_axis(axis);
    rig
}

// ── Snapshot factories ──────────────────────────────────────────

/// Snapshot of a fresh rig.
pub fn neutral_snapshot() -> RigSnapshot {
    JointRig::default().snapshot()
}

/// Neutral snapshot with the given segment angles overridden.
pub fn snapshot_with_angles(angles: &[(Segment, [i32; 3])]) -> RigSnapshot {
    let mut snap = neutral_snapshot();
    for (segment, value) in angles {
        snap.angles.insert(segment.name().to_string(), *value);
    }
    snap
}

// ── Command scripts ─────────────────────────────────────────────

/// Sit, then lift the rear left leg's upper joint twice.
pub fn sit_and_lift_script() -> &'static str {
    r#"[
        {"command": "apply_pose", "index": 0},
        {"command": "toggle_part", "part": "rear_left_leg"},
        {"command": "select_tier", "tier": "upper"},
        {"command": "select_axis", "axis": "z"},
        {"command": "step_backward", "times": 2},
        {"command": "frame"}
    ]"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_settings_keep_defaults() {
        let s = light_settings();
        assert_eq!(s.compat, CompatMode::Normalized);
        assert_eq!(s.body_color, ViewerSettings::default().body_color);
        assert_eq!(legacy_settings().compat, CompatMode::Legacy);
    }

    #[test]
    fn test_focused_rig() {
        let rig = rear_left_upper_z_rig();
        assert!(rig.selection().is_toggled(BodyPart::RearLeftLeg));
        assert_eq!(rig.selection().tier(), JointTier::Upper);
        assert_eq!(rig.selection().axis(), Axis::Z);
    }

    #[test]
    fn test_all_parts_rig() {
        let rig = all_parts_rig(JointTier::Paw, Axis::X);
        assert_eq!(rig.selection().parts().parts().count(), BodyPart::ALL.len());
    }

    #[test]
    fn test_snapshot_with_angles() {
        let snap = snapshot_with_angles(&[(Segment::Tail, [1, 2, 3])]);
        assert_eq!(snap.angles["tail"], [1, 2, 3]);
        assert_eq!(snap.angles["body"], [0, 0, 0]);
    }

    #[test]
    fn test_script_is_valid_json_array() {
        let v: serde_json::Value = serde_json::from_str(sit_and_lift_script()).unwrap();
        assert_eq!(v.as_array().unwrap().len(), 6);
    }
}
