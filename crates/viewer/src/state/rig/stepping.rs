//! Incremental joint rotation

use shared::{joint_range, legacy_decrement_range, AngleRange, Axis, BodyPart, JointTier, Segment};

use super::JointRig;
use crate::state::settings::CompatMode;

impl JointRig {
    /// Rotate every toggled part one degree in the negative direction
    pub fn step_forward(&mut self) {
        self.step(-1);
    }

    /// Rotate every toggled part one degree in the positive direction
    pub fn step_backward(&mut self) {
        self.step(1);
    }

    /// Step every toggled part by `delta` on the active tier and axis.
    ///
    /// Bumps the version even when every part is already at its limit.
    fn step(&mut self, delta: i32) {
        let tier = self.selection.tier();
        let axis = self.selection.axis();
        let parts = self.selection.parts();
        for part in parts.parts() {
            self.step_part(part, tier, axis, delta);
        }
        self.notify_mutated();
    }

    fn step_part(&mut self, part: BodyPart, tier: JointTier, axis: Axis, delta: i32) {
        let actuated = part.segment(tier);
        let Some(range) = self.step_range(actuated, axis, delta) else {
            return;
        };
        let allowed = self
            .angle(actuated, axis)
            .checked_add(delta)
            .is_some_and(|next| self.accepts(actuated, axis, next, range));
        if !allowed {
            tracing::debug!(
                "{} {} at limit [{}, {})",
                actuated.name(),
                axis,
                range.min,
                range.max
            );
            return;
        }
        for (segment, factor) in self.cascade(part, tier, axis) {
            let angle = &mut self.angles[segment.index()][axis.index()];
            *angle = angle.saturating_add(delta * factor);
        }
    }

    /// Whether the actuated angle may move to `next`.
    ///
    /// Legacy mode compares the rear right paw's Z lower bound against the
    /// rear right upper Z angle instead of the paw's own.
    fn accepts(&self, actuated: Segment, axis: Axis, next: i32, range: AngleRange) -> bool {
        if self.compat == CompatMode::Legacy
            && actuated == Segment::RearRightPaw
            && axis == Axis::Z
        {
            return next < range.max && self.angle(Segment::RearRightUpper, Axis::Z) >= range.min;
        }
        range.contains(next)
    }

    /// Range the actuated angle must stay inside after a step of `delta`
    fn step_range(&self, segment: Segment, axis: Axis, delta: i32) -> Option<AngleRange> {
        if self.compat == CompatMode::Legacy && delta < 0 {
            legacy_decrement_range(segment, axis)
        } else {
            joint_range(segment, axis)
        }
    }

    /// Segments moved by one step and how many degrees each moves per degree.
    ///
    /// Descendants follow the actuated segment without their own range check.
    fn cascade(&self, part: BodyPart, tier: JointTier, axis: Axis) -> Vec<(Segment, i32)> {
        if !part.is_leg() {
            return vec![(part.segment(tier), 1)];
        }
        let legacy_front_left = self.compat == CompatMode::Legacy
            && part == BodyPart::FrontLeftLeg
            && axis != Axis::X;
        if legacy_front_left {
            return match tier {
                JointTier::Upper => vec![(Segment::FrontLeftUpper, 1), (Segment::FrontLeftPaw, 2)],
                JointTier::Lower => vec![(Segment::FrontLeftPaw, 2)],
                JointTier::Paw => vec![(Segment::FrontLeftPaw, 1)],
            };
        }
        tier.chain().iter().map(|t| (part.segment(*t), 1)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig_with(part: BodyPart, tier: JointTier, axis: Axis, compat: CompatMode) -> JointRig {
        let mut rig = JointRig::new(compat);
        rig.toggle_part(part);
        rig.select_tier(tier);
        rig.select_axis(axis);
        rig
    }

    #[test]
    fn test_forward_decrements_backward_increments() {
        let mut rig = rig_with(BodyPart::Tail, JointTier::Paw, Axis::Y, CompatMode::Normalized);
        rig.step_forward();
        assert_eq!(rig.angle(Segment::Tail, Axis::Y), -1);
        rig.step_backward();
        rig.step_backward();
        assert_eq!(rig.angle(Segment::Tail, Axis::Y), 1);
    }

    #[test]
    fn test_no_toggled_parts_still_bumps_version() {
        let mut rig = JointRig::default();
        let before = rig.version();
        rig.step_forward();
        assert_eq!(rig.version(), before + 1);
        assert!(rig.is_neutral());
    }

    #[test]
    fn test_boundary_step_is_noop() {
        let mut rig = rig_with(
            BodyPart::FrontRightLeg,
            JointTier::Paw,
            Axis::Z,
            CompatMode::Normalized,
        );
        // paw Z range is [-3, 1)
        rig.step_backward();
        assert_eq!(rig.angle(Segment::FrontRightPaw, Axis::Z), 0);
        for _ in 0..10 {
            rig.step_forward();
        }
        assert_eq!(rig.angle(Segment::FrontRightPaw, Axis::Z), -3);
    }

    #[test]
    fn test_lower_cascades_to_paw_only() {
        let mut rig = rig_with(
            BodyPart::RearRightLeg,
            JointTier::Lower,
            Axis::Y,
            CompatMode::Normalized,
        );
        rig.step_forward();
        assert_eq!(rig.angle(Segment::RearRightUpper, Axis::Y), 0);
        assert_eq!(rig.angle(Segment::RearRightLower, Axis::Y), -1);
        assert_eq!(rig.angle(Segment::RearRightPaw, Axis::Y), -1);
    }

    #[test]
    fn test_only_active_axis_moves() {
        let mut rig = rig_with(BodyPart::Head, JointTier::Upper, Axis::Z, CompatMode::Normalized);
        rig.step_forward();
        assert_eq!(rig.angles(Segment::Head), [0, 0, -1]);
    }

    #[test]
    fn test_normalized_front_left_matches_other_legs() {
        let mut rig = rig_with(
            BodyPart::FrontLeftLeg,
            JointTier::Upper,
            Axis::Z,
            CompatMode::Normalized,
        );
        rig.toggle_part(BodyPart::FrontRightLeg);
        for _ in 0..4 {
            rig.step_forward();
        }
        for (l, r) in [
            (Segment::FrontLeftUpper, Segment::FrontRightUpper),
            (Segment::FrontLeftLower, Segment::FrontRightLower),
            (Segment::FrontLeftPaw, Segment::FrontRightPaw),
        ] {
            assert_eq!(rig.angle(l, Axis::Z), -4);
            assert_eq!(rig.angle(l, Axis::Z), rig.angle(r, Axis::Z));
        }
    }

    #[test]
    fn test_legacy_front_left_lower_moves_paw_twice() {
        let mut rig = rig_with(
            BodyPart::FrontLeftLeg,
            JointTier::Lower,
            Axis::Y,
            CompatMode::Legacy,
        );
        rig.step_backward();
        assert_eq!(rig.angle(Segment::FrontLeftLower, Axis::Y), 0);
        assert_eq!(rig.angle(Segment::FrontLeftPaw, Axis::Y), 2);
    }

    #[test]
    fn test_legacy_front_left_upper_skips_lower() {
        let mut rig = rig_with(
            BodyPart::FrontLeftLeg,
            JointTier::Upper,
            Axis::Z,
            CompatMode::Legacy,
        );
        rig.step_forward();
        assert_eq!(rig.angle(Segment::FrontLeftUpper, Axis::Z), -1);
        assert_eq!(rig.angle(Segment::FrontLeftLower, Axis::Z), 0);
        assert_eq!(rig.angle(Segment::FrontLeftPaw, Axis::Z), -2);
    }

    #[test]
    fn test_legacy_x_axis_is_unaffected() {
        let mut rig = rig_with(
            BodyPart::FrontLeftLeg,
            JointTier::Upper,
            Axis::X,
            CompatMode::Legacy,
        );
        rig.step_backward();
        assert_eq!(rig.angles(Segment::FrontLeftUpper)[0], 1);
        assert_eq!(rig.angles(Segment::FrontLeftLower)[0], 1);
        assert_eq!(rig.angles(Segment::FrontLeftPaw)[0], 1);
    }

    #[test]
    fn test_legacy_decrement_guard_is_narrower() {
        let mut rig = rig_with(
            BodyPart::FrontLeftLeg,
            JointTier::Upper,
            Axis::X,
            CompatMode::Legacy,
        );
        for _ in 0..20 {
            rig.step_forward();
        }
        assert_eq!(rig.angle(Segment::FrontLeftUpper, Axis::X), -8);

        let mut normal = rig_with(
            BodyPart::FrontLeftLeg,
            JointTier::Upper,
            Axis::X,
            CompatMode::Normalized,
        );
        for _ in 0..20 {
            normal.step_forward();
        }
        assert_eq!(normal.angle(Segment::FrontLeftUpper, Axis::X), -12);
    }

    #[test]
    fn test_step_at_i32_extremes_does_not_overflow() {
        let mut rig = rig_with(BodyPart::Tail, JointTier::Paw, Axis::X, CompatMode::Normalized);
        rig.angles[Segment::Tail.index()][0] = i32::MAX;
        rig.step_backward();
        assert_eq!(rig.angle(Segment::Tail, Axis::X), i32::MAX);
        rig.angles[Segment::Tail.index()][0] = i32::MIN;
        rig.step_forward();
        assert_eq!(rig.angle(Segment::Tail, Axis::X), i32::MIN);
    }

    #[test]
    fn test_cascade_saturates_descendants() {
        let mut rig = rig_with(
            BodyPart::RearLeftLeg,
            JointTier::Upper,
            Axis::Z,
            CompatMode::Normalized,
        );
        rig.angles[Segment::RearLeftLower.index()][2] = i32::MAX;
        rig.step_backward();
        assert_eq!(rig.angle(Segment::RearLeftUpper, Axis::Z), 1);
        assert_eq!(rig.angle(Segment::RearLeftLower, Axis::Z), i32::MAX);
        assert_eq!(rig.angle(Segment::RearLeftPaw, Axis::Z), 1);
    }

    #[test]
    fn test_legacy_rear_right_paw_z_guard_reads_upper() {
        let mut rig = rig_with(
            BodyPart::RearRightLeg,
            JointTier::Paw,
            Axis::Z,
            CompatMode::Legacy,
        );
        // no lower bound on the paw itself while the upper joint is at 0
        for _ in 0..6 {
            rig.step_forward();
        }
        assert_eq!(rig.angle(Segment::RearRightPaw, Axis::Z), -6);

        // an upper joint below -3 blocks the paw in both directions
        rig.angles[Segment::RearRightUpper.index()][2] = -4;
        rig.step_forward();
        rig.step_backward();
        assert_eq!(rig.angle(Segment::RearRightPaw, Axis::Z), -6);

        let mut normal = rig_with(
            BodyPart::RearRightLeg,
            JointTier::Paw,
            Axis::Z,
            CompatMode::Normalized,
        );
        for _ in 0..6 {
            normal.step_forward();
        }
        assert_eq!(normal.angle(Segment::RearRightPaw, Axis::Z), -3);
    }
}
