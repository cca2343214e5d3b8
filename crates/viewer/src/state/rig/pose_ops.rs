//! Canned poses and reset

use shared::Pose;

use super::JointRig;

impl JointRig {
    /// Zero the rig and assign the literal table of pose `index mod 5`.
    ///
    /// Counts as one pose command.
    pub fn apply_pose(&mut self, index: u64) -> Pose {
        let pose = Pose::from_index(index);
        self.zero();
        let table = pose.table();
        for &(segment, axis, degrees) in table.angles {
            self.angles[segment.index()][axis.index()] = degrees;
        }
        for &(slot, offset) in table.offsets {
            self.offsets[slot.index()] = offset;
        }
        self.pose_counter = self.pose_counter.wrapping_add(1);
        self.notify_mutated();
        tracing::info!("{}", pose);
        pose
    }

    /// Apply the pose the command counter currently points at
    pub fn apply_next_pose(&mut self) -> Pose {
        self.apply_pose(self.pose_counter)
    }

    /// Zero every angle and offset. Selection and pose counter are kept.
    pub fn reset(&mut self) {
        self.zero();
        self.notify_mutated();
        tracing::info!("Reset to neutral stance");
    }
}
