use shared::{Axis, BodyPart, BodyPartSet, JointTier};

/// Active control selection: which parts step, on which tier, around which axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    parts: BodyPartSet,
    tier: JointTier,
    axis: Axis,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            parts: BodyPartSet::empty(),
            tier: JointTier::Paw,
            axis: Axis::X,
        }
    }
}

impl Selection {
    pub fn new(parts: BodyPartSet, tier: JointTier, axis: Axis) -> Self {
        Self { parts, tier, axis }
    }

    /// Toggled parts
    pub fn parts(&self) -> BodyPartSet {
        self.parts
    }

    /// Active joint tier (legs only)
    pub fn tier(&self) -> JointTier {
        self.tier
    }

    /// Active rotation axis
    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn is_toggled(&self, part: BodyPart) -> bool {
        self.parts.contains_part(part)
    }

    pub(crate) fn set_tier(&mut self, tier: JointTier) {
        self.tier = tier;
    }

    pub(crate) fn set_axis(&mut self, axis: Axis) {
        self.axis = axis;
    }

    /// Flip `part`, returning whether it is now toggled
    pub(crate) fn toggle(&mut self, part: BodyPart) -> bool {
        self.parts.toggle_part(part)
    }
}
