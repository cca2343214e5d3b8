//! Closed enumerations and static tables describing the quadruped rig.
//!
//! Everything here is plain data: which parts exist, how their joints may move,
//! what the canned poses look like, and how each rigid segment is shaped. The
//! mutable rig and the geometry cache live in the viewer crate.

mod error;
mod poses;
mod ranges;
mod shapes;

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

pub use error::{Result, RigError};
pub use poses::{Pose, PoseTable};
pub use ranges::{joint_range, legacy_decrement_range, AngleRange};
pub use shapes::{shape_of, PrimitiveShape, ShapeDef, ShapeStep, MODEL_COLOR};

/// Rotation axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Position of this axis inside an `[x, y, z]` triple
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit vector along this axis
    pub fn unit(self) -> [f32; 3] {
        match self {
            Axis::X => [1.0, 0.0, 0.0],
            Axis::Y => [0.0, 1.0, 0.0],
            Axis::Z => [0.0, 0.0, 1.0],
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(s)
    }
}

impl FromStr for Axis {
    type Err = RigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            other => Err(RigError::InvalidArgument(format!("unknown axis '{other}'"))),
        }
    }
}

impl TryFrom<u8> for Axis {
    type Error = RigError;

    fn try_from(value: u8) -> Result<Self> {
        Axis::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| RigError::InvalidArgument(format!("axis index {value} out of range")))
    }
}

/// One of the three serial segments of a leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointTier {
    Upper,
    Lower,
    Paw,
}

impl JointTier {
    pub const ALL: [JointTier; 3] = [JointTier::Upper, JointTier::Lower, JointTier::Paw];

    /// This tier followed by every tier below it on the same leg.
    ///
    /// A step on a tier is propagated to all of these in the same call.
    pub fn chain(self) -> &'static [JointTier] {
        match self {
            JointTier::Upper => &[JointTier::Upper, JointTier::Lower, JointTier::Paw],
            JointTier::Lower => &[JointTier::Lower, JointTier::Paw],
            JointTier::Paw => &[JointTier::Paw],
        }
    }
}

impl fmt::Display for JointTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JointTier::Upper => "upper",
            JointTier::Lower => "lower",
            JointTier::Paw => "paw",
        };
        f.write_str(s)
    }
}

impl FromStr for JointTier {
    type Err = RigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upper" => Ok(JointTier::Upper),
            "lower" => Ok(JointTier::Lower),
            "paw" => Ok(JointTier::Paw),
            other => Err(RigError::InvalidArgument(format!("unknown joint tier '{other}'"))),
        }
    }
}

impl TryFrom<u8> for JointTier {
    type Error = RigError;

    fn try_from(value: u8) -> Result<Self> {
        JointTier::ALL.get(value as usize).copied().ok_or_else(|| {
            RigError::InvalidArgument(format!("joint tier index {value} out of range"))
        })
    }
}

/// A part that can be toggled for rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    FrontLeftLeg,
    FrontRightLeg,
    RearLeftLeg,
    RearRightLeg,
    Neck,
    Head,
    Tail,
}

impl BodyPart {
    pub const ALL: [BodyPart; 7] = [
        BodyPart::FrontLeftLeg,
        BodyPart::FrontRightLeg,
        BodyPart::RearLeftLeg,
        BodyPart::RearRightLeg,
        BodyPart::Neck,
        BodyPart::Head,
        BodyPart::Tail,
    ];

    pub fn is_leg(self) -> bool {
        matches!(
            self,
            BodyPart::FrontLeftLeg
                | BodyPart::FrontRightLeg
                | BodyPart::RearLeftLeg
                | BodyPart::RearRightLeg
        )
    }

    /// Segment actuated when this part is stepped with `tier` active.
    ///
    /// Single-segment parts ignore the tier.
    pub fn segment(self, tier: JointTier) -> Segment {
        use JointTier::*;
        match (self, tier) {
            (BodyPart::FrontLeftLeg, Upper) => Segment::FrontLeftUpper,
            (BodyPart::FrontLeftLeg, Lower) => Segment::FrontLeftLower,
            (BodyPart::FrontLeftLeg, Paw) => Segment::FrontLeftPaw,
            (BodyPart::FrontRightLeg, Upper) => Segment::FrontRightUpper,
            (BodyPart::FrontRightLeg, Lower) => Segment::FrontRightLower,
            (BodyPart::FrontRightLeg, Paw) => Segment::FrontRightPaw,
            (BodyPart::RearLeftLeg, Upper) => Segment::RearLeftUpper,
            (BodyPart::RearLeftLeg, Lower) => Segment::RearLeftLower,
            (BodyPart::RearLeftLeg, Paw) => Segment::RearLeftPaw,
            (BodyPart::RearRightLeg, Upper) => Segment::RearRightUpper,
            (BodyPart::RearRightLeg, Lower) => Segment::RearRightLower,
            (BodyPart::RearRightLeg, Paw) => Segment::RearRightPaw,
            (BodyPart::Neck, _) => Segment::Neck,
            (BodyPart::Head, _) => Segment::Head,
            (BodyPart::Tail, _) => Segment::Tail,
        }
    }

    /// Human-readable label used in log output
    pub fn label(self) -> &'static str {
        match self {
            BodyPart::FrontLeftLeg => "front left leg",
            BodyPart::FrontRightLeg => "front right leg",
            BodyPart::RearLeftLeg => "rear left leg",
            BodyPart::RearRightLeg => "rear right leg",
            BodyPart::Neck => "neck",
            BodyPart::Head => "head",
            BodyPart::Tail => "tail",
        }
    }
}

impl FromStr for BodyPart {
    type Err = RigError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        BodyPart::ALL
            .into_iter()
            .find(|p| p.label().replace(' ', "_") == key)
            .ok_or_else(|| RigError::InvalidArgument(format!("unknown body part '{s}'")))
    }
}

impl TryFrom<u8> for BodyPart {
    type Error = RigError;

    fn try_from(value: u8) -> Result<Self> {
        BodyPart::ALL.get(value as usize).copied().ok_or_else(|| {
            RigError::InvalidArgument(format!("body part index {value} out of range"))
        })
    }
}

bitflags! {
    /// Set of toggled body parts
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BodyPartSet: u8 {
        const FRONT_LEFT_LEG  = 1 << 0;
        const FRONT_RIGHT_LEG = 1 << 1;
        const REAR_LEFT_LEG   = 1 << 2;
        const REAR_RIGHT_LEG  = 1 << 3;
        const NECK            = 1 << 4;
        const HEAD            = 1 << 5;
        const TAIL            = 1 << 6;
    }
}

impl Default for BodyPartSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<BodyPart> for BodyPartSet {
    fn from(part: BodyPart) -> Self {
        match part {
            BodyPart::FrontLeftLeg => BodyPartSet::FRONT_LEFT_LEG,
            BodyPart::FrontRightLeg => BodyPartSet::FRONT_RIGHT_LEG,
            BodyPart::RearLeftLeg => BodyPartSet::REAR_LEFT_LEG,
            BodyPart::RearRightLeg => BodyPartSet::REAR_RIGHT_LEG,
            BodyPart::Neck => BodyPartSet::NECK,
            BodyPart::Head => BodyPartSet::HEAD,
            BodyPart::Tail => BodyPartSet::TAIL,
        }
    }
}

impl FromIterator<BodyPart> for BodyPartSet {
    fn from_iter<I: IntoIterator<Item = BodyPart>>(iter: I) -> Self {
        iter.into_iter()
            .fold(BodyPartSet::empty(), |set, part| set | BodyPartSet::from(part))
    }
}

impl BodyPartSet {
    /// Flip membership of `part`, returning whether it is now a member
    pub fn toggle_part(&mut self, part: BodyPart) -> bool {
        self.toggle(part.into());
        self.contains_part(part)
    }

    pub fn contains_part(&self, part: BodyPart) -> bool {
        self.contains(part.into())
    }

    /// Members in `BodyPart::ALL` order
    pub fn parts(&self) -> impl Iterator<Item = BodyPart> + '_ {
        BodyPart::ALL
            .into_iter()
            .filter(move |p| self.contains_part(*p))
    }
}

/// A rigid segment with its own joint angles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    Body,
    FrontLeftUpper,
    FrontLeftLower,
    FrontLeftPaw,
    FrontRightUpper,
    FrontRightLower,
    FrontRightPaw,
    RearLeftUpper,
    RearLeftLower,
    RearLeftPaw,
    RearRightUpper,
    RearRightLower,
    RearRightPaw,
    Neck,
    Head,
    Tail,
}

impl Segment {
    pub const COUNT: usize = 16;

    /// All segments in draw order
    pub const ALL: [Segment; Segment::COUNT] = [
        Segment::Body,
        Segment::FrontLeftUpper,
        Segment::FrontLeftLower,
        Segment::FrontLeftPaw,
        Segment::FrontRightUpper,
        Segment::FrontRightLower,
        Segment::FrontRightPaw,
        Segment::RearLeftUpper,
        Segment::RearLeftLower,
        Segment::RearLeftPaw,
        Segment::RearRightUpper,
        Segment::RearRightLower,
        Segment::RearRightPaw,
        Segment::Neck,
        Segment::Head,
        Segment::Tail,
    ];

    /// Index into `Segment::ALL`
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable snake_case name, matching the serde representation
    pub fn name(self) -> &'static str {
        match self {
            Segment::Body => "body",
            Segment::FrontLeftUpper => "front_left_upper",
            Segment::FrontLeftLower => "front_left_lower",
            Segment::FrontLeftPaw => "front_left_paw",
            Segment::FrontRightUpper => "front_right_upper",
            Segment::FrontRightLower => "front_right_lower",
            Segment::FrontRightPaw => "front_right_paw",
            Segment::RearLeftUpper => "rear_left_upper",
            Segment::RearLeftLower => "rear_left_lower",
            Segment::RearLeftPaw => "rear_left_paw",
            Segment::RearRightUpper => "rear_right_upper",
            Segment::RearRightLower => "rear_right_lower",
            Segment::RearRightPaw => "rear_right_paw",
            Segment::Neck => "neck",
            Segment::Head => "head",
            Segment::Tail => "tail",
        }
    }

    /// Offset slot translated after rotation, if any.
    ///
    /// Left and right legs share a slot per tier.
    pub fn offset_slot(self) -> Option<OffsetSlot> {
        match self {
            Segment::FrontLeftUpper | Segment::FrontRightUpper => Some(OffsetSlot::FrontUpper),
            Segment::FrontLeftLower | Segment::FrontRightLower => Some(OffsetSlot::FrontLower),
            Segment::FrontLeftPaw | Segment::FrontRightPaw => Some(OffsetSlot::FrontPaw),
            Segment::RearLeftUpper | Segment::RearRightUpper => Some(OffsetSlot::RearUpper),
            Segment::RearLeftLower | Segment::RearRightLower => Some(OffsetSlot::RearLower),
            Segment::RearLeftPaw | Segment::RearRightPaw => Some(OffsetSlot::RearPaw),
            Segment::Head => Some(OffsetSlot::Head),
            Segment::Body | Segment::Neck | Segment::Tail => None,
        }
    }
}

impl FromStr for Segment {
    type Err = RigError;

    fn from_str(s: &str) -> Result<Self> {
        Segment::ALL
            .into_iter()
            .find(|seg| seg.name() == s)
            .ok_or_else(|| RigError::InvalidArgument(format!("unknown segment '{s}'")))
    }
}

/// Translation offset shared by one or more segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetSlot {
    Head,
    FrontUpper,
    FrontLower,
    FrontPaw,
    RearUpper,
    RearLower,
    RearPaw,
}

impl OffsetSlot {
    pub const COUNT: usize = 7;

    pub const ALL: [OffsetSlot; OffsetSlot::COUNT] = [
        OffsetSlot::Head,
        OffsetSlot::FrontUpper,
        OffsetSlot::FrontLower,
        OffsetSlot::FrontPaw,
        OffsetSlot::RearUpper,
        OffsetSlot::RearLower,
        OffsetSlot::RearPaw,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_index_matches_draw_order() {
        for (i, seg) in Segment::ALL.iter().enumerate() {
            assert_eq!(seg.index(), i);
        }
    }

    #[test]
    fn test_segment_name_matches_serde() {
        for seg in Segment::ALL {
            let json = serde_json::to_string(&seg).unwrap();
            assert_eq!(json, format!("\"{}\"", seg.name()));
            assert_eq!(seg.name().parse::<Segment>().unwrap(), seg);
        }
    }

    #[test]
    fn test_part_segment_for_legs() {
        assert_eq!(
            BodyPart::RearLeftLeg.segment(JointTier::Upper),
            Segment::RearLeftUpper
        );
        assert_eq!(
            BodyPart::FrontRightLeg.segment(JointTier::Paw),
            Segment::FrontRightPaw
        );
    }

    #[test]
    fn test_single_segment_parts_ignore_tier() {
        for tier in JointTier::ALL {
            assert_eq!(BodyPart::Neck.segment(tier), Segment::Neck);
            assert_eq!(BodyPart::Head.segment(tier), Segment::Head);
            assert_eq!(BodyPart::Tail.segment(tier), Segment::Tail);
        }
    }

    #[test]
    fn test_tier_chain() {
        assert_eq!(JointTier::Upper.chain().len(), 3);
        assert_eq!(JointTier::Lower.chain(), &[JointTier::Lower, JointTier::Paw]);
        assert_eq!(JointTier::Paw.chain(), &[JointTier::Paw]);
    }

    #[test]
    fn test_parse_selectors() {
        assert_eq!("Z".parse::<Axis>().unwrap(), Axis::Z);
        assert_eq!("lower".parse::<JointTier>().unwrap(), JointTier::Lower);
        assert_eq!(
            "rear-left leg".parse::<BodyPart>().unwrap(),
            BodyPart::RearLeftLeg
        );
    }

    #[test]
    fn test_invalid_selectors_rejected() {
        assert!(matches!("w".parse::<Axis>(), Err(RigError::InvalidArgument(_))));
        assert!(matches!(Axis::try_from(3), Err(RigError::InvalidArgument(_))));
        assert!(JointTier::try_from(7).is_err());
        assert!(BodyPart::try_from(7).is_err());
        assert!("wing".parse::<BodyPart>().is_err());
    }

    #[test]
    fn test_part_set_toggle() {
        let mut set = BodyPartSet::default();
        assert!(set.is_empty());
        assert!(set.toggle_part(BodyPart::Tail));
        assert!(set.contains_part(BodyPart::Tail));
        assert!(!set.toggle_part(BodyPart::Tail));
        assert!(set.is_empty());
    }

    #[test]
    fn test_part_set_iteration_order() {
        let set: BodyPartSet = [BodyPart::Tail, BodyPart::FrontLeftLeg].into_iter().collect();
        let parts: Vec<_> = set.parts().collect();
        assert_eq!(parts, vec![BodyPart::FrontLeftLeg, BodyPart::Tail]);
    }

    #[test]
    fn test_offset_slots_shared_by_sides() {
        assert_eq!(
            Segment::FrontLeftLower.offset_slot(),
            Segment::FrontRightLower.offset_slot()
        );
        assert_eq!(Segment::Neck.offset_slot(), None);
        assert_eq!(Segment::Head.offset_slot(), Some(OffsetSlot::Head));
    }
}
