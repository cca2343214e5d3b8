//! Canned poses

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Axis, OffsetSlot, RigError, Segment};

/// Literal angle and offset assignments applied on top of a zeroed rig.
///
/// Anything not listed stays at zero.
#[derive(Debug)]
pub struct PoseTable {
    pub angles: &'static [(Segment, Axis, i32)],
    pub offsets: &'static [(OffsetSlot, [f32; 2])],
}

/// One of the five stances cycled by the pose command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pose {
    Sit,
    RollOver,
    ShakeHands,
    Beg,
    Jump,
}

impl Pose {
    pub const COUNT: usize = 5;

    pub const ALL: [Pose; Pose::COUNT] = [
        Pose::Sit,
        Pose::RollOver,
        Pose::ShakeHands,
        Pose::Beg,
        Pose::Jump,
    ];

    /// Pose selected by an unbounded command index (wraps modulo 5)
    pub fn from_index(index: u64) -> Pose {
        Pose::ALL[(index % Pose::COUNT as u64) as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            Pose::Sit => "sit",
            Pose::RollOver => "roll over",
            Pose::ShakeHands => "shake hands",
            Pose::Beg => "beg",
            Pose::Jump => "jump",
        }
    }

    pub fn table(self) -> &'static PoseTable {
        match self {
            Pose::Sit => &SIT,
            Pose::RollOver => &ROLL_OVER,
            Pose::ShakeHands => &SHAKE_HANDS,
            Pose::Beg => &BEG,
            Pose::Jump => &JUMP,
        }
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pose {
    type Err = RigError;

    /// Accepts a pose name ("shake hands", "shake_hands") or a numeric index
    fn from_str(s: &str) -> Result<Self, RigError> {
        if let Ok(index) = s.trim().parse::<u64>() {
            return Ok(Pose::from_index(index));
        }
        let key = s.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        Pose::ALL
            .into_iter()
            .find(|p| p.name() == key)
            .ok_or_else(|| RigError::InvalidArgument(format!("unknown pose '{s}'")))
    }
}

use Axis::{X, Y, Z};
use OffsetSlot as O;
use Segment as S;

static SIT: PoseTable = PoseTable {
    angles: &[
        (S::Body, Z, 40),
        (S::RearLeftUpper, Z, 65),
        (S::RearLeftLower, Z, -60),
        (S::RearLeftPaw, Z, 10),
        (S::RearRightUpper, Z, 65),
        (S::RearRightLower, Z, -60),
        (S::RearRightPaw, Z, 10),
        (S::Neck, Z, 30),
        (S::Tail, Z, 40),
    ],
    offsets: &[
        (O::RearUpper, [0.1, 0.35]),
        (O::RearLower, [1.35, 0.0]),
        (O::Head, [-0.2, 0.5]),
    ],
};

static ROLL_OVER: PoseTable = PoseTable {
    angles: &[
        (S::Body, Z, 180),
        (S::FrontLeftUpper, Z, 150),
        (S::FrontLeftLower, Z, 210),
        (S::FrontLeftPaw, Z, 180),
        (S::FrontRightUpper, Z, 150),
        (S::FrontRightLower, Z, 210),
        (S::FrontRightPaw, Z, 180),
        (S::RearLeftUpper, Z, 180),
        (S::RearLeftLower, Z, 200),
        (S::RearLeftPaw, Z, 180),
        (S::RearRightUpper, Z, 180),
        (S::RearRightLower, Z, 210),
        (S::RearRightPaw, Z, 185),
        (S::Neck, Z, 180),
        (S::Head, Z, 170),
        (S::Head, X, -10),
        (S::Head, Y, -12),
        (S::Tail, Z, 180),
    ],
    offsets: &[
        (O::RearUpper, [0.0, 0.0]),
        (O::RearLower, [-0.2, 0.3]),
        (O::FrontUpper, [0.2, 0.3]),
        (O::FrontLower, [-0.52, -0.2]),
        (O::FrontPaw, [-0.15, 0.0]),
        (O::RearPaw, [-0.15, 0.0]),
        (O::Head, [0.0, 0.0]),
    ],
};

static SHAKE_HANDS: PoseTable = PoseTable {
    angles: &[
        (S::Body, Z, 40),
        (S::FrontRightUpper, Z, 45),
        (S::FrontRightLower, Z, 45),
        (S::FrontRightPaw, Z, 45),
        (S::RearLeftUpper, Z, 65),
        (S::RearLeftLower, Z, -60),
        (S::RearLeftPaw, Z, 10),
        (S::RearRightUpper, Z, 65),
        (S::RearRightLower, Z, -60),
        (S::RearRightPaw, Z, 10),
        (S::Neck, Z, 30),
        (S::Tail, Z, 40),
    ],
    offsets: &[
        (O::RearUpper, [0.1, 0.35]),
        (O::RearLower, [1.35, 0.0]),
        (O::Head, [-0.2, 0.5]),
    ],
};

static BEG: PoseTable = PoseTable {
    angles: &[
        (S::Body, Z, 60),
        (S::FrontLeftUpper, Z, 60),
        (S::FrontLeftLower, Z, 58),
        (S::FrontLeftPaw, Z, -40),
        (S::FrontRightUpper, Z, 60),
        (S::FrontRightLower, Z, 58),
        (S::FrontRightPaw, Z, -40),
        (S::RearLeftUpper, Z, 65),
        (S::RearLeftLower, Z, -60),
        (S::RearLeftPaw, Z, 10),
        (S::RearRightUpper, Z, 65),
        (S::RearRightLower, Z, -60),
        (S::RearRightPaw, Z, 10),
        (S::Neck, Z, 50),
        (S::Head, Z, 20),
        (S::Tail, Z, 60),
    ],
    offsets: &[
        (O::Head, [-0.1, 0.5]),
        (O::RearUpper, [0.1, 0.30]),
        (O::RearLower, [1.35, 0.0]),
        (O::FrontPaw, [0.4, 1.8]),
    ],
};

static JUMP: PoseTable = PoseTable {
    angles: &[
        (S::FrontLeftUpper, Z, 60),
        (S::FrontLeftLower, Z, 90),
        (S::FrontRightUpper, Z, 60),
        (S::FrontRightLower, Z, 90),
        (S::RearLeftUpper, Z, -70),
        (S::RearLeftLower, Z, -67),
        (S::RearLeftPaw, Z, 10),
        (S::RearRightUpper, Z, -70),
        (S::RearRightLower, Z, -67),
        (S::RearRightPaw, Z, 10),
        (S::Tail, Z, 18),
    ],
    offsets: &[
        (O::RearUpper, [0.5, -0.5]),
        (O::RearLower, [0.5, -0.5]),
        (O::FrontUpper, [-0.2, -0.5]),
        (O::FrontLower, [-0.85, -0.5]),
        (O::FrontPaw, [0.9, 0.8]),
        (O::RearPaw, [-1.1, 0.9]),
    ],
};
