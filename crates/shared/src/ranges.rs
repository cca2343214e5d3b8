//! Per-segment joint ranges

use serde::{Deserialize, Serialize};

use crate::{Axis, Segment};

/// Half-open angle interval `[min, max)` in whole degrees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AngleRange {
    pub min: i32,
    pub max: i32,
}

impl AngleRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, angle: i32) -> bool {
        angle >= self.min && angle < self.max
    }

    /// Largest angle a step can land on
    pub fn last(&self) -> i32 {
        self.max - 1
    }
}

const fn xyz(x: (i32, i32), y: (i32, i32), z: (i32, i32)) -> Option<[AngleRange; 3]> {
    Some([
        AngleRange::new(x.0, x.1),
        AngleRange::new(y.0, y.1),
        AngleRange::new(z.0, z.1),
    ])
}

/// Ranges indexed by `Segment::index()`, then `Axis::index()`.
///
/// The body is positioned by poses only and has no range.
static RANGES: [Option<[AngleRange; 3]>; Segment::COUNT] = [
    // body
    None,
    // front left: upper, lower, paw
    xyz((-12, 12), (-5, 5), (-12, 20)),
    xyz((-3, 3), (-10, 5), (-5, 3)),
    xyz((-5, 5), (-5, 5), (-3, 1)),
    // front right
    xyz((-12, 12), (-5, 5), (-12, 20)),
    xyz((-3, 3), (-10, 5), (-5, 3)),
    xyz((-5, 5), (-5, 5), (-3, 1)),
    // rear left
    xyz((-12, 12), (-5, 5), (-12, 20)),
    xyz((-3, 3), (-10, 5), (-5, 3)),
    xyz((-5, 5), (-5, 5), (-3, 1)),
    // rear right
    xyz((-12, 12), (-5, 5), (-12, 20)),
    xyz((-3, 3), (-10, 5), (-5, 3)),
    xyz((-5, 5), (-5, 5), (-3, 1)),
    // neck
    xyz((-10, 10), (-10, 10), (-10, 10)),
    // head
    xyz((-20, 20), (-15, 15), (-15, 5)),
    // tail
    xyz((-20, 20), (-10, 10), (-15, 15)),
];

/// Range a step on `segment` around `axis` must land in, or `None` if the
/// segment cannot be stepped.
pub fn joint_range(segment: Segment, axis: Axis) -> Option<AngleRange> {
    RANGES[segment.index()].map(|r| r[axis.index()])
}

/// Narrower range used for decrementing steps in legacy mode.
///
/// Only the front-left upper joint on X and Z ever differed between the two
/// step directions.
pub fn legacy_decrement_range(segment: Segment, axis: Axis) -> Option<AngleRange> {
    match (segment, axis) {
        (Segment::FrontLeftUpper, Axis::X) => Some(AngleRange::new(-8, 8)),
        (Segment::FrontLeftUpper, Axis::Z) => Some(AngleRange::new(-10, 15)),
        _ => joint_range(segment, axis),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_has_no_range() {
        for axis in Axis::ALL {
            assert!(joint_range(Segment::Body, axis).is_none());
        }
    }

    #[test]
    fn test_every_other_segment_has_ranges() {
        for seg in Segment::ALL.into_iter().skip(1) {
            for axis in Axis::ALL {
                let r = joint_range(seg, axis).unwrap();
                assert!(r.min < 0 && r.max > 0, "{:?} {:?} {:?}", seg, axis, r);
            }
        }
    }

    #[test]
    fn test_known_literals() {
        assert_eq!(
            joint_range(Segment::RearLeftUpper, Axis::Z),
            Some(AngleRange::new(-12, 20))
        );
        assert_eq!(
            joint_range(Segment::FrontRightPaw, Axis::Z),
            Some(AngleRange::new(-3, 1))
        );
        assert_eq!(joint_range(Segment::Head, Axis::Z), Some(AngleRange::new(-15, 5)));
        assert_eq!(joint_range(Segment::Tail, Axis::Y), Some(AngleRange::new(-10, 10)));
    }

    #[test]
    fn test_half_open() {
        let r = AngleRange::new(-3, 1);
        assert!(r.contains(-3));
        assert!(r.contains(0));
        assert!(!r.contains(1));
        assert_eq!(r.last(), 0);
    }

    #[test]
    fn test_legacy_range_only_differs_on_front_left_upper() {
        assert_eq!(
            legacy_decrement_range(Segment::FrontLeftUpper, Axis::X),
            Some(AngleRange::new(-8, 8))
        );
        assert_eq!(
            legacy_decrement_range(Segment::FrontLeftUpper, Axis::Y),
            joint_range(Segment::FrontLeftUpper, Axis::Y)
        );
        assert_eq!(
            legacy_decrement_range(Segment::RearLeftUpper, Axis::Z),
            joint_range(Segment::RearLeftUpper, Axis::Z)
        );
    }
}
