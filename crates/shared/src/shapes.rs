//! Static shape of each rigid segment, as compiled into cached geometry

use serde::{Deserialize, Serialize};

use crate::{Axis, Segment};

/// One transform applied before the primitive is emitted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeStep {
    Rotate { degrees: f32, axis: Axis },
    Scale { factors: [f32; 3] },
    Translate { offset: [f32; 3] },
}

/// Backend primitive drawn at the end of a shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PrimitiveShape {
    /// Sphere tessellated at the configured resolution
    Sphere { radius: f32 },
    /// Teapot of fixed size
    Teapot { size: f32 },
}

/// Default colour of the whole model, set by the body list
pub const MODEL_COLOR: [f32; 3] = [0.05, 0.58, 0.78];

/// Geometry of one segment in its own frame
#[derive(Debug)]
pub struct ShapeDef {
    /// Sets the model colour before drawing; later segments inherit it
    pub sets_color: bool,
    pub steps: &'static [ShapeStep],
    pub primitive: PrimitiveShape,
}

const UNIT_SPHERE: PrimitiveShape = PrimitiveShape::Sphere { radius: 1.0 };

const fn scale(x: f32, y: f32, z: f32) -> ShapeStep {
    ShapeStep::Scale { factors: [x, y, z] }
}

const fn translate(x: f32, y: f32, z: f32) -> ShapeStep {
    ShapeStep::Translate { offset: [x, y, z] }
}

const fn rotate_z(degrees: f32) -> ShapeStep {
    ShapeStep::Rotate {
        degrees,
        axis: Axis::Z,
    }
}

const fn ellipsoid(steps: &'static [ShapeStep]) -> ShapeDef {
    ShapeDef {
        sets_color: false,
        steps,
        primitive: UNIT_SPHERE,
    }
}

const BODY: &[ShapeStep] = &[scale(1.1, 0.5, 0.5)];
const FRONT_LEFT_UPPER: &[ShapeStep] = &[scale(0.20, 0.45, 0.20), translate(3.0, -0.8, -1.0)];
const FRONT_LEFT_LOWER: &[ShapeStep] = &[scale(0.11, 0.20, 0.11), translate(5.5, -4.5, -2.0)];
const FRONT_LEFT_PAW: &[ShapeStep] = &[scale(0.15, 0.09, 0.1), translate(4.8, -11.9, -2.1)];
const FRONT_RIGHT_UPPER: &[ShapeStep] = &[scale(0.20, 0.45, 0.20), translate(3.0, -0.8, 1.0)];
const FRONT_RIGHT_LOWER: &[ShapeStep] = &[scale(0.11, 0.20, 0.11), translate(5.5, -4.5, 2.0)];
const FRONT_RIGHT_PAW: &[ShapeStep] = &[scale(0.15, 0.09, 0.1), translate(4.8, -11.9, 2.1)];
const REAR_LEFT_UPPER: &[ShapeStep] = &[scale(0.29, 0.4, 0.29), translate(-2.5, -0.8, -1.0)];
const REAR_LEFT_LOWER: &[ShapeStep] = &[scale(0.19, 0.4, 0.19), translate(-3.8, -1.8, -1.4)];
const REAR_LEFT_PAW: &[ShapeStep] = &[scale(0.15, 0.09, 0.1), translate(-3.8, -11.9, -2.9)];
const REAR_RIGHT_UPPER: &[ShapeStep] = &[scale(0.29, 0.4, 0.29), translate(-2.5, -0.8, 1.0)];
const REAR_RIGHT_LOWER: &[ShapeStep] = &[scale(0.19, 0.4, 0.19), translate(-3.8, -1.8, 1.4)];
const REAR_RIGHT_PAW: &[ShapeStep] = &[scale(0.15, 0.09, 0.1), translate(-3.8, -11.9, 2.9)];
const NECK: &[ShapeStep] = &[rotate_z(60.0), scale(0.15, 0.2, 0.2), translate(4.5, -4.0, 0.0)];
const HEAD: &[ShapeStep] = &[translate(1.35, 0.5, 0.0)];
const TAIL: &[ShapeStep] = &[rotate_z(-45.0), scale(0.27, 0.09, 0.09), translate(-3.8, -5.7, 0.0)];

/// Shapes indexed by `Segment::index()`
static SHAPES: [ShapeDef; Segment::COUNT] = [
    ShapeDef {
        sets_color: true,
        steps: BODY,
        primitive: UNIT_SPHERE,
    },
    ellipsoid(FRONT_LEFT_UPPER),
    ellipsoid(FRONT_LEFT_LOWER),
    ellipsoid(FRONT_LEFT_PAW),
    ellipsoid(FRONT_RIGHT_UPPER),
    ellipsoid(FRONT_RIGHT_LOWER),
    ellipsoid(FRONT_RIGHT_PAW),
    ellipsoid(REAR_LEFT_UPPER),
    ellipsoid(REAR_LEFT_LOWER),
    ellipsoid(REAR_LEFT_PAW),
    ellipsoid(REAR_RIGHT_UPPER),
    ellipsoid(REAR_RIGHT_LOWER),
    ellipsoid(REAR_RIGHT_PAW),
    ellipsoid(NECK),
    ShapeDef {
        sets_color: false,
        steps: HEAD,
        primitive: PrimitiveShape::Teapot { size: 0.4 },
    },
    ellipsoid(TAIL),
];

pub fn shape_of(segment: Segment) -> &'static ShapeDef {
    &SHAPES[segment.index()]
}
