//! Shape compilation helpers

use glam::Vec3;
use shared::{PrimitiveShape, ShapeDef, ShapeStep};

use crate::state::Tessellation;
use crate::viewport::RenderBackend;

/// Apply one shape step to the backend's current matrix
pub fn apply_step<B: RenderBackend + ?Sized>(backend: &mut B, step: &ShapeStep) {
    match *step {
        ShapeStep::Rotate { degrees, axis } => backend.rotate(degrees, Vec3::from(axis.unit())),
        ShapeStep::Scale { factors } => backend.scale(Vec3::from(factors)),
        ShapeStep::Translate { offset } => backend.translate(Vec3::from(offset)),
    }
}

/// Draw a shape primitive at the configured resolution
pub fn emit_primitive<B: RenderBackend + ?Sized>(
    backend: &mut B,
    primitive: &PrimitiveShape,
    tessellation: Tessellation,
) {
    match *primitive {
        PrimitiveShape::Sphere { radius } => {
            backend.solid_sphere(radius, tessellation.slices, tessellation.stacks)
        }
        PrimitiveShape::Teapot { size } => backend.solid_teapot(size),
    }
}

/// Emit the full body of a segment list: optional colour, then the steps and
/// primitive inside their own matrix scope.
///
/// Shapes that set the colour set `model_color`.
pub fn emit_shape<B: RenderBackend + ?Sized>(
    backend: &mut B,
    shape: &ShapeDef,
    tessellation: Tessellation,
    model_color: [f32; 3],
) {
    if shape.sets_color {
        backend.color(model_color);
    }
    backend.push_matrix();
    for step in shape.steps {
        apply_step(backend, step);
    }
    emit_primitive(backend, &shape.primitive, tessellation);
    backend.pop_matrix();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::{DrawOp, RecordingBackend};
    use shared::{shape_of, Segment};

    #[test]
    fn test_neck_shape_sequence() {
        let mut rec = RecordingBackend::new();
        emit_shape(
            &mut rec,
            shape_of(Segment::Neck),
            Tessellation::default(),
            [1.0; 3],
        );
        assert_eq!(
            rec.frame_log(),
            &[
                DrawOp::PushMatrix,
                DrawOp::Rotate {
                    degrees: 60.0,
                    axis: [0.0, 0.0, 1.0]
                },
                DrawOp::Scale {
                    factors: [0.15, 0.2, 0.2]
                },
                DrawOp::Translate {
                    offset: [4.5, -4.0, 0.0]
                },
                DrawOp::Sphere {
                    radius: 1.0,
                    slices: 36,
                    stacks: 18
                },
                DrawOp::PopMatrix,
            ]
        );
    }

    #[test]
    fn test_body_sets_model_color() {
        let mut rec = RecordingBackend::new();
        emit_shape(
            &mut rec,
            shape_of(Segment::Body),
            Tessellation { slices: 8, stacks: 4 },
            [0.5, 0.5, 0.5],
        );
        assert_eq!(rec.frame_log()[0], DrawOp::Color { rgb: [0.5, 0.5, 0.5] });
        assert!(rec.frame_log().contains(&DrawOp::Sphere {
            radius: 1.0,
            slices: 8,
            stacks: 4
        }));
    }

    #[test]
    fn test_head_is_teapot_without_color() {
        let mut rec = RecordingBackend::new();
        emit_shape(&mut rec, shape_of(Segment::Head), Tessellation::default(), [1.0; 3]);
        assert!(!rec
            .frame_log()
            .iter()
            .any(|op| matches!(op, DrawOp::Color { .. })));
        assert!(rec.frame_log().contains(&DrawOp::Teapot { size: 0.4 }));
    }
}
