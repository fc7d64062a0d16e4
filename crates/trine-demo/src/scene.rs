//! Triangle transform state and the per-frame update rules.

use glam::Mat4;
use trine_engine::input::KeyState;

/// Position and orientation of the triangle.
///
/// Offsets are unbounded: holding a key moves the triangle off screen and
/// keeps going. Rotation only grows; `sin`/`cos` take care of wrapping.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct TransformState {
    pub offset_x: f32,
    pub offset_y: f32,
    pub rotation: f32,
}

impl TransformState {
    /// Adds `step` radians to the rotation.
    pub fn advance_rotation(&mut self, step: f32) {
        self.rotation += step;
    }

    /// Movement step: applies `step` once per held direction.
    ///
    /// Directions compose additively, so two perpendicular keys move
    /// diagonally and two opposite keys cancel out.
    pub fn apply_movement(&mut self, keys: &KeyState, step: f32) {
        if keys.up {
            self.offset_y += step;
        }
        if keys.down {
            self.offset_y -= step;
        }
        if keys.left {
            self.offset_x -= step;
        }
        if keys.right {
            self.offset_x += step;
        }
    }

    /// Column-major rotation + translation matrix for the current state.
    ///
    /// Columns are `(c, -s, 0, 0)`, `(s, c, 0, 0)`, `(0, 0, 1, 0)` and
    /// `(offset_x, offset_y, 0, 1)`.
    pub fn matrix(&self) -> Mat4 {
        let (s, c) = self.rotation.sin_cos();

        #[rustfmt::skip]
        let cols = [
            c,             -s,            0.0, 0.0,
            s,              c,            0.0, 0.0,
            0.0,            0.0,          1.0, 0.0,
            self.offset_x,  self.offset_y, 0.0, 1.0,
        ];

        Mat4::from_cols_array(&cols)
    }
}
