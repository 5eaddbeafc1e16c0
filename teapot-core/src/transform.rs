/// Model, view and projection matrix builders and the rotating scene state
use nalgebra::Matrix4;

use crate::geometry::{Mat4, Vec3};

/// Rotation angle and placement of the model, advanced once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneState {
    /// Rotation about the Y axis in radians. Grows without bound.
    pub angle: f64,
    pub translation: Vec3,
    pub ticks: u64,
}

impl SceneState {
    pub fn new(translation: Vec3) -> Self {
        Self {
            angle: 0.0,
            translation,
            ticks: 0,
        }
    }

    /// Rotate by `delta` radians
    pub fn advance(&mut self, delta: f64) {
        self.angle += delta;
        self.ticks += 1;
    }

    pub fn model_matrix(&self) -> Mat4 {
        Transform::model_matrix(&self.translation, self.angle)
    }
}

/// Transform builder for the model-view-projection chain
pub struct Transform;

impl Transform {
    /// Rotation about Y by `angle` radians followed by a translation.
    ///
    /// The sin terms sit at (row 0, col 2) positive and (row 2, col 0)
    /// negative, which fixes the direction the model spins in.
    #[rustfmt::skip]
    pub fn model_matrix(translation: &Vec3, angle: f64) -> Mat4 {
        let (sin, cos) = angle.sin_cos();
        Matrix4::new(
            cos, 0.0, sin, translation.x,
            0.0, 1.0, 0.0, translation.y,
            -sin, 0.0, cos, translation.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Camera fixed at the origin looking down -Z.
    pub fn view_matrix() -> Mat4 {
        Matrix4::identity()
    }

    /// Perspective projection from a vertical field of view in radians.
    ///
    /// The horizontal extent uses `aspect * fov_y` as the horizontal field of
    /// view rather than deriving it from the vertical half-extent.
    pub fn projection_matrix(fov_y: f64, aspect: f64, near: f64, far: f64) -> Mat4 {
        let fov_x = aspect * fov_y;
        let top = near * (fov_y * 0.5).tan();
        let right = near * (fov_x * 0.5).tan();
        Self::frustum_matrix(-right, right, -top, top, near, far)
    }

    /// OpenGL-style off-axis frustum
    #[rustfmt::skip]
    pub fn frustum_matrix(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Mat4 {
        let width = right - left;
        let height = top - bottom;
        let depth = far - near;
        Matrix4::new(
            2.0 * near / width, 0.0, (right + left) / width, 0.0,
            0.0, 2.0 * near / height, (top + bottom) / height, 0.0,
            0.0, 0.0, -(far + near) / depth, -2.0 * far * near / depth,
            0.0, 0.0, -1.0, 0.0,
        )
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(model: &Mat4, view: &Mat4, projection: &Mat4) -> Mat4 {
        projection * view * model
    }
}
