/*! Model-view-projection transforms for quads.

[`QuadTransform`] is a functor: configure the camera pieces once, then
evaluate it against the current aspect ratio each time the presentation
surface changes shape. Evaluation is a pure function of the configured
state, so equal inputs produce bit-identical matrices — callers can cache
the result and compare cheaply.
*/

use glam::{Mat4, Vec3};

/// Default near plane distance.
pub const PERSPECTIVE_NEAR: f32 = 0.1;
/// Default far plane distance.
pub const PERSPECTIVE_FAR: f32 = 100.0;

/// Vertical field of view of the projection.
const FIELD_OF_VIEW: f32 = 65.0 * (std::f32::consts::PI / 180.0);

/// Rotation of the presentation surface relative to its natural portrait
/// orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    PortraitUpsideDown,
    LandscapeLeft,
    LandscapeRight,
}

impl Orientation {
    /// Rotation about the view axis that compensates for this orientation.
    fn radians(self) -> f32 {
        match self {
            Orientation::Portrait => 0.0,
            Orientation::PortraitUpsideDown => std::f32::consts::PI,
            Orientation::LandscapeLeft => std::f32::consts::FRAC_PI_2,
            Orientation::LandscapeRight => -std::f32::consts::FRAC_PI_2,
        }
    }
}

/// Computes the MVP transform for a quad from orientation, clip planes,
/// camera pose, and a translation.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadTransform {
    orientation: Orientation,
    near: f32,
    far: f32,
    eye: Vec3,
    center: Vec3,
    up: Vec3,
    translation: Vec3,
}

impl QuadTransform {
    pub fn new(orientation: Orientation, near: f32, far: f32) -> Self {
        Self {
            orientation,
            near,
            far,
            eye: Vec3::ZERO,
            center: Vec3::NEG_Z,
            up: Vec3::Y,
            //far enough back that a unit quad fits the default field of view
            translation: Vec3::new(0.0, 0.0, -1.0),
        }
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn set_near(&mut self, near: f32) {
        self.near = near;
    }

    pub fn set_far(&mut self, far: f32) {
        self.far = far;
    }

    pub fn set_look_at(&mut self, eye: Vec3, center: Vec3, up: Vec3) {
        self.eye = eye;
        self.center = center;
        self.up = up;
    }

    pub fn set_translate(&mut self, x: f32, y: f32, z: f32) {
        self.translation = Vec3::new(x, y, z);
    }

    /// Evaluates the transform for the given aspect ratio.
    ///
    /// `aspect` is guarded against zero so a degenerate bounds rectangle
    /// yields a finite (if useless) matrix rather than NaNs.
    pub fn matrix(&self, aspect: f32) -> Mat4 {
        let aspect = aspect.max(f32::EPSILON);
        let projection = Mat4::perspective_rh(FIELD_OF_VIEW, aspect, self.near, self.far);
        let view = Mat4::look_at_rh(self.eye, self.center, self.up);
        let model = Mat4::from_translation(self.translation)
            * Mat4::from_rotation_z(self.orientation.radians());
        projection * view * model
    }
}

impl Default for QuadTransform {
    fn default() -> Self {
        Self::new(Orientation::Portrait, PERSPECTIVE_NEAR, PERSPECTIVE_FAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluation_is_deterministic() {
        let transform = QuadTransform::default();
        let a = transform.matrix(2.0);
        let b = transform.matrix(2.0);
        assert_eq!(a.to_cols_array(), b.to_cols_array());
    }

    #[test]
    fn zero_aspect_is_finite() {
        let transform = QuadTransform::default();
        let m = transform.matrix(0.0);
        assert!(m.to_cols_array().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn orientation_changes_the_result() {
        let mut transform = QuadTransform::default();
        let portrait = transform.matrix(1.5);
        transform.set_orientation(Orientation::LandscapeLeft);
        let landscape = transform.matrix(1.5);
        assert_ne!(portrait.to_cols_array(), landscape.to_cols_array());
    }
}
