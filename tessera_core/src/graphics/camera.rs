//! Camera utilities of the client.

use ultraviolet::projection::{orthographic_vk, perspective_vk};
use ultraviolet::{Mat4, Vec3};

/// Field of view used by default, in degrees.
pub const DEFAULT_FOV: f32 = 90.0;

/// View direction of the unrotated camera or character.
pub fn forward() -> Vec3 {
    Vec3::unit_z()
}

/// Camera through which the scene is rendered.
pub trait Camera {
    fn position(&self) -> Vec3;

    fn set_position(&mut self, position: Vec3);

    fn view_direction(&self) -> Vec3;

    fn set_view_direction(&mut self, direction: Vec3);

    /// Current field of view in degrees.
    fn fov(&self) -> f32;

    /// Widens field of view by `degrees` over the base one.
    fn extend_fov(&mut self, degrees: f32);

    /// Restores base field of view.
    fn reset_fov(&mut self);

    fn view_matrix(&self) -> Mat4;

    fn projection_matrix(&self, aspect_ratio: f32) -> Mat4;

    /// Returns bobbing capability of this camera, if bobbing is allowed.
    fn bobbing(&mut self) -> Option<&mut dyn Bobbing> {
        None
    }
}

/// Camera capability of shaking along with steps of the character.
pub trait Bobbing {
    fn set_bobbing_rotation_offset_factor(&mut self, factor: f32);

    fn set_bobbing_vertical_offset_factor(&mut self, factor: f32);
}

/// Camera with perspective projection.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PerspectiveCamera {
    position: Vec3,
    view_direction: Vec3,
    up: Vec3,
    base_fov: f32,
    fov_extension: f32,
    z_near: f32,
    z_far: f32,
    bobbing_allowed: bool,
    bobbing_rotation_offset: f32,
    bobbing_vertical_offset: f32,
}

impl PerspectiveCamera {
    pub fn new(base_fov: f32) -> Self {
        Self {
            position: Vec3::zero(),
            view_direction: forward(),
            up: Vec3::unit_y(),
            base_fov,
            fov_extension: 0.0,
            z_near: 0.1,
            z_far: 1000.0,
            bobbing_allowed: true,
            bobbing_rotation_offset: 0.0,
            bobbing_vertical_offset: 0.0,
        }
    }

    pub fn set_bobbing_allowed(&mut self, allowed: bool) {
        self.bobbing_allowed = allowed;
    }

    /// Roll of the camera caused by bobbing, in radians.
    pub fn bobbing_rotation_offset(&self) -> f32 {
        self.bobbing_rotation_offset
    }

    /// Vertical shift of the camera caused by bobbing.
    pub fn bobbing_vertical_offset(&self) -> f32 {
        self.bobbing_vertical_offset
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(DEFAULT_FOV)
    }
}

impl Camera for PerspectiveCamera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn view_direction(&self) -> Vec3 {
        self.view_direction
    }

    fn set_view_direction(&mut self, direction: Vec3) {
        self.view_direction = direction.normalized();
    }

    fn fov(&self) -> f32 {
        self.base_fov + self.fov_extension
    }

    fn extend_fov(&mut self, degrees: f32) {
        self.fov_extension = degrees;
    }

    fn reset_fov(&mut self) {
        self.fov_extension = 0.0;
    }

    fn view_matrix(&self) -> Mat4 {
        let eye = self.position + self.up * self.bobbing_vertical_offset;
        // roll the up vector around the view direction
        let (sin, cos) = self.bobbing_rotation_offset.sin_cos();
        let axis = self.view_direction;
        let up = self.up * cos + axis.cross(self.up) * sin + axis * axis.dot(self.up) * (1.0 - cos);
        Mat4::look_at(eye, eye + self.view_direction, up)
    }

    fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        perspective_vk(self.fov().to_radians(), aspect_ratio, self.z_near, self.z_far)
    }

    fn bobbing(&mut self) -> Option<&mut dyn Bobbing> {
        if self.bobbing_allowed {
            Some(self)
        } else {
            None
        }
    }
}

impl Bobbing for PerspectiveCamera {
    fn set_bobbing_rotation_offset_factor(&mut self, factor: f32) {
        self.bobbing_rotation_offset = factor;
    }

    fn set_bobbing_vertical_offset_factor(&mut self, factor: f32) {
        self.bobbing_vertical_offset = factor;
    }
}

/// Camera with orthographic projection, e.g. for map views.
///
/// Field of view is meaningless for it, so it never changes.
///
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrthographicCamera {
    position: Vec3,
    view_direction: Vec3,
    half_height: f32,
    z_near: f32,
    z_far: f32,
}

impl OrthographicCamera {
    pub fn new(half_height: f32) -> Self {
        Self {
            position: Vec3::zero(),
            view_direction: -Vec3::unit_y(),
            half_height,
            z_near: 0.1,
            z_far: 1000.0,
        }
    }
}

impl Camera for OrthographicCamera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn view_direction(&self) -> Vec3 {
        self.view_direction
    }

    fn set_view_direction(&mut self, direction: Vec3) {
        self.view_direction = direction.normalized();
    }

    fn fov(&self) -> f32 {
        0.0
    }

    fn extend_fov(&mut self, _degrees: f32) {}

    fn reset_fov(&mut self) {}

    fn view_matrix(&self) -> Mat4 {
        let up = if self.view_direction.y.abs() > 0.99 {
            -Vec3::unit_z()
        } else {
            Vec3::unit_y()
        };
        Mat4::look_at(self.position, self.position + self.view_direction, up)
    }

    fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        let half_width = self.half_height * aspect_ratio;
        orthographic_vk(
            -half_width,
            half_width,
            -self.half_height,
            self.half_height,
            self.z_near,
            self.z_far,
        )
    }
}
