use glam::{Mat4, Vec3};

use super::constants::{CAMERA_FAR, CAMERA_NEAR, CAMERA_Z, FRUSTUM_SIZE};

/// Drawable size in pixels. Both dimensions are at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Resolution uniform in the `(w, h, pixel_ratio)` shape the shaders use.
    pub fn resolution(&self) -> [f32; 3] {
        [self.width as f32, self.height as f32, 1.0]
    }
}

/// Orthographic view volume bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrthoFrustum {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
}

impl OrthoFrustum {
    /// Fixed vertical extent of `size`, horizontal extent follows the aspect.
    pub fn for_viewport(viewport: Viewport, size: f32) -> Self {
        let half_h = size / 2.0;
        let half_w = size * viewport.aspect() / 2.0;
        Self {
            left: -half_w,
            right: half_w,
            top: half_h,
            bottom: -half_h,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }
}

/// Orthographic camera on the +Z axis looking at the origin.
#[derive(Clone, Debug)]
pub struct OrthoCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub frustum: OrthoFrustum,
}

impl OrthoCamera {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            frustum: OrthoFrustum::for_viewport(viewport, FRUSTUM_SIZE),
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.frustum = OrthoFrustum::for_viewport(viewport, FRUSTUM_SIZE);
    }

    /// Clip-space projection with a `[0, 1]` depth range.
    pub fn projection_matrix(&self) -> Mat4 {
        let f = &self.frustum;
        Mat4::orthographic_rh(f.left, f.right, f.bottom, f.top, f.near, f.far)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
