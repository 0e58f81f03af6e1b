use cgmath::{Deg, Point3};
use trellis_mesh::{Matrix4, Vector3};

pub trait Camera {
    fn view(&self) -> Matrix4;
    fn projection(&self) -> Matrix4;
}

/// A perspective camera that looks from `eye` towards `target`.
///
/// The projection uses OpenGL clip-space conventions (depth in -1..1);
/// backends with a different depth range correct for it themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct LookAtCamera {
    // Where the camera is located.
    pub eye: Point3<f32>,
    // Where the camera is pointing.
    pub target: Point3<f32>,
    // The orientation of the camera.
    pub up: Vector3,
    // The aspect ratio of the scene (width:height).
    pub aspect: f32,
    // The vertical field of view, in degrees.
    pub fovy: f32,
    // Near and far clipping planes.
    pub znear: f32,
    pub zfar: f32,
}

impl LookAtCamera {
    pub fn new(eye: Point3<f32>, target: Point3<f32>, aspect: f32) -> Self {
        Self {
            eye,
            target,
            // Use 'y' as the vertical axis.
            up: Vector3::unit_y(),
            aspect,
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

impl Camera for LookAtCamera {
    fn view(&self) -> Matrix4 {
        Matrix4::look_at_rh(self.eye, self.target, self.up)
    }

    fn projection(&self) -> Matrix4 {
        cgmath::perspective(Deg(self.fovy), self.aspect, self.znear, self.zfar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Transform};

    #[test]
    fn view_moves_eye_to_origin() {
        let camera = LookAtCamera::new((0.0, 5.0, 40.0).into(), (0.0, 0.0, 0.0).into(), 1.0);
        let eye = camera.view().transform_point(camera.eye);
        assert!(Vector3::new(eye.x, eye.y, eye.z).magnitude() < 1e-4);
    }

    #[test]
    fn target_is_in_front_of_camera() {
        let camera = LookAtCamera::new((0.0, 0.0, 10.0).into(), (0.0, 0.0, 0.0).into(), 1.0);
        let target = camera.view().transform_point(camera.target);
        // Right-handed view space looks down -z.
        assert!((target.z + 10.0).abs() < 1e-4);
    }
}
