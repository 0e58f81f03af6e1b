use cgmath::InnerSpace;
use trellis::LookAtCamera;
use winit::event::{ElementState, KeyboardInput, MouseButton, VirtualKeyCode, WindowEvent};

/// Orbits a camera around its target.
///
/// W/S (or up/down) move towards and away from the target, A/D (or
/// left/right) circle around it, and dragging with the left mouse button
/// rotates freely.
pub struct CameraController {
    speed: f32,
    is_forward_pressed: bool,
    is_backward_pressed: bool,
    is_left_pressed: bool,
    is_right_pressed: bool,
    dragging: bool,
    cursor: Option<winit::dpi::PhysicalPosition<f64>>,
    // Cursor position the last time the camera was updated.
    anchor: Option<winit::dpi::PhysicalPosition<f64>>,
}

impl CameraController {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            is_forward_pressed: false,
            is_backward_pressed: false,
            is_left_pressed: false,
            is_right_pressed: false,
            dragging: false,
            cursor: None,
            anchor: None,
        }
    }

    /// Returns whether the event was consumed.
    pub fn process_events(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput {
                input:
                    KeyboardInput {
                        state,
                        virtual_keycode: Some(keycode),
                        ..
                    },
                ..
            } => {
                let is_pressed = *state == ElementState::Pressed;
                match keycode {
                    VirtualKeyCode::W | VirtualKeyCode::Up => self.is_forward_pressed = is_pressed,
                    VirtualKeyCode::A | VirtualKeyCode::Left => self.is_left_pressed = is_pressed,
                    VirtualKeyCode::S | VirtualKeyCode::Down => {
                        self.is_backward_pressed = is_pressed
                    }
                    VirtualKeyCode::D | VirtualKeyCode::Right => self.is_right_pressed = is_pressed,
                    _ => return false,
                }
                true
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.dragging = *state == ElementState::Pressed;
                self.anchor = self.cursor;
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some(*position);
                self.dragging
            }
            _ => false,
        }
    }

    pub fn update_camera(&mut self, camera: &mut LookAtCamera) {
        let forward = camera.target - camera.eye;
        let forward_norm = forward.normalize();
        let forward_mag = forward.magnitude();

        // Prevents glitching when camera gets too close to the
        // center of the scene.
        if self.is_forward_pressed && forward_mag > self.speed {
            camera.eye += forward_norm * self.speed;
        }
        if self.is_backward_pressed {
            camera.eye -= forward_norm * self.speed;
        }

        let right = forward_norm.cross(camera.up);

        // Redo radius calc in case the forward/backward is pressed.
        let forward = camera.target - camera.eye;
        let forward_mag = forward.magnitude();

        // Keep the distance to the target fixed so the eye stays on the
        // same sphere around it.
        if self.is_right_pressed {
            camera.eye = camera.target - (forward + right * self.speed).normalize() * forward_mag;
        }
        if self.is_left_pressed {
            camera.eye = camera.target - (forward - right * self.speed).normalize() * forward_mag;
        }

        if let (true, Some(anchor), Some(cursor)) = (self.dragging, self.anchor, self.cursor) {
            if anchor != cursor {
                // Faster mouse movements rotate further.
                let dx = right * self.speed * (anchor.x - cursor.x) as f32;
                let dy = camera.up * self.speed * (anchor.y - cursor.y) as f32;
                camera.eye = camera.target - (forward - dx + dy).normalize() * forward_mag;
                self.anchor = Some(cursor);
            }
        }
    }
}
