use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use crate::constants::render_settings::{
    ORBIT_DAMPING_RATE, ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE, ORBIT_PITCH_LIMIT,
    ORBIT_SENSITIVITY,
};

/// Orbit state around a fixed pivot.
///
/// Pointer input moves the goal angles; the camera transform chases them
/// with exponential damping, so motion keeps easing after the pointer
/// stops. The damping is self-paced from frame time, no external clock is
/// consulted.
#[derive(Resource)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub current_yaw: f32,
    pub current_pitch: f32,
    pub current_distance: f32,
}

impl OrbitCamera {
    /// Build an orbit whose damped state already matches the given camera
    /// position, so the first frame renders without a jump.
    pub fn framing(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let distance = offset.length().max(f32::EPSILON);
        let yaw = offset.x.atan2(offset.z);
        let pitch = (offset.y / distance).asin();
        Self {
            target,
            yaw,
            pitch,
            distance,
            current_yaw: yaw,
            current_pitch: pitch,
            current_distance: distance,
        }
    }

    /// Camera position for a yaw/pitch/distance triple around the target.
    pub fn eye_position(&self, yaw: f32, pitch: f32, distance: f32) -> Vec3 {
        let offset = Vec3::new(
            distance * pitch.cos() * yaw.sin(),
            distance * pitch.sin(),
            distance * pitch.cos() * yaw.cos(),
        );
        self.target + offset
    }
}

/// Advance the orbit from pointer input and write the camera transform.
///
/// Runs every frame regardless of loading state; orbiting an empty or
/// partially populated scene is valid.
pub fn orbit_camera_controller(
    mut orbit: ResMut<OrbitCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    time: Res<Time>,
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
) {
    // Always drain the readers, input arrives whether or not it applies.
    let drag: Vec2 = mouse_motion.read().map(|motion| motion.delta).sum();
    let mut scroll = 0.0;
    for event in scroll_events.read() {
        scroll += match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y * 0.05,
        };
    }

    if mouse_button.pressed(MouseButton::Left) && drag != Vec2::ZERO {
        orbit.yaw -= drag.x * ORBIT_SENSITIVITY;
        orbit.pitch = (orbit.pitch + drag.y * ORBIT_SENSITIVITY)
            .clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
    }

    if scroll.abs() > f32::EPSILON {
        let dolly = orbit.distance * 0.2;
        orbit.distance =
            (orbit.distance - scroll * dolly).clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }

    let smoothing = (ORBIT_DAMPING_RATE * time.delta_secs()).min(1.0);
    orbit.current_yaw += (orbit.yaw - orbit.current_yaw) * smoothing;
    orbit.current_pitch += (orbit.pitch - orbit.current_pitch) * smoothing;
    orbit.current_distance += (orbit.distance - orbit.current_distance) * smoothing;

    if let Ok(mut camera_transform) = camera_query.single_mut() {
        camera_transform.translation =
            orbit.eye_position(orbit.current_yaw, orbit.current_pitch, orbit.current_distance);
        camera_transform.look_at(orbit.target, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::render_settings::{CAMERA_START_POSITION, ORBIT_TARGET};

    #[test]
    fn framing_reconstructs_the_start_position() {
        let orbit = OrbitCamera::framing(CAMERA_START_POSITION, ORBIT_TARGET);
        let eye = orbit.eye_position(orbit.current_yaw, orbit.current_pitch, orbit.current_distance);
        assert!(
            eye.distance(CAMERA_START_POSITION) < 1e-2,
            "reconstructed {eye:?}, expected {CAMERA_START_POSITION:?}"
        );
    }

    #[test]
    fn eye_position_keeps_the_orbit_distance() {
        let orbit = OrbitCamera::framing(CAMERA_START_POSITION, ORBIT_TARGET);
        for yaw in [0.0, 1.0, -2.5] {
            for pitch in [0.0, 0.7, -0.7] {
                let eye = orbit.eye_position(yaw, pitch, 100.0);
                assert!((eye.distance(ORBIT_TARGET) - 100.0).abs() < 1e-3);
            }
        }
    }
}
