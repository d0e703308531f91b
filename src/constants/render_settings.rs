use bevy::prelude::*;

/// Vertical field of view of the viewer camera, degrees.
pub const CAMERA_FOV_DEGREES: f32 = 75.0;

/// Initial camera position, chosen to frame the terrain on first render.
pub const CAMERA_START_POSITION: Vec3 = Vec3::new(-87.221, 53.468, 121.828);

/// Orbit pivot, offset below the scene origin so the terrain sits centred
/// in the viewport rather than hugging the bottom edge.
pub const ORBIT_TARGET: Vec3 = Vec3::new(0.0, -30.0, 0.0);

/// Exponential smoothing rate for orbit damping, higher is snappier.
pub const ORBIT_DAMPING_RATE: f32 = 12.0;

/// Orbit sensitivity, radians per pixel of pointer drag.
pub const ORBIT_SENSITIVITY: f32 = 0.005;

/// Dolly distance limits for the scroll wheel.
pub const ORBIT_MIN_DISTANCE: f32 = 10.0;
pub const ORBIT_MAX_DISTANCE: f32 = 600.0;

/// Pitch clamp keeping the camera off the poles.
pub const ORBIT_PITCH_LIMIT: f32 = 1.55;

/// Material tint while the albedo layer is active.
pub const ALBEDO_ACTIVE_TINT: Color = Color::WHITE;

/// Neutral gray tint while the albedo layer is off, so the terrain stays
/// visible instead of rendering unlit black.
pub const ALBEDO_INACTIVE_TINT: Color = Color::srgb(0.498, 0.498, 0.498);

/// Radius of the environment sky sphere. Large enough to enclose the
/// terrain and the full orbit range.
pub const SKY_SPHERE_RADIUS: f32 = 2000.0;
