//! Viewer camera.

/// Damped orbit camera resource and its pointer-driven controller.
pub mod orbit_camera;
