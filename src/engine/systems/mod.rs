//! Runtime systems outside the loading pipeline.

/// Frame rate overlay and frontend FPS notifications.
pub mod fps_tracking;

/// Host-driven viewport resizing and aspect ratio updates.
pub mod viewport;
