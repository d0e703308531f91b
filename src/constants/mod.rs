//! Fixed configuration for the terrain viewer.
//!
//! Asset locations and scene tunables live here so the engine code
//! carries no magic values.

/// Asset file locations relative to the served asset root.
pub mod paths;

/// Camera framing, orbit behaviour and material tint constants.
pub mod render_settings;
