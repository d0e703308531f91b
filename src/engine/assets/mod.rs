//! Asset handles for the terrain scene.
//!
//! Groups the four externally loaded assets: environment map, terrain
//! mesh, albedo texture and lightmap texture.

/// Handle bundle for every asset the viewer loads at startup.
pub mod terrain_assets;
