//! Scene composition: environment backdrop and terrain wiring.

/// Sky sphere creation once the equirectangular environment map resolves.
pub mod environment;

/// Terrain scene spawning and rebinding of sub-meshes to the shared
/// material.
pub mod terrain;
