//! Asset loading and orchestration for the terrain scene.
//!
//! Issues the four asset loads concurrently at startup and tracks their
//! progress through texture configuration to final terrain wiring.

/// Startup load requests and per-frame load state polling.
///
/// Detects failed loads and escalates them to the fatal `LoadFailed` state.
pub mod asset_loader;

/// Loading progress tracking resource for state transitions.
pub mod progress;

/// Sampler and colour-space configuration for the loaded textures.
///
/// Runs after both textures resolve and before they are attached anywhere.
pub mod texture_config;
