//! Core application setup and lifecycle.
//!
//! Handles app construction, window configuration and the viewer state
//! machine for both native and WASM targets.

/// App construction: plugins, resources and system scheduling.
pub mod app_setup;

/// Viewer lifecycle state machine and its transitions.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
pub mod window_config;
