//! JSON-RPC 2.0 communication layer for the hosting page.
//!
//! Implements bidirectional messaging between the viewer and the host UI
//! via `window.postMessage`, supporting request-response and notification
//! patterns.
//!
//! Methods in: `toggle_albedo`, `toggle_lightmap`, `viewport_resize`,
//! `get_viewer_state`, `get_fps`.
//! Notifications out: `loading_progress`, `viewer_ready`, `load_error`,
//! `fps_update`, `debug_message`.

/// JSON-RPC envelope types, message listener and method dispatch.
pub mod web_rpc;
