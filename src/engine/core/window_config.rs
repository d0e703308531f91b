use bevy::prelude::*;
use bevy::window::PresentMode;

/// Window configuration per platform.
///
/// On the web the viewer attaches to an existing canvas whose CSS size is
/// owned by the host page; the canvas is never auto-fitted or styled from
/// here, the host drives sizing through the `viewport_resize` RPC method.
pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            canvas: Some("#terrain-viewer".into()),
            fit_canvas_to_parent: false,
            prevent_default_event_handling: false,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "terrain viewer".into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}
