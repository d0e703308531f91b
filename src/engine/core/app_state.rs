use bevy::prelude::*;

use crate::engine::loading::progress::LoadingProgress;
use crate::rpc::web_rpc::WebRpcInterface;

/// Viewer lifecycle.
///
/// `Loading` is the partially-ready default: the scene renders whatever is
/// wired so far and all interaction entry points already work. `Ready`
/// means every asset is wired. `LoadFailed` is terminal; the scene keeps
/// its last successfully wired contents and continues rendering.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum ViewerState {
    #[default]
    Loading,
    Ready,
    LoadFailed,
}

/// Move to `Ready` once terrain wiring completes and tell the frontend,
/// so a host that wants to await full readiness has a signal to listen
/// for.
pub fn transition_to_ready(
    progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<ViewerState>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if progress.terrain_wired {
        println!("→ All assets wired, transitioning to Ready");
        rpc_interface.send_notification("viewer_ready", serde_json::json!({}));
        next_state.set(ViewerState::Ready);
    }
}

/// Forward loading progress to the frontend whenever it changes.
pub fn update_loading_frontend(
    progress: Res<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if !progress.is_changed() {
        return;
    }
    let states: Vec<serde_json::Value> = progress
        .loading_states()
        .into_iter()
        .map(|(name, loaded)| serde_json::json!({ "asset": name, "loaded": loaded }))
        .collect();
    rpc_interface.send_notification("loading_progress", serde_json::json!({ "assets": states }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    fn state_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin));
        app.init_state::<ViewerState>();
        app.init_resource::<LoadingProgress>();
        app.init_resource::<WebRpcInterface>();
        app.add_systems(
            Update,
            transition_to_ready.run_if(in_state(ViewerState::Loading)),
        );
        app
    }

    fn current_state(app: &App) -> ViewerState {
        *app.world().resource::<State<ViewerState>>().get()
    }

    #[test]
    fn viewer_starts_partially_ready_and_updates_without_assets() {
        let mut app = state_app();
        // First frames with nothing loaded must run cleanly.
        app.update();
        app.update();
        assert_eq!(current_state(&app), ViewerState::Loading);
    }

    #[test]
    fn load_failed_is_terminal() {
        let mut app = state_app();
        app.world_mut()
            .resource_mut::<NextState<ViewerState>>()
            .set(ViewerState::LoadFailed);
        app.update();
        assert_eq!(current_state(&app), ViewerState::LoadFailed);

        // Wiring after a failure must not resurrect the lifecycle; the
        // ready transition only runs while loading.
        app.world_mut()
            .resource_mut::<LoadingProgress>()
            .terrain_wired = true;
        app.update();
        app.update();
        assert_eq!(current_state(&app), ViewerState::LoadFailed);
    }

    #[test]
    fn terrain_wiring_completes_the_lifecycle() {
        let mut app = state_app();
        app.update();
        app.world_mut()
            .resource_mut::<LoadingProgress>()
            .terrain_wired = true;

        // One update queues the transition, the next applies it.
        app.update();
        app.update();
        assert_eq!(current_state(&app), ViewerState::Ready);
    }
}
