use bevy::asset::{LoadState, UntypedAssetId};
use bevy::gltf::GltfAssetLabel;
use bevy::image::ImageLoaderSettings;
use bevy::prelude::*;

use crate::constants::paths;
use crate::engine::assets::terrain_assets::TerrainAssets;
use crate::engine::core::app_state::ViewerState;
use crate::engine::loading::progress::LoadingProgress;
use crate::rpc::web_rpc::WebRpcInterface;

/// Issue all four asset loads. Runs once at startup and returns
/// immediately; the scene renders while the loads are in flight.
pub fn start_loading(mut assets: ResMut<TerrainAssets>, asset_server: Res<AssetServer>) {
    assets.environment_map = asset_server.load(paths::ENVIRONMENT_MAP_PATH);

    assets.terrain_scene =
        asset_server.load(GltfAssetLabel::Scene(0).from_asset(paths::TERRAIN_MESH_PATH));

    // Colour-space tagging happens at load issue time, before the texture
    // can ever reach the material: albedo is perceptual, lightmap is linear.
    assets.albedo_texture = asset_server.load_with_settings(
        paths::ALBEDO_TEXTURE_PATH,
        |settings: &mut ImageLoaderSettings| settings.is_srgb = true,
    );
    assets.lightmap_texture = asset_server.load_with_settings(
        paths::LIGHTMAP_TEXTURE_PATH,
        |settings: &mut ImageLoaderSettings| settings.is_srgb = false,
    );

    println!("→ Asset loads issued: environment, terrain mesh, albedo, lightmap");
}

/// Poll the three terrain inputs each frame while loading.
///
/// A failed load is fatal for the terrain pipeline: the viewer moves to
/// `LoadFailed` and the material slots stay empty. Whatever was already
/// wired (typically the environment) keeps rendering.
pub fn check_asset_loading(
    mut progress: ResMut<LoadingProgress>,
    assets: Res<TerrainAssets>,
    asset_server: Res<AssetServer>,
    mut next_state: ResMut<NextState<ViewerState>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let watched: [(&'static str, UntypedAssetId); 3] = [
        ("terrain mesh", assets.terrain_scene.id().untyped()),
        ("albedo texture", assets.albedo_texture.id().untyped()),
        ("lightmap texture", assets.lightmap_texture.id().untyped()),
    ];

    for (name, id) in watched {
        if let Some(LoadState::Failed(load_error)) = asset_server.get_load_state(id) {
            error!("✗ Failed to load {name}: {load_error}");
            rpc_interface.send_notification(
                "load_error",
                serde_json::json!({ "asset": name, "message": load_error.to_string() }),
            );
            next_state.set(ViewerState::LoadFailed);
            return;
        }
    }

    if !progress.mesh_loaded && asset_server.is_loaded_with_dependencies(&assets.terrain_scene) {
        progress.mesh_loaded = true;
        println!("✓ Terrain mesh loaded");
    }
    if !progress.albedo_loaded
        && matches!(
            asset_server.get_load_state(&assets.albedo_texture),
            Some(LoadState::Loaded)
        )
    {
        progress.albedo_loaded = true;
        println!("✓ Albedo texture loaded");
    }
    if !progress.lightmap_loaded
        && matches!(
            asset_server.get_load_state(&assets.lightmap_texture),
            Some(LoadState::Loaded)
        )
    {
        progress.lightmap_loaded = true;
        println!("✓ Lightmap texture loaded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::terrain_assets::create_terrain_assets;
    use bevy::asset::AssetPlugin;
    use bevy::state::app::StatesPlugin;
    use std::thread;
    use std::time::Duration;

    fn current_state(app: &App) -> ViewerState {
        *app.world().resource::<State<ViewerState>>().get()
    }

    #[test]
    fn failed_terrain_load_is_fatal_and_reported() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default(), StatesPlugin));
        app.init_asset::<Image>();
        app.init_asset::<Scene>();
        app.init_state::<ViewerState>();
        app.init_resource::<LoadingProgress>();
        app.init_resource::<WebRpcInterface>();
        app.insert_resource(create_terrain_assets());
        app.add_systems(Startup, start_loading);
        app.add_systems(
            Update,
            check_asset_loading.run_if(in_state(ViewerState::Loading)),
        );

        // No image or glTF loaders are registered, so every issued load
        // fails as soon as the asset server resolves it. The resolution is
        // asynchronous, hence the pumping loop.
        for _ in 0..200 {
            app.update();
            if current_state(&app) == ViewerState::LoadFailed {
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(current_state(&app), ViewerState::LoadFailed);

        // The failure left the pipeline short of wiring, so the material
        // slots were never filled.
        let progress = app.world().resource::<LoadingProgress>();
        assert!(!progress.terrain_wired);

        let interface = app.world().resource::<WebRpcInterface>();
        assert!(
            interface
                .pending_notifications()
                .any(|notification| notification.method == "load_error")
        );
    }
}
