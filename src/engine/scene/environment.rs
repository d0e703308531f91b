use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;

use crate::constants::render_settings::SKY_SPHERE_RADIUS;
use crate::engine::assets::terrain_assets::TerrainAssets;
use crate::engine::loading::progress::LoadingProgress;
use crate::rpc::web_rpc::WebRpcInterface;

/// Marks the environment backdrop entity.
#[derive(Component)]
pub struct EnvironmentSphere;

/// Wire the environment map as the scene backdrop once it resolves.
///
/// The equirectangular image is mapped onto an inward-facing UV sphere
/// enclosing the scene. This pipeline is independent of the terrain load
/// and never fatal: a failed environment is logged and reported while the
/// rest of the scene keeps rendering.
pub fn wire_environment(
    mut progress: ResMut<LoadingProgress>,
    assets: Res<TerrainAssets>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if progress.environment_loaded || progress.environment_failed {
        return;
    }

    match asset_server.get_load_state(&assets.environment_map) {
        Some(LoadState::Loaded) => {
            spawn_sky_sphere(
                &mut commands,
                &mut meshes,
                &mut materials,
                assets.environment_map.clone(),
            );
            progress.environment_loaded = true;
            println!("✓ Environment map wired as scene backdrop");
        }
        Some(LoadState::Failed(load_error)) => {
            error!("✗ Failed to load environment map: {load_error}");
            rpc_interface.send_notification(
                "load_error",
                serde_json::json!({
                    "asset": "environment map",
                    "message": load_error.to_string()
                }),
            );
            progress.environment_failed = true;
        }
        _ => {}
    }
}

fn spawn_sky_sphere(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    environment_map: Handle<Image>,
) {
    let sphere = meshes.add(Sphere::new(SKY_SPHERE_RADIUS).mesh().uv(64, 32));
    let material = materials.add(StandardMaterial {
        base_color_texture: Some(environment_map),
        unlit: true,
        // Rendered from the inside.
        cull_mode: None,
        ..default()
    });

    commands.spawn((
        Mesh3d(sphere),
        MeshMaterial3d(material),
        Transform::default(),
        EnvironmentSphere,
        NoFrustumCulling,
    ));
}
