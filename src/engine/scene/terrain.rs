use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;

use crate::engine::assets::terrain_assets::TerrainAssets;
use crate::engine::core::app_state::ViewerState;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::material::MaterialState;
use crate::rpc::web_rpc::WebRpcInterface;

/// Root entity of the spawned terrain scene.
#[derive(Component)]
pub struct TerrainRoot;

/// Spawn the terrain once all three inputs have resolved and the textures
/// are configured. The baked geometry faces the wrong way relative to the
/// environment, hence the fixed 90 degree yaw.
pub fn spawn_terrain_when_ready(
    mut progress: ResMut<LoadingProgress>,
    assets: Res<TerrainAssets>,
    mut commands: Commands,
) {
    if progress.terrain_spawned
        || !progress.textures_configured
        || !progress.terrain_inputs_ready()
    {
        return;
    }

    commands
        .spawn((
            SceneRoot(assets.terrain_scene.clone()),
            Transform::from_rotation(Quat::from_rotation_y(FRAC_PI_2)),
            TerrainRoot,
        ))
        .observe(wire_terrain_scene);

    progress.terrain_spawned = true;
    println!("→ Terrain scene spawned, waiting for instance readiness");
}

/// Rebind every sub-mesh of the instanced terrain to the one shared
/// material.
///
/// A terrain that resolves without a single mesh is an integrity failure
/// and is treated exactly like a failed load.
fn wire_terrain_scene(
    trigger: Trigger<SceneInstanceReady>,
    mut commands: Commands,
    children: Query<&Children>,
    mesh_entities: Query<Entity, With<Mesh3d>>,
    material_state: Res<MaterialState>,
    mut assets: ResMut<TerrainAssets>,
    mut progress: ResMut<LoadingProgress>,
    mut next_state: ResMut<NextState<ViewerState>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let mut bound = 0usize;
    for descendant in children.iter_descendants(trigger.target()) {
        if mesh_entities.get(descendant).is_err() {
            continue;
        }
        commands
            .entity(descendant)
            .insert(MeshMaterial3d(material_state.handle.clone()));
        bound += 1;
    }

    if bound == 0 {
        error!("✗ Terrain scene resolved but contains no meshes");
        rpc_interface.send_notification(
            "load_error",
            serde_json::json!({
                "asset": "terrain mesh",
                "message": "terrain scene contains no meshes"
            }),
        );
        next_state.set(ViewerState::LoadFailed);
        return;
    }

    assets.is_loaded = true;
    progress.terrain_wired = true;
    println!("✓ Terrain wired: {bound} sub-meshes bound to the shared material");
}
