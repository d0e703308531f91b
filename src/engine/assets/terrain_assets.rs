use bevy::prelude::*;

/// Handles for the four assets the viewer loads at startup.
///
/// All handles start out as defaults and are populated by `start_loading`.
/// The three terrain inputs (mesh, albedo, lightmap) load concurrently and
/// are wired together only once all of them have resolved; the environment
/// map is an independent pipeline.
#[derive(Resource)]
pub struct TerrainAssets {
    pub environment_map: Handle<Image>,
    pub terrain_scene: Handle<Scene>,
    pub albedo_texture: Handle<Image>,
    pub lightmap_texture: Handle<Image>,
    pub is_loaded: bool,
}

pub fn create_terrain_assets() -> TerrainAssets {
    TerrainAssets {
        environment_map: Handle::default(),
        terrain_scene: Handle::default(),
        albedo_texture: Handle::default(),
        lightmap_texture: Handle::default(),
        is_loaded: false,
    }
}
