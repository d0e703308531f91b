/// Equirectangular HDR environment map, used as the scene backdrop.
pub const ENVIRONMENT_MAP_PATH: &str = "cape_hill_2k_env.hdr";

/// Baked terrain geometry. Every sub-mesh is rebound to the shared material.
pub const TERRAIN_MESH_PATH: &str = "meshes/terrain.glb";

/// Base colour texture for the terrain, gamma-encoded.
pub const ALBEDO_TEXTURE_PATH: &str = "textures/albedo.png";

/// Baked illumination texture, linear HDR.
pub const LIGHTMAP_TEXTURE_PATH: &str = "textures/lightmap.hdr";
