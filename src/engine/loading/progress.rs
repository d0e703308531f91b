use bevy::prelude::*;

/// Tracks each stage of the startup load so state transitions and the
/// frontend progress display can observe it.
#[derive(Resource, Default)]
pub struct LoadingProgress {
    pub environment_loaded: bool,
    pub environment_failed: bool,
    pub mesh_loaded: bool,
    pub albedo_loaded: bool,
    pub lightmap_loaded: bool,
    pub textures_configured: bool,
    pub terrain_spawned: bool,
    pub terrain_wired: bool,
}

impl LoadingProgress {
    /// All three terrain inputs have resolved. Wiring must not start before
    /// this holds; the loads themselves run concurrently with no ordering.
    pub fn terrain_inputs_ready(&self) -> bool {
        self.mesh_loaded && self.albedo_loaded && self.lightmap_loaded
    }

    /// Per-asset completion flags for the frontend loading display.
    pub fn loading_states(&self) -> Vec<(&'static str, bool)> {
        vec![
            ("Environment map", self.environment_loaded),
            ("Terrain mesh", self.mesh_loaded),
            ("Albedo texture", self.albedo_loaded),
            ("Lightmap texture", self.lightmap_loaded),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terrain_inputs_ready_requires_all_three_loads() {
        let mut progress = LoadingProgress::default();
        assert!(!progress.terrain_inputs_ready());

        progress.mesh_loaded = true;
        progress.albedo_loaded = true;
        assert!(!progress.terrain_inputs_ready());

        progress.lightmap_loaded = true;
        assert!(progress.terrain_inputs_ready());
    }

    #[test]
    fn environment_does_not_gate_terrain_inputs() {
        let progress = LoadingProgress {
            mesh_loaded: true,
            albedo_loaded: true,
            lightmap_loaded: true,
            environment_loaded: false,
            ..default()
        };
        assert!(progress.terrain_inputs_ready());
    }
}
