//! Shared terrain material state and layer toggle handling.
//!
//! The whole terrain renders with one material. Toggle commands flip the
//! albedo and lightmap layers; a sync system mirrors the flags into the
//! material asset. Mutating the asset re-uploads it, so a toggle is
//! visible on the next rendered frame.

use bevy::pbr::{ExtendedMaterial, MaterialExtension};
use bevy::prelude::*;
use bevy::reflect::TypePath;
use bevy::render::render_resource::{AsBindGroup, ShaderRef};

use crate::constants::render_settings::{ALBEDO_ACTIVE_TINT, ALBEDO_INACTIVE_TINT};
use crate::engine::assets::terrain_assets::TerrainAssets;
use crate::engine::loading::progress::LoadingProgress;

/// The two texture layers a user can toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureLayer {
    Albedo,
    Lightmap,
}

/// Typed toggle command, decoupled from whatever UI produced it.
#[derive(Event, Debug, Clone, Copy)]
pub struct LayerToggle {
    pub layer: TextureLayer,
    pub active: bool,
}

/// Lightmap bindings extending the shared terrain material.
///
/// The unlit base never runs the lighting pass that reads per-mesh
/// lightmaps, so the baked illumination is bound here and the extension
/// fragment multiplies it into the resolved base colour.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct TerrainLayers {
    #[uniform(100)]
    pub lightmap_active: u32,

    #[texture(101)]
    #[sampler(102)]
    pub lightmap_texture: Option<Handle<Image>>,
}

impl MaterialExtension for TerrainLayers {
    fn fragment_shader() -> ShaderRef {
        "./shaders/terrain_layers.wgsl".into()
    }
}

/// The one material every terrain sub-mesh is bound to.
pub type TerrainMaterial = ExtendedMaterial<StandardMaterial, TerrainLayers>;

/// Desired state of the shared terrain material.
///
/// Both layers start disabled: the terrain comes up neutral gray and the
/// host enables layers through toggle commands. The flags are remembered
/// even while the assets are still loading, so a toggle that arrives early
/// takes effect once wiring completes.
#[derive(Resource)]
pub struct MaterialState {
    pub handle: Handle<TerrainMaterial>,
    pub albedo_enabled: bool,
    pub lightmap_enabled: bool,
}

impl MaterialState {
    pub fn new(handle: Handle<TerrainMaterial>) -> Self {
        Self {
            handle,
            albedo_enabled: false,
            lightmap_enabled: false,
        }
    }
}

/// Tint applied alongside the albedo layer: white while the texture is
/// shown, neutral gray otherwise so the terrain never renders black.
pub fn albedo_tint(active: bool) -> Color {
    if active {
        ALBEDO_ACTIVE_TINT
    } else {
        ALBEDO_INACTIVE_TINT
    }
}

/// Create the single material every terrain sub-mesh is bound to.
///
/// Unlit base: illumination comes baked from the lightmap binding, not
/// from scene lights.
pub fn create_shared_material(materials: &mut Assets<TerrainMaterial>) -> Handle<TerrainMaterial> {
    materials.add(TerrainMaterial {
        base: StandardMaterial {
            base_color: albedo_tint(false),
            base_color_texture: None,
            unlit: true,
            ..default()
        },
        extension: TerrainLayers {
            lightmap_active: 0,
            lightmap_texture: None,
        },
    })
}

/// Fold toggle commands into the material flags. The most recent command
/// per layer wins.
pub fn apply_layer_toggles(
    mut toggle_events: EventReader<LayerToggle>,
    mut material_state: ResMut<MaterialState>,
) {
    if toggle_events.is_empty() {
        return;
    }
    for toggle in toggle_events.read() {
        match toggle.layer {
            TextureLayer::Albedo => material_state.albedo_enabled = toggle.active,
            TextureLayer::Lightmap => material_state.lightmap_enabled = toggle.active,
        }
    }
}

/// Mirror the material flags into the renderable state.
///
/// Texture slots fill only after terrain wiring has completed; before that
/// a toggle changes the flags (and the tint) but leaves the slots empty.
/// Runs on flag changes and on loading progress changes, so flags queued
/// during loading are applied the moment wiring finishes.
pub fn sync_terrain_material(
    material_state: Res<MaterialState>,
    progress: Res<LoadingProgress>,
    assets: Res<TerrainAssets>,
    mut materials: ResMut<Assets<TerrainMaterial>>,
) {
    if !material_state.is_changed() && !progress.is_changed() {
        return;
    }

    let wired = progress.terrain_wired;
    let Some(material) = materials.get_mut(&material_state.handle) else {
        return;
    };

    material.base.base_color = albedo_tint(material_state.albedo_enabled);
    material.base.base_color_texture = if material_state.albedo_enabled && wired {
        Some(assets.albedo_texture.clone())
    } else {
        None
    };

    let lightmap_active = material_state.lightmap_enabled && wired;
    material.extension.lightmap_active = lightmap_active as u32;
    material.extension.lightmap_texture = if lightmap_active {
        Some(assets.lightmap_texture.clone())
    } else {
        None
    };
}

/// Native fallback for the web toggle controls.
#[cfg(not(target_arch = "wasm32"))]
pub fn layer_toggle_keyboard(
    keyboard: Res<ButtonInput<KeyCode>>,
    material_state: Res<MaterialState>,
    mut toggle_events: EventWriter<LayerToggle>,
) {
    if keyboard.just_pressed(KeyCode::KeyZ) {
        let active = !material_state.albedo_enabled;
        toggle_events.write(LayerToggle {
            layer: TextureLayer::Albedo,
            active,
        });
        println!("Albedo layer: {}", if active { "on" } else { "off" });
    }
    if keyboard.just_pressed(KeyCode::KeyX) {
        let active = !material_state.lightmap_enabled;
        toggle_events.write(LayerToggle {
            layer: TextureLayer::Lightmap,
            active,
        });
        println!("Lightmap layer: {}", if active { "on" } else { "off" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::terrain_assets::create_terrain_assets;
    use bevy::asset::AssetPlugin;

    fn material_app() -> (App, Handle<TerrainMaterial>) {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()));
        app.init_asset::<Image>();
        app.init_asset::<TerrainMaterial>();
        app.init_resource::<LoadingProgress>();
        app.insert_resource(create_terrain_assets());
        app.add_event::<LayerToggle>();
        app.add_systems(Update, (apply_layer_toggles, sync_terrain_material).chain());

        let handle = {
            let mut materials = app.world_mut().resource_mut::<Assets<TerrainMaterial>>();
            create_shared_material(&mut materials)
        };
        app.insert_resource(MaterialState::new(handle.clone()));
        (app, handle)
    }

    fn toggle(app: &mut App, layer: TextureLayer, active: bool) {
        app.world_mut().send_event(LayerToggle { layer, active });
        app.update();
    }

    fn material<'a>(app: &'a App, handle: &Handle<TerrainMaterial>) -> &'a TerrainMaterial {
        app.world()
            .resource::<Assets<TerrainMaterial>>()
            .get(handle)
            .unwrap()
    }

    fn mark_wired(app: &mut App) {
        app.world_mut()
            .resource_mut::<LoadingProgress>()
            .terrain_wired = true;
    }

    #[test]
    fn tint_is_gray_until_albedo_is_enabled() {
        assert_eq!(albedo_tint(false), ALBEDO_INACTIVE_TINT);
        assert_eq!(albedo_tint(true), ALBEDO_ACTIVE_TINT);

        let (mut app, handle) = material_app();
        app.update();
        assert_eq!(material(&app, &handle).base.base_color, ALBEDO_INACTIVE_TINT);
    }

    #[test]
    fn tint_follows_the_most_recent_albedo_toggle() {
        let (mut app, handle) = material_app();
        for sequence in [
            vec![true],
            vec![true, false],
            vec![false, true, true],
            vec![true, false, true, false],
        ] {
            for &active in &sequence {
                toggle(&mut app, TextureLayer::Albedo, active);
            }
            let expected = albedo_tint(*sequence.last().unwrap());
            assert_eq!(material(&app, &handle).base.base_color, expected);
        }
    }

    #[test]
    fn toggling_before_wiring_leaves_slots_empty() {
        let (mut app, handle) = material_app();
        toggle(&mut app, TextureLayer::Albedo, true);
        toggle(&mut app, TextureLayer::Lightmap, true);

        let mat = material(&app, &handle);
        assert!(mat.base.base_color_texture.is_none());
        assert_eq!(mat.extension.lightmap_active, 0);
        assert!(mat.extension.lightmap_texture.is_none());
        // Tint still reflects the request.
        assert_eq!(mat.base.base_color, ALBEDO_ACTIVE_TINT);
    }

    #[test]
    fn wiring_applies_flags_queued_during_loading() {
        let (mut app, handle) = material_app();
        toggle(&mut app, TextureLayer::Albedo, true);
        toggle(&mut app, TextureLayer::Lightmap, true);
        assert!(material(&app, &handle).base.base_color_texture.is_none());

        mark_wired(&mut app);
        app.update();
        let mat = material(&app, &handle);
        assert!(mat.base.base_color_texture.is_some());
        assert_eq!(mat.extension.lightmap_active, 1);
        assert!(mat.extension.lightmap_texture.is_some());
    }

    #[test]
    fn lightmap_binding_round_trips_after_wiring() {
        let (mut app, handle) = material_app();
        mark_wired(&mut app);
        app.update();
        assert_eq!(material(&app, &handle).extension.lightmap_active, 0);

        toggle(&mut app, TextureLayer::Lightmap, true);
        let mat = material(&app, &handle);
        assert_eq!(mat.extension.lightmap_active, 1);
        assert!(mat.extension.lightmap_texture.is_some());

        toggle(&mut app, TextureLayer::Lightmap, false);
        let mat = material(&app, &handle);
        assert_eq!(mat.extension.lightmap_active, 0);
        assert!(mat.extension.lightmap_texture.is_none());
    }

    #[test]
    fn albedo_slot_empties_when_disabled_after_wiring() {
        let (mut app, handle) = material_app();
        mark_wired(&mut app);
        toggle(&mut app, TextureLayer::Albedo, true);
        assert!(material(&app, &handle).base.base_color_texture.is_some());

        toggle(&mut app, TextureLayer::Albedo, false);
        let mat = material(&app, &handle);
        assert!(mat.base.base_color_texture.is_none());
        assert_eq!(mat.base.base_color, ALBEDO_INACTIVE_TINT);
    }
}
