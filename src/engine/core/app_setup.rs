use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;

use crate::constants::render_settings::{
    CAMERA_FOV_DEGREES, CAMERA_START_POSITION, ORBIT_TARGET,
};
use crate::engine::assets::terrain_assets::create_terrain_assets;
use crate::engine::camera::orbit_camera::{OrbitCamera, orbit_camera_controller};
use crate::engine::core::app_state::{ViewerState, transition_to_ready, update_loading_frontend};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::asset_loader::{check_asset_loading, start_loading};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::texture_config::configure_loaded_textures;
use crate::engine::material::{
    LayerToggle, MaterialState, TerrainMaterial, apply_layer_toggles, create_shared_material,
    sync_terrain_material,
};
use crate::engine::scene::environment::wire_environment;
use crate::engine::scene::terrain::spawn_terrain_when_ready;
use crate::engine::systems::fps_tracking::fps_notification_system;
use crate::engine::systems::viewport::{ViewportResizeEvent, apply_viewport_resize};
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::material::layer_toggle_keyboard;
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::{FpsText, fps_text_update_system};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(MaterialPlugin::<TerrainMaterial>::default())
        .add_plugins(WebRpcPlugin)
        .init_state::<ViewerState>()
        .init_resource::<LoadingProgress>()
        .insert_resource(create_terrain_assets())
        .insert_resource(OrbitCamera::framing(CAMERA_START_POSITION, ORBIT_TARGET))
        .add_event::<LayerToggle>()
        .add_event::<ViewportResizeEvent>();

    // Startup builds the renderable scene synchronously and fires the
    // asset loads without awaiting them; the first frame renders an empty
    // scene while the loads are in flight.
    app.add_systems(Startup, (setup, start_loading).chain());

    // Loading pipeline. Ordered so every stage observes the previous one
    // within a single frame once its inputs are ready.
    app.add_systems(
        Update,
        (
            check_asset_loading,
            configure_loaded_textures,
            spawn_terrain_when_ready,
            transition_to_ready,
            update_loading_frontend,
        )
            .chain()
            .run_if(in_state(ViewerState::Loading)),
    );

    // Interaction and scene upkeep run in every state: orbiting, toggling
    // and resizing are valid against a partial scene, and the environment
    // pipeline is independent of terrain loading.
    app.add_systems(
        Update,
        (
            wire_environment,
            (apply_layer_toggles, sync_terrain_material).chain(),
            orbit_camera_controller,
            apply_viewport_resize,
        ),
    );

    app.add_systems(
        Update,
        fps_notification_system.run_if(in_state(ViewerState::Ready)),
    );

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, (layer_toggle_keyboard, fps_text_update_system));
    }

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}

/// Synchronous scene construction: camera, orbit pivot and the shared
/// material. Everything else arrives asynchronously.
fn setup(mut commands: Commands, mut materials: ResMut<Assets<TerrainMaterial>>) {
    spawn_viewer_camera(&mut commands);

    let material = create_shared_material(&mut materials);
    commands.insert_resource(MaterialState::new(material));

    #[cfg(not(target_arch = "wasm32"))]
    create_native_overlays(&mut commands);
}

fn spawn_viewer_camera(commands: &mut Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            ..default()
        }),
        Transform::from_translation(CAMERA_START_POSITION).looking_at(ORBIT_TARGET, Vec3::Y),
    ));
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
        });
}
