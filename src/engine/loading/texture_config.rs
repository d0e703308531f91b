use bevy::image::ImageSampler;
use bevy::prelude::*;

use crate::engine::assets::terrain_assets::TerrainAssets;
use crate::engine::loading::progress::LoadingProgress;

/// Configure sampling and verify colour spaces once both textures are in.
///
/// Runs before terrain wiring so the textures are never attached to the
/// material in an unconfigured state. The albedo must decode as sRGB and
/// the lightmap as linear data; a mismatch here would change every texel
/// the renderer reads.
pub fn configure_loaded_textures(
    mut progress: ResMut<LoadingProgress>,
    assets: Res<TerrainAssets>,
    mut images: ResMut<Assets<Image>>,
) {
    if progress.textures_configured || !(progress.albedo_loaded && progress.lightmap_loaded) {
        return;
    }

    let Some(albedo) = images.get_mut(&assets.albedo_texture) else {
        return;
    };
    albedo.sampler = ImageSampler::linear();
    if !albedo.texture_descriptor.format.is_srgb() {
        warn!(
            "Albedo texture decoded as {:?}, expected an sRGB format",
            albedo.texture_descriptor.format
        );
    }

    let Some(lightmap) = images.get_mut(&assets.lightmap_texture) else {
        return;
    };
    lightmap.sampler = ImageSampler::linear();
    if lightmap.texture_descriptor.format.is_srgb() {
        warn!(
            "Lightmap texture decoded as {:?}, expected linear data",
            lightmap.texture_descriptor.format
        );
    }

    progress.textures_configured = true;
    println!("✓ Textures configured: albedo sRGB, lightmap linear");
}
