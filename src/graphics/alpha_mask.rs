use bevy::image::ImageSampler;
use bevy::prelude::*;
use bevy::render::{
    render_asset::RenderAssetUsages,
    render_resource::{Extent3d, TextureDimension, TextureFormat},
};
use rayon::prelude::*;

pub const ALPHA_MASK_DIMENSION: u32 = 64;

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let s = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    s * s * (3.0 - 2.0 * s)
}

/// Coverage of texel `(x, y)`: opaque core, soft falloff, clear past the inscribed circle.
fn mask_value(x: u32, y: u32, dimension: u32) -> u8 {
    let half = dimension as f32 * 0.5;
    let p = Vec2::new(x as f32 + 0.5 - half, y as f32 + 0.5 - half) / half;
    let coverage = 1.0 - smoothstep(0.2, 1.0, p.length());
    (coverage * 255.0).round() as u8
}

/// Round sprite mask sampled by the point shader; every channel holds the coverage.
pub fn alpha_mask_image(dimension: u32) -> Image {
    let chunk_size: usize = 4;
    let mut texture_data = vec![0u8; (dimension * dimension) as usize * chunk_size];

    texture_data
        .par_chunks_exact_mut(chunk_size)
        .enumerate()
        .for_each(|(i, chunk)| {
            let x = i as u32 % dimension;
            let y = i as u32 / dimension;
            chunk.fill(mask_value(x, y, dimension));
        });

    let mut image = Image::new(
        Extent3d {
            width: dimension,
            height: dimension,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        texture_data,
        TextureFormat::Rgba8Unorm,
        RenderAssetUsages::RENDER_WORLD,
    );
    image.sampler = ImageSampler::linear();
    image
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_opaque_and_corners_clear() {
        let d = ALPHA_MASK_DIMENSION;
        assert_eq!(mask_value(d / 2, d / 2, d), 255);
        assert_eq!(mask_value(0, 0, d), 0);
        assert_eq!(mask_value(d - 1, d - 1, d), 0);
        assert_eq!(mask_value(0, d / 2, d), 0);
    }

    #[test]
    fn falloff_is_monotonic_along_a_radius() {
        let d = ALPHA_MASK_DIMENSION;
        let row: Vec<u8> = (d / 2..d).map(|x| mask_value(x, d / 2, d)).collect();
        assert!(row.windows(2).all(|w| w[0] >= w[1]));
    }
}
