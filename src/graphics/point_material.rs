use crate::galaxy::{CloudRole, RenderSettings};
use bevy::{
    pbr::{MaterialPipeline, MaterialPipelineKey},
    prelude::*,
    reflect::TypePath,
    render::{
        mesh::{Indices, MeshVertexBufferLayoutRef},
        render_asset::RenderAssetUsages,
        render_resource::{
            AsBindGroup, PrimitiveTopology, RenderPipelineDescriptor, ShaderRef, ShaderType,
            SpecializedMeshPipelineError,
        },
    },
};
use point_cloud::{PointCloud, Rgb};

use super::alpha_mask::{alpha_mask_image, ALPHA_MASK_DIMENSION};

const SHADER_ASSET_PATH: &str = "shaders/point_cloud.wgsl";

/// Quad corners in uv space, expanded around the point center in the vertex shader.
const CORNERS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
const CORNER_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

pub struct PointMaterialPlugin;

impl Plugin for PointMaterialPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<PointMaterial>::default())
            .add_systems(Startup, init_resource)
            .add_systems(Update, update_material);
    }
}

/// Shared materials, one per cloud role.
#[derive(Resource, Default)]
pub struct PointMaterials {
    galaxy: Handle<PointMaterial>,
    starfield: Handle<PointMaterial>,
}

impl PointMaterials {
    pub fn handle(&self, role: CloudRole) -> Handle<PointMaterial> {
        match role {
            CloudRole::Galaxy => self.galaxy.clone(),
            CloudRole::Starfield => self.starfield.clone(),
        }
    }
}

// Duplicated in point_cloud.wgsl, keep both in sync
#[derive(ShaderType, Clone, Copy, Debug)]
pub struct PointParams {
    tint: Vec4,
    size: f32,
}

impl PointParams {
    fn read(role: CloudRole, settings: &RenderSettings) -> Self {
        let tint = match role {
            CloudRole::Galaxy => Rgb::WHITE,
            CloudRole::Starfield => settings.star_color,
        };
        Self {
            tint: linear(tint).to_vec4(),
            size: settings.size,
        }
    }
}

#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct PointMaterial {
    #[uniform(0)]
    params: PointParams,
    #[texture(1)]
    #[sampler(2)]
    alpha_mask: Handle<Image>,
    alpha_mode: AlphaMode,
}

impl Material for PointMaterial {
    fn vertex_shader() -> ShaderRef {
        SHADER_ASSET_PATH.into()
    }

    fn fragment_shader() -> ShaderRef {
        SHADER_ASSET_PATH.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        self.alpha_mode
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        let vertex_layout = layout.0.get_layout(&[
            Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
            Mesh::ATTRIBUTE_UV_0.at_shader_location(1),
            Mesh::ATTRIBUTE_COLOR.at_shader_location(2),
        ])?;
        descriptor.vertex.buffers = vec![vertex_layout];
        if let Some(depth_stencil) = descriptor.depth_stencil.as_mut() {
            depth_stencil.depth_write_enabled = false;
        }
        Ok(())
    }
}

fn linear(color: Rgb) -> LinearRgba {
    channels_linear(color.to_array())
}

fn channels_linear([r, g, b]: [f32; 3]) -> LinearRgba {
    Color::srgb(r, g, b).to_linear()
}

/// Number of quad vertices for `points` points, if a u32 index buffer can address them.
fn quad_vertex_count(points: usize) -> Option<u32> {
    points
        .checked_mul(CORNERS.len())
        .and_then(|n| u32::try_from(n).ok())
}

/// Expands every point into a camera-facing quad: 4 vertices sharing the point's
/// position and color, told apart by uv. Clouds without colors are white and take
/// their color from the material tint.
///
/// Returns `None` when the cloud has more vertices than u32 indices reach.
pub fn point_cloud_mesh(cloud: &PointCloud) -> Option<Mesh> {
    let vertex_count = quad_vertex_count(cloud.len())? as usize;
    let mut positions = Vec::with_capacity(vertex_count);
    let mut uvs = Vec::with_capacity(vertex_count);
    let mut colors = Vec::with_capacity(vertex_count);
    let mut indices = Vec::with_capacity(cloud.len() * CORNER_INDICES.len());

    let channels = cloud.color_channels();
    for (i, position) in cloud.positions().iter().enumerate() {
        let rgb = channels.map_or(Rgb::WHITE.to_array(), |c| c[i]);
        let color = channels_linear(rgb).to_f32_array();
        // in range, checked by quad_vertex_count
        let base = (i * CORNERS.len()) as u32;
        for corner in CORNERS {
            positions.push(*position);
            uvs.push(corner);
            colors.push(color);
        }
        indices.extend(CORNER_INDICES.iter().map(|c| base + c));
    }

    let mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
    .with_inserted_indices(Indices::U32(indices));
    Some(mesh)
}

fn init_resource(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    mut materials: ResMut<Assets<PointMaterial>>,
    render_settings: Res<RenderSettings>,
) {
    let alpha_mask = images.add(alpha_mask_image(ALPHA_MASK_DIMENSION));
    let mut material = |role| {
        materials.add(PointMaterial {
            params: PointParams::read(role, &render_settings),
            alpha_mask: alpha_mask.clone(),
            alpha_mode: AlphaMode::Add,
        })
    };

    commands.insert_resource(PointMaterials {
        galaxy: material(CloudRole::Galaxy),
        starfield: material(CloudRole::Starfield),
    });
}

fn update_material(
    point_materials: Res<PointMaterials>,
    render_settings: Res<RenderSettings>,
    mut materials: ResMut<Assets<PointMaterial>>,
) {
    if !render_settings.is_changed() || render_settings.is_added() {
        return;
    }
    for role in CloudRole::ALL {
        if let Some(mat) = materials.get_mut(&point_materials.handle(role)) {
            mat.params = PointParams::read(role, &render_settings);
        }
    }
    debug!("Point materials updated, size {}", render_settings.size);
}
