use bevy::prelude::*;

mod alpha_mask;
mod point_material;

pub use point_material::{point_cloud_mesh, PointMaterials};

pub struct GraphicsPlugin;

impl Plugin for GraphicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(point_material::PointMaterialPlugin);
    }
}
