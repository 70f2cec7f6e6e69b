mod galaxy_config;
mod spawn_points;

pub use galaxy_config::{GalaxyConfig, GalaxyConfigPlugin, GalaxyConfigUi, RenderSettings, Reroll};
pub use spawn_points::{CloudRole, PointClouds, SpawnPointsPlugin};
