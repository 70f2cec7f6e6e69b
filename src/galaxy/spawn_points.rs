use super::galaxy_config::apply_ui_updates;
use super::GalaxyConfig;
use crate::graphics::{point_cloud_mesh, PointMaterials};
use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;
use point_cloud::{generate_galaxy, generate_starfield, CloudSlot, PointCloud};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub struct SpawnPointsPlugin {
    pub seed: Option<u64>,
}

impl Plugin for SpawnPointsPlugin {
    fn build(&self, app: &mut App) {
        let rng = match self.seed {
            Some(seed) => {
                info!("Seeding point generation with {seed}");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };
        app.insert_resource(GeneratorRng(rng))
            .insert_resource(PointClouds::default())
            .add_systems(
                Update,
                (
                    manage_point_clouds.after(apply_ui_updates),
                    spin_point_clouds,
                ),
            );
    }
}

/// The one random source both generators draw from.
#[derive(Resource)]
pub struct GeneratorRng(pub StdRng);

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CloudRole {
    Galaxy,
    Starfield,
}

impl CloudRole {
    pub const ALL: [Self; 2] = [Self::Galaxy, Self::Starfield];

    /// Rotation about Y in radians per second.
    fn spin_rate(self) -> f32 {
        match self {
            Self::Galaxy => 0.3,
            Self::Starfield => -0.05,
        }
    }
}

#[derive(Component)]
pub struct Spin {
    rate: f32,
}

impl Spin {
    fn rotation_at(&self, elapsed_secs: f32) -> Quat {
        Quat::from_rotation_y(elapsed_secs * self.rate)
    }
}

/// Clouds currently handed to the renderer, plus the config generation each was built for.
#[derive(Resource)]
pub struct PointClouds {
    pub galaxy: CloudSlot,
    pub starfield: CloudSlot,
    galaxy_built: i32,
    starfield_built: i32,
}

impl Default for PointClouds {
    fn default() -> Self {
        Self {
            galaxy: CloudSlot::default(),
            starfield: CloudSlot::default(),
            galaxy_built: -1,
            starfield_built: -1,
        }
    }
}

impl PointClouds {
    pub fn slot(&self, role: CloudRole) -> &CloudSlot {
        match role {
            CloudRole::Galaxy => &self.galaxy,
            CloudRole::Starfield => &self.starfield,
        }
    }

    fn install(&mut self, role: CloudRole, cloud: PointCloud, generation: i32) {
        let (slot, built) = match role {
            CloudRole::Galaxy => (&mut self.galaxy, &mut self.galaxy_built),
            CloudRole::Starfield => (&mut self.starfield, &mut self.starfield_built),
        };
        slot.replace(cloud);
        *built = generation;
    }

    fn is_stale(&self, role: CloudRole, generation: i32) -> bool {
        let built = match role {
            CloudRole::Galaxy => self.galaxy_built,
            CloudRole::Starfield => self.starfield_built,
        };
        built != generation
    }
}

/// Regenerates a cloud whenever its config generation moves on, then swaps the
/// new mesh onto the cloud's entity. The old mesh is freed with its last handle.
fn manage_point_clouds(
    mut commands: Commands,
    galaxy_config: Res<GalaxyConfig>,
    mut point_clouds: ResMut<PointClouds>,
    mut rng: ResMut<GeneratorRng>,
    mut meshes: ResMut<Assets<Mesh>>,
    materials: Res<PointMaterials>,
    existing: Query<(Entity, &CloudRole)>,
) {
    for role in CloudRole::ALL {
        let generation = galaxy_config.generation(role);
        if !point_clouds.is_stale(role, generation) {
            continue;
        }

        let params = galaxy_config.params();
        let cloud = match role {
            CloudRole::Galaxy => generate_galaxy(params, &mut rng.0),
            CloudRole::Starfield => {
                generate_starfield(params.star_count, &galaxy_config.starfield, &mut rng.0)
            }
        };
        info!(
            "Generated {:?} cloud: {} points (generation {})",
            role,
            cloud.len(),
            generation
        );

        let entity = match existing.iter().find(|(_, r)| **r == role) {
            Some((entity, _)) => entity,
            None => commands
                .spawn((
                    role,
                    Spin {
                        rate: role.spin_rate(),
                    },
                    MeshMaterial3d(materials.handle(role)),
                    Transform::default(),
                    Visibility::default(),
                    NoFrustumCulling,
                    NotShadowCaster,
                ))
                .id(),
        };

        // empty clouds get no mesh at all rather than a zero-sized vertex buffer
        match point_cloud_mesh(&cloud) {
            Some(mesh) if !cloud.is_empty() => {
                commands.entity(entity).insert(Mesh3d(meshes.add(mesh)));
            }
            Some(_) => {
                commands.entity(entity).remove::<Mesh3d>();
            }
            None => {
                error!(
                    "{:?} cloud of {} points is too large to index, not drawing it",
                    role,
                    cloud.len()
                );
                commands.entity(entity).remove::<Mesh3d>();
            }
        }

        point_clouds.install(role, cloud, generation);
    }
}

fn spin_point_clouds(time: Res<Time>, mut query: Query<(&Spin, &mut Transform)>) {
    let elapsed = time.elapsed_secs();
    for (spin, mut transform) in &mut query {
        transform.rotation = spin.rotation_at(elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::galaxy::{GalaxyConfigPlugin, GalaxyConfigUi, RenderSettings};
    use point_cloud::{GenerationParameters, ParameterStore, StarfieldSettings};

    fn test_app() -> App {
        let params = GenerationParameters {
            count: 40,
            star_count: 25,
            ..Default::default()
        };
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Mesh>()
            .init_resource::<PointMaterials>()
            .add_plugins((
                GalaxyConfigPlugin {
                    store: ParameterStore::new(params).unwrap(),
                    starfield: StarfieldSettings::default(),
                    render: RenderSettings::default(),
                },
                SpawnPointsPlugin { seed: Some(1) },
            ));
        app.update();
        app
    }

    fn meshes_by_role(app: &mut App) -> Vec<(CloudRole, Option<AssetId<Mesh>>)> {
        let mut query = app.world_mut().query::<(&CloudRole, Option<&Mesh3d>)>();
        let mut found: Vec<_> = query
            .iter(app.world())
            .map(|(role, mesh)| (*role, mesh.map(|m| m.id())))
            .collect();
        found.sort_by_key(|(role, _)| *role as u8);
        found
    }

    #[test]
    fn first_update_spawns_one_entity_per_role() {
        let mut app = test_app();
        app.update();
        let found = meshes_by_role(&mut app);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].0, CloudRole::Galaxy);
        assert_eq!(found[1].0, CloudRole::Starfield);
        assert!(found.iter().all(|(_, mesh)| mesh.is_some()));

        let clouds = app.world().resource::<PointClouds>();
        assert_eq!(clouds.galaxy.cloud().len(), 40);
        assert_eq!(clouds.starfield.cloud().len(), 25);
    }

    #[test]
    fn star_count_change_rebuilds_only_the_starfield() {
        let mut app = test_app();
        let before = meshes_by_role(&mut app);

        app.world_mut().resource_mut::<GalaxyConfigUi>().params.star_count = 60;
        app.update();

        let after = meshes_by_role(&mut app);
        assert_eq!(after.len(), 2);
        assert_eq!(after[0], before[0]);
        assert_ne!(after[1].1, before[1].1);
        assert!(after[1].1.is_some());

        let clouds = app.world().resource::<PointClouds>();
        assert_eq!(clouds.starfield.cloud().len(), 60);
        assert_eq!(clouds.starfield.generation(), 2);
        assert_eq!(clouds.galaxy.generation(), 1);
    }

    #[test]
    fn empty_galaxy_loses_its_mesh() {
        let mut app = test_app();
        app.world_mut().resource_mut::<GalaxyConfigUi>().params.count = 0;
        app.update();

        let found = meshes_by_role(&mut app);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0], (CloudRole::Galaxy, None));
        assert!(found[1].1.is_some());
        assert!(app.world().resource::<PointClouds>().galaxy.cloud().is_empty());
    }

    #[test]
    fn new_clouds_are_stale_until_installed() {
        let mut clouds = PointClouds::default();
        assert!(clouds.is_stale(CloudRole::Galaxy, 0));
        clouds.install(CloudRole::Galaxy, PointCloud::new(vec![[0.0; 3]]), 0);
        assert!(!clouds.is_stale(CloudRole::Galaxy, 0));
        assert!(clouds.is_stale(CloudRole::Galaxy, 1));
        assert!(clouds.is_stale(CloudRole::Starfield, 0));
        assert_eq!(clouds.slot(CloudRole::Galaxy).generation(), 1);
    }

    #[test]
    fn galaxy_and_starfield_turn_opposite_ways() {
        let galaxy = Spin {
            rate: CloudRole::Galaxy.spin_rate(),
        };
        let stars = Spin {
            rate: CloudRole::Starfield.spin_rate(),
        };
        let (_, galaxy_angle) = galaxy.rotation_at(2.0).to_axis_angle();
        assert!((galaxy_angle - 0.6).abs() < 1e-5);

        let turned = stars.rotation_at(10.0) * Vec3::X;
        let expected = Quat::from_rotation_y(-0.5) * Vec3::X;
        assert!(turned.abs_diff_eq(expected, 1e-5));
    }
}
