use bevy::prelude::*;
use point_cloud::{GenerationParameters, ParameterStore, Rgb, StarfieldSettings};

use super::CloudRole;

/// Committed generation state. Only `apply_ui_updates` writes to it.
#[derive(Resource)]
pub struct GalaxyConfig {
    store: ParameterStore,
    pub starfield: StarfieldSettings,
    pub galaxy_generation: i32,
    pub starfield_generation: i32,
}

impl GalaxyConfig {
    pub fn new(store: ParameterStore, starfield: StarfieldSettings) -> Self {
        Self {
            store,
            starfield,
            galaxy_generation: 0,
            starfield_generation: 0,
        }
    }

    pub fn params(&self) -> &GenerationParameters {
        self.store.current()
    }

    pub fn generation(&self, role: CloudRole) -> i32 {
        match role {
            CloudRole::Galaxy => self.galaxy_generation,
            CloudRole::Starfield => self.starfield_generation,
        }
    }
}

/// Staging copy edited by the tweak panel, validated once per frame.
#[derive(Resource, Clone, PartialEq)]
pub struct GalaxyConfigUi {
    pub params: GenerationParameters,
}

/// Look of the points. Changing these never regenerates a cloud.
#[derive(Resource, Clone, PartialEq)]
pub struct RenderSettings {
    pub size: f32,
    pub star_color: Rgb,
}

impl RenderSettings {
    pub const MIN_SIZE: f32 = 0.001;
    pub const MAX_SIZE: f32 = 0.1;
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            size: 0.026,
            star_color: Rgb::from_u8(0x1b, 0x39, 0x84),
        }
    }
}

/// Redraws both clouds with the current parameters.
#[derive(Event)]
pub struct Reroll;

pub struct GalaxyConfigPlugin {
    pub store: ParameterStore,
    pub starfield: StarfieldSettings,
    pub render: RenderSettings,
}

impl Plugin for GalaxyConfigPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(GalaxyConfig::new(self.store.clone(), self.starfield))
            .insert_resource(GalaxyConfigUi {
                params: self.store.current().clone(),
            })
            .insert_resource(self.render.clone())
            .add_event::<Reroll>()
            .add_systems(Update, apply_ui_updates);
    }
}

pub(crate) fn apply_ui_updates(
    mut galaxy_config: ResMut<GalaxyConfig>,
    mut galaxy_config_ui: ResMut<GalaxyConfigUi>,
    mut rerolls: EventReader<Reroll>,
) {
    if rerolls.read().count() > 0 {
        galaxy_config.galaxy_generation += 1;
        galaxy_config.starfield_generation += 1;
        info!("Rerolling both point clouds");
    }

    if !galaxy_config_ui.is_changed() || galaxy_config_ui.params == *galaxy_config.params() {
        return;
    }

    match galaxy_config.store.propose(galaxy_config_ui.params.clone()) {
        Ok(invalidated) => {
            if invalidated.galaxy {
                galaxy_config.galaxy_generation += 1;
            }
            if invalidated.starfield {
                galaxy_config.starfield_generation += 1;
            }
            debug!(
                "Parameters committed, galaxy: {}, starfield: {}",
                invalidated.galaxy, invalidated.starfield
            );
        }
        Err(err) => {
            warn!("Rejected parameter update: {err}");
            galaxy_config_ui.params = galaxy_config.params().clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(GalaxyConfigPlugin {
            store: ParameterStore::default(),
            starfield: StarfieldSettings::default(),
            render: RenderSettings::default(),
        });
        app.update();
        app
    }

    fn generations(app: &App) -> (i32, i32) {
        let config = app.world().resource::<GalaxyConfig>();
        (config.galaxy_generation, config.starfield_generation)
    }

    #[test]
    fn untouched_panel_does_not_regenerate() {
        let mut app = test_app();
        app.update();
        assert_eq!(generations(&app), (0, 0));
    }

    #[test]
    fn galaxy_field_bumps_galaxy_only() {
        let mut app = test_app();
        app.world_mut().resource_mut::<GalaxyConfigUi>().params.spin = 2.5;
        app.update();
        assert_eq!(generations(&app), (1, 0));
        assert_eq!(app.world().resource::<GalaxyConfig>().params().spin, 2.5);
    }

    #[test]
    fn star_count_bumps_starfield_only() {
        let mut app = test_app();
        app.world_mut().resource_mut::<GalaxyConfigUi>().params.star_count = 10;
        app.update();
        assert_eq!(generations(&app), (0, 1));
    }

    #[test]
    fn invalid_update_reverts_the_panel() {
        let mut app = test_app();
        app.world_mut().resource_mut::<GalaxyConfigUi>().params.radius = 0.0;
        app.update();
        assert_eq!(generations(&app), (0, 0));
        assert_eq!(app.world().resource::<GalaxyConfigUi>().params.radius, 4.0);
        assert_eq!(app.world().resource::<GalaxyConfig>().params().radius, 4.0);
    }

    #[test]
    fn reroll_bumps_both() {
        let mut app = test_app();
        app.world_mut().send_event(Reroll);
        app.update();
        assert_eq!(generations(&app), (1, 1));
    }
}
