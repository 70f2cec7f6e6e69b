use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use point_cloud::{GenerationParameters, Rgb};

use crate::galaxy::{CloudRole, GalaxyConfigUi, PointClouds, RenderSettings, Reroll};

const TOGGLE_KEY: KeyCode = KeyCode::F1;

pub struct ConfigEguiPlugin;

impl Plugin for ConfigEguiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ConfigPanel>()
            .add_systems(Startup, configure_visuals_system)
            .add_systems(Update, (toggle_panel_system, ui_system).chain());
    }
}

/// Whether the side panel is showing. Starts hidden.
#[derive(Resource, Default)]
pub struct ConfigPanel {
    pub open: bool,
}

fn toggle_panel_system(keys: Res<ButtonInput<KeyCode>>, mut panel: ResMut<ConfigPanel>) {
    if keys.just_pressed(TOGGLE_KEY) {
        panel.open = !panel.open;
    }
}

fn configure_visuals_system(mut contexts: EguiContexts) {
    if let Some(ctx) = contexts.try_ctx_mut() {
        ctx.set_visuals(egui::Visuals {
            window_corner_radius: 0.0.into(),
            ..Default::default()
        });
    }
}

/// srgb color picker over a normalized color, only writes back on edit
fn color_ui(ui: &mut egui::Ui, label: &str, color: &mut Rgb) {
    ui.horizontal(|ui| {
        let mut srgb = color.to_array().map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        if ui.color_edit_button_srgb(&mut srgb).changed() {
            *color = Rgb::from_u8(srgb[0], srgb[1], srgb[2]);
        }
        ui.label(label);
    });
}

fn galaxy_ui(params: &mut GenerationParameters, ui: &mut egui::Ui) {
    let minval = GenerationParameters::MIN;
    let maxval = GenerationParameters::MAX;

    egui::CollapsingHeader::new("Galaxy").show(ui, |ui| {
        ui.add(
            egui::Slider::new(&mut params.count, minval.count..=maxval.count)
                .logarithmic(true)
                .text("Count"),
        );
        ui.add(egui::Slider::new(&mut params.radius, minval.radius..=maxval.radius).text("Radius"));
        ui.add(
            egui::Slider::new(&mut params.branches, minval.branches..=maxval.branches)
                .text("Branches"),
        );
        ui.add(egui::Slider::new(&mut params.spin, minval.spin..=maxval.spin).text("Spin"));
        ui.add(
            egui::Slider::new(&mut params.randomness, minval.randomness..=maxval.randomness)
                .text("Randomness"),
        );
        ui.add(
            egui::Slider::new(
                &mut params.randomness_power,
                minval.randomness_power..=maxval.randomness_power,
            )
            .text("Randomness Power"),
        );
        color_ui(ui, "Inside Color", &mut params.inside_color);
        color_ui(ui, "Outside Color", &mut params.outside_color);
    });
    ui.separator();

    egui::CollapsingHeader::new("Starfield").show(ui, |ui| {
        ui.add(
            egui::Slider::new(&mut params.star_count, minval.star_count..=maxval.star_count)
                .logarithmic(true)
                .text("Stars"),
        );
    });
    ui.separator();
}

fn render_ui(settings: &mut RenderSettings, ui: &mut egui::Ui) {
    egui::CollapsingHeader::new("Appearance").show(ui, |ui| {
        ui.add(
            egui::Slider::new(
                &mut settings.size,
                RenderSettings::MIN_SIZE..=RenderSettings::MAX_SIZE,
            )
            .text("Point Size"),
        );
        color_ui(ui, "Star Color", &mut settings.star_color);
    });
    ui.separator();
}

fn ui_system(
    mut contexts: EguiContexts,
    mut galaxy_config_ui: ResMut<GalaxyConfigUi>,
    mut render_settings: ResMut<RenderSettings>,
    mut panel: ResMut<ConfigPanel>,
    point_clouds: Res<PointClouds>,
    mut rerolls: EventWriter<Reroll>,
) {
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };

    if !panel.open {
        egui::Area::new(egui::Id::new("open_controls"))
            .anchor(egui::Align2::LEFT_TOP, [8.0, 8.0])
            .show(ctx, |ui| {
                if ui.button("Open Controls").clicked() {
                    panel.open = true;
                }
            });
        return;
    }

    // edit copies so untouched widgets don't trip change detection
    let mut params = galaxy_config_ui.params.clone();
    let mut settings = render_settings.clone();

    egui::SidePanel::left("side_panel")
        .default_width(300.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Configuration");
                if ui.button("Close").clicked() {
                    panel.open = false;
                }
            });

            galaxy_ui(&mut params, ui);
            render_ui(&mut settings, ui);

            if ui.button("Regenerate").clicked() {
                rerolls.write(Reroll);
            }

            for role in CloudRole::ALL {
                let slot = point_clouds.slot(role);
                ui.label(format!(
                    "{:?}: {} points, generation {}",
                    role,
                    slot.cloud().len(),
                    slot.generation()
                ));
            }
        });

    if params != galaxy_config_ui.params {
        galaxy_config_ui.params = params;
    }
    if settings != *render_settings {
        *render_settings = settings;
    }
}
