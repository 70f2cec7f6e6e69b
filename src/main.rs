use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::window::{PresentMode, WindowTheme};
use bevy_egui::EguiPlugin;
use clap::{error::ErrorKind, CommandFactory, Parser};
use point_cloud::ParameterStore;

mod cli;
mod galaxy;
mod graphics;
mod ui;

fn main() -> AppExit {
    let args = cli::Args::parse();

    let store = ParameterStore::new(args.parameters()).unwrap_or_else(|err| {
        cli::Args::command()
            .error(ErrorKind::ValueValidation, err)
            .exit()
    });

    let mut log_plugin = LogPlugin::default();
    if let Some(level) = args.log_level {
        log_plugin.level = level;
    }

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Galaxy Points".into(),
                        name: Some("bevy.app".into()),
                        present_mode: PresentMode::AutoVsync,
                        fit_canvas_to_parent: true,
                        prevent_default_event_handling: false,
                        window_theme: Some(WindowTheme::Dark),
                        ..default()
                    }),
                    ..default()
                })
                .set(log_plugin),
        )
        .add_plugins(EguiPlugin {
            enable_multipass_for_primary_context: false,
        })
        .add_plugins((
            galaxy::GalaxyConfigPlugin {
                store,
                starfield: args.starfield_settings(),
                render: args.render_settings(),
            },
            galaxy::SpawnPointsPlugin { seed: args.seed },
            graphics::GraphicsPlugin,
            ui::UiPlugin,
        ))
        .run()
}
