use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use clap::Parser;

use janus::config::SimulationConfig;
use janus::runner;

mod cli;

#[derive(Resource, Debug, Clone, Copy)]
struct RunRequest {
    reverse: bool,
}

fn main() -> AppExit {
    let args = cli::Args::parse();

    if args.list_integrators {
        cli::handle_list_integrators();
        return AppExit::Success;
    }

    let mut app = App::new();
    app.add_plugins(LogPlugin {
        level: if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        },
        ..default()
    });

    let config = match cli::load_and_apply_config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return AppExit::error();
        }
    };

    if args.print_config {
        return match config.to_toml() {
            Ok(toml_string) => {
                println!("{toml_string}");
                AppExit::Success
            }
            Err(e) => {
                error!("{e}");
                AppExit::error()
            }
        };
    }

    if let Some(path) = &args.save_config {
        match config.save(path) {
            Ok(()) => info!("Configuration saved to {}", path.display()),
            Err(e) => warn!("{e}"),
        }
    }

    app.insert_resource(config)
        .insert_resource(RunRequest {
            reverse: args.reverse,
        })
        .add_systems(Startup, run_scenario);

    app.run()
}

fn run_scenario(
    config: Res<SimulationConfig>,
    request: Res<RunRequest>,
    mut exit: EventWriter<AppExit>,
) {
    info!(
        "Integrating {} with {} (scale {:e}, dt {})",
        config.scenario.kind,
        config.integrator.scheme,
        config.integrator.scale,
        config.physics.timestep
    );

    match runner::run(&config, request.reverse) {
        Ok(summary) => info!("{summary}"),
        Err(e) => {
            error!("{e}");
            exit.write(AppExit::error());
        }
    }
}
