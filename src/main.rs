use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use field_core::{Bounds, FieldConfig};
use field_render::StatsRenderer;
use field_sim::{FieldAnimation, NullRenderer, ParticleFieldPlugin, SharedBounds, ViewportBounds};

/// Frame statistics are logged once per second at the default tick rate
const STATS_EVERY: u64 = 20;

fn main() -> field_core::Result<()> {
    let config = FieldConfig::default();
    let viewport = SharedBounds::new(Bounds::new(1920.0, 1080.0)?);

    let renderer = StatsRenderer::new(NullRenderer, STATS_EVERY);
    let animation = FieldAnimation::new(config, viewport.clone(), renderer)?;

    // Headless host: nothing to draw into, only frame stats are logged.
    // Without a window the viewport stays at its initial size.
    App::new()
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_millis(5))),
        )
        .add_plugins(LogPlugin::default())
        .insert_resource(animation)
        .insert_resource(ViewportBounds(viewport))
        .add_plugins(ParticleFieldPlugin::default())
        .run();

    Ok(())
}
