use std::ops::{Deref, DerefMut};

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use field_core::{Bounds, FieldConfig, Result};

use super::renderer::SceneRenderer;
use super::scheduler::AnimationScheduler;
use super::viewport::{BoundsSource, SharedBounds};

/// Type-erased scheduler stored in the Bevy world
pub type DynScheduler = AnimationScheduler<Box<dyn SceneRenderer>, Box<dyn BoundsSource>>;

/// The particle field animation, tracked as a Bevy Resource
#[derive(Resource)]
pub struct FieldAnimation(DynScheduler);

impl FieldAnimation {
    pub fn new(
        config: FieldConfig,
        bounds: impl BoundsSource + 'static,
        renderer: impl SceneRenderer + 'static,
    ) -> Result<Self> {
        let bounds: Box<dyn BoundsSource> = Box::new(bounds);
        let renderer: Box<dyn SceneRenderer> = Box::new(renderer);
        AnimationScheduler::new(config, bounds, renderer).map(Self)
    }
}

impl Deref for FieldAnimation {
    type Target = DynScheduler;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for FieldAnimation {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Viewport handle kept in sync with the primary window, when there is one
#[derive(Resource, Clone, Debug)]
pub struct ViewportBounds(pub SharedBounds);

/// Lifecycle requests for the field animation
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldControl {
    Start,
    Stop,
    Restart,
}

/// Bevy plugin driving the particle field from the frame clock
pub struct ParticleFieldPlugin {
    /// Start the animation during `Startup`
    pub autostart: bool,
}

impl Default for ParticleFieldPlugin {
    fn default() -> Self {
        Self { autostart: true }
    }
}

impl Plugin for ParticleFieldPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<FieldControl>().add_systems(
            Update,
            (sync_viewport_bounds, apply_field_controls, drive_field_animation).chain(),
        );

        if self.autostart {
            app.add_systems(Startup, start_field_animation);
        }
    }
}

fn start_field_animation(animation: Option<ResMut<FieldAnimation>>) {
    let Some(mut animation) = animation else {
        warn!("ParticleFieldPlugin added without a FieldAnimation resource");
        return;
    };
    if let Err(e) = animation.start() {
        error!("Particle field failed to start: {e}");
    }
}

fn apply_field_controls(
    mut controls: EventReader<FieldControl>,
    animation: Option<ResMut<FieldAnimation>>,
) {
    let Some(mut animation) = animation else {
        controls.clear();
        return;
    };

    for control in controls.read() {
        let outcome = match control {
            FieldControl::Start => animation.start(),
            FieldControl::Stop => {
                animation.stop();
                Ok(())
            }
            FieldControl::Restart => animation.restart(),
        };
        if let Err(e) = outcome {
            error!("Particle field {:?} failed: {e}", control);
        }
    }
}

/// Main field tick: feeds frame time to the scheduler
fn drive_field_animation(animation: Option<ResMut<FieldAnimation>>, time: Res<Time>) {
    if let Some(mut animation) = animation {
        animation.advance(time.delta());
    }
}

/// Mirror the primary window's logical size into the shared viewport
fn sync_viewport_bounds(
    windows: Query<&Window, With<PrimaryWindow>>,
    viewport: Option<Res<ViewportBounds>>,
) {
    let Some(viewport) = viewport else {
        return;
    };
    let Ok(window) = windows.get_single() else {
        return;
    };

    // A minimised window reports 0x0; keep the last usable size
    let Ok(bounds) = Bounds::new(window.width(), window.height()) else {
        return;
    };
    if viewport.0.current() != bounds {
        debug!("Viewport resized to {}x{}", bounds.width, bounds.height);
        viewport.0.set(bounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::NullRenderer;
    use bevy::window::WindowResolution;
    use std::time::Duration;

    fn app_with(animation: FieldAnimation, autostart: bool) -> App {
        let mut app = App::new();
        app.init_resource::<Time>()
            .insert_resource(animation)
            .add_plugins(ParticleFieldPlugin { autostart });
        app
    }

    fn step_app(app: &mut App, ms: u64) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(ms));
        app.update();
    }

    fn animation() -> FieldAnimation {
        let config = FieldConfig::default().with_seed(7);
        FieldAnimation::new(config, Bounds { width: 640.0, height: 480.0 }, NullRenderer).unwrap()
    }

    fn frames(app: &App) -> u64 {
        app.world().resource::<FieldAnimation>().stats().frames
    }

    #[test]
    fn test_autostart_runs_on_frame_clock() {
        let mut app = app_with(animation(), true);
        step_app(&mut app, 0);
        assert!(app.world().resource::<FieldAnimation>().is_running());

        step_app(&mut app, 50);
        step_app(&mut app, 50);
        assert_eq!(frames(&app), 2);
    }

    #[test]
    fn test_stop_event_halts_ticks() {
        let mut app = app_with(animation(), true);
        step_app(&mut app, 50);
        let ran = frames(&app);

        app.world_mut().send_event(FieldControl::Stop);
        step_app(&mut app, 50);
        step_app(&mut app, 50);
        assert_eq!(frames(&app), ran);
        assert!(!app.world().resource::<FieldAnimation>().is_running());
    }

    #[test]
    fn test_manual_start_without_autostart() {
        let mut app = app_with(animation(), false);
        step_app(&mut app, 50);
        assert_eq!(frames(&app), 0);

        app.world_mut().send_event(FieldControl::Start);
        step_app(&mut app, 50);
        assert_eq!(frames(&app), 1);
    }

    #[test]
    fn test_primary_window_size_reaches_viewport() {
        let viewport = SharedBounds::new(Bounds { width: 640.0, height: 480.0 });
        let config = FieldConfig::default().with_seed(7);
        let animation = FieldAnimation::new(config, viewport.clone(), NullRenderer).unwrap();

        let mut app = app_with(animation, true);
        app.insert_resource(ViewportBounds(viewport.clone()));
        app.world_mut().spawn((
            Window {
                resolution: WindowResolution::new(1024.0, 768.0),
                ..default()
            },
            PrimaryWindow,
        ));
        step_app(&mut app, 50);

        assert_eq!(viewport.current(), Bounds { width: 1024.0, height: 768.0 });
        let animation = app.world().resource::<FieldAnimation>();
        assert_eq!(animation.stats().frames, 1);
        let field = animation.field().unwrap();
        assert!(field.iter().all(|p| viewport.current().contains(p.position)));
    }

    #[test]
    fn test_plugin_without_resource_is_inert() {
        let mut app = App::new();
        app.init_resource::<Time>().add_plugins(ParticleFieldPlugin::default());
        step_app(&mut app, 50);
        assert!(app.world().get_resource::<FieldAnimation>().is_none());
    }
}
