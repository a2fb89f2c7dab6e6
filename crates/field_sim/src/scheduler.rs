use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use bevy::log::{debug, info, warn};
use bevy::time::{Timer, TimerMode};
use field_core::{FieldConfig, ParticleField, Result, Scene};
use field_physics::{build_edges_with, EdgeStrategy, SpawnParams};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::renderer::SceneRenderer;
use crate::viewport::BoundsSource;

/// Scheduler lifecycle. There are no other states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulerState {
    #[default]
    Stopped,
    Running,
}

/// Running counters, never reset by stop/start
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Completed simulate/build/render cycles
    pub frames: u64,
    /// Frames whose renderer returned an error or panicked
    pub failed_frames: u64,
    /// Ticks dropped: overrun periods and ticks with an unusable viewport
    pub skipped_ticks: u64,
    /// Edge count of the latest frame
    pub last_edge_count: usize,
}

/// Owns the particle field and drives the simulate -> build edges -> render cycle.
///
/// Time is pushed in through [`advance`](Self::advance); the scheduler runs at
/// most one cycle per call, so cycles can never overlap and `stop()` takes
/// effect before the next call returns.
pub struct AnimationScheduler<R, B> {
    config: FieldConfig,
    renderer: R,
    bounds: B,
    rng: ChaCha8Rng,
    field: Option<ParticleField>,
    state: SchedulerState,
    timer: Timer,
    stats: FrameStats,
}

impl<R: SceneRenderer, B: BoundsSource> AnimationScheduler<R, B> {
    /// Validates `config`; the field itself is created on the first `start()`.
    pub fn new(config: FieldConfig, bounds: B, renderer: R) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let timer = Timer::new(config.tick_interval(), TimerMode::Repeating);

        Ok(Self {
            config,
            renderer,
            bounds,
            rng,
            field: None,
            state: SchedulerState::Stopped,
            timer,
            stats: FrameStats::default(),
        })
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn bounds_source(&self) -> &B {
        &self.bounds
    }

    /// Stopped -> Running. Spawns the field from the current viewport if there
    /// is none yet. A no-op while already running.
    pub fn start(&mut self) -> Result<()> {
        if self.is_running() {
            debug!("particle field already running");
            return Ok(());
        }

        if self.field.is_none() {
            let bounds = self.bounds.current();
            let params = SpawnParams::from(&self.config);
            let field =
                field_physics::create_with(self.config.particle_count, bounds, &params, &mut self.rng)?;
            info!(
                "Spawned particle field: {} particles in {}x{}",
                field.len(),
                bounds.width,
                bounds.height
            );
            self.field = Some(field);
        }

        self.timer.reset();
        self.state = SchedulerState::Running;
        info!(
            "Particle field started (tick every {} ms)",
            self.config.tick_interval_ms
        );
        Ok(())
    }

    /// Running -> Stopped. No tick runs after this returns. Safe to repeat.
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        self.state = SchedulerState::Stopped;
        self.timer.reset();
        info!("Particle field stopped after {} frames", self.stats.frames);
    }

    /// Discard the field and start over with a freshly spawned one.
    pub fn restart(&mut self) -> Result<()> {
        self.stop();
        self.field = None;
        info!("Restarting particle field");
        self.start()
    }

    /// Feed elapsed wall time. Runs one cycle if a period has elapsed and
    /// returns whether it did. Periods beyond the first are dropped, not queued.
    pub fn advance(&mut self, delta: Duration) -> bool {
        if !self.is_running() {
            return false;
        }

        self.timer.tick(delta);
        if !self.timer.just_finished() {
            return false;
        }

        let overrun = self.timer.times_finished_this_tick().saturating_sub(1);
        if overrun > 0 {
            debug!("Skipping {} overrun particle field ticks", overrun);
            self.stats.skipped_ticks += u64::from(overrun);
        }

        self.run_cycle();
        true
    }

    /// Run one cycle immediately, bypassing the timer. Ignored while stopped.
    pub fn tick_now(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.run_cycle();
        true
    }

    fn run_cycle(&mut self) {
        let Some(field) = self.field.as_mut() else {
            return;
        };

        let bounds = self.bounds.current();
        if let Err(e) = field_physics::step(field, bounds) {
            warn!("Skipping particle field tick: {e}");
            self.stats.skipped_ticks += 1;
            return;
        }

        let strategy = EdgeStrategy::for_count(field.len(), self.config.grid_cutoff);
        let edges = match build_edges_with(field, self.config.connection_threshold, strategy) {
            Ok(edges) => edges,
            Err(e) => {
                warn!("Skipping particle field tick: {e}");
                self.stats.skipped_ticks += 1;
                return;
            }
        };

        let scene = Scene::assemble(field, &edges);
        self.stats.frames += 1;
        self.stats.last_edge_count = edges.len();
        let frame = self.stats.frames;

        let renderer = &mut self.renderer;
        match panic::catch_unwind(AssertUnwindSafe(|| renderer.draw(&scene))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                self.stats.failed_frames += 1;
                warn!("Frame {frame} not drawn: {e}");
            }
            Err(_) => {
                self.stats.failed_frames += 1;
                warn!("Renderer panicked on frame {frame}");
            }
        }
    }
}
