use bevy::log::info;
use field_core::{Result, Scene};
use field_sim::SceneRenderer;

/// Wraps another renderer and logs frame statistics every `every` frames.
pub struct StatsRenderer<R> {
    inner: R,
    every: u64,
    frames: u64,
    edges_total: u64,
    edges_max: usize,
}

impl<R: SceneRenderer> StatsRenderer<R> {
    /// `every = 0` disables logging; counters are still kept
    pub fn new(inner: R, every: u64) -> Self {
        Self {
            inner,
            every,
            frames: 0,
            edges_total: 0,
            edges_max: 0,
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn edges_max(&self) -> usize {
        self.edges_max
    }

    pub fn mean_edges(&self) -> f64 {
        if self.frames == 0 {
            return 0.0;
        }
        self.edges_total as f64 / self.frames as f64
    }
}

impl<R: SceneRenderer> SceneRenderer for StatsRenderer<R> {
    fn draw(&mut self, scene: &Scene) -> Result<()> {
        // Count before delegating so failed frames still show up
        self.frames += 1;
        self.edges_total += scene.edges.len() as u64;
        self.edges_max = self.edges_max.max(scene.edges.len());

        if self.every > 0 && self.frames % self.every == 0 {
            info!(
                "Frame {}: {} particles, {} edges (mean {:.1}, max {})",
                self.frames,
                scene.particles.len(),
                scene.edges.len(),
                self.mean_edges(),
                self.edges_max
            );
        }

        self.inner.draw(scene)
    }
}
