use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{FieldError, Result};
use crate::types::ValueRange;

/// Particle field configuration
///
/// Keys are camelCase when (de)serialized and every key is optional, so a host
/// page can pass `{"particleCount": 80}` and keep the remaining defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
    /// Number of particles in the field
    pub particle_count: usize,
    /// Period between ticks (ms, > 0)
    pub tick_interval_ms: u64,
    /// Maximum distance for a connecting line (> 0)
    pub connection_threshold: f32,
    /// Velocity components are drawn from U(-velocity_range, velocity_range)
    pub velocity_range: f32,
    /// Render radius range
    pub size_range: ValueRange,
    /// Particle opacity range, within [0, 1]
    pub opacity_range: ValueRange,
    /// Fixed RNG seed; `None` seeds from system entropy
    pub seed: Option<u64>,
    /// Particle count above which edges are found through a bucket grid
    pub grid_cutoff: usize,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            connection_threshold: DEFAULT_CONNECTION_THRESHOLD,
            velocity_range: DEFAULT_VELOCITY_RANGE,
            size_range: ValueRange::new(DEFAULT_SIZE_MIN, DEFAULT_SIZE_MAX),
            opacity_range: ValueRange::new(DEFAULT_OPACITY_MIN, DEFAULT_OPACITY_MAX),
            seed: None,
            grid_cutoff: DEFAULT_GRID_CUTOFF,
        }
    }
}

impl FieldConfig {
    /// Parse and validate a JSON options object.
    ///
    /// Malformed JSON and out-of-domain values (e.g. a negative `particleCount`)
    /// are both reported as `InvalidArgument`.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| FieldError::invalid(format!("field config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    /// Reject any option outside its domain. Nothing is clamped.
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(FieldError::invalid("tickIntervalMs must be > 0"));
        }
        if !self.connection_threshold.is_finite() || self.connection_threshold <= 0.0 {
            return Err(FieldError::invalid(format!(
                "connectionThreshold must be finite and > 0, got {}",
                self.connection_threshold
            )));
        }
        if !self.velocity_range.is_finite() || self.velocity_range <= 0.0 {
            return Err(FieldError::invalid(format!(
                "velocityRange must be finite and > 0, got {}",
                self.velocity_range
            )));
        }

        self.size_range.validate("sizeRange")?;
        if self.size_range.min <= 0.0 {
            return Err(FieldError::invalid("sizeRange must be > 0"));
        }

        self.opacity_range.validate("opacityRange")?;
        if self.opacity_range.min < 0.0 || self.opacity_range.max > 1.0 {
            return Err(FieldError::invalid("opacityRange must lie within [0, 1]"));
        }

        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
