use field_core::{
    Bounds, FieldConfig, FieldError, Particle, ParticleField, Result, ValueRange,
    DEFAULT_OPACITY_MAX, DEFAULT_OPACITY_MIN, DEFAULT_SIZE_MAX, DEFAULT_SIZE_MIN,
    DEFAULT_VELOCITY_RANGE,
};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Distributions used when spawning a field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnParams {
    /// vx, vy ~ U(-velocity_range, velocity_range)
    pub velocity_range: f32,
    pub size_range: ValueRange,
    pub opacity_range: ValueRange,
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self {
            velocity_range: DEFAULT_VELOCITY_RANGE,
            size_range: ValueRange::new(DEFAULT_SIZE_MIN, DEFAULT_SIZE_MAX),
            opacity_range: ValueRange::new(DEFAULT_OPACITY_MIN, DEFAULT_OPACITY_MAX),
        }
    }
}

impl From<&FieldConfig> for SpawnParams {
    fn from(config: &FieldConfig) -> Self {
        Self {
            velocity_range: config.velocity_range,
            size_range: config.size_range,
            opacity_range: config.opacity_range,
        }
    }
}

impl SpawnParams {
    fn validate(&self) -> Result<()> {
        if !self.velocity_range.is_finite() || self.velocity_range <= 0.0 {
            return Err(FieldError::invalid("velocity range must be finite and > 0"));
        }
        self.size_range.validate("size range")?;
        self.opacity_range.validate("opacity range")
    }
}

/// Deterministic generator for a given seed
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Generate `count` particles uniformly over `bounds` with the default distributions
pub fn create(count: usize, bounds: Bounds, rng: &mut impl Rng) -> Result<ParticleField> {
    create_with(count, bounds, &SpawnParams::default(), rng)
}

/// Generate `count` particles uniformly over `bounds`.
///
/// `count = 0` yields an empty field. Invalid bounds or distributions are
/// rejected before any randomness is consumed.
pub fn create_with(
    count: usize,
    bounds: Bounds,
    params: &SpawnParams,
    rng: &mut impl Rng,
) -> Result<ParticleField> {
    bounds.validate()?;
    params.validate()?;

    let particles = (0..count)
        .map(|_| spawn_particle(bounds, params, rng))
        .collect();

    Ok(ParticleField::from_particles(particles))
}

/// Same seed, same field
pub fn create_seeded(count: usize, bounds: Bounds, seed: u64) -> Result<ParticleField> {
    create(count, bounds, &mut seeded_rng(seed))
}

fn spawn_particle(bounds: Bounds, params: &SpawnParams, rng: &mut impl Rng) -> Particle {
    let pos = [
        rng.gen_range(0.0..bounds.width),
        rng.gen_range(0.0..bounds.height),
    ];
    let size = rng.gen_range(params.size_range.min..params.size_range.max);

    let v = params.velocity_range;
    let vel = [rng.gen_range(-v..v), rng.gen_range(-v..v)];

    let opacity = rng.gen_range(params.opacity_range.min..params.opacity_range.max);

    Particle::new(pos, vel, size, opacity)
}
