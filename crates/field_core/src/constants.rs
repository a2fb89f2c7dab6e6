// Field defaults. All distances are in viewport pixels, all velocities in
// pixels per tick. A tick is one simulate/build/render cycle.

/// Particles created when the field starts
pub const DEFAULT_PARTICLE_COUNT: usize = 50;

/// Period between ticks in milliseconds
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 50;

/// Distance below which two particles are connected by a line
pub const DEFAULT_CONNECTION_THRESHOLD: f32 = 100.0;

/// Maximum magnitude of each velocity component (vx, vy ~ U(-v, v))
pub const DEFAULT_VELOCITY_RANGE: f32 = 0.25;

/// Render radius range
pub const DEFAULT_SIZE_MIN: f32 = 1.0;
pub const DEFAULT_SIZE_MAX: f32 = 5.0;

/// Particle opacity range
pub const DEFAULT_OPACITY_MIN: f32 = 0.1;
pub const DEFAULT_OPACITY_MAX: f32 = 0.6;

/// Opacity of an edge between two coincident particles; falls off linearly to 0 at the threshold
pub const MAX_EDGE_OPACITY: f32 = 0.2;

/// Particle count above which the bucket grid replaces the all-pairs scan
pub const DEFAULT_GRID_CUTOFF: usize = 400;

/// Stroke width of connection lines in rendered output
pub const EDGE_STROKE_WIDTH: f32 = 0.5;
