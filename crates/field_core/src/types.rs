use serde::{Deserialize, Serialize};

use crate::error::{FieldError, Result};

/// Viewport size in pixels, supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    /// Validated constructor. Zero, negative and non-finite sizes are rejected.
    pub fn new(width: f32, height: f32) -> Result<Self> {
        let bounds = Self { width, height };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(FieldError::invalid(format!(
                "bounds width must be finite and > 0, got {}",
                self.width
            )));
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(FieldError::invalid(format!(
                "bounds height must be finite and > 0, got {}",
                self.height
            )));
        }
        Ok(())
    }

    /// True if `pos` lies in `[0, width] x [0, height]` (edges included)
    pub fn contains(&self, pos: [f32; 2]) -> bool {
        (0.0..=self.width).contains(&pos[0]) && (0.0..=self.height).contains(&pos[1])
    }
}

/// Closed interval used for the size and opacity options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Requires finite ends with `min < max`; sampling from an empty range is undefined.
    pub fn validate(&self, name: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(FieldError::invalid(format!("{name} must be finite")));
        }
        if self.min >= self.max {
            return Err(FieldError::invalid(format!(
                "{name} must satisfy min < max, got [{}, {}]",
                self.min, self.max
            )));
        }
        Ok(())
    }

    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// A single animated point.
///
/// Size and opacity are fixed at creation; only position and velocity change
/// as the field steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position (x, y) in viewport pixels
    pub position: [f32; 2],
    /// Displacement per tick (vx, vy)
    pub velocity: [f32; 2],
    size: f32,
    opacity: f32,
}

impl Particle {
    pub fn new(position: [f32; 2], velocity: [f32; 2], size: f32, opacity: f32) -> Self {
        Self {
            position,
            velocity,
            size,
            opacity,
        }
    }

    pub fn x(&self) -> f32 {
        self.position[0]
    }

    pub fn y(&self) -> f32 {
        self.position[1]
    }

    /// Render radius
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn distance_to(&self, other: &Particle) -> f32 {
        let dx = self.position[0] - other.position[0];
        let dy = self.position[1] - other.position[1];
        (dx * dx + dy * dy).sqrt()
    }
}

/// Fixed-size, index-stable collection of particles.
///
/// Index `i` names the same particle for the whole lifetime of the field;
/// there is no way to add or remove particles after creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable view for stepping. A slice cannot grow or shrink, so the count is preserved.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }
}

impl<'a> IntoIterator for &'a ParticleField {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}

/// Transient proximity connection between particles `a < b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    pub opacity: f32,
}

impl Edge {
    /// Orders the pair so that `a < b`.
    pub fn new(i: usize, j: usize, opacity: f32) -> Self {
        let (a, b) = if i <= j { (i, j) } else { (j, i) };
        Self { a, b, opacity }
    }

    pub fn pair(&self) -> (usize, usize) {
        (self.a, self.b)
    }
}

/// A particle as handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenePoint {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub opacity: f32,
}

/// A connection line as handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneLine {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub opacity: f32,
}

/// Everything a renderer needs to draw one frame: circles then lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub particles: Vec<ScenePoint>,
    pub edges: Vec<SceneLine>,
}

impl Scene {
    /// Resolve edge indices against the field into drawable line segments.
    /// Edges that reference indices outside the field are dropped.
    pub fn assemble(field: &ParticleField, edges: &[Edge]) -> Self {
        let particles = field
            .iter()
            .map(|p| ScenePoint {
                x: p.x(),
                y: p.y(),
                size: p.size(),
                opacity: p.opacity(),
            })
            .collect();

        let edges = edges
            .iter()
            .filter_map(|e| {
                let a = field.get(e.a)?;
                let b = field.get(e.b)?;
                Some(SceneLine {
                    x1: a.x(),
                    y1: a.y(),
                    x2: b.x(),
                    y2: b.y(),
                    opacity: e.opacity,
                })
            })
            .collect();

        Self { particles, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty() && self.edges.is_empty()
    }
}
