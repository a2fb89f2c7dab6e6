use std::collections::HashMap;

use field_core::{Edge, FieldError, ParticleField, Result, MAX_EDGE_OPACITY};

/// How candidate pairs are enumerated. Both strategies emit the same edges
/// with the same opacities, in ascending `(a, b)` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeStrategy {
    /// Every pair, O(n^2)
    AllPairs,
    /// Only pairs in neighbouring buckets of a threshold-sized grid
    Grid,
}

impl EdgeStrategy {
    /// Brute force for small fields, grid above `cutoff` particles
    pub fn for_count(count: usize, cutoff: usize) -> Self {
        if count > cutoff {
            Self::Grid
        } else {
            Self::AllPairs
        }
    }
}

/// Linear falloff: 0.2 at distance 0, approaching 0 at the threshold
#[inline]
pub fn edge_opacity(distance: f32, threshold: f32) -> f32 {
    MAX_EDGE_OPACITY * (1.0 - distance / threshold)
}

/// All pairs closer than `threshold`, by exhaustive scan
pub fn build_edges(field: &ParticleField, threshold: f32) -> Result<Vec<Edge>> {
    build_edges_with(field, threshold, EdgeStrategy::AllPairs)
}

pub fn build_edges_with(
    field: &ParticleField,
    threshold: f32,
    strategy: EdgeStrategy,
) -> Result<Vec<Edge>> {
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(FieldError::invalid(format!(
            "connection threshold must be finite and > 0, got {threshold}"
        )));
    }

    Ok(match strategy {
        EdgeStrategy::AllPairs => all_pairs(field, threshold),
        EdgeStrategy::Grid => SpatialHash::build(field, threshold).edges(field, threshold),
    })
}

fn all_pairs(field: &ParticleField, threshold: f32) -> Vec<Edge> {
    let particles = field.particles();
    let mut edges = Vec::new();

    for (i, a) in particles.iter().enumerate() {
        for (j, b) in particles.iter().enumerate().skip(i + 1) {
            let d = a.distance_to(b);
            if d < threshold {
                edges.push(Edge::new(i, j, edge_opacity(d, threshold)));
            }
        }
    }

    edges
}

/// Buckets particle indices by square cell of side `cell_size`.
///
/// With `cell_size == threshold`, any pair closer than the threshold lies in
/// the same or an adjacent cell, so only the 3x3 neighbourhood is scanned.
pub struct SpatialHash {
    cell_size: f32,
    cells: HashMap<(i64, i64), Vec<usize>>,
}

impl SpatialHash {
    pub fn build(field: &ParticleField, cell_size: f32) -> Self {
        let mut cells: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
        for (i, p) in field.iter().enumerate() {
            cells
                .entry(cell_of(p.position, cell_size))
                .or_default()
                .push(i);
        }
        Self { cell_size, cells }
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    fn edges(&self, field: &ParticleField, threshold: f32) -> Vec<Edge> {
        let particles = field.particles();
        let mut edges = Vec::new();

        for (i, a) in particles.iter().enumerate() {
            for cell in neighbour_cells(cell_of(a.position, self.cell_size)) {
                let Some(bucket) = self.cells.get(&cell) else {
                    continue;
                };
                for &j in bucket.iter().filter(|&&j| j > i) {
                    let d = a.distance_to(&particles[j]);
                    if d < threshold {
                        edges.push(Edge::new(i, j, edge_opacity(d, threshold)));
                    }
                }
            }
        }

        edges.sort_unstable_by_key(Edge::pair);
        edges
    }
}

fn cell_of(pos: [f32; 2], cell_size: f32) -> (i64, i64) {
    (
        (pos[0] / cell_size).floor() as i64,
        (pos[1] / cell_size).floor() as i64,
    )
}

/// The 3x3 block around `(cx, cy)`, each cell listed once.
/// Indices clamp at the `i64` range, so cells on the edge of it repeat.
fn neighbour_cells((cx, cy): (i64, i64)) -> Vec<(i64, i64)> {
    let mut cells = Vec::with_capacity(9);
    for dx in -1..=1 {
        for dy in -1..=1 {
            cells.push((cx.saturating_add(dx), cy.saturating_add(dy)));
        }
    }
    cells.sort_unstable();
    cells.dedup();
    cells
}
