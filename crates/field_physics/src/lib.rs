//! Pure particle field algorithms: spawning, stepping and proximity edges.
//! Nothing here holds state between calls.

pub mod motion;
pub mod proximity;
pub mod spawn;

pub use motion::step;
pub use proximity::{build_edges, build_edges_with, EdgeStrategy, SpatialHash};
pub use spawn::{create, create_seeded, create_with, seeded_rng, SpawnParams};
