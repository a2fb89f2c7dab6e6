pub mod pipeline;
pub mod renderer;
pub mod scheduler;
pub mod viewport;

pub use pipeline::{FieldAnimation, FieldControl, ParticleFieldPlugin, ViewportBounds};
pub use renderer::{NullRenderer, SceneRenderer};
pub use scheduler::{AnimationScheduler, FrameStats, SchedulerState};
pub use viewport::{BoundsSource, SharedBounds};
