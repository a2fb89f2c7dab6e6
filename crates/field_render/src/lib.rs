//! Scene renderers for the particle field.

pub mod stats;
pub mod svg;

pub use stats::StatsRenderer;
pub use svg::{SvgOutput, SvgRenderer};
