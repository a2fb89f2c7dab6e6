//! Print the SVG of a seeded particle field after a number of ticks.
//!
//! Usage: snapshot [seed] [steps] [width] [height]

use field_core::{Bounds, FieldConfig, FieldError};
use field_render::SvgRenderer;
use field_sim::AnimationScheduler;

fn arg<T: std::str::FromStr>(args: &[String], index: usize, default: T) -> Result<T, FieldError> {
    match args.get(index) {
        Some(raw) => raw
            .parse()
            .map_err(|_| FieldError::invalid(format!("could not parse argument {index}: {raw:?}"))),
        None => Ok(default),
    }
}

fn main() -> Result<(), FieldError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed: u64 = arg(&args, 0, 42)?;
    let steps: u32 = arg(&args, 1, 100)?;
    let bounds = Bounds::new(arg(&args, 2, 800.0)?, arg(&args, 3, 600.0)?)?;

    let renderer = SvgRenderer::new().with_viewport(bounds);
    let output = renderer.output();

    let config = FieldConfig::default().with_seed(seed);
    let mut scheduler = AnimationScheduler::new(config, bounds, renderer)?;
    scheduler.start()?;
    for _ in 0..steps.max(1) {
        scheduler.tick_now();
    }
    scheduler.stop();

    let stats = scheduler.stats();
    eprintln!(
        "seed {seed}: {} frames, {} edges in the last frame",
        stats.frames, stats.last_edge_count
    );
    println!("{}", output.latest());
    Ok(())
}
