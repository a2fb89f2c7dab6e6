use field_core::{Result, Scene};

/// Draws one frame of the field. Implemented outside the engine.
///
/// An `Err` (or a panic) costs a single frame; the scheduler logs it and
/// keeps ticking.
pub trait SceneRenderer: Send + Sync {
    fn draw(&mut self, scene: &Scene) -> Result<()>;
}

impl<T: SceneRenderer + ?Sized> SceneRenderer for Box<T> {
    fn draw(&mut self, scene: &Scene) -> Result<()> {
        (**self).draw(scene)
    }
}

/// Discards every frame. Useful for headless runs that only need the simulation.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl SceneRenderer for NullRenderer {
    fn draw(&mut self, _scene: &Scene) -> Result<()> {
        Ok(())
    }
}
