use std::sync::{Arc, PoisonError, RwLock};

use field_core::Bounds;

/// Where the scheduler reads the current viewport size. Polled once per tick.
pub trait BoundsSource: Send + Sync {
    fn current(&self) -> Bounds;
}

impl BoundsSource for Bounds {
    fn current(&self) -> Bounds {
        *self
    }
}

impl<T: BoundsSource + ?Sized> BoundsSource for Box<T> {
    fn current(&self) -> Bounds {
        (**self).current()
    }
}

/// Cloneable viewport handle: the host writes on resize, the scheduler reads on tick.
#[derive(Debug, Clone)]
pub struct SharedBounds(Arc<RwLock<Bounds>>);

impl SharedBounds {
    pub fn new(bounds: Bounds) -> Self {
        Self(Arc::new(RwLock::new(bounds)))
    }

    pub fn set(&self, bounds: Bounds) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = bounds;
    }
}

impl BoundsSource for SharedBounds {
    fn current(&self) -> Bounds {
        *self.0.read().unwrap_or_else(PoisonError::into_inner)
    }
}
