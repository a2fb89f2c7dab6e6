use field_core::{Bounds, Particle, ParticleField, Result};

/// Advance every particle by one tick against the current viewport.
///
/// Particle count, order, size and opacity are untouched.
pub fn step(field: &mut ParticleField, bounds: Bounds) -> Result<()> {
    bounds.validate()?;
    for p in field.particles_mut() {
        step_particle(p, bounds);
    }
    Ok(())
}

/// Move one particle, reflecting and then wrapping on each axis independently.
pub fn step_particle(p: &mut Particle, bounds: Bounds) {
    let extents = [bounds.width, bounds.height];
    for axis in 0..2 {
        let (pos, vel) = advance_axis(p.position[axis], p.velocity[axis], extents[axis]);
        p.position[axis] = pos;
        p.velocity[axis] = vel;
    }
}

/// Returns the new (position, velocity) on a single axis.
///
/// A tentative coordinate outside `[0, extent]` flips the velocity, and the
/// coordinate itself is wrapped to the opposite edge in the same tick. Fast
/// particles therefore both bounce and jump across the viewport; this matches
/// the established visual behaviour and is kept as is.
fn advance_axis(pos: f32, vel: f32, extent: f32) -> (f32, f32) {
    let next = pos + vel;
    let out_of_bounds = next < 0.0 || next > extent;
    let vel = if out_of_bounds { -vel } else { vel };

    let next = if next < 0.0 {
        extent
    } else if next > extent {
        0.0
    } else {
        next
    };

    (next, vel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spawn::create_seeded;

    fn viewport() -> Bounds {
        Bounds { width: 800.0, height: 600.0 }
    }

    fn single(pos: [f32; 2], vel: [f32; 2]) -> ParticleField {
        ParticleField::from_particles(vec![Particle::new(pos, vel, 2.0, 0.3)])
    }

    #[test]
    fn test_interior_particle_moves_by_velocity() {
        let mut field = single([100.0, 200.0], [0.25, -0.1]);
        step(&mut field, viewport()).unwrap();
        let p = field.particles()[0];
        assert!((p.x() - 100.25).abs() < 1e-5);
        assert!((p.y() - 199.9).abs() < 1e-4);
        assert_eq!(p.velocity, [0.25, -0.1]);
    }

    #[test]
    fn test_right_edge_reflects_and_wraps() {
        let mut field = single([799.0, 300.0], [5.0, 0.0]);
        step(&mut field, viewport()).unwrap();
        let p = field.particles()[0];
        assert_eq!(p.velocity[0], -5.0);
        assert!((0.0..=800.0).contains(&p.x()));
        assert_eq!(p.x(), 0.0);
        assert_eq!(p.y(), 300.0);
    }

    #[test]
    fn test_top_edge_reflects_and_wraps() {
        let mut field = single([50.0, 0.1], [0.0, -0.2]);
        step(&mut field, viewport()).unwrap();
        let p = field.particles()[0];
        assert_eq!(p.velocity[1], 0.2);
        assert_eq!(p.y(), 600.0);
    }

    #[test]
    fn test_landing_exactly_on_edge_is_inside() {
        let mut field = single([799.0, 300.0], [1.0, 0.0]);
        step(&mut field, viewport()).unwrap();
        let p = field.particles()[0];
        assert_eq!(p.x(), 800.0);
        assert_eq!(p.velocity[0], 1.0);
    }

    #[test]
    fn test_corner_reflects_both_axes() {
        let mut field = single([0.1, 0.1], [-1.0, -1.0]);
        step(&mut field, viewport()).unwrap();
        let p = field.particles()[0];
        assert_eq!(p.velocity, [1.0, 1.0]);
        assert_eq!(p.position, [800.0, 600.0]);
    }

    #[test]
    fn test_positions_stay_in_bounds_over_many_ticks() {
        let mut field = create_seeded(100, viewport(), 11).unwrap();
        let before: Vec<(f32, f32)> = field.iter().map(|p| (p.size(), p.opacity())).collect();

        for _ in 0..5_000 {
            step(&mut field, viewport()).unwrap();
            assert!(field.iter().all(|p| viewport().contains(p.position)));
        }

        let after: Vec<(f32, f32)> = field.iter().map(|p| (p.size(), p.opacity())).collect();
        assert_eq!(before, after);
        assert_eq!(field.len(), 100);
    }

    #[test]
    fn test_shrinking_viewport_pulls_particles_back_in() {
        let mut field = create_seeded(50, viewport(), 5).unwrap();
        let small = Bounds { width: 200.0, height: 150.0 };
        step(&mut field, small).unwrap();
        assert!(field.iter().all(|p| small.contains(p.position)));
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        let mut field = single([1.0, 1.0], [0.1, 0.1]);
        assert!(step(&mut field, Bounds { width: 0.0, height: 10.0 }).is_err());
        assert_eq!(field.particles()[0].position, [1.0, 1.0]);
    }

    #[test]
    fn test_empty_field_steps() {
        let mut field = ParticleField::empty();
        step(&mut field, viewport()).unwrap();
        assert!(field.is_empty());
    }
}
