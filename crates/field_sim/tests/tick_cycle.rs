use std::sync::{Arc, Mutex};
use std::time::Duration;

use field_core::{Bounds, FieldConfig, Result, Scene};
use field_sim::{AnimationScheduler, SceneRenderer, SchedulerState, SharedBounds};

/// Renderer whose frames stay readable after the scheduler takes ownership
#[derive(Clone, Default)]
struct SharedRecorder(Arc<Mutex<Vec<Scene>>>);

impl SharedRecorder {
    fn frames(&self) -> Vec<Scene> {
        self.0.lock().map(|f| f.clone()).unwrap_or_default()
    }
}

impl SceneRenderer for SharedRecorder {
    fn draw(&mut self, scene: &Scene) -> Result<()> {
        if let Ok(mut frames) = self.0.lock() {
            frames.push(scene.clone());
        }
        Ok(())
    }
}

fn distance(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    let (dx, dy) = (ax - bx, ay - by);
    (dx * dx + dy * dy).sqrt()
}

#[test]
fn test_ten_seconds_of_animation_hold_invariants() {
    let recorder = SharedRecorder::default();
    let bounds = Bounds { width: 400.0, height: 300.0 };
    let config = FieldConfig {
        velocity_range: 3.0,
        ..FieldConfig::default().with_seed(2024)
    };
    let mut scheduler = AnimationScheduler::new(config, bounds, recorder.clone()).unwrap();
    scheduler.start().unwrap();

    // 60 Hz host frames for ten seconds
    let frame = Duration::from_micros(16_667);
    for _ in 0..600 {
        scheduler.advance(frame);
    }

    let frames = recorder.frames();
    assert!((195..=201).contains(&frames.len()), "got {} frames", frames.len());

    let first = &frames[0];
    for scene in &frames {
        assert_eq!(scene.particles.len(), 50);
        for (p, p0) in scene.particles.iter().zip(&first.particles) {
            assert!((0.0..=400.0).contains(&p.x) && (0.0..=300.0).contains(&p.y));
            assert_eq!((p.size, p.opacity), (p0.size, p0.opacity));
        }

        let close_pairs = (0..scene.particles.len())
            .flat_map(|i| ((i + 1)..scene.particles.len()).map(move |j| (i, j)))
            .filter(|&(i, j)| {
                let (a, b) = (scene.particles[i], scene.particles[j]);
                distance(a.x, a.y, b.x, b.y) < 100.0
            })
            .count();
        assert_eq!(scene.edges.len(), close_pairs);

        for line in &scene.edges {
            let d = distance(line.x1, line.y1, line.x2, line.y2);
            assert!(d < 100.0);
            assert!((line.opacity - 0.2 * (1.0 - d / 100.0)).abs() < 1e-4);
        }
    }
}

#[test]
fn test_resize_mid_animation_keeps_particles_inside() {
    let recorder = SharedRecorder::default();
    let viewport = SharedBounds::new(Bounds { width: 1920.0, height: 1080.0 });
    let config = FieldConfig::default().with_seed(5);
    let mut scheduler = AnimationScheduler::new(config, viewport.clone(), recorder.clone()).unwrap();
    scheduler.start().unwrap();

    let tick = Duration::from_millis(50);
    for _ in 0..10 {
        scheduler.advance(tick);
    }
    viewport.set(Bounds { width: 320.0, height: 240.0 });
    for _ in 0..10 {
        scheduler.advance(tick);
    }

    let frames = recorder.frames();
    assert_eq!(frames.len(), 20);
    for scene in &frames[10..] {
        assert!(scene
            .particles
            .iter()
            .all(|p| p.x <= 320.0 && p.y <= 240.0 && p.x >= 0.0 && p.y >= 0.0));
    }
}

#[test]
fn test_lifecycle_round_trip() {
    let recorder = SharedRecorder::default();
    let config = FieldConfig::default().with_seed(1);
    let mut scheduler =
        AnimationScheduler::new(config, Bounds { width: 800.0, height: 600.0 }, recorder.clone())
            .unwrap();

    scheduler.stop();
    scheduler.stop();
    assert_eq!(scheduler.state(), SchedulerState::Stopped);

    scheduler.start().unwrap();
    scheduler.start().unwrap();
    assert_eq!(scheduler.state(), SchedulerState::Running);
    assert!(scheduler.advance(Duration::from_millis(50)));

    scheduler.stop();
    assert!(!scheduler.advance(Duration::from_secs(1)));
    assert_eq!(recorder.frames().len(), 1);
}
