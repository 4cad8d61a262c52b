use std::f32::consts::PI;

use backdrop_core::arena::RingArena;
use backdrop_core::config::{RingConfig, TrailConfig};
use backdrop_core::ring::RingField;
use backdrop_core::surface::{DrawCommand, RecordingSurface};
use backdrop_core::theme::Palette;
use backdrop_core::trail::{ParticleField, POINTER_TRACKER};
use glam::Vec2;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn field() -> ParticleField {
    ParticleField::new(TrailConfig::default(), 42)
}

/// Ten horizontal moves of 10px, 25ms apart, starting from a tracked origin.
fn sweep(field: &mut ParticleField) {
    field.track(POINTER_TRACKER, Vec2::ZERO);
    for i in 1..=10 {
        field.on_move(POINTER_TRACKER, Vec2::new(i as f32 * 10.0, 0.0), i as f64 * 25.0);
    }
}

// ---------------------------------------------------------------------------
// RingArena
// ---------------------------------------------------------------------------

#[test]
fn test_arena_overwrites_oldest_when_full() {
    let mut arena = RingArena::with_capacity(3);
    for v in 0..3 {
        arena.insert(v);
    }
    assert_eq!(arena.len(), 3);

    let slot = arena.insert(99);
    assert_eq!(slot, 0, "full arena should reuse the oldest slot");
    assert_eq!(arena.len(), 3);
    assert_eq!(arena.get(0), Some(&99));
}

#[test]
fn test_arena_reuses_freed_slots() {
    let mut arena = RingArena::with_capacity(4);
    for v in 0..4 {
        arena.insert(v);
    }
    arena.retain_mut(|v| *v % 2 == 0);
    assert_eq!(arena.len(), 2);

    let slot = arena.insert(7);
    assert!(slot == 1 || slot == 3, "insert landed in occupied slot {slot}");
    assert_eq!(arena.len(), 3);
    assert_eq!(arena.iter().copied().collect::<Vec<_>>().len(), 3);
}

#[test]
fn test_arena_evicts_earliest_insert_after_reuse() {
    let mut arena = RingArena::with_capacity(3);
    for v in ["a", "b", "c"] {
        arena.insert(v);
    }
    arena.retain_mut(|v| *v != "b");
    arena.insert("d");
    arena.insert("e");

    let mut left: Vec<_> = arena.iter().copied().collect();
    left.sort_unstable();
    assert_eq!(left, vec!["c", "d", "e"], "a was the oldest entry");

    arena.insert("f");
    let mut left: Vec<_> = arena.iter().copied().collect();
    left.sort_unstable();
    assert_eq!(left, vec!["d", "e", "f"]);
}

#[test]
fn test_arena_zero_capacity_still_holds_one() {
    let mut arena = RingArena::with_capacity(0);
    assert_eq!(arena.capacity(), 1);
    arena.insert("a");
    arena.insert("b");
    assert_eq!(arena.iter().copied().collect::<Vec<_>>(), vec!["b"]);
    arena.clear();
    assert!(arena.is_empty());
}

// ---------------------------------------------------------------------------
// ParticleField
// ---------------------------------------------------------------------------

#[test]
fn test_sweep_spawns_one_particle_per_move() {
    let mut f = field();
    sweep(&mut f);
    assert_eq!(f.len(), 10, "each 25ms, 10px move should spawn");

    for p in f.particles() {
        assert!(
            (p.angle - PI).abs() <= 0.25 + 1e-5,
            "angle {} should point back along the motion",
            p.angle
        );
        assert!(p.size >= 4.0 && p.size <= 10.0, "size {} out of range", p.size);
        assert!(
            p.lifetime >= 500.0 && p.lifetime <= 1000.0,
            "lifetime {} out of range",
            p.lifetime
        );
    }
}

#[test]
fn test_all_particles_expire_after_max_lifetime() {
    let mut f = field();
    sweep(&mut f);
    f.tick(250.0 + 1000.0);
    assert!(f.is_empty(), "{} particles survived their lifetime", f.len());
}

#[test]
fn test_first_move_without_tracking_spawns_nothing() {
    let mut f = field();
    assert!(!f.on_move(POINTER_TRACKER, Vec2::new(50.0, 50.0), 0.0));
    assert!(f.is_empty());
    assert_eq!(f.tracked(POINTER_TRACKER), Some(Vec2::new(50.0, 50.0)));
}

#[test]
fn test_interval_gate() {
    let mut f = field();
    f.track(POINTER_TRACKER, Vec2::ZERO);
    assert!(f.on_move(POINTER_TRACKER, Vec2::new(10.0, 0.0), 0.0));
    assert!(
        !f.on_move(POINTER_TRACKER, Vec2::new(20.0, 0.0), 10.0),
        "moves within 20ms of the last spawn must not spawn"
    );
    // The gated move still advanced the tracked position.
    assert_eq!(f.tracked(POINTER_TRACKER), Some(Vec2::new(20.0, 0.0)));
    assert!(f.on_move(POINTER_TRACKER, Vec2::new(30.0, 0.0), 20.0));
    assert_eq!(f.len(), 2);
}

#[test]
fn test_distance_gate() {
    let mut f = field();
    f.track(POINTER_TRACKER, Vec2::ZERO);
    assert!(
        !f.on_move(POINTER_TRACKER, Vec2::new(5.0, 0.0), 100.0),
        "exactly 5px must not spawn"
    );
    assert!(f.on_move(POINTER_TRACKER, Vec2::new(10.5, 0.0), 200.0));
    assert_eq!(f.len(), 1);
}

#[test]
fn test_burst_checks_interval_once_per_event() {
    let mut f = field();
    f.track(1, Vec2::ZERO);
    f.track(2, Vec2::new(0.0, 50.0));
    f.track(3, Vec2::new(0.0, 90.0));

    let samples = [
        (1, Vec2::new(10.0, 0.0)),
        (2, Vec2::new(10.0, 50.0)),
        // Too short a hop: skipped, but still tracked.
        (3, Vec2::new(2.0, 90.0)),
    ];
    assert_eq!(f.burst(&samples, 0.0), 2);
    assert_eq!(f.tracked(3), Some(Vec2::new(2.0, 90.0)));

    let next = [(1, Vec2::new(20.0, 0.0)), (2, Vec2::new(20.0, 50.0))];
    assert_eq!(f.burst(&next, 10.0), 0, "whole event falls inside the 20ms gate");
    assert_eq!(f.tracked(1), Some(Vec2::new(20.0, 0.0)));

    let later = [(1, Vec2::new(30.0, 0.0)), (2, Vec2::new(30.0, 50.0))];
    assert_eq!(f.burst(&later, 20.0), 2);
    assert_eq!(f.len(), 4);
}

#[test]
fn test_tick_drifts_away_from_motion() {
    let mut f = field();
    f.track(POINTER_TRACKER, Vec2::ZERO);
    f.on_move(POINTER_TRACKER, Vec2::new(100.0, 0.0), 0.0);
    let before = f.particles().next().map(|p| p.position).unwrap();

    f.tick(16.0);
    let after = f.particles().next().map(|p| p.position).unwrap();
    assert!(
        after.x < before.x,
        "particle should drift backwards: {before:?} -> {after:?}"
    );
    assert!((after - before).length() <= 1.2 + 1e-4);
}

#[test]
fn test_capacity_caps_live_particles() {
    let config = TrailConfig {
        capacity: 4,
        ..TrailConfig::default()
    };
    let mut f = ParticleField::new(config, 7);
    f.track(POINTER_TRACKER, Vec2::ZERO);
    for i in 1..=8 {
        f.on_move(POINTER_TRACKER, Vec2::new(i as f32 * 10.0, 0.0), i as f64 * 30.0);
    }
    assert_eq!(f.len(), 4);
    // The newest spawn always survives.
    assert_eq!(f.latest_for(POINTER_TRACKER).map(|p| p.created), Some(240.0));
}

#[test]
fn test_instances_fade_and_shrink() {
    let mut f = field();
    f.track(POINTER_TRACKER, Vec2::ZERO);
    f.on_move(POINTER_TRACKER, Vec2::new(10.0, 0.0), 0.0);
    let p = *f.particles().next().unwrap();

    let fresh: Vec<_> = f.instances(0.0).collect();
    assert_eq!(fresh.len(), 1);
    assert!((fresh[0].opacity - 1.0).abs() < 1e-6);
    assert!((fresh[0].size - p.size).abs() < 1e-5);

    let half = f.instances(p.lifetime * 0.5).next().unwrap();
    assert!((half.opacity - 0.5).abs() < 1e-3, "opacity {}", half.opacity);
    assert!(half.size < p.size);

    assert_eq!(f.instances(p.lifetime).count(), 0);
}

#[test]
fn test_release_forgets_tracker() {
    let mut f = field();
    f.track(3, Vec2::new(1.0, 1.0));
    f.release(3);
    assert_eq!(f.tracked(3), None);
}

#[test]
fn test_draw_uses_current_palette() {
    let mut f = field();
    sweep(&mut f);
    let mut surface = RecordingSurface::new(800, 600);
    f.draw(&mut surface, &Palette::LIGHT, 250.0);

    assert_eq!(surface.circles(), 10);
    for cmd in &surface.commands {
        if let DrawCommand::FillCircle { color, .. } = cmd {
            assert_eq!(
                (color.r, color.g, color.b),
                (Palette::LIGHT.primary.r, Palette::LIGHT.primary.g, Palette::LIGHT.primary.b)
            );
        }
    }
}

// ---------------------------------------------------------------------------
// RingField
// ---------------------------------------------------------------------------

#[test]
fn test_ring_lives_for_its_lifetime() {
    let mut rings = RingField::new(RingConfig::default());
    rings.spawn(Vec2::new(10.0, 10.0), 0.0);

    rings.tick(599.0);
    assert_eq!(rings.len(), 1);
    rings.tick(600.0);
    assert!(rings.is_empty(), "ring should expire at 600ms");
}

#[test]
fn test_ring_grows_and_fades() {
    let mut rings = RingField::new(RingConfig::default());
    rings.spawn(Vec2::ZERO, 0.0);

    let stroke = |now: f64| {
        let mut surface = RecordingSurface::new(100, 100);
        rings.draw(&mut surface, &Palette::DARK, now);
        match surface.commands.first() {
            Some(DrawCommand::StrokeCircle { radius, width, color, .. }) => {
                (*radius, *width, color.a)
            }
            other => panic!("expected a stroked circle, got {other:?}"),
        }
    };

    let (r0, w0, a0) = stroke(0.0);
    let (r1, w1, a1) = stroke(300.0);
    assert!(r1 > r0, "ring should expand: {r0} -> {r1}");
    assert!(w1 < w0, "border should thin: {w0} -> {w1}");
    assert!(a1 < a0 && (a0 - 1.0).abs() < 1e-6);
}

#[test]
fn test_translucent_primary_keeps_its_alpha() {
    let palette = Palette {
        primary: Palette::DARK.primary.with_alpha(0.5),
        ..Palette::DARK
    };

    let mut rings = RingField::new(RingConfig::default());
    rings.spawn(Vec2::ZERO, 0.0);
    let mut surface = RecordingSurface::new(100, 100);
    rings.draw(&mut surface, &palette, 0.0);
    match surface.commands.first() {
        Some(DrawCommand::StrokeCircle { color, .. }) => {
            assert!((color.a - 0.5).abs() < 1e-6, "ring alpha {}", color.a)
        }
        other => panic!("expected a stroked circle, got {other:?}"),
    }

    let mut f = field();
    f.track(POINTER_TRACKER, Vec2::ZERO);
    f.on_move(POINTER_TRACKER, Vec2::new(10.0, 0.0), 0.0);
    let mut surface = RecordingSurface::new(100, 100);
    f.draw(&mut surface, &palette, 0.0);
    match surface.commands.first() {
        Some(DrawCommand::FillCircle { color, .. }) => {
            assert!((color.a - 0.5).abs() < 1e-6, "particle alpha {}", color.a)
        }
        other => panic!("expected a filled circle, got {other:?}"),
    }
}
