// src/environment/environment_tests.rs

use std::time::Instant;
use crate::assert_float_eq;
use crate::utils::errors::PhysicsError;
use crate::environment::PhysicsEnvironment;
use crate::objects::PhysicsObject;
use crate::vectors::Vector;
use crate::EARTH_GRAVITY;

fn object(name: &str, mass: f64, velocity: (f64, f64), position: (f64, f64)) -> PhysicsObject {
    PhysicsObject::new(
        name,
        mass,
        Vector::from_cartesian(velocity.0, velocity.1).unwrap(),
        position,
        Vec::new(),
        0.0,
    )
    .unwrap()
}

fn no_overlaps(
    _: crate::environment::ObjectId,
    _: (f64, f64),
    _: crate::environment::ObjectId,
    _: (f64, f64),
) -> bool {
    false
}

#[test]
fn test_environment_creation() {
    let env = PhysicsEnvironment::new("Room 1", vec![EARTH_GRAVITY]);
    assert_eq!(env.name(), "Room 1");
    assert_float_eq(env.time(), 0.0, 1e-12, None);
    assert_eq!(env.ambient_fields().len(), 1);
    assert_eq!(env.entity_count(), 0);
}

#[test]
fn test_advance_time_accumulates_deltas() {
    let mut env = PhysicsEnvironment::new("Clock", Vec::new());
    let deltas = [0.1, 0.0, 0.25, 0.5];

    let mut expected = 0.0;
    let mut previous = env.time();
    for delta in deltas {
        env.advance_time(delta).unwrap();
        expected += delta;
        assert!(env.time() >= previous, "clock must be non-decreasing");
        previous = env.time();
    }
    assert_float_eq(env.time(), expected, 1e-12, None);
}

#[test]
fn test_negative_or_non_finite_delta_is_rejected() {
    let mut env = PhysicsEnvironment::new("Clock", Vec::new());

    assert_eq!(env.advance_time(-0.5).unwrap_err(), PhysicsError::InvalidTime);
    assert_eq!(env.advance_time(f64::NAN).unwrap_err(), PhysicsError::InvalidTime);
    assert_eq!(
        env.step(-1.0, false, no_overlaps).unwrap_err(),
        PhysicsError::InvalidTime
    );
    // A rejected delta leaves the clock untouched
    assert_float_eq(env.time(), 0.0, 1e-12, None);
}

#[test]
fn test_registry_accessors() {
    let mut env = PhysicsEnvironment::new("Scene", vec![EARTH_GRAVITY]);
    let ball = env.register_object(object("Ball", 1.0, (3.0, 0.0), (0.0, 10.0)));
    let wall = env.register_scenery("Wall", (5.0, 0.0)).unwrap();

    assert_eq!(env.entity_count(), 2);
    assert_eq!(env.object(ball).unwrap().name(), "Ball");
    assert!(env.object(wall).is_none());

    assert_eq!(env.position_of(wall), Some((5.0, 0.0)));
    assert!(env.velocity_of(wall).is_none());
    assert!(env.momentum_of(wall).is_none());

    let (x, y) = env.position_of(ball).unwrap();
    assert_float_eq(x, 0.0, 1e-9, None);
    assert_float_eq(y, 10.0, 1e-9, None);
}

#[test]
fn test_scenery_position_is_rejected_when_non_finite() {
    let mut env = PhysicsEnvironment::new("Scene", Vec::new());
    assert_eq!(
        env.register_scenery("Broken", (f64::INFINITY, 0.0)).unwrap_err(),
        PhysicsError::NonFiniteValue
    );
}

#[test]
fn test_step_recomputes_derived_state() {
    let mut env = PhysicsEnvironment::new(
        "Scene",
        vec![Vector::from_cartesian(0.0, -9.8).unwrap()],
    );
    let ball = env.register_object(object("Ball", 1.0, (2.0, 0.0), (0.0, 100.0)));

    env.step(1.0, false, no_overlaps).unwrap();

    let (x, y) = env.position_of(ball).unwrap();
    assert_float_eq(x, 2.0, 1e-9, None);
    assert_float_eq(y, 100.0 - 4.9, 1e-9, None);

    let (v_x, v_y) = env.velocity_of(ball).unwrap().to_cartesian();
    assert_float_eq(v_x, 2.0, 1e-9, None);
    assert_float_eq(v_y, -9.8, 1e-9, None);
}

#[test]
fn test_step_resolves_collision_and_re_anchors() {
    let mut env = PhysicsEnvironment::new("Scene", Vec::new());
    let a = env.register_object(object("A", 1.0, (1.0, 0.0), (0.0, 0.0)));
    let b = env.register_object(object("B", 1.0, (-1.0, 0.0), (1.0, 0.0)));

    // Footprints of radius 0.3: overlap once the centers are 0.5 apart.
    let overlap = |_: crate::environment::ObjectId,
                   (ax, ay): (f64, f64),
                   _: crate::environment::ObjectId,
                   (bx, by): (f64, f64)| (ax - bx).hypot(ay - by) < 0.6;

    env.step(0.25, false, overlap).unwrap();

    // Equal masses head-on: along-axis velocities are exchanged.
    let (v_a_x, _) = env.velocity_of(a).unwrap().to_cartesian();
    let (v_b_x, _) = env.velocity_of(b).unwrap().to_cartesian();
    assert_float_eq(v_a_x, -1.0, 1e-9, None);
    assert_float_eq(v_b_x, 1.0, 1e-9, None);

    // Both trajectories are re-anchored at the impact instant.
    assert_float_eq(env.object(a).unwrap().init_time(), 0.25, 1e-12, None);
    assert_float_eq(env.object(b).unwrap().init_time(), 0.25, 1e-12, None);
    let (x, _) = env.position_of(a).unwrap();
    assert_float_eq(x, 0.25, 1e-9, None);

    // The objects now separate under their exchanged velocities.
    env.step(0.25, false, no_overlaps).unwrap();
    let (x_a, _) = env.position_of(a).unwrap();
    let (x_b, _) = env.position_of(b).unwrap();
    assert_float_eq(x_a, 0.0, 1e-9, None);
    assert_float_eq(x_b, 1.0, 1e-9, None);
}

#[test]
fn test_overlap_predicate_sees_each_dynamic_pair_once() {
    let mut env = PhysicsEnvironment::new("Scene", Vec::new());
    env.register_object(object("A", 1.0, (0.0, 0.0), (0.0, 0.0)));
    env.register_object(object("B", 1.0, (0.0, 0.0), (10.0, 0.0)));
    env.register_object(object("C", 1.0, (0.0, 0.0), (20.0, 0.0)));
    env.register_scenery("Wall", (30.0, 0.0)).unwrap();

    let mut calls = 0;
    env.step(0.1, false, |_, _, _, _| {
        calls += 1;
        false
    })
    .unwrap();

    // Three dynamic entities, scenery excluded: C(3, 2) pairs
    assert_eq!(calls, 3);
}

#[test]
fn test_collision_clears_movement_mark() {
    let mut env = PhysicsEnvironment::new("Scene", Vec::new());
    let a = env.register_object(object("A", 1.0, (1.0, 0.0), (0.0, 0.0)));
    let b = env.register_object(object("B", 1.0, (-1.0, 0.0), (1.0, 0.0)));

    env.step(0.25, false, |_, pa, _, pb| {
        (pa.0 - pb.0).hypot(pa.1 - pb.1) < 0.6
    })
    .unwrap();

    // The mark was reset to the impact position, so a movement query right
    // after the colliding step reports no displacement.
    let (dx, dy) = env.movement_of(a).unwrap();
    assert_float_eq(dx, 0.0, 1e-9, None);
    assert_float_eq(dy, 0.0, 1e-9, None);
    let (dx, _) = env.movement_of(b).unwrap();
    assert_float_eq(dx, 0.0, 1e-9, None);
}

#[test]
fn test_movement_of_tracks_relative_motion() {
    let mut env = PhysicsEnvironment::new("Scene", Vec::new());
    let ball = env.register_object(object("Ball", 1.0, (2.0, 1.0), (0.0, 0.0)));

    env.step(1.0, false, no_overlaps).unwrap();
    let (dx, dy) = env.movement_of(ball).unwrap();
    assert_float_eq(dx, 2.0, 1e-9, None);
    assert_float_eq(dy, 1.0, 1e-9, None);

    env.step(0.5, false, no_overlaps).unwrap();
    let (dx, dy) = env.movement_of(ball).unwrap();
    assert_float_eq(dx, 1.0, 1e-9, None);
    assert_float_eq(dy, 0.5, 1e-9, None);
}

#[test]
fn test_multiple_overlaps_last_resolved_pair_wins() {
    let mut env = PhysicsEnvironment::new("Scene", Vec::new());
    let a = env.register_object(object("A", 1.0, (1.0, 0.0), (0.0, 0.0)));
    let b = env.register_object(object("B", 1.0, (2.0, 0.0), (1.0, 0.0)));
    let c = env.register_object(object("C", 1.0, (3.0, 0.0), (2.0, 0.0)));

    // Every pair overlaps. Pairs resolve in registry order against the
    // pre-step snapshot; a later pair overwrites an earlier one for the
    // shared object, so the exchanged velocities come from (A, C) for A and
    // from (B, C) for B and C.
    env.step(0.0, false, |_, _, _, _| true).unwrap();

    let (v_a_x, _) = env.velocity_of(a).unwrap().to_cartesian();
    let (v_b_x, _) = env.velocity_of(b).unwrap().to_cartesian();
    let (v_c_x, _) = env.velocity_of(c).unwrap().to_cartesian();
    assert_float_eq(v_a_x, 3.0, 1e-9, Some("A keeps its exchange with C"));
    assert_float_eq(v_b_x, 3.0, 1e-9, Some("B keeps its exchange with C"));
    assert_float_eq(v_c_x, 2.0, 1e-9, Some("C keeps its exchange with B"));
}

#[test]
fn test_realtime_step_with_unpaceable_delta_does_not_panic() {
    let mut env = PhysicsEnvironment::new("Scene", Vec::new());
    let ball = env.register_object(object("Ball", 1.0, (1.0, 0.0), (0.0, 0.0)));

    // Finite but far beyond Duration's range: pacing is skipped, the step
    // still completes and advances the clock.
    env.step(1e300, true, no_overlaps).unwrap();
    assert_float_eq(env.time(), 1e300, 1e285, None);
    assert!(env.position_of(ball).is_some());
}

#[test]
fn test_realtime_step_paces_execution() {
    let mut env = PhysicsEnvironment::new("Scene", Vec::new());
    env.register_object(object("Ball", 1.0, (1.0, 0.0), (0.0, 0.0)));

    let started = Instant::now();
    env.step(0.05, true, no_overlaps).unwrap();
    // sleep guarantees at least the requested duration
    assert!(started.elapsed().as_secs_f64() >= 0.04);
}
