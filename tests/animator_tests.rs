// Host-side tests for the per-frame idle animator.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod interaction {
        include!("../src/core/interaction.rs");
    }
    pub mod animator {
        include!("../src/core/animator.rs");
    }
}

use crate::core::animator::*;
use crate::core::constants::*;
use crate::core::interaction::*;
use glam::{Vec2, Vec3};
use rand::SeedableRng;

fn saturated_motion() -> MotionState {
    MotionState {
        velocity: Vec3::new(MAX_VELOCITY, MAX_VELOCITY, 0.0),
        ..Default::default()
    }
}

#[test]
fn momentum_decays_monotonically_after_release() {
    let animator = IdleAnimator::new(Vec3::Y);
    let mut motion = saturated_motion();
    let mut pose = ModelPose::default();

    let mut prev = motion.velocity.length();
    for _ in 0..300 {
        let step = animator.step(false, &mut motion, &mut pose);
        assert!(step.momentum_applied);
        let now = motion.velocity.length();
        assert!(now < prev);
        prev = now;
    }
}

#[test]
fn idle_rotation_starts_once_velocity_drops_below_threshold() {
    let animator = IdleAnimator::new(Vec3::X);
    let mut motion = saturated_motion();
    let mut pose = ModelPose::default();

    let mut first_idle = None;
    for frame in 1..=400 {
        let step = animator.step(false, &mut motion, &mut pose);
        if step.idle_rotation_applied {
            first_idle = Some(frame);
            break;
        }
    }
    // ceil(ln(0.001 / (0.05 * sqrt 2)) / ln 0.98) = 211
    let frame = first_idle.expect("idle rotation never started");
    assert!((210..=212).contains(&frame), "started at frame {frame}");
}

#[test]
fn engaged_frames_skip_momentum_and_snap_back() {
    let animator = IdleAnimator::new(Vec3::Y);
    let mut motion = MotionState {
        velocity: Vec3::new(0.02, 0.01, 0.0),
        target_offset: Vec2::new(2.0, 0.0),
        ..Default::default()
    };
    let mut pose = ModelPose::default();

    let step = animator.step(true, &mut motion, &mut pose);
    assert_eq!(step, AnimatorStep::default());
    assert_eq!(motion.velocity, Vec3::new(0.02, 0.01, 0.0));
    assert_eq!(motion.target_offset, Vec2::new(2.0, 0.0));
    assert_eq!(pose.rotation, Vec3::ZERO);
    // The offset still follows the target while held.
    assert!((motion.current_offset.x - 2.0 * POSITION_LERP).abs() < 1e-6);
}

#[test]
fn offset_returns_to_center_after_release() {
    let animator = IdleAnimator::new(Vec3::Z);
    let mut motion = MotionState {
        target_offset: Vec2::new(MAX_OFFSET_RADIUS, 0.0),
        current_offset: Vec2::new(MAX_OFFSET_RADIUS, 0.0),
        ..Default::default()
    };
    let mut pose = ModelPose::default();

    for _ in 0..600 {
        animator.step(false, &mut motion, &mut pose);
    }
    assert!(motion.target_offset.length() < 1e-3);
    assert!(motion.current_offset.length() < 1e-2);
    assert!(pose.position.x.abs() < 1e-2);
}

#[test]
fn float_bobs_around_the_offset() {
    let animator = IdleAnimator::new(Vec3::Y);
    let mut motion = MotionState::default();
    let mut pose = ModelPose::default();

    animator.step(false, &mut motion, &mut pose);
    assert!((motion.float_phase - FLOAT_PHASE_STEP).abs() < 1e-6);
    let expected = FLOAT_PHASE_STEP.sin() * FLOAT_AMPLITUDE;
    assert!((pose.position.y - expected).abs() < 1e-6);
    assert_eq!(pose.position.z, 0.0);

    for _ in 0..1000 {
        animator.step(false, &mut motion, &mut pose);
        assert!(pose.position.y.abs() <= FLOAT_AMPLITUDE + 1e-5);
    }
}

#[test]
fn still_model_tumbles_along_the_idle_axis() {
    let axis = Vec3::new(1.0, 2.0, 2.0);
    let animator = IdleAnimator::new(axis);
    let mut motion = MotionState::default();
    let mut pose = ModelPose::default();

    let step = animator.step(false, &mut motion, &mut pose);
    assert!(step.idle_rotation_applied);
    let expected = axis / 3.0 * IDLE_ROTATION_SPEED;
    assert!((pose.rotation - expected).length() < 1e-6);
}

#[test]
fn idle_axis_is_normalized() {
    assert_eq!(IdleAnimator::new(Vec3::ZERO).axis(), Vec3::Y);
    assert!((IdleAnimator::new(Vec3::new(0.0, 0.0, 5.0)).axis() - Vec3::Z).length() < 1e-6);

    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let axis = IdleAnimator::random(&mut rng).axis();
        assert!((axis.length() - 1.0).abs() < 1e-5);
    }
}

#[test]
fn float_keeps_advancing_from_a_huge_phase() {
    use std::f32::consts::TAU;
    let animator = IdleAnimator::new(Vec3::Y);
    let mut motion = MotionState {
        float_phase: 524_288.0,
        ..Default::default()
    };
    let mut pose = ModelPose::default();

    animator.step(false, &mut motion, &mut pose);
    let mut prev = motion.float_phase;
    assert!((0.0..=TAU).contains(&prev));
    for _ in 0..100 {
        animator.step(false, &mut motion, &mut pose);
        assert!((0.0..=TAU).contains(&motion.float_phase));
        let step = (motion.float_phase - prev).rem_euclid(TAU);
        assert!((step - FLOAT_PHASE_STEP).abs() < 1e-4);
        prev = motion.float_phase;
    }
}

#[test]
fn float_phase_wraps_past_a_full_turn() {
    use std::f32::consts::TAU;
    let animator = IdleAnimator::new(Vec3::Y);
    let mut motion = MotionState {
        float_phase: TAU - 0.01,
        ..Default::default()
    };
    let mut pose = ModelPose::default();
    animator.step(false, &mut motion, &mut pose);
    assert!((motion.float_phase - (FLOAT_PHASE_STEP - 0.01)).abs() < 1e-5);
    assert!((pose.position.y - motion.float_phase.sin() * FLOAT_AMPLITUDE).abs() < 1e-6);
}
