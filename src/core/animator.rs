use glam::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

use super::constants::{
    FLOAT_AMPLITUDE, FLOAT_PHASE_STEP, IDLE_ROTATION_SPEED, IDLE_VELOCITY_THRESHOLD,
    MOMENTUM_DECAY, POSITION_LERP,
};
use super::interaction::{ModelPose, MotionState};

/// What a single animator step did, mostly for logging and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimatorStep {
    pub momentum_applied: bool,
    pub idle_rotation_applied: bool,
}

/// Per-frame idle animation: offset snap-back, momentum decay, idle tumble
/// and the vertical float.
#[derive(Clone, Copy, Debug)]
pub struct IdleAnimator {
    axis: Vec3,
}

impl IdleAnimator {
    /// Build with a fixed tumble axis. Falls back to +Y for a zero vector.
    pub fn new(axis: Vec3) -> Self {
        let axis = axis.try_normalize().unwrap_or(Vec3::Y);
        Self { axis }
    }

    /// Pick a uniformly distributed tumble axis by rejection sampling the
    /// unit ball.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let v = Vec3::new(
                rng.gen_range(-1.0..=1.0),
                rng.gen_range(-1.0..=1.0),
                rng.gen_range(-1.0..=1.0),
            );
            let len_sq = v.length_squared();
            if len_sq > 1e-6 && len_sq <= 1.0 {
                return Self::new(v);
            }
        }
    }

    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    /// Advance one frame. `engaged` gates snap-back and momentum; following
    /// the target and the float run every frame.
    pub fn step(
        &self,
        engaged: bool,
        motion: &mut MotionState,
        pose: &mut ModelPose,
    ) -> AnimatorStep {
        let mut out = AnimatorStep::default();

        if !engaged {
            motion.target_offset = motion.target_offset.lerp(Vec2::ZERO, POSITION_LERP);
        }
        motion.current_offset = motion.current_offset.lerp(motion.target_offset, POSITION_LERP);
        pose.position = motion.current_offset.extend(0.0);

        if !engaged {
            pose.rotation.x += motion.velocity.x;
            pose.rotation.y += motion.velocity.y;
            motion.velocity *= MOMENTUM_DECAY;
            out.momentum_applied = true;

            // Additive with whatever momentum is left this frame.
            if motion.velocity.length() < IDLE_VELOCITY_THRESHOLD {
                pose.rotation += self.axis * IDLE_ROTATION_SPEED;
                out.idle_rotation_applied = true;
            }
        }

        // Wrapped so the step survives long sessions in f32.
        motion.float_phase = (motion.float_phase + FLOAT_PHASE_STEP).rem_euclid(TAU);
        pose.position.y = motion.current_offset.y + motion.float_phase.sin() * FLOAT_AMPLITUDE;

        out
    }
}
