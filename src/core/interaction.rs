use glam::{Vec2, Vec3};

use super::constants::{
    DRAG_ROTATION_SCALE, MAX_OFFSET_RADIUS, MAX_VELOCITY, MOVE_SPEED, ROTATION_SPEED,
    VELOCITY_GAIN,
};

/// Orientation (Euler XYZ, radians) and world position of the model root.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ModelPose {
    pub rotation: Vec3,
    pub position: Vec3,
}

/// Motion shared between the pointer handlers and the per-frame animator.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionState {
    /// Banked rotation velocity in radians per frame. `z` is never written.
    pub velocity: Vec3,
    pub target_offset: Vec2,
    pub current_offset: Vec2,
    /// Radians, kept in `[0, 2π)`.
    pub float_phase: f32,
}

impl MotionState {
    /// Add a drag delta into the banked velocity, clamping each axis.
    pub fn bank_velocity(&mut self, delta: Vec2) {
        let m = velocity_multiplier(delta);
        self.velocity.y += delta.x * m;
        self.velocity.x += delta.y * m;
        self.velocity.x = self.velocity.x.clamp(-MAX_VELOCITY, MAX_VELOCITY);
        self.velocity.y = self.velocity.y.clamp(-MAX_VELOCITY, MAX_VELOCITY);
    }

    /// Move the offset target by a drag delta. Screen y grows downward, world
    /// y upward.
    pub fn push_target(&mut self, delta: Vec2) {
        self.target_offset += Vec2::new(delta.x, -delta.y) * MOVE_SPEED;
        self.target_offset = clamp_to_disk(self.target_offset, MAX_OFFSET_RADIUS);
    }
}

/// Per-event velocity multiplier: faster pointer travel banks more spin.
#[inline]
pub fn velocity_multiplier(delta: Vec2) -> f32 {
    (delta.length() * VELOCITY_GAIN).min(MAX_VELOCITY)
}

/// Rescale `v` onto the circle of `radius` if it lies outside it.
#[inline]
pub fn clamp_to_disk(v: Vec2, radius: f32) -> Vec2 {
    let len = v.length();
    if len > radius {
        v * (radius / len)
    } else {
        v
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Engagement {
    #[default]
    Idle,
    Engaged,
}

/// Device-independent pointer input. Mouse and touch events are both mapped
/// onto this before reaching the session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerInput {
    Press(Vec2),
    Move(Vec2),
    Release,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Start,
    Move,
    End,
    Leave,
    Cancel,
}

impl PointerInput {
    pub fn from_mouse(phase: PointerPhase, pos: Vec2) -> Self {
        match phase {
            PointerPhase::Start => Self::Press(pos),
            PointerPhase::Move => Self::Move(pos),
            PointerPhase::End | PointerPhase::Leave | PointerPhase::Cancel => Self::Release,
        }
    }

    /// Only the first touch point is read; further fingers are ignored.
    /// Start and move events without any touch point map to nothing.
    pub fn from_touches(phase: PointerPhase, touches: &[Vec2]) -> Option<Self> {
        match phase {
            PointerPhase::Start => touches.first().map(|p| Self::Press(*p)),
            PointerPhase::Move => touches.first().map(|p| Self::Move(*p)),
            PointerPhase::End | PointerPhase::Leave | PointerPhase::Cancel => Some(Self::Release),
        }
    }
}

/// Pointer engagement state machine: `Idle -> Engaged -> Idle`.
#[derive(Clone, Copy, Debug, Default)]
pub struct InteractionState {
    engagement: Engagement,
    last_pointer: Vec2,
}

impl InteractionState {
    pub fn engagement(&self) -> Engagement {
        self.engagement
    }

    pub fn is_engaged(&self) -> bool {
        self.engagement == Engagement::Engaged
    }

    pub fn last_pointer(&self) -> Vec2 {
        self.last_pointer
    }

    /// Begin a gesture. Residual momentum from the previous gesture is
    /// cancelled.
    pub fn press(&mut self, pos: Vec2, motion: &mut MotionState) {
        self.engagement = Engagement::Engaged;
        self.last_pointer = pos;
        motion.velocity = Vec3::ZERO;
    }

    /// Apply a pointer move. Rotates the pose directly, banks velocity for
    /// later momentum and pushes the offset target. Returns the applied delta,
    /// or `None` when not engaged.
    pub fn drag(
        &mut self,
        pos: Vec2,
        motion: &mut MotionState,
        pose: &mut ModelPose,
    ) -> Option<Vec2> {
        if !self.is_engaged() {
            return None;
        }
        let delta = pos - self.last_pointer;
        let k = ROTATION_SPEED * DRAG_ROTATION_SCALE;
        pose.rotation.y += delta.x * k;
        pose.rotation.x += delta.y * k;
        motion.bank_velocity(delta);
        motion.push_target(delta);
        self.last_pointer = pos;
        Some(delta)
    }

    /// End the gesture. Velocity is kept so the model coasts.
    pub fn release(&mut self) {
        self.engagement = Engagement::Idle;
    }
}
