use glam::{Mat4, Vec2};

use super::animator::{AnimatorStep, IdleAnimator};
use super::interaction::{InteractionState, ModelPose, MotionState, PointerInput};
use super::model::{model_matrix, normal_matrix, ModelFit};
use super::tint::RainbowTint;
use super::viewport::{OrthoCamera, Viewport};

/// The model once it has loaded: its fit and the animated pose.
#[derive(Clone, Copy, Debug)]
pub struct LoadedModel {
    pub fit: ModelFit,
    pub pose: ModelPose,
}

/// Background uniforms for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackgroundFrame {
    /// Seconds since startup; reduced to shader angles at upload.
    pub time: f64,
    pub resolution: [f32; 3],
}

/// Values written into every mesh's uniforms for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelFrame {
    pub transform: Mat4,
    pub normal_matrix: Mat4,
    pub tint_time: f32,
    pub resolution: [f32; 3],
    pub step: AnimatorStep,
}

/// Everything the renderer needs to draw one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameOutput {
    pub view_proj: Mat4,
    pub background: BackgroundFrame,
    pub model: Option<ModelFrame>,
}

/// All mutable viewer state, owned by the frame driver and shared with the
/// input handlers. Handlers only mutate; [`ViewerSession::frame`] reads the
/// result on the next animation frame.
#[derive(Clone, Debug)]
pub struct ViewerSession {
    viewport: Viewport,
    camera: OrthoCamera,
    interaction: InteractionState,
    motion: MotionState,
    animator: IdleAnimator,
    model: Option<LoadedModel>,
    tint: RainbowTint,
    tint_clock_start: Option<f64>,
}

impl ViewerSession {
    pub fn new(viewport: Viewport, animator: IdleAnimator) -> Self {
        Self {
            viewport,
            camera: OrthoCamera::new(viewport),
            interaction: InteractionState::default(),
            motion: MotionState::default(),
            animator,
            model: None,
            tint: RainbowTint::default(),
            tint_clock_start: None,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn camera(&self) -> &OrthoCamera {
        &self.camera
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn motion(&self) -> &MotionState {
        &self.motion
    }

    pub fn model(&self) -> Option<&LoadedModel> {
        self.model.as_ref()
    }

    /// Attach the loaded model. The pose starts at rest.
    pub fn attach_model(&mut self, fit: ModelFit) {
        self.model = Some(LoadedModel {
            fit,
            pose: ModelPose::default(),
        });
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width, height);
        self.camera.resize(self.viewport);
    }

    pub fn press(&mut self, pos: Vec2) {
        self.interaction.press(pos, &mut self.motion);
    }

    /// Drags only act once a model is present; without one the move is
    /// dropped and the last pointer position stays put.
    pub fn pointer_move(&mut self, pos: Vec2) -> Option<Vec2> {
        let model = self.model.as_mut()?;
        self.interaction
            .drag(pos, &mut self.motion, &mut model.pose)
    }

    pub fn release(&mut self) {
        self.interaction.release();
    }

    pub fn handle_pointer(&mut self, input: PointerInput) {
        match input {
            PointerInput::Press(pos) => self.press(pos),
            PointerInput::Move(pos) => {
                self.pointer_move(pos);
            }
            PointerInput::Release => self.release(),
        }
    }

    /// Advance one animation frame. `now` is seconds since startup.
    pub fn frame(&mut self, now: f64) -> FrameOutput {
        let resolution = self.viewport.resolution();
        let engaged = self.interaction.is_engaged();

        let model = match self.model.as_mut() {
            Some(loaded) => {
                let step = self.animator.step(engaged, &mut self.motion, &mut loaded.pose);
                let start = *self.tint_clock_start.get_or_insert(now);
                let transform = model_matrix(&loaded.pose, &loaded.fit);
                Some(ModelFrame {
                    transform,
                    normal_matrix: normal_matrix(&transform),
                    tint_time: self.tint.clock(now - start),
                    resolution,
                    step,
                })
            }
            None => None,
        };

        FrameOutput {
            view_proj: self.camera.view_proj(),
            background: BackgroundFrame {
                time: now,
                resolution,
            },
            model,
        }
    }
}
