use glam::{Vec2, Vec3, Vec4};
use std::f64::consts::TAU;

use super::constants::{
    AMBIENT_INTENSITY, DIRECTIONAL_INTENSITY, DIRECTIONAL_POSITION, TINT_MIX, TINT_TIME_SCALE,
};

/// Inputs every post-color stage receives besides the lit color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StageInputs {
    /// Fragment position in pixels, bottom-left origin.
    pub frag_coord: Vec2,
    pub time: f32,
    pub resolution: Vec2,
}

/// A color-grading hook that runs after lighting.
///
/// Each stage exists twice: `apply` on the CPU, and a WGSL function with the
/// signature
/// `fn post_color(color: vec3<f32>, frag: vec2<f32>, time: f32, resolution: vec2<f32>) -> vec3<f32>`
/// that [`compose_model_shader`] appends to the base model shader.
pub trait PostColorStage {
    fn label(&self) -> &'static str;
    fn wgsl(&self) -> &'static str;
    fn apply(&self, color: Vec3, inputs: &StageInputs) -> Vec3;
}

/// Leaves the lit color untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct Passthrough;

const PASSTHROUGH_WGSL: &str = r#"
fn post_color(color: vec3<f32>, frag: vec2<f32>, time: f32, resolution: vec2<f32>) -> vec3<f32> {
    return color;
}
"#;

impl PostColorStage for Passthrough {
    fn label(&self) -> &'static str {
        "passthrough"
    }

    fn wgsl(&self) -> &'static str {
        PASSTHROUGH_WGSL
    }

    fn apply(&self, color: Vec3, _inputs: &StageInputs) -> Vec3 {
        color
    }
}

/// Screen-space cosine color cycle blended into the lit color at a fixed
/// ratio (70% lit, 30% lit × tint).
#[derive(Clone, Copy, Debug)]
pub struct RainbowTint {
    pub mix: f32,
    pub time_scale: f32,
}

impl Default for RainbowTint {
    fn default() -> Self {
        Self {
            mix: TINT_MIX,
            time_scale: TINT_TIME_SCALE,
        }
    }
}

// Kept in sync with `RainbowTint::default()`.
const RAINBOW_WGSL: &str = r#"
const TINT_MIX: f32 = 0.3;
const TINT_TIME_SCALE: f32 = 0.3;

fn rainbow(frag: vec2<f32>, time: f32, resolution: vec2<f32>) -> vec3<f32> {
    let uv = frag / resolution;
    return 0.5 + 0.5 * cos(vec3<f32>(uv.x + time * TINT_TIME_SCALE) + uv.xyx * 2.0 + vec3<f32>(0.0, 2.0, 4.0));
}

fn post_color(color: vec3<f32>, frag: vec2<f32>, time: f32, resolution: vec2<f32>) -> vec3<f32> {
    let tint = rainbow(frag, time, resolution);
    return mix(color, color * tint, TINT_MIX);
}
"#;

impl RainbowTint {
    /// Elapsed seconds folded into one period of the color cycle.
    pub fn clock(&self, elapsed: f64) -> f32 {
        elapsed.rem_euclid(TAU / self.time_scale as f64) as f32
    }

    pub fn rainbow(&self, inputs: &StageInputs) -> Vec3 {
        let uv = inputs.frag_coord / inputs.resolution;
        let wave = Vec3::splat(uv.x + inputs.time * self.time_scale)
            + Vec3::new(uv.x, uv.y, uv.x) * 2.0
            + Vec3::new(0.0, 2.0, 4.0);
        Vec3::new(
            0.5 + 0.5 * wave.x.cos(),
            0.5 + 0.5 * wave.y.cos(),
            0.5 + 0.5 * wave.z.cos(),
        )
    }
}

impl PostColorStage for RainbowTint {
    fn label(&self) -> &'static str {
        "rainbow_tint"
    }

    fn wgsl(&self) -> &'static str {
        RAINBOW_WGSL
    }

    fn apply(&self, color: Vec3, inputs: &StageInputs) -> Vec3 {
        let tint = self.rainbow(inputs);
        color.lerp(color * tint, self.mix)
    }
}

/// Ambient plus a single directional light, diffuse only.
#[derive(Clone, Copy, Debug)]
pub struct LambertStage {
    pub ambient: Vec3,
    /// Unit vector pointing from the surface toward the light.
    pub light_dir: Vec3,
    pub light_color: Vec3,
}

impl Default for LambertStage {
    fn default() -> Self {
        Self {
            ambient: Vec3::splat(AMBIENT_INTENSITY),
            light_dir: Vec3::from(DIRECTIONAL_POSITION).normalize(),
            light_color: Vec3::splat(DIRECTIONAL_INTENSITY),
        }
    }
}

impl LambertStage {
    pub fn shade(&self, albedo: Vec3, normal: Vec3) -> Vec3 {
        let n_dot_l = normal.normalize_or_zero().dot(self.light_dir).max(0.0);
        albedo * (self.ambient + self.light_color * n_dot_l)
    }
}

/// Base lighting followed by an optional post-color stage.
pub struct ShadingPipeline<S: PostColorStage> {
    pub base: LambertStage,
    pub post: Option<S>,
}

impl<S: PostColorStage> ShadingPipeline<S> {
    pub fn new(base: LambertStage, post: Option<S>) -> Self {
        Self { base, post }
    }

    pub fn shade(&self, albedo: Vec3, normal: Vec3, inputs: &StageInputs) -> Vec3 {
        let lit = self.base.shade(albedo, normal);
        match &self.post {
            Some(stage) => stage.apply(lit, inputs),
            None => lit,
        }
    }

    /// Full fragment output: lit and graded color, premultiplied by the
    /// albedo alpha to match the surface's compositing mode.
    pub fn fragment(&self, albedo: Vec4, normal: Vec3, inputs: &StageInputs) -> Vec4 {
        let graded = self.shade(albedo.truncate(), normal, inputs);
        (graded * albedo.w).extend(albedo.w)
    }

    /// WGSL module for this pipeline: the base shader plus the stage's
    /// `post_color`, or a passthrough when no stage is set.
    pub fn wgsl(&self, base_wgsl: &str) -> String {
        match &self.post {
            Some(stage) => compose_model_shader(base_wgsl, stage),
            None => compose_model_shader(base_wgsl, &Passthrough),
        }
    }
}

/// Join the base model shader with a stage's `post_color` definition.
pub fn compose_model_shader<S: PostColorStage + ?Sized>(base_wgsl: &str, stage: &S) -> String {
    let mut src = String::with_capacity(base_wgsl.len() + stage.wgsl().len() + 64);
    src.push_str(base_wgsl);
    src.push_str("\n// post-color stage: ");
    src.push_str(stage.label());
    src.push('\n');
    src.push_str(stage.wgsl());
    src
}
