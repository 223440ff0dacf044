// Shared interaction, animation and scene tuning constants.
//
// Per-frame constants are refresh-rate dependent: they are applied once per
// animation frame, not scaled by elapsed time.

// Direct-manipulation rotation while dragging
pub const ROTATION_SPEED: f32 = 0.01;
pub const DRAG_ROTATION_SCALE: f32 = 0.01; // radians per pixel = ROTATION_SPEED * this

// Banked (momentum) rotation velocity
pub const VELOCITY_GAIN: f32 = 0.001; // per-event multiplier per pixel of pointer travel
pub const MAX_VELOCITY: f32 = 0.05; // per-axis clamp, radians per frame
pub const MOMENTUM_DECAY: f32 = 0.98; // geometric decay per idle frame
pub const IDLE_VELOCITY_THRESHOLD: f32 = 0.001; // below this the idle tumble kicks in
pub const IDLE_ROTATION_SPEED: f32 = 0.01; // radians per frame along the idle axis

// Planar drag offset
pub const MOVE_SPEED: f32 = 0.01; // world units per pixel
pub const MAX_OFFSET_RADIUS: f32 = 3.0; // offset target is kept inside this disk
pub const POSITION_LERP: f32 = 0.05; // snap-back and follow factor per frame

// Vertical float
pub const FLOAT_PHASE_STEP: f32 = 0.02;
pub const FLOAT_AMPLITUDE: f32 = 0.3;

// Camera (orthographic, looking down -Z)
pub const FRUSTUM_SIZE: f32 = 10.0; // world units spanned vertically
pub const CAMERA_Z: f32 = 10.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

// Model placement
pub const MODEL_FIT_SIZE: f32 = 6.0; // largest model dimension after fitting

// Lighting
pub const AMBIENT_INTENSITY: f32 = 0.7;
pub const DIRECTIONAL_INTENSITY: f32 = 0.5;
pub const DIRECTIONAL_POSITION: [f32; 3] = [5.0, 10.0, 7.5];

// Background blob field
pub const BLOB_COUNT: usize = 16;
pub const BLOB_SMOOTH_K: f32 = 0.4;
pub const BLOB_FIELD_INITIAL: f32 = 2.0; // distance before any blob is unioned in
pub const BLOB_AMPLITUDE: [f32; 3] = [2.0, 2.0, 0.8];
pub const MARCH_MAX_STEPS: usize = 64;
pub const MARCH_HIT_EPSILON: f32 = 1e-6;
pub const MARCH_MAX_DEPTH: f32 = 6.0;
pub const NORMAL_EPSILON: f32 = 1e-5;
pub const RAY_ORIGIN_Z: f32 = 3.0;
pub const BACKGROUND_VIEW_HEIGHT: f32 = 6.0; // world units covered by the screen height
pub const DEPTH_FOG: f32 = 0.15;
pub const PALETTE_TIME_SCALE: f32 = 3.0;

// Model tint
pub const TINT_MIX: f32 = 0.3; // share of the tinted color in the final output
pub const TINT_TIME_SCALE: f32 = 0.3;
