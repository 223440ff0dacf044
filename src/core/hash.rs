use glam::Vec3;

// Multiplier and salts of the index hash. Changing them reshuffles every blob.
const HASH_SCALE: f32 = 412.531;
const SPEED_SALT: f32 = 0.513;
const RADIUS_SALT: f32 = 0.5124;
const PHASE_STEP: Vec3 = Vec3::new(52.5126, 64.62744, 632.25);

const MIN_RADIUS: f32 = 0.5;
const MAX_RADIUS: f32 = 1.0;

/// Fractional part, matching GLSL/WGSL `fract` (always in `[0, 1)`).
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// Deterministic pseudo-random value in `[0, 1)` for an element index.
#[inline]
pub fn index_hash(index: u32, salt: f32) -> f32 {
    fract(index as f32 * HASH_SCALE + salt)
}

/// Motion parameters of one background blob.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlobParams {
    /// Signed time multiplier in `[-1, 1)`.
    pub speed: f32,
    /// Per-axis phase added to the scaled time before `sin`.
    pub phase: Vec3,
    pub radius: f32,
}

/// Derive the parameters for blob `index`. Pure and stable across runs so the
/// background looks the same on every load.
pub fn blob_params(index: u32) -> BlobParams {
    let speed = (index_hash(index, SPEED_SALT) - 0.5) * 2.0;
    let radius = MIN_RADIUS + (MAX_RADIUS - MIN_RADIUS) * index_hash(index, RADIUS_SALT);
    BlobParams {
        speed,
        phase: PHASE_STEP * index as f32,
        radius,
    }
}
