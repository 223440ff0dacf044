use glam::{DVec3, Vec2, Vec3, Vec4};
use std::f64::consts::TAU;

use super::constants::{
    BACKGROUND_VIEW_HEIGHT, BLOB_AMPLITUDE, BLOB_COUNT, BLOB_FIELD_INITIAL, BLOB_SMOOTH_K,
    DEPTH_FOG, MARCH_HIT_EPSILON, MARCH_MAX_DEPTH, MARCH_MAX_STEPS, NORMAL_EPSILON,
    PALETTE_TIME_SCALE, RAY_ORIGIN_Z,
};
use super::hash::{blob_params, BlobParams};

/// Polynomial smooth minimum of two distances with blend radius `k`.
#[inline]
pub fn smooth_union(d1: f32, d2: f32, k: f32) -> f32 {
    let h = (0.5 + 0.5 * (d2 - d1) / k).clamp(0.0, 1.0);
    d2 + (d1 - d2) * h - k * h * (1.0 - h)
}

#[inline]
pub fn sd_sphere(p: Vec3, radius: f32) -> f32 {
    p.length() - radius
}

#[inline]
fn sin3(v: Vec3) -> Vec3 {
    Vec3::new(v.x.sin(), v.y.sin(), v.z.sin())
}

#[inline]
fn cos3(v: Vec3) -> Vec3 {
    Vec3::new(v.x.cos(), v.y.cos(), v.z.cos())
}

/// Result of marching one ray through the blob field.
#[derive(Clone, Copy, Debug)]
pub struct MarchHit {
    /// Travelled distance, clamped to [`MARCH_MAX_DEPTH`].
    pub depth: f32,
    /// Last sampled point; this lags the final step by one sample.
    pub point: Vec3,
}

/// CPU mirror of `shaders/background.wgsl`.
///
/// The GPU evaluates the same field per pixel; this copy exists so the
/// math can be checked on the host and so the blob table uploaded to the
/// shader comes from one place.
#[derive(Clone, Debug)]
pub struct BlobField {
    blobs: [BlobParams; BLOB_COUNT],
}

impl Default for BlobField {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobField {
    pub fn new() -> Self {
        Self {
            blobs: std::array::from_fn(|i| blob_params(i as u32)),
        }
    }

    pub fn blobs(&self) -> &[BlobParams; BLOB_COUNT] {
        &self.blobs
    }

    /// Per-axis `sin` argument of a blob at `time` seconds, reduced to
    /// `[0, 2π)`. Done in f64 so the motion stays smooth however long the
    /// page has been open.
    pub fn blob_angles(blob: &BlobParams, time: f64) -> Vec3 {
        let phase = blob.phase.as_dvec3();
        let raw = DVec3::splat(time * blob.speed as f64) + phase;
        DVec3::new(raw.x.rem_euclid(TAU), raw.y.rem_euclid(TAU), raw.z.rem_euclid(TAU)).as_vec3()
    }

    /// Center offset of a blob at `time`; the sphere sits at `-offset`.
    #[inline]
    pub fn blob_offset(blob: &BlobParams, time: f32) -> Vec3 {
        sin3(Self::blob_angles(blob, time as f64)) * Vec3::from(BLOB_AMPLITUDE)
    }

    pub fn distance(&self, p: Vec3, time: f32) -> f32 {
        self.blobs.iter().fold(BLOB_FIELD_INITIAL, |d, blob| {
            let sphere = sd_sphere(p + Self::blob_offset(blob, time), blob.radius);
            smooth_union(sphere, d, BLOB_SMOOTH_K)
        })
    }

    /// Tetrahedral central-difference gradient, normalized.
    pub fn normal(&self, p: Vec3, time: f32) -> Vec3 {
        let h = NORMAL_EPSILON;
        let xyy = Vec3::new(1.0, -1.0, -1.0);
        let yyx = Vec3::new(-1.0, -1.0, 1.0);
        let yxy = Vec3::new(-1.0, 1.0, -1.0);
        let xxx = Vec3::ONE;
        let g = xyy * self.distance(p + xyy * h, time)
            + yyx * self.distance(p + yyx * h, time)
            + yxy * self.distance(p + yxy * h, time)
            + xxx * self.distance(p + xxx * h, time);
        g.normalize_or_zero()
    }

    pub fn march(&self, origin: Vec3, dir: Vec3, time: f32) -> MarchHit {
        let mut depth = 0.0;
        let mut point = origin;
        for _ in 0..MARCH_MAX_STEPS {
            point = origin + dir * depth;
            let dist = self.distance(point, time);
            depth += dist;
            if dist < MARCH_HIT_EPSILON {
                break;
            }
        }
        MarchHit {
            depth: depth.min(MARCH_MAX_DEPTH),
            point,
        }
    }

    /// Shade one pixel. `frag` uses a bottom-left origin, like `gl_FragCoord`.
    pub fn shade(&self, frag: Vec2, resolution: Vec2, time: f32) -> Vec4 {
        let uv = frag / resolution;
        let aspect = resolution.x / resolution.y;
        let xy = (uv - Vec2::splat(0.5)) * Vec2::new(aspect, 1.0) * BACKGROUND_VIEW_HEIGHT;
        let origin = xy.extend(RAY_ORIGIN_Z);
        let hit = self.march(origin, Vec3::NEG_Z, time);

        let n = self.normal(hit.point, time);
        let b = n.dot(Vec3::splat(0.577)).max(0.0);
        let wave = Vec3::splat(b + palette_phase(time as f64))
            + Vec3::new(uv.x, uv.y, uv.x) * 2.0
            + Vec3::new(0.0, 2.0, 4.0);
        let col = (Vec3::splat(0.5) + 0.5 * cos3(wave)) * (0.85 + b * 0.35);
        let col = col * (-hit.depth * DEPTH_FOG).exp();
        col.extend(depth_alpha(hit.depth))
    }
}

/// Palette cycle angle at `time` seconds, reduced to `[0, 2π)`.
#[inline]
pub fn palette_phase(time: f64) -> f32 {
    (time * PALETTE_TIME_SCALE as f64).rem_euclid(TAU) as f32
}

/// Linear fade from opaque near the camera to transparent at full depth.
/// Unclamped; the shader clamps before writing.
#[inline]
pub fn depth_alpha(depth: f32) -> f32 {
    1.0 - (depth - 0.5) / 2.0
}
