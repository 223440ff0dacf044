use glam::{EulerRot, Mat3, Mat4, Quat, Vec3};

use super::constants::MODEL_FIT_SIZE;
use super::interaction::ModelPose;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("invalid glTF: {0}")]
    Parse(#[from] gltf::Error),
    #[error("model has no scene")]
    NoScene,
    #[error("model contains no triangle meshes")]
    Empty,
}

/// One triangle mesh, already in model-root space (node transforms baked in).
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub name: Option<String>,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    /// Per-vertex RGBA; white when the source has no color attribute.
    pub colors: Vec<[f32; 4]>,
    /// Base color texture coordinates; zeros when the source has none.
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
    pub base_color: [f32; 4],
    /// Index into `ModelData::textures`.
    pub texture: Option<usize>,
}

/// Decoded RGBA8 image, rows top to bottom.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// CPU-side result of loading a model file.
#[derive(Clone, Debug, Default)]
pub struct ModelData {
    pub meshes: Vec<MeshData>,
    pub textures: Vec<TextureData>,
}

impl ModelData {
    /// Parse a binary glTF (`.glb`) held in memory. Only the embedded binary
    /// chunk is used as a buffer source.
    pub fn from_glb(bytes: &[u8]) -> Result<Self, LoadError> {
        let gltf = gltf::Gltf::from_slice(bytes)?;
        let blob = gltf.blob.as_deref();
        let scene = gltf
            .default_scene()
            .or_else(|| gltf.scenes().next())
            .ok_or(LoadError::NoScene)?;

        let mut textures = Vec::new();
        let slots: Vec<Option<usize>> = gltf
            .images()
            .map(|img| {
                let decoded = decode_image(&img, blob)?;
                textures.push(decoded);
                Some(textures.len() - 1)
            })
            .collect();

        let mut meshes = Vec::new();
        for node in scene.nodes() {
            collect_node(&node, Mat4::IDENTITY, blob, &slots, &mut meshes);
        }
        if meshes.is_empty() {
            return Err(LoadError::Empty);
        }
        Ok(Self { meshes, textures })
    }

    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|m| m.positions.len()).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|m| m.indices.len() / 3).sum()
    }

    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(
            self.meshes
                .iter()
                .flat_map(|m| m.positions.iter().map(|p| Vec3::from(*p))),
        )
    }
}

/// Decode an image stored in a buffer view of the binary chunk. Failures are
/// logged and the affected meshes render untextured.
fn decode_image(img: &gltf::Image<'_>, blob: Option<&[u8]>) -> Option<TextureData> {
    let gltf::image::Source::View { view, .. } = img.source() else {
        log::warn!("[model] skipping external image {:?}", img.name());
        return None;
    };
    if !matches!(view.buffer().source(), gltf::buffer::Source::Bin) {
        return None;
    }
    let bytes = blob?.get(view.offset()..view.offset() + view.length())?;
    match image::load_from_memory(bytes) {
        Ok(decoded) => {
            let rgba = decoded.to_rgba8();
            Some(TextureData {
                width: rgba.width(),
                height: rgba.height(),
                pixels: rgba.into_raw(),
            })
        }
        Err(e) => {
            log::warn!("[model] could not decode image {}: {e}", img.index());
            None
        }
    }
}

fn collect_node(
    node: &gltf::Node<'_>,
    parent: Mat4,
    blob: Option<&[u8]>,
    textures: &[Option<usize>],
    out: &mut Vec<MeshData>,
) {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::warn!(
                    "[model] skipping {:?} primitive in mesh {:?}",
                    primitive.mode(),
                    mesh.name()
                );
                continue;
            }
            if let Some(data) = read_primitive(&primitive, world, blob, textures, mesh.name()) {
                out.push(data);
            }
        }
    }
    for child in node.children() {
        collect_node(&child, world, blob, textures, out);
    }
}

fn read_primitive(
    primitive: &gltf::Primitive<'_>,
    world: Mat4,
    blob: Option<&[u8]>,
    textures: &[Option<usize>],
    name: Option<&str>,
) -> Option<MeshData> {
    let reader = primitive.reader(|buffer| match buffer.source() {
        gltf::buffer::Source::Bin => blob,
        gltf::buffer::Source::Uri(_) => None,
    });

    let positions: Vec<[f32; 3]> = reader
        .read_positions()?
        .map(|p| world.transform_point3(Vec3::from(p)).to_array())
        .collect();
    if positions.is_empty() {
        return None;
    }
    let indices: Vec<u32> = match reader.read_indices() {
        Some(ix) => ix.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };

    let normal_matrix = Mat3::from_mat4(world).inverse().transpose();
    let normals: Vec<[f32; 3]> = match reader.read_normals() {
        Some(ns) => ns
            .map(|n| (normal_matrix * Vec3::from(n)).normalize_or_zero().to_array())
            .collect(),
        None => compute_vertex_normals(&positions, &indices),
    };

    let colors: Vec<[f32; 4]> = match reader.read_colors(0) {
        Some(cs) => cs.into_rgba_f32().collect(),
        None => vec![[1.0; 4]; positions.len()],
    };

    let pbr = primitive.material().pbr_metallic_roughness();
    let base_texture = pbr.base_color_texture();
    let uvs: Vec<[f32; 2]> = base_texture
        .as_ref()
        .and_then(|info| reader.read_tex_coords(info.tex_coord()))
        .map(|tc| tc.into_f32().collect())
        .unwrap_or_else(|| vec![[0.0; 2]; positions.len()]);
    let texture = base_texture
        .and_then(|info| textures.get(info.texture().source().index()).copied().flatten());

    Some(MeshData {
        name: name.map(str::to_owned),
        positions,
        normals,
        colors,
        uvs,
        indices,
        base_color: pbr.base_color_factor(),
        texture,
    })
}

/// Area-weighted smooth normals for primitives that ship without them.
pub fn compute_vertex_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut acc = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let pa = Vec3::from(positions[a]);
        let face = (Vec3::from(positions[b]) - pa).cross(Vec3::from(positions[c]) - pa);
        acc[a] += face;
        acc[b] += face;
        acc[c] += face;
    }
    acc.into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Z).to_array())
        .collect()
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self { min: first, max: first }, |b, p| Self {
            min: b.min.min(p),
            max: b.max.max(p),
        }))
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn max_dimension(&self) -> f32 {
        self.size().max_element()
    }
}

/// Recenters a model on the origin and scales it to a fixed world size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelFit {
    pub center: Vec3,
    pub scale: f32,
}

impl Default for ModelFit {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

impl ModelFit {
    /// Scale so the largest dimension becomes `target_size`. Degenerate
    /// (flat-in-every-axis) boxes keep unit scale.
    pub fn for_bounds(bounds: &Aabb, target_size: f32) -> Self {
        let max_dim = bounds.max_dimension();
        let scale = if max_dim > f32::EPSILON {
            target_size / max_dim
        } else {
            1.0
        };
        Self {
            center: bounds.center(),
            scale,
        }
    }

    pub fn for_model(model: &ModelData) -> Self {
        model
            .bounds()
            .map(|b| Self::for_bounds(&b, MODEL_FIT_SIZE))
            .unwrap_or_default()
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale(Vec3::splat(self.scale)) * Mat4::from_translation(-self.center)
    }
}

/// Full world transform of the model: pose applied around the fitted center.
pub fn model_matrix(pose: &ModelPose, fit: &ModelFit) -> Mat4 {
    let r = pose.rotation;
    let rotation = Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z);
    Mat4::from_rotation_translation(rotation, pose.position) * fit.matrix()
}

/// Inverse-transpose for transforming normals by `model`.
pub fn normal_matrix(model: &Mat4) -> Mat4 {
    let m3 = Mat3::from_mat4(*model);
    Mat4::from_mat3(m3.inverse().transpose())
}
