// Host-side tests for glTF loading, bounds and model fitting.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod interaction {
        include!("../src/core/interaction.rs");
    }
    pub mod model {
        include!("../src/core/model.rs");
    }
}

use crate::core::constants::*;
use crate::core::interaction::ModelPose;
use crate::core::model::*;
use glam::{Mat4, Vec3};

// One triangle in the XY plane, u16 indices, placed by a node translation.
fn triangle_glb(mode: u32, translation: [f32; 3]) -> Vec<u8> {
    let mut bin = Vec::new();
    for v in [[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]] {
        for c in v {
            bin.extend_from_slice(&c.to_le_bytes());
        }
    }
    for i in [0u16, 1, 2] {
        bin.extend_from_slice(&i.to_le_bytes());
    }
    while bin.len() % 4 != 0 {
        bin.push(0);
    }

    let json = format!(
        r#"{{"asset":{{"version":"2.0"}},"scene":0,"scenes":[{{"nodes":[0]}}],"nodes":[{{"mesh":0,"name":"pot","translation":[{},{},{}]}}],"meshes":[{{"name":"pot","primitives":[{{"attributes":{{"POSITION":0}},"indices":1,"mode":{}}}]}}],"buffers":[{{"byteLength":{}}}],"bufferViews":[{{"buffer":0,"byteOffset":0,"byteLength":36}},{{"buffer":0,"byteOffset":36,"byteLength":6}}],"accessors":[{{"bufferView":0,"componentType":5126,"count":3,"type":"VEC3","min":[0,0,0],"max":[1,1,0]}},{{"bufferView":1,"componentType":5123,"count":3,"type":"SCALAR"}}]}}"#,
        translation[0],
        translation[1],
        translation[2],
        mode,
        bin.len()
    );
    let mut json = json.into_bytes();
    while json.len() % 4 != 0 {
        json.push(b' ');
    }

    let total = 12 + 8 + json.len() + 8 + bin.len();
    let mut glb = Vec::with_capacity(total);
    glb.extend_from_slice(b"glTF");
    glb.extend_from_slice(&2u32.to_le_bytes());
    glb.extend_from_slice(&(total as u32).to_le_bytes());
    glb.extend_from_slice(&(json.len() as u32).to_le_bytes());
    glb.extend_from_slice(b"JSON");
    glb.extend_from_slice(&json);
    glb.extend_from_slice(&(bin.len() as u32).to_le_bytes());
    glb.extend_from_slice(b"BIN\0");
    glb.extend_from_slice(&bin);
    glb
}

#[test]
fn loads_a_binary_gltf_with_baked_node_transform() {
    let model = ModelData::from_glb(&triangle_glb(4, [1.0, 2.0, 3.0])).expect("valid glb");
    assert_eq!(model.meshes.len(), 1);
    assert_eq!(model.vertex_count(), 3);
    assert_eq!(model.triangle_count(), 1);

    let mesh = &model.meshes[0];
    assert_eq!(mesh.name.as_deref(), Some("pot"));
    assert_eq!(mesh.indices, vec![0, 1, 2]);
    assert_eq!(mesh.positions[0], [1.0, 2.0, 3.0]);
    assert_eq!(mesh.positions[1], [2.0, 2.0, 3.0]);
    assert_eq!(mesh.positions[2], [1.0, 3.0, 3.0]);
    // No NORMAL attribute: computed from the counter-clockwise winding.
    for n in &mesh.normals {
        assert!((Vec3::from(*n) - Vec3::Z).length() < 1e-6);
    }
    assert_eq!(mesh.colors, vec![[1.0; 4]; 3]);
    assert_eq!(mesh.base_color, [1.0; 4]);

    let bounds = model.bounds().expect("bounds");
    assert_eq!(bounds.min, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(bounds.max, Vec3::new(2.0, 3.0, 3.0));
}

#[test]
fn non_triangle_primitives_are_skipped() {
    // mode 1 = LINES
    match ModelData::from_glb(&triangle_glb(1, [0.0; 3])) {
        Err(LoadError::Empty) => {}
        other => panic!("expected Empty, got {other:?}"),
    }
}

#[test]
fn garbage_bytes_are_a_parse_error() {
    match ModelData::from_glb(b"definitely not a model") {
        Err(LoadError::Parse(_)) => {}
        other => panic!("expected Parse, got {other:?}"),
    }
}

#[test]
fn load_errors_describe_themselves() {
    assert_eq!(LoadError::Status(404).to_string(), "HTTP status 404");
    assert!(LoadError::Fetch("offline".into()).to_string().contains("offline"));
}

#[test]
fn aabb_of_points() {
    assert!(Aabb::from_points(std::iter::empty()).is_none());
    let b = Aabb::from_points([
        Vec3::new(-1.0, -2.0, -3.0),
        Vec3::new(3.0, 2.0, 1.0),
        Vec3::new(0.0, 0.0, 0.0),
    ])
    .expect("bounds");
    assert_eq!(b.center(), Vec3::new(1.0, 0.0, -1.0));
    assert_eq!(b.size(), Vec3::splat(4.0));
    assert_eq!(b.max_dimension(), 4.0);
}

#[test]
fn fit_recenters_and_scales_to_target_size() {
    let b = Aabb {
        min: Vec3::new(-1.0, -2.0, -3.0),
        max: Vec3::new(3.0, 0.0, -1.0),
    };
    let fit = ModelFit::for_bounds(&b, MODEL_FIT_SIZE);
    assert_eq!(fit.center, Vec3::new(1.0, -1.0, -2.0));
    assert!((fit.scale - 1.5).abs() < 1e-6);

    let m = fit.matrix();
    assert!(m.transform_point3(fit.center).length() < 1e-6);
    let far = m.transform_point3(b.max) - m.transform_point3(b.min);
    assert!((far.max_element() - MODEL_FIT_SIZE).abs() < 1e-5);
}

#[test]
fn degenerate_bounds_keep_unit_scale() {
    let p = Vec3::new(4.0, 4.0, 4.0);
    let fit = ModelFit::for_bounds(&Aabb { min: p, max: p }, MODEL_FIT_SIZE);
    assert_eq!(fit.scale, 1.0);
    assert_eq!(fit.center, p);
    assert_eq!(ModelFit::for_model(&ModelData::default()), ModelFit::default());
}

#[test]
fn model_matrix_rotates_about_the_fitted_center() {
    let fit = ModelFit {
        center: Vec3::new(2.0, 0.0, 0.0),
        scale: 1.0,
    };
    let pose = ModelPose {
        rotation: Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0),
        position: Vec3::new(0.0, 1.0, 0.0),
    };
    let m = model_matrix(&pose, &fit);
    assert!((m.transform_point3(fit.center) - pose.position).length() < 1e-5);
    // +X of the recentered model turns onto -Z under a quarter turn about Y.
    let p = m.transform_point3(fit.center + Vec3::X);
    assert!((p - Vec3::new(0.0, 1.0, -1.0)).length() < 1e-5);

    assert_eq!(model_matrix(&ModelPose::default(), &fit), fit.matrix());
}

#[test]
fn normal_matrix_undoes_non_uniform_scale() {
    let m = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
    let n = normal_matrix(&m);
    let tilted = n.transform_vector3(Vec3::new(1.0, 1.0, 0.0));
    assert!((tilted - Vec3::new(0.5, 1.0, 0.0)).length() < 1e-6);
}

#[test]
fn computed_normals_ignore_out_of_range_indices() {
    let positions = [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]];
    let normals = compute_vertex_normals(&positions, &[0, 1, 2, 0, 1, 9]);
    assert_eq!(normals.len(), 3);
    for n in normals {
        assert!((Vec3::from(n) + Vec3::Z).length() < 1e-6);
    }
}

fn png_bytes(width: u32, height: u32, pixels: Vec<u8>) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(width, height, pixels).expect("pixel count");
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("png encode");
    out.into_inner()
}

// One triangle with TEXCOORD_0 and a material whose base color texture is
// `image` stored in the binary chunk.
fn textured_glb(image: &[u8]) -> Vec<u8> {
    let mut bin = Vec::new();
    for v in [[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]] {
        for c in v {
            bin.extend_from_slice(&c.to_le_bytes());
        }
    }
    for uv in [[0.0f32, 1.0], [1.0, 1.0], [0.0, 0.0]] {
        for c in uv {
            bin.extend_from_slice(&c.to_le_bytes());
        }
    }
    for i in [0u16, 1, 2] {
        bin.extend_from_slice(&i.to_le_bytes());
    }
    while bin.len() % 4 != 0 {
        bin.push(0);
    }
    let image_offset = bin.len();
    bin.extend_from_slice(image);
    while bin.len() % 4 != 0 {
        bin.push(0);
    }

    let json = format!(
        r#"{{"asset":{{"version":"2.0"}},"scene":0,"scenes":[{{"nodes":[0]}}],"nodes":[{{"mesh":0}}],"meshes":[{{"primitives":[{{"attributes":{{"POSITION":0,"TEXCOORD_0":1}},"indices":2,"material":0}}]}}],"materials":[{{"pbrMetallicRoughness":{{"baseColorFactor":[1,0.5,1,1],"baseColorTexture":{{"index":0}}}}}}],"textures":[{{"source":0}}],"images":[{{"bufferView":3,"mimeType":"image/png"}}],"buffers":[{{"byteLength":{}}}],"bufferViews":[{{"buffer":0,"byteOffset":0,"byteLength":36}},{{"buffer":0,"byteOffset":36,"byteLength":24}},{{"buffer":0,"byteOffset":60,"byteLength":6}},{{"buffer":0,"byteOffset":{},"byteLength":{}}}],"accessors":[{{"bufferView":0,"componentType":5126,"count":3,"type":"VEC3","min":[0,0,0],"max":[1,1,0]}},{{"bufferView":1,"componentType":5126,"count":3,"type":"VEC2"}},{{"bufferView":2,"componentType":5123,"count":3,"type":"SCALAR"}}]}}"#,
        bin.len(),
        image_offset,
        image.len()
    );
    let mut json = json.into_bytes();
    while json.len() % 4 != 0 {
        json.push(b' ');
    }

    let total = 12 + 8 + json.len() + 8 + bin.len();
    let mut glb = Vec::with_capacity(total);
    glb.extend_from_slice(b"glTF");
    glb.extend_from_slice(&2u32.to_le_bytes());
    glb.extend_from_slice(&(total as u32).to_le_bytes());
    glb.extend_from_slice(&(json.len() as u32).to_le_bytes());
    glb.extend_from_slice(b"JSON");
    glb.extend_from_slice(&json);
    glb.extend_from_slice(&(bin.len() as u32).to_le_bytes());
    glb.extend_from_slice(b"BIN\0");
    glb.extend_from_slice(&bin);
    glb
}

#[test]
fn base_color_texture_and_texcoords_are_loaded() {
    let pixels = vec![255, 0, 0, 255, 0, 0, 255, 128];
    let glb = textured_glb(&png_bytes(2, 1, pixels.clone()));
    let model = ModelData::from_glb(&glb).expect("valid glb");

    assert_eq!(model.textures.len(), 1);
    assert_eq!(
        model.textures[0],
        TextureData {
            width: 2,
            height: 1,
            pixels,
        }
    );

    let mesh = &model.meshes[0];
    assert_eq!(mesh.texture, Some(0));
    assert_eq!(mesh.uvs, vec![[0.0, 1.0], [1.0, 1.0], [0.0, 0.0]]);
    assert_eq!(mesh.base_color, [1.0, 0.5, 1.0, 1.0]);
}

#[test]
fn undecodable_texture_leaves_the_mesh_untextured() {
    let glb = textured_glb(b"not a png image");
    let model = ModelData::from_glb(&glb).expect("geometry still loads");
    assert!(model.textures.is_empty());
    let mesh = &model.meshes[0];
    assert_eq!(mesh.texture, None);
    // Coordinates are still read so the mesh layout stays uniform.
    assert_eq!(mesh.uvs.len(), 3);
}

#[test]
fn untextured_meshes_get_zero_texcoords() {
    let model = ModelData::from_glb(&triangle_glb(4, [0.0; 3])).expect("valid glb");
    assert!(model.textures.is_empty());
    assert_eq!(model.meshes[0].texture, None);
    assert_eq!(model.meshes[0].uvs, vec![[0.0; 2]; 3]);
}
