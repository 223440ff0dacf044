use super::helpers;
use crate::constants::DEPTH_FORMAT;
use crate::core::{
    LambertStage, MeshData, ModelData, ModelFrame, PostColorStage, ShadingPipeline, TextureData,
};
use glam::Mat4;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ModelVertex {
    pub(crate) position: [f32; 3],
    pub(crate) normal: [f32; 3],
    pub(crate) color: [f32; 4],
    pub(crate) uv: [f32; 2],
}

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
    0 => Float32x3,
    1 => Float32x3,
    2 => Float32x4,
    3 => Float32x2
];

impl ModelVertex {
    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ModelVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &VERTEX_ATTRIBUTES,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) light_dir: [f32; 4],
    pub(crate) light_color: [f32; 4],
    pub(crate) ambient: [f32; 4],
}

/// Per-mesh uniforms. Each mesh owns its own buffer, so the tint time and
/// resolution are written once per mesh per frame.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct MeshUniforms {
    pub(crate) model: [[f32; 4]; 4],
    pub(crate) normal_matrix: [[f32; 4]; 4],
    pub(crate) base_color: [f32; 4],
    pub(crate) resolution: [f32; 3],
    pub(crate) time: f32,
}

pub(crate) struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    base_color: [f32; 4],
    // Kept alive for the bind group.
    _texture: wgpu::Texture,
}

pub(crate) struct SceneResources {
    pipeline: wgpu::RenderPipeline,
    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    mesh_bgl: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    lighting: LambertStage,
    meshes: Vec<GpuMesh>,
}

impl SceneResources {
    pub(crate) fn has_meshes(&self) -> bool {
        !self.meshes.is_empty()
    }

    /// Upload every mesh of a freshly loaded model, replacing any previous
    /// upload.
    pub(crate) fn upload_model(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        model: &ModelData,
    ) {
        self.meshes = model
            .meshes
            .iter()
            .enumerate()
            .filter_map(|(i, m)| {
                let texture = m.texture.and_then(|t| model.textures.get(t));
                self.upload_mesh(device, queue, i, m, texture)
            })
            .collect();
        log::info!(
            "[gpu] uploaded {} meshes, {} textures",
            self.meshes.len(),
            model.textures.len()
        );
    }

    fn upload_mesh(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        index: usize,
        mesh: &MeshData,
        texture: Option<&TextureData>,
    ) -> Option<GpuMesh> {
        if mesh.indices.is_empty() {
            return None;
        }
        let vertices: Vec<ModelVertex> = mesh
            .positions
            .iter()
            .enumerate()
            .map(|(i, p)| ModelVertex {
                position: *p,
                normal: mesh.normals.get(i).copied().unwrap_or([0.0, 0.0, 1.0]),
                color: mesh.colors.get(i).copied().unwrap_or([1.0; 4]),
                uv: mesh.uvs.get(i).copied().unwrap_or([0.0; 2]),
            })
            .collect();
        let label = mesh.name.clone().unwrap_or_else(|| format!("mesh_{index}"));
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_vb")),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_ib")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let uniform_buffer =
            helpers::create_uniform_buffer::<MeshUniforms>(device, &format!("{label}_uniforms"));
        let limit = device.limits().max_texture_dimension_2d;
        let texture = texture.filter(|t| {
            let fits = t.width <= limit && t.height <= limit;
            if !fits {
                log::warn!("[gpu] {label}: {}x{} texture exceeds {limit}", t.width, t.height);
            }
            fits
        });
        let (tex, tex_view) = match texture {
            Some(t) => helpers::create_rgba_texture(
                device,
                queue,
                &format!("{label}_albedo"),
                t.width,
                t.height,
                &t.pixels,
            ),
            None => helpers::create_rgba_texture(
                device,
                queue,
                &format!("{label}_white"),
                1,
                1,
                &[255; 4],
            ),
        };
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label}_bg")),
            layout: &self.mesh_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&tex_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });
        Some(GpuMesh {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            uniform_buffer,
            bind_group,
            base_color: mesh.base_color,
            _texture: tex,
        })
    }

    pub(crate) fn write_uniforms(&self, queue: &wgpu::Queue, view_proj: Mat4, frame: &ModelFrame) {
        let scene = SceneUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            light_dir: self.lighting.light_dir.extend(0.0).to_array(),
            light_color: self.lighting.light_color.extend(1.0).to_array(),
            ambient: self.lighting.ambient.extend(1.0).to_array(),
        };
        queue.write_buffer(&self.scene_buffer, 0, bytemuck::bytes_of(&scene));
        for mesh in &self.meshes {
            let u = MeshUniforms {
                model: frame.transform.to_cols_array_2d(),
                normal_matrix: frame.normal_matrix.to_cols_array_2d(),
                base_color: mesh.base_color,
                resolution: frame.resolution,
                time: frame.tint_time,
            };
            queue.write_buffer(&mesh.uniform_buffer, 0, bytemuck::bytes_of(&u));
        }
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.scene_bind_group, &[]);
        for mesh in &self.meshes {
            rpass.set_bind_group(1, &mesh.bind_group, &[]);
            rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            rpass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
    }
}

pub(crate) fn create_scene_resources<S: PostColorStage>(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    shading: &ShadingPipeline<S>,
) -> SceneResources {
    let source = shading.wgsl(crate::core::MODEL_WGSL);
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("model_shader"),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("scene_bgl"),
        entries: &[helpers::uniform_layout_entry(
            0,
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        )],
    });
    let mesh_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("mesh_bgl"),
        entries: &[
            helpers::uniform_layout_entry(
                0,
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ),
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    });
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("albedo_sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("model_pl"),
        bind_group_layouts: &[&scene_bgl, &mesh_bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("model_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_model"),
            buffers: &[ModelVertex::layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_model"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });
    let scene_buffer = helpers::create_uniform_buffer::<SceneUniforms>(device, "scene_uniforms");
    let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("scene_bg"),
        layout: &scene_bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: scene_buffer.as_entire_binding(),
        }],
    });

    SceneResources {
        pipeline,
        scene_buffer,
        scene_bind_group,
        mesh_bgl,
        sampler,
        lighting: shading.base,
        meshes: Vec::new(),
    }
}
