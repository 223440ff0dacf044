use super::helpers;
use crate::core::{palette_phase, BlobField, BLOB_COUNT};
use wgpu;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct BlobPacked {
    /// xyz: sine arguments for this frame, already reduced to one turn.
    pub(crate) angle: [f32; 4],
    pub(crate) radius: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct BackgroundUniforms {
    pub(crate) resolution: [f32; 3],
    pub(crate) palette_phase: f32,
    pub(crate) blobs: [BlobPacked; BLOB_COUNT],
}

pub(crate) struct BackgroundResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
    field: BlobField,
}

impl BackgroundResources {
    /// Write this frame's resolution and time-dependent angles. Angles are
    /// reduced in f64 so the motion stays smooth however long the page runs.
    pub(crate) fn write_uniforms(&self, queue: &wgpu::Queue, time: f64, resolution: [f32; 3]) {
        let mut blobs = [BlobPacked {
            angle: [0.0; 4],
            radius: [0.0; 4],
        }; BLOB_COUNT];
        for (dst, src) in blobs.iter_mut().zip(self.field.blobs().iter()) {
            let a = BlobField::blob_angles(src, time);
            *dst = BlobPacked {
                angle: [a.x, a.y, a.z, 0.0],
                radius: [src.radius, 0.0, 0.0, 0.0],
            };
        }
        let u = BackgroundUniforms {
            resolution,
            palette_phase: palette_phase(time),
            blobs,
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&u));
    }
}

pub(crate) fn create_background_resources(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
) -> BackgroundResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("background_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::BACKGROUND_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("background_bgl"),
        entries: &[helpers::uniform_layout_entry(
            0,
            wgpu::ShaderStages::FRAGMENT,
        )],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("background_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    // No depth state: the background neither tests nor writes depth, and it
    // replaces the cleared color outright.
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("background_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_fullscreen"),
            buffers: &[],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_background"),
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
    let uniform_buffer =
        helpers::create_uniform_buffer::<BackgroundUniforms>(device, "background_uniforms");
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("background_bg"),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });

    BackgroundResources {
        pipeline,
        uniform_buffer,
        bind_group,
        field: BlobField::new(),
    }
}
