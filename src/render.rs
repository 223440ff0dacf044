use crate::constants::CLEAR_COLOR;
use crate::core::{FrameOutput, LambertStage, ModelData, RainbowTint, ShadingPipeline, Viewport};
use web_sys as web;

mod background;
mod helpers;
mod scene;
mod targets;

use background::{create_background_resources, BackgroundResources};
use scene::{create_scene_resources, SceneResources};
use targets::DepthTarget;

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    background: BackgroundResources,
    scene: SceneResources,
    depth: DepthTarget,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, viewport: Viewport) -> anyhow::Result<Self> {
        let width = viewport.width;
        let height = viewport.height;

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("no WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        let format = helpers::pick_surface_format(&caps.formats)
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: helpers::pick_alpha_mode(&caps.alpha_modes),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "[gpu] surface {}x{} format={:?} alpha={:?}",
            width,
            height,
            format,
            config.alpha_mode
        );

        let background = create_background_resources(&device, format);
        let shading = ShadingPipeline::new(LambertStage::default(), Some(RainbowTint::default()));
        let scene = create_scene_resources(&device, format, &shading);
        let depth = DepthTarget::new(&device, width, height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            background,
            scene,
            depth,
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: CLEAR_COLOR[3],
            },
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        let width = width.max(1);
        let height = height.max(1);
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth.recreate(&self.device, width, height);
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn upload_model(&mut self, model: &ModelData) {
        self.scene.upload_model(&self.device, &self.queue, model);
    }

    pub fn render(&mut self, frame: &FrameOutput) -> Result<(), wgpu::SurfaceError> {
        let surface_tex = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.reconfigure();
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let view = surface_tex
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.background.write_uniforms(
            &self.queue,
            frame.background.time,
            frame.background.resolution,
        );
        let model = frame.model.filter(|_| self.scene.has_meshes());
        if let Some(m) = &model {
            self.scene.write_uniforms(&self.queue, frame.view_proj, m);
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("background_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            rpass.set_pipeline(&self.background.pipeline);
            rpass.set_bind_group(0, &self.background.bind_group, &[]);
            rpass.draw(0..3, 0..1);
        }

        if model.is_some() {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("model_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            self.scene.draw(&mut rpass);
        }

        self.queue.submit(Some(encoder.finish()));
        surface_tex.present();
        Ok(())
    }
}
