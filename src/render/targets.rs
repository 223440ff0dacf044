use super::helpers;
use crate::constants::DEPTH_FORMAT;
use wgpu;

/// Depth attachment for the model pass, sized to the surface.
///
/// The background pass never touches it; the model pass clears it at the
/// start of every frame.
pub(crate) struct DepthTarget {
    pub(crate) tex: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
}

impl DepthTarget {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (tex, view) =
            helpers::create_depth_texture(device, "depth_tex", width, height, DEPTH_FORMAT);
        Self { tex, view }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        (self.tex, self.view) =
            helpers::create_depth_texture(device, "depth_tex", width, height, DEPTH_FORMAT);
    }
}
