//! wgpu tunnel renderer for browser canvases
//!
//! Draws [`crate::shader::SHADER_TUNNEL`] over the whole canvas. Only built
//! with the `wasm` feature; headless builds use any other
//! [`crate::render::FrameRenderer`].

mod pipeline;
mod renderer;
mod surface;

pub use renderer::TunnelRenderer;

/// GPU copy of [`crate::uniforms::UniformSet`], laid out like the WGSL struct
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TunnelUniforms {
    pub time: f32,
    pub scroll_offset: f32,
    pub resolution: [f32; 2],
}

impl TunnelUniforms {
    pub fn from_set(uniforms: &crate::uniforms::UniformSet) -> Self {
        let resolution = uniforms.resolution();
        Self {
            time: uniforms.time() as f32,
            scroll_offset: uniforms.scroll_offset() as f32,
            resolution: [resolution.width, resolution.height],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Size;
    use crate::uniforms::UniformSet;

    #[test]
    fn test_uniform_layout() {
        assert_eq!(std::mem::size_of::<TunnelUniforms>(), 16);
    }

    #[test]
    fn test_from_set() {
        let mut set = UniformSet::new(Size::new(1600.0, 1200.0));
        set.advance_time(5.0);
        set.set_scroll_offset(0.2);

        let gpu = TunnelUniforms::from_set(&set);
        assert!((gpu.time - 5.0).abs() < 0.001);
        assert!((gpu.scroll_offset - 0.2).abs() < 0.001);
        assert_eq!(gpu.resolution, [1600.0, 1200.0]);
    }
}
