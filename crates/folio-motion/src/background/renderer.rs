//! `TunnelRenderer`: the canvas-bound [`FrameRenderer`] drawing the tunnel

use crate::error::RenderError;
use crate::render::FrameRenderer;
use crate::uniforms::UniformSet;

use super::pipeline::TunnelPipeline;
use super::surface::{acquire_device, surface_config};
use super::TunnelUniforms;

/// Everything the canvas holds on the GPU
struct Gpu {
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    device: wgpu::Device,
    queue: wgpu::Queue,
    tunnel: TunnelPipeline,
}

/// Tunnel renderer bound to one canvas
///
/// Holds its GPU objects until [`FrameRenderer::release`]; drawing after that
/// returns [`RenderError::Released`].
pub struct TunnelRenderer {
    gpu: Option<Gpu>,
}

impl TunnelRenderer {
    /// Build the surface, device and pipeline for `canvas`
    ///
    /// The surface takes the canvas' current width and height attributes.
    /// Errors are returned untouched so the engine can fall back to a static
    /// background.
    pub async fn new(canvas: web_sys::HtmlCanvasElement) -> Result<Self, RenderError> {
        let (width, height) = (canvas.width(), canvas.height());
        let (instance, surface) = canvas_surface(canvas)?;
        let (adapter, device, queue) = acquire_device(&instance, &surface).await?;

        let caps = surface.get_capabilities(&adapter);
        let config = surface_config(&caps.formats, &caps.alpha_modes, width, height)?;
        surface.configure(&device, &config);
        let tunnel = TunnelPipeline::new(&device, config.format);

        Ok(Self {
            gpu: Some(Gpu {
                surface,
                config,
                device,
                queue,
                tunnel,
            }),
        })
    }

    pub fn is_released(&self) -> bool {
        self.gpu.is_none()
    }

    /// Configured surface size in device pixels
    pub fn surface_size(&self) -> Option<(u32, u32)> {
        let gpu = self.gpu.as_ref()?;
        Some((gpu.config.width, gpu.config.height))
    }
}

#[cfg(target_arch = "wasm32")]
fn canvas_surface(
    canvas: web_sys::HtmlCanvasElement,
) -> Result<(wgpu::Instance, wgpu::Surface<'static>), RenderError> {
    // WebGPU first, WebGL2 where it is missing
    let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
        backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
        ..Default::default()
    });
    let surface = instance
        .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
        .map_err(|e| RenderError::SurfaceCreation(e.to_string()))?;
    Ok((instance, surface))
}

#[cfg(not(target_arch = "wasm32"))]
fn canvas_surface(
    _canvas: web_sys::HtmlCanvasElement,
) -> Result<(wgpu::Instance, wgpu::Surface<'static>), RenderError> {
    Err(RenderError::SurfaceCreation(
        "canvas surfaces need a wasm32 target".to_string(),
    ))
}

impl Gpu {
    /// Next texture to draw into; lost or outdated surfaces are reconfigured
    /// and the frame is skipped
    fn next_texture(&self) -> Result<wgpu::SurfaceTexture, RenderError> {
        self.surface.get_current_texture().map_err(|e| match e {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                self.surface.configure(&self.device, &self.config);
                RenderError::SurfaceLost
            }
            wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
            wgpu::SurfaceError::Timeout => RenderError::Timeout,
        })
    }
}

impl FrameRenderer for TunnelRenderer {
    fn draw(&mut self, uniforms: &UniformSet) -> Result<(), RenderError> {
        let gpu = self.gpu.as_ref().ok_or(RenderError::Released)?;

        gpu.tunnel.upload(&gpu.queue, &TunnelUniforms::from_set(uniforms));
        let frame = gpu.next_texture()?;
        let target = frame.texture.create_view(&Default::default());

        let mut encoder = gpu.device.create_command_encoder(&Default::default());
        gpu.tunnel.encode(&mut encoder, &target);
        gpu.queue.submit([encoder.finish()]);
        frame.present();
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        if width == 0 || height == 0 || (gpu.config.width, gpu.config.height) == (width, height) {
            return;
        }
        gpu.config.width = width;
        gpu.config.height = height;
        gpu.surface.configure(&gpu.device, &gpu.config);
    }

    fn release(&mut self) {
        if let Some(gpu) = self.gpu.take() {
            gpu.tunnel.destroy();
            gpu.device.destroy();
        }
    }
}
