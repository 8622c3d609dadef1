//! Adapter, device and surface setup for the tunnel canvas

use crate::error::RenderError;

/// Pick an adapter that can present to `surface` and open a device on it
///
/// Limits stay at the WebGL2 baseline so the GL fallback backend works too.
pub(super) async fn acquire_device(
    instance: &wgpu::Instance,
    surface: &wgpu::Surface<'static>,
) -> Result<(wgpu::Adapter, wgpu::Device, wgpu::Queue), RenderError> {
    let options = wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::LowPower,
        force_fallback_adapter: false,
        compatible_surface: Some(surface),
    };
    let Some(adapter) = instance.request_adapter(&options).await else {
        return Err(RenderError::AdapterUnavailable);
    };

    let descriptor = wgpu::DeviceDescriptor {
        label: Some("folio tunnel device"),
        required_features: wgpu::Features::empty(),
        required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
        memory_hints: wgpu::MemoryHints::Performance,
    };
    match adapter.request_device(&descriptor, None).await {
        Ok((device, queue)) => Ok((adapter, device, queue)),
        Err(e) => Err(RenderError::DeviceRequest(e.to_string())),
    }
}

/// Surface configuration for a canvas of `width` x `height` device pixels
///
/// Prefers an sRGB format and an opaque canvas; zero sizes become 1.
pub(super) fn surface_config(
    formats: &[wgpu::TextureFormat],
    alpha_modes: &[wgpu::CompositeAlphaMode],
    width: u32,
    height: u32,
) -> Result<wgpu::SurfaceConfiguration, RenderError> {
    let format = match formats.iter().find(|format| format.is_srgb()) {
        Some(format) => *format,
        None => *formats.first().ok_or_else(|| {
            RenderError::SurfaceCreation("surface reports no texture formats".to_string())
        })?,
    };

    let alpha_mode = if alpha_modes.contains(&wgpu::CompositeAlphaMode::Opaque) {
        wgpu::CompositeAlphaMode::Opaque
    } else {
        alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto)
    };

    Ok(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: width.max(1),
        height: height.max(1),
        present_mode: wgpu::PresentMode::AutoVsync,
        desired_maximum_frame_latency: 2,
        alpha_mode,
        view_formats: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode, TextureFormat};

    #[test]
    fn test_prefers_srgb_and_opaque() {
        let config = surface_config(
            &[TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb],
            &[CompositeAlphaMode::PreMultiplied, CompositeAlphaMode::Opaque],
            1600,
            1200,
        )
        .unwrap();
        assert_eq!(config.format, TextureFormat::Bgra8UnormSrgb);
        assert_eq!(config.alpha_mode, CompositeAlphaMode::Opaque);
        assert_eq!((config.width, config.height), (1600, 1200));
    }

    #[test]
    fn test_falls_back_to_first_format() {
        let config = surface_config(&[TextureFormat::Rgba8Unorm], &[], 0, 0).unwrap();
        assert_eq!(config.format, TextureFormat::Rgba8Unorm);
        assert_eq!(config.alpha_mode, CompositeAlphaMode::Auto);
        assert_eq!((config.width, config.height), (1, 1));
    }

    #[test]
    fn test_no_formats_is_an_error() {
        let result = surface_config(&[], &[CompositeAlphaMode::Opaque], 800, 600);
        assert!(matches!(result, Err(RenderError::SurfaceCreation(_))));
    }
}
