//! Tunnel shader
//!
//! The WGSL program drawn by the tunnel renderer, and a CPU evaluation of
//! the same fragment math used by tests and by the static fallback.

use crate::math::{Size, Vec2};

/// Smallest distance from the centre used by the pattern
pub const MIN_DISTANCE: f32 = 1e-4;

/// Tunnel shader: a 2x2 quad covering clip space and the polar fragment pattern
pub const SHADER_TUNNEL: &str = r#"
struct Uniforms {
    time: f32,
    scroll_offset: f32,
    resolution: vec2<f32>,
};

struct VsOut {
    @builtin(position) position: vec4<f32>,
};

@group(0) @binding(0) var<uniform> uniforms: Uniforms;

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> VsOut {
    // Two triangles spanning (-1, -1)..(1, 1)
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(-1.0, 1.0),
        vec2<f32>(-1.0, 1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(1.0, 1.0),
    );

    var out: VsOut;
    out.position = vec4<f32>(corners[vertex_index], 0.0, 1.0);
    return out;
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    let res = uniforms.resolution;

    // Framebuffer y grows downwards; the pattern is defined bottom-up
    let frag = vec2<f32>(in.position.x, res.y - in.position.y);
    let uv = (frag - res * 0.5) / min(res.x, res.y);

    let t = uniforms.time * 5.0 + uniforms.scroll_offset * 200.0;
    let dist = max(length(uv), 1e-4);
    let angle = atan2(uv.y, uv.x);

    let pattern = sin(angle / 0.1 + t * 0.5) * sin(20.0 / dist + t) - 1.0 + 1.0 / dist;
    let gray = clamp(pattern * 0.5, 0.0, 1.0);

    return vec4<f32>(vec3<f32>(gray), 1.0);
}
"#;

/// Number of vertices drawn per frame
pub const QUAD_VERTEX_COUNT: u32 = 6;

/// Raw pattern value at a pixel, before inversion and clamping
///
/// `frag` uses a bottom-left origin, as the shader does after its flip.
pub fn tunnel_pattern(frag: Vec2, time: f32, scroll_offset: f32, resolution: Size) -> f32 {
    let min_side = resolution.min_side().max(1.0);
    let uv = (frag - resolution.center()) * (1.0 / min_side);

    let t = time * 5.0 + scroll_offset * 200.0;
    let dist = uv.length().max(MIN_DISTANCE);
    let angle = uv.angle();

    (angle / 0.1 + t * 0.5).sin() * (20.0 / dist + t).sin() - 1.0 + 1.0 / dist
}

/// Grayscale output at a pixel, in `[0, 1]`
pub fn tunnel_gray(frag: Vec2, time: f32, scroll_offset: f32, resolution: Size) -> f32 {
    let monochrome = 1.0 - tunnel_pattern(frag, time, scroll_offset, resolution) * 0.5;
    (1.0 - monochrome).clamp(0.0, 1.0)
}

/// RGBA output at a pixel
pub fn tunnel_color(frag: Vec2, time: f32, scroll_offset: f32, resolution: Size) -> [f32; 4] {
    let gray = tunnel_gray(frag, time, scroll_offset, resolution);
    [gray, gray, gray, 1.0]
}

#[cfg(test)]
mod tests {
    use super::*;

    const RES: Size = Size::new(800.0, 600.0);

    #[test]
    fn test_tunnel_known_pixel() {
        // uv = (0.5, 0), angle 0, dist 0.5, t = 65
        let pattern = tunnel_pattern(Vec2::new(700.0, 300.0), 5.0, 0.2, RES);
        assert!((pattern - 0.1422).abs() < 0.001);

        let gray = tunnel_gray(Vec2::new(700.0, 300.0), 5.0, 0.2, RES);
        assert!((gray - 0.0711).abs() < 0.001);
    }

    #[test]
    fn test_tunnel_center_is_finite() {
        let color = tunnel_color(Vec2::new(400.0, 300.0), 5.0, 0.2, RES);
        assert!(color.iter().all(|c| c.is_finite()));
        assert!((color[0] - 1.0).abs() < 0.001);
        assert!((color[3] - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_tunnel_output_range() {
        for y in (0..600).step_by(37) {
            for x in (0..800).step_by(41) {
                let gray = tunnel_gray(Vec2::new(x as f32, y as f32), 5.0, 0.2, RES);
                assert!((0.0..=1.0).contains(&gray));
            }
        }
    }

    #[test]
    fn test_scroll_offset_shifts_phase() {
        let frag = Vec2::new(100.0, 100.0);
        let a = tunnel_pattern(frag, 5.0, 0.2, RES);
        let b = tunnel_pattern(frag, 5.0, 0.25, RES);
        assert!((a - b).abs() > 0.0001);
    }

    #[test]
    fn test_shader_source_entry_points() {
        assert!(SHADER_TUNNEL.contains("fn vs_main"));
        assert!(SHADER_TUNNEL.contains("fn fs_main"));
        assert!(SHADER_TUNNEL.contains("scroll_offset: f32"));
    }
}
