//! Procedural point-sprite texture.
//!
//! A single soft radial glow, generated once at startup and sampled by the
//! fragment shader. White RGB with an alpha falloff; the particle color is
//! multiplied in at draw time.

/// Texture edge length in pixels.
pub const SPRITE_SIZE: u32 = 64;

/// Alpha gradient stops as (normalized radius, alpha) pairs: a bright core,
/// a fast shoulder, and a long transparent tail.
const STOPS: [(f32, f32); 4] = [(0.0, 1.0), (0.2, 0.8), (0.5, 0.2), (1.0, 0.0)];

/// Build the glow sprite as tightly packed RGBA bytes.
///
/// Output length is `size * size * 4`. Alpha follows the piecewise-linear
/// gradient in [`STOPS`] over distance from the texel center; RGB stays
/// white so blending owns the color.
pub fn glow_sprite(size: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity((size * size * 4) as usize);
    let center = (size as f32 - 1.0) / 2.0;
    let radius = size as f32 / 2.0;

    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            let dist = (dx * dx + dy * dy).sqrt() / radius;
            let alpha = (falloff(dist) * 255.0).round() as u8;
            data.extend_from_slice(&[255, 255, 255, alpha]);
        }
    }

    data
}

/// Alpha at a normalized distance from the sprite center.
fn falloff(dist: f32) -> f32 {
    if dist >= 1.0 {
        return 0.0;
    }
    for pair in STOPS.windows(2) {
        let (d0, a0) = pair[0];
        let (d1, a1) = pair[1];
        if dist <= d1 {
            let t = (dist - d0) / (d1 - d0);
            return a0 + (a1 - a0) * t;
        }
    }
    0.0
}
