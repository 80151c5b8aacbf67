use crate::image_pipeline::debayer::RgbImageData;
use crate::image_pipeline::debayer::types::{BLUE, GREEN, RED};

/// Side of the square figure window, in pixels
pub const FIGURE_SIZE: usize = 500;

const BACKGROUND: u32 = 0x00FF_FFFF;

/// Renders `image` into a `side`x`side` 0RGB framebuffer.
///
/// The image is scaled (nearest neighbour) to fit while keeping its aspect
/// ratio, centered on a white background, and stretched linearly so the
/// brightest sample maps to full intensity.
pub fn render_figure(image: &RgbImageData, side: usize) -> Vec<u32> {
    let mut buffer = vec![BACKGROUND; side * side];
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 || side == 0 {
        return buffer;
    }

    let scale = (side as f64 / width as f64).min(side as f64 / height as f64);
    let draw_w = ((width as f64 * scale).round() as usize).clamp(1, side);
    let draw_h = ((height as f64 * scale).round() as usize).clamp(1, side);
    let left = (side - draw_w) / 2;
    let top = (side - draw_h) / 2;

    let max = image.max_value();
    let gain = if max > 0.0 { 255.0 / max } else { 0.0 };
    let to_u8 = |v: f32| (v * gain).clamp(0.0, 255.0) as u32;

    for dy in 0..draw_h {
        let sy = dy * height / draw_h;
        for dx in 0..draw_w {
            let sx = dx * width / draw_w;
            let r = to_u8(image.pixels[[sy, sx, RED]]);
            let g = to_u8(image.pixels[[sy, sx, GREEN]]);
            let b = to_u8(image.pixels[[sy, sx, BLUE]]);
            buffer[(top + dy) * side + left + dx] = (r << 16) | (g << 8) | b;
        }
    }
    buffer
}
