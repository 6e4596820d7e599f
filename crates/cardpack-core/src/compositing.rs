use image::{Rgba, RgbaImage};

/// Alpha-composite `src` onto `canvas`, centered. Leftover space on each axis
/// is split with floor division, so any odd pixel goes to the right/bottom.
///
/// Per channel: `out = src * a + dst * (1 - a)` with `a = src_alpha / 255`;
/// output alpha is `max(src_alpha, dst_alpha)`. Sources wider or taller than
/// the canvas are clipped at the canvas edge.
pub fn composite_centered(src: &RgbaImage, canvas: &mut RgbaImage) {
    let (cw, ch) = canvas.dimensions();
    let (sw, sh) = src.dimensions();
    let dx = cw.saturating_sub(sw) / 2;
    let dy = ch.saturating_sub(sh) / 2;

    for yy in 0..sh {
        for xx in 0..sw {
            if dx + xx >= cw || dy + yy >= ch {
                continue;
            }
            let sp = *src.get_pixel(xx, yy);
            let dp = *canvas.get_pixel(dx + xx, dy + yy);
            let a = sp[3] as f32 / 255.0;
            let blend =
                |s: u8, d: u8| -> u8 { (s as f32 * a + d as f32 * (1.0 - a)).round() as u8 };
            canvas.put_pixel(
                dx + xx,
                dy + yy,
                Rgba([
                    blend(sp[0], dp[0]),
                    blend(sp[1], dp[1]),
                    blend(sp[2], dp[2]),
                    sp[3].max(dp[3]),
                ]),
            );
        }
    }
}
