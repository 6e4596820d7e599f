//! Median-cut palette quantization for the lossy encode path.
//!
//! Only the RGB channels are quantized; the alpha channel is carried through
//! untouched so transparency survives compression exactly.

use image::RgbaImage;
use std::collections::HashMap;

/// Palette size for a 0..=100 quality percentage: `max(2, round(256 * q / 100))`.
pub fn palette_size_for_quality(quality: u8) -> usize {
    let n = (256.0 * quality as f64 / 100.0).round() as usize;
    n.max(2)
}

/// Quantizes the RGB channels of `img` to at most `max_colors` distinct colors
/// using median-cut over the set of unique colors. Alpha is preserved exactly.
pub fn quantize_rgb(img: &RgbaImage, max_colors: usize) -> RgbaImage {
    let max_colors = max_colors.max(2);
    let mut unique: Vec<[u8; 3]> = Vec::new();
    let mut seen: HashMap<[u8; 3], ()> = HashMap::new();
    for p in img.pixels() {
        let c = [p[0], p[1], p[2]];
        if seen.insert(c, ()).is_none() {
            unique.push(c);
        }
    }
    if unique.len() <= max_colors {
        return img.clone();
    }

    let palette = median_cut(&unique, max_colors);

    // Remap each unique color once, then rewrite pixels through the table.
    let mut table: HashMap<[u8; 3], [u8; 3]> = HashMap::with_capacity(unique.len());
    for c in &unique {
        table.insert(*c, nearest(&palette, *c));
    }
    let mut out = img.clone();
    for p in out.pixels_mut() {
        let mapped = table[&[p[0], p[1], p[2]]];
        p[0] = mapped[0];
        p[1] = mapped[1];
        p[2] = mapped[2];
    }
    out
}

/// Splits the color set into at most `max_colors` boxes, cutting the box with
/// the widest channel range at its median, and averages each box into a
/// palette entry.
fn median_cut(colors: &[[u8; 3]], max_colors: usize) -> Vec<[u8; 3]> {
    let mut boxes: Vec<Vec<[u8; 3]>> = vec![colors.to_vec()];
    while boxes.len() < max_colors {
        // Widest box by channel range; boxes of one color cannot split.
        let mut widest: Option<(usize, usize, u8)> = None; // (box idx, channel, range)
        for (i, b) in boxes.iter().enumerate() {
            if b.len() < 2 {
                continue;
            }
            for ch in 0..3 {
                let min = b.iter().map(|c| c[ch]).min().unwrap_or(0);
                let max = b.iter().map(|c| c[ch]).max().unwrap_or(0);
                let range = max - min;
                if widest.map_or(true, |(_, _, r)| range > r) {
                    widest = Some((i, ch, range));
                }
            }
        }
        let Some((idx, ch, range)) = widest else {
            break;
        };
        if range == 0 {
            break;
        }
        let mut b = boxes.swap_remove(idx);
        b.sort_by_key(|c| c[ch]);
        let mid = b.len() / 2;
        let hi = b.split_off(mid);
        boxes.push(b);
        boxes.push(hi);
    }
    boxes.iter().map(|b| average(b)).collect()
}

fn average(colors: &[[u8; 3]]) -> [u8; 3] {
    if colors.is_empty() {
        return [0, 0, 0];
    }
    let n = colors.len() as u64;
    let mut sum = [0u64; 3];
    for c in colors {
        for ch in 0..3 {
            sum[ch] += c[ch] as u64;
        }
    }
    [
        (sum[0] / n) as u8,
        (sum[1] / n) as u8,
        (sum[2] / n) as u8,
    ]
}

fn nearest(palette: &[[u8; 3]], c: [u8; 3]) -> [u8; 3] {
    let mut best = palette[0];
    let mut best_d = u32::MAX;
    for p in palette {
        let d = dist2(*p, c);
        if d < best_d {
            best_d = d;
            best = *p;
        }
    }
    best
}

fn dist2(a: [u8; 3], b: [u8; 3]) -> u32 {
    let mut d = 0u32;
    for ch in 0..3 {
        let diff = a[ch] as i32 - b[ch] as i32;
        d += (diff * diff) as u32;
    }
    d
}
