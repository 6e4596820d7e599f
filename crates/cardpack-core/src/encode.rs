use crate::error::{CardPackError, Result};
use crate::optimizer::{OptimizeOutcome, PngOptimizer};
use crate::quantize;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Writes `img` as a PNG at `dest`, rewriting whatever extension `dest`
/// carries to `.png`. Returns the final path written.
///
/// Quality 100 encodes losslessly at maximum compression. Below 100 the RGB
/// channels are palette-quantized (`max(2, round(256 * q / 100))` colors)
/// while alpha passes through untouched. When an optimizer is supplied, the
/// encode goes to a sibling `.tmp.png` file, is handed to the optimizer, and
/// the temp is promoted to the final path if the optimizer fails or finds no
/// improvement. The temp file is removed on every exit path.
pub fn save_png(
    img: &RgbaImage,
    dest: &Path,
    quality: u8,
    optimizer: Option<&dyn PngOptimizer>,
    max_colors: u32,
) -> Result<PathBuf> {
    let final_path = dest.with_extension("png");
    let file_name = final_path
        .file_name()
        .ok_or_else(|| CardPackError::Encode(format!("no file name in {}", dest.display())))?
        .to_string_lossy()
        .into_owned();
    let tmp_path = final_path.with_file_name(format!("{file_name}.tmp.png"));

    if let Err(e) = encode_to(img, &tmp_path, quality) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    match optimizer {
        Some(opt) => match opt.optimize(&tmp_path, &final_path, max_colors) {
            Ok(OptimizeOutcome::Optimized) => {
                fs::remove_file(&tmp_path)?;
            }
            Ok(OptimizeOutcome::Unchanged) => {
                fs::rename(&tmp_path, &final_path)?;
            }
            Err(e) => {
                warn!(path = %final_path.display(), error = %e, "optimizer failed, keeping unoptimized encode");
                fs::rename(&tmp_path, &final_path)?;
            }
        },
        None => {
            fs::rename(&tmp_path, &final_path)?;
        }
    }
    Ok(final_path)
}

fn encode_to(img: &RgbaImage, path: &Path, quality: u8) -> Result<()> {
    let quality = quality.min(100);
    let quantized;
    let to_write = if quality < 100 {
        quantized = quantize::quantize_rgb(img, quantize::palette_size_for_quality(quality));
        &quantized
    } else {
        img
    };

    let file = File::create(path)?;
    let encoder = PngEncoder::new_with_quality(
        BufWriter::new(file),
        CompressionType::Best,
        PngFilterType::Adaptive,
    );
    let (w, h) = to_write.dimensions();
    encoder
        .write_image(to_write.as_raw(), w, h, ExtendedColorType::Rgba8)
        .map_err(|e| CardPackError::Encode(e.to_string()))?;
    Ok(())
}
