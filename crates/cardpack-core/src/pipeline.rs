use crate::compositing::composite_centered;
use crate::config::PackConfig;
use crate::encode::save_png;
use crate::error::{CardPackError, Result};
use crate::export;
use crate::model::{CANVAS_HEIGHT, CANVAS_WIDTH, ImageOutcome, ImageResult, Rect, RunReport};
use crate::naming::{AssetNamer, is_back_file};
use crate::optimizer::PngOptimizer;
use image::imageops::{self, FilterType};
use image::{ImageReader, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};
use walkdir::WalkDir;

/// Decodes the image at `path` into an RGBA8 buffer. Three-channel sources get
/// a fully opaque alpha channel synthesized; four-channel sources keep their
/// pixel values with channels reordered to RGBA.
pub fn load_rgba(path: &Path) -> Result<RgbaImage> {
    let img = ImageReader::open(path)
        .map_err(|e| CardPackError::Load {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?
        .with_guessed_format()
        .map_err(|e| CardPackError::Load {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?
        .decode()
        .map_err(|e| CardPackError::Load {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    Ok(img.to_rgba8())
}

/// Tightest rectangle enclosing every pixel with alpha > 0. If no such pixel
/// exists the full image rectangle is returned, so a degenerate image passes
/// through uncropped.
pub fn content_rect(rgba: &RgbaImage) -> Rect {
    let (w, h) = rgba.dimensions();
    let mut x1 = w;
    let mut y1 = h;
    let mut x2 = 0u32;
    let mut y2 = 0u32;
    let mut any = false;
    for (x, y, p) in rgba.enumerate_pixels() {
        if p[3] > 0 {
            any = true;
            x1 = x1.min(x);
            y1 = y1.min(y);
            x2 = x2.max(x);
            y2 = y2.max(y);
        }
    }
    if !any {
        return Rect::new(0, 0, w, h);
    }
    Rect::new(x1, y1, x2 - x1 + 1, y2 - y1 + 1)
}

/// Trims fully transparent borders down to the content bounding rectangle.
pub fn crop_to_content(rgba: &RgbaImage) -> RgbaImage {
    let (w, h) = rgba.dimensions();
    let r = content_rect(rgba);
    if r.w == w && r.h == h {
        return rgba.clone();
    }
    imageops::crop_imm(rgba, r.x, r.y, r.w, r.h).to_image()
}

/// Resizes `rgba` onto the fixed 650x900 canvas.
///
/// With `autofit` the image is stretched to fill, ignoring aspect ratio. Without
/// it, a single uniform factor `min(650/w, 900/h)` scales the image and the
/// result is alpha-composited centered on a fully transparent canvas.
pub fn fit_to_canvas(rgba: &RgbaImage, autofit: bool) -> RgbaImage {
    if autofit {
        return imageops::resize(rgba, CANVAS_WIDTH, CANVAS_HEIGHT, FilterType::Triangle);
    }
    let (w, h) = rgba.dimensions();
    let scale = (CANVAS_WIDTH as f64 / w as f64).min(CANVAS_HEIGHT as f64 / h as f64);
    let new_w = ((w as f64 * scale) as u32).max(1);
    let new_h = ((h as f64 * scale) as u32).max(1);
    let resized = imageops::resize(rgba, new_w, new_h, FilterType::Triangle);
    let mut canvas = RgbaImage::new(CANVAS_WIDTH, CANVAS_HEIGHT);
    composite_centered(&resized, &mut canvas);
    canvas
}

/// Crop + fit, the per-image geometry pipeline.
pub fn process_image(rgba: &RgbaImage, autofit: bool) -> RgbaImage {
    fit_to_canvas(&crop_to_content(rgba), autofit)
}

fn is_image(p: &Path) -> bool {
    matches!(
        p.extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase()),
        Some(ext) if matches!(ext.as_str(), "png" | "jpg" | "jpeg")
    )
}

/// Lists the image files in `dir` (flat, no recursion), sorted lexicographically
/// by file name so ID assignment is deterministic across platforms.
pub fn enumerate_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut list: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let p = entry.path();
        if entry.file_type().is_file() && is_image(p) {
            list.push(p.to_path_buf());
        }
    }
    list.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(list)
}

struct OutputDirs {
    items: PathBuf,
    models: PathBuf,
    textures: PathBuf,
}

fn create_output_dirs(cfg: &PackConfig) -> Result<OutputDirs> {
    let assets = cfg.output_dir.join("assets").join(&cfg.namespace);
    let dirs = OutputDirs {
        items: assets.join("items"),
        models: assets.join("models").join("item"),
        textures: assets.join("textures").join("item"),
    };
    for d in [&dirs.items, &dirs.models, &dirs.textures] {
        fs::create_dir_all(d)?;
    }
    Ok(dirs)
}

fn process_and_write(
    path: &Path,
    dest: &Path,
    cfg: &PackConfig,
    optimizer: Option<&dyn PngOptimizer>,
) -> Result<()> {
    let rgba = load_rgba(path)?;
    let processed = process_image(&rgba, cfg.autofit);
    save_png(&processed, dest, cfg.compress, optimizer, cfg.pngquant_color)?;
    Ok(())
}

/// Builds the resource pack from the images in `images_dir` per `cfg`.
///
/// Control flow: the back-face image (base name "back", any case) is processed
/// first to the fixed name `back.png`, then every remaining image runs through
/// load, crop, fit and encode with a name assigned by the configured policy.
/// A failure in one image is logged and recorded but never aborts the batch;
/// directory creation and manifest writing failures are fatal.
#[instrument(skip_all)]
pub fn build_pack(
    images_dir: &Path,
    cfg: &PackConfig,
    optimizer: Option<&dyn PngOptimizer>,
) -> Result<RunReport> {
    cfg.validate()?;
    let dirs = create_output_dirs(cfg)?;
    let optimizer = if cfg.pngquant { optimizer } else { None };

    let mut files = enumerate_images(images_dir)?;
    let mut report = RunReport::default();

    if let Some(pos) = files.iter().position(|p| is_back_file(p)) {
        let back = files.remove(pos);
        let source = file_name_of(&back);
        match process_and_write(&back, &dirs.textures.join("back.png"), cfg, optimizer) {
            Ok(()) => {
                info!(source = %source, "back texture written");
                report.back_written = true;
                report.results.push(ImageResult {
                    source,
                    outcome: ImageOutcome::Written {
                        name: "back".into(),
                    },
                });
            }
            Err(e) => {
                warn!(source = %source, error = %e, "back texture failed");
                report.results.push(ImageResult {
                    source,
                    outcome: ImageOutcome::Failed {
                        reason: e.to_string(),
                    },
                });
            }
        }
    } else {
        warn!("no back image found; card fronts will double as the back texture");
    }

    let total = files.len();
    let mut namer = AssetNamer::new(cfg.mode, cfg.start_id);
    for (idx, path) in files.iter().enumerate() {
        let source = file_name_of(path);
        let rgba = match load_rgba(path) {
            Ok(rgba) => rgba,
            Err(e) => {
                warn!(source = %source, error = %e, "image failed");
                report.results.push(ImageResult {
                    source,
                    outcome: ImageOutcome::Failed {
                        reason: e.to_string(),
                    },
                });
                continue;
            }
        };
        let processed = process_image(&rgba, cfg.autofit);
        let base = namer.assign(&source);
        let dest = dirs.textures.join(format!("{base}.png"));
        match save_png(&processed, &dest, cfg.compress, optimizer, cfg.pngquant_color) {
            Ok(_) => {
                info!(progress = format!("{}/{}", idx + 1, total), texture = %base, "texture written");
                report.textures.push(base.clone());
                report.results.push(ImageResult {
                    source,
                    outcome: ImageOutcome::Written { name: base },
                });
            }
            Err(e) => {
                warn!(source = %source, error = %e, "encode failed");
                report.results.push(ImageResult {
                    source,
                    outcome: ImageOutcome::Failed {
                        reason: e.to_string(),
                    },
                });
            }
        }
    }
    report.name_map = namer.into_records();

    // Descriptors are an order-independent map over the written textures;
    // each write is independent of the others.
    for base in &report.textures {
        let item = export::item_descriptor(&cfg.namespace, base);
        if let Err(e) = export::write_json(&dirs.items.join(format!("{base}.json")), &item) {
            warn!(texture = %base, error = %e, "item descriptor failed");
        }
        let model = export::model_descriptor(&cfg.namespace, base, report.back_written);
        if let Err(e) = export::write_json(&dirs.models.join(format!("{base}.json")), &model) {
            warn!(texture = %base, error = %e, "model descriptor failed");
        }
    }

    let manifest = export::pack_manifest(cfg.pack_format, &cfg.description);
    export::write_json(&cfg.output_dir.join("pack.mcmeta"), &manifest)?;

    info!(
        written = report.written(),
        failed = report.failed(),
        output = %cfg.output_dir.display(),
        "resource pack generated"
    );
    Ok(report)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
