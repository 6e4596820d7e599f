use serde::{Deserialize, Serialize};

/// Fixed width of every emitted texture, in pixels.
pub const CANVAS_WIDTH: u32 = 650;
/// Fixed height of every emitted texture, in pixels.
pub const CANVAS_HEIGHT: u32 = 900;

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

/// Mapping from a generated output name back to its source file.
/// Only populated under the sanitized-name policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamingRecord {
    /// Original file name as found in the input folder.
    pub original: String,
    /// Sanitized base name (no extension) used for texture and descriptors.
    pub clean_name: String,
}

/// What happened to a single source image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ImageOutcome {
    /// Texture written under this base name (no extension).
    Written { name: String },
    /// Load, processing or encode failed; the batch continued.
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageResult {
    /// Source file name within the input folder.
    pub source: String,
    pub outcome: ImageOutcome,
}

/// Batch-level outcome of a pack run. Per-image failures never abort the run,
/// so callers assert on this report rather than on an exit code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    /// True if a shared back texture was produced this run.
    pub back_written: bool,
    /// One entry per source image, in processing order (back file included).
    pub results: Vec<ImageResult>,
    /// Base names of successfully written front textures, in assignment order.
    pub textures: Vec<String>,
    /// Name-to-source mapping (sanitized-name policy only).
    pub name_map: Vec<NamingRecord>,
}

impl RunReport {
    pub fn written(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, ImageOutcome::Written { .. }))
            .count()
    }
    pub fn failed(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, ImageOutcome::Failed { .. }))
            .count()
    }
}
