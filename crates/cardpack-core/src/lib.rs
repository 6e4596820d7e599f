//! Core library for generating Minecraft card resource packs from folders of art.
//!
//! - Pipeline: load -> crop transparent borders -> fit to the 650x900 canvas ->
//!   encode PNG (optionally palette-quantized or handed to an external optimizer)
//! - Naming: sequential IDs or sanitized source names; a `back` image becomes
//!   the shared back-face texture
//! - Descriptors: item/model JSON per texture plus one `pack.mcmeta` per run
//!
//! Quick example:
//! ```ignore
//! use cardpack_core::{PackConfig, build_pack};
//! # fn main() -> anyhow::Result<()> {
//! let cfg = PackConfig::builder().namespace("card").start_id(1).build();
//! let report = build_pack("images".as_ref(), &cfg, None)?;
//! println!("written: {}", report.written());
//! # Ok(()) }
//! ```

pub mod compositing;
pub mod config;
pub mod encode;
pub mod error;
pub mod export;
pub mod model;
pub mod naming;
pub mod optimizer;
pub mod pipeline;
pub mod quantize;

pub use config::*;
pub use error::*;
pub use model::*;
pub use optimizer::*;
pub use pipeline::*;

/// Convenience prelude for common types and functions.
/// Importing `cardpack_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{NamingMode, PackConfig, PackConfigBuilder};
    pub use crate::model::{
        CANVAS_HEIGHT, CANVAS_WIDTH, ImageOutcome, ImageResult, NamingRecord, Rect, RunReport,
    };
    pub use crate::naming::{AssetNamer, is_back_file, sanitize_file_name};
    pub use crate::optimizer::{OptimizeOutcome, Pngquant, PngOptimizer};
    pub use crate::{build_pack, enumerate_images, fit_to_canvas, load_rgba, process_image};
}
