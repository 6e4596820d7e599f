use crate::error::{CardPackError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Result of handing a PNG to an optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizeOutcome {
    /// The optimizer wrote an improved file to the output path.
    Optimized,
    /// The input was already optimal; no output was produced.
    Unchanged,
}

/// Pluggable lossy PNG optimizer. The encoder works without one; when present
/// it gets the intermediate encode and may produce a smaller final file.
pub trait PngOptimizer {
    fn optimize(&self, input: &Path, output: &Path, max_colors: u32) -> Result<OptimizeOutcome>;
}

/// Invokes the external `pngquant` binary.
///
/// Exit code 0 means an optimized file was written; 98 means pngquant found no
/// improvement (treated as success, the caller keeps its own encode). Any other
/// code is surfaced as an error so the caller can fall back.
#[derive(Debug, Clone)]
pub struct Pngquant {
    pub binary: PathBuf,
}

impl Default for Pngquant {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("pngquant"),
        }
    }
}

impl PngOptimizer for Pngquant {
    fn optimize(&self, input: &Path, output: &Path, max_colors: u32) -> Result<OptimizeOutcome> {
        let out = Command::new(&self.binary)
            .arg(max_colors.to_string())
            .args(["--quality", "60-90", "--speed", "3", "--strip", "--force"])
            .arg("--output")
            .arg(output)
            .arg(input)
            .output()
            .map_err(|e| {
                CardPackError::ExternalTool(format!(
                    "failed to run {}: {}",
                    self.binary.display(),
                    e
                ))
            })?;
        match out.status.code() {
            Some(0) => Ok(OptimizeOutcome::Optimized),
            Some(98) => Ok(OptimizeOutcome::Unchanged),
            code => Err(CardPackError::ExternalTool(format!(
                "pngquant exited with {:?}: {}",
                code,
                String::from_utf8_lossy(&out.stderr).trim()
            ))),
        }
    }
}
