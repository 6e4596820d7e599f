use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

/// How output textures are named.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NamingMode {
    /// Strictly increasing integer counter starting at `start_id`.
    Id,
    /// Sanitized source file name (lowercase, word chars and hyphens only).
    Name,
}

impl FromStr for NamingMode {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            _ => Err(()),
        }
    }
}

/// Run configuration for a pack build.
/// Key notes:
///   - `mode` selects ID vs. sanitized-name output naming
///   - `compress` is a 0..=100 quality; below 100 the encoder quantizes RGB
///   - `pngquant` routes the encoded file through the external optimizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackConfig {
    /// First sequential ID issued under the ID naming policy.
    pub start_id: u32,
    /// Resource namespace used in generated identifiers and paths.
    pub namespace: String,
    /// Root directory of the generated pack.
    pub output_dir: PathBuf,
    /// `pack_format` written into pack.mcmeta.
    pub pack_format: u32,
    /// Description string written into pack.mcmeta.
    pub description: String,
    /// Stretch to the full canvas instead of letterboxing.
    pub autofit: bool,
    #[serde(default = "default_mode")]
    pub mode: NamingMode,
    /// PNG quality percentage, clamped into 0..=100.
    pub compress: u8,
    /// Invoke the external PNG optimizer after encoding.
    pub pngquant: bool,
    /// Max palette size for the optimizer and in-process quantization.
    pub pngquant_color: u32,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            start_id: 1,
            namespace: "card".into(),
            output_dir: PathBuf::from("CARD_RP"),
            pack_format: 46,
            description: "A Minecraft card game resource pack.".into(),
            autofit: true,
            mode: default_mode(),
            compress: 100,
            pngquant: false,
            pngquant_color: 256,
        }
    }
}

fn default_mode() -> NamingMode {
    NamingMode::Id
}

impl PackConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::CardPackError;

        if self.namespace.is_empty() {
            return Err(CardPackError::InvalidConfig(
                "namespace must not be empty".into(),
            ));
        }
        if self
            .namespace
            .chars()
            .any(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-'))
        {
            return Err(CardPackError::InvalidConfig(format!(
                "namespace `{}` contains characters outside [a-z0-9_-]",
                self.namespace
            )));
        }
        Ok(())
    }

    /// Clamps out-of-range numeric values into their documented ranges,
    /// warning on each adjustment. Degrades rather than aborts.
    pub fn clamped(mut self) -> Self {
        if self.compress > 100 {
            warn!(compress = self.compress, "compress above 100, clamping");
            self.compress = 100;
        }
        if !(2..=256).contains(&self.pngquant_color) {
            warn!(
                pngquant_color = self.pngquant_color,
                "pngquant_color outside 2..=256, clamping"
            );
            self.pngquant_color = self.pngquant_color.clamp(2, 256);
        }
        self
    }

    /// Create a fluent builder for `PackConfig`.
    pub fn builder() -> PackConfigBuilder {
        PackConfigBuilder::new()
    }
}

/// Builder for `PackConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct PackConfigBuilder {
    cfg: PackConfig,
}

impl PackConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: PackConfig::default(),
        }
    }
    pub fn start_id(mut self, v: u32) -> Self {
        self.cfg.start_id = v;
        self
    }
    pub fn namespace(mut self, v: impl Into<String>) -> Self {
        self.cfg.namespace = v.into();
        self
    }
    pub fn output_dir(mut self, v: impl Into<PathBuf>) -> Self {
        self.cfg.output_dir = v.into();
        self
    }
    pub fn pack_format(mut self, v: u32) -> Self {
        self.cfg.pack_format = v;
        self
    }
    pub fn description(mut self, v: impl Into<String>) -> Self {
        self.cfg.description = v.into();
        self
    }
    pub fn autofit(mut self, v: bool) -> Self {
        self.cfg.autofit = v;
        self
    }
    pub fn mode(mut self, v: NamingMode) -> Self {
        self.cfg.mode = v;
        self
    }
    pub fn compress(mut self, v: u8) -> Self {
        self.cfg.compress = v;
        self
    }
    pub fn pngquant(mut self, v: bool) -> Self {
        self.cfg.pngquant = v;
        self
    }
    pub fn pngquant_color(mut self, v: u32) -> Self {
        self.cfg.pngquant_color = v;
        self
    }
    pub fn build(self) -> PackConfig {
        self.cfg
    }
}
