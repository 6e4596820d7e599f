use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use cardpack_core::{NamingMode, PackConfig, Pngquant, build_pack};
use clap::{ArgAction, Parser};
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "cardpack",
    about = "Generate a Minecraft card resource pack from a folder of images",
    version,
    author
)]
struct Cli {
    /// Input directory of card images (.png/.jpg/.jpeg; created if missing)
    #[arg(long, default_value = "images", help_heading = "Input/Output")]
    images: PathBuf,
    /// YAML config file path (created with defaults on first run)
    #[arg(long, default_value = "cardpack.yaml", help_heading = "Input/Output")]
    config: PathBuf,
    /// pngquant binary invoked when the config enables it
    #[arg(long, default_value = "pngquant", help_heading = "Input/Output")]
    pngquant_bin: PathBuf,
    /// Print the effective configuration and exit
    #[arg(long, default_value_t = false, help_heading = "Logging/UX")]
    print_config: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);

    let cfg = load_or_init_config(&cli.config)?;
    if cli.print_config {
        println!("{}", serde_yaml::to_string(&cfg)?);
        return Ok(());
    }

    fs::create_dir_all(&cli.images)
        .with_context(|| format!("create images dir {}", cli.images.display()))?;

    let pngquant = Pngquant {
        binary: cli.pngquant_bin.clone(),
    };
    let report = build_pack(&cli.images, &cfg, Some(&pngquant))
        .with_context(|| format!("build pack from {}", cli.images.display()))?;

    info!(
        written = report.written(),
        failed = report.failed(),
        back = report.back_written,
        output = %cfg.output_dir.display(),
        "done"
    );
    Ok(())
}

/// Raw config file shape. Everything is optional and loosely typed so a bad
/// value degrades to its default with a warning instead of aborting the run.
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    start_id: Option<u32>,
    namespace: Option<String>,
    output_dir: Option<PathBuf>,
    pack_format: Option<u32>,
    description: Option<String>,
    autofit: Option<serde_yaml::Value>,
    mode: Option<String>,
    compress: Option<i64>,
    pngquant: Option<serde_yaml::Value>,
    pngquant_color: Option<i64>,
}

impl FileConfig {
    fn into_pack_config(self) -> PackConfig {
        let mut cfg = PackConfig::default();
        if let Some(v) = self.start_id {
            cfg.start_id = v;
        }
        if let Some(v) = self.namespace {
            cfg.namespace = v;
        }
        if let Some(v) = self.output_dir {
            cfg.output_dir = v;
        }
        if let Some(v) = self.pack_format {
            cfg.pack_format = v;
        }
        if let Some(v) = self.description {
            cfg.description = v;
        }
        if let Some(v) = &self.autofit {
            cfg.autofit = yaml_bool(v, cfg.autofit, "autofit");
        }
        if let Some(v) = self.mode {
            cfg.mode = v.parse().unwrap_or_else(|_| {
                warn!(mode = %v, "invalid mode, falling back to `id`");
                NamingMode::Id
            });
        }
        if let Some(v) = self.compress {
            if !(0..=100).contains(&v) {
                warn!(compress = v, "compress outside 0..=100, clamping");
            }
            cfg.compress = v.clamp(0, 100) as u8;
        }
        if let Some(v) = &self.pngquant {
            cfg.pngquant = yaml_bool(v, cfg.pngquant, "pngquant");
        }
        if let Some(v) = self.pngquant_color {
            if !(2..=256).contains(&v) {
                warn!(pngquant_color = v, "pngquant_color outside 2..=256, clamping");
            }
            cfg.pngquant_color = v.clamp(2, 256) as u32;
        }
        cfg.clamped()
    }
}

/// Accepts YAML booleans and boolean-ish strings; anything else warns and
/// falls back to the default.
fn yaml_bool(v: &serde_yaml::Value, default: bool, key: &str) -> bool {
    match v {
        serde_yaml::Value::Bool(b) => *b,
        serde_yaml::Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => true,
            "false" | "no" | "0" => false,
            _ => {
                warn!(key, value = %s, "invalid boolean, using default");
                default
            }
        },
        other => {
            warn!(key, value = ?other, "invalid boolean, using default");
            default
        }
    }
}

fn load_or_init_config(path: &Path) -> anyhow::Result<PackConfig> {
    if !path.exists() {
        let cfg = PackConfig::default();
        let text = serde_yaml::to_string(&cfg)?;
        fs::write(path, text).with_context(|| format!("write {}", path.display()))?;
        info!(path = %path.display(), "created default config file");
        return Ok(cfg);
    }
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let raw: FileConfig =
        serde_yaml::from_str(&text).with_context(|| format!("parse {}", path.display()))?;
    Ok(raw.into_pack_config())
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_mode_falls_back_to_id() {
        let raw: FileConfig =
            serde_yaml::from_str("mode: fancy\ncompress: 250\npngquant_color: 1024\n").unwrap();
        let cfg = raw.into_pack_config();
        assert_eq!(cfg.mode, NamingMode::Id);
        assert_eq!(cfg.compress, 100);
        assert_eq!(cfg.pngquant_color, 256);
    }

    #[test]
    fn boolean_strings_are_accepted() {
        let raw: FileConfig = serde_yaml::from_str("autofit: \"false\"\npngquant: \"yes\"\n").unwrap();
        let cfg = raw.into_pack_config();
        assert!(!cfg.autofit);
        assert!(cfg.pngquant);
    }

    #[test]
    fn bootstrap_writes_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cardpack.yaml");
        let cfg = load_or_init_config(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.namespace, "card");
        // round-trips through the raw shape
        let again = load_or_init_config(&path).unwrap();
        assert_eq!(again.pack_format, cfg.pack_format);
    }
}
