//! Config file loading

use super::Config;
use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use figment::Figment;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "OBFMAP_";

/// Table that may wrap the settings inside a shared config file.
const NESTED_SECTION: &str = "obfmap";

pub fn load_config(base_dir: &Path, config_path: Option<&Path>) -> Result<Config> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(base_dir),
    };

    let file_config = match discovered {
        None => Config::default(),
        Some(config_file) => match load_config_file(&config_file) {
            Ok(cfg) => cfg,
            Err(e) if config_path_provided => return Err(e),
            Err(e) => {
                // Auto-discovered: warn and fall back to defaults
                tracing::warn!(
                    "Failed to load auto-discovered config {}: {:#}",
                    config_file.display(),
                    e
                );
                Config::default()
            }
        },
    };

    Figment::from(Serialized::defaults(file_config))
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()
        .with_context(|| format!("Invalid {}* environment configuration", ENV_PREFIX))
}

/// Parse one config file on top of the defaults.
fn load_config_file(config_file: &Path) -> Result<Config> {
    let content = fs::read_to_string(config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;

    let ext =
        config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    let layer = match ext.as_str() {
        "toml" => Figment::from(Toml::string(&content)),
        "yaml" | "yml" => Figment::from(Yaml::string(&content)),
        other => anyhow::bail!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        ),
    };

    let layer = if layer.contains(NESTED_SECTION) { layer.focus(NESTED_SECTION) } else { layer };

    let config = Figment::from(Serialized::defaults(Config::default()))
        .merge(layer)
        .extract()
        .with_context(|| format!("Invalid config: {}", config_file.display()))?;
    tracing::debug!("Loaded config from {}", config_file.display());
    Ok(config)
}

fn discover_config(base_dir: &Path) -> Option<PathBuf> {
    let candidates = [
        "obfmap.toml",
        ".obfmap.toml",
        "obfmap.yml",
        ".obfmap.yml",
        "obfmap.yaml",
        ".obfmap.yaml",
    ];

    candidates.iter().map(|candidate| base_dir.join(candidate)).find(|path| path.exists())
}
