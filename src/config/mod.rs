//! Configuration loading and merging
//!
//! Handles loading from config files and environment variables with proper
//! precedence (CLI > Env > File > Defaults). CLI flags are applied by the
//! command that owns them.

use crate::render::MapFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod loader;
pub mod merge;

pub use loader::load_config;
pub use merge::{merge_cli_with_config, CliOverrides};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Map format written when `--format` is not given.
    pub format: MapFormat,
    /// Map destination; stdout when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    /// Render into a temporary file and rename it over the destination.
    pub atomic_write: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { format: MapFormat::Text, output: None, atomic_write: true }
    }
}
