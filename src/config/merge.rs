//! Layering of command-line flags over the loaded config

use super::Config;
use crate::render::MapFormat;
use std::path::PathBuf;

/// Values given on the command line. `None` leaves the config value alone.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub format: Option<MapFormat>,
    pub output: Option<PathBuf>,
    pub atomic_write: Option<bool>,
}

pub fn merge_cli_with_config(mut config: Config, cli: CliOverrides) -> Config {
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(output) = cli.output {
        config.output = Some(output);
    }
    if let Some(atomic_write) = cli.atomic_write {
        config.atomic_write = atomic_write;
    }
    config
}
