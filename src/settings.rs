use crate::error::Result;
use crate::utils::constants::{CONFIG_FILE, DEFAULT_TABLE_CAPACITY, ENV_PREFIX};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use validator::Validate;

/// Runtime settings, layered as defaults < config file < `BRC_*` environment
/// variables < command-line flags.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
    /// Partition count and size of the worker pool.
    #[validate(range(min = 1))]
    pub max_workers: usize,

    /// Initial capacity of each partition's station table.
    #[validate(range(min = 1))]
    pub table_capacity: usize,

    pub show_progress: bool,
}

impl Settings {
    /// Load settings from `config_file`, or from `brc.toml` in the working
    /// directory when it exists.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let builder = Config::builder()
            .set_default("max_workers", num_cpus::get() as i64)?
            .set_default("table_capacity", DEFAULT_TABLE_CAPACITY as i64)?
            .set_default("show_progress", false)?;

        let builder = match config_file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(CONFIG_FILE).required(false)),
        };

        let settings: Settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Apply command-line overrides and re-validate.
    pub fn with_overrides(mut self, max_workers: Option<usize>, show_progress: bool) -> Result<Self> {
        if let Some(max_workers) = max_workers {
            self.max_workers = max_workers;
        }
        self.show_progress |= show_progress;

        self.validate()?;
        Ok(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_workers: num_cpus::get(),
            table_capacity: DEFAULT_TABLE_CAPACITY,
            show_progress: false,
        }
    }
}
