pub mod alerts;
pub mod config;
pub mod events;
pub mod init;
pub mod patients;
pub mod records;
pub mod serve;
pub mod stats;
pub mod workflows;

use anyhow::Context;
use mediflow_core::config::Config;
use mediflow_core::source::{self, DataSource};
use std::path::Path;

/// Load the project config and open the data source it names.
pub fn open_source(root: &Path) -> anyhow::Result<Box<dyn DataSource>> {
    let config = Config::load(root).context("failed to load config")?;
    source::open(root, &config).context("failed to open data source")
}
