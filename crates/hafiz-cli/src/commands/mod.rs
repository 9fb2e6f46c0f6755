//! CLI subcommands.

pub mod config;
pub mod learn;
pub mod review;
pub mod stats;
pub mod today;

use std::sync::Arc;
use std::time::Duration;

use hafiz_core::{Config, HttpContent, HttpScheduler};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Load the configuration and build the remote clients from it.
pub fn connect() -> Result<(Config, Arc<HttpScheduler>, Arc<HttpContent>), Box<dyn std::error::Error>>
{
    let config = Config::load()?;
    let timeout = Duration::from_secs(config.api.timeout_secs);
    let scheduler = Arc::new(HttpScheduler::new(&config.api.base_url, timeout)?);
    let content = Arc::new(HttpContent::new(&config.api.base_url, timeout)?);
    Ok((config, scheduler, content))
}
