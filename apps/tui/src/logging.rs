use color_eyre::eyre::eyre;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Interactive mode owns the terminal, so logs go to the configured file.
    File,
    Stderr,
}

fn default_filter(config: &AppConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if config.debug {
            "host_city_explorer=debug,info"
        } else {
            "info"
        })
    })
}

pub fn init_logging(config: &AppConfig, target: LogTarget) -> color_eyre::eyre::Result<()> {
    let filter = default_filter(config);

    let result = match target {
        LogTarget::File => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&config.log_file)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
    };

    result.map_err(|e| eyre!("Failed to initialise logging: {e}"))
}
