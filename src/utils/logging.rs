//! File-backed tracing setup.
//!
//! The terminal is owned by the UI while the game runs, so log output goes to
//! ~/.snake/snake.log. `RUST_LOG` overrides the default filter.

use super::persistence;
use crate::core::constants::LOG_FILENAME;
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "snake=info";

/// Install the global subscriber, appending to the log file.
pub fn init() -> io::Result<()> {
    let path = persistence::save_path(LOG_FILENAME)?;
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(io::Error::other)
}
