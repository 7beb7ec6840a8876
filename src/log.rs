// src/log.rs
// tracing setup: stderr always, optionally appended to a plain-text file.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::consts::{DEFAULT_LOG_FILTER, LOG_ENV, VERBOSE_LOG_FILTER};

#[derive(Clone, Debug, Default)]
pub struct LogOptions {
    pub verbose: bool,
    pub file: Option<PathBuf>,
}

/// `FORECAST_LOG` wins over `verbose`. Call once, before the run.
pub fn init(opts: &LogOptions) -> io::Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(if opts.verbose { VERBOSE_LOG_FILTER } else { DEFAULT_LOG_FILTER })
    });

    let file_layer = match &opts.file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(io::stderr))
        .with(file_layer)
        .init();
    Ok(())
}
