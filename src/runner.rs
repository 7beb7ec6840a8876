// src/runner.rs
// One run: load → trim → fetch → merge → save.

use std::path::PathBuf;

use chrono::{Datelike, Local};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::OnCorrupt;
use crate::specs::{SourceError, WindowSource};
use crate::store::{StoreError, WindowStore};
use crate::window::{MergeOutcome, Merger, TrimOutcome, Trimmer, Window, WindowError};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("cannot load stored window")]
    Load(#[source] StoreError),
    #[error("cannot fetch fresh forecast")]
    Source(#[from] SourceError),
    #[error(transparent)]
    Window(#[from] WindowError),
    #[error("cannot save window")]
    Save(#[source] StoreError),
}

#[derive(Clone, Debug)]
pub struct RunOptions {
    /// Window length; both windows must have it.
    pub days: usize,
    /// Day of month treated as today. `None` uses the local clock.
    pub today: Option<u8>,
    pub on_corrupt: OnCorrupt,
    /// Do everything except writing the result.
    pub dry_run: bool,
}

/// What a run did.
#[derive(Debug)]
pub struct RunSummary {
    pub cold_start: bool,
    pub trim: Option<TrimOutcome>,
    pub merge: Option<MergeOutcome>,
    pub window: Window,
    pub saved_to: Option<PathBuf>,
}

pub fn local_today() -> u8 {
    // day() is 1..=31
    Local::now().day() as u8
}

pub fn run(
    source: &mut dyn WindowSource,
    store: &dyn WindowStore,
    opts: &RunOptions,
) -> Result<RunSummary, RunError> {
    let today = opts.today.unwrap_or_else(local_today);

    let mut persisted = match store.load() {
        Ok(w) => w,
        Err(e) if e.is_corrupt() && opts.on_corrupt == OnCorrupt::ColdStart => {
            warn!(error = %e, "stored window unreadable, starting over");
            None
        }
        Err(e) => return Err(RunError::Load(e)),
    };

    let trim = match persisted.as_mut() {
        Some(w) => {
            let outcome = Trimmer::new(opts.days).trim(w, today)?;
            info!(today, ?outcome, "trimmed stored window");
            Some(outcome)
        }
        None => {
            info!("no stored window, cold start");
            None
        }
    };

    let fresh = source.fetch()?;
    info!(first_day = fresh.get(0).map(|d| d.day_of_month), "fetched fresh window");

    let (window, merge) = match persisted {
        Some(mut w) => {
            let outcome = Merger::new(opts.days).merge(&fresh, &mut w)?;
            if outcome.all_override {
                warn!("fresh window does not line up with stored one; replaced it");
            }
            info!(
                start = outcome.start_index,
                copied = outcome.copied,
                kept_minimums = outcome.kept_minimums,
                "merged"
            );
            (w, Some(outcome))
        }
        None => {
            if fresh.len() != opts.days {
                let err = WindowError::InvalidLength { expected: opts.days, actual: fresh.len() };
                return Err(err.into());
            }
            (fresh, None)
        }
    };

    let saved_to = if opts.dry_run {
        info!("dry run, nothing written");
        None
    } else {
        store.save(&window).map_err(RunError::Save)?;
        let at = store.location().map(|p| p.to_path_buf());
        info!(path = ?at, "saved window");
        at
    };

    Ok(RunSummary { cold_start: trim.is_none(), trim, merge, window, saved_to })
}
