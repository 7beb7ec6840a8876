// src/specs/mod.rs
//! # Scraping "specs"
//!
//! Page-specific extraction: where the forecast lives in the HTML and how to
//! read it with the tolerant helpers in `core::html`. A spec turns one page
//! into one [`Window`]; it never loads, merges or saves anything.
//!
//! ```text
//! runner → WindowSource::fetch() → specs::<page>::extract()
//!        ↘ trim / merge (window) → WindowStore::save()
//! ```
//!
//! Specs must be testable offline against saved HTML.

pub mod jma_week;

use thiserror::Error;

use crate::core::net::FetchError;
use crate::window::Window;

pub use jma_week::{ExtractError, JmaWeekSource};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("cannot extract forecast from page")]
    Extract(#[from] ExtractError),
}

/// Produces the fresh window for today and the following days.
pub trait WindowSource {
    fn fetch(&mut self) -> Result<Window, SourceError>;
}
