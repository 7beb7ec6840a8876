// src/window/mod.rs
//! Rolling forecast window: the fixed-length model, trimming of past days and
//! merging of a fresh scrape into what was persisted before.

pub mod merge;
pub mod model;
pub mod trim;

pub use merge::{MergeOutcome, Merger};
pub use model::{DayRecord, Reading, UNAVAILABLE_SENTINEL, Window, WindowError};
pub use trim::{TrimOutcome, Trimmer};
