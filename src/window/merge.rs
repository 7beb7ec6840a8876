// src/window/merge.rs
//! Folds a freshly scraped window into the persisted one.
//!
//! The fresh window is aligned on its first date. Everything from that slot
//! on is taken from the fresh data, except that an unavailable minimum never
//! replaces one we already know. If the first fresh date is not in the
//! persisted window, alignment failed and the fresh window replaces it
//! wholesale (unavailable readings included).

use super::model::{Window, WindowError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Persisted slot the fresh slot 0 was written to.
    pub start_index: usize,
    /// No alignment found; persisted window fully overwritten from slot 0.
    pub all_override: bool,
    /// Slots written.
    pub copied: usize,
    /// Slots whose persisted minimum survived an unavailable fresh one.
    pub kept_minimums: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct Merger {
    len: usize,
}

impl Merger {
    pub fn new(len: usize) -> Self {
        Self { len }
    }

    pub fn merge(
        &self,
        fresh: &Window,
        persisted: &mut Window,
    ) -> Result<MergeOutcome, WindowError> {
        fresh.expect_len(self.len)?;
        persisted.expect_len(self.len)?;

        let first = fresh.get(0).map_or(0, |d| d.day_of_month);
        let (start_index, all_override) = match persisted.position_of(first) {
            Some(i) => (i, false),
            None => (0, true),
        };

        let mut kept_minimums = 0;
        let targets = persisted.days_mut()[start_index..].iter_mut();
        let copied = targets.len();

        for (dst, src) in targets.zip(fresh.days()) {
            dst.day_of_month = src.day_of_month;
            dst.max_temperature = src.max_temperature;
            dst.icon_reference.clone_from(&src.icon_reference);

            if all_override || !src.min_temperature.is_unavailable() {
                dst.min_temperature = src.min_temperature;
            } else {
                kept_minimums += 1;
            }
        }

        // Icon references just copied are relative to the fresh root.
        if all_override || !fresh.icon_root.is_empty() {
            persisted.icon_root.clone_from(&fresh.icon_root);
        }

        Ok(MergeOutcome { start_index, all_override, copied, kept_minimums })
    }
}
