// src/window/model.rs
//! Fixed-length forecast window.
//!
//! A [`Window`] always holds exactly `len` [`DayRecord`]s. Slot 0 is "today"
//! once the window has been trimmed and merged; unused trailing slots are
//! zero-valued (`day_of_month == 0`).

use thiserror::Error;

/// On-disk stand-in for an unavailable minimum temperature.
/// Only the JSON store and the tests should ever see this number.
pub const UNAVAILABLE_SENTINEL: i32 = 99;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("window has {actual} days, expected {expected}")]
    InvalidLength { expected: usize, actual: usize },
}

/// A temperature the source may not have published yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reading {
    Value(i32),
    /// The page did not show this value (e.g. today's minimum after it passed).
    Unavailable,
}

impl Default for Reading {
    fn default() -> Self {
        Reading::Value(0)
    }
}

impl Reading {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Reading::Unavailable)
    }

    pub fn value(&self) -> Option<i32> {
        match *self {
            Reading::Value(v) => Some(v),
            Reading::Unavailable => None,
        }
    }

    /// Decode the persisted integer form.
    pub fn from_stored(raw: i32) -> Self {
        if raw == UNAVAILABLE_SENTINEL {
            Reading::Unavailable
        } else {
            Reading::Value(raw)
        }
    }

    pub fn to_stored(self) -> i32 {
        self.value().unwrap_or(UNAVAILABLE_SENTINEL)
    }
}

/// One calendar day of forecast.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayRecord {
    /// 1..=31, or 0 for an empty slot.
    pub day_of_month: u8,
    pub max_temperature: i32,
    pub min_temperature: Reading,
    /// Relative to the window's `icon_root`; may be empty.
    pub icon_reference: String,
}

impl DayRecord {
    pub fn is_empty(&self) -> bool {
        self.day_of_month == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    days: Vec<DayRecord>,
    pub icon_root: String,
}

impl Window {
    /// `len` empty slots.
    pub fn empty(len: usize, icon_root: impl Into<String>) -> Self {
        Self { days: vec![DayRecord::default(); len], icon_root: icon_root.into() }
    }

    /// Build from exactly `len` records.
    pub fn from_days(
        days: Vec<DayRecord>,
        icon_root: impl Into<String>,
        len: usize,
    ) -> Result<Self, WindowError> {
        if days.len() != len {
            return Err(WindowError::InvalidLength { expected: len, actual: days.len() });
        }
        Ok(Self { days, icon_root: icon_root.into() })
    }

    pub fn len(&self) -> usize {

        self.days.len()

    }

    pub fn is_blank(&self) -> bool {

        self.days.iter().all(DayRecord::is_empty)

    }

    pub fn days(&self) -> &[DayRecord] {

        &self.days

    }

    pub fn get(&self, i: usize) -> Option<&DayRecord> {

        self.days.get(i)

    }

    /// Slots can be edited, the slot count cannot.
    pub fn days_mut(&mut self) -> &mut [DayRecord] {
        &mut self.days
    }

    /// First slot holding `day`; empty slots never match.
    pub fn position_of(&self, day: u8) -> Option<usize> {
        if day == 0 { return None; }
        self.days.iter().position(|d| d.day_of_month == day)
    }

    /// Full icon URL/path for slot `i`, empty if the slot has no icon.
    pub fn icon_url(&self, i: usize) -> String {
        match self.days.get(i) {
            Some(d) if !d.icon_reference.is_empty() => {
                let mut s = self.icon_root.clone();
                s.push_str(&d.icon_reference);
                s
            }
            _ => String::new(),
        }
    }

    pub(crate) fn expect_len(&self, len: usize) -> Result<(), WindowError> {
        if self.days.len() != len {
            return Err(WindowError::InvalidLength { expected: len, actual: self.days.len() });
        }
        Ok(())
    }
}
