// src/window/trim.rs
//! Drops days that are already in the past.

use super::model::{DayRecord, Window, WindowError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimOutcome {
    /// Today is already slot 0.
    Unchanged,
    /// `removed` past days dropped, trailing slots cleared.
    Shifted { removed: usize },
    /// Today is nowhere in the window; every slot was cleared.
    Cleared,
}

#[derive(Debug, Clone, Copy)]
pub struct Trimmer {
    len: usize,
}

impl Trimmer {
    pub fn new(len: usize) -> Self {
        Self { len }
    }

    /// Shift the window left so that `today` lands in slot 0.
    ///
    /// If `today` is not in the window at all, nothing in it is current and
    /// the window is cleared; the next merge then overwrites it completely.
    /// `icon_root` is left alone.
    pub fn trim(&self, window: &mut Window, today: u8) -> Result<TrimOutcome, WindowError> {
        window.expect_len(self.len)?;

        let removed = window.position_of(today).unwrap_or(self.len);
        let days = window.days_mut();

        match removed {
            0 => Ok(TrimOutcome::Unchanged),
            k if k >= self.len => {
                days.fill(DayRecord::default());
                Ok(TrimOutcome::Cleared)
            }
            k => {
                days.rotate_left(k);
                days[self.len - k..].fill(DayRecord::default());
                Ok(TrimOutcome::Shifted { removed: k })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::model::{Reading, fixtures};

    fn mins(w: &Window) -> Vec<Reading> {
        w.days().iter().map(|d| d.min_temperature).collect()
    }

    fn dates(w: &Window) -> Vec<u8> {
        w.days().iter().map(|d| d.day_of_month).collect()
    }

    fn week_from_10() -> Window {
        let m: Vec<Reading> = (5..12).map(Reading::Value).collect();
        fixtures::window(10, &m)
    }

    #[test]
    fn drops_past_days_and_clears_tail() {
        let mut w = week_from_10();
        let out = Trimmer::new(7).trim(&mut w, 12).unwrap();

        assert_eq!(out, TrimOutcome::Shifted { removed: 2 });
        assert_eq!(dates(&w), vec![12, 13, 14, 15, 16, 0, 0]);
        let expect: Vec<Reading> =
            [7, 8, 9, 10, 11, 0, 0].into_iter().map(Reading::Value).collect();
        assert_eq!(mins(&w), expect);
        assert_eq!(w.days()[5], DayRecord::default());
        assert_eq!(w.icon_root, "root/");
    }

    #[test]
    fn today_first_is_noop() {
        let mut w = week_from_10();
        let before = w.clone();
        assert_eq!(Trimmer::new(7).trim(&mut w, 10).unwrap(), TrimOutcome::Unchanged);
        assert_eq!(w, before);
    }

    #[test]
    fn today_missing_clears_everything() {
        let mut w = week_from_10();
        assert_eq!(Trimmer::new(7).trim(&mut w, 25).unwrap(), TrimOutcome::Cleared);
        assert!(w.is_blank());
        assert_eq!(w.len(), 7);
    }

    #[test]
    fn today_in_last_slot_keeps_one_day() {
        let mut w = week_from_10();
        Trimmer::new(7).trim(&mut w, 16).unwrap();
        assert_eq!(dates(&w), vec![16, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn wrong_length_is_rejected() {
        let mut w = Window::empty(5, "");
        let err = Trimmer::new(7).trim(&mut w, 1).unwrap_err();
        assert_eq!(err, WindowError::InvalidLength { expected: 7, actual: 5 });
    }
}
