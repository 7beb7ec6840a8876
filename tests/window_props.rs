// tests/window_props.rs
//
// Properties of trim/merge over arbitrary windows.
//
use forecast_window::window::{DayRecord, Merger, Reading, Trimmer, Window};
use proptest::prelude::*;

const N: usize = 7;

fn arb_reading() -> impl Strategy<Value = Reading> {
    prop_oneof![
        4 => (-20i32..40).prop_map(Reading::Value),
        1 => Just(Reading::Unavailable),
    ]
}

fn arb_day() -> impl Strategy<Value = DayRecord> {
    (0u8..=31, -20i32..40, arb_reading(), "[a-z]{0,4}").prop_map(|(d, max, min, icon)| DayRecord {
        day_of_month: d,
        max_temperature: max,
        min_temperature: min,
        icon_reference: icon,
    })
}

fn arb_window() -> impl Strategy<Value = Window> {
    prop::collection::vec(arb_day(), N)
        .prop_map(|days| Window::from_days(days, "root/", N).unwrap())
}

/// Consecutive days starting at `first`, as a scrape would produce.
fn arb_fresh() -> impl Strategy<Value = Window> {
    (1u8..=24, prop::collection::vec((arb_reading(), -20i32..40), N)).prop_map(|(first, vals)| {
        let days = vals
            .into_iter()
            .enumerate()
            .map(|(i, (min, max))| DayRecord {
                day_of_month: first + i as u8,
                max_temperature: max,
                min_temperature: min,
                icon_reference: format!("{i}.png"),
            })
            .collect();
        Window::from_days(days, "fresh/", N).unwrap()
    })
}

proptest! {
    #[test]
    fn trim_is_idempotent(w in arb_window(), today in 1u8..=31) {
        let t = Trimmer::new(N);
        let mut once = w.clone();
        t.trim(&mut once, today).unwrap();
        let mut twice = once.clone();
        t.trim(&mut twice, today).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn trim_keeps_length(w in arb_window(), today in 1u8..=31) {
        let mut w = w;
        Trimmer::new(N).trim(&mut w, today).unwrap();
        prop_assert_eq!(w.len(), N);
    }

    #[test]
    fn trimmed_window_starts_today_or_is_blank(w in arb_window(), today in 1u8..=31) {
        let mut w = w;
        Trimmer::new(N).trim(&mut w, today).unwrap();
        prop_assert!(w.is_blank() || w.days()[0].day_of_month == today);
    }

    #[test]
    fn merge_keeps_length(fresh in arb_fresh(), persisted in arb_window()) {
        let mut p = persisted;
        Merger::new(N).merge(&fresh, &mut p).unwrap();
        prop_assert_eq!(p.len(), N);
    }

    #[test]
    fn unavailable_never_clobbers_when_aligned(fresh in arb_fresh(), persisted in arb_window()) {
        let before = persisted.clone();
        let mut p = persisted;
        let out = Merger::new(N).merge(&fresh, &mut p).unwrap();

        if !out.all_override {
            for (i, src) in fresh.days().iter().enumerate().take(N - out.start_index) {
                let slot = out.start_index + i;
                if src.min_temperature.is_unavailable() {
                    prop_assert_eq!(
                        p.days()[slot].min_temperature,
                        before.days()[slot].min_temperature
                    );
                } else {
                    prop_assert_eq!(p.days()[slot].min_temperature, src.min_temperature);
                }
            }
        }
    }

    #[test]
    fn unmatched_first_day_gives_fresh(fresh in arb_fresh(), persisted in arb_window()) {
        let first = fresh.days()[0].day_of_month;
        prop_assume!(persisted.position_of(first).is_none());

        let mut p = persisted;
        let out = Merger::new(N).merge(&fresh, &mut p).unwrap();
        prop_assert!(out.all_override);
        prop_assert_eq!(p, fresh);
    }
}

fn dated(first: u8, mins: [i32; N]) -> Window {
    let days = mins
        .iter()
        .enumerate()
        .map(|(i, m)| DayRecord {
            day_of_month: first + i as u8,
            max_temperature: 20,
            min_temperature: Reading::Value(*m),
            icon_reference: String::new(),
        })
        .collect();
    Window::from_days(days, "", N).unwrap()
}

#[test]
fn week_rolls_forward_two_days() {
    let mut w = dated(10, [5, 6, 7, 8, 9, 10, 11]);
    Trimmer::new(N).trim(&mut w, 12).unwrap();

    let dates: Vec<u8> = w.days().iter().map(|d| d.day_of_month).collect();
    let mins: Vec<Option<i32>> = w.days().iter().map(|d| d.min_temperature.value()).collect();
    assert_eq!(dates, vec![12, 13, 14, 15, 16, 0, 0]);
    assert_eq!(mins, vec![Some(7), Some(8), Some(9), Some(10), Some(11), Some(0), Some(0)]);

    let mut fresh_days = dated(12, [1, 2, 3, 4, 5, 6, 7]).days().to_vec();
    fresh_days[0].min_temperature = Reading::Unavailable;
    let fresh = Window::from_days(fresh_days, "", N).unwrap();

    let out = Merger::new(N).merge(&fresh, &mut w).unwrap();
    assert_eq!((out.start_index, out.all_override), (0, false));
    assert_eq!(w.days()[0].min_temperature, Reading::Value(7));
    assert_eq!(&w.days()[1..], &fresh.days()[1..]);
}
