// src/specs/jma_week.rs
//! Scraping *spec* for the JMA weekly forecast page (`/jp/week/<area>.html`).
//!
//! The page is one table. The rows this spec cares about:
//! - the date row, recognised by a `weekday` cell; every following cell starts
//!   carries the day of month (`16日`, `17<br>水`, `(火)18`, ...);
//! - the city row, headed by a `cityname` cell equal to the configured city,
//!   holding the `maxtemp` cells;
//! - the row right after it, holding the `mintemp` cells;
//! - the icon row, headed by a `normal` cell containing the configured region,
//!   holding one `<img>` per day.
//!
//! Once today's minimum has passed the site drops that cell, so the minimum
//! row comes up short at the front. Those leading slots become
//! [`Reading::Unavailable`] rather than shifting every later day by one.
//!
//! Non-responsibilities: no persistence, no merging.

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::SourceOptions;
use crate::core::html::{
    attr_value, first_line, has_class, inner_after_open_tag, open_tag, strip_tags, tag_blocks,
};
use crate::core::net;
use crate::core::sanitize::{first_number, leading_int};
use crate::window::{DayRecord, Reading, UNAVAILABLE_SENTINEL, Window, WindowError};

use super::{SourceError, WindowSource};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no date row (class \"weekday\") on the page")]
    MissingDates,
    #[error("no temperature row for city {0:?}")]
    MissingCity(String),
    #[error("no icon row for region {0:?}")]
    MissingRegion(String),
    #[error(transparent)]
    Window(#[from] WindowError),
}

/// Live source: fetches the configured URL and extracts a window from it.
pub struct JmaWeekSource {
    opts: SourceOptions,
    len: usize,
}

impl JmaWeekSource {
    pub fn new(opts: SourceOptions, len: usize) -> Self {
        Self { opts, len }
    }
}

impl WindowSource for JmaWeekSource {
    fn fetch(&mut self) -> Result<Window, SourceError> {
        let doc = net::http_get(&self.opts.url)?;
        Ok(extract(&doc, &self.opts, self.len)?)
    }
}

/// Parse a downloaded page into a window of `len` days.
pub fn extract(doc: &str, opts: &SourceOptions, len: usize) -> Result<Window, ExtractError> {
    let rows = tag_blocks(doc, &["tr"]);

    let dates = parse_dates(&rows).ok_or(ExtractError::MissingDates)?;

    let city_ix = rows
        .iter()
        .position(|r| row_has_cell(r, "cityname", |text| text == opts.city))
        .ok_or_else(|| ExtractError::MissingCity(opts.city.clone()))?;

    let max: Vec<i32> = temps_in(rows[city_ix], "maxtemp")
        .into_iter()
        .map(|t| t.unwrap_or(0))
        .collect();

    let mut min: Vec<Reading> = rows
        .get(city_ix + 1)
        .map(|r| temps_in(r, "mintemp"))
        .unwrap_or_default()
        .into_iter()
        .map(|t| t.map_or(Reading::Unavailable, Reading::Value))
        .collect();

    let collisions = sentinel_collisions(&min);
    if collisions > 0 {
        warn!(
            collisions,
            sentinel = UNAVAILABLE_SENTINEL,
            "minimum equals the stored unavailable marker; it will reload as unavailable"
        );
    }

    if min.is_empty() {
        warn!("no minimum temperatures found; keeping previously stored ones");
    }
    let missing = max.len().max(dates.len().min(len)).saturating_sub(min.len());
    if missing > 0 {
        debug!(missing, "leading minimum temperatures not published");
        min.splice(0..0, std::iter::repeat_n(Reading::Unavailable, missing));
    }

    let icons = rows
        .iter()
        .find(|r| row_has_cell(r, "normal", |text| text.contains(opts.region.as_str())))
        .map(|r| icons_in(r))
        .ok_or_else(|| ExtractError::MissingRegion(opts.region.clone()))?;

    if dates.len() < len {
        warn!(found = dates.len(), len, "page lists fewer days than the window holds");
    }

    let mut days = vec![DayRecord::default(); len];
    for (i, slot) in days.iter_mut().enumerate() {
        let Some(&d) = dates.get(i) else { break };
        slot.day_of_month = d;
        slot.max_temperature = max.get(i).copied().unwrap_or(0);
        slot.min_temperature = min.get(i).copied().unwrap_or_default();
        slot.icon_reference = icons.get(i).cloned().unwrap_or_default();
    }

    Ok(Window::from_days(days, opts.icon_root.as_str(), len)?)
}

/// Real minimums that the store cannot tell apart from an unavailable one.
fn sentinel_collisions(min: &[Reading]) -> usize {
    min.iter().filter(|r| r.value() == Some(UNAVAILABLE_SENTINEL)).count()
}

fn cells(row: &str) -> Vec<&str> {
    tag_blocks(row, &["th", "td"])
}

fn row_has_cell(row: &str, class: &str, text_ok: impl Fn(&str) -> bool) -> bool {
    cells(row)
        .into_iter()
        .any(|c| has_class(open_tag(c), class) && text_ok(&strip_tags(inner_after_open_tag(c))))
}

/// Day numbers from the date row, in order. `None` if there is no such row
/// or it holds no dates.
fn parse_dates(rows: &[&str]) -> Option<Vec<u8>> {
    let row = rows.iter().find(|r| cells(r).iter().any(|c| has_class(open_tag(c), "weekday")))?;
    let dates: Vec<u8> = cells(row)
        .into_iter()
        .filter_map(|c| first_number(&strip_tags(inner_after_open_tag(c))))
        .filter_map(|n| u8::try_from(n).ok())
        .filter(|d| (1..=31).contains(d))
        .collect();
    (!dates.is_empty()).then_some(dates)
}

/// First-line temperatures of every `class` cell in the row.
fn temps_in(row: &str, class: &str) -> Vec<Option<i32>> {
    cells(row)
        .into_iter()
        .filter(|c| has_class(open_tag(c), class))
        .map(|c| leading_int(&strip_tags(first_line(inner_after_open_tag(c)))))
        .collect()
}

fn icons_in(row: &str) -> Vec<String> {
    let lc = row.to_ascii_lowercase();
    let mut out = Vec::new();
    let mut from = 0;
    while let Some(rel) = lc[from..].find("<img") {
        let start = from + rel;
        let end = row[start..].find('>').map_or(row.len(), |e| start + e + 1);
        if let Some(src) = attr_value(&row[start..end], "src") {
            out.push(src.to_string());
        }
        from = end;
    }
    out
}
