// src/store.rs
//! Persisted window: one JSON file, column-oriented.
//!
//! ```json
//! {"date":[16,17,..],"max_temp":[21,..],"min_temp":[99,..],"image":["img/100.png",..],"image_root":"https://.../"}
//! ```
//! Every array holds exactly one entry per window slot. An unavailable
//! minimum is written as `99`. Other tools read this file, so the layout is
//! fixed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::window::{DayRecord, Reading, Window};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot read {path}")]
    Io { path: PathBuf, #[source] source: io::Error },
    #[error("malformed window file {path}")]
    Parse { path: PathBuf, #[source] source: serde_json::Error },
    #[error("malformed window file {path}: {detail}")]
    Shape { path: PathBuf, detail: String },
    #[error("cannot write {path}")]
    Write { path: PathBuf, #[source] source: io::Error },
}

impl StoreError {
    /// The file exists but its content is unusable.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoreError::Parse { .. } | StoreError::Shape { .. })
    }
}

/// Loads and saves the single persisted window.
pub trait WindowStore {
    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<Window>, StoreError>;
    fn save(&self, window: &Window) -> Result<(), StoreError>;
    /// Where the window lives, for logs and summaries.
    fn location(&self) -> Option<&Path> {
        None
    }
}

/// Wire form of [`Window`].
#[derive(Debug, Serialize, Deserialize)]
struct StoredWindow {
    date: Vec<u8>,
    max_temp: Vec<i32>,
    min_temp: Vec<i32>,
    image: Vec<String>,
    image_root: String,
}

impl StoredWindow {
    fn from_window(w: &Window) -> Self {
        let days = w.days();
        Self {
            date: days.iter().map(|d| d.day_of_month).collect(),
            max_temp: days.iter().map(|d| d.max_temperature).collect(),
            min_temp: days.iter().map(|d| d.min_temperature.to_stored()).collect(),
            image: days.iter().map(|d| d.icon_reference.clone()).collect(),
            image_root: w.icon_root.clone(),
        }
    }

    fn into_window(self, len: usize) -> Result<Window, String> {
        let lens = [
            ("date", self.date.len()),
            ("max_temp", self.max_temp.len()),
            ("min_temp", self.min_temp.len()),
            ("image", self.image.len()),
        ];
        if let Some((name, n)) = lens.iter().find(|(_, n)| *n != len) {
            return Err(format!("{name} has {n} entries, expected {len}"));
        }
        if let Some(d) = self.date.iter().find(|d| **d > 31) {
            return Err(format!("date {d} is not a day of month"));
        }

        let days = self
            .date
            .into_iter()
            .zip(self.max_temp)
            .zip(self.min_temp)
            .zip(self.image)
            .map(|(((day, max), min), icon)| DayRecord {
                day_of_month: day,
                max_temperature: max,
                min_temperature: Reading::from_stored(min),
                icon_reference: icon,
            })
            .collect();
        Window::from_days(days, self.image_root, len).map_err(|e| e.to_string())
    }
}

pub struct JsonFileStore {
    path: PathBuf,
    len: usize,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>, len: usize) -> Self {
        Self { path: path.into(), len }
    }

    pub fn path(&self) -> &Path {

        &self.path

    }
}

impl WindowStore for JsonFileStore {
    fn load(&self) -> Result<Option<Window>, StoreError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no stored window");
                return Ok(None);
            }
            Err(source) => return Err(StoreError::Io { path: self.path.clone(), source }),
        };

        let stored: StoredWindow = serde_json::from_slice(&raw)
            .map_err(|source| StoreError::Parse { path: self.path.clone(), source })?;
        let window = stored
            .into_window(self.len)
            .map_err(|detail| StoreError::Shape { path: self.path.clone(), detail })?;
        Ok(Some(window))
    }

    fn save(&self, window: &Window) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write { path: self.path.clone(), source };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }
        let json = serde_json::to_vec(&StoredWindow::from_window(window))
            .map_err(|e| write_err(io::Error::other(e)))?;
        fs::write(&self.path, json).map_err(write_err)?;
        debug!(path = %self.path.display(), "window saved");
        Ok(())
    }

    fn location(&self) -> Option<&Path> {

        Some(&self.path)

    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &tempfile::TempDir) -> JsonFileStore {
        JsonFileStore::new(dir.path().join("nested/tokyo.json"), 3)
    }

    fn sample() -> Window {
        let days = vec![
            DayRecord {
                day_of_month: 30,
                max_temperature: 9,
                min_temperature: Reading::Unavailable,
                icon_reference: "a.png".into(),
            },
            DayRecord {
                day_of_month: 31,
                max_temperature: -1,
                min_temperature: Reading::Value(-4),
                icon_reference: "b.png".into(),
            },
            DayRecord::default(),
        ];
        Window::from_days(days, "https://example.test/", 3).unwrap()
    }

    #[test]
    fn absent_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store(&dir).load().unwrap().is_none());
    }

    #[test]
    fn writes_the_column_layout() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(&dir);
        s.save(&sample()).unwrap();

        let v: serde_json::Value = serde_json::from_slice(&fs::read(s.path()).unwrap()).unwrap();
        assert_eq!(v["date"], serde_json::json!([30, 31, 0]));
        assert_eq!(v["max_temp"], serde_json::json!([9, -1, 0]));
        assert_eq!(v["min_temp"], serde_json::json!([99, -4, 0]));
        assert_eq!(v["image"], serde_json::json!(["a.png", "b.png", ""]));
        assert_eq!(v["image_root"], "https://example.test/");

        assert_eq!(s.load().unwrap(), Some(sample()));
    }

    #[test]
    fn short_arrays_are_a_shape_error() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(&dir);
        fs::create_dir_all(s.path().parent().unwrap()).unwrap();
        let raw = concat!(
            r#"{"date":[1,2],"max_temp":[1,2,3],"min_temp":[1,2,3],"#,
            r#""image":["","",""],"image_root":""}"#,
        );
        fs::write(s.path(), raw).unwrap();

        let err = s.load().unwrap_err();
        assert!(err.is_corrupt());
        assert!(matches!(&err, StoreError::Shape { detail, .. } if detail.contains("date has 2")));
    }

    #[test]
    fn directory_in_place_of_file_is_not_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(&dir);
        fs::create_dir_all(s.path()).unwrap();

        let err = s.load().unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(!err.is_corrupt());
    }

    #[test]
    fn file_in_place_of_parent_fails_save() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("nested"), "").unwrap();
        assert!(matches!(store(&dir).save(&sample()), Err(StoreError::Write { .. })));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(&dir);
        fs::create_dir_all(s.path().parent().unwrap()).unwrap();
        fs::write(s.path(), "{not json").unwrap();
        assert!(matches!(s.load(), Err(StoreError::Parse { .. })));
    }
}
