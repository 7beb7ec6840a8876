// src/config/consts.rs

// Source page
pub const DEFAULT_SOURCE_URL: &str = "https://www.jma.go.jp/jp/week/319.html";
pub const DEFAULT_ICON_ROOT: &str = "https://www.jma.go.jp/jp/week/";
pub const DEFAULT_CITY: &str = "東京";
pub const DEFAULT_REGION: &str = "東京地方";
pub const USER_AGENT: &str = concat!("forecast_window/", env!("CARGO_PKG_VERSION"));

// Persisted window
pub const DEFAULT_STORE_PATH: &str = "out/tokyo.json";
pub const DEFAULT_WINDOW_DAYS: usize = 7;

// Logging
pub const LOG_ENV: &str = "FORECAST_LOG";
pub const DEFAULT_LOG_FILTER: &str = "forecast_window=info,warn";
pub const VERBOSE_LOG_FILTER: &str = "forecast_window=debug,info";
