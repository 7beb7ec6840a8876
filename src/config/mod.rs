// src/config/mod.rs
pub mod consts;
pub mod options;

pub use options::{AppOptions, ConfigError, OnCorrupt, SourceOptions, StoreOptions, WindowOptions};
