// src/lib.rs

pub mod cli;
pub mod config;
pub mod core;
pub mod log;
pub mod runner;
pub mod specs;
pub mod store;
pub mod window;
