//! Operator configuration (`passvault.toml`) and data-directory resolution.

pub mod app;

pub use app::{default_data_dir, AppConfig};
