//! Application configuration module.
//!
//! TOML config for the API endpoint, per-dataset request parameters and UI
//! timing. Every section is optional and falls back to defaults.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::AppConfig;
pub use paths::resolve_config_path;
