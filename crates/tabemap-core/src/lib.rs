//! Shared configuration and lookup tables for tabemap.
//!
//! Holds the env-driven [`AppConfig`], the fixed [`regions`] bias table, and the
//! presentational helpers (CSV title extraction, primary-type icons) used by the
//! server. No I/O beyond reading environment variables.

mod app_config;
mod config;
pub mod csv;
pub mod icons;
pub mod regions;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use regions::{BiasCircle, BiasRegion, LatLng, UnknownRegion};
