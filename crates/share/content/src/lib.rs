//! Persisted configuration for the share bridge.
//!
//! Reads and writes [`share_core::ShareConfig`] as TOML. Loading never fails
//! from the host's point of view: [`ConfigLoader::load_or_default`] falls
//! back to compiled-in defaults.
pub mod config;
pub mod env;

pub use config::{ConfigError, ConfigLoader, LoadResult};
pub use env::apply_env;
