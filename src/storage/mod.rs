//! Storage module for the progress database and configuration.

pub mod config;
pub mod database;
pub mod migration;
pub mod schema;
pub mod store;

pub use config::{load_config, save_config, AppConfig, ConfigError};
pub use database::{Database, DatabaseError};
pub use migration::migrate;
pub use store::{ProgressStore, StoreError, DEFAULT_RECORD_KEY};
