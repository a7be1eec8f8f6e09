//! Configuration for herald: schema, file discovery, `${ENV}` substitution,
//! environment overrides and validation into [`DispatchSettings`].

pub mod env_subst;
pub mod error;
pub mod loader;
pub mod schema;
pub mod settings;

pub use {
    error::{ConfigError, MissingOption},
    loader::{
        apply_env_overrides, discover_and_load, discover_and_load_with, find_config_file, load_config,
        load_config_with,
    },
    schema::{HeraldConfig, TwilioSection},
    settings::{DEFAULT_API_BASE_URL, DispatchSettings},
};
