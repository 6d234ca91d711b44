//! Centralized configuration loading from config.toml.
//!
//! This crate provides the configuration structs and loading logic used by
//! the arena and any other host of the search engines.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`GAMEAI_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml, embedded at compile time)
//!
//! Command-line flags in the arena sit above all of these.
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! GAMEAI_<SECTION>_<KEY>=value
//!
//! Examples:
//!     GAMEAI_COMMON_LOG_LEVEL=debug
//!     GAMEAI_SEARCH_ALGORITHM=mcts
//!     GAMEAI_SEARCH_SIMULATIONS=500
//!     GAMEAI_ARENA_GAME=connect4
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;
