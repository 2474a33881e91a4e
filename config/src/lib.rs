//! Load settings from XDG `config.toml` and a project `.env`, then apply them to the process
//! environment with priority: **existing env > .env > XDG**.
//!
//! Library crates read their settings from the environment afterwards (see
//! `DirectivesConfig::from_env` in `directive-middleware`).

mod dotenv_file;
#[cfg(feature = "tracing-init")]
mod tracing_init;
mod xdg_toml;

use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

#[cfg(feature = "tracing-init")]
pub use tracing_init::init_tracing;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    DotenvRead(dotenv::Error),
}

/// Sets environment variables for keys that are **not** already set.
///
/// When a key is missing from the process environment the value comes from:
/// 1. the project `.env` (current directory, or `override_dir` if given)
/// 2. the `[env]` table of `$XDG_CONFIG_HOME/<app_name>/config.toml`
///
/// Returns the keys that were applied.
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<Vec<String>, LoadError> {
    let xdg_map = xdg_toml::load_env_map(app_name)?;
    let dotenv_map = dotenv_file::load_env_map(override_dir)?;

    let keys: HashSet<&String> = xdg_map.keys().chain(dotenv_map.keys()).collect();
    let mut applied = Vec::new();
    for key in keys {
        if std::env::var_os(key).is_some() {
            continue;
        }
        if let Some(value) = dotenv_map.get(key).or_else(|| xdg_map.get(key)) {
            std::env::set_var(key, value);
            applied.push(key.clone());
        }
    }
    applied.sort();
    Ok(applied)
}
