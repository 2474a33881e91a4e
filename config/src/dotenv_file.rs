//! Read a project `.env` into a key-value map without touching the process environment.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::LoadError;

fn dotenv_path(override_dir: Option<&Path>) -> Option<PathBuf> {
    let dir = override_dir
        .map(Path::to_path_buf)
        .or_else(|| std::env::current_dir().ok())?;
    let path = dir.join(".env");
    path.is_file().then_some(path)
}

/// Loads `.env` from `override_dir` (or the current directory). Missing file yields an empty map.
///
/// Parsing is delegated to the `dotenv` crate; `dotenv::from_path_iter` does not set variables,
/// so precedence stays with [`load_and_apply`](crate::load_and_apply).
pub fn load_env_map(override_dir: Option<&Path>) -> Result<HashMap<String, String>, LoadError> {
    let Some(path) = dotenv_path(override_dir) else {
        return Ok(HashMap::new());
    };
    let iter = dotenv::from_path_iter(&path).map_err(LoadError::DotenvRead)?;
    iter.map(|entry| entry.map_err(LoadError::DotenvRead))
        .collect()
}
