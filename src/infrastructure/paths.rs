//! Configuration and data directory resolution.
//!
//! | Purpose | Override | Platform default |
//! |---|---|---|
//! | config | `$HNSEARCH_CONFIG_DIR` | `dirs::config_dir()/hnsearch` |
//! | data (traces) | `$HNSEARCH_DATA_DIR` | `dirs::data_dir()/hnsearch` |
//!
//! On Linux the platform defaults honour `$XDG_CONFIG_HOME` and `$XDG_DATA_HOME`.
//! When no base can be found, lookups fail instead of falling back to the
//! working directory.

use crate::domain::{HnSearchError, Result};
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

const APPLICATION: &str = "hnsearch";

const CONFIG_DIR_ENV: &str = "HNSEARCH_CONFIG_DIR";
const DATA_DIR_ENV: &str = "HNSEARCH_DATA_DIR";

/// Name of the configuration file inside [`get_config_dir`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory holding `config.toml` and custom themes.
///
/// # Errors
///
/// Returns [`HnSearchError::Directory`] when there is no override and no platform
/// config directory.
pub fn get_config_dir() -> Result<PathBuf> {
    resolve(env::var_os(CONFIG_DIR_ENV), dirs::config_dir(), "config")
}

/// Directory for trace output.
///
/// # Errors
///
/// Returns [`HnSearchError::Directory`] when there is no override and no platform
/// data directory.
pub fn get_data_dir() -> Result<PathBuf> {
    resolve(env::var_os(DATA_DIR_ENV), dirs::data_dir(), "data")
}

/// Default configuration file location.
///
/// # Errors
///
/// See [`get_config_dir`].
pub fn config_file() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

/// An override is used as-is; otherwise the application directory goes under `base`.
///
/// Empty overrides count as unset, and relative paths are never produced.
fn resolve(override_dir: Option<OsString>, base: Option<PathBuf>, kind: &'static str) -> Result<PathBuf> {
    if let Some(dir) = override_dir.filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    base.filter(|b| b.is_absolute())
        .map(|b| b.join(APPLICATION))
        .ok_or(HnSearchError::Directory(kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_is_used_verbatim() {
        let path = resolve(Some("/tmp/hn".into()), Some("/home/me/.config".into()), "config").unwrap();
        assert_eq!(path, PathBuf::from("/tmp/hn"));
    }

    #[test]
    fn empty_override_falls_back_to_platform_dir() {
        let path = resolve(Some(OsString::new()), Some("/home/me/.local/share".into()), "data").unwrap();
        assert_eq!(path, PathBuf::from("/home/me/.local/share/hnsearch"));
    }

    #[test]
    fn missing_base_is_an_error_not_a_relative_path() {
        assert!(matches!(resolve(None, None, "data"), Err(HnSearchError::Directory("data"))));
        assert!(matches!(
            resolve(None, Some(".local/share".into()), "data"),
            Err(HnSearchError::Directory("data"))
        ));
    }

    #[test]
    fn resolved_directories_are_absolute() {
        for dir in [get_config_dir(), get_data_dir(), config_file()].into_iter().flatten() {
            assert!(dir.is_absolute(), "{} is relative", dir.display());
        }
    }
}
