//! Filesystem and environment lookups.
//!
//! Resolves where configuration is read from and where trace files are written,
//! following the XDG base directory conventions with `$HOME` fallbacks.

pub mod paths;

pub use paths::{config_file, get_config_dir, get_data_dir};
