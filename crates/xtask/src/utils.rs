//! Utility functions for xtask commands

use std::path::{Path, PathBuf};

/// Environment override for the content directory.
const DATA_DIR_ENV: &str = "BATTLE_DATA_DIR";

/// Resolve the content directory: the explicit flag, then `BATTLE_DATA_DIR`,
/// then the sample data shipped with `battle-content`.
pub fn data_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
        .unwrap_or_else(|| {
            Path::new(env!("CARGO_MANIFEST_DIR"))
                .join("..")
                .join("battle")
                .join("content")
                .join("data")
        })
}
