//! Battle rule configuration loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        let config: BattleConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use battle_core::EnemyTargeting;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "enemy_targeting = \"random\"").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.enemy_targeting, EnemyTargeting::Random);
        assert_eq!(config.evasion_cap, BattleConfig::DEFAULT_EVASION_CAP);
    }

    #[test]
    fn malformed_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "evasion_cap = \"high\"").unwrap();

        let err = ConfigLoader::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config TOML"));
    }
}
