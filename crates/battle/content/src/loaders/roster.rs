//! Hero and enemy roster loaders.

use std::path::Path;

use battle_core::UnitTemplate;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};
use crate::tables::EnemyTable;

/// `characters.json` layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterFile {
    pub characters: Vec<UnitTemplate>,
}

/// `enemies.json` layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyFile {
    pub enemies: Vec<UnitTemplate>,
}

/// Loader for the hero party.
pub struct CharacterLoader;

impl CharacterLoader {
    /// Load hero definitions in party order.
    pub fn load(path: &Path) -> LoadResult<Vec<UnitTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse characters in {}: {}", path.display(), e))
    }

    pub fn parse(json: &str) -> LoadResult<Vec<UnitTemplate>> {
        let file: CharacterFile = serde_json::from_str(json)?;
        Ok(file.characters)
    }
}

/// Loader for enemy definitions.
pub struct EnemyLoader;

impl EnemyLoader {
    pub fn load(path: &Path) -> LoadResult<EnemyTable> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemies in {}: {}", path.display(), e))
    }

    pub fn parse(json: &str) -> LoadResult<EnemyTable> {
        let file: EnemyFile = serde_json::from_str(json)?;
        Ok(EnemyTable::new(file.enemies))
    }
}
