//! Content factory for building battle inputs from data files.

use std::path::{Path, PathBuf};

use battle_core::{BattleConfig, RosterSnapshot, UnitTemplate};
use tracing::debug;

use crate::loaders::{CharacterLoader, ConfigLoader, EnemyLoader, LoadResult};
use crate::tables::EnemyTable;

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── characters.json
/// ├── enemies.json
/// └── battle.toml      (optional)
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CHARACTERS_FILE: &'static str = "characters.json";
    pub const ENEMIES_FILE: &'static str = "enemies.json";
    pub const CONFIG_FILE: &'static str = "battle.toml";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load the hero party from `characters.json`.
    pub fn load_heroes(&self) -> LoadResult<Vec<UnitTemplate>> {
        CharacterLoader::load(&self.data_dir.join(Self::CHARACTERS_FILE))
    }

    /// Load enemy definitions from `enemies.json`.
    pub fn load_enemies(&self) -> LoadResult<EnemyTable> {
        EnemyLoader::load(&self.data_dir.join(Self::ENEMIES_FILE))
    }

    /// Load battle rules from `battle.toml`, or defaults when the file is absent.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join(Self::CONFIG_FILE);
        if !path.exists() {
            debug!(path = %path.display(), "no battle config, using defaults");
            return Ok(BattleConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Builds the snapshot for an encounter: the whole party against
    /// `enemy_group`. Enemy ids are resolved later, at battle start.
    pub fn roster<I, S>(&self, enemy_group: I) -> LoadResult<RosterSnapshot>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let heroes = self.load_heroes()?;
        Ok(RosterSnapshot::new(
            heroes,
            enemy_group.into_iter().map(Into::into).collect(),
        ))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
