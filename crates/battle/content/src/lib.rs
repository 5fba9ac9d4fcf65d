//! Data-driven battle content and loaders.
//!
//! This crate turns the game's data files into inputs for `battle-core`:
//! - Hero party definitions (`characters.json`)
//! - Enemy definitions (`enemies.json`), served through [`EnemyTable`]
//! - Battle rule parameters (`battle.toml`)
//!
//! Content is read once before a battle starts and never appears in battle
//! state; every spawned unit is an independent copy.

pub mod audit;
pub mod tables;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use audit::{ContentIssue, audit_content};
pub use tables::EnemyTable;

#[cfg(feature = "loaders")]
pub use loaders::{CharacterLoader, ConfigLoader, ContentFactory, EnemyLoader, LoadResult};
