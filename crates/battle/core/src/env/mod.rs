//! Read-only inputs a battle is started from.
//!
//! The external collaborator hands the engine a [`RosterSnapshot`] (heroes
//! plus the enemy ids of the encounter) and an [`EnemyOracle`] that resolves
//! those ids to definitions. Randomness is injected through [`RngOracle`].
mod error;
mod rng;

pub use error::RosterError;
pub use rng::{PcgRng, RngOracle, compute_seed};

use std::collections::HashMap;

use crate::state::UnitTemplate;

/// Lookup of enemy definitions by id.
///
/// Implementations return owned copies so every spawned enemy is independent
/// from the table it came from.
pub trait EnemyOracle {
    fn template(&self, id: &str) -> Option<UnitTemplate>;
}

impl EnemyOracle for HashMap<String, UnitTemplate> {
    fn template(&self, id: &str) -> Option<UnitTemplate> {
        self.get(id).cloned()
    }
}

impl EnemyOracle for [UnitTemplate] {
    fn template(&self, id: &str) -> Option<UnitTemplate> {
        self.iter().find(|template| template.id == id).cloned()
    }
}

impl EnemyOracle for Vec<UnitTemplate> {
    fn template(&self, id: &str) -> Option<UnitTemplate> {
        self.as_slice().template(id)
    }
}

/// Party and encounter a battle starts from.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterSnapshot {
    /// Hero definitions in turn order.
    pub heroes: Vec<UnitTemplate>,
    /// Enemy ids in turn order; repeats spawn separate instances.
    pub enemy_group: Vec<String>,
}

impl RosterSnapshot {
    pub fn new(heroes: Vec<UnitTemplate>, enemy_group: Vec<String>) -> Self {
        Self {
            heroes,
            enemy_group,
        }
    }
}
