//! Battle state representation.
//!
//! [`BattleState`] is the single value owned by one running battle: both
//! rosters, the turn queue, the modifier tables, and the hero cooldown table.
//! It is created from a roster snapshot when the battle starts and discarded
//! when the battle ends.
mod skill;
mod unit;

pub use skill::{BuffStat, Skill, SkillEffect, SkillKind, Stat, TargetSide};
pub use unit::{Side, Unit, UnitKey, UnitTemplate};

use crate::cooldown::CooldownTracker;
use crate::engine::TurnQueue;
use crate::stats::BuffTracker;

/// Where the battle state machine currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattlePhase {
    /// A living hero is up; progress halts until a skill and target arrive.
    AwaitingHeroAction { hero: UnitKey },
    /// A living enemy is up; its action resolves automatically.
    EnemyActing { enemy: UnitKey },
    /// Terminal.
    BattleOver { victory: bool },
}

impl BattlePhase {
    /// Phase for a turn that lands on `unit`.
    pub const fn for_unit(unit: UnitKey) -> Self {
        match unit.side {
            Side::Hero => Self::AwaitingHeroAction { hero: unit },
            Side::Enemy => Self::EnemyActing { enemy: unit },
        }
    }

    pub const fn active_unit(&self) -> Option<UnitKey> {
        match *self {
            Self::AwaitingHeroAction { hero } => Some(hero),
            Self::EnemyActing { enemy } => Some(enemy),
            Self::BattleOver { .. } => None,
        }
    }

    pub const fn is_over(&self) -> bool {
        matches!(self, Self::BattleOver { .. })
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingHeroAction { .. } => "awaiting_hero_action",
            Self::EnemyActing { .. } => "enemy_acting",
            Self::BattleOver { .. } => "battle_over",
        }
    }
}

/// Complete mutable state of one battle.
#[derive(Clone, Debug, PartialEq)]
pub struct BattleState {
    pub heroes: Vec<Unit>,
    pub enemies: Vec<Unit>,
    pub queue: TurnQueue,
    pub buffs: BuffTracker,
    pub cooldowns: CooldownTracker,
    pub phase: BattlePhase,

    /// Number of actions resolved so far. Feeds the enemy RNG seed.
    pub nonce: u64,
}

impl BattleState {
    /// Builds the initial state. The phase points at `queue[0]` until the
    /// scheduler settles the first living unit; an empty queue starts over.
    pub fn new(heroes: Vec<Unit>, enemies: Vec<Unit>) -> Self {
        let queue = TurnQueue::new(heroes.len(), enemies.len());

        let mut cooldowns = CooldownTracker::new();
        for hero in &heroes {
            cooldowns.register(&hero.id, hero.skills.len());
        }

        let phase = match queue.current() {
            Some(first) => BattlePhase::for_unit(first),
            None => BattlePhase::BattleOver {
                victory: enemies.is_empty() && !heroes.is_empty(),
            },
        };

        Self {
            heroes,
            enemies,
            phase,
            queue,
            buffs: BuffTracker::new(),
            cooldowns,
            nonce: 0,
        }
    }

    pub fn roster(&self, side: Side) -> &[Unit] {
        match side {
            Side::Hero => &self.heroes,
            Side::Enemy => &self.enemies,
        }
    }

    pub fn unit(&self, key: UnitKey) -> Option<&Unit> {
        self.roster(key.side).get(key.index)
    }

    pub fn unit_mut(&mut self, key: UnitKey) -> Option<&mut Unit> {
        match key.side {
            Side::Hero => self.heroes.get_mut(key.index),
            Side::Enemy => self.enemies.get_mut(key.index),
        }
    }

    pub fn is_alive(&self, key: UnitKey) -> bool {
        self.unit(key).is_some_and(Unit::is_alive)
    }

    /// Keys of living units on `side`, in roster order.
    pub fn living(&self, side: Side) -> impl Iterator<Item = UnitKey> + '_ {
        self.roster(side)
            .iter()
            .enumerate()
            .filter(|(_, unit)| unit.is_alive())
            .map(move |(index, _)| UnitKey::new(side, index))
    }

    pub fn is_side_defeated(&self, side: Side) -> bool {
        self.roster(side).iter().all(|unit| !unit.is_alive())
    }

    /// Victory/defeat check run after every resolved action.
    ///
    /// Returns `Some(true)` when every enemy is down, `Some(false)` when every
    /// hero is down, and `None` while both sides still stand.
    pub fn end_condition(&self) -> Option<bool> {
        let all_enemies_down = self.is_side_defeated(Side::Enemy);
        let all_heroes_down = self.is_side_defeated(Side::Hero);

        if all_enemies_down {
            Some(true)
        } else if all_heroes_down {
            Some(false)
        } else {
            None
        }
    }
}
