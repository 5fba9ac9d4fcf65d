//! Deterministic turn-based battle rules shared by the runtime and tools.
//!
//! `battle-core` defines the canonical combat rules (stat resolution, skill
//! effects, buff and cooldown lifecycles, turn order, victory detection) and
//! exposes pure APIs without I/O. All state mutation during a battle flows
//! through [`engine::BattleEngine`]; supporting crates depend on the types
//! re-exported here.
pub mod action;
pub mod config;
pub mod cooldown;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;
pub mod stats;
pub mod view;

pub use action::{ActionError, EnemyChoice, SkillResolver, choose_enemy_action};
pub use config::{BattleConfig, EnemyTargeting};
pub use cooldown::CooldownTracker;
pub use engine::{ActionOutcome, BattleEngine, TurnError, TurnQueue, TurnScheduler};
pub use env::{EnemyOracle, PcgRng, RngOracle, RosterError, RosterSnapshot, compute_seed};
pub use error::{BattleError, ErrorSeverity};
pub use state::{
    BattlePhase, BattleState, BuffStat, Side, Skill, SkillEffect, SkillKind, Stat, TargetSide, Unit,
    UnitKey, UnitTemplate,
};
pub use stats::{BuffTracker, Modifier, StatResolver};
pub use view::{BattleView, SkillOption, UnitView};
