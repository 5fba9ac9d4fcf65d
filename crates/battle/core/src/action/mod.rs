//! Skill resolution and automatic enemy decisions.
//!
//! [`SkillResolver`] is the only code that mutates hp, modifiers, and
//! cooldowns in response to a skill. Validation of who may act and whom they
//! may target happens in the engine before the resolver runs.
mod enemy;
mod error;
mod resolve;

pub use enemy::{EnemyChoice, choose_enemy_action};
pub use error::ActionError;
pub use resolve::SkillResolver;
