//! Worker tasks that back the runtime orchestration.
//!
//! The battle worker owns the engine and executes commands; the enemy turn
//! timer is its deferred continuation.

mod battle;
mod timer;

pub use battle::{BattleWorker, Command};
