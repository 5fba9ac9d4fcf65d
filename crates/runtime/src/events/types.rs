//! Event payloads for each topic.

use battle_core::{BattlePhase, BattleView, UnitKey};
use serde::{Deserialize, Serialize};

/// One narrative line produced by a resolved action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    /// Action counter after the action that produced the line.
    pub nonce: u64,
    pub line: String,
}

/// The turn moved to a new actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnEvent {
    pub active: UnitKey,
    pub phase: BattlePhase,
    /// Renderable state at the start of the turn.
    pub view: BattleView,
}

/// The battle ended. Published exactly once per battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeEvent {
    pub victory: bool,
    /// Set when the party left through retreat rather than being defeated.
    pub retreated: bool,
}
