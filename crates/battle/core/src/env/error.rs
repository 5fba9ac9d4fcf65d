use crate::error::{BattleError, ErrorSeverity};
use crate::state::Side;

/// Roster data that cannot seed a battle.
///
/// Raised before any battle state exists; a failed start never leaves a
/// partial battle behind.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("enemy '{id}' has no definition in the enemy table")]
    UnknownEnemy { id: String },

    #[error("hero roster is empty")]
    EmptyParty,

    #[error("enemy group is empty")]
    EmptyEnemyGroup,

    #[error("hero id '{id}' appears more than once in the roster")]
    DuplicateHero { id: String },

    #[error("enemy '{id}' has no skill without a cooldown to fall back on")]
    NoReadySkill { id: String },

    #[error("no living {side} at battle start")]
    NoLivingUnits { side: Side },
}

impl BattleError for RosterError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownEnemy { .. } => "ROSTER_UNKNOWN_ENEMY",
            Self::EmptyParty => "ROSTER_EMPTY_PARTY",
            Self::EmptyEnemyGroup => "ROSTER_EMPTY_ENEMY_GROUP",
            Self::DuplicateHero { .. } => "ROSTER_DUPLICATE_HERO",
            Self::NoReadySkill { .. } => "ROSTER_NO_READY_SKILL",
            Self::NoLivingUnits { .. } => "ROSTER_NO_LIVING_UNITS",
        }
    }
}
