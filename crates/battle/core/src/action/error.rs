use crate::engine::TurnError;
use crate::error::{BattleError, ErrorSeverity};
use crate::state::{Side, UnitKey};

/// A battle action that was rejected before touching state.
///
/// The presentation layer is expected to only offer valid choices, so these
/// are precondition violations: the engine refuses them and nothing changes.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("the battle is already over")]
    BattleOver,

    #[error("it is not a hero's turn (active unit: {active})")]
    NotHeroTurn { active: UnitKey },

    #[error("it is not an enemy's turn (active unit: {active})")]
    NotEnemyTurn { active: UnitKey },

    #[error("no skill has been selected")]
    NoSkillSelected,

    #[error("no unit at {unit}")]
    UnknownUnit { unit: UnitKey },

    #[error("{unit} has no skill in slot {slot}")]
    UnknownSkill { unit: UnitKey, slot: usize },

    #[error("skill '{skill}' is on cooldown for {remaining} more turns")]
    SkillOnCooldown { skill: String, remaining: u32 },

    #[error("no unit at {target}")]
    UnknownTarget { target: UnitKey },

    #[error("target {target} is already defeated")]
    TargetDefeated { target: UnitKey },

    #[error("skill '{skill}' targets the {expected} side, got {found}")]
    WrongTargetSide {
        skill: String,
        expected: Side,
        found: Side,
    },

    #[error("enemy {enemy} has no eligible skill or target")]
    NoEnemyAction { enemy: UnitKey },

    #[error(transparent)]
    Turn(#[from] TurnError),
}

impl BattleError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SkillOnCooldown { .. }
            | Self::TargetDefeated { .. }
            | Self::WrongTargetSide { .. }
            | Self::NoSkillSelected => ErrorSeverity::Recoverable,
            Self::BattleOver
            | Self::NotHeroTurn { .. }
            | Self::NotEnemyTurn { .. }
            | Self::UnknownSkill { .. }
            | Self::UnknownTarget { .. } => ErrorSeverity::Validation,
            Self::UnknownUnit { .. } => ErrorSeverity::Internal,
            Self::NoEnemyAction { .. } => ErrorSeverity::Internal,
            Self::Turn(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::BattleOver => "ACTION_BATTLE_OVER",
            Self::NotHeroTurn { .. } => "ACTION_NOT_HERO_TURN",
            Self::NotEnemyTurn { .. } => "ACTION_NOT_ENEMY_TURN",
            Self::NoSkillSelected => "ACTION_NO_SKILL_SELECTED",
            Self::UnknownUnit { .. } => "ACTION_UNKNOWN_UNIT",
            Self::UnknownSkill { .. } => "ACTION_UNKNOWN_SKILL",
            Self::SkillOnCooldown { .. } => "ACTION_SKILL_ON_COOLDOWN",
            Self::UnknownTarget { .. } => "ACTION_UNKNOWN_TARGET",
            Self::TargetDefeated { .. } => "ACTION_TARGET_DEFEATED",
            Self::WrongTargetSide { .. } => "ACTION_WRONG_TARGET_SIDE",
            Self::NoEnemyAction { .. } => "ACTION_NO_ENEMY_ACTION",
            Self::Turn(err) => err.error_code(),
        }
    }
}
