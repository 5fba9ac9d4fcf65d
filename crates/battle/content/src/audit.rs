//! Consistency checks over loaded content.
//!
//! Battle start only rejects what would make a battle impossible. The audit
//! also reports values the engine silently clamps or ignores, so content
//! authors see them before play.

use std::collections::HashSet;

use battle_core::{BattleError, BuffStat, ErrorSeverity, Side, SkillEffect, UnitTemplate};

use crate::tables::EnemyTable;

/// One finding of [`audit_content`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ContentIssue {
    #[error("{side} id '{id}' is defined more than once")]
    DuplicateId { side: Side, id: String },

    #[error("enemy '{id}' has no skill without a cooldown")]
    NoReadyEnemySkill { id: String },

    #[error("'{id}' starts with hp {hp} above max hp {max_hp}")]
    HpAboveMax { id: String, hp: i32, max_hp: i32 },

    #[error("skill '{skill}' of '{id}' buffs for {turns} turns and will never apply")]
    InertBuff { id: String, skill: String, turns: i32 },

    #[error("skill '{skill}' of '{id}' buffs unknown stat '{stat}' and changes nothing")]
    UnknownBuffStat { id: String, skill: String, stat: String },

    #[error("skill '{skill}' of '{id}' has recoil fraction {fraction} outside 0..=1")]
    RecoilOutOfRange { id: String, skill: String, fraction: f64 },
}

impl BattleError for ContentIssue {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DuplicateId { .. } | Self::NoReadyEnemySkill { .. } => ErrorSeverity::Fatal,
            Self::HpAboveMax { .. }
            | Self::InertBuff { .. }
            | Self::UnknownBuffStat { .. }
            | Self::RecoilOutOfRange { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateId { .. } => "CONTENT_DUPLICATE_ID",
            Self::NoReadyEnemySkill { .. } => "CONTENT_NO_READY_ENEMY_SKILL",
            Self::HpAboveMax { .. } => "CONTENT_HP_ABOVE_MAX",
            Self::InertBuff { .. } => "CONTENT_INERT_BUFF",
            Self::UnknownBuffStat { .. } => "CONTENT_UNKNOWN_BUFF_STAT",
            Self::RecoilOutOfRange { .. } => "CONTENT_RECOIL_OUT_OF_RANGE",
        }
    }
}

/// Checks heroes and enemies, returning every issue found in file order.
pub fn audit_content(heroes: &[UnitTemplate], enemies: &EnemyTable) -> Vec<ContentIssue> {
    let mut issues = Vec::new();

    for (side, templates) in [(Side::Hero, heroes), (Side::Enemy, enemies.templates())] {
        let mut seen = HashSet::new();
        for template in templates {
            if !seen.insert(template.id.as_str()) {
                issues.push(ContentIssue::DuplicateId {
                    side,
                    id: template.id.clone(),
                });
            }
            if side == Side::Enemy && !template.skills.iter().any(|skill| skill.is_enemy_eligible())
            {
                issues.push(ContentIssue::NoReadyEnemySkill {
                    id: template.id.clone(),
                });
            }
            audit_unit(template, &mut issues);
        }
    }

    issues
}

fn audit_unit(template: &UnitTemplate, issues: &mut Vec<ContentIssue>) {
    if template.hp > template.max_hp {
        issues.push(ContentIssue::HpAboveMax {
            id: template.id.clone(),
            hp: template.hp,
            max_hp: template.max_hp,
        });
    }

    for skill in &template.skills {
        match &skill.effect {
            SkillEffect::Buff { stat, turns, .. } => {
                if *turns <= 0 {
                    issues.push(ContentIssue::InertBuff {
                        id: template.id.clone(),
                        skill: skill.name.clone(),
                        turns: *turns,
                    });
                }
                if let BuffStat::Other(name) = stat {
                    issues.push(ContentIssue::UnknownBuffStat {
                        id: template.id.clone(),
                        skill: skill.name.clone(),
                        stat: name.clone(),
                    });
                }
            }
            SkillEffect::Damage {
                self_damage: Some(fraction),
                ..
            } if !(0.0..=1.0).contains(fraction) => {
                issues.push(ContentIssue::RecoilOutOfRange {
                    id: template.id.clone(),
                    skill: skill.name.clone(),
                    fraction: *fraction,
                });
            }
            _ => {}
        }
    }
}
