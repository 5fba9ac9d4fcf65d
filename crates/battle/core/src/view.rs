//! Renderable snapshot handed to the presentation layer after every turn.

use crate::state::{BattlePhase, BattleState, Side, SkillKind, TargetSide, Unit, UnitKey};

/// One combatant as the presentation layer sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitView {
    pub key: UnitKey,
    pub id: String,
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
}

impl UnitView {
    fn of(key: UnitKey, unit: &Unit) -> Self {
        Self {
            key,
            id: unit.id.clone(),
            name: unit.name.clone(),
            hp: unit.hp(),
            max_hp: unit.max_hp,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

/// A skill button for the active hero.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillOption {
    pub slot: usize,
    pub name: String,
    pub kind: SkillKind,
    pub target: TargetSide,
    /// Set while the skill is cooling down.
    pub disabled: bool,
    pub cooldown_remaining: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleView {
    pub heroes: Vec<UnitView>,
    pub enemies: Vec<UnitView>,
    pub active: Option<UnitKey>,
    pub phase: BattlePhase,
    /// Skill options of the active hero; empty on enemy turns and once over.
    pub skills: Vec<SkillOption>,
}

impl BattleView {
    pub fn capture(state: &BattleState) -> Self {
        let units = |side: Side| {
            state
                .roster(side)
                .iter()
                .enumerate()
                .map(|(index, unit)| UnitView::of(UnitKey::new(side, index), unit))
                .collect::<Vec<_>>()
        };

        let skills = match state.phase {
            BattlePhase::AwaitingHeroAction { hero } => state
                .unit(hero)
                .map(|unit| skill_options(state, unit))
                .unwrap_or_default(),
            _ => Vec::new(),
        };

        Self {
            heroes: units(Side::Hero),
            enemies: units(Side::Enemy),
            active: state.phase.active_unit(),
            phase: state.phase,
            skills,
        }
    }

    /// Whether every skill of the active hero is cooling down.
    pub fn all_skills_disabled(&self) -> bool {
        self.skills.iter().all(|option| option.disabled)
    }
}

fn skill_options(state: &BattleState, hero: &Unit) -> Vec<SkillOption> {
    hero.skills
        .iter()
        .enumerate()
        .map(|(slot, skill)| {
            let cooldown_remaining = state.cooldowns.remaining(&hero.id, slot);
            SkillOption {
                slot,
                name: skill.name.clone(),
                kind: skill.kind(),
                target: skill.target,
                disabled: cooldown_remaining > 0,
                cooldown_remaining,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Skill, UnitTemplate};

    #[test]
    fn hero_turn_lists_skills_with_cooldowns() {
        let hero = UnitTemplate::new("h1", "Knight", 30)
            .with_hp(12)
            .with_skill(Skill::damage("Slash", 100.0))
            .with_skill(Skill::heal("Mend", 1.0).with_cooldown(2));
        let enemy = UnitTemplate::new("e1", "Orc", 20);
        let mut state = BattleState::new(
            vec![Unit::spawn(&hero, Side::Hero, "h1")],
            vec![Unit::spawn(&enemy, Side::Enemy, "e1")],
        );
        state.cooldowns.set_cooldown("h1", 1, 2);

        let view = BattleView::capture(&state);

        assert_eq!(view.active, Some(UnitKey::hero(0)));
        assert_eq!(view.heroes[0].hp, 12);
        assert_eq!(view.enemies[0].name, "Orc");
        assert_eq!(view.skills.len(), 2);
        assert!(!view.skills[0].disabled);
        assert_eq!(view.skills[1].kind, SkillKind::Heal);
        assert!(view.skills[1].disabled);
        assert_eq!(view.skills[1].cooldown_remaining, 2);
        assert!(!view.all_skills_disabled());
    }

    #[test]
    fn enemy_turn_has_no_skill_options() {
        let hero = UnitTemplate::new("h1", "Knight", 30);
        let enemy = UnitTemplate::new("e1", "Orc", 20).with_skill(Skill::damage("Club", 100.0));
        let mut state = BattleState::new(
            vec![Unit::spawn(&hero, Side::Hero, "h1")],
            vec![Unit::spawn(&enemy, Side::Enemy, "e1")],
        );
        state.phase = BattlePhase::EnemyActing {
            enemy: UnitKey::enemy(0),
        };

        let view = BattleView::capture(&state);
        assert!(view.skills.is_empty());
        assert_eq!(view.active, Some(UnitKey::enemy(0)));
    }
}
