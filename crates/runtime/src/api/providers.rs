//! Asynchronous abstraction for sourcing hero intent.
//!
//! Runtime users plug in [`HeroActionProvider`] implementations so a battle
//! can run with human input, scripted fixtures, or a simple policy. Enemies
//! never go through a provider; the engine picks their actions.
use std::collections::VecDeque;

use async_trait::async_trait;
use battle_core::{BattleView, Side, SkillKind, SkillOption, TargetSide, UnitKey, UnitView};
use tokio::sync::Mutex;

use super::errors::Result;

/// What the active hero does with its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeroDecision {
    UseSkill { slot: usize, target: UnitKey },
    Skip,
    Retreat,
}

/// Trait for providing hero actions based on the current view.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - Scripted/replayed choices
/// - Automatic play for simulations and tests
#[async_trait]
pub trait HeroActionProvider: Send + Sync {
    /// Decide the turn of `hero`, the active unit in `view`.
    async fn decide(&self, hero: UnitKey, view: &BattleView) -> Result<HeroDecision>;
}

/// Plays the first usable skill that has a sensible target.
///
/// Heals go to the most wounded ally and are skipped while nobody is hurt,
/// buffs go to the caster when it is on the target side, and damage goes to
/// the weakest living unit on the target side.
#[derive(Clone, Copy, Debug, Default)]
pub struct AutoHeroProvider;

impl AutoHeroProvider {
    fn target_for(hero: UnitKey, option: &SkillOption, view: &BattleView) -> Option<UnitKey> {
        let side = match option.target {
            TargetSide::Ally => hero.side,
            TargetSide::Enemy => hero.side.opponent(),
        };
        let roster = match side {
            Side::Hero => &view.heroes,
            Side::Enemy => &view.enemies,
        };
        let living = roster.iter().filter(|unit| unit.is_alive());

        match option.kind {
            SkillKind::Heal => living
                .filter(|unit| unit.hp < unit.max_hp)
                .max_by_key(|unit| unit.max_hp - unit.hp)
                .map(|unit| unit.key),
            SkillKind::Buff => {
                let candidates: Vec<&UnitView> = living.collect();
                candidates
                    .iter()
                    .find(|unit| unit.key == hero)
                    .or_else(|| candidates.first())
                    .map(|unit| unit.key)
            }
            SkillKind::Damage => living.min_by_key(|unit| unit.hp).map(|unit| unit.key),
        }
    }
}

#[async_trait]
impl HeroActionProvider for AutoHeroProvider {
    async fn decide(&self, hero: UnitKey, view: &BattleView) -> Result<HeroDecision> {
        let decision = view
            .skills
            .iter()
            .filter(|option| !option.disabled)
            .find_map(|option| {
                Self::target_for(hero, option, view).map(|target| HeroDecision::UseSkill {
                    slot: option.slot,
                    target,
                })
            })
            .unwrap_or(HeroDecision::Skip);
        Ok(decision)
    }
}

/// Replays a fixed list of decisions, then skips every remaining turn.
#[derive(Debug, Default)]
pub struct ScriptedHeroProvider {
    script: Mutex<VecDeque<HeroDecision>>,
}

impl ScriptedHeroProvider {
    pub fn new(script: impl IntoIterator<Item = HeroDecision>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
        }
    }
}

#[async_trait]
impl HeroActionProvider for ScriptedHeroProvider {
    async fn decide(&self, _hero: UnitKey, _view: &BattleView) -> Result<HeroDecision> {
        Ok(self
            .script
            .lock()
            .await
            .pop_front()
            .unwrap_or(HeroDecision::Skip))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::BattlePhase;

    fn unit(key: UnitKey, hp: i32, max_hp: i32) -> UnitView {
        UnitView {
            key,
            id: key.to_string(),
            name: key.to_string(),
            hp,
            max_hp,
        }
    }

    fn option(slot: usize, kind: SkillKind, target: TargetSide, disabled: bool) -> SkillOption {
        SkillOption {
            slot,
            name: format!("skill{slot}"),
            kind,
            target,
            disabled,
            cooldown_remaining: u32::from(disabled),
        }
    }

    fn view(skills: Vec<SkillOption>) -> BattleView {
        BattleView {
            heroes: vec![
                unit(UnitKey::hero(0), 30, 30),
                unit(UnitKey::hero(1), 10, 25),
            ],
            enemies: vec![
                unit(UnitKey::enemy(0), 0, 20),
                unit(UnitKey::enemy(1), 15, 20),
                unit(UnitKey::enemy(2), 8, 20),
            ],
            active: Some(UnitKey::hero(0)),
            phase: BattlePhase::AwaitingHeroAction {
                hero: UnitKey::hero(0),
            },
            skills,
        }
    }

    #[tokio::test]
    async fn auto_provider_heals_the_wounded_first() {
        let view = view(vec![
            option(0, SkillKind::Heal, TargetSide::Ally, false),
            option(1, SkillKind::Damage, TargetSide::Enemy, false),
        ]);
        let decision = AutoHeroProvider.decide(UnitKey::hero(0), &view).await.unwrap();
        assert_eq!(
            decision,
            HeroDecision::UseSkill {
                slot: 0,
                target: UnitKey::hero(1)
            }
        );
    }

    #[tokio::test]
    async fn auto_provider_focuses_the_weakest_living_enemy() {
        let view = view(vec![
            option(0, SkillKind::Buff, TargetSide::Ally, true),
            option(1, SkillKind::Damage, TargetSide::Enemy, false),
        ]);
        let decision = AutoHeroProvider.decide(UnitKey::hero(0), &view).await.unwrap();
        assert_eq!(
            decision,
            HeroDecision::UseSkill {
                slot: 1,
                target: UnitKey::enemy(2)
            }
        );
    }

    #[tokio::test]
    async fn auto_provider_skips_when_everything_cools_down() {
        let view = view(vec![option(0, SkillKind::Damage, TargetSide::Enemy, true)]);
        let decision = AutoHeroProvider.decide(UnitKey::hero(0), &view).await.unwrap();
        assert_eq!(decision, HeroDecision::Skip);
    }

    #[tokio::test]
    async fn scripted_provider_falls_back_to_skip() {
        let provider = ScriptedHeroProvider::new([HeroDecision::Retreat]);
        let view = view(Vec::new());
        assert_eq!(
            provider.decide(UnitKey::hero(0), &view).await.unwrap(),
            HeroDecision::Retreat
        );
        assert_eq!(
            provider.decide(UnitKey::hero(0), &view).await.unwrap(),
            HeroDecision::Skip
        );
    }
}
