//! Battle state machine.
//!
//! The [`BattleEngine`] is the authoritative owner of one [`BattleState`].
//! Every mutation flows through it: hero choices arrive as two separate
//! calls (skill, then target), enemy turns resolve through
//! [`BattleEngine::act_enemy`], and each resolved action runs the same
//! pipeline:
//!
//! resolve → end check → advance (decay, cooldown tick)
//!
//! The engine never sleeps or schedules. Drivers decide when to call
//! `act_enemy`, which is how the runtime inserts its observation delay.

mod turns;

pub use turns::{TurnError, TurnQueue, TurnScheduler};

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::action::{ActionError, SkillResolver, choose_enemy_action};
use crate::config::BattleConfig;
use crate::env::{EnemyOracle, PcgRng, RngOracle, RosterError, RosterSnapshot};
use crate::state::{BattlePhase, BattleState, Side, Unit, UnitKey};
use crate::view::BattleView;

pub const VICTORY_LINE: &str = "🎉 Victory! All enemies defeated.";
pub const DEFEAT_LINE: &str = "💀 Defeat... Your party has fallen.";
pub const RETREAT_LINE: &str = "The party retreats.";

/// Result of one resolved action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionOutcome {
    /// Unit whose turn was consumed.
    pub actor: UnitKey,
    /// Narrative lines in the order they happened.
    pub log: Vec<String>,
    /// Phase after the action (the next actor, or `BattleOver`).
    pub phase: BattlePhase,
    /// `Some(victory)` on the one action that ended the battle.
    pub ended: Option<bool>,
}

/// Drives a single battle from roster snapshot to outcome.
pub struct BattleEngine {
    state: BattleState,
    config: BattleConfig,
    rng: Box<dyn RngOracle>,
    seed: u64,
    pending: Option<usize>,
    outcome: Option<bool>,
}

impl std::fmt::Debug for BattleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BattleEngine")
            .field("phase", &self.state.phase)
            .field("nonce", &self.state.nonce)
            .field("seed", &self.seed)
            .field("pending", &self.pending)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}

impl BattleEngine {
    /// Validates the roster and builds the opening state.
    ///
    /// Every enemy id is resolved through `enemies` into an independent
    /// copy. Repeated ids get numbered instance ids (`slime`, `slime#2`) so
    /// their modifiers never mix. Nothing is created when validation fails.
    pub fn start<E>(
        roster: &RosterSnapshot,
        enemies: &E,
        config: BattleConfig,
        seed: u64,
    ) -> Result<Self, RosterError>
    where
        E: EnemyOracle + ?Sized,
    {
        if roster.heroes.is_empty() {
            return Err(RosterError::EmptyParty);
        }
        if roster.enemy_group.is_empty() {
            return Err(RosterError::EmptyEnemyGroup);
        }

        let mut hero_ids = HashSet::new();
        let mut heroes = Vec::with_capacity(roster.heroes.len());
        for template in &roster.heroes {
            if !hero_ids.insert(template.id.as_str()) {
                return Err(RosterError::DuplicateHero {
                    id: template.id.clone(),
                });
            }
            heroes.push(Unit::spawn(template, Side::Hero, template.id.clone()));
        }

        let mut copies: HashMap<&str, usize> = HashMap::new();
        let mut spawned = Vec::with_capacity(roster.enemy_group.len());
        for id in &roster.enemy_group {
            let template = enemies
                .template(id)
                .ok_or_else(|| RosterError::UnknownEnemy { id: id.clone() })?;
            if !template.skills.iter().any(|skill| skill.is_enemy_eligible()) {
                return Err(RosterError::NoReadySkill { id: id.clone() });
            }

            let count = copies.entry(id.as_str()).or_insert(0);
            *count += 1;
            let instance_id = if *count == 1 {
                id.clone()
            } else {
                format!("{id}#{count}")
            };
            spawned.push(Unit::spawn(&template, Side::Enemy, instance_id));
        }

        let mut state = BattleState::new(heroes, spawned);
        for side in [Side::Hero, Side::Enemy] {
            if state.is_side_defeated(side) {
                return Err(RosterError::NoLivingUnits { side });
            }
        }
        let first = TurnScheduler::start(&mut state)
            .map_err(|_| RosterError::NoLivingUnits { side: Side::Hero })?;

        info!(
            heroes = state.heroes.len(),
            enemies = state.enemies.len(),
            seed,
            first = %first,
            "battle started"
        );

        Ok(Self {
            state,
            config,
            rng: Box::new(PcgRng),
            seed,
            pending: None,
            outcome: None,
        })
    }

    /// Replaces the random source used for enemy decisions.
    pub fn with_rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> BattlePhase {
        self.state.phase
    }

    pub fn active_unit(&self) -> Option<UnitKey> {
        self.state.phase.active_unit()
    }

    pub fn is_over(&self) -> bool {
        self.state.phase.is_over()
    }

    /// Recorded result once the battle is over.
    pub fn outcome(&self) -> Option<bool> {
        self.outcome
    }

    /// Skill slot chosen by the active hero and still waiting for a target.
    pub fn pending_skill(&self) -> Option<usize> {
        self.pending
    }

    pub fn view(&self) -> BattleView {
        BattleView::capture(&self.state)
    }

    /// First hero choice point. Selecting again replaces the previous pick.
    pub fn select_skill(&mut self, slot: usize) -> Result<(), ActionError> {
        let hero = self.active_hero()?;
        self.check_skill(hero, slot)?;
        self.pending = Some(slot);
        debug!(hero = %hero, slot, "skill selected");
        Ok(())
    }

    /// Drops a pending skill choice. Battle state is not touched.
    pub fn cancel_selection(&mut self) {
        if self.pending.take().is_some() {
            debug!("skill selection cancelled");
        }
    }

    /// Second hero choice point: resolves the pending skill on `target`.
    ///
    /// An invalid target is rejected and the pending skill stays selected.
    pub fn select_target(&mut self, target: UnitKey) -> Result<ActionOutcome, ActionError> {
        let hero = self.active_hero()?;
        let slot = self.pending.ok_or(ActionError::NoSkillSelected)?;
        self.check_skill(hero, slot)?;
        self.check_target(hero, slot, target)?;

        self.pending = None;
        self.resolve(hero, slot, target)
    }

    /// Both hero choices in one call.
    pub fn use_skill(&mut self, slot: usize, target: UnitKey) -> Result<ActionOutcome, ActionError> {
        let hero = self.active_hero()?;
        self.check_skill(hero, slot)?;
        self.check_target(hero, slot, target)?;

        self.pending = None;
        self.resolve(hero, slot, target)
    }

    /// Living units the active hero may aim `slot` at.
    pub fn usable_targets(&self, slot: usize) -> Vec<UnitKey> {
        let Ok(hero) = self.active_hero() else {
            return Vec::new();
        };
        self.state
            .unit(hero)
            .and_then(|unit| unit.skills.get(slot))
            .map(|skill| {
                self.state
                    .living(hero.side.resolve(skill.target))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Passes the active hero's turn without acting.
    pub fn skip_turn(&mut self) -> Result<ActionOutcome, ActionError> {
        let hero = self.active_hero()?;
        self.pending = None;

        let name = self
            .state
            .unit(hero)
            .map(|unit| unit.name.clone())
            .ok_or(ActionError::UnknownUnit { unit: hero })?;

        debug!(hero = %hero, "turn skipped");
        self.finish(hero, vec![format!("{name} waits.")])
    }

    /// Resolves the active enemy's automatic turn.
    pub fn act_enemy(&mut self) -> Result<ActionOutcome, ActionError> {
        let enemy = match self.state.phase {
            BattlePhase::EnemyActing { enemy } => enemy,
            BattlePhase::AwaitingHeroAction { hero } => {
                return Err(ActionError::NotEnemyTurn { active: hero });
            }
            BattlePhase::BattleOver { .. } => return Err(ActionError::BattleOver),
        };

        let choice = choose_enemy_action(
            &self.state,
            enemy,
            self.rng.as_ref(),
            self.seed,
            self.config.enemy_targeting,
        )
        .ok_or(ActionError::NoEnemyAction { enemy })?;

        self.resolve(enemy, choice.slot, choice.target)
    }

    /// Ends the battle as a defeat on the party's request.
    pub fn retreat(&mut self) -> Result<ActionOutcome, ActionError> {
        let actor = self.active_unit().ok_or(ActionError::BattleOver)?;
        self.pending = None;
        self.state.phase = BattlePhase::BattleOver { victory: false };
        self.outcome = Some(false);

        info!(nonce = self.state.nonce, "party retreated");
        Ok(ActionOutcome {
            actor,
            log: vec![RETREAT_LINE.to_owned()],
            phase: self.state.phase,
            ended: Some(false),
        })
    }

    fn active_hero(&self) -> Result<UnitKey, ActionError> {
        match self.state.phase {
            BattlePhase::AwaitingHeroAction { hero } => Ok(hero),
            BattlePhase::EnemyActing { enemy } => Err(ActionError::NotHeroTurn { active: enemy }),
            BattlePhase::BattleOver { .. } => Err(ActionError::BattleOver),
        }
    }

    fn check_skill(&self, hero: UnitKey, slot: usize) -> Result<(), ActionError> {
        let unit = self
            .state
            .unit(hero)
            .ok_or(ActionError::UnknownUnit { unit: hero })?;
        let skill = unit
            .skills
            .get(slot)
            .ok_or(ActionError::UnknownSkill { unit: hero, slot })?;

        let remaining = self.state.cooldowns.remaining(&unit.id, slot);
        if remaining > 0 {
            return Err(ActionError::SkillOnCooldown {
                skill: skill.name.clone(),
                remaining,
            });
        }
        Ok(())
    }

    fn check_target(&self, hero: UnitKey, slot: usize, target: UnitKey) -> Result<(), ActionError> {
        let skill = self
            .state
            .unit(hero)
            .and_then(|unit| unit.skills.get(slot))
            .ok_or(ActionError::UnknownSkill { unit: hero, slot })?;

        let expected = hero.side.resolve(skill.target);
        if target.side != expected {
            return Err(ActionError::WrongTargetSide {
                skill: skill.name.clone(),
                expected,
                found: target.side,
            });
        }

        let unit = self
            .state
            .unit(target)
            .ok_or(ActionError::UnknownTarget { target })?;
        if !unit.is_alive() {
            return Err(ActionError::TargetDefeated { target });
        }
        Ok(())
    }

    fn resolve(
        &mut self,
        actor: UnitKey,
        slot: usize,
        target: UnitKey,
    ) -> Result<ActionOutcome, ActionError> {
        let log = SkillResolver::new(&self.config).apply(&mut self.state, actor, slot, target)?;
        self.finish(actor, log)
    }

    /// Shared tail of every consumed turn: end check, then advance.
    fn finish(&mut self, actor: UnitKey, mut log: Vec<String>) -> Result<ActionOutcome, ActionError> {
        self.state.nonce += 1;

        let ended = self.state.end_condition();
        match ended {
            Some(victory) => {
                self.state.phase = BattlePhase::BattleOver { victory };
                self.outcome = Some(victory);
                log.push(if victory { VICTORY_LINE } else { DEFEAT_LINE }.to_owned());
                info!(victory, nonce = self.state.nonce, "battle over");
            }
            None => {
                let next = TurnScheduler::advance(&mut self.state)?;
                debug!(actor = %actor, next = %next, nonce = self.state.nonce, "turn complete");
            }
        }

        Ok(ActionOutcome {
            actor,
            log,
            phase: self.state.phase,
            ended,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Skill, Stat, UnitTemplate};

    fn orc() -> UnitTemplate {
        UnitTemplate::new("orc", "Orc", 40)
            .with_stats(10, 0, 0)
            .with_skill(Skill::damage("Club", 100.0))
    }

    fn knight() -> UnitTemplate {
        UnitTemplate::new("knight", "Knight", 30)
            .with_stats(20, 0, 0)
            .with_skill(Skill::damage("Slash", 100.0))
            .with_skill(Skill::buff("Guard", Stat::Def, 50, 2).with_cooldown(2))
    }

    fn engine(group: &[&str]) -> BattleEngine {
        let roster = RosterSnapshot::new(
            vec![knight()],
            group.iter().map(|id| (*id).to_owned()).collect(),
        );
        BattleEngine::start(&roster, &vec![orc()], BattleConfig::default(), 1).unwrap()
    }

    #[test]
    fn start_rejects_bad_rosters() {
        let table = vec![orc(), UnitTemplate::new("wisp", "Wisp", 5)];
        let config = BattleConfig::default();

        let unknown = RosterSnapshot::new(vec![knight()], vec!["dragon".into()]);
        assert_eq!(
            BattleEngine::start(&unknown, &table, config, 0).unwrap_err(),
            RosterError::UnknownEnemy { id: "dragon".into() }
        );

        let empty = RosterSnapshot::new(Vec::new(), vec!["orc".into()]);
        assert_eq!(
            BattleEngine::start(&empty, &table, config, 0).unwrap_err(),
            RosterError::EmptyParty
        );

        let twins = RosterSnapshot::new(vec![knight(), knight()], vec!["orc".into()]);
        assert_eq!(
            BattleEngine::start(&twins, &table, config, 0).unwrap_err(),
            RosterError::DuplicateHero { id: "knight".into() }
        );

        let idle = RosterSnapshot::new(vec![knight()], vec!["wisp".into()]);
        assert_eq!(
            BattleEngine::start(&idle, &table, config, 0).unwrap_err(),
            RosterError::NoReadySkill { id: "wisp".into() }
        );
    }

    #[test]
    fn repeated_enemies_get_distinct_instances() {
        let engine = engine(&["orc", "orc", "orc"]);
        let ids: Vec<_> = engine.state().enemies.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["orc", "orc#2", "orc#3"]);
        assert!(engine.state().enemies.iter().all(|e| e.template_id == "orc"));
    }

    #[test]
    fn hero_choice_is_two_steps_and_cancellable() {
        let mut engine = engine(&["orc"]);
        assert_eq!(engine.phase(), BattlePhase::AwaitingHeroAction { hero: UnitKey::hero(0) });

        assert_eq!(
            engine.select_target(UnitKey::enemy(0)).unwrap_err(),
            ActionError::NoSkillSelected
        );

        engine.select_skill(0).unwrap();
        engine.select_skill(1).unwrap();
        assert_eq!(engine.pending_skill(), Some(1));
        engine.cancel_selection();
        assert_eq!(engine.pending_skill(), None);
        assert_eq!(engine.state().nonce, 0);

        engine.select_skill(0).unwrap();
        let outcome = engine.select_target(UnitKey::enemy(0)).unwrap();
        assert_eq!(outcome.log, vec!["Knight hits Orc for 20 damage."]);
        assert_eq!(outcome.phase, BattlePhase::EnemyActing { enemy: UnitKey::enemy(0) });
        assert_eq!(outcome.ended, None);
        assert_eq!(engine.pending_skill(), None);
    }

    #[test]
    fn invalid_targets_leave_state_untouched() {
        let mut engine = engine(&["orc"]);
        let before = engine.state().clone();

        engine.select_skill(0).unwrap();
        assert!(matches!(
            engine.select_target(UnitKey::hero(0)),
            Err(ActionError::WrongTargetSide { .. })
        ));
        assert_eq!(
            engine.select_target(UnitKey::enemy(3)).unwrap_err(),
            ActionError::UnknownTarget {
                target: UnitKey::enemy(3)
            }
        );
        assert_eq!(engine.pending_skill(), Some(0));
        assert_eq!(engine.state(), &before);
        assert_eq!(engine.usable_targets(0), vec![UnitKey::enemy(0)]);
        assert_eq!(engine.usable_targets(1), vec![UnitKey::hero(0)]);
    }

    #[test]
    fn wrong_phase_is_rejected() {
        let mut engine = engine(&["orc"]);
        assert_eq!(
            engine.act_enemy().unwrap_err(),
            ActionError::NotEnemyTurn {
                active: UnitKey::hero(0)
            }
        );

        engine.skip_turn().unwrap();
        assert_eq!(
            engine.select_skill(0).unwrap_err(),
            ActionError::NotHeroTurn {
                active: UnitKey::enemy(0)
            }
        );
    }

    #[test]
    fn cooldown_blocks_reuse_until_the_heros_turns_pass() {
        let mut engine = engine(&["orc"]);
        engine.use_skill(1, UnitKey::hero(0)).unwrap();

        engine.act_enemy().unwrap();
        assert_eq!(
            engine.select_skill(1).unwrap_err(),
            ActionError::SkillOnCooldown {
                skill: "Guard".into(),
                remaining: 1
            }
        );
        assert!(engine.view().skills[1].disabled);

        engine.skip_turn().unwrap();
        engine.act_enemy().unwrap();
        engine.select_skill(1).unwrap();
    }

    #[test]
    fn skip_turn_logs_and_advances() {
        let mut engine = engine(&["orc"]);
        let outcome = engine.skip_turn().unwrap();
        assert_eq!(outcome.log, vec!["Knight waits."]);
        assert_eq!(engine.active_unit(), Some(UnitKey::enemy(0)));
        assert_eq!(engine.state().nonce, 1);
    }

    #[test]
    fn retreat_ends_the_battle_once() {
        let mut engine = engine(&["orc"]);
        let outcome = engine.retreat().unwrap();
        assert_eq!(outcome.ended, Some(false));
        assert_eq!(outcome.log, vec![RETREAT_LINE]);
        assert_eq!(engine.outcome(), Some(false));

        assert_eq!(engine.retreat().unwrap_err(), ActionError::BattleOver);
        assert_eq!(engine.skip_turn().unwrap_err(), ActionError::BattleOver);
        assert_eq!(engine.act_enemy().unwrap_err(), ActionError::BattleOver);
        assert!(engine.view().skills.is_empty());
    }
}
