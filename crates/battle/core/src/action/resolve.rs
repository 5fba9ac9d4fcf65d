//! Skill effect application.
//!
//! # Formulas
//!
//! ```text
//! damage:  raw       = floor(power / 100 × atk(user))
//!          mitigated = max(0, raw − def(target))
//!          lifesteal → user heals `mitigated`
//!          recoil    → cost = floor(hp(user) × fraction), hp floored at 1
//! heal:    amount    = floor(power × atk(user))
//! buff:    modifier(stat, amount%, turns) on the target
//! ```
//!
//! Heal power multiplies attack directly while damage power is a percentage.
//! Existing content is balanced around that, so both scalings are kept.

use tracing::debug;

use super::ActionError;
use crate::config::BattleConfig;
use crate::state::{BattleState, Side, SkillEffect, Stat, Unit, UnitKey};
use crate::stats::StatResolver;

/// Applies one skill from one unit to one target.
#[derive(Clone, Copy, Debug)]
pub struct SkillResolver<'a> {
    config: &'a BattleConfig,
}

impl<'a> SkillResolver<'a> {
    pub fn new(config: &'a BattleConfig) -> Self {
        Self { config }
    }

    /// Resolves the skill in `slot` of `user` against `target`.
    ///
    /// Mutates hp, modifiers, and (for heroes) cooldowns exactly once, and
    /// returns the narrative log lines in the order they happened. Targeting
    /// rules are the caller's job; this only fails on keys or slots that do
    /// not exist.
    pub fn apply(
        &self,
        state: &mut BattleState,
        user: UnitKey,
        slot: usize,
        target: UnitKey,
    ) -> Result<Vec<String>, ActionError> {
        let caster = state
            .unit(user)
            .ok_or(ActionError::UnknownUnit { unit: user })?;
        let skill = caster
            .skills
            .get(slot)
            .cloned()
            .ok_or(ActionError::UnknownSkill { unit: user, slot })?;
        let receiver = state
            .unit(target)
            .ok_or(ActionError::UnknownTarget { target })?;

        let user_id = caster.id.clone();
        let user_name = caster.name.clone();
        let target_id = receiver.id.clone();
        let target_name = receiver.name.clone();

        let stats = StatResolver::new(&state.buffs, self.config);
        let user_atk = stats.effective_stat(caster, Stat::Atk);
        let target_def = stats.effective_stat(receiver, Stat::Def);

        let mut log = Vec::new();

        match skill.effect {
            SkillEffect::Damage {
                power,
                lifesteal,
                self_damage,
            } => {
                let raw = ((power / 100.0) * f64::from(user_atk)).floor() as i32;
                let mitigated = (raw - target_def).max(0);

                unit_mut(state, target)?.take_damage(mitigated);
                log.push(format!(
                    "{user_name} hits {target_name} for {mitigated} damage."
                ));

                if lifesteal {
                    unit_mut(state, user)?.restore(mitigated);
                    log.push(format!("{user_name} heals for {mitigated} HP."));
                }

                if let Some(fraction) = self_damage.filter(|fraction| *fraction > 0.0) {
                    let caster = unit_mut(state, user)?;
                    let cost = (f64::from(caster.hp()) * fraction).floor() as i32;
                    caster.set_hp((caster.hp() - cost).max(1));
                    log.push(format!("{user_name} loses {cost} HP in recoil."));
                }
            }
            SkillEffect::Heal { power } => {
                let amount = (power * f64::from(user_atk)).floor() as i32;
                unit_mut(state, target)?.restore(amount);
                log.push(format!("{user_name} heals {target_name} for {amount} HP."));
            }
            SkillEffect::Buff {
                ref stat,
                amount,
                turns,
            } => {
                state
                    .buffs
                    .add_modifier(target.side, &target_id, stat.clone(), amount, turns);
                log.push(format!(
                    "{target_name}'s {stat} increased by {amount}% for {turns} turns."
                ));
            }
        }

        if user.side == Side::Hero {
            state
                .cooldowns
                .set_cooldown(&user_id, slot, skill.declared_cooldown());
        }

        debug!(
            user = %user,
            target = %target,
            skill = %skill.name,
            kind = %skill.kind(),
            "skill resolved"
        );

        Ok(log)
    }
}

fn unit_mut(state: &mut BattleState, key: UnitKey) -> Result<&mut Unit, ActionError> {
    state
        .unit_mut(key)
        .ok_or(ActionError::UnknownUnit { unit: key })
}
