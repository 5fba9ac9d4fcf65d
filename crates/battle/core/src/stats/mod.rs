//! Effective stat computation under temporary modifiers.
//!
//! ```text
//! effective = base + Σ floor(base × amount / 100)   (one term per modifier)
//! eva       = min(effective, evasion_cap)
//! ```
//!
//! Every modifier is computed off the unmodified base, so two +50% buffs on a
//! base of 10 add 5 + 5 rather than compounding.

mod buffs;

pub use buffs::{BuffTracker, Modifier};

use crate::config::BattleConfig;
use crate::state::{Stat, Unit};

/// Read-only view over the modifier tables that resolves effective stats.
#[derive(Clone, Copy, Debug)]
pub struct StatResolver<'a> {
    buffs: &'a BuffTracker,
    evasion_cap: i32,
}

impl<'a> StatResolver<'a> {
    pub fn new(buffs: &'a BuffTracker, config: &BattleConfig) -> Self {
        Self {
            buffs,
            evasion_cap: config.evasion_cap,
        }
    }

    /// Effective value of `stat` for `unit` with all its active modifiers.
    pub fn effective_stat(&self, unit: &Unit, stat: Stat) -> i32 {
        let base = unit.base_stat(stat);

        let bonus: i32 = self
            .buffs
            .modifiers(unit.side, &unit.id)
            .iter()
            .filter(|modifier| modifier.stat.known() == Some(stat))
            .map(|modifier| percent_of(base, modifier.amount))
            .sum();

        let value = base.saturating_add(bonus);
        if stat == Stat::Eva {
            value.min(self.evasion_cap)
        } else {
            value
        }
    }

    /// Resolves a stat by its data-file name.
    ///
    /// Unknown names have no base value and no modifiers, so they resolve to
    /// zero instead of failing.
    pub fn effective_stat_by_name(&self, unit: &Unit, name: &str) -> i32 {
        name.parse::<Stat>()
            .map(|stat| self.effective_stat(unit, stat))
            .unwrap_or(0)
    }
}

/// `floor(base * percent / 100)`, rounding toward negative infinity.
fn percent_of(base: i32, percent: i32) -> i32 {
    let scaled = i64::from(base) * i64::from(percent);
    scaled.div_euclid(100).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Side, UnitTemplate};

    fn knight() -> Unit {
        let template = UnitTemplate::new("h1", "Knight", 40).with_stats(10, 4, 50);
        Unit::spawn(&template, Side::Hero, "h1")
    }

    #[test]
    fn no_modifiers_yield_base_stats() {
        let buffs = BuffTracker::new();
        let resolver = StatResolver::new(&buffs, &BattleConfig::default());
        let unit = knight();

        for stat in [Stat::Hp, Stat::MaxHp, Stat::Atk, Stat::Def, Stat::Eva] {
            assert_eq!(resolver.effective_stat(&unit, stat), unit.base_stat(stat));
        }
    }

    #[test]
    fn single_modifier_adds_floored_percentage() {
        let mut buffs = BuffTracker::new();
        buffs.add_modifier(Side::Hero, "h1", Stat::Atk, 35, 2);
        let resolver = StatResolver::new(&buffs, &BattleConfig::default());

        // floor(10 * 35 / 100) = 3
        assert_eq!(resolver.effective_stat(&knight(), Stat::Atk), 13);
    }

    #[test]
    fn same_stat_modifiers_do_not_compound() {
        let mut buffs = BuffTracker::new();
        buffs.add_modifier(Side::Hero, "h1", Stat::Atk, 50, 2);
        buffs.add_modifier(Side::Hero, "h1", Stat::Atk, 50, 1);
        let resolver = StatResolver::new(&buffs, &BattleConfig::default());

        assert_eq!(resolver.effective_stat(&knight(), Stat::Atk), 20);
    }

    #[test]
    fn evasion_is_capped_after_modifiers() {
        let mut buffs = BuffTracker::new();
        buffs.add_modifier(Side::Hero, "h1", Stat::Eva, 50, 1);
        let resolver = StatResolver::new(&buffs, &BattleConfig::default());

        assert_eq!(resolver.effective_stat(&knight(), Stat::Eva), 60);
    }

    #[test]
    fn modifiers_are_scoped_to_side_and_unit() {
        let mut buffs = BuffTracker::new();
        buffs.add_modifier(Side::Enemy, "h1", Stat::Def, 100, 3);
        buffs.add_modifier(Side::Hero, "h2", Stat::Def, 100, 3);
        let resolver = StatResolver::new(&buffs, &BattleConfig::default());

        assert_eq!(resolver.effective_stat(&knight(), Stat::Def), 4);
    }

    #[test]
    fn debuffs_floor_toward_negative_infinity() {
        let mut buffs = BuffTracker::new();
        buffs.add_modifier(Side::Hero, "h1", Stat::Def, -30, 1);
        let resolver = StatResolver::new(&buffs, &BattleConfig::default());

        // floor(4 * -30 / 100) = floor(-1.2) = -2
        assert_eq!(resolver.effective_stat(&knight(), Stat::Def), 2);
    }

    #[test]
    fn unknown_stat_modifiers_change_nothing() {
        let mut buffs = BuffTracker::new();
        buffs.add_modifier(Side::Hero, "h1", "spd", 100, 3);
        let resolver = StatResolver::new(&buffs, &BattleConfig::default());

        for stat in [Stat::Hp, Stat::MaxHp, Stat::Atk, Stat::Def, Stat::Eva] {
            assert_eq!(resolver.effective_stat(&knight(), stat), knight().base_stat(stat));
        }
        assert_eq!(resolver.effective_stat_by_name(&knight(), "spd"), 0);
    }

    #[test]
    fn unknown_stat_names_resolve_without_error() {
        let buffs = BuffTracker::new();
        let resolver = StatResolver::new(&buffs, &BattleConfig::default());

        assert_eq!(resolver.effective_stat_by_name(&knight(), "atk"), 10);
        assert_eq!(resolver.effective_stat_by_name(&knight(), "luck"), 0);
    }
}
