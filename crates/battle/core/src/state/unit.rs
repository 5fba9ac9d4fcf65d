//! Combatants and their roster definitions.

use super::skill::{Skill, Stat, TargetSide};

/// Which roster a unit belongs to.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    Hero,
    Enemy,
}

impl Side {
    pub const fn opponent(self) -> Self {
        match self {
            Self::Hero => Self::Enemy,
            Self::Enemy => Self::Hero,
        }
    }

    /// Resolves a caster-relative target side to an absolute roster.
    pub const fn resolve(self, target: TargetSide) -> Self {
        match target {
            TargetSide::Ally => self,
            TargetSide::Enemy => self.opponent(),
        }
    }
}

/// Stable handle to a unit for the lifetime of one battle.
///
/// Rosters never change membership during a battle, so a side plus a roster
/// index identifies a unit without scanning or comparing names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitKey {
    pub side: Side,
    pub index: usize,
}

impl UnitKey {
    pub const fn new(side: Side, index: usize) -> Self {
        Self { side, index }
    }

    pub const fn hero(index: usize) -> Self {
        Self::new(Side::Hero, index)
    }

    pub const fn enemy(index: usize) -> Self {
        Self::new(Side::Enemy, index)
    }
}

impl core::fmt::Display for UnitKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}#{}", self.side, self.index)
    }
}

/// Roster definition of a hero or enemy, as supplied by the content layer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitTemplate {
    pub id: String,
    pub name: String,
    pub hp: i32,
    #[cfg_attr(feature = "serde", serde(rename = "maxHp"))]
    pub max_hp: i32,
    pub atk: i32,
    pub def: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub eva: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<Skill>,
}

impl UnitTemplate {
    /// Creates a template at full health with zeroed combat stats.
    pub fn new(id: impl Into<String>, name: impl Into<String>, max_hp: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            hp: max_hp,
            max_hp,
            atk: 0,
            def: 0,
            eva: 0,
            skills: Vec::new(),
        }
    }

    pub fn with_stats(mut self, atk: i32, def: i32, eva: i32) -> Self {
        self.atk = atk;
        self.def = def;
        self.eva = eva;
        self
    }

    pub fn with_hp(mut self, hp: i32) -> Self {
        self.hp = hp;
        self
    }

    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.skills.push(skill);
        self
    }
}

/// A combatant inside a running battle.
///
/// Hit points are private so every mutation goes through the clamping
/// helpers: `0 <= hp <= max_hp` holds at all times.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    /// Instance id, unique within the unit's side.
    pub id: String,
    /// Id of the roster definition this unit was spawned from.
    pub template_id: String,
    pub name: String,
    pub side: Side,
    hp: i32,
    pub max_hp: i32,
    pub atk: i32,
    pub def: i32,
    pub eva: i32,
    pub skills: Vec<Skill>,
}

impl Unit {
    /// Spawns an owned copy of `template`. Later mutations never reach the
    /// template, so one definition can seed any number of battles.
    pub fn spawn(template: &UnitTemplate, side: Side, instance_id: impl Into<String>) -> Self {
        let max_hp = template.max_hp.max(0);
        Self {
            id: instance_id.into(),
            template_id: template.id.clone(),
            name: template.name.clone(),
            side,
            hp: template.hp.clamp(0, max_hp),
            max_hp,
            atk: template.atk,
            def: template.def,
            eva: template.eva,
            skills: template.skills.clone(),
        }
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Sets hp, clamped into `[0, max_hp]`.
    pub fn set_hp(&mut self, hp: i32) {
        self.hp = hp.clamp(0, self.max_hp);
    }

    /// Removes up to `amount` hp, never going below zero.
    pub fn take_damage(&mut self, amount: i32) {
        self.set_hp(self.hp.saturating_sub(amount.max(0)));
    }

    /// Restores up to `amount` hp, never exceeding `max_hp`.
    pub fn restore(&mut self, amount: i32) {
        self.set_hp(self.hp.saturating_add(amount.max(0)));
    }

    /// Unmodified value of a stat.
    pub fn base_stat(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Hp => self.hp,
            Stat::MaxHp => self.max_hp,
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::Eva => self.eva,
        }
    }
}
