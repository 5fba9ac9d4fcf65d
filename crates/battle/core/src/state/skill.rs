//! Skill definitions.
//!
//! Skills are loaded once from roster data and never mutated afterwards.
//! Runtime state tied to a skill (cooldowns) lives in
//! [`crate::CooldownTracker`], keyed by the skill's slot in its owner's list.

/// Stats a unit exposes to the resolver and to buff skills.
///
/// Names follow the roster data files (`atk`, `def`, `eva`, `hp`, `maxHp`).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
pub enum Stat {
    Hp,
    MaxHp,
    Atk,
    Def,
    Eva,
}

/// Stat named by a buff skill.
///
/// Names outside [`Stat`] are kept as written: such a buff still registers
/// and counts down, but no stat read ever picks it up.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum BuffStat {
    Known(Stat),
    Other(String),
}

impl BuffStat {
    /// The stat this buff modifies, `None` for an unrecognised name.
    pub fn known(&self) -> Option<Stat> {
        match self {
            Self::Known(stat) => Some(*stat),
            Self::Other(_) => None,
        }
    }
}

impl From<Stat> for BuffStat {
    fn from(stat: Stat) -> Self {
        Self::Known(stat)
    }
}

impl From<String> for BuffStat {
    fn from(name: String) -> Self {
        match name.parse::<Stat>() {
            Ok(stat) => Self::Known(stat),
            Err(_) => Self::Other(name),
        }
    }
}

impl From<&str> for BuffStat {
    fn from(name: &str) -> Self {
        Self::from(name.to_owned())
    }
}

impl From<BuffStat> for String {
    fn from(stat: BuffStat) -> Self {
        match stat {
            BuffStat::Known(stat) => stat.to_string(),
            BuffStat::Other(name) => name,
        }
    }
}

impl core::fmt::Display for BuffStat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Known(stat) => write!(f, "{stat}"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// Which side a skill may target, relative to its caster.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum TargetSide {
    Ally,
    Enemy,
}

/// Coarse category of a skill, as shown to the player.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum SkillKind {
    Damage,
    Heal,
    Buff,
}

/// What a skill does when it resolves.
///
/// Serialized with the `type` tag used by the roster files, so a skill entry
/// reads `{"name": "Slash", "type": "damage", "target": "enemy", "power": 120}`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum SkillEffect {
    /// Percentage of the caster's attack, reduced by the target's defense.
    Damage {
        power: f64,
        #[cfg_attr(feature = "serde", serde(default))]
        lifesteal: bool,
        /// Fraction of the caster's hp paid after the hit.
        #[cfg_attr(
            feature = "serde",
            serde(default, rename = "selfDamage", skip_serializing_if = "Option::is_none")
        )]
        self_damage: Option<f64>,
    },
    /// Flat multiple of the caster's attack.
    Heal { power: f64 },
    /// Temporary percentage modifier on one stat of the target.
    Buff {
        stat: BuffStat,
        amount: i32,
        turns: i32,
    },
}

impl SkillEffect {
    pub fn kind(&self) -> SkillKind {
        match self {
            Self::Damage { .. } => SkillKind::Damage,
            Self::Heal { .. } => SkillKind::Heal,
            Self::Buff { .. } => SkillKind::Buff,
        }
    }
}

/// A named skill with its targeting rule, optional cooldown, and effect.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub name: String,
    pub target: TargetSide,
    /// Turns before a hero may reuse the skill. Enemies only use it as an
    /// eligibility filter.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub cooldown: Option<u32>,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub effect: SkillEffect,
}

impl Skill {
    pub fn new(name: impl Into<String>, target: TargetSide, effect: SkillEffect) -> Self {
        Self {
            name: name.into(),
            target,
            cooldown: None,
            effect,
        }
    }

    /// Enemy-targeted damage skill with `power` percent of attack.
    pub fn damage(name: impl Into<String>, power: f64) -> Self {
        Self::new(
            name,
            TargetSide::Enemy,
            SkillEffect::Damage {
                power,
                lifesteal: false,
                self_damage: None,
            },
        )
    }

    /// Ally-targeted heal skill.
    pub fn heal(name: impl Into<String>, power: f64) -> Self {
        Self::new(name, TargetSide::Ally, SkillEffect::Heal { power })
    }

    /// Ally-targeted buff skill.
    pub fn buff(
        name: impl Into<String>,
        stat: impl Into<BuffStat>,
        amount: i32,
        turns: i32,
    ) -> Self {
        let stat = stat.into();
        Self::new(name, TargetSide::Ally, SkillEffect::Buff { stat, amount, turns })
    }

    pub fn with_cooldown(mut self, turns: u32) -> Self {
        self.cooldown = Some(turns);
        self
    }

    pub fn with_target(mut self, target: TargetSide) -> Self {
        self.target = target;
        self
    }

    /// Marks a damage skill as healing its caster for the damage dealt.
    /// Has no effect on other kinds.
    pub fn with_lifesteal(mut self) -> Self {
        if let SkillEffect::Damage { lifesteal, .. } = &mut self.effect {
            *lifesteal = true;
        }
        self
    }

    /// Sets the recoil fraction of a damage skill. Has no effect on other kinds.
    pub fn with_self_damage(mut self, fraction: f64) -> Self {
        if let SkillEffect::Damage { self_damage, .. } = &mut self.effect {
            *self_damage = Some(fraction);
        }
        self
    }

    pub fn kind(&self) -> SkillKind {
        self.effect.kind()
    }

    /// Declared cooldown, zero when absent.
    pub fn declared_cooldown(&self) -> u32 {
        self.cooldown.unwrap_or(0)
    }

    /// Whether an enemy may pick this skill on its automatic turn.
    pub fn is_enemy_eligible(&self) -> bool {
        self.declared_cooldown() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_names_follow_roster_files() {
        assert_eq!(Stat::MaxHp.to_string(), "maxHp");
        assert_eq!("eva".parse::<Stat>().unwrap(), Stat::Eva);
        assert!("luck".parse::<Stat>().is_err());
    }

    #[test]
    fn buff_stat_keeps_unrecognised_names() {
        assert_eq!(BuffStat::from("def"), BuffStat::Known(Stat::Def));
        assert_eq!(BuffStat::from("maxHp").known(), Some(Stat::MaxHp));

        let speed = BuffStat::from("spd");
        assert_eq!(speed, BuffStat::Other("spd".to_owned()));
        assert_eq!(speed.known(), None);
        assert_eq!(speed.to_string(), "spd");
        assert_eq!(String::from(BuffStat::Known(Stat::Eva)), "eva");
    }

    #[test]
    fn builders_only_touch_damage_effects() {
        let heal = Skill::heal("Mend", 1.5).with_lifesteal().with_self_damage(0.5);
        assert_eq!(heal.effect, SkillEffect::Heal { power: 1.5 });

        let bite = Skill::damage("Bite", 80.0).with_lifesteal().with_self_damage(0.25);
        assert_eq!(
            bite.effect,
            SkillEffect::Damage {
                power: 80.0,
                lifesteal: true,
                self_damage: Some(0.25),
            }
        );
    }

    #[test]
    fn zero_cooldown_counts_as_eligible() {
        assert!(Skill::damage("Jab", 100.0).is_enemy_eligible());
        assert!(Skill::damage("Jab", 100.0).with_cooldown(0).is_enemy_eligible());
        assert!(!Skill::damage("Smash", 200.0).with_cooldown(2).is_enemy_eligible());
    }
}
