/// How enemies pick a hero to target on their automatic turn.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EnemyTargeting {
    /// Always the first living hero in roster order.
    #[default]
    FirstLiving,
    /// A uniformly random living hero.
    Random,
}

/// Battle rule constants and tunable parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Upper bound for effective evasion after all modifiers.
    pub evasion_cap: i32,
    /// Target policy for enemy auto-turns.
    pub enemy_targeting: EnemyTargeting,
}

impl BattleConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_EVASION_CAP: i32 = 60;

    pub fn new() -> Self {
        Self {
            evasion_cap: Self::DEFAULT_EVASION_CAP,
            enemy_targeting: EnemyTargeting::default(),
        }
    }

    pub fn with_enemy_targeting(mut self, targeting: EnemyTargeting) -> Self {
        self.enemy_targeting = targeting;
        self
    }

    pub fn with_evasion_cap(mut self, cap: i32) -> Self {
        self.evasion_cap = cap;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
