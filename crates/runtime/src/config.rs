//! Runtime configuration and environment loading.
use std::env;
use std::time::Duration;

use battle_core::{BattleConfig, EnemyTargeting};

/// Runtime configuration shared across the orchestrator and the battle worker.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub battle: BattleConfig,
    /// Pause between a turn landing on an enemy and that enemy acting, so
    /// observers can see the previous action first.
    pub enemy_turn_delay: Duration,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Fixed seed for enemy decisions; drawn from entropy when unset.
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            battle: BattleConfig::default(),
            enemy_turn_delay: Self::DEFAULT_ENEMY_TURN_DELAY,
            event_buffer_size: 100,
            command_buffer_size: 32,
            seed: None,
        }
    }
}

impl RuntimeConfig {
    pub const DEFAULT_ENEMY_TURN_DELAY: Duration = Duration::from_millis(1000);

    /// Construct configuration from process environment variables.
    ///
    /// - `BATTLE_ENEMY_DELAY_MS`
    /// - `BATTLE_SEED`
    /// - `BATTLE_EVENT_BUFFER` / `BATTLE_COMMAND_BUFFER`
    /// - `BATTLE_ENEMY_TARGETING` (`first_living` or `random`)
    ///
    /// Unset or unparsable variables keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(millis) = read_env::<u64>("BATTLE_ENEMY_DELAY_MS") {
            config.enemy_turn_delay = Duration::from_millis(millis);
        }

        config.seed = read_env::<u64>("BATTLE_SEED");

        if let Some(capacity) = read_env::<usize>("BATTLE_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }

        if let Some(capacity) = read_env::<usize>("BATTLE_COMMAND_BUFFER") {
            config.command_buffer_size = capacity.max(1);
        }

        if let Some(targeting) = read_env::<EnemyTargeting>("BATTLE_ENEMY_TARGETING") {
            config.battle.enemy_targeting = targeting;
        }

        config
    }

    pub fn with_battle(mut self, battle: BattleConfig) -> Self {
        self.battle = battle;
        self
    }

    pub fn with_enemy_turn_delay(mut self, delay: Duration) -> Self {
        self.enemy_turn_delay = delay;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
