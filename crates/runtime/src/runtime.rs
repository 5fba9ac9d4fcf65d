//! High-level runtime orchestrator.
//!
//! The runtime owns the battle worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive one battle.

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use battle_content::ContentFactory;
use battle_core::{
    ActionOutcome, BattleEngine, BattlePhase, EnemyOracle, RngOracle, RosterSnapshot,
};

use crate::api::{BattleHandle, HeroActionProvider, HeroDecision, Result, RuntimeError};
use crate::config::RuntimeConfig;
use crate::events::{Event, EventBus, Topic};
use crate::workers::{BattleWorker, Command};

/// Main runtime that runs one battle.
///
/// Design: the runtime owns the worker and coordinates hero input.
/// [`BattleHandle`] provides a cloneable façade for clients.
pub struct BattleRuntime {
    handle: BattleHandle,
    hero_provider: Option<Box<dyn HeroActionProvider>>,
    seed: u64,

    // Progress signals for waiting out enemy turns
    turn_rx: broadcast::Receiver<Event>,
    outcome_rx: broadcast::Receiver<Event>,

    worker_handle: JoinHandle<()>,
}

impl BattleRuntime {
    /// Create a new runtime builder
    pub fn builder() -> BattleRuntimeBuilder {
        BattleRuntimeBuilder::new()
    }

    /// Get a cloneable handle to this battle
    pub fn handle(&self) -> BattleHandle {
        self.handle.clone()
    }

    /// Seed the enemy decisions of this battle are derived from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Subscribe to events from a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Set the hero action provider
    pub fn set_hero_provider(&mut self, provider: impl HeroActionProvider + 'static) {
        self.hero_provider = Some(Box::new(provider));
    }

    /// Advance the battle by one step.
    ///
    /// On a hero turn the provider decides and the decision is applied. On
    /// an enemy turn this waits until the worker's timer has resolved it.
    /// Returns the outcome once the battle is over.
    pub async fn step(&mut self) -> Result<Option<bool>> {
        let view = self.handle.query_view().await?;

        match view.phase {
            BattlePhase::BattleOver { victory } => Ok(Some(victory)),
            BattlePhase::AwaitingHeroAction { hero } => {
                let provider = self
                    .hero_provider
                    .as_ref()
                    .ok_or(RuntimeError::ProviderNotSet)?;
                let decision = provider.decide(hero, &view).await?;
                debug!(hero = %hero, ?decision, "hero decided");

                let outcome = self.apply(decision).await?;
                Ok(outcome.ended)
            }
            BattlePhase::EnemyActing { .. } => {
                self.wait_for_progress().await?;
                Ok(None)
            }
        }
    }

    /// Run the battle until it ends and return whether the party won
    pub async fn run_to_end(&mut self) -> Result<bool> {
        loop {
            if let Some(victory) = self.step().await? {
                info!(victory, seed = self.seed, "battle run complete");
                return Ok(victory);
            }
        }
    }

    async fn apply(&self, decision: HeroDecision) -> Result<ActionOutcome> {
        match decision {
            HeroDecision::UseSkill { slot, target } => {
                self.handle.select_skill(slot).await?;
                match self.handle.select_target(target).await {
                    Ok(outcome) => Ok(outcome),
                    Err(err) => {
                        self.handle.cancel_selection().await?;
                        Err(err)
                    }
                }
            }
            HeroDecision::Skip => self.handle.skip_turn().await,
            HeroDecision::Retreat => self.handle.retreat().await,
        }
    }

    /// Waits for the next turn change or the outcome.
    async fn wait_for_progress(&mut self) -> Result<()> {
        let received = tokio::select! {
            event = self.turn_rx.recv() => event,
            event = self.outcome_rx.recv() => event,
        };

        match received {
            Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => Ok(()),
            Err(broadcast::error::RecvError::Closed) => Err(RuntimeError::EventStreamClosed),
        }
    }

    /// Shutdown the runtime gracefully
    ///
    /// Waits for the worker, so every cloned [`BattleHandle`] must be dropped
    /// first.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`BattleRuntime`] with flexible configuration.
pub struct BattleRuntimeBuilder {
    config: RuntimeConfig,
    roster: Option<RosterSnapshot>,
    enemies: Option<Box<dyn EnemyOracle + Send>>,
    rng: Option<Box<dyn RngOracle>>,
    hero_provider: Option<Box<dyn HeroActionProvider>>,
}

impl BattleRuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            roster: None,
            enemies: None,
            rng: None,
            hero_provider: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the party and the encounter
    pub fn roster(mut self, roster: RosterSnapshot) -> Self {
        self.roster = Some(roster);
        self
    }

    /// Set the table enemy ids are resolved against
    pub fn enemies(mut self, enemies: impl EnemyOracle + Send + 'static) -> Self {
        self.enemies = Some(Box::new(enemies));
        self
    }

    /// Replace the random source for enemy decisions (optional)
    pub fn rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Set hero action provider (optional)
    pub fn hero_provider(mut self, provider: impl HeroActionProvider + 'static) -> Self {
        self.hero_provider = Some(Box::new(provider));
        self
    }

    /// Load the party, the enemy table, and the battle rules from a data
    /// directory, fighting `enemy_group`.
    pub fn content<I, S>(mut self, factory: &ContentFactory, enemy_group: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roster = Some(factory.roster(enemy_group)?);
        self.enemies = Some(Box::new(factory.load_enemies()?));
        self.config.battle = factory.load_config()?;
        Ok(self)
    }

    /// Build the runtime and start the battle worker
    pub async fn build(self) -> Result<BattleRuntime> {
        let roster = self.roster.ok_or(RuntimeError::MissingRoster)?;
        let enemies = self.enemies.ok_or(RuntimeError::MissingEnemies)?;
        let seed = self.config.seed.unwrap_or_else(rand::random);

        let mut engine = BattleEngine::start(&roster, enemies.as_ref(), self.config.battle, seed)?;
        if let Some(rng) = self.rng {
            engine = engine.with_rng(rng);
        }

        let (command_tx, command_rx) =
            mpsc::channel::<Command>(self.config.command_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = BattleHandle::new(command_tx, event_bus.clone());
        let turn_rx = event_bus.subscribe(Topic::Turn);
        let outcome_rx = event_bus.subscribe(Topic::Outcome);

        let worker = BattleWorker::new(
            engine,
            command_rx,
            event_bus,
            self.config.enemy_turn_delay,
        );
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(BattleRuntime {
            handle,
            hero_provider: self.hero_provider,
            seed,
            turn_rx,
            outcome_rx,
            worker_handle,
        })
    }
}
