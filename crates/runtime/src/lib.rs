//! Async session driver for turn-based battles.
//!
//! This crate wires a `battle-core` engine into a tokio worker task with a
//! command channel, a topic event bus, and a deferred continuation for enemy
//! turns. Consumers embed [`BattleRuntime`] to run a battle, subscribe to
//! events, and feed hero choices through [`BattleHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`config`] holds runtime settings and environment loading
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod config;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{
    AutoHeroProvider, BattleHandle, HeroActionProvider, HeroDecision, Result, RuntimeError,
    ScriptedHeroProvider,
};
pub use config::RuntimeConfig;
pub use events::{Event, EventBus, LogEvent, OutcomeEvent, Topic, TurnEvent};
pub use runtime::{BattleRuntime, BattleRuntimeBuilder};
