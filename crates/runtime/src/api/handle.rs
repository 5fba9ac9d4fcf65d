//! Cloneable façade for issuing commands to a running battle.
//!
//! [`BattleHandle`] hides channel plumbing and offers async helpers for the
//! hero choice points, view queries, and topic subscriptions.
use tokio::sync::{broadcast, mpsc, oneshot};

use battle_core::{ActionOutcome, BattleView, UnitKey};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with one battle
#[derive(Clone)]
pub struct BattleHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl BattleHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Pick the active hero's skill. Nothing resolves until a target follows.
    pub async fn select_skill(&self, slot: usize) -> Result<()> {
        self.request(|reply| Command::SelectSkill { slot, reply })
            .await?
    }

    /// Drop the pending skill choice, if any.
    pub async fn cancel_selection(&self) -> Result<()> {
        self.request(|reply| Command::CancelSelection { reply }).await
    }

    /// Resolve the pending skill on `target`.
    pub async fn select_target(&self, target: UnitKey) -> Result<ActionOutcome> {
        self.request(|reply| Command::SelectTarget { target, reply })
            .await?
    }

    /// Select a skill and a target in one round trip.
    pub async fn use_skill(&self, slot: usize, target: UnitKey) -> Result<ActionOutcome> {
        self.request(|reply| Command::UseSkill {
            slot,
            target,
            reply,
        })
        .await?
    }

    /// Pass the active hero's turn.
    pub async fn skip_turn(&self) -> Result<ActionOutcome> {
        self.request(|reply| Command::SkipTurn { reply }).await?
    }

    /// Leave the battle. Ends it as a defeat.
    pub async fn retreat(&self) -> Result<ActionOutcome> {
        self.request(|reply| Command::Retreat { reply }).await?
    }

    /// Query the current renderable view
    pub async fn query_view(&self) -> Result<BattleView> {
        self.request(|reply| Command::QueryView { reply }).await
    }

    /// Living units the active hero may aim `slot` at
    pub async fn usable_targets(&self, slot: usize) -> Result<Vec<UnitKey>> {
        self.request(|reply| Command::QueryTargets { slot, reply })
            .await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Log` - Narrative lines, in the order they happened
    /// - `Topic::Turn` - The turn moved to a new actor
    /// - `Topic::Outcome` - The battle ended (once)
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }
}
