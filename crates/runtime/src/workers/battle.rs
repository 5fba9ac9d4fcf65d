//! Battle worker that owns the authoritative [`battle_core::BattleEngine`].
//!
//! Receives commands from [`crate::BattleHandle`], forwards hero choices to
//! the engine, runs enemy turns when the [`EnemyTurnTimer`] fires, and
//! publishes every result to the [`EventBus`].

use std::time::Duration;

use battle_core::{
    ActionError, ActionOutcome, BattleEngine, BattleError, BattlePhase, BattleView, UnitKey,
};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use super::timer::EnemyTurnTimer;
use crate::api::{Result, RuntimeError};
use crate::events::{Event, EventBus, LogEvent, OutcomeEvent, TurnEvent};

/// Commands that can be sent to the battle worker
pub enum Command {
    /// First hero choice point.
    SelectSkill {
        slot: usize,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Drop a pending skill choice.
    CancelSelection { reply: oneshot::Sender<()> },
    /// Second hero choice point; resolves the pending skill.
    SelectTarget {
        target: UnitKey,
        reply: oneshot::Sender<Result<ActionOutcome>>,
    },
    /// Both hero choices at once.
    UseSkill {
        slot: usize,
        target: UnitKey,
        reply: oneshot::Sender<Result<ActionOutcome>>,
    },
    SkipTurn {
        reply: oneshot::Sender<Result<ActionOutcome>>,
    },
    Retreat {
        reply: oneshot::Sender<Result<ActionOutcome>>,
    },
    /// Current renderable view (read-only).
    QueryView { reply: oneshot::Sender<BattleView> },
    /// Living units the active hero may aim a skill at.
    QueryTargets {
        slot: usize,
        reply: oneshot::Sender<Vec<UnitKey>>,
    },
}

/// Background task that processes battle commands.
pub struct BattleWorker {
    engine: BattleEngine,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    timer: EnemyTurnTimer,
    enemy_turn_delay: Duration,
}

impl BattleWorker {
    pub fn new(
        engine: BattleEngine,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        enemy_turn_delay: Duration,
    ) -> Self {
        Self {
            engine,
            command_rx,
            event_bus,
            timer: EnemyTurnTimer::new(),
            enemy_turn_delay,
        }
    }

    /// Main worker loop. Ends once every handle is dropped.
    pub async fn run(mut self) {
        self.publish_turn();
        self.schedule_enemy_turn();

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                () = self.timer.fired() => self.run_enemy_turn(),
            }
        }

        debug!(phase = self.engine.phase().as_str(), "battle worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::SelectSkill { slot, reply } => {
                let result = self.engine.select_skill(slot).map_err(|err| {
                    Self::log_rejection(&err);
                    RuntimeError::from(err)
                });
                if reply.send(result).is_err() {
                    debug!("SelectSkill reply channel closed (caller dropped)");
                }
            }
            Command::CancelSelection { reply } => {
                self.engine.cancel_selection();
                if reply.send(()).is_err() {
                    debug!("CancelSelection reply channel closed (caller dropped)");
                }
            }
            Command::SelectTarget { target, reply } => {
                let result = self.engine.select_target(target);
                let result = self.publish(result, false);
                if reply.send(result).is_err() {
                    debug!("SelectTarget reply channel closed (caller dropped)");
                }
            }
            Command::UseSkill {
                slot,
                target,
                reply,
            } => {
                let result = self.engine.use_skill(slot, target);
                let result = self.publish(result, false);
                if reply.send(result).is_err() {
                    debug!("UseSkill reply channel closed (caller dropped)");
                }
            }
            Command::SkipTurn { reply } => {
                let result = self.engine.skip_turn();
                let result = self.publish(result, false);
                if reply.send(result).is_err() {
                    debug!("SkipTurn reply channel closed (caller dropped)");
                }
            }
            Command::Retreat { reply } => {
                let result = self.engine.retreat();
                let result = self.publish(result, true);
                if reply.send(result).is_err() {
                    debug!("Retreat reply channel closed (caller dropped)");
                }
            }
            Command::QueryView { reply } => {
                if reply.send(self.engine.view()).is_err() {
                    debug!("QueryView reply channel closed (caller dropped)");
                }
            }
            Command::QueryTargets { slot, reply } => {
                if reply.send(self.engine.usable_targets(slot)).is_err() {
                    debug!("QueryTargets reply channel closed (caller dropped)");
                }
            }
        }
    }

    /// Timer continuation. Re-checks the phase: a stale deadline must never
    /// act for a unit whose turn is gone or after the battle ended.
    fn run_enemy_turn(&mut self) {
        if !matches!(self.engine.phase(), BattlePhase::EnemyActing { .. }) {
            warn!(
                phase = self.engine.phase().as_str(),
                "enemy turn timer fired outside an enemy turn"
            );
            return;
        }

        let result = self.engine.act_enemy();
        if let Err(err) = self.publish(result, false) {
            error!(error = %err, "enemy turn failed");
        }
    }

    /// Publishes a resolved action and schedules what comes next.
    fn publish(
        &mut self,
        result: std::result::Result<ActionOutcome, ActionError>,
        retreated: bool,
    ) -> Result<ActionOutcome> {
        let outcome = result.inspect_err(Self::log_rejection)?;
        let nonce = self.engine.state().nonce;

        for line in &outcome.log {
            self.event_bus.publish(Event::Log(LogEvent {
                nonce,
                line: line.clone(),
            }));
        }

        match outcome.ended {
            Some(victory) => {
                self.timer.disarm();
                info!(victory, retreated, nonce, "battle finished");
                self.event_bus
                    .publish(Event::Outcome(OutcomeEvent { victory, retreated }));
            }
            None => {
                self.publish_turn();
                self.schedule_enemy_turn();
            }
        }

        Ok(outcome)
    }

    fn publish_turn(&self) {
        let phase = self.engine.phase();
        if let Some(active) = phase.active_unit() {
            self.event_bus.publish(Event::Turn(TurnEvent {
                active,
                phase,
                view: self.engine.view(),
            }));
        }
    }

    fn schedule_enemy_turn(&mut self) {
        if matches!(self.engine.phase(), BattlePhase::EnemyActing { .. }) {
            self.timer.arm(self.enemy_turn_delay);
        } else {
            self.timer.disarm();
        }
    }

    fn log_rejection(err: &ActionError) {
        warn!(
            code = err.error_code(),
            severity = err.severity().as_str(),
            "action rejected: {err}"
        );
    }
}
