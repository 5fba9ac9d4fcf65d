use tracing::trace;

use crate::error::{BattleError, ErrorSeverity};
use crate::state::{BattlePhase, BattleState, Side, UnitKey};

/// Errors that can occur during turn operations
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("no living unit is left in the turn queue")]
    NoLivingUnits,
}

impl BattleError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoLivingUnits => "TURN_NO_LIVING_UNITS",
        }
    }
}

/// Fixed cyclic turn order: every hero, then every enemy, in roster order.
///
/// Membership never changes during a battle. Fallen units keep their slot and
/// are skipped when the scheduler looks for the next actor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnQueue {
    order: Vec<UnitKey>,
    index: usize,
}

impl TurnQueue {
    pub fn new(heroes: usize, enemies: usize) -> Self {
        let order = (0..heroes)
            .map(UnitKey::hero)
            .chain((0..enemies).map(UnitKey::enemy))
            .collect();
        Self { order, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn order(&self) -> &[UnitKey] {
        &self.order
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Unit at the current position, `None` for an empty queue.
    pub fn current(&self) -> Option<UnitKey> {
        self.order.get(self.index).copied()
    }

    /// First position at or after `offset` steps past the current index whose
    /// unit satisfies `is_alive`. Scans at most one full cycle.
    fn find_from(&self, offset: usize, is_alive: impl Fn(UnitKey) -> bool) -> Option<usize> {
        let len = self.order.len();
        (0..len)
            .map(|step| (self.index + offset + step) % len)
            .find(|&position| is_alive(self.order[position]))
    }
}

/// Moves a battle from one actor to the next.
///
/// Owns the per-turn bookkeeping: modifier decay runs once for every turn
/// that ends, and a hero's cooldowns tick when that hero's own turn begins.
pub struct TurnScheduler;

impl TurnScheduler {
    /// Settles the opening turn on the first living unit of the queue.
    ///
    /// Nothing decays here: no turn has ended yet.
    pub fn start(state: &mut BattleState) -> Result<UnitKey, TurnError> {
        let position = state
            .queue
            .find_from(0, |key| state.is_alive(key))
            .ok_or(TurnError::NoLivingUnits)?;
        Ok(Self::land_on(state, position))
    }

    /// Ends the current turn and hands it to the next living unit.
    ///
    /// Callers check the end condition first; as long as one unit lives the
    /// scan terminates within one cycle, wrapping back to the current unit
    /// if it is the only one left standing.
    pub fn advance(state: &mut BattleState) -> Result<UnitKey, TurnError> {
        let position = state
            .queue
            .find_from(1, |key| state.is_alive(key))
            .ok_or(TurnError::NoLivingUnits)?;

        let next = Self::land_on(state, position);

        let expired = state.buffs.decay_all();
        if next.side == Side::Hero {
            if let Some(hero) = state.heroes.get(next.index) {
                let id = hero.id.clone();
                state.cooldowns.tick_down(&id);
            }
        }

        trace!(next = %next, expired, "turn advanced");
        Ok(next)
    }

    fn land_on(state: &mut BattleState, position: usize) -> UnitKey {
        state.queue.index = position;
        let key = state.queue.order[position];
        state.phase = BattlePhase::for_unit(key);
        key
    }
}
