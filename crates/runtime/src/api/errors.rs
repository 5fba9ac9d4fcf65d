//! Unified error types surfaced by the runtime API.
//!
//! Wraps engine rejections, content loading failures, and worker
//! coordination failures so clients can bubble them up with consistent
//! context.
use battle_core::{ActionError, BattleError, ErrorSeverity, RosterError};
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Content(#[from] anyhow::Error),

    #[error("runtime requires a roster snapshot before building")]
    MissingRoster,

    #[error("runtime requires an enemy table before building")]
    MissingEnemies,

    #[error("hero action provider not set")]
    ProviderNotSet,

    #[error("battle worker command channel closed")]
    CommandChannelClosed,

    #[error("battle worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("battle event stream closed before the battle ended")]
    EventStreamClosed,

    #[error("battle worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

impl RuntimeError {
    /// Severity of the underlying failure, for reporting.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Roster(err) => err.severity(),
            Self::Action(err) => err.severity(),
            Self::Content(_) | Self::MissingRoster | Self::MissingEnemies => ErrorSeverity::Fatal,
            Self::ProviderNotSet => ErrorSeverity::Validation,
            Self::CommandChannelClosed
            | Self::ReplyChannelClosed(_)
            | Self::EventStreamClosed
            | Self::WorkerJoin(_) => ErrorSeverity::Internal,
        }
    }
}
