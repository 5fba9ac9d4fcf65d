//! Common error infrastructure for battle-core.
//!
//! Concern-specific errors (`RosterError`, `ActionError`, `TurnError`) live
//! next to the code that raises them. This module holds the classification
//! shared by all of them so the runtime can decide how loudly to report a
//! failure.

/// Severity level of an error, used for categorization and reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The caller may retry with a different choice.
    ///
    /// Examples: skill on cooldown, defeated target
    Recoverable,

    /// Invalid input that must not be retried unchanged.
    ///
    /// Examples: acting out of turn, acting after the battle ended
    Validation,

    /// Unexpected state inconsistency. Indicates a bug.
    ///
    /// Examples: unit key outside the roster, empty turn queue
    Internal,

    /// The battle cannot be created or continued.
    ///
    /// Examples: unknown enemy id in the roster snapshot
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug or unusable data.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all battle-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait BattleError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static identifier for this error variant.
    ///
    /// Useful for log fields and for matching in tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
