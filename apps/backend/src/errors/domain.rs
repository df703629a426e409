//! Domain-level error type used across the session core.
//!
//! This error type is transport-agnostic. Controller and store operations
//! return `Result<T, crate::error::AppError>` and convert from `DomainError`
//! through the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::errors::ErrorCode;

/// Validation failures. Every one of these is local to the caller and never
/// mutates session state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    GameNotStarted,
    InsufficientPlayers,
    /// Wrong role or wrong phase for the action kind.
    InvalidAction,
    /// Dead, self, or disallowed same-faction target.
    InvalidTarget,
    /// A skill was invoked by a participant who does not hold the role.
    RoleMismatch,
    /// Witch potion kind other than save/poison.
    InvalidSkillKind,
    PhaseIncomplete,
    DuplicateAction,
    RoomFull,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Participant,
    Room,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    GameAlreadyStarted,
    SkillAlreadyUsed,
    GameOver,
    RoomExists,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation or game rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict with the current session state
    Conflict(ConflictKind, String),
    /// Missing participant or room
    NotFound(NotFoundKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }

    pub fn invalid_action(detail: impl Into<String>) -> Self {
        Self::validation(ValidationKind::InvalidAction, detail)
    }
    pub fn invalid_target(detail: impl Into<String>) -> Self {
        Self::validation(ValidationKind::InvalidTarget, detail)
    }
    pub fn not_started() -> Self {
        Self::validation(ValidationKind::GameNotStarted, "game has not started")
    }
    pub fn unknown_participant(id: impl Display) -> Self {
        Self::not_found(NotFoundKind::Participant, format!("unknown participant {id}"))
    }

    /// Stable wire code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Validation(kind, _) => match kind {
                ValidationKind::GameNotStarted => ErrorCode::GameNotStarted,
                ValidationKind::InsufficientPlayers => ErrorCode::InsufficientPlayers,
                ValidationKind::InvalidAction => ErrorCode::InvalidAction,
                ValidationKind::InvalidTarget => ErrorCode::InvalidTarget,
                ValidationKind::RoleMismatch => ErrorCode::RoleMismatch,
                ValidationKind::InvalidSkillKind => ErrorCode::InvalidSkillKind,
                ValidationKind::PhaseIncomplete => ErrorCode::PhaseIncomplete,
                ValidationKind::DuplicateAction => ErrorCode::DuplicateAction,
                ValidationKind::RoomFull => ErrorCode::RoomFull,
                ValidationKind::Other(_) => ErrorCode::ValidationError,
            },
            DomainError::Conflict(kind, _) => match kind {
                ConflictKind::GameAlreadyStarted => ErrorCode::GameAlreadyStarted,
                ConflictKind::SkillAlreadyUsed => ErrorCode::SkillAlreadyUsed,
                ConflictKind::GameOver => ErrorCode::GameOver,
                ConflictKind::RoomExists => ErrorCode::RoomExists,
                ConflictKind::Other(_) => ErrorCode::Conflict,
            },
            DomainError::NotFound(kind, _) => match kind {
                NotFoundKind::Participant => ErrorCode::UnknownParticipant,
                NotFoundKind::Room => ErrorCode::RoomNotFound,
                NotFoundKind::Other(_) => ErrorCode::NotFound,
            },
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            DomainError::Validation(_, d)
            | DomainError::Conflict(_, d)
            | DomainError::NotFound(_, d) => d,
        }
    }
}
