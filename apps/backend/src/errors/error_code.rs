//! Error codes surfaced to transport clients.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in `error` frames.

use core::fmt;

use serde::{Serialize, Serializer};

/// Centralized error codes for the session core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Session lifecycle
    /// Action submitted before the game started
    GameNotStarted,
    /// Start requested twice
    GameAlreadyStarted,
    /// Roster below the mode minimum
    InsufficientPlayers,
    /// Session already reached a terminal outcome
    GameOver,

    // Action validation
    /// Wrong role or phase for the action kind
    InvalidAction,
    /// Dead, self, or same-faction target
    InvalidTarget,
    /// Single-use skill consumed
    SkillAlreadyUsed,
    /// Skill invoked by the wrong role
    RoleMismatch,
    /// Unsupported witch potion kind
    InvalidSkillKind,
    /// Same actor submitted the same kind twice in a phase
    DuplicateAction,
    /// Phase cannot advance yet
    PhaseIncomplete,
    /// General validation error
    ValidationError,

    // Rooms and participants
    UnknownParticipant,
    RoomNotFound,
    RoomExists,
    RoomFull,
    NotFound,
    Conflict,

    // Transport
    /// Frame could not be parsed
    BadRequest,

    // System
    Internal,
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical string representation of this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GameNotStarted => "GAME_NOT_STARTED",
            Self::GameAlreadyStarted => "GAME_ALREADY_STARTED",
            Self::InsufficientPlayers => "INSUFFICIENT_PLAYERS",
            Self::GameOver => "GAME_OVER",
            Self::InvalidAction => "INVALID_ACTION",
            Self::InvalidTarget => "INVALID_TARGET",
            Self::SkillAlreadyUsed => "SKILL_ALREADY_USED",
            Self::RoleMismatch => "ROLE_MISMATCH",
            Self::InvalidSkillKind => "INVALID_SKILL_KIND",
            Self::DuplicateAction => "DUPLICATE_ACTION",
            Self::PhaseIncomplete => "PHASE_INCOMPLETE",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::UnknownParticipant => "UNKNOWN_PARTICIPANT",
            Self::RoomNotFound => "ROOM_NOT_FOUND",
            Self::RoomExists => "ROOM_EXISTS",
            Self::RoomFull => "ROOM_FULL",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::BadRequest => "BAD_REQUEST",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
