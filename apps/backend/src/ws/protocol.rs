use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::action::ActionKind;
use crate::domain::participant::{ParticipantId, RoomId};
use crate::domain::phase::{Outcome, Phase};
use crate::domain::roles::Role;
use crate::domain::snapshot::{ParticipantView, SessionSnapshot};
use crate::errors::ErrorCode;

pub const PROTOCOL_VERSION: i32 = 1;

/// Frames a connected participant may send. The sender's identity comes
/// from the connection, never from the frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    Hello {
        protocol: i32,
    },
    Action {
        kind: ActionKind,
        #[serde(default)]
        target: Option<ParticipantId>,
        #[serde(default)]
        content: Option<String>,
    },
    /// Ask for a fresh snapshot of the room as this participant sees it.
    Snapshot,
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    HelloAck {
        protocol: i32,
        room_id: RoomId,
        participant_id: ParticipantId,
    },

    Ack {
        kind: ActionKind,
    },

    GameState {
        snapshot: SessionSnapshot,
    },

    /// Private: the recipient's role plus the roles they start out knowing.
    RoleAssigned {
        role: Role,
        known: BTreeMap<ParticipantId, Role>,
    },

    /// Private: result of the recipient's seer check.
    SkillReveal {
        target: ParticipantId,
        role: Role,
    },

    PhaseResolved {
        phase: Phase,
        round: u32,
        deaths: Vec<ParticipantId>,
        #[serde(skip_serializing_if = "Option::is_none")]
        eliminated: Option<ParticipantId>,
    },

    HunterShot {
        hunter: ParticipantId,
        target: ParticipantId,
    },

    GameEnded {
        outcome: Outcome,
        roster: Vec<ParticipantView>,
    },

    Error {
        code: ErrorCode,
        message: String,
    },
}

impl ServerMsg {
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        ServerMsg::Error {
            code,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            ServerMsg::HelloAck { .. } => "hello_ack",
            ServerMsg::Ack { .. } => "ack",
            ServerMsg::GameState { .. } => "game_state",
            ServerMsg::RoleAssigned { .. } => "role_assigned",
            ServerMsg::SkillReveal { .. } => "skill_reveal",
            ServerMsg::PhaseResolved { .. } => "phase_resolved",
            ServerMsg::HunterShot { .. } => "hunter_shot",
            ServerMsg::GameEnded { .. } => "game_ended",
            ServerMsg::Error { .. } => "error",
        }
    }
}
