use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::participant::ParticipantId;

/// Action kinds accepted at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Kill,
    Check,
    Save,
    Poison,
    Protect,
    Shoot,
    Vote,
    Discuss,
    /// Routed to the room, never appended to a session log.
    StartGame,
}

impl ActionKind {
    pub const fn requires_target(self) -> bool {
        !matches!(self, ActionKind::Discuss | ActionKind::StartGame)
    }

    /// Only the witch's save may land on the actor.
    pub const fn allows_self_target(self) -> bool {
        matches!(self, ActionKind::Save)
    }

    /// Decisive kinds count once per actor per phase; discussion does not.
    pub const fn is_decisive(self) -> bool {
        !matches!(self, ActionKind::Discuss | ActionKind::StartGame)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ActionKind::Kill => "kill",
            ActionKind::Check => "check",
            ActionKind::Save => "save",
            ActionKind::Poison => "poison",
            ActionKind::Protect => "protect",
            ActionKind::Shoot => "shoot",
            ActionKind::Vote => "vote",
            ActionKind::Discuss => "discuss",
            ActionKind::StartGame => "start_game",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unstamped action as submitted by a caller or produced by the decision engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub actor: ParticipantId,
    pub kind: ActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<ParticipantId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ActionRequest {
    pub fn new(actor: ParticipantId, kind: ActionKind, target: Option<ParticipantId>) -> Self {
        Self {
            actor,
            kind,
            target,
            content: None,
        }
    }

    pub fn targeted(actor: &ParticipantId, kind: ActionKind, target: &ParticipantId) -> Self {
        Self::new(actor.clone(), kind, Some(target.clone()))
    }

    pub fn discuss(actor: &ParticipantId, content: impl Into<String>) -> Self {
        Self {
            actor: actor.clone(),
            kind: ActionKind::Discuss,
            target: None,
            content: Some(content.into()),
        }
    }
}

/// Recorded fact in the current phase log. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub actor: ParticipantId,
    pub kind: ActionKind,
    pub target: Option<ParticipantId>,
    pub content: Option<String>,
    pub submitted_at: OffsetDateTime,
}

impl Action {
    pub(crate) fn stamp(req: ActionRequest) -> Self {
        Self {
            actor: req.actor,
            kind: req.kind,
            target: req.target,
            content: req.content,
            submitted_at: OffsetDateTime::now_utc(),
        }
    }
}
