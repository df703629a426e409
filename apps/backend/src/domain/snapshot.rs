//! Read-only views of a session for publishing.
//!
//! Only ordered collections appear here so that serializing the same
//! session twice yields identical bytes.

use serde::{Deserialize, Serialize};

use crate::domain::participant::{Participant, ParticipantId, RoomId};
use crate::domain::phase::{Outcome, Phase};
use crate::domain::roles::{GameMode, Role};
use crate::domain::session::Session;
use crate::domain::skills::SkillLedger;

/// Public info about one seat. `role` and `lover` are filled only where
/// the recipient is allowed to see them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantView {
    pub id: ParticipantId,
    pub name: String,
    pub seat: u8,
    pub synthetic: bool,
    pub alive: bool,
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub lover: bool,
}

/// Private section attached to a per-participant snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerState {
    pub id: ParticipantId,
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potions: Option<PotionState>,
    pub can_shoot: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotionState {
    pub save_available: bool,
    pub poison_available: bool,
}

impl From<&SkillLedger> for PotionState {
    fn from(ledger: &SkillLedger) -> Self {
        Self {
            save_available: !ledger.save_used(),
            poison_available: !ledger.poison_used(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub room_id: RoomId,
    pub mode: GameMode,
    pub phase: Phase,
    pub round: u32,
    pub time_left: u32,
    pub started: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    pub roster: Vec<ParticipantView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewer: Option<ViewerState>,
}

impl Session {
    /// Room-wide view. Roles stay hidden until the game ends.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.build_snapshot(None)
    }

    /// View for one participant: their own role, roles they have learned,
    /// and everything once the game has ended. Unknown viewers get the
    /// room view.
    pub fn snapshot_for(&self, viewer: &ParticipantId) -> SessionSnapshot {
        self.build_snapshot(self.participant(viewer))
    }

    fn build_snapshot(&self, viewer: Option<&Participant>) -> SessionSnapshot {
        let revealed = self.is_terminal();
        let known = viewer.and_then(|v| self.knowledge_of(&v.id));

        let roster = self
            .roster()
            .iter()
            .map(|p| {
                let is_self = viewer.is_some_and(|v| v.id == p.id);
                let role = if revealed || is_self {
                    p.role()
                } else {
                    known.and_then(|k| k.get(&p.id).copied())
                };
                let lover = p.lover && (revealed || viewer.is_some_and(|v| v.lover));
                ParticipantView {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    seat: p.seat,
                    synthetic: p.kind.is_synthetic(),
                    alive: p.alive,
                    role,
                    lover,
                }
            })
            .collect();

        let viewer = viewer.map(|v| ViewerState {
            id: v.id.clone(),
            role: v.role(),
            potions: self.skill_ledger_for(&v.id).map(PotionState::from),
            can_shoot: self.pending_shots().contains(&v.id),
        });

        SessionSnapshot {
            room_id: self.room_id().clone(),
            mode: self.mode(),
            phase: self.phase(),
            round: self.round(),
            time_left: self.time_left(),
            started: self.is_started(),
            outcome: self.outcome(),
            roster,
            viewer,
        }
    }
}
