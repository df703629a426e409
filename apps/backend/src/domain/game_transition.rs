use std::collections::BTreeSet;

use crate::domain::participant::ParticipantId;
use crate::domain::phase::{Outcome, Phase};
use crate::domain::session::Session;

/// Lifecycle fields compared before and after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionLifecycleView {
    pub started: bool,
    pub phase: Phase,
    pub round: u32,
    pub epoch: u64,
    pub alive: BTreeSet<ParticipantId>,
    pub outcome: Option<Outcome>,
}

impl SessionLifecycleView {
    pub fn capture(session: &Session) -> Self {
        Self {
            started: session.is_started(),
            phase: session.phase(),
            round: session.round(),
            epoch: session.phase_epoch(),
            alive: session.alive().map(|p| p.id.clone()).collect(),
            outcome: session.outcome(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionTransition {
    /// Edge-triggered: not started -> started.
    GameStarted,
    /// A new phase was entered (including re-entry of the same phase kind).
    PhaseChanged { phase: Phase, round: u32 },
    /// Round counter moved.
    RoundStarted { round: u32 },
    /// Participant went from alive to dead.
    ParticipantDied { participant: ParticipantId },
    /// Edge-triggered: session became terminal.
    GameEnded { outcome: Outcome },
}

/// Derive transitions from before/after lifecycle views.
pub fn derive_session_transitions(
    before: &SessionLifecycleView,
    after: &SessionLifecycleView,
) -> Vec<SessionTransition> {
    let mut transitions = Vec::new();

    if !before.started && after.started {
        transitions.push(SessionTransition::GameStarted);
    }

    for participant in before.alive.difference(&after.alive) {
        transitions.push(SessionTransition::ParticipantDied {
            participant: participant.clone(),
        });
    }

    if before.started && after.round > before.round {
        transitions.push(SessionTransition::RoundStarted { round: after.round });
    }

    if before.started && after.epoch != before.epoch {
        transitions.push(SessionTransition::PhaseChanged {
            phase: after.phase,
            round: after.round,
        });
    }

    if let (None, Some(outcome)) = (before.outcome, after.outcome) {
        transitions.push(SessionTransition::GameEnded { outcome });
    }

    transitions
}
