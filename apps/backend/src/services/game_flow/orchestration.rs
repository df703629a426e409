use tracing::{debug, info, warn};

use super::{ai_coordinator, seats, RoomController, RoomState};
use crate::domain::game_transition::{
    derive_session_transitions, SessionLifecycleView, SessionTransition,
};
use crate::domain::participant::ParticipantId;
use crate::domain::phase::{self, Transition};
use crate::domain::session::{ActionOutcome, Session};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::ws::protocol::ServerMsg;

/// Upper bound on resolve/advance steps per locked section. Day waits for
/// its timer, so a normal call advances at most a couple of phases.
pub const MAX_ITERATIONS: usize = 256;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Audience {
    Room,
    Participant(ParticipantId),
}

#[derive(Debug, Clone)]
pub(crate) struct Envelope {
    pub(crate) audience: Audience,
    pub(crate) msg: ServerMsg,
}

/// Frames produced under the room lock, sent after it is released.
#[derive(Debug, Default)]
pub(crate) struct Outbound {
    frames: Vec<Envelope>,
}

impl Outbound {
    pub(crate) fn room(&mut self, msg: ServerMsg) {
        self.frames.push(Envelope {
            audience: Audience::Room,
            msg,
        });
    }

    pub(crate) fn to(&mut self, participant: ParticipantId, msg: ServerMsg) {
        self.frames.push(Envelope {
            audience: Audience::Participant(participant),
            msg,
        });
    }

    pub(crate) fn snapshot(&mut self, session: &Session) {
        self.room(ServerMsg::GameState {
            snapshot: session.snapshot(),
        });
    }

    /// Private reveal or public shot announcement for one accepted action,
    /// followed by the post-action snapshot.
    pub(crate) fn recorded(
        &mut self,
        session: &Session,
        actor: &ParticipantId,
        outcome: &ActionOutcome,
    ) {
        match outcome {
            ActionOutcome::Revealed { target, role } => self.to(
                actor.clone(),
                ServerMsg::SkillReveal {
                    target: target.clone(),
                    role: *role,
                },
            ),
            ActionOutcome::Shot { target } => self.room(ServerMsg::HunterShot {
                hunter: actor.clone(),
                target: target.clone(),
            }),
            ActionOutcome::Recorded => {}
        }
        self.snapshot(session);
    }

    pub(crate) fn transition(&mut self, session: &Session, transition: &Transition) {
        self.room(ServerMsg::PhaseResolved {
            phase: transition.resolved,
            round: transition.round,
            deaths: transition.report.deaths.clone(),
            eliminated: transition.report.eliminated.clone(),
        });
        self.snapshot(session);
        // Humans also get their own view; synthetic seats have no connection.
        for participant in session.roster().iter().filter(|p| !p.kind.is_synthetic()) {
            self.to(
                participant.id.clone(),
                ServerMsg::GameState {
                    snapshot: session.snapshot_for(&participant.id),
                },
            );
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub(crate) fn into_frames(self) -> Vec<Envelope> {
        self.frames
    }
}

pub(super) fn capture(session: &Session) -> SessionLifecycleView {
    SessionLifecycleView::capture(session)
}

impl RoomController {
    /// Fill seats, deal roles, pair lovers and queue the private role frames.
    pub(super) fn begin(&self, state: &mut RoomState, out: &mut Outbound) -> Result<(), AppError> {
        if state.session.is_started() {
            return Err(DomainError::conflict(
                ConflictKind::GameAlreadyStarted,
                format!("room {} already started", self.room_id),
            )
            .into());
        }
        let added = seats::fill_seats(&mut state.session, &mut state.setup_rng)?;
        state.session.start(&mut state.setup_rng)?;
        if let Some((matchmaker, partner)) =
            seats::pair_matchmaker(&mut state.session, &mut state.setup_rng)?
        {
            debug!(room_id = %self.room_id, %matchmaker, %partner, "Lovers paired");
        }
        info!(
            room_id = %self.room_id,
            players = state.session.roster().len(),
            synthetic_added = added.len(),
            "Roles dealt"
        );

        out.snapshot(&state.session);
        for participant in state.session.roster() {
            let Some(role) = participant.role() else {
                continue;
            };
            let known = state
                .session
                .knowledge_of(&participant.id)
                .cloned()
                .unwrap_or_default();
            out.to(participant.id.clone(), ServerMsg::RoleAssigned { role, known });
        }
        Ok(())
    }

    /// Let synthetic participants act, then advance every phase that is
    /// complete. Stops at the first phase still waiting on someone.
    pub(super) fn drive(&self, state: &mut RoomState, out: &mut Outbound) -> Result<(), AppError> {
        for _ in 0..MAX_ITERATIONS {
            if state.session.is_terminal() {
                return Ok(());
            }
            ai_coordinator::synthetic_pass(state, out);
            if state.session.is_terminal() || !phase::is_phase_complete(&state.session) {
                return Ok(());
            }
            let transition = phase::advance(&mut state.session, false)?;
            out.transition(&state.session, &transition);
        }
        warn!(
            room_id = %self.room_id,
            max = MAX_ITERATIONS,
            "Drive loop hit iteration limit"
        );
        Ok(())
    }

    /// Resolve whatever was submitted and move on, complete or not.
    pub(super) fn force_resolve(
        &self,
        state: &mut RoomState,
        out: &mut Outbound,
    ) -> Result<Transition, AppError> {
        let transition = phase::expire(&mut state.session)?;
        debug!(
            room_id = %self.room_id,
            phase = %transition.resolved,
            round = transition.round,
            deaths = transition.report.deaths.len(),
            "Phase force-resolved"
        );
        out.transition(&state.session, &transition);
        Ok(transition)
    }

    /// Log lifecycle edges, queue the end-of-game frame and re-arm or
    /// cancel the phase timer. Runs while the lock is still held.
    pub(super) fn finish(
        &self,
        state: &mut RoomState,
        before: SessionLifecycleView,
        out: &mut Outbound,
    ) {
        let after = capture(&state.session);
        for transition in derive_session_transitions(&before, &after) {
            match transition {
                SessionTransition::GameStarted => {
                    info!(room_id = %self.room_id, "Game started");
                }
                SessionTransition::PhaseChanged { phase, round } => {
                    info!(room_id = %self.room_id, %phase, round, "Phase entered");
                }
                SessionTransition::RoundStarted { round } => {
                    debug!(room_id = %self.room_id, round, "Round started");
                }
                SessionTransition::ParticipantDied { participant } => {
                    info!(room_id = %self.room_id, %participant, "Participant died");
                }
                SessionTransition::GameEnded { outcome } => {
                    info!(
                        room_id = %self.room_id,
                        ?outcome,
                        round = state.session.round(),
                        "Game ended"
                    );
                    out.room(ServerMsg::GameEnded {
                        outcome,
                        roster: state.session.snapshot().roster,
                    });
                }
            }
        }

        if state.session.is_terminal() {
            self.cancel_timer();
        } else if after.started && after.epoch != before.epoch {
            self.arm_timer(after.epoch, state.session.time_budget());
        }
    }

    pub(super) async fn dispatch(&self, out: Outbound) {
        if out.is_empty() {
            return;
        }
        for envelope in out.into_frames() {
            match &envelope.audience {
                Audience::Room => {
                    self.delivery
                        .deliver_to_room(&self.room_id, &envelope.msg)
                        .await
                }
                Audience::Participant(participant) => {
                    self.delivery
                        .deliver_to_participant(&self.room_id, participant, &envelope.msg)
                        .await
                }
            }
        }
    }
}
