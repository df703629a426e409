//! Decision engine: one action (or an explicit pass) per synthetic
//! participant per phase.

use tracing::debug;

use crate::ai::dialogue::line_for;
use crate::ai::registry::strategy_for;
use crate::ai::trait_def::WitchChoice;
use crate::ai::view::ActorView;
use crate::ai::DecisionRng;
use crate::domain::action::{ActionKind, ActionRequest};
use crate::domain::participant::ParticipantId;
use crate::domain::phase::Phase;
use crate::domain::roles::Role;
use crate::domain::session::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Act(ActionRequest),
    Pass,
}

impl Decision {
    pub fn into_request(self) -> Option<ActionRequest> {
        match self {
            Decision::Act(req) => Some(req),
            Decision::Pass => None,
        }
    }
}

/// Decide for `actor`. Humans, unknown ids and finished sessions always pass.
///
/// Every produced action has already passed `Session::validate`.
pub fn decide(session: &Session, actor: &ParticipantId, rng: &mut DecisionRng) -> Decision {
    if !session.is_started() || session.is_terminal() {
        return Decision::Pass;
    }
    let Some(participant) = session.participant(actor) else {
        return Decision::Pass;
    };
    let Some(profile) = participant.kind.profile() else {
        return Decision::Pass;
    };
    let Some(view) = ActorView::new(session, actor) else {
        return Decision::Pass;
    };
    let strategy = strategy_for(profile);

    let request = if session.pending_shots().contains(actor) {
        strategy
            .shot_target(&view, rng)
            .map(|t| ActionRequest::new(actor.clone(), ActionKind::Shoot, Some(t)))
    } else if !participant.alive {
        None
    } else {
        match session.phase() {
            Phase::Night => match view.role() {
                Role::Wolf | Role::AwakenedWolf => strategy
                    .kill_target(&view, rng)
                    .map(|t| ActionRequest::new(actor.clone(), ActionKind::Kill, Some(t))),
                Role::Seer => strategy
                    .check_target(&view, rng)
                    .map(|t| ActionRequest::new(actor.clone(), ActionKind::Check, Some(t))),
                Role::Guard => strategy
                    .protect_target(&view, rng)
                    .map(|t| ActionRequest::new(actor.clone(), ActionKind::Protect, Some(t))),
                Role::Witch => strategy.witch_choice(&view, rng).map(|choice| match choice {
                    WitchChoice::Save(t) => {
                        ActionRequest::new(actor.clone(), ActionKind::Save, Some(t))
                    }
                    WitchChoice::Poison(t) => {
                        ActionRequest::new(actor.clone(), ActionKind::Poison, Some(t))
                    }
                }),
                _ => None,
            },
            Phase::Day if !view.spoke_today() => Some(ActionRequest::discuss(
                actor,
                line_for(view.role(), profile, rng),
            )),
            Phase::Day => None,
            Phase::Vote => strategy
                .vote_target(&view, rng)
                .map(|t| ActionRequest::new(actor.clone(), ActionKind::Vote, Some(t))),
        }
    };

    let Some(request) = request else {
        return Decision::Pass;
    };
    match session.validate(&request) {
        Ok(()) => Decision::Act(request),
        Err(err) => {
            debug!(actor = %actor, kind = %request.kind, error = %err, "dropping illegal synthetic choice");
            Decision::Pass
        }
    }
}

/// Synthetic participants due a decision, in acting order.
///
/// Killers, the seer and the guard go first so the witch sees tonight's
/// kills; dead hunters holding a shot are included.
pub fn turn_order(session: &Session) -> Vec<ParticipantId> {
    let mut due: Vec<(u8, u8, ParticipantId)> = session
        .roster()
        .iter()
        .filter(|p| p.kind.is_synthetic())
        .filter(|p| p.alive || session.pending_shots().contains(&p.id))
        .map(|p| {
            let rank = match p.role() {
                Some(Role::Witch) => 1,
                _ => 0,
            };
            (rank, p.seat, p.id.clone())
        })
        .collect();
    due.sort();
    due.into_iter().map(|(_, _, id)| id).collect()
}
