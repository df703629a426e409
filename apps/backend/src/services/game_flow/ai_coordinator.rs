use tracing::{debug, warn};

use super::orchestration::Outbound;
use super::RoomState;
use crate::ai::engine::{decide, turn_order};
use crate::domain::phase;

/// Give every synthetic participant its turn for the current phase.
///
/// Each participant decides once per phase epoch. A dead hunter holding a
/// shot is asked again on every pass until the shot is spent. Returns the
/// number of actions recorded.
pub(super) fn synthetic_pass(state: &mut RoomState, out: &mut Outbound) -> usize {
    let epoch = state.session.phase_epoch();
    if state.acted_epoch != epoch {
        state.acted.clear();
        state.acted_epoch = epoch;
    }

    let mut recorded = 0;
    for actor in turn_order(&state.session) {
        if state.session.is_terminal() {
            break;
        }
        let owes_shot = state.session.pending_shots().contains(&actor);
        if !owes_shot && state.acted.contains(&actor) {
            continue;
        }

        let decision = decide(&state.session, &actor, &mut state.decision_rng);
        if !owes_shot {
            state.acted.insert(actor.clone());
        }
        let Some(request) = decision.into_request() else {
            continue;
        };

        let kind = request.kind;
        match state.session.submit_action(request) {
            Ok(outcome) => {
                debug!(
                    room_id = %state.session.room_id(),
                    participant = %actor,
                    %kind,
                    "Synthetic action recorded"
                );
                out.recorded(&state.session, &actor, &outcome);
                phase::settle(&mut state.session);
                recorded += 1;
            }
            Err(err) => {
                // decide() pre-validates, so this means the engine and the
                // session disagree about legality.
                warn!(
                    room_id = %state.session.room_id(),
                    participant = %actor,
                    %kind,
                    error = %err,
                    "Synthetic action rejected"
                );
            }
        }
    }
    recorded
}
