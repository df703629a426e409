use tracing::debug;

use super::orchestration::{self, Outbound};
use super::RoomController;
use crate::domain::action::{ActionKind, ActionRequest};
use crate::domain::phase;
use crate::domain::session::ActionOutcome;
use crate::error::AppError;

impl RoomController {
    /// Submit one action on behalf of a connected participant.
    ///
    /// `start_game` starts the room. Anything else is validated and recorded
    /// by the session; the error goes back to the caller only and the
    /// session is left untouched. Accepted actions trigger a synthetic pass
    /// and advance the phase if it is now complete.
    pub async fn submit(&self, request: ActionRequest) -> Result<ActionOutcome, AppError> {
        if request.kind == ActionKind::StartGame {
            self.start().await?;
            return Ok(ActionOutcome::Recorded);
        }

        let (outcome, out) = {
            let mut state = self.state.write();
            let before = orchestration::capture(&state.session);
            let mut out = Outbound::default();

            let actor = request.actor.clone();
            let kind = request.kind;
            let outcome = state.session.submit_action(request)?;
            debug!(room_id = %self.room_id, participant = %actor, %kind, "Action recorded");
            out.recorded(&state.session, &actor, &outcome);
            phase::settle(&mut state.session);

            self.drive(&mut state, &mut out)?;
            self.finish(&mut state, before, &mut out);
            (outcome, out)
        };
        self.dispatch(out).await;
        Ok(outcome)
    }
}
