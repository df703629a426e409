use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::orchestration::{self, Outbound};
use super::RoomController;

impl RoomController {
    /// Arm the timer for phase `epoch`, cancelling whatever was armed
    /// before. Returns the new timer's token.
    pub(super) fn arm_timer(&self, epoch: u64, secs: u32) -> Option<CancellationToken> {
        if !self.config.timers_enabled {
            return None;
        }
        let token = CancellationToken::new();
        if let Some(previous) = self.timer.lock().replace(token.clone()) {
            previous.cancel();
        }

        let room_id = self.room_id.clone();
        let controller = self.me.clone();
        let cancelled = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {
                    debug!(%room_id, epoch, "Phase timer cancelled");
                }
                _ = tokio::time::sleep(Duration::from_secs(u64::from(secs))) => {
                    if let Some(controller) = controller.upgrade() {
                        controller.on_timer(epoch).await;
                    }
                }
            }
        });
        debug!(room_id = %self.room_id, epoch, secs, "Phase timer armed");
        Some(token)
    }

    pub(super) fn cancel_timer(&self) {
        if let Some(token) = self.timer.lock().take() {
            token.cancel();
        }
    }

    /// Timer expiry for phase `epoch`. Ignored when the session has moved on.
    pub(super) async fn on_timer(&self, epoch: u64) {
        let out = {
            let mut state = self.state.write();
            if state.session.phase_epoch() != epoch || state.session.is_terminal() {
                debug!(
                    room_id = %self.room_id,
                    epoch,
                    current = state.session.phase_epoch(),
                    "Stale phase timer ignored"
                );
                return;
            }
            let before = orchestration::capture(&state.session);
            let mut out = Outbound::default();
            let progressed = self
                .force_resolve(&mut state, &mut out)
                .and_then(|_| self.drive(&mut state, &mut out));
            if let Err(err) = progressed {
                warn!(room_id = %self.room_id, error = %err, "Timer-driven resolution failed");
            }
            self.finish(&mut state, before, &mut out);
            out
        };
        self.dispatch(out).await;
    }
}
