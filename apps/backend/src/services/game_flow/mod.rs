//! Room controller: owns one room's session and is the only thing that
//! talks to the delivery collaborator.
//!
//! Every mutation runs under the room's write lock and collects its
//! outbound frames into an [`orchestration::Outbound`]. Frames are sent
//! only after the lock is released.

mod ai_coordinator;
mod orchestration;
mod phase_timer;
mod player_actions;
pub mod seats;

use std::collections::BTreeSet;
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::ai::DecisionRng;
use crate::config::GameConfig;
use crate::domain::participant::{Participant, ParticipantId, RoomId};
use crate::domain::phase::Transition;
use crate::domain::roles::GameMode;
use crate::domain::seed_derivation::{derive_decision_seed, derive_room_seed, derive_setup_seed};
use crate::domain::session::Session;
use crate::domain::snapshot::SessionSnapshot;
use crate::error::AppError;
use crate::services::delivery::Delivery;

pub use orchestration::MAX_ITERATIONS;

/// Everything guarded by the room lock.
pub(crate) struct RoomState {
    pub(crate) session: Session,
    /// Seat filling, synthetic profiles and lover pairing.
    pub(crate) setup_rng: ChaCha8Rng,
    pub(crate) decision_rng: DecisionRng,
    /// Synthetic participants that already had their turn in `acted_epoch`.
    pub(crate) acted: BTreeSet<ParticipantId>,
    pub(crate) acted_epoch: u64,
}

impl RoomState {
    fn new(session: Session, room_seed: u64) -> Self {
        Self {
            session,
            setup_rng: ChaCha8Rng::seed_from_u64(derive_setup_seed(room_seed)),
            decision_rng: DecisionRng::seed_from_u64(derive_decision_seed(room_seed)),
            acted: BTreeSet::new(),
            acted_epoch: 0,
        }
    }
}

pub struct RoomController {
    room_id: RoomId,
    state: RwLock<RoomState>,
    /// Cancels the currently armed phase timer, if any.
    timer: Mutex<Option<CancellationToken>>,
    delivery: Arc<dyn Delivery>,
    config: GameConfig,
    me: Weak<RoomController>,
}

impl RoomController {
    pub fn new(
        room_id: RoomId,
        mode: GameMode,
        roster: Vec<Participant>,
        config: GameConfig,
        delivery: Arc<dyn Delivery>,
    ) -> Result<Arc<Self>, AppError> {
        let session = Session::with_roster(room_id.clone(), mode, config.session_rules(), roster)?;
        let room_seed = match config.seed {
            Some(base) => derive_room_seed(base, room_id.as_str()),
            None => rand::rng().random(),
        };
        info!(
            room_id = %room_id,
            mode = %mode,
            players = session.roster().len(),
            seeded = config.seed.is_some(),
            "Room created"
        );
        Ok(Arc::new_cyclic(|me| Self {
            room_id,
            state: RwLock::new(RoomState::new(session, room_seed)),
            timer: Mutex::new(None),
            delivery,
            config,
            me: me.clone(),
        }))
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Seat a human before the game starts.
    pub async fn join(&self, participant: Participant) -> Result<(), AppError> {
        let out = {
            let mut state = self.state.write();
            state.session.join(participant)?;
            let mut out = orchestration::Outbound::default();
            out.snapshot(&state.session);
            out
        };
        self.dispatch(out).await;
        Ok(())
    }

    /// Top up the roster, deal roles, announce them privately and run the
    /// first night as far as synthetic participants can take it.
    pub async fn start(&self) -> Result<(), AppError> {
        let out = {
            let mut state = self.state.write();
            let before = orchestration::capture(&state.session);
            let mut out = orchestration::Outbound::default();
            self.begin(&mut state, &mut out)?;
            self.drive(&mut state, &mut out)?;
            self.finish(&mut state, before, &mut out);
            out
        };
        self.dispatch(out).await;
        Ok(())
    }

    /// Force the current phase to resolve as if its timer had run out.
    pub async fn expire_phase(&self) -> Result<Transition, AppError> {
        let (transition, out) = {
            let mut state = self.state.write();
            let before = orchestration::capture(&state.session);
            let mut out = orchestration::Outbound::default();
            let transition = self.force_resolve(&mut state, &mut out)?;
            self.drive(&mut state, &mut out)?;
            self.finish(&mut state, before, &mut out);
            (transition, out)
        };
        self.dispatch(out).await;
        Ok(transition)
    }

    /// Room-wide view, or the view of one participant when `viewer` is set.
    pub fn snapshot(&self, viewer: Option<&ParticipantId>) -> SessionSnapshot {
        let state = self.state.read();
        match viewer {
            Some(id) => state.session.snapshot_for(id),
            None => state.session.snapshot(),
        }
    }

    /// Re-broadcast the current room-wide snapshot.
    pub async fn publish_snapshot(&self) {
        let out = {
            let state = self.state.read();
            let mut out = orchestration::Outbound::default();
            out.snapshot(&state.session);
            out
        };
        self.dispatch(out).await;
    }

    /// Read the session under the shared lock.
    pub fn with_session<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        f(&self.state.read().session)
    }

    pub fn is_finished(&self) -> bool {
        self.state.read().session.is_terminal()
    }

    /// Stop the phase timer. The session itself is left as is.
    pub fn shutdown(&self) {
        self.cancel_timer();
        info!(room_id = %self.room_id, "Room shut down");
    }
}

impl Drop for RoomController {
    fn drop(&mut self) {
        if let Some(token) = self.timer.get_mut().take() {
            token.cancel();
        }
    }
}
