//! Outbound seam between room controllers and whatever carries frames to
//! connected clients.

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::warn;

use crate::domain::participant::{ParticipantId, RoomId};
use crate::ws::protocol::ServerMsg;

/// Best-effort delivery. Implementations swallow and log their own
/// failures; nothing here can fail back into game logic.
#[async_trait]
pub trait Delivery: Send + Sync {
    /// Fan out to every connection registered under `room`.
    async fn deliver_to_room(&self, room: &RoomId, payload: &ServerMsg);

    /// Unicast to one participant's connections. Used only for private
    /// role assignments and skill reveals.
    async fn deliver_to_participant(
        &self,
        room: &RoomId,
        participant: &ParticipantId,
        payload: &ServerMsg,
    );
}

/// Drops everything. Used by simulations that only care about outcomes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDelivery;

#[async_trait]
impl Delivery for NoopDelivery {
    async fn deliver_to_room(&self, _room: &RoomId, _payload: &ServerMsg) {}

    async fn deliver_to_participant(
        &self,
        _room: &RoomId,
        _participant: &ParticipantId,
        _payload: &ServerMsg,
    ) {
    }
}

/// One serialized frame as it left the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivered {
    Room {
        room: RoomId,
        kind: &'static str,
        payload: String,
    },
    Participant {
        room: RoomId,
        participant: ParticipantId,
        kind: &'static str,
        payload: String,
    },
}

impl Delivered {
    pub fn kind(&self) -> &'static str {
        match self {
            Delivered::Room { kind, .. } | Delivered::Participant { kind, .. } => kind,
        }
    }

    pub fn payload(&self) -> &str {
        match self {
            Delivered::Room { payload, .. } | Delivered::Participant { payload, .. } => payload,
        }
    }
}

/// Keeps every frame in memory, in delivery order.
#[derive(Debug, Default)]
pub struct RecordingDelivery {
    frames: Mutex<Vec<Delivered>>,
}

impl RecordingDelivery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<Delivered> {
        self.frames.lock().clone()
    }

    pub fn take(&self) -> Vec<Delivered> {
        std::mem::take(&mut *self.frames.lock())
    }

    pub fn len(&self) -> usize {
        self.frames.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.lock().is_empty()
    }

    fn encode(payload: &ServerMsg) -> Option<String> {
        match serde_json::to_string(payload) {
            Ok(json) => Some(json),
            Err(err) => {
                warn!(error = %err, kind = payload.kind(), "Failed to encode frame");
                None
            }
        }
    }
}

#[async_trait]
impl Delivery for RecordingDelivery {
    async fn deliver_to_room(&self, room: &RoomId, payload: &ServerMsg) {
        if let Some(json) = Self::encode(payload) {
            self.frames.lock().push(Delivered::Room {
                room: room.clone(),
                kind: payload.kind(),
                payload: json,
            });
        }
    }

    async fn deliver_to_participant(
        &self,
        room: &RoomId,
        participant: &ParticipantId,
        payload: &ServerMsg,
    ) {
        if let Some(json) = Self::encode(payload) {
            self.frames.lock().push(Delivered::Participant {
                room: room.clone(),
                participant: participant.clone(),
                kind: payload.kind(),
                payload: json,
            });
        }
    }
}
