use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::participant::{ParticipantId, RoomId};
use crate::services::delivery::Delivery;
use crate::ws::protocol::ServerMsg;

struct Connection {
    participant: ParticipantId,
    tx: UnboundedSender<String>,
}

/// Live connections per room. Each connection owns the receiving half of
/// its channel and writes whatever arrives to its socket.
#[derive(Default)]
pub struct WsRegistry {
    rooms: DashMap<RoomId, DashMap<Uuid, Connection>>,
}

impl WsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &self,
        room: &RoomId,
        participant: &ParticipantId,
        tx: UnboundedSender<String>,
    ) -> Uuid {
        let token = Uuid::new_v4();
        let entry = self.rooms.entry(room.clone()).or_default();
        entry.insert(
            token,
            Connection {
                participant: participant.clone(),
                tx,
            },
        );
        debug!(room_id = %room, %participant, conn_id = %token, "Connection registered");
        token
    }

    pub fn unregister(&self, room: &RoomId, token: Uuid) {
        if let Some(entry) = self.rooms.get(room) {
            entry.remove(&token);
        }
        self.rooms.remove_if(room, |_, conns| conns.is_empty());
    }

    pub fn connection_count(&self, room: &RoomId) -> usize {
        self.rooms.get(room).map_or(0, |conns| conns.len())
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

    /// Send `json` to every connection in `room` accepted by `filter`.
    /// Connections whose receiver is gone are dropped.
    fn fan_out<F>(&self, room: &RoomId, json: &str, filter: F)
    where
        F: Fn(&Connection) -> bool,
    {
        let mut closed = Vec::new();
        if let Some(conns) = self.rooms.get(room) {
            for conn in conns.iter() {
                if !filter(conn.value()) {
                    continue;
                }
                if conn.value().tx.send(json.to_owned()).is_err() {
                    closed.push(*conn.key());
                }
            }
        }
        for token in closed {
            warn!(room_id = %room, conn_id = %token, "Dropping closed connection");
            self.unregister(room, token);
        }
    }
}

#[async_trait]
impl Delivery for WsRegistry {
    async fn deliver_to_room(&self, room: &RoomId, payload: &ServerMsg) {
        if let Some(json) = Self::encode(payload) {
            self.fan_out(room, &json, |_| true);
        }
    }

    async fn deliver_to_participant(
        &self,
        room: &RoomId,
        participant: &ParticipantId,
        payload: &ServerMsg,
    ) {
        if let Some(json) = Self::encode(payload) {
            self.fan_out(room, &json, |conn| &conn.participant == participant);
        }
    }
}
