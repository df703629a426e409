//! One participant's connection to a room, independent of the socket
//! library that carries it.
//!
//! [`WsConnection::handle_text`] turns one inbound frame into the reply
//! for this connection; [`WsConnection::run`] pumps a frame stream and a
//! frame sink until either side closes.

use std::sync::Arc;

use futures::{Sink, SinkExt, Stream, StreamExt};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::action::{ActionKind, ActionRequest};
use crate::domain::participant::{ParticipantId, RoomId};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::services::rooms::RoomStore;
use crate::ws::hub::WsRegistry;
use crate::ws::protocol::{ClientMsg, ServerMsg, PROTOCOL_VERSION};

pub struct WsConnection {
    conn_id: Uuid,
    room: RoomId,
    participant: ParticipantId,
    store: Arc<RoomStore>,
    registry: Arc<WsRegistry>,
    hello_done: bool,
}

impl WsConnection {
    /// Register with the hub. The receiver yields every frame the room or
    /// this participant is sent from now on.
    pub fn open(
        store: Arc<RoomStore>,
        registry: Arc<WsRegistry>,
        room: RoomId,
        participant: ParticipantId,
    ) -> (Self, UnboundedReceiver<String>) {
        let (tx, rx) = unbounded_channel();
        let conn_id = registry.register(&room, &participant, tx);
        info!(room_id = %room, %participant, %conn_id, "Participant connected");
        (
            Self {
                conn_id,
                room,
                participant,
                store,
                registry,
                hello_done: false,
            },
            rx,
        )
    }

    pub fn conn_id(&self) -> Uuid {
        self.conn_id
    }

    /// Reply to one text frame. Game errors are reported to this
    /// connection only.
    pub async fn handle_text(&mut self, text: &str) -> ServerMsg {
        let msg = match serde_json::from_str::<ClientMsg>(text) {
            Ok(msg) => msg,
            Err(err) => {
                debug!(room_id = %self.room, participant = %self.participant, error = %err, "Unparseable frame");
                return ServerMsg::error(ErrorCode::BadRequest, format!("invalid frame: {err}"));
            }
        };

        match msg {
            ClientMsg::Hello { protocol } => {
                if protocol != PROTOCOL_VERSION {
                    return ServerMsg::error(
                        ErrorCode::BadRequest,
                        format!("unsupported protocol {protocol}, expected {PROTOCOL_VERSION}"),
                    );
                }
                self.hello_done = true;
                ServerMsg::HelloAck {
                    protocol: PROTOCOL_VERSION,
                    room_id: self.room.clone(),
                    participant_id: self.participant.clone(),
                }
            }
            _ if !self.hello_done => {
                ServerMsg::error(ErrorCode::BadRequest, "send hello before anything else")
            }
            ClientMsg::Snapshot => match self
                .store
                .current_snapshot(&self.room, Some(&self.participant))
            {
                Ok(snapshot) => ServerMsg::GameState { snapshot },
                Err(err) => error_frame(&err),
            },
            ClientMsg::Action {
                kind,
                target,
                content,
            } => self.submit(kind, target, content).await,
        }
    }

    async fn submit(
        &self,
        kind: ActionKind,
        target: Option<ParticipantId>,
        content: Option<String>,
    ) -> ServerMsg {
        let mut request = ActionRequest::new(self.participant.clone(), kind, target);
        request.content = content;
        match self.store.submit_action(&self.room, request).await {
            Ok(_) => ServerMsg::Ack { kind },
            Err(err) => {
                debug!(
                    room_id = %self.room,
                    participant = %self.participant,
                    %kind,
                    code = %err.code(),
                    "Action rejected"
                );
                error_frame(&err)
            }
        }
    }

    /// Pump frames until the client goes away or the sink fails.
    pub async fn run<I, O>(
        mut self,
        mut outbound: UnboundedReceiver<String>,
        mut incoming: I,
        mut sink: O,
    ) where
        I: Stream<Item = String> + Unpin,
        O: Sink<String> + Unpin,
    {
        loop {
            tokio::select! {
                frame = incoming.next() => {
                    let Some(text) = frame else { break };
                    let reply = self.handle_text(&text).await;
                    let Ok(json) = serde_json::to_string(&reply) else { continue };
                    if sink.send(json).await.is_err() {
                        break;
                    }
                }
                pushed = outbound.recv() => {
                    let Some(json) = pushed else { break };
                    if sink.send(json).await.is_err() {
                        warn!(room_id = %self.room, conn_id = %self.conn_id, "Socket sink closed");
                        break;
                    }
                }
            }
        }
        self.close();
    }

    pub fn close(self) {
        self.registry.unregister(&self.room, self.conn_id);
        info!(room_id = %self.room, participant = %self.participant, conn_id = %self.conn_id, "Participant disconnected");
    }
}

fn error_frame(err: &AppError) -> ServerMsg {
    ServerMsg::error(err.code(), err.detail())
}
