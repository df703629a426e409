//! In-memory registry of live rooms.
//!
//! The map only hands out `Arc<RoomController>` clones; no map guard is
//! ever held across an `.await`.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::Serialize;
use tracing::info;

use crate::config::GameConfig;
use crate::domain::action::ActionRequest;
use crate::domain::participant::{Participant, ParticipantId, RoomId};
use crate::domain::phase::{Outcome, Phase};
use crate::domain::roles::GameMode;
use crate::domain::session::ActionOutcome;
use crate::domain::snapshot::SessionSnapshot;
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::services::delivery::Delivery;
use crate::services::game_flow::RoomController;

/// Listing entry for one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomSummary {
    pub room_id: RoomId,
    pub mode: GameMode,
    pub players: usize,
    pub started: bool,
    pub phase: Phase,
    pub round: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
}

pub struct RoomStore {
    rooms: DashMap<RoomId, Arc<RoomController>>,
    delivery: Arc<dyn Delivery>,
    config: GameConfig,
}

impl RoomStore {
    pub fn new(config: GameConfig, delivery: Arc<dyn Delivery>) -> Self {
        Self {
            rooms: DashMap::new(),
            delivery,
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Open a room with an initial (possibly empty) human roster.
    pub async fn create_session(
        &self,
        room_id: RoomId,
        mode: GameMode,
        roster: Vec<Participant>,
    ) -> Result<Arc<RoomController>, AppError> {
        let controller = match self.rooms.entry(room_id.clone()) {
            Entry::Occupied(_) => {
                return Err(DomainError::conflict(
                    ConflictKind::RoomExists,
                    format!("room {room_id} already exists"),
                )
                .into());
            }
            Entry::Vacant(slot) => {
                let controller = RoomController::new(
                    room_id,
                    mode,
                    roster,
                    self.config.clone(),
                    self.delivery.clone(),
                )?;
                slot.insert(controller.clone());
                controller
            }
        };
        controller.publish_snapshot().await;
        Ok(controller)
    }

    pub fn controller(&self, room_id: &RoomId) -> Result<Arc<RoomController>, AppError> {
        self.rooms
            .get(room_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Room, format!("room {room_id} not found"))
                    .into()
            })
    }

    pub async fn join_session(
        &self,
        room_id: &RoomId,
        participant: Participant,
    ) -> Result<(), AppError> {
        self.controller(room_id)?.join(participant).await
    }

    pub async fn start_session(&self, room_id: &RoomId) -> Result<(), AppError> {
        self.controller(room_id)?.start().await
    }

    pub async fn submit_action(
        &self,
        room_id: &RoomId,
        request: ActionRequest,
    ) -> Result<ActionOutcome, AppError> {
        self.controller(room_id)?.submit(request).await
    }

    /// Room-wide view, or one participant's view when `viewer` is given.
    pub fn current_snapshot(
        &self,
        room_id: &RoomId,
        viewer: Option<&ParticipantId>,
    ) -> Result<SessionSnapshot, AppError> {
        Ok(self.controller(room_id)?.snapshot(viewer))
    }

    /// Drop a room and stop its timer. Returns false if it did not exist.
    pub fn remove_session(&self, room_id: &RoomId) -> bool {
        match self.rooms.remove(room_id) {
            Some((_, controller)) => {
                controller.shutdown();
                info!(%room_id, "Room removed");
                true
            }
            None => false,
        }
    }

    /// All rooms, ordered by id.
    pub fn list_rooms(&self) -> Vec<RoomSummary> {
        let controllers: Vec<Arc<RoomController>> =
            self.rooms.iter().map(|entry| entry.value().clone()).collect();
        let mut summaries: Vec<RoomSummary> = controllers
            .iter()
            .map(|controller| {
                controller.with_session(|session| RoomSummary {
                    room_id: session.room_id().clone(),
                    mode: session.mode(),
                    players: session.roster().len(),
                    started: session.is_started(),
                    phase: session.phase(),
                    round: session.round(),
                    outcome: session.outcome(),
                })
            })
            .collect();
        summaries.sort_by(|a, b| a.room_id.cmp(&b.room_id));
        summaries
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
