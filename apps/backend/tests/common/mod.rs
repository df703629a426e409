#![allow(dead_code)]

// tests/common/mod.rs
use std::sync::Arc;

use serde_json::Value;
use werewolf_backend::config::GameConfig;
use werewolf_backend::domain::participant::{Participant, RoomId};
use werewolf_backend::domain::roles::GameMode;
use werewolf_backend::services::delivery::{Delivered, RecordingDelivery};
use werewolf_backend::services::rooms::RoomStore;
use werewolf_backend::services::RoomController;

pub mod proptest_prelude;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Seeded config with real timers off; tests drive expiry by hand.
pub fn manual_config(seed: u64) -> GameConfig {
    GameConfig::default().with_seed(seed).with_timers(false)
}

pub fn recording_store(config: GameConfig) -> (RoomStore, Arc<RecordingDelivery>) {
    let delivery = Arc::new(RecordingDelivery::new());
    (RoomStore::new(config, delivery.clone()), delivery)
}

pub fn humans(ids: &[&str]) -> Vec<Participant> {
    ids.iter()
        .map(|id| Participant::human(*id, format!("Player {id}")))
        .collect()
}

/// A classic room with the given humans, created but not started.
pub async fn classic_room(
    store: &RoomStore,
    room: &str,
    human_ids: &[&str],
) -> Arc<RoomController> {
    store
        .create_session(RoomId::from(room), GameMode::Classic, humans(human_ids))
        .await
        .expect("create room")
}

/// Force phases until the room ends. Returns the number of expiries used.
pub async fn expire_until_finished(controller: &RoomController, max_expiries: usize) -> usize {
    for used in 0..max_expiries {
        if controller.is_finished() {
            return used;
        }
        controller.expire_phase().await.expect("expire phase");
    }
    assert!(
        controller.is_finished(),
        "room did not finish within {max_expiries} expiries"
    );
    max_expiries
}

pub fn parse(frame: &Delivered) -> Value {
    serde_json::from_str(frame.payload()).expect("frames are valid JSON")
}

pub fn of_kind<'a>(frames: &'a [Delivered], kind: &str) -> Vec<&'a Delivered> {
    frames.iter().filter(|f| f.kind() == kind).collect()
}
