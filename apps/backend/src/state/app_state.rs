use std::sync::Arc;

use crate::config::GameConfig;
use crate::services::rooms::RoomStore;
use crate::ws::hub::WsRegistry;

/// Shared handles for every transport entry point.
#[derive(Clone)]
pub struct AppState {
    pub rooms: Arc<RoomStore>,
    /// Connection hub; also the delivery target of every room.
    pub registry: Arc<WsRegistry>,
    pub config: GameConfig,
}

impl AppState {
    pub fn new(config: GameConfig) -> Self {
        let registry = Arc::new(WsRegistry::new());
        let rooms = Arc::new(RoomStore::new(config.clone(), registry.clone()));
        Self {
            rooms,
            registry,
            config,
        }
    }

    pub fn rooms(&self) -> &Arc<RoomStore> {
        &self.rooms
    }

    pub fn websocket_registry(&self) -> Arc<WsRegistry> {
        self.registry.clone()
    }
}
