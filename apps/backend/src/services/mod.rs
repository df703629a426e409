pub mod delivery;
pub mod game_flow;
pub mod rooms;

pub use delivery::{Delivered, Delivery, NoopDelivery, RecordingDelivery};
pub use game_flow::RoomController;
pub use rooms::{RoomStore, RoomSummary};
