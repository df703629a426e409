//! Infrastructure layer: wiring process-wide state together.

pub mod state;
