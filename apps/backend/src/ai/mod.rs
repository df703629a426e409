//! Synthetic participants: decision strategies and the engine that drives them.
//!
//! This module provides:
//! - `Strategy`: one implementation per behavioral profile
//! - `ActorView`: what a synthetic participant is allowed to know
//! - `engine::decide`: one legal action or an explicit pass per phase
//! - a registry mapping profiles to strategies

mod aggressive;
mod baseline;
mod cautious;
pub mod dialogue;
pub mod engine;
pub mod registry;
mod strategic;
mod trait_def;
pub mod view;

#[cfg(test)]
mod tests_engine;

pub use aggressive::Aggressive;
pub use baseline::Baseline;
pub use cautious::Cautious;
pub use engine::{decide, turn_order, Decision};
pub use registry::{by_name, registered_strategies, strategy_for};
pub use strategic::Strategic;
pub use trait_def::{Strategy, WitchChoice};
pub use view::ActorView;

/// RNG stream used for every synthetic decision in a room.
pub type DecisionRng = rand_chacha::ChaCha8Rng;
