//! Domain layer: pure session logic, no I/O.

pub mod action;
pub mod game_transition;
pub mod participant;
pub mod phase;
pub mod roles;
pub mod rules;
pub mod seed_derivation;
pub mod session;
pub mod skills;
pub mod snapshot;

#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_phase;
#[cfg(test)]
mod tests_props_rounds;
#[cfg(test)]
mod tests_props_votes;
#[cfg(test)]
mod tests_skills;
#[cfg(test)]
mod tests_snapshot;
#[cfg(test)]
mod tests_win_conditions;

// Re-exports for ergonomics
pub use action::{Action, ActionKind, ActionRequest};
pub use participant::{ActorKind, Participant, ParticipantId, Profile, RoomId};
pub use phase::{Outcome, Phase, PhaseReport, Transition};
pub use roles::{Faction, GameMode, Role};
pub use session::{ActionOutcome, PhaseBudgets, Session, SessionRules};
pub use skills::SkillLedger;
pub use snapshot::{ParticipantView, SessionSnapshot};
